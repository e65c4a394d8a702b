use thiserror::Error;

/// Everything that can go wrong while running a game.
///
/// Rule violations are detected before any new state is produced, so an `Err` never
/// leaves a half-applied transition behind.
#[derive(Debug, Error)]
pub enum Error {
    /// A precondition of a state transition or value constructor was violated,
    /// e.g. drawing from an empty deck or claiming a route with the wrong cards.
    #[error("{0}")]
    InvalidArgument(String),
    /// A remote participant sent something that cannot be parsed, or that is not
    /// what the protocol expects at this point.
    #[error("Protocol violation: {0}")]
    Protocol(String),
    /// The connection to a remote participant failed.
    #[error("Transport failure: {0}")]
    Transport(#[from] std::io::Error),
    /// A game configuration could not be read.
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    #[inline]
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    #[inline]
    pub(crate) fn protocol(message: impl Into<String>) -> Self {
        Error::Protocol(message.into())
    }

    /// Whether this error is a rule violation, as opposed to a communication problem.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}

/// All fallible operations of the crate return this `Result`.
pub type Result<T> = std::result::Result<T, Error>;

/// Returns an [`Error::InvalidArgument`] with the given message if the condition does not hold.
macro_rules! ensure {
    ($condition:expr, $($message:tt)+) => {
        if !$condition {
            return Err($crate::error::Error::InvalidArgument(format!($($message)+)));
        }
    };
}

pub(crate) use ensure;

#[cfg(test)]
mod tests {
    use super::*;

    fn checked_half(value: u8) -> Result<u8> {
        ensure!(value % 2 == 0, "Cannot halve the odd number {}.", value);
        Ok(value / 2)
    }

    #[test]
    fn ensure_passes() {
        assert_eq!(checked_half(8).unwrap(), 4);
    }

    #[test]
    fn ensure_fails_with_message() {
        let error = checked_half(7).unwrap_err();
        assert!(error.is_invalid_argument());
        assert_eq!(error.to_string(), "Cannot halve the odd number 7.");
    }

    #[test]
    fn io_error_converts_to_transport() {
        let error: Error =
            std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "connection closed").into();
        assert!(matches!(error, Error::Transport(_)));
        assert!(!error.is_invalid_argument());
        assert_eq!(error.to_string(), "Transport failure: connection closed");
    }

    #[test]
    fn protocol_error_message() {
        assert_eq!(
            Error::protocol("unknown message FOO").to_string(),
            "Protocol violation: unknown message FOO"
        );
    }
}
