use log::{LevelFilter, SetLoggerError};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::sync::Once;

static INIT: Once = Once::new();

/// Logs to the terminal, at `level` and above.
///
/// Only the first call installs a logger: later calls do nothing and return `Ok(())`.
/// Returns an `Err` if another logger was installed outside of this function.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    let mut result = Ok(());

    INIT.call_once(|| {
        let config = ConfigBuilder::new()
            .set_location_level(LevelFilter::Off)
            .set_target_level(LevelFilter::Off)
            .set_thread_level(LevelFilter::Off)
            .build();

        result = TermLogger::init(level, config, TerminalMode::Mixed, ColorChoice::Auto);
    });

    result
}
