use crate::error::Result;
use crate::player::{PlayerId, PlayerNames};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};

/// Settings of a single game.
///
/// # JSON
/// Both fields are optional:
/// ```json
/// {"player_names": ["Ada", "Grace"], "seed": 2021}
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct GameConfig {
    /// Names of both players, in [`PlayerId`] order.
    pub player_names: [String; PlayerId::COUNT],
    /// Seeds the shuffling of the cards and tickets. Without one, every game differs.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_names: [String::from("Player 1"), String::from("Player 2")],
            seed: None,
        }
    }
}

impl GameConfig {
    /// Reads a configuration from JSON, where missing fields take their default value.
    ///
    /// # Example
    /// ```
    /// use tchu::config::GameConfig;
    ///
    /// let config = GameConfig::from_json(r#"{"seed": 42}"#)?;
    /// assert_eq!(config.seed, Some(42));
    /// assert_eq!(config.player_names[0], "Player 1");
    /// # Ok::<(), tchu::Error>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The names of both players, keyed by their id.
    pub fn player_names(&self) -> PlayerNames {
        PlayerId::iter()
            .zip(self.player_names.iter().cloned())
            .collect()
    }

    /// A random number generator seeded from the configuration, or from the operating
    /// system if no seed is set.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rand::Rng;

    #[test]
    fn default_config() {
        let config = GameConfig::from_json("{}").unwrap();

        assert_eq!(config, GameConfig::default());
        assert_eq!(
            config.player_names().get(&PlayerId::Player2),
            Some(&String::from("Player 2"))
        );
    }

    #[test]
    fn config_from_json() {
        let config =
            GameConfig::from_json(r#"{"player_names": ["Ada", "Grace"], "seed": 7}"#).unwrap();

        assert_eq!(config.seed, Some(7));
        assert_eq!(
            config.player_names(),
            PlayerNames::from([
                (PlayerId::Player1, String::from("Ada")),
                (PlayerId::Player2, String::from("Grace")),
            ])
        );
    }

    #[test]
    fn seeded_rngs_agree() {
        let config = GameConfig {
            seed: Some(2021),
            ..Default::default()
        };

        assert_eq!(
            config.rng().gen::<u64>(),
            StdRng::seed_from_u64(2021).gen::<u64>()
        );
    }

    #[test]
    fn invalid_config() {
        let error = GameConfig::from_json(r#"{"player_names": ["Ada"]}"#).unwrap_err();
        assert!(matches!(error, crate::Error::Config(_)));
        assert!(GameConfig::from_json("not json").is_err());
    }
}
