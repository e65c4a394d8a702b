use serde::{Deserialize, Serialize};

/// Phases of a game, which act as states in the game's finite-state machine.
///
/// # JSON
/// Phases are serialized in snake_case.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
  /// Cards and tickets are dealt, and each player picks their initial tickets.
  Init,
  /// The main turn-based phase.
  Playing,
  /// Once a player is left with two cars or fewer, each player plays one last turn.
  LastRound,
  /// Points are tallied, and no more turns are played.
  Ended,
}

impl GamePhase {
  /// Whether players take turns in this phase.
  pub fn is_turn_based(&self) -> bool {
    matches!(self, GamePhase::Playing | GamePhase::LastRound)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn game_phase_to_json() -> serde_json::Result<()> {
    assert_eq!(serde_json::to_string(&GamePhase::Init)?, r#""init""#);
    assert_eq!(serde_json::to_string(&GamePhase::LastRound)?, r#""last_round""#);
    Ok(())
  }

  #[test]
  fn json_to_game_phase() -> serde_json::Result<()> {
    assert_eq!(
      serde_json::from_str::<GamePhase>(r#""playing""#)?,
      GamePhase::Playing
    );
    assert_eq!(
      serde_json::from_str::<GamePhase>(r#""ended""#)?,
      GamePhase::Ended
    );

    Ok(())
  }

  #[test]
  fn invalid_json_to_game_phase() {
    assert!(serde_json::from_str::<GamePhase>(r#""in_lobby""#).is_err());
  }

  #[test]
  fn turn_based_phases() {
    assert!(!GamePhase::Init.is_turn_based());
    assert!(GamePhase::Playing.is_turn_based());
    assert!(GamePhase::LastRound.is_turn_based());
    assert!(!GamePhase::Ended.is_turn_based());
  }
}
