use crate::bag::Bag;
use crate::card::Card;
use crate::error::Result;
use crate::game_state::PublicGameState;
use crate::player_state::PlayerState;
use crate::route::Route;
use crate::ticket::Ticket;

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::collections::BTreeMap;
use strum_macros::{Display, EnumCount, EnumIter};

/// Identifies each of the two players.
///
/// # JSON
/// Players are serialized as their index, i.e. `0` for the first player.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize_repr,
    Display,
    EnumCount,
    EnumIter,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize_repr,
)]
#[repr(u8)]
pub enum PlayerId {
    #[strum(serialize = "player 1")]
    Player1 = 0,
    #[strum(serialize = "player 2")]
    Player2 = 1,
}

impl PlayerId {
    /// The other player.
    ///
    /// # Example
    /// ```
    /// use tchu::player::PlayerId;
    ///
    /// assert_eq!(PlayerId::Player1.next(), PlayerId::Player2);
    /// assert_eq!(PlayerId::Player2.next(), PlayerId::Player1);
    /// ```
    pub fn next(&self) -> Self {
        match self {
            PlayerId::Player1 => PlayerId::Player2,
            PlayerId::Player2 => PlayerId::Player1,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The player with the given index, if any.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PlayerId::Player1),
            1 => Some(PlayerId::Player2),
            _ => None,
        }
    }
}

/// Names of both players, as shown in the game's messages.
pub type PlayerNames = BTreeMap<PlayerId, String>;

/// The three kinds of turns a player can take.
///
/// # JSON
/// Turn kinds are serialized in snake_case.
#[derive(
    Clone, Copy, Debug, Deserialize, Display, EnumCount, EnumIter, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TurnKind {
    DrawTickets,
    /// Two cards are drawn, each either face up or from the deck.
    DrawCards,
    ClaimRoute,
}

/// Where a card is drawn from.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DrawSlot {
    /// The top of the deck, without seeing it first.
    Deck,
    /// One of the five face-up cards.
    FaceUp(usize),
}

/// A participant of the game.
///
/// The game calls these methods to inform a player of what happens, and to ask for their
/// decisions. The engine never assumes anything about how a decision is made: it could come
/// from a bot, a graphical interface, or a remote machine.
///
/// Every method returns a `Result`, so that a player behind a connection can report a
/// failure of the transport instead of blocking the game forever.
pub trait Player {
    /// Called once at the start of the game, with the identity of this player and the
    /// names of both players.
    fn init_players(&mut self, own_id: PlayerId, names: &PlayerNames) -> Result<()>;

    /// A message to display, describing what happened in the game.
    fn receive_info(&mut self, info: &str) -> Result<()>;

    /// Called whenever the state of the game changes.
    fn update_state(&mut self, public_state: &PublicGameState, own_state: &PlayerState)
        -> Result<()>;

    /// Tells the player which tickets are dealt to them at the start of the game.
    fn set_initial_ticket_choice(&mut self, tickets: &Bag<Ticket>) -> Result<()>;

    /// Which of the initially dealt tickets the player keeps.
    fn choose_initial_tickets(&mut self) -> Result<Bag<Ticket>>;

    /// What the player does this turn.
    fn next_turn(&mut self) -> Result<TurnKind>;

    /// Which of the drawn tickets the player keeps.
    fn choose_tickets(&mut self, options: &Bag<Ticket>) -> Result<Bag<Ticket>>;

    /// Where the player draws their next card from.
    fn draw_slot(&mut self) -> Result<DrawSlot>;

    /// The route the player wants to claim this turn.
    fn claimed_route(&mut self) -> Result<Route>;

    /// The cards the player first lays down to claim their route.
    fn initial_claim_cards(&mut self) -> Result<Bag<Card>>;

    /// Which additional cards the player uses to claim a tunnel. An empty bag gives up on
    /// the tunnel.
    fn choose_additional_cards(&mut self, options: &[Bag<Card>]) -> Result<Bag<Card>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    use strum::{EnumCount, IntoEnumIterator};

    #[test]
    fn player_ids() {
        assert_eq!(PlayerId::COUNT, 2);
        assert_eq!(
            PlayerId::iter().collect::<Vec<_>>(),
            vec![PlayerId::Player1, PlayerId::Player2]
        );
        assert_eq!(PlayerId::Player2.index(), 1);
        assert_eq!(PlayerId::from_index(0), Some(PlayerId::Player1));
        assert_eq!(PlayerId::from_index(2), None);
        assert_eq!(PlayerId::Player1.to_string(), "player 1");
    }

    #[test]
    fn player_id_to_json() -> serde_json::Result<()> {
        assert_eq!(serde_json::to_string(&PlayerId::Player1)?, "0");
        assert_eq!(serde_json::from_str::<PlayerId>("1")?, PlayerId::Player2);
        assert!(serde_json::from_str::<PlayerId>("2").is_err());
        Ok(())
    }

    #[test]
    fn turn_kind_to_json() -> serde_json::Result<()> {
        assert_eq!(TurnKind::COUNT, 3);
        assert_eq!(
            serde_json::to_string(&TurnKind::DrawTickets)?,
            r#""draw_tickets""#
        );
        assert_eq!(
            serde_json::from_str::<TurnKind>(r#""claim_route""#)?,
            TurnKind::ClaimRoute
        );
        Ok(())
    }
}
