//! Fixed numbers of the game's ruleset.

use crate::bag::{Bag, BagBuilder};
use crate::card::Card;

use strum::IntoEnumIterator;

/// Number of cars each player starts with.
pub const INITIAL_CAR_COUNT: usize = 40;

/// Once a player is left with this many cars or fewer, the last round begins.
pub const LAST_TURN_CAR_LIMIT: usize = 2;

pub const FACE_UP_CARDS_COUNT: usize = 5;

/// Number of cards dealt to each player at the start of the game.
pub const INITIAL_CARDS_COUNT: usize = 4;

/// Number of tickets offered to each player at the start of the game.
pub const INITIAL_TICKETS_COUNT: usize = 5;

/// Number of initial tickets a player may give back.
pub const DISCARDABLE_TICKETS_COUNT: usize = 2;

/// Number of tickets offered when a player draws tickets during the game.
pub const IN_GAME_TICKETS_COUNT: usize = 3;

/// Number of cards revealed from the deck when trying to claim a tunnel.
pub const ADDITIONAL_TUNNEL_CARDS: usize = 3;

/// Number of cards a player draws on a [`crate::player::TurnKind::DrawCards`] turn.
pub const DRAWN_CARDS_PER_TURN: usize = 2;

pub const LOCOMOTIVE_CARDS_COUNT: usize = 14;

/// Number of wagon cards of each color.
pub const CAR_CARDS_COUNT: usize = 12;

pub const TOTAL_CARDS_COUNT: usize = 8 * CAR_CARDS_COUNT + LOCOMOTIVE_CARDS_COUNT;

pub const MIN_ROUTE_LENGTH: usize = 1;

pub const MAX_ROUTE_LENGTH: usize = 6;

/// Points earned by claiming a route, indexed by its length.
/// Index 0 is never used, as routes have at least one car.
pub const ROUTE_CLAIM_POINTS: [u32; MAX_ROUTE_LENGTH + 1] = [0, 1, 2, 4, 7, 10, 15];

pub const LONGEST_TRAIL_BONUS_POINTS: u32 = 10;

lazy_static! {
    /// The full card supply: 12 cards of each color and 14 locomotives.
    pub static ref ALL_CARDS: Bag<Card> = {
        let mut builder = BagBuilder::new();
        for card in Card::iter() {
            let count = if card.is_locomotive() {
                LOCOMOTIVE_CARDS_COUNT
            } else {
                CAR_CARDS_COUNT
            };
            builder.add_count(count, card);
        }
        builder.build()
    };
}
