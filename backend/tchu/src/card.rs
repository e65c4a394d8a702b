use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumCount, EnumIter};

/// The eight colors of wagon cards and of colored routes.
///
/// The declaration order is the canonical order used everywhere cards are sorted or
/// enumerated, including the wire protocol.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    EnumCount,
    EnumIter,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Color {
    Black,
    Violet,
    Blue,
    Green,
    Yellow,
    Orange,
    Red,
    White,
}

/// The nine kinds of cards: one wagon card per [`Color`], plus the locomotive.
///
/// # JSON
/// Cards are serialized in lowercase.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    EnumCount,
    EnumIter,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Card {
    Black,
    Violet,
    Blue,
    Green,
    Yellow,
    Orange,
    Red,
    White,
    /// Matches any color, and is the only card allowed on its own for tunnels.
    Locomotive,
}

impl Card {
    /// The wagon card of the given color.
    ///
    /// # Examples:
    /// ```
    /// use tchu::card::{Card, Color};
    ///
    /// assert_eq!(Card::of(Color::Violet), Card::Violet);
    /// ```
    pub fn of(color: Color) -> Self {
        match color {
            Color::Black => Card::Black,
            Color::Violet => Card::Violet,
            Color::Blue => Card::Blue,
            Color::Green => Card::Green,
            Color::Yellow => Card::Yellow,
            Color::Orange => Card::Orange,
            Color::Red => Card::Red,
            Color::White => Card::White,
        }
    }

    /// The color of a wagon card, or `None` for the locomotive.
    pub fn color(&self) -> Option<Color> {
        match self {
            Card::Black => Some(Color::Black),
            Card::Violet => Some(Color::Violet),
            Card::Blue => Some(Color::Blue),
            Card::Green => Some(Color::Green),
            Card::Yellow => Some(Color::Yellow),
            Card::Orange => Some(Color::Orange),
            Card::Red => Some(Color::Red),
            Card::White => Some(Color::White),
            Card::Locomotive => None,
        }
    }

    /// Whether this card is the locomotive, i.e. matches with any color.
    ///
    /// # Examples:
    /// ```
    /// use tchu::card::Card;
    ///
    /// assert!(Card::Locomotive.is_locomotive());
    /// assert!(!Card::Red.is_locomotive());
    /// ```
    #[inline]
    pub fn is_locomotive(&self) -> bool {
        *self == Card::Locomotive
    }
}
