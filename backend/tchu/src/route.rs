use crate::bag::{Bag, BagBuilder};
use crate::card::{Card, Color};
use crate::constants::{
    ADDITIONAL_TUNNEL_CARDS, MAX_ROUTE_LENGTH, MIN_ROUTE_LENGTH, ROUTE_CLAIM_POINTS,
};
use crate::error::{ensure, Result};
use crate::station::Station;

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::IntoEnumIterator;

/// Whether a route runs on the surface or through a tunnel.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Overground,
    /// Claiming a tunnel requires revealing three cards from the deck, which may
    /// demand additional cards.
    Underground,
}

/// A route connecting two neighboring stations.
///
/// Several routes may connect the same two stations; they are told apart by their `id`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Route {
    id: &'static str,
    station1: Station,
    station2: Station,
    length: usize,
    level: Level,
    /// `None` means that cards of any single color may be used.
    color: Option<Color>,
}

impl Route {
    /// Creates a route.
    ///
    /// Returns an `Err` if both stations are the same, or if the length is not between
    /// one and six.
    pub fn new(
        id: &'static str,
        station1: Station,
        station2: Station,
        length: usize,
        level: Level,
        color: Option<Color>,
    ) -> Result<Self> {
        ensure!(
            station1 != station2,
            "Route {} cannot connect {} to itself.",
            id,
            station1
        );
        ensure!(
            (MIN_ROUTE_LENGTH..=MAX_ROUTE_LENGTH).contains(&length),
            "Route {} has length {}, but lengths must be between {} and {}.",
            id,
            length,
            MIN_ROUTE_LENGTH,
            MAX_ROUTE_LENGTH
        );

        Ok(Self {
            id,
            station1,
            station2,
            length,
            level,
            color,
        })
    }

    /// Builds a route of the static board, whose data is checked by the map's tests.
    pub(crate) const fn from_board(
        id: &'static str,
        station1: Station,
        station2: Station,
        length: usize,
        level: Level,
        color: Option<Color>,
    ) -> Self {
        Self {
            id,
            station1,
            station2,
            length,
            level,
            color,
        }
    }

    #[inline]
    pub fn id(&self) -> &'static str {
        self.id
    }

    #[inline]
    pub fn station1(&self) -> Station {
        self.station1
    }

    #[inline]
    pub fn station2(&self) -> Station {
        self.station2
    }

    #[inline]
    pub fn stations(&self) -> [Station; 2] {
        [self.station1, self.station2]
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn level(&self) -> Level {
        self.level
    }

    #[inline]
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    #[inline]
    pub fn is_tunnel(&self) -> bool {
        self.level == Level::Underground
    }

    /// Whether both routes connect the same two stations, in either direction.
    pub fn connects_same_stations(&self, other: &Route) -> bool {
        (self.station1 == other.station1 && self.station2 == other.station2)
            || (self.station1 == other.station2 && self.station2 == other.station1)
    }

    /// The end of this route that is not `station`.
    ///
    /// Returns an `Err` if `station` is not one of the route's ends.
    pub fn station_opposite(&self, station: Station) -> Result<Station> {
        if station == self.station1 {
            Ok(self.station2)
        } else if station == self.station2 {
            Ok(self.station1)
        } else {
            Err(crate::Error::invalid(format!(
                "Station {} is not an end of route {}.",
                station, self.id
            )))
        }
    }

    /// Every set of cards that could be used to claim this route, ignoring what a player holds.
    ///
    /// Overground routes only accept cards of one color. Tunnels also accept any number of
    /// locomotives, including locomotives only. Options are ordered by increasing number of
    /// locomotives, then by color.
    ///
    /// # Example
    /// ```
    /// use tchu::card::{Card, Color};
    /// use tchu::route::{Level, Route};
    /// use tchu::station::Station;
    ///
    /// let route = Route::new(
    ///     "LAU_FRI_1",
    ///     Station::new(13, "Lausanne"),
    ///     Station::new(9, "Fribourg"),
    ///     3,
    ///     Level::Overground,
    ///     Some(Color::Red),
    /// )
    /// .unwrap();
    ///
    /// let options = route.possible_claim_cards();
    /// assert_eq!(options.len(), 1);
    /// assert_eq!(options[0].count_of(&Card::Red), 3);
    /// ```
    pub fn possible_claim_cards(&self) -> Vec<Bag<Card>> {
        let max_locomotives = if self.is_tunnel() { self.length } else { 0 };
        let colors: Vec<Color> = match self.color {
            Some(color) => vec![color],
            None => Color::iter().collect(),
        };

        let mut options = Vec::new();
        for locomotives in 0..=max_locomotives {
            if locomotives == self.length {
                options.push(Bag::of(locomotives, Card::Locomotive));
                continue;
            }

            for color in &colors {
                let mut builder = BagBuilder::new();
                builder
                    .add_count(self.length - locomotives, Card::of(*color))
                    .add_count(locomotives, Card::Locomotive);
                options.push(builder.build());
            }
        }

        options
    }

    /// Number of additional cards required to claim this tunnel, given the cards initially
    /// laid down and the three cards revealed from the deck.
    ///
    /// Every revealed card that is a locomotive, or that matches one of the claim cards,
    /// requires one more card.
    pub fn additional_claim_cards_count(
        &self,
        claim_cards: &Bag<Card>,
        drawn_cards: &Bag<Card>,
    ) -> Result<usize> {
        ensure!(
            self.is_tunnel(),
            "Route {} is not a tunnel, so it never requires additional cards.",
            self.id
        );
        ensure!(
            drawn_cards.size() == ADDITIONAL_TUNNEL_CARDS,
            "Exactly {} cards must be drawn to claim a tunnel, but {} were provided.",
            ADDITIONAL_TUNNEL_CARDS,
            drawn_cards.size()
        );

        Ok(drawn_cards
            .iter()
            .filter(|card| card.is_locomotive() || claim_cards.contains_element(card))
            .count())
    }

    /// Points earned by claiming this route.
    #[inline]
    pub fn claim_points(&self) -> u32 {
        ROUTE_CLAIM_POINTS[self.length]
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.station1, self.station2)
    }
}
