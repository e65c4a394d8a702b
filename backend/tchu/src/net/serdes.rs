//! Text encodings of everything exchanged with a remote player.
//!
//! Integers are written in decimal, strings in Base64, and values of a fixed catalog
//! (cards, routes, tickets, ...) as their index in that catalog. Collections join their
//! elements with a separator, and an empty collection is an empty string.

use crate::bag::Bag;
use crate::card::Card;
use crate::card_state::PublicCardState;
use crate::error::Result;
use crate::game_state::PublicGameState;
use crate::map::{ROUTES, TICKETS};
use crate::player::{DrawSlot, PlayerId, TurnKind};
use crate::player_state::{PlayerState, PublicPlayerState};
use crate::route::Route;
use crate::ticket::Ticket;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::str::FromStr;
use std::sync::Arc;
use strum::IntoEnumIterator;

type Serializer<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;
type Deserializer<T> = Arc<dyn Fn(&str) -> Result<T> + Send + Sync>;

/// A pair of functions turning a `T` into text and back.
pub struct Serde<T> {
    serializer: Serializer<T>,
    deserializer: Deserializer<T>,
}

impl<T> Clone for Serde<T> {
    fn clone(&self) -> Self {
        Self {
            serializer: Arc::clone(&self.serializer),
            deserializer: Arc::clone(&self.deserializer),
        }
    }
}

impl<T: 'static> Serde<T> {
    pub fn new(
        serializer: impl Fn(&T) -> String + Send + Sync + 'static,
        deserializer: impl Fn(&str) -> Result<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            serializer: Arc::new(serializer),
            deserializer: Arc::new(deserializer),
        }
    }

    pub fn serialize(&self, value: &T) -> String {
        (self.serializer)(value)
    }

    pub fn deserialize(&self, text: &str) -> Result<T> {
        (self.deserializer)(text)
    }

    /// Encodes each value as its index in `values`.
    ///
    /// # Example
    /// ```
    /// use tchu::net::serdes::Serde;
    ///
    /// let serde = Serde::one_of(vec!["zero", "one", "two"]);
    /// assert_eq!(serde.serialize(&"two"), "2");
    /// assert_eq!(serde.deserialize("1")?, "one");
    /// assert!(serde.deserialize("3").is_err());
    /// # Ok::<(), tchu::Error>(())
    /// ```
    pub fn one_of(values: Vec<T>) -> Self
    where
        T: Clone + PartialEq + Send + Sync,
    {
        let values = Arc::new(values);
        let lookup = Arc::clone(&values);

        Self::new(
            move |value| match values.iter().position(|candidate| candidate == value) {
                Some(index) => index.to_string(),
                // Only values from the catalog are ever sent.
                None => String::new(),
            },
            move |text| {
                let index: usize = parse(text)?;
                lookup.get(index).cloned().ok_or_else(|| {
                    crate::Error::protocol(format!(
                        "index {} is out of range, there are {} values",
                        index,
                        lookup.len()
                    ))
                })
            },
        )
    }

    /// Encodes a list by joining its serialized elements with `separator`.
    pub fn list_of(&self, separator: char) -> Serde<Vec<T>> {
        let element = self.clone();
        let element_de = self.clone();

        Serde::new(
            move |values: &Vec<T>| {
                values
                    .iter()
                    .map(|value| element.serialize(value))
                    .collect::<Vec<_>>()
                    .join(&separator.to_string())
            },
            move |text| {
                if text.is_empty() {
                    return Ok(Vec::new());
                }
                text.split(separator)
                    .map(|part| element_de.deserialize(part))
                    .collect()
            },
        )
    }

    /// Encodes a bag as the list of its elements, in their canonical order.
    pub fn bag_of(&self, separator: char) -> Serde<Bag<T>>
    where
        T: Ord + Clone,
    {
        let list = self.list_of(separator);
        let list_de = list.clone();

        Serde::new(
            move |bag: &Bag<T>| list.serialize(&bag.to_list()),
            move |text| Ok(Bag::from(list_de.deserialize(text)?)),
        )
    }
}

fn parse<N: FromStr>(text: &str) -> Result<N> {
    text.parse()
        .map_err(|_| crate::Error::protocol(format!("`{}` is not a valid number", text)))
}

/// Splits `text` into exactly `count` fields.
fn fields(text: &str, separator: char, count: usize) -> Result<Vec<&str>> {
    let fields: Vec<&str> = text.split(separator).collect();
    if fields.len() != count {
        return Err(crate::Error::protocol(format!(
            "expected {} fields separated by `{}`, but got {} in `{}`",
            count,
            separator,
            fields.len(),
            text
        )));
    }
    Ok(fields)
}

lazy_static! {
    pub static ref INTEGER: Serde<usize> =
        Serde::new(|value: &usize| value.to_string(), parse::<usize>);

    /// UTF-8 text, in standard padded Base64.
    pub static ref STRING: Serde<String> = Serde::new(
        |value: &String| STANDARD.encode(value),
        |text| {
            let bytes = STANDARD
                .decode(text)
                .map_err(|error| crate::Error::protocol(format!("invalid Base64: {}", error)))?;
            String::from_utf8(bytes)
                .map_err(|error| crate::Error::protocol(format!("invalid UTF-8: {}", error)))
        },
    );

    pub static ref PLAYER_ID: Serde<PlayerId> = Serde::one_of(PlayerId::iter().collect());
    pub static ref TURN_KIND: Serde<TurnKind> = Serde::one_of(TurnKind::iter().collect());
    pub static ref CARD: Serde<Card> = Serde::one_of(Card::iter().collect());
    pub static ref ROUTE: Serde<Route> = Serde::one_of(ROUTES.clone());
    pub static ref TICKET: Serde<Ticket> = Serde::one_of(TICKETS.clone());

    pub static ref STRING_LIST: Serde<Vec<String>> = STRING.list_of(',');
    pub static ref CARD_LIST: Serde<Vec<Card>> = CARD.list_of(',');
    pub static ref ROUTE_LIST: Serde<Vec<Route>> = ROUTE.list_of(',');
    pub static ref CARD_BAG: Serde<Bag<Card>> = CARD.bag_of(',');
    pub static ref TICKET_BAG: Serde<Bag<Ticket>> = TICKET.bag_of(',');
    pub static ref CARD_BAG_LIST: Serde<Vec<Bag<Card>>> = CARD_BAG.list_of(';');

    /// `-1` for the deck, the slot's index otherwise.
    pub static ref DRAW_SLOT: Serde<DrawSlot> = Serde::new(
        |slot: &DrawSlot| match slot {
            DrawSlot::Deck => String::from("-1"),
            DrawSlot::FaceUp(slot) => slot.to_string(),
        },
        |text| match parse::<i64>(text)? {
            -1 => Ok(DrawSlot::Deck),
            slot if slot >= 0 => Ok(DrawSlot::FaceUp(slot as usize)),
            slot => Err(crate::Error::protocol(format!("invalid draw slot {}", slot))),
        },
    );

    /// `faceUpCards;deckSize;discardsSize`
    pub static ref PUBLIC_CARD_STATE: Serde<PublicCardState> = Serde::new(
        |card_state: &PublicCardState| {
            [
                CARD_LIST.serialize(&card_state.face_up_cards().to_vec()),
                INTEGER.serialize(&card_state.deck_size()),
                INTEGER.serialize(&card_state.discards_size()),
            ]
            .join(";")
        },
        |text| {
            let fields = fields(text, ';', 3)?;
            PublicCardState::new(
                CARD_LIST.deserialize(fields[0])?,
                INTEGER.deserialize(fields[1])?,
                INTEGER.deserialize(fields[2])?,
            )
            .map_err(|error| crate::Error::protocol(error.to_string()))
        },
    );

    /// `ticketCount;cardCount;routes`
    pub static ref PUBLIC_PLAYER_STATE: Serde<PublicPlayerState> = Serde::new(
        |player_state: &PublicPlayerState| {
            [
                INTEGER.serialize(&player_state.ticket_count()),
                INTEGER.serialize(&player_state.card_count()),
                ROUTE_LIST.serialize(&player_state.routes().to_vec()),
            ]
            .join(";")
        },
        |text| {
            let fields = fields(text, ';', 3)?;
            Ok(PublicPlayerState::new(
                INTEGER.deserialize(fields[0])?,
                INTEGER.deserialize(fields[1])?,
                ROUTE_LIST.deserialize(fields[2])?,
            ))
        },
    );

    /// `tickets;cards;routes`
    pub static ref PLAYER_STATE: Serde<PlayerState> = Serde::new(
        |player_state: &PlayerState| {
            [
                TICKET_BAG.serialize(player_state.tickets()),
                CARD_BAG.serialize(player_state.cards()),
                ROUTE_LIST.serialize(&player_state.routes().to_vec()),
            ]
            .join(";")
        },
        |text| {
            let fields = fields(text, ';', 3)?;
            Ok(PlayerState::new(
                TICKET_BAG.deserialize(fields[0])?,
                CARD_BAG.deserialize(fields[1])?,
                ROUTE_LIST.deserialize(fields[2])?,
            ))
        },
    );

    /// `ticketCount:cardState:currentPlayerId:player1State:player2State:lastPlayer`, where
    /// the last player is empty until the last round begins.
    pub static ref PUBLIC_GAME_STATE: Serde<PublicGameState> = Serde::new(
        |game_state: &PublicGameState| {
            [
                INTEGER.serialize(&game_state.ticket_count()),
                PUBLIC_CARD_STATE.serialize(game_state.card_state()),
                PLAYER_ID.serialize(&game_state.current_player_id()),
                PUBLIC_PLAYER_STATE.serialize(game_state.player_state(PlayerId::Player1)),
                PUBLIC_PLAYER_STATE.serialize(game_state.player_state(PlayerId::Player2)),
                game_state
                    .last_player()
                    .map(|player_id| PLAYER_ID.serialize(&player_id))
                    .unwrap_or_default(),
            ]
            .join(":")
        },
        |text| {
            let fields = fields(text, ':', 6)?;
            let last_player = if fields[5].is_empty() {
                None
            } else {
                Some(PLAYER_ID.deserialize(fields[5])?)
            };

            Ok(PublicGameState::new(
                INTEGER.deserialize(fields[0])?,
                PUBLIC_CARD_STATE.deserialize(fields[1])?,
                PLAYER_ID.deserialize(fields[2])?,
                [
                    PUBLIC_PLAYER_STATE.deserialize(fields[3])?,
                    PUBLIC_PLAYER_STATE.deserialize(fields[4])?,
                ],
                last_player,
            ))
        },
    );
}
