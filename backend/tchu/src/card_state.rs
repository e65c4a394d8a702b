use crate::bag::Bag;
use crate::card::Card;
use crate::constants::FACE_UP_CARDS_COUNT;
use crate::deck::Deck;
use crate::error::{ensure, Result};

use array_init::array_init;
use rand::Rng;
use std::ops::Deref;

/// Information about the cards that is visible to both players.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicCardState {
    face_up_cards: [Card; FACE_UP_CARDS_COUNT],
    deck_size: usize,
    discards_size: usize,
}

impl PublicCardState {
    /// Returns an `Err` unless exactly five face-up cards are given.
    pub fn new(face_up_cards: Vec<Card>, deck_size: usize, discards_size: usize) -> Result<Self> {
        ensure!(
            face_up_cards.len() == FACE_UP_CARDS_COUNT,
            "There must be {} face-up cards, but {} were provided.",
            FACE_UP_CARDS_COUNT,
            face_up_cards.len()
        );

        match array_init::from_iter(face_up_cards) {
            Some(face_up_cards) => Ok(Self {
                face_up_cards,
                deck_size,
                discards_size,
            }),
            None => Err(crate::Error::invalid("Cannot lay out the face-up cards.")),
        }
    }

    #[inline]
    pub fn face_up_cards(&self) -> &[Card; FACE_UP_CARDS_COUNT] {
        &self.face_up_cards
    }

    /// Returns an `Err` if `slot` is not one of the five face-up slots.
    pub fn face_up_card(&self, slot: usize) -> Result<Card> {
        match self.face_up_cards.get(slot) {
            Some(card) => Ok(*card),
            None => Err(crate::Error::invalid(format!(
                "Cannot look at face-up slot {}: there are only {} slots.",
                slot, FACE_UP_CARDS_COUNT
            ))),
        }
    }

    #[inline]
    pub fn deck_size(&self) -> usize {
        self.deck_size
    }

    #[inline]
    pub fn is_deck_empty(&self) -> bool {
        self.deck_size == 0
    }

    #[inline]
    pub fn discards_size(&self) -> usize {
        self.discards_size
    }

    /// Number of cards that are neither in a player's hand nor on a claimed route.
    pub fn total_size(&self) -> usize {
        FACE_UP_CARDS_COUNT + self.deck_size + self.discards_size
    }
}

/// Full state of the cards outside of the players' hands: the face-up cards, the deck and
/// the discard pile.
///
/// Only the engine knows the order of the deck and the content of the discard pile.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CardState {
    public: PublicCardState,
    deck: Deck<Card>,
    discards: Bag<Card>,
}

impl CardState {
    /// Lays out the top five cards of `deck` face up. The rest stays in the deck, and the
    /// discard pile starts empty.
    ///
    /// # Example
    /// ```
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    /// use tchu::bag::Bag;
    /// use tchu::card::Card;
    /// use tchu::card_state::CardState;
    /// use tchu::deck::Deck;
    ///
    /// let deck = Deck::of(&Bag::of(5, Card::Blue), &mut StdRng::seed_from_u64(2021));
    /// let card_state = CardState::of(&deck)?;
    ///
    /// assert_eq!(card_state.face_up_cards(), &[Card::Blue; 5]);
    /// assert_eq!(card_state.deck_size(), 0);
    /// # Ok::<(), tchu::Error>(())
    /// ```
    pub fn of(deck: &Deck<Card>) -> Result<Self> {
        ensure!(
            deck.size() >= FACE_UP_CARDS_COUNT,
            "Cannot lay out {} face-up cards from a deck of {} cards.",
            FACE_UP_CARDS_COUNT,
            deck.size()
        );

        let face_up_cards = deck.top_cards(FACE_UP_CARDS_COUNT)?.to_list();
        let deck = deck.without_top_cards(FACE_UP_CARDS_COUNT)?;

        Self::assemble(face_up_cards, deck, Bag::new())
    }

    fn assemble(face_up_cards: Vec<Card>, deck: Deck<Card>, discards: Bag<Card>) -> Result<Self> {
        Ok(Self {
            public: PublicCardState::new(face_up_cards, deck.size(), discards.size())?,
            deck,
            discards,
        })
    }

    /// The visible part of this state.
    #[inline]
    pub fn public(&self) -> &PublicCardState {
        &self.public
    }

    /// Replaces the face-up card at `slot` with the top card of the deck.
    ///
    /// Returns an `Err` if the slot does not exist or the deck is empty.
    pub fn with_drawn_face_up_card(&self, slot: usize) -> Result<Self> {
        self.face_up_card(slot)?;
        let top_card = self.top_deck_card()?;

        let face_up_cards: [Card; FACE_UP_CARDS_COUNT] = array_init(|index| {
            if index == slot {
                top_card
            } else {
                self.face_up_cards()[index]
            }
        });

        Self::assemble(
            face_up_cards.to_vec(),
            self.deck.without_top_card()?,
            self.discards.clone(),
        )
    }

    pub fn top_deck_card(&self) -> Result<Card> {
        ensure!(!self.deck.is_empty(), "Cannot draw a card from an empty deck.");

        self.deck.top_card()
    }

    pub fn without_top_deck_card(&self) -> Result<Self> {
        ensure!(!self.deck.is_empty(), "Cannot draw a card from an empty deck.");

        Self::assemble(
            self.face_up_cards().to_vec(),
            self.deck.without_top_card()?,
            self.discards.clone(),
        )
    }

    /// Shuffles the discard pile into a new deck, leaving the discard pile empty.
    ///
    /// Returns an `Err` unless the deck is empty.
    pub fn with_deck_recreated_from_discards<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Self> {
        ensure!(
            self.deck.is_empty(),
            "Cannot recreate the deck while it still has {} cards.",
            self.deck.size()
        );

        Self::assemble(
            self.face_up_cards().to_vec(),
            Deck::of(&self.discards, rng),
            Bag::new(),
        )
    }

    pub fn with_more_discarded_cards(&self, cards: &Bag<Card>) -> Self {
        let discards = self.discards.union(cards);

        Self {
            public: PublicCardState {
                discards_size: discards.size(),
                ..self.public.clone()
            },
            deck: self.deck.clone(),
            discards,
        }
    }
}

impl Deref for CardState {
    type Target = PublicCardState;

    fn deref(&self) -> &Self::Target {
        &self.public
    }
}
