use crate::bag::Bag;
use crate::error::{ensure, Result};

use rand::seq::SliceRandom;
use rand::Rng;

/// An immutable, shuffled pile of cards (or tickets), consumed from the top.
///
/// Every draw returns a new `Deck`; the original one is left untouched.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deck<T> {
    /// The top of the deck is the first element.
    cards: Vec<T>,
}

impl<T: Ord + Clone> Deck<T> {
    /// Shuffles the given cards once, using `rng`, into a new deck.
    ///
    /// # Example
    /// ```
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    /// use tchu::bag::Bag;
    /// use tchu::card::Card;
    /// use tchu::deck::Deck;
    ///
    /// let mut rng = StdRng::seed_from_u64(2021);
    /// let deck = Deck::of(&Bag::of(3, Card::Red), &mut rng);
    ///
    /// assert_eq!(deck.size(), 3);
    /// assert_eq!(deck.top_card().unwrap(), Card::Red);
    /// assert_eq!(deck.without_top_card().unwrap().size(), 2);
    /// ```
    pub fn of<R: Rng + ?Sized>(cards: &Bag<T>, rng: &mut R) -> Self {
        let mut cards = cards.to_list();
        cards.shuffle(rng);

        Self { cards }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn top_card(&self) -> Result<T> {
        match self.cards.first() {
            Some(card) => Ok(card.clone()),
            None => Err(crate::Error::invalid(
                "Cannot look at the top card of an empty deck.",
            )),
        }
    }

    pub fn without_top_card(&self) -> Result<Self> {
        ensure!(
            !self.is_empty(),
            "Cannot remove the top card of an empty deck."
        );

        self.without_top_cards(1)
    }

    /// The `count` cards at the top of the deck.
    pub fn top_cards(&self, count: usize) -> Result<Bag<T>> {
        self.check_count(count)?;

        Ok(self.cards[..count].iter().cloned().collect())
    }

    /// This deck without its `count` top cards.
    pub fn without_top_cards(&self, count: usize) -> Result<Self> {
        self.check_count(count)?;

        Ok(Self {
            cards: self.cards[count..].to_vec(),
        })
    }

    #[inline]
    fn check_count(&self, count: usize) -> Result<()> {
        ensure!(
            count <= self.size(),
            "Cannot take {} cards from a deck of {} cards.",
            count,
            self.size()
        );
        Ok(())
    }
}
