use crate::bag::Bag;
use crate::card::Card;
use crate::card_state::{CardState, PublicCardState};
use crate::constants::{ALL_CARDS, FACE_UP_CARDS_COUNT, INITIAL_CARDS_COUNT, LAST_TURN_CAR_LIMIT};
use crate::deck::Deck;
use crate::error::{ensure, Result};
use crate::player::PlayerId;
use crate::player_state::{PlayerState, PublicPlayerState};
use crate::route::Route;
use crate::ticket::Ticket;

use rand::Rng;
use std::ops::Deref;
use strum::EnumCount;

/// The part of the game's state that both players know about.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicGameState {
    ticket_count: usize,
    card_state: PublicCardState,
    current_player_id: PlayerId,
    /// Indexed by [`PlayerId::index`].
    player_states: [PublicPlayerState; PlayerId::COUNT],
    /// Set once the last round has begun: the last player to play.
    last_player: Option<PlayerId>,
}

impl PublicGameState {
    pub fn new(
        ticket_count: usize,
        card_state: PublicCardState,
        current_player_id: PlayerId,
        player_states: [PublicPlayerState; PlayerId::COUNT],
        last_player: Option<PlayerId>,
    ) -> Self {
        Self {
            ticket_count,
            card_state,
            current_player_id,
            player_states,
            last_player,
        }
    }

    #[inline]
    pub fn ticket_count(&self) -> usize {
        self.ticket_count
    }

    #[inline]
    pub fn can_draw_tickets(&self) -> bool {
        self.ticket_count > 0
    }

    #[inline]
    pub fn card_state(&self) -> &PublicCardState {
        &self.card_state
    }

    /// Whether enough cards remain, in the deck and the discard pile, to draw cards.
    pub fn can_draw_cards(&self) -> bool {
        self.card_state.deck_size() + self.card_state.discards_size() >= FACE_UP_CARDS_COUNT
    }

    #[inline]
    pub fn current_player_id(&self) -> PlayerId {
        self.current_player_id
    }

    #[inline]
    pub fn player_state(&self, player_id: PlayerId) -> &PublicPlayerState {
        &self.player_states[player_id.index()]
    }

    #[inline]
    pub fn current_player_state(&self) -> &PublicPlayerState {
        self.player_state(self.current_player_id)
    }

    /// Routes claimed by either player.
    pub fn claimed_routes(&self) -> Vec<Route> {
        self.player_states
            .iter()
            .flat_map(|player_state| player_state.routes().iter().copied())
            .collect()
    }

    #[inline]
    pub fn last_player(&self) -> Option<PlayerId> {
        self.last_player
    }
}

/// The complete state of a game at a given moment.
///
/// A `GameState` is never modified: every action returns a new state, and the previous
/// one stays valid.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameState {
    public: PublicGameState,
    tickets: Deck<Ticket>,
    card_state: CardState,
    player_states: [PlayerState; PlayerId::COUNT],
}

impl GameState {
    /// Shuffles the tickets and the cards, deals four cards to each player, and picks the
    /// first player at random.
    ///
    /// # Example
    /// ```
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    /// use tchu::bag::Bag;
    /// use tchu::game_state::GameState;
    /// use tchu::map::TICKETS;
    /// use tchu::player::PlayerId;
    ///
    /// let tickets: Bag<_> = TICKETS.iter().cloned().collect();
    /// let game_state = GameState::initial(&tickets, &mut StdRng::seed_from_u64(2021))?;
    ///
    /// assert_eq!(game_state.ticket_count(), tickets.size());
    /// assert_eq!(game_state.player_state(PlayerId::Player1).card_count(), 4);
    /// assert_eq!(game_state.last_player(), None);
    /// # Ok::<(), tchu::Error>(())
    /// ```
    pub fn initial<R: Rng + ?Sized>(tickets: &Bag<Ticket>, rng: &mut R) -> Result<Self> {
        let tickets = Deck::of(tickets, rng);
        let mut deck = Deck::of(&ALL_CARDS, rng);

        let mut hands = Vec::with_capacity(PlayerId::COUNT);
        for _ in 0..PlayerId::COUNT {
            hands.push(PlayerState::initial(deck.top_cards(INITIAL_CARDS_COUNT)?)?);
            deck = deck.without_top_cards(INITIAL_CARDS_COUNT)?;
        }
        let player_states = Self::pair(hands)?;

        let first_player = PlayerId::from_index(rng.gen_range(0..PlayerId::COUNT))
            .unwrap_or(PlayerId::Player1);

        Ok(Self::assemble(
            tickets,
            CardState::of(&deck)?,
            player_states,
            first_player,
            None,
        ))
    }

    fn pair(states: Vec<PlayerState>) -> Result<[PlayerState; PlayerId::COUNT]> {
        let count = states.len();
        array_init::from_iter(states).ok_or_else(|| {
            crate::Error::invalid(format!(
                "A game needs {} player states, but {} were provided.",
                PlayerId::COUNT,
                count
            ))
        })
    }

    fn assemble(
        tickets: Deck<Ticket>,
        card_state: CardState,
        player_states: [PlayerState; PlayerId::COUNT],
        current_player_id: PlayerId,
        last_player: Option<PlayerId>,
    ) -> Self {
        let public_player_states = [
            player_states[0].public().clone(),
            player_states[1].public().clone(),
        ];

        Self {
            public: PublicGameState::new(
                tickets.size(),
                card_state.public().clone(),
                current_player_id,
                public_player_states,
                last_player,
            ),
            tickets,
            card_state,
            player_states,
        }
    }

    /// Same game, with some parts replaced.
    fn with(
        &self,
        tickets: Option<Deck<Ticket>>,
        card_state: Option<CardState>,
        player_states: Option<[PlayerState; PlayerId::COUNT]>,
    ) -> Self {
        Self::assemble(
            tickets.unwrap_or_else(|| self.tickets.clone()),
            card_state.unwrap_or_else(|| self.card_state.clone()),
            player_states.unwrap_or_else(|| self.player_states.clone()),
            self.current_player_id(),
            self.last_player(),
        )
    }

    /// Same game, where `player_id`'s state is replaced.
    fn with_player_state(&self, player_id: PlayerId, player_state: PlayerState) -> Self {
        let mut player_states = self.player_states.clone();
        player_states[player_id.index()] = player_state;
        self.with(None, None, Some(player_states))
    }

    /// The part of this state both players can see.
    #[inline]
    pub fn public(&self) -> &PublicGameState {
        &self.public
    }

    #[inline]
    pub fn card_state(&self) -> &CardState {
        &self.card_state
    }

    #[inline]
    pub fn player_state(&self, player_id: PlayerId) -> &PlayerState {
        &self.player_states[player_id.index()]
    }

    #[inline]
    pub fn current_player_state(&self) -> &PlayerState {
        self.player_state(self.current_player_id())
    }

    /// The `count` tickets at the top of the ticket deck.
    pub fn top_tickets(&self, count: usize) -> Result<Bag<Ticket>> {
        self.tickets.top_cards(count)
    }

    pub fn without_top_tickets(&self, count: usize) -> Result<Self> {
        Ok(self.with(Some(self.tickets.without_top_cards(count)?), None, None))
    }

    /// The top card of the deck, which must not be empty.
    pub fn top_card(&self) -> Result<Card> {
        self.card_state.top_deck_card()
    }

    pub fn without_top_card(&self) -> Result<Self> {
        Ok(self.with(None, Some(self.card_state.without_top_deck_card()?), None))
    }

    pub fn with_more_discarded_cards(&self, cards: &Bag<Card>) -> Self {
        self.with(None, Some(self.card_state.with_more_discarded_cards(cards)), None)
    }

    /// Shuffles the discard pile into a new deck if the deck is empty.
    pub fn with_cards_deck_recreated_if_needed<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Self> {
        if !self.card_state.is_deck_empty() {
            return Ok(self.clone());
        }

        Ok(self.with(
            None,
            Some(self.card_state.with_deck_recreated_from_discards(rng)?),
            None,
        ))
    }

    /// Gives `chosen_tickets` to `player_id`, before the first turn.
    ///
    /// Returns an `Err` if that player already has tickets.
    pub fn with_initially_chosen_tickets(
        &self,
        player_id: PlayerId,
        chosen_tickets: &Bag<Ticket>,
    ) -> Result<Self> {
        let player_state = self.player_state(player_id);
        ensure!(
            player_state.ticket_count() == 0,
            "Cannot give initial tickets to {}, who already has {} tickets.",
            player_id,
            player_state.ticket_count()
        );

        Ok(self.with_player_state(player_id, player_state.with_added_tickets(chosen_tickets)))
    }

    /// Gives `chosen_tickets` to the current player, and removes all of `drawn_tickets`
    /// from the top of the ticket deck.
    ///
    /// Returns an `Err` if some chosen tickets were not drawn.
    pub fn with_chosen_additional_tickets(
        &self,
        drawn_tickets: &Bag<Ticket>,
        chosen_tickets: &Bag<Ticket>,
    ) -> Result<Self> {
        ensure!(
            drawn_tickets.contains(chosen_tickets),
            "Cannot keep tickets that were not drawn."
        );

        let player_id = self.current_player_id();
        let player_state = self.current_player_state().with_added_tickets(chosen_tickets);
        let mut player_states = self.player_states.clone();
        player_states[player_id.index()] = player_state;

        Ok(self.with(
            Some(self.tickets.without_top_cards(drawn_tickets.size())?),
            None,
            Some(player_states),
        ))
    }

    /// The current player takes the face-up card at `slot`, which is replaced by the top
    /// card of the deck.
    pub fn with_drawn_face_up_card(&self, slot: usize) -> Result<Self> {
        let card = self.card_state.face_up_card(slot)?;
        let card_state = self.card_state.with_drawn_face_up_card(slot)?;

        let player_id = self.current_player_id();
        let mut player_states = self.player_states.clone();
        player_states[player_id.index()] = self.current_player_state().with_added_card(card);

        Ok(self.with(None, Some(card_state), Some(player_states)))
    }

    /// The current player takes the top card of the deck.
    pub fn with_blindly_drawn_card(&self) -> Result<Self> {
        let card = self.card_state.top_deck_card()?;
        let card_state = self.card_state.without_top_deck_card()?;

        let player_id = self.current_player_id();
        let mut player_states = self.player_states.clone();
        player_states[player_id.index()] = self.current_player_state().with_added_card(card);

        Ok(self.with(None, Some(card_state), Some(player_states)))
    }

    /// The current player claims `route` with `cards`, which go to the discard pile.
    pub fn with_claimed_route(&self, route: Route, cards: &Bag<Card>) -> Result<Self> {
        let player_id = self.current_player_id();
        let mut player_states = self.player_states.clone();
        player_states[player_id.index()] =
            self.current_player_state().with_claimed_route(route, cards)?;

        Ok(self.with(
            None,
            Some(self.card_state.with_more_discarded_cards(cards)),
            Some(player_states),
        ))
    }

    /// Whether the current player's turn triggers the last round.
    pub fn last_turn_begins(&self) -> bool {
        self.last_player().is_none()
            && self.current_player_state().car_count() <= LAST_TURN_CAR_LIMIT
    }

    /// Hands the turn over to the other player. If the last round begins, the player who
    /// just played becomes the last one to play.
    pub fn for_next_turn(&self) -> Self {
        let last_player = if self.last_turn_begins() {
            Some(self.current_player_id())
        } else {
            self.last_player()
        };

        Self::assemble(
            self.tickets.clone(),
            self.card_state.clone(),
            self.player_states.clone(),
            self.current_player_id().next(),
            last_player,
        )
    }
}

impl Deref for GameState {
    type Target = PublicGameState;

    fn deref(&self) -> &Self::Target {
        &self.public
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TOTAL_CARDS_COUNT;
    use crate::map::{ROUTES, TICKETS};

    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(2021)
    }

    fn all_tickets() -> Bag<Ticket> {
        TICKETS.iter().cloned().collect()
    }

    fn initial() -> GameState {
        GameState::initial(&all_tickets(), &mut rng()).unwrap()
    }

    fn total_cards(game_state: &GameState) -> usize {
        game_state.card_state().total_size()
            + game_state.player_state(PlayerId::Player1).card_count()
            + game_state.player_state(PlayerId::Player2).card_count()
    }

    #[test]
    fn initial_state() {
        let game_state = initial();

        assert_eq!(game_state.ticket_count(), TICKETS.len());
        assert_eq!(game_state.card_state().deck_size(), TOTAL_CARDS_COUNT - 5 - 2 * 4);
        assert_eq!(game_state.card_state().discards_size(), 0);
        assert_eq!(total_cards(&game_state), TOTAL_CARDS_COUNT);
        assert!(game_state.can_draw_tickets());
        assert!(game_state.can_draw_cards());
        assert!(game_state.claimed_routes().is_empty());
        assert_eq!(game_state.last_player(), None);
        for player_id in [PlayerId::Player1, PlayerId::Player2] {
            assert_eq!(game_state.player_state(player_id).ticket_count(), 0);
            assert_eq!(game_state.player_state(player_id).card_count(), 4);
        }
    }

    #[test]
    fn same_seed_same_game() {
        assert_eq!(initial(), initial());
    }

    #[test]
    fn public_projection_matches() {
        let game_state = initial();
        let public = game_state.public();

        assert_eq!(public.card_state(), game_state.card_state().public());
        assert_eq!(
            public.player_state(PlayerId::Player2),
            game_state.player_state(PlayerId::Player2).public()
        );
        assert_eq!(public.current_player_id(), game_state.current_player_id());
    }

    #[test]
    fn initially_chosen_tickets_only_once() {
        let game_state = initial();
        let tickets = game_state.top_tickets(3).unwrap();

        let chosen = game_state
            .with_initially_chosen_tickets(PlayerId::Player2, &tickets)
            .unwrap();
        assert_eq!(chosen.player_state(PlayerId::Player2).tickets(), &tickets);
        assert_eq!(chosen.ticket_count(), game_state.ticket_count());

        assert!(chosen
            .with_initially_chosen_tickets(PlayerId::Player2, &tickets)
            .is_err());
    }

    #[test]
    fn chosen_additional_tickets_remove_all_drawn() {
        let game_state = initial();
        let drawn = game_state.top_tickets(3).unwrap();
        let chosen: Bag<Ticket> = drawn.iter().take(1).cloned().collect();

        let next = game_state
            .with_chosen_additional_tickets(&drawn, &chosen)
            .unwrap();
        assert_eq!(next.ticket_count(), game_state.ticket_count() - 3);
        assert_eq!(next.current_player_state().tickets(), &chosen);

        let not_drawn = game_state
            .without_top_tickets(3)
            .unwrap()
            .top_tickets(1)
            .unwrap();
        assert!(game_state
            .with_chosen_additional_tickets(&drawn, &not_drawn)
            .is_err());
        assert!(game_state
            .with_chosen_additional_tickets(&drawn, &drawn.union(&not_drawn))
            .is_err());
    }

    #[test]
    fn drawing_cards_keeps_conservation() {
        let game_state = initial();
        let face_up = game_state.card_state().face_up_card(0).unwrap();
        let top = game_state.top_card().unwrap();

        let next = game_state.with_drawn_face_up_card(0).unwrap();
        assert_eq!(next.card_state().face_up_card(0).unwrap(), top);
        assert_eq!(next.current_player_state().card_count(), 5);
        assert!(next.current_player_state().cards().contains_element(&face_up));
        assert_eq!(total_cards(&next), TOTAL_CARDS_COUNT);

        let next = next.with_blindly_drawn_card().unwrap();
        assert_eq!(next.current_player_state().card_count(), 6);
        assert_eq!(total_cards(&next), TOTAL_CARDS_COUNT);

        // The original state is untouched.
        assert_eq!(game_state.current_player_state().card_count(), 4);
    }

    #[test]
    fn claiming_route_discards_cards() {
        let route = ROUTES[13];
        assert_eq!(route.id(), "BER_FRI_1");
        let game_state = initial();
        let card = *game_state.current_player_state().cards().get(0).unwrap();

        let next = game_state.with_claimed_route(route, &Bag::of(1, card)).unwrap();
        assert_eq!(next.current_player_state().routes(), &[route]);
        assert_eq!(next.claimed_routes(), vec![route]);
        assert_eq!(next.card_state().discards_size(), 1);
        assert_eq!(total_cards(&next), TOTAL_CARDS_COUNT);
    }

    #[test]
    fn deck_recreated_only_when_empty() {
        let mut game_state = initial();
        let unchanged = game_state.with_cards_deck_recreated_if_needed(&mut rng()).unwrap();
        assert_eq!(unchanged, game_state);

        while !game_state.card_state().is_deck_empty() {
            let card = game_state.top_card().unwrap();
            game_state = game_state
                .without_top_card()
                .unwrap()
                .with_more_discarded_cards(&Bag::of(1, card));
        }
        let discards = game_state.card_state().discards_size();

        let recreated = game_state.with_cards_deck_recreated_if_needed(&mut rng()).unwrap();
        assert_eq!(recreated.card_state().deck_size(), discards);
        assert_eq!(recreated.card_state().discards_size(), 0);
        assert_eq!(total_cards(&recreated), TOTAL_CARDS_COUNT);
    }

    #[test]
    fn empty_ticket_deck_cannot_be_drawn() {
        let game_state = initial();
        let empty = game_state.without_top_tickets(TICKETS.len()).unwrap();

        assert!(!empty.can_draw_tickets());
        assert!(empty.top_tickets(1).is_err());
    }

    #[test]
    fn next_turn_without_last_round() {
        let game_state = initial();
        let next = game_state.for_next_turn();

        assert!(!game_state.last_turn_begins());
        assert_eq!(next.current_player_id(), game_state.current_player_id().next());
        assert_eq!(next.last_player(), None);
    }

    #[test]
    fn last_round_starts_with_two_cars_left() {
        let long_routes: Vec<Route> = ROUTES
            .iter()
            .filter(|route| route.length() == 6)
            .copied()
            .collect();
        assert!(!long_routes.is_empty());

        // 38 cars used: six routes of length six and one of length two.
        let mut routes = vec![long_routes[0]; 6];
        routes.push(
            *ROUTES
                .iter()
                .find(|route| route.length() == 2)
                .unwrap(),
        );
        let game_state = initial();
        let current = game_state.current_player_id();
        let mut player_states = game_state.player_states.clone();
        player_states[current.index()] = PlayerState::new(
            Bag::new(),
            game_state.current_player_state().cards().clone(),
            routes,
        );
        let game_state = game_state.with(None, None, Some(player_states));

        assert_eq!(game_state.current_player_state().car_count(), 2);
        assert!(game_state.last_turn_begins());

        let next = game_state.for_next_turn();
        assert_eq!(next.last_player(), Some(current));
        assert_eq!(next.current_player_id(), current.next());
        assert!(!next.last_turn_begins());

        // The last player is never overwritten.
        let after = next.for_next_turn();
        assert_eq!(after.last_player(), Some(current));
        assert!(!after.last_turn_begins());
    }
}
