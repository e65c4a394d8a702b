use crate::bag::Bag;
use crate::card::Card;
use crate::constants::{ADDITIONAL_TUNNEL_CARDS, INITIAL_CARDS_COUNT, INITIAL_CAR_COUNT};
use crate::error::{ensure, Result};
use crate::route::Route;
use crate::station_partition::StationPartitionBuilder;
use crate::ticket::Ticket;

use std::ops::Deref;

/// Information about a player that is visible to both players.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicPlayerState {
    ticket_count: usize,
    card_count: usize,
    /// In claim order.
    routes: Vec<Route>,
}

impl PublicPlayerState {
    pub fn new(ticket_count: usize, card_count: usize, routes: Vec<Route>) -> Self {
        Self {
            ticket_count,
            card_count,
            routes,
        }
    }

    #[inline]
    pub fn ticket_count(&self) -> usize {
        self.ticket_count
    }

    #[inline]
    pub fn card_count(&self) -> usize {
        self.card_count
    }

    #[inline]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Cars left to claim routes with.
    pub fn car_count(&self) -> usize {
        let used: usize = self.routes.iter().map(Route::length).sum();
        INITIAL_CAR_COUNT.saturating_sub(used)
    }

    /// Points earned so far by claiming routes.
    pub fn claim_points(&self) -> u32 {
        self.routes.iter().map(Route::claim_points).sum()
    }
}

/// Full state of a player, only known to the engine and to that player.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlayerState {
    public: PublicPlayerState,
    tickets: Bag<Ticket>,
    cards: Bag<Card>,
}

impl PlayerState {
    pub fn new(tickets: Bag<Ticket>, cards: Bag<Card>, routes: Vec<Route>) -> Self {
        Self {
            public: PublicPlayerState::new(tickets.size(), cards.size(), routes),
            tickets,
            cards,
        }
    }

    /// State of a player before the first turn: four cards, no tickets, no routes.
    pub fn initial(cards: Bag<Card>) -> Result<Self> {
        ensure!(
            cards.size() == INITIAL_CARDS_COUNT,
            "A player starts with {} cards, but {} were provided.",
            INITIAL_CARDS_COUNT,
            cards.size()
        );

        Ok(Self::new(Bag::new(), cards, Vec::new()))
    }

    /// The part of this state both players can see.
    #[inline]
    pub fn public(&self) -> &PublicPlayerState {
        &self.public
    }

    #[inline]
    pub fn tickets(&self) -> &Bag<Ticket> {
        &self.tickets
    }

    #[inline]
    pub fn cards(&self) -> &Bag<Card> {
        &self.cards
    }

    pub fn with_added_tickets(&self, tickets: &Bag<Ticket>) -> Self {
        Self::new(
            self.tickets.union(tickets),
            self.cards.clone(),
            self.routes().to_vec(),
        )
    }

    pub fn with_added_card(&self, card: Card) -> Self {
        Self::new(
            self.tickets.clone(),
            self.cards.union(&Bag::of(1, card)),
            self.routes().to_vec(),
        )
    }

    /// Whether the player has enough cars and the right cards to claim `route`.
    pub fn can_claim_route(&self, route: &Route) -> bool {
        self.car_count() >= route.length()
            && route
                .possible_claim_cards()
                .iter()
                .any(|option| self.cards.contains(option))
    }

    /// The sets of cards in the player's hand that could claim `route`.
    ///
    /// Returns an `Err` if the player does not have enough cars left.
    pub fn possible_claim_cards(&self, route: &Route) -> Result<Vec<Bag<Card>>> {
        ensure!(
            self.car_count() >= route.length(),
            "Cannot claim route {} of length {} with {} cars left.",
            route.id(),
            route.length(),
            self.car_count()
        );

        Ok(route
            .possible_claim_cards()
            .into_iter()
            .filter(|option| self.cards.contains(option))
            .collect())
    }

    /// Every way the player can pay `additional_count` more cards to claim a tunnel, after
    /// having laid down `initial_cards`.
    ///
    /// Only locomotives and cards matching the initial cards may be used. Options using
    /// fewer locomotives come first. An empty list means the player cannot pay.
    ///
    /// # Example
    /// ```
    /// use tchu::bag::Bag;
    /// use tchu::card::Card;
    /// use tchu::player_state::PlayerState;
    ///
    /// let hand: Bag<Card> = vec![Card::Red, Card::Red, Card::Red, Card::Locomotive].into();
    /// let player = PlayerState::initial(hand)?;
    ///
    /// let options = player.possible_additional_cards(1, &Bag::of(2, Card::Red))?;
    /// assert_eq!(options, vec![Bag::of(1, Card::Red), Bag::of(1, Card::Locomotive)]);
    /// # Ok::<(), tchu::Error>(())
    /// ```
    pub fn possible_additional_cards(
        &self,
        additional_count: usize,
        initial_cards: &Bag<Card>,
    ) -> Result<Vec<Bag<Card>>> {
        ensure!(
            (1..=ADDITIONAL_TUNNEL_CARDS).contains(&additional_count),
            "Cannot require {} additional cards: it must be between 1 and {}.",
            additional_count,
            ADDITIONAL_TUNNEL_CARDS
        );
        ensure!(
            !initial_cards.is_empty(),
            "Cannot claim a tunnel without initial cards."
        );
        ensure!(
            initial_cards.distinct().count() <= 2,
            "Initial cards must hold at most two kinds of cards."
        );

        let usable: Bag<Card> = self
            .cards
            .difference(initial_cards)
            .iter()
            .filter(|card| card.is_locomotive() || initial_cards.contains_element(card))
            .copied()
            .collect();

        if usable.size() < additional_count {
            return Ok(Vec::new());
        }

        let mut options = usable.subsets_of_size(additional_count);
        options.sort_by_key(|option| option.count_of(&Card::Locomotive));
        Ok(options)
    }

    /// This state once `route` is claimed with `claim_cards`, which leave the player's hand.
    ///
    /// Returns an `Err` if the player does not hold `claim_cards`.
    pub fn with_claimed_route(&self, route: Route, claim_cards: &Bag<Card>) -> Result<Self> {
        ensure!(
            self.cards.contains(claim_cards),
            "Cannot claim route {} with cards the player does not hold.",
            route.id()
        );

        let mut routes = self.routes().to_vec();
        routes.push(route);
        Ok(Self::new(
            self.tickets.clone(),
            self.cards.difference(claim_cards),
            routes,
        ))
    }

    /// Points earned or lost through tickets, given the routes claimed so far.
    pub fn ticket_points(&self) -> Result<i32> {
        let station_count = self
            .routes()
            .iter()
            .flat_map(|route| route.stations())
            .map(|station| station.id() + 1)
            .max()
            .unwrap_or(0);

        let mut builder = StationPartitionBuilder::new(station_count);
        for route in self.routes() {
            builder.connect(route.station1(), route.station2())?;
        }
        let partition = builder.build();

        Ok(self
            .tickets
            .iter()
            .map(|ticket| ticket.points(&partition))
            .sum())
    }

    /// Claim points plus ticket points, without the longest trail bonus.
    pub fn final_points(&self) -> Result<i32> {
        Ok(self.claim_points() as i32 + self.ticket_points()?)
    }
}

impl Deref for PlayerState {
    type Target = PublicPlayerState;

    fn deref(&self) -> &Self::Target {
        &self.public
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Color;
    use crate::route::Level;
    use crate::station::Station;

    use pretty_assertions::assert_eq;

    const BER: Station = Station::new(3, "Berne");
    const FRI: Station = Station::new(9, "Fribourg");
    const LAU: Station = Station::new(13, "Lausanne");
    const LUG: Station = Station::new(17, "Lugano");

    fn bag(cards: &[Card]) -> Bag<Card> {
        cards.iter().copied().collect()
    }

    fn tunnel(color: Option<Color>, length: usize) -> Route {
        Route::new("BER_FRI_1", BER, FRI, length, Level::Underground, color).unwrap()
    }

    fn player(cards: &[Card]) -> PlayerState {
        PlayerState::new(Bag::new(), bag(cards), Vec::new())
    }

    #[test]
    fn initial_needs_four_cards() {
        assert!(PlayerState::initial(Bag::of(3, Card::Red)).is_err());

        let player = PlayerState::initial(Bag::of(4, Card::Red)).unwrap();
        assert_eq!(player.card_count(), 4);
        assert_eq!(player.ticket_count(), 0);
        assert_eq!(player.car_count(), 40);
        assert_eq!(player.claim_points(), 0);
    }

    #[test]
    fn public_counts_follow_private_state() {
        let ticket = Ticket::single(BER, LUG, 12).unwrap();
        let player = player(&[Card::Red])
            .with_added_card(Card::Blue)
            .with_added_tickets(&Bag::of(1, ticket));

        assert_eq!(player.card_count(), 2);
        assert_eq!(player.public().ticket_count(), 1);
        assert_eq!(player.cards(), &bag(&[Card::Red, Card::Blue]));
    }

    #[test]
    fn claiming_route_uses_cards_and_cars() {
        let route = Route::new(
            "FRI_LAU_1",
            FRI,
            LAU,
            3,
            Level::Overground,
            Some(Color::Red),
        )
        .unwrap();
        let player = player(&[Card::Red, Card::Red, Card::Red, Card::Blue]);

        assert!(player.can_claim_route(&route));
        let claimed = player.with_claimed_route(route, &Bag::of(3, Card::Red)).unwrap();

        assert_eq!(claimed.cards(), &Bag::of(1, Card::Blue));
        assert_eq!(claimed.routes(), &[route]);
        assert_eq!(claimed.car_count(), 37);
        assert_eq!(claimed.claim_points(), 4);
        assert!(!claimed.can_claim_route(&route));

        assert!(player
            .with_claimed_route(route, &Bag::of(3, Card::Green))
            .is_err());
    }

    #[test]
    fn possible_claim_cards_filters_hand() {
        let player = player(&[Card::Green, Card::Green, Card::Locomotive]);

        assert_eq!(
            player.possible_claim_cards(&tunnel(None, 2)).unwrap(),
            vec![
                Bag::of(2, Card::Green),
                bag(&[Card::Green, Card::Locomotive]),
            ]
        );
        assert!(player
            .possible_claim_cards(&tunnel(Some(Color::Red), 2))
            .unwrap()
            .iter()
            .all(|option| option.contains_element(&Card::Locomotive)));
    }

    #[test]
    fn cannot_claim_without_enough_cars() {
        let mut routes = Vec::new();
        for _ in 0..6 {
            routes.push(tunnel(None, 6));
        }
        routes.push(tunnel(None, 3));
        let player = PlayerState::new(Bag::new(), Bag::of(6, Card::Red), routes);

        assert_eq!(player.car_count(), 1);
        assert!(!player.can_claim_route(&tunnel(None, 2)));
        assert!(player.possible_claim_cards(&tunnel(None, 2)).is_err());
    }

    #[test]
    fn possible_additional_cards_sorted_by_locomotives() {
        let player = player(&[
            Card::Red,
            Card::Red,
            Card::Red,
            Card::Red,
            Card::Locomotive,
            Card::Locomotive,
            Card::Blue,
        ]);
        let initial = bag(&[Card::Red, Card::Locomotive]);

        assert_eq!(
            player.possible_additional_cards(2, &initial).unwrap(),
            vec![
                Bag::of(2, Card::Red),
                bag(&[Card::Red, Card::Locomotive]),
            ]
        );
    }

    #[test]
    fn possible_additional_cards_empty_when_short() {
        let player = player(&[Card::Red, Card::Red, Card::Blue, Card::Blue]);

        assert!(player
            .possible_additional_cards(1, &Bag::of(2, Card::Red))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn possible_additional_cards_preconditions() {
        let player = player(&[Card::Red, Card::Red, Card::Red]);

        assert!(player.possible_additional_cards(0, &Bag::of(1, Card::Red)).is_err());
        assert!(player.possible_additional_cards(4, &Bag::of(1, Card::Red)).is_err());
        assert!(player.possible_additional_cards(1, &Bag::new()).is_err());
        assert!(player
            .possible_additional_cards(1, &bag(&[Card::Red, Card::Blue, Card::Locomotive]))
            .is_err());
    }

    #[test]
    fn ticket_points_follow_connectivity() {
        let ticket = Ticket::single(BER, LAU, 5).unwrap();
        let first = Route::new("BER_FRI_1", BER, FRI, 1, Level::Overground, None).unwrap();
        let second = Route::new("FRI_LAU_1", FRI, LAU, 3, Level::Overground, None).unwrap();

        let player = PlayerState::new(Bag::of(1, ticket), Bag::new(), vec![first]);
        assert_eq!(player.ticket_points().unwrap(), -5);
        assert_eq!(player.final_points().unwrap(), 1 - 5);

        let player = player.with_claimed_route(second, &Bag::new()).unwrap();
        assert_eq!(player.ticket_points().unwrap(), 5);
        assert_eq!(player.final_points().unwrap(), 1 + 4 + 5);
    }

    #[test]
    fn ticket_points_without_routes() {
        let ticket = Ticket::single(BER, LUG, 12).unwrap();
        let player = PlayerState::new(Bag::of(1, ticket), Bag::new(), Vec::new());

        assert_eq!(player.ticket_points().unwrap(), -12);
    }
}
