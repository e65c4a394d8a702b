use crate::bag::Bag;
use crate::card::Card;
use crate::config::GameConfig;
use crate::constants::{
    ADDITIONAL_TUNNEL_CARDS, DISCARDABLE_TICKETS_COUNT, DRAWN_CARDS_PER_TURN,
    INITIAL_TICKETS_COUNT, IN_GAME_TICKETS_COUNT, LONGEST_TRAIL_BONUS_POINTS,
};
use crate::error::{ensure, Result};
use crate::game_phase::GamePhase;
use crate::game_state::GameState;
use crate::info::Info;
use crate::map::TICKETS;
use crate::player::{DrawSlot, Player, PlayerId, PlayerNames, TurnKind};
use crate::ticket::Ticket;
use crate::trail::Trail;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::BTreeMap;
use strum::{EnumCount, IntoEnumIterator};

/// What is left once a game is over.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameOutcome {
    /// Final points of each player, including the longest trail bonus.
    pub points: BTreeMap<PlayerId, i32>,
    /// The longest trail of each player.
    pub longest_trails: BTreeMap<PlayerId, Trail>,
    /// `None` in case of a draw.
    pub winner: Option<PlayerId>,
}

/// Runs a whole game between two players, from dealing the cards to announcing the winner.
///
/// This acts as a finite-state machine whose states are the [`GamePhase`]s. The manager
/// owns the only live [`GameState`], asks the players for their decisions, and checks every
/// decision against the rules before applying it. An illegal decision ends the game with an
/// [`crate::Error::InvalidArgument`].
pub struct Manager<'a, R: Rng> {
    players: [&'a mut dyn Player; PlayerId::COUNT],
    names: PlayerNames,
    infos: [Info; PlayerId::COUNT],
    tickets: Bag<Ticket>,
    rng: R,
    phase: GamePhase,
}

impl<'a, R: Rng> Manager<'a, R> {
    /// Creates a [`Manager`] in the [`GamePhase::Init`].
    ///
    /// Returns an `Err` if a player has no name.
    pub fn new(
        players: [&'a mut dyn Player; PlayerId::COUNT],
        names: PlayerNames,
        tickets: Bag<Ticket>,
        rng: R,
    ) -> Result<Self> {
        let mut infos = Vec::with_capacity(PlayerId::COUNT);
        for player_id in PlayerId::iter() {
            match names.get(&player_id) {
                Some(name) => infos.push(Info::new(name.clone())),
                None => {
                    return Err(crate::Error::invalid(format!(
                        "Cannot start a game without a name for {}.",
                        player_id
                    )))
                }
            }
        }
        let infos = array_init::from_iter(infos)
            .ok_or_else(|| crate::Error::invalid("Cannot name both players."))?;

        Ok(Self {
            players,
            names,
            infos,
            tickets,
            rng,
            phase: GamePhase::Init,
        })
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[inline]
    pub fn names(&self) -> &PlayerNames {
        &self.names
    }

    fn transition(&mut self, phase: GamePhase) {
        if self.phase != phase {
            info!("Game phase: {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    #[inline]
    fn player(&mut self, player_id: PlayerId) -> &mut (dyn Player + 'a) {
        &mut *self.players[player_id.index()]
    }

    #[inline]
    fn info(&self, player_id: PlayerId) -> &Info {
        &self.infos[player_id.index()]
    }

    /// Sends the same message to both players.
    fn broadcast(&mut self, message: &str) -> Result<()> {
        for player in self.players.iter_mut() {
            player.receive_info(message)?;
        }
        Ok(())
    }

    /// Sends each player the public state, along with their own full state.
    fn update_states(&mut self, game_state: &GameState) -> Result<()> {
        for player_id in PlayerId::iter() {
            self.players[player_id.index()]
                .update_state(game_state.public(), game_state.player_state(player_id))?;
        }
        Ok(())
    }

    /// Plays the whole game, and returns its outcome.
    ///
    /// Returns an `Err` as soon as a player makes an illegal decision, or cannot be reached.
    pub fn play(mut self) -> Result<GameOutcome> {
        info!(
            "Starting a game between {} and {}",
            self.info(PlayerId::Player1).player_name(),
            self.info(PlayerId::Player2).player_name()
        );

        let mut game_state = self.deal()?;

        self.transition(GamePhase::Playing);
        loop {
            game_state = self.play_turn(game_state)?;

            let player_id = game_state.current_player_id();
            if game_state.last_turn_begins() {
                let message = self
                    .info(player_id)
                    .last_turn_begins(game_state.current_player_state().car_count());
                self.broadcast(&message)?;
                self.transition(GamePhase::LastRound);
            }

            if game_state.last_player() == Some(player_id) {
                break;
            }
            game_state = game_state.for_next_turn();
        }

        self.transition(GamePhase::Ended);
        self.tally(&game_state)
    }

    /// Initial phase: names the players, deals the cards, and lets each player pick their
    /// initial tickets.
    fn deal(&mut self) -> Result<GameState> {
        for player_id in PlayerId::iter() {
            let names = self.names.clone();
            self.player(player_id).init_players(player_id, &names)?;
        }

        let mut game_state = GameState::initial(&self.tickets, &mut self.rng)?;
        let message = self.info(game_state.current_player_id()).will_play_first();
        self.broadcast(&message)?;

        let mut offered_tickets = Vec::with_capacity(PlayerId::COUNT);
        for player_id in PlayerId::iter() {
            let offered = game_state.top_tickets(INITIAL_TICKETS_COUNT)?;
            game_state = game_state.without_top_tickets(INITIAL_TICKETS_COUNT)?;
            self.player(player_id).set_initial_ticket_choice(&offered)?;
            offered_tickets.push(offered);
        }
        self.update_states(&game_state)?;

        let mut kept_counts = Vec::with_capacity(PlayerId::COUNT);
        for (player_id, offered) in PlayerId::iter().zip(offered_tickets.iter()) {
            let chosen = self.player(player_id).choose_initial_tickets()?;
            ensure!(
                offered.contains(&chosen),
                "{} cannot keep initial tickets that were not offered to them.",
                player_id
            );
            ensure!(
                chosen.size() >= INITIAL_TICKETS_COUNT - DISCARDABLE_TICKETS_COUNT,
                "{} must keep at least {} initial tickets, but kept {}.",
                player_id,
                INITIAL_TICKETS_COUNT - DISCARDABLE_TICKETS_COUNT,
                chosen.size()
            );

            debug!("{} keeps {} initial tickets", player_id, chosen.size());
            game_state = game_state.with_initially_chosen_tickets(player_id, &chosen)?;
            kept_counts.push(chosen.size());
        }

        for (player_id, count) in PlayerId::iter().zip(kept_counts) {
            let message = self.info(player_id).kept_tickets(count);
            self.broadcast(&message)?;
        }

        Ok(game_state)
    }

    /// Asks the current player what they do this turn, and applies it.
    fn play_turn(&mut self, game_state: GameState) -> Result<GameState> {
        ensure!(
            self.phase.is_turn_based(),
            "Cannot play a turn in the {:?} phase.",
            self.phase
        );
        let player_id = game_state.current_player_id();

        let message = self.info(player_id).can_play();
        self.broadcast(&message)?;
        self.update_states(&game_state)?;

        let turn_kind = self.player(player_id).next_turn()?;
        info!("{} plays {}", player_id, turn_kind);

        match turn_kind {
            TurnKind::DrawTickets => self.draw_tickets(game_state),
            TurnKind::DrawCards => self.draw_cards(game_state),
            TurnKind::ClaimRoute => self.claim_route(game_state),
        }
    }

    fn draw_tickets(&mut self, game_state: GameState) -> Result<GameState> {
        let player_id = game_state.current_player_id();
        ensure!(
            game_state.can_draw_tickets(),
            "{} cannot draw tickets: there are none left.",
            player_id
        );

        let count = IN_GAME_TICKETS_COUNT.min(game_state.ticket_count());
        let drawn = game_state.top_tickets(count)?;
        let message = self.info(player_id).drew_tickets(count);
        self.broadcast(&message)?;

        let chosen = self.player(player_id).choose_tickets(&drawn)?;
        ensure!(
            !chosen.is_empty(),
            "{} must keep at least one of the drawn tickets.",
            player_id
        );
        ensure!(
            drawn.contains(&chosen),
            "{} cannot keep tickets that were not drawn.",
            player_id
        );

        debug!("{} keeps {} of {} tickets", player_id, chosen.size(), count);
        let message = self.info(player_id).kept_tickets(chosen.size());
        self.broadcast(&message)?;

        game_state.with_chosen_additional_tickets(&drawn, &chosen)
    }

    fn draw_cards(&mut self, mut game_state: GameState) -> Result<GameState> {
        let player_id = game_state.current_player_id();
        ensure!(
            game_state.can_draw_cards(),
            "{} cannot draw cards: fewer than 5 cards are left in the deck and discard pile.",
            player_id
        );

        for draw in 0..DRAWN_CARDS_PER_TURN {
            game_state = game_state.with_cards_deck_recreated_if_needed(&mut self.rng)?;
            if draw > 0 {
                self.update_states(&game_state)?;
            }

            let slot = self.player(player_id).draw_slot()?;
            debug!("{} draws from {:?}", player_id, slot);

            let message = match slot {
                DrawSlot::Deck => {
                    game_state = game_state.with_blindly_drawn_card()?;
                    self.info(player_id).drew_blind_card()
                }
                DrawSlot::FaceUp(slot) => {
                    let card = game_state.card_state().face_up_card(slot)?;
                    game_state = game_state.with_drawn_face_up_card(slot)?;
                    self.info(player_id).drew_visible_card(card)
                }
            };
            self.broadcast(&message)?;
        }

        Ok(game_state)
    }

    fn claim_route(&mut self, mut game_state: GameState) -> Result<GameState> {
        let player_id = game_state.current_player_id();
        let route = self.player(player_id).claimed_route()?;
        let initial_cards = self.player(player_id).initial_claim_cards()?;

        ensure!(
            !game_state.claimed_routes().contains(&route),
            "{} cannot claim route {}: it is already claimed.",
            player_id,
            route.id()
        );
        ensure!(
            game_state.current_player_state().can_claim_route(&route),
            "{} cannot claim route {}.",
            player_id,
            route.id()
        );
        ensure!(
            game_state
                .current_player_state()
                .possible_claim_cards(&route)?
                .contains(&initial_cards),
            "{} cannot claim route {} with these cards.",
            player_id,
            route.id()
        );

        if !route.is_tunnel() {
            debug!("{} claims route {}", player_id, route.id());
            let message = self.info(player_id).claimed_route(&route, &initial_cards);
            self.broadcast(&message)?;
            return game_state.with_claimed_route(route, &initial_cards);
        }

        let message = self
            .info(player_id)
            .attempts_tunnel_claim(&route, &initial_cards);
        self.broadcast(&message)?;

        let mut drawn_builder = Bag::builder();
        for _ in 0..ADDITIONAL_TUNNEL_CARDS {
            game_state = game_state.with_cards_deck_recreated_if_needed(&mut self.rng)?;
            drawn_builder.add(game_state.top_card()?);
            game_state = game_state.without_top_card()?;
        }
        let drawn_cards = drawn_builder.build();

        let additional_count = route.additional_claim_cards_count(&initial_cards, &drawn_cards)?;
        debug!(
            "{} must pay {} additional cards for tunnel {}",
            player_id,
            additional_count,
            route.id()
        );
        let message = self
            .info(player_id)
            .drew_additional_cards(&drawn_cards, additional_count);
        self.broadcast(&message)?;

        let claim_cards = self.tunnel_claim_cards(&game_state, &initial_cards, additional_count)?;
        game_state = game_state.with_more_discarded_cards(&drawn_cards);

        match claim_cards {
            Some(claim_cards) => {
                let message = self.info(player_id).claimed_route(&route, &claim_cards);
                self.broadcast(&message)?;
                game_state.with_claimed_route(route, &claim_cards)
            }
            None => {
                let message = self.info(player_id).did_not_claim_route(&route);
                self.broadcast(&message)?;
                Ok(game_state)
            }
        }
    }

    /// All the cards the current player pays for a tunnel, or `None` if they cannot or do
    /// not want to pay the additional cards.
    fn tunnel_claim_cards(
        &mut self,
        game_state: &GameState,
        initial_cards: &Bag<Card>,
        additional_count: usize,
    ) -> Result<Option<Bag<Card>>> {
        if additional_count == 0 {
            return Ok(Some(initial_cards.clone()));
        }

        let options = game_state
            .current_player_state()
            .possible_additional_cards(additional_count, initial_cards)?;
        if options.is_empty() {
            return Ok(None);
        }

        let player_id = game_state.current_player_id();
        let chosen = self.player(player_id).choose_additional_cards(&options)?;
        if chosen.is_empty() {
            return Ok(None);
        }
        ensure!(
            options.contains(&chosen),
            "{} cannot pay for the tunnel with these additional cards.",
            player_id
        );

        Ok(Some(initial_cards.union(&chosen)))
    }

    /// Computes the longest trails and the final points, and announces the winner.
    fn tally(&mut self, game_state: &GameState) -> Result<GameOutcome> {
        let longest_trails: BTreeMap<PlayerId, Trail> = PlayerId::iter()
            .map(|player_id| {
                (
                    player_id,
                    Trail::longest(game_state.player_state(player_id).routes()),
                )
            })
            .collect();
        let max_length = longest_trails
            .values()
            .map(Trail::length)
            .max()
            .unwrap_or(0);

        let mut points = BTreeMap::new();
        for player_id in PlayerId::iter() {
            let mut player_points = game_state.player_state(player_id).final_points()?;

            if let Some(trail) = longest_trails.get(&player_id) {
                if trail.length() == max_length {
                    player_points += LONGEST_TRAIL_BONUS_POINTS as i32;
                    let message = self.info(player_id).gets_longest_trail_bonus(trail);
                    self.broadcast(&message)?;
                }
            }
            points.insert(player_id, player_points);
        }

        self.update_states(game_state)?;

        let points1 = points.get(&PlayerId::Player1).copied().unwrap_or(0);
        let points2 = points.get(&PlayerId::Player2).copied().unwrap_or(0);
        let winner = if points1 > points2 {
            Some(PlayerId::Player1)
        } else if points2 > points1 {
            Some(PlayerId::Player2)
        } else {
            None
        };

        let message = match winner {
            Some(winner) => {
                let loser_points = if winner == PlayerId::Player1 {
                    points2
                } else {
                    points1
                };
                self.info(winner).won(points1.max(points2), loser_points)
            }
            None => {
                let names: Vec<String> = self.names.values().cloned().collect();
                Info::draw(&names, points1)
            }
        };
        self.broadcast(&message)?;

        info!("Game over: {:?} with points {:?}", winner, points);
        Ok(GameOutcome {
            points,
            longest_trails,
            winner,
        })
    }
}

impl<'a> Manager<'a, StdRng> {
    /// A game on the Swiss board, with every ticket of the board, configured by `config`.
    pub fn from_config(
        players: [&'a mut dyn Player; PlayerId::COUNT],
        config: &GameConfig,
    ) -> Result<Self> {
        let tickets: Bag<Ticket> = TICKETS.iter().cloned().collect();
        Self::new(players, config.player_names(), tickets, config.rng())
    }
}
