use crate::bag::Bag;
use crate::card::Card;
use crate::constants::{DISCARDABLE_TICKETS_COUNT, INITIAL_TICKETS_COUNT};
use crate::error::Result;
use crate::game_state::PublicGameState;
use crate::map::ROUTES;
use crate::player::{DrawSlot, Player, PlayerId, PlayerNames, TurnKind};
use crate::player_state::PlayerState;
use crate::route::Route;
use crate::ticket::Ticket;

/// A simple participant that runs inside the engine.
///
/// It keeps the fewest tickets it can, claims the longest route it can pay for, and
/// otherwise draws cards, preferring face-up locomotives. Its decisions only depend on
/// what it was told, so two games with the same seed play out the same.
#[derive(Clone, Debug, Default)]
pub struct BotPlayer {
    own_id: Option<PlayerId>,
    public_state: Option<PublicGameState>,
    own_state: Option<PlayerState>,
    initial_tickets: Bag<Ticket>,
    claim: Option<(Route, Bag<Card>)>,
}

impl BotPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn own_id(&self) -> Option<PlayerId> {
        self.own_id
    }

    /// The longest unclaimed route this bot can pay for, with the cards it would use.
    fn best_claim(&self) -> Option<(Route, Bag<Card>)> {
        let public_state = self.public_state.as_ref()?;
        let own_state = self.own_state.as_ref()?;
        let claimed_routes = public_state.claimed_routes();

        let mut best: Option<(Route, Bag<Card>)> = None;
        for route in ROUTES.iter() {
            if claimed_routes.contains(route) || !own_state.can_claim_route(route) {
                continue;
            }
            if matches!(&best, Some((best_route, _)) if best_route.length() >= route.length()) {
                continue;
            }

            let cards = own_state
                .possible_claim_cards(route)
                .ok()
                .and_then(|options| options.into_iter().next());
            if let Some(cards) = cards {
                best = Some((*route, cards));
            }
        }

        best
    }
}

impl Player for BotPlayer {
    fn init_players(&mut self, own_id: PlayerId, _names: &PlayerNames) -> Result<()> {
        self.own_id = Some(own_id);
        Ok(())
    }

    fn receive_info(&mut self, _info: &str) -> Result<()> {
        Ok(())
    }

    fn update_state(
        &mut self,
        public_state: &PublicGameState,
        own_state: &PlayerState,
    ) -> Result<()> {
        self.public_state = Some(public_state.clone());
        self.own_state = Some(own_state.clone());
        Ok(())
    }

    fn set_initial_ticket_choice(&mut self, tickets: &Bag<Ticket>) -> Result<()> {
        self.initial_tickets = tickets.clone();
        Ok(())
    }

    fn choose_initial_tickets(&mut self) -> Result<Bag<Ticket>> {
        Ok(self
            .initial_tickets
            .to_list()
            .into_iter()
            .take(INITIAL_TICKETS_COUNT - DISCARDABLE_TICKETS_COUNT)
            .collect())
    }

    fn next_turn(&mut self) -> Result<TurnKind> {
        self.claim = self.best_claim();
        if self.claim.is_some() {
            return Ok(TurnKind::ClaimRoute);
        }

        let can_draw_tickets = self
            .public_state
            .as_ref()
            .map_or(false, |public_state| public_state.can_draw_tickets());
        let can_draw_cards = self
            .public_state
            .as_ref()
            .map_or(true, |public_state| public_state.can_draw_cards());

        if !can_draw_cards && can_draw_tickets {
            Ok(TurnKind::DrawTickets)
        } else {
            Ok(TurnKind::DrawCards)
        }
    }

    fn choose_tickets(&mut self, options: &Bag<Ticket>) -> Result<Bag<Ticket>> {
        Ok(options.to_list().into_iter().take(1).collect())
    }

    fn draw_slot(&mut self) -> Result<DrawSlot> {
        let locomotive_slot = self.public_state.as_ref().and_then(|public_state| {
            public_state
                .card_state()
                .face_up_cards()
                .iter()
                .position(Card::is_locomotive)
        });

        Ok(match locomotive_slot {
            Some(slot) => DrawSlot::FaceUp(slot),
            None => DrawSlot::Deck,
        })
    }

    fn claimed_route(&mut self) -> Result<Route> {
        match &self.claim {
            Some((route, _)) => Ok(*route),
            None => Err(crate::Error::invalid(
                "Cannot name a route to claim: no claim was planned this turn.",
            )),
        }
    }

    fn initial_claim_cards(&mut self) -> Result<Bag<Card>> {
        match &self.claim {
            Some((_, cards)) => Ok(cards.clone()),
            None => Err(crate::Error::invalid(
                "Cannot lay down claim cards: no claim was planned this turn.",
            )),
        }
    }

    fn choose_additional_cards(&mut self, options: &[Bag<Card>]) -> Result<Bag<Card>> {
        Ok(options.first().cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card_state::PublicCardState;
    use crate::player_state::PublicPlayerState;

    use pretty_assertions::assert_eq;

    fn public_state(face_up_cards: Vec<Card>, own: &PlayerState) -> PublicGameState {
        PublicGameState::new(
            10,
            PublicCardState::new(face_up_cards, 30, 0).unwrap(),
            PlayerId::Player1,
            [
                own.public().clone(),
                PublicPlayerState::new(3, 4, Vec::new()),
            ],
            None,
        )
    }

    #[test]
    fn keeps_fewest_tickets() {
        let mut bot = BotPlayer::new();
        let tickets: Bag<Ticket> = crate::map::TICKETS.iter().take(5).cloned().collect();

        bot.set_initial_ticket_choice(&tickets).unwrap();
        let kept = bot.choose_initial_tickets().unwrap();
        assert_eq!(kept.size(), 3);
        assert!(tickets.contains(&kept));

        assert_eq!(bot.choose_tickets(&tickets).unwrap().size(), 1);
    }

    #[test]
    fn draws_cards_without_a_claimable_route() {
        let mut bot = BotPlayer::new();
        bot.init_players(PlayerId::Player1, &PlayerNames::new()).unwrap();
        assert_eq!(bot.own_id(), Some(PlayerId::Player1));

        let own = PlayerState::new(Bag::new(), Bag::new(), Vec::new());
        bot.update_state(&public_state(vec![Card::Red; 5], &own), &own)
            .unwrap();

        assert_eq!(bot.next_turn().unwrap(), TurnKind::DrawCards);
        assert_eq!(bot.draw_slot().unwrap(), DrawSlot::Deck);
        assert!(bot.claimed_route().is_err());
        assert!(bot.initial_claim_cards().is_err());
    }

    #[test]
    fn claims_the_longest_route() {
        let mut bot = BotPlayer::new();
        let own = PlayerState::initial(Bag::of(4, Card::Locomotive)).unwrap();
        bot.update_state(&public_state(vec![Card::Red; 5], &own), &own)
            .unwrap();

        assert_eq!(bot.next_turn().unwrap(), TurnKind::ClaimRoute);
        let route = bot.claimed_route().unwrap();
        assert_eq!(route.length(), 4);
        assert!(route.is_tunnel());
        assert_eq!(
            bot.initial_claim_cards().unwrap(),
            Bag::of(4, Card::Locomotive)
        );
    }

    #[test]
    fn prefers_face_up_locomotives() {
        let mut bot = BotPlayer::new();
        let own = PlayerState::initial(Bag::of(4, Card::Blue)).unwrap();
        let face_up_cards = vec![
            Card::Red,
            Card::Red,
            Card::Locomotive,
            Card::White,
            Card::White,
        ];
        bot.update_state(&public_state(face_up_cards, &own), &own)
            .unwrap();

        assert_eq!(bot.draw_slot().unwrap(), DrawSlot::FaceUp(2));
    }

    #[test]
    fn pays_with_fewest_locomotives() {
        let mut bot = BotPlayer::new();
        let options = vec![Bag::of(1, Card::Red), Bag::of(1, Card::Locomotive)];

        assert_eq!(
            bot.choose_additional_cards(&options).unwrap(),
            Bag::of(1, Card::Red)
        );
        assert!(bot.choose_additional_cards(&[]).unwrap().is_empty());
    }
}
