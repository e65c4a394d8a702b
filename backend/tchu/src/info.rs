use crate::bag::Bag;
use crate::card::Card;
use crate::constants::LONGEST_TRAIL_BONUS_POINTS;
use crate::route::Route;
use crate::trail::Trail;

/// Builds the messages describing what a given player did, sent to both players through
/// [`crate::player::Player::receive_info`].
///
/// # Example
/// ```
/// use tchu::info::Info;
///
/// let info = Info::new("Ada");
/// assert_eq!(info.drew_tickets(3), "Ada drew 3 tickets...\n");
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Info {
    player_name: String,
}

fn plural(count: usize) -> &'static str {
    if count > 1 {
        "s"
    } else {
        ""
    }
}

fn card_name(card: Card, count: usize) -> String {
    match card.color() {
        Some(color) => format!("{} card{}", color, plural(count)),
        None => format!("locomotive{}", plural(count)),
    }
}

/// Describes a bag of cards, e.g. `2 red cards and 1 locomotive`.
pub fn describe_cards(cards: &Bag<Card>) -> String {
    let parts: Vec<String> = cards
        .distinct()
        .map(|card| {
            let count = cards.count_of(card);
            format!("{} {}", count, card_name(*card, count))
        })
        .collect();

    match parts.split_last() {
        None => String::from("no cards"),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
    }
}

impl Info {
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
        }
    }

    #[inline]
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Announces a draw between the given players.
    pub fn draw(player_names: &[String], points: i32) -> String {
        format!(
            "\n{} are tied with {} points each!\n",
            player_names.join(" and "),
            points
        )
    }

    pub fn will_play_first(&self) -> String {
        format!("{} will play first.\n\n", self.player_name)
    }

    pub fn kept_tickets(&self, count: usize) -> String {
        format!(
            "{} kept {} ticket{}.\n",
            self.player_name,
            count,
            plural(count)
        )
    }

    pub fn can_play(&self) -> String {
        format!("\nIt is {}'s turn to play.\n", self.player_name)
    }

    pub fn drew_tickets(&self, count: usize) -> String {
        format!(
            "{} drew {} ticket{}...\n",
            self.player_name,
            count,
            plural(count)
        )
    }

    pub fn drew_blind_card(&self) -> String {
        format!("{} drew a card from the deck.\n", self.player_name)
    }

    pub fn drew_visible_card(&self, card: Card) -> String {
        format!(
            "{} drew a face-up {}.\n",
            self.player_name,
            card_name(card, 1)
        )
    }

    pub fn claimed_route(&self, route: &Route, cards: &Bag<Card>) -> String {
        format!(
            "{} claimed the route {} with {}.\n",
            self.player_name,
            route,
            describe_cards(cards)
        )
    }

    pub fn attempts_tunnel_claim(&self, route: &Route, initial_cards: &Bag<Card>) -> String {
        format!(
            "{} attempts to claim the tunnel {} with {}!\n",
            self.player_name,
            route,
            describe_cards(initial_cards)
        )
    }

    /// Lists the three cards drawn for a tunnel, and how many more cards the claim costs.
    pub fn drew_additional_cards(&self, drawn_cards: &Bag<Card>, additional_cost: usize) -> String {
        let cost = if additional_cost == 0 {
            String::from("They do not imply any additional cost.\n")
        } else {
            format!(
                "They imply an additional cost of {} card{}.\n",
                additional_cost,
                plural(additional_cost)
            )
        };

        format!(
            "The additional cards are {}. {}",
            describe_cards(drawn_cards),
            cost
        )
    }

    pub fn did_not_claim_route(&self, route: &Route) -> String {
        format!(
            "{} did not (or could not) claim the tunnel {}.\n",
            self.player_name, route
        )
    }

    pub fn last_turn_begins(&self, car_count: usize) -> String {
        format!(
            "\n{} has only {} car{} left, the last round begins!\n\n",
            self.player_name,
            car_count,
            plural(car_count)
        )
    }

    pub fn gets_longest_trail_bonus(&self, trail: &Trail) -> String {
        format!(
            "\n{} gets a bonus of {} points for the longest trail {}.\n",
            self.player_name, LONGEST_TRAIL_BONUS_POINTS, trail
        )
    }

    pub fn won(&self, points: i32, loser_points: i32) -> String {
        format!(
            "\n{} wins with {} points, against {} points!\n",
            self.player_name, points, loser_points
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::ROUTES;

    use pretty_assertions::assert_eq;

    #[test]
    fn describes_cards() {
        assert_eq!(describe_cards(&Bag::new()), "no cards");
        assert_eq!(describe_cards(&Bag::of(1, Card::Red)), "1 red card");
        assert_eq!(
            describe_cards(&Bag::from(vec![Card::Locomotive, Card::Red, Card::Red])),
            "2 red cards and 1 locomotive"
        );
        assert_eq!(
            describe_cards(&Bag::from(vec![
                Card::Locomotive,
                Card::Locomotive,
                Card::Blue,
                Card::Black
            ])),
            "1 black card, 1 blue card and 2 locomotives"
        );
    }

    #[test]
    fn turn_messages() {
        let info = Info::new("Ada");

        assert_eq!(info.player_name(), "Ada");
        assert_eq!(info.will_play_first(), "Ada will play first.\n\n");
        assert_eq!(info.kept_tickets(1), "Ada kept 1 ticket.\n");
        assert_eq!(info.kept_tickets(4), "Ada kept 4 tickets.\n");
        assert_eq!(info.can_play(), "\nIt is Ada's turn to play.\n");
        assert_eq!(info.drew_blind_card(), "Ada drew a card from the deck.\n");
        assert_eq!(
            info.drew_visible_card(Card::Locomotive),
            "Ada drew a face-up locomotive.\n"
        );
        assert_eq!(
            info.drew_visible_card(Card::Green),
            "Ada drew a face-up green card.\n"
        );
    }

    #[test]
    fn route_messages() {
        let info = Info::new("Ada");
        let route = &ROUTES[13];

        assert_eq!(
            info.claimed_route(route, &Bag::of(1, Card::Orange)),
            format!("Ada claimed the route {} with 1 orange card.\n", route)
        );
        assert_eq!(
            info.drew_additional_cards(&Bag::of(3, Card::White), 0),
            "The additional cards are 3 white cards. They do not imply any additional cost.\n"
        );
        assert_eq!(
            info.drew_additional_cards(&Bag::of(3, Card::Locomotive), 3),
            "The additional cards are 3 locomotives. They imply an additional cost of 3 cards.\n"
        );
    }

    #[test]
    fn end_of_game_messages() {
        let info = Info::new("Ada");

        assert_eq!(
            info.last_turn_begins(1),
            "\nAda has only 1 car left, the last round begins!\n\n"
        );
        assert_eq!(
            info.gets_longest_trail_bonus(&Trail::default()),
            "\nAda gets a bonus of 10 points for the longest trail (empty trail).\n"
        );
        assert_eq!(
            info.won(52, 41),
            "\nAda wins with 52 points, against 41 points!\n"
        );
        assert_eq!(
            Info::draw(&[String::from("Ada"), String::from("Grace")], 30),
            "\nAda and Grace are tied with 30 points each!\n"
        );
    }
}
