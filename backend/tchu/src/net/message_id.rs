use strum_macros::{Display, EnumCount, EnumIter, EnumString};

/// The first word of every line the game sends to a remote player, naming the
/// [`crate::player::Player`] method to call.
#[derive(Clone, Copy, Debug, Display, EnumCount, EnumIter, EnumString, Eq, Hash, PartialEq)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageId {
    InitPlayers,
    ReceiveInfo,
    UpdateState,
    SetInitialTickets,
    ChooseInitialTickets,
    NextTurn,
    ChooseTickets,
    DrawSlot,
    Route,
    Cards,
    ChooseAdditionalCards,
}

impl MessageId {
    /// Whether the remote player answers this message with a line of its own.
    pub fn expects_answer(&self) -> bool {
        !matches!(
            self,
            MessageId::InitPlayers
                | MessageId::ReceiveInfo
                | MessageId::UpdateState
                | MessageId::SetInitialTickets
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::str::FromStr;
    use strum::{EnumCount, IntoEnumIterator};

    #[test]
    fn message_names() {
        assert_eq!(MessageId::COUNT, 11);
        assert_eq!(MessageId::InitPlayers.to_string(), "INIT_PLAYERS");
        assert_eq!(
            MessageId::ChooseAdditionalCards.to_string(),
            "CHOOSE_ADDITIONAL_CARDS"
        );
        assert_eq!(MessageId::from_str("DRAW_SLOT").unwrap(), MessageId::DrawSlot);
        assert_eq!(MessageId::from_str("ROUTE").unwrap(), MessageId::Route);
        assert!(MessageId::from_str("draw_slot").is_err());
    }

    #[test]
    fn names_round_trip() {
        for message_id in MessageId::iter() {
            assert_eq!(
                MessageId::from_str(&message_id.to_string()).unwrap(),
                message_id
            );
        }
    }

    #[test]
    fn only_queries_are_answered() {
        let answered: Vec<MessageId> = MessageId::iter()
            .filter(MessageId::expects_answer)
            .collect();

        assert_eq!(
            answered,
            vec![
                MessageId::ChooseInitialTickets,
                MessageId::NextTurn,
                MessageId::ChooseTickets,
                MessageId::DrawSlot,
                MessageId::Route,
                MessageId::Cards,
                MessageId::ChooseAdditionalCards,
            ]
        );
    }
}
