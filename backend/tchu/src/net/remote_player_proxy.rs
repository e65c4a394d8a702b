use crate::bag::Bag;
use crate::card::Card;
use crate::error::Result;
use crate::game_state::PublicGameState;
use crate::net::message_id::MessageId;
use crate::net::serdes::{
    CARD_BAG, CARD_BAG_LIST, DRAW_SLOT, PLAYER_ID, PLAYER_STATE, PUBLIC_GAME_STATE, ROUTE,
    STRING, STRING_LIST, TICKET_BAG, TURN_KIND,
};
use crate::player::{DrawSlot, Player, PlayerId, PlayerNames, TurnKind};
use crate::player_state::PlayerState;
use crate::route::Route;
use crate::ticket::Ticket;

use log::{error, trace};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::net::TcpStream;

/// Stands in for a player on the other end of a connection.
///
/// Each call is sent as one line, and calls that expect an answer block until the remote
/// [`crate::net::remote_player_client::RemotePlayerClient`] replies with one line.
pub struct RemotePlayerProxy<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl RemotePlayerProxy<BufReader<TcpStream>, BufWriter<TcpStream>> {
    /// A proxy talking through an accepted connection.
    pub fn connect(stream: TcpStream) -> Result<Self> {
        let reader = BufReader::new(stream.try_clone()?);
        Ok(Self::new(reader, BufWriter::new(stream)))
    }
}

impl<R: BufRead, W: Write> RemotePlayerProxy<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    fn send(&mut self, message_id: MessageId, arguments: &[String]) -> Result<()> {
        let mut line = message_id.to_string();
        for argument in arguments {
            line.push(' ');
            line.push_str(argument);
        }
        trace!("-> {}", line);

        let sent = writeln!(self.writer, "{}", line).and_then(|_| self.writer.flush());
        if let Err(io_error) = &sent {
            error!("Cannot send {} to the remote player: {}", message_id, io_error);
        }
        Ok(sent?)
    }

    fn receive(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            error!("The remote player closed the connection");
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "the remote player closed the connection",
            )
            .into());
        }

        let line = line.trim_end_matches(&['\r', '\n'][..]).to_string();
        trace!("<- {}", line);
        Ok(line)
    }

    /// Sends a query, and returns the answer.
    fn ask(&mut self, message_id: MessageId, arguments: &[String]) -> Result<String> {
        self.send(message_id, arguments)?;
        self.receive()
    }
}

impl<R: BufRead, W: Write> Player for RemotePlayerProxy<R, W> {
    fn init_players(&mut self, own_id: PlayerId, names: &PlayerNames) -> Result<()> {
        let names: Vec<String> = names.values().cloned().collect();
        self.send(
            MessageId::InitPlayers,
            &[PLAYER_ID.serialize(&own_id), STRING_LIST.serialize(&names)],
        )
    }

    fn receive_info(&mut self, info: &str) -> Result<()> {
        self.send(MessageId::ReceiveInfo, &[STRING.serialize(&info.to_string())])
    }

    fn update_state(
        &mut self,
        public_state: &PublicGameState,
        own_state: &PlayerState,
    ) -> Result<()> {
        self.send(
            MessageId::UpdateState,
            &[
                PUBLIC_GAME_STATE.serialize(public_state),
                PLAYER_STATE.serialize(own_state),
            ],
        )
    }

    fn set_initial_ticket_choice(&mut self, tickets: &Bag<Ticket>) -> Result<()> {
        self.send(MessageId::SetInitialTickets, &[TICKET_BAG.serialize(tickets)])
    }

    fn choose_initial_tickets(&mut self) -> Result<Bag<Ticket>> {
        let answer = self.ask(MessageId::ChooseInitialTickets, &[])?;
        TICKET_BAG.deserialize(&answer)
    }

    fn next_turn(&mut self) -> Result<TurnKind> {
        let answer = self.ask(MessageId::NextTurn, &[])?;
        TURN_KIND.deserialize(&answer)
    }

    fn choose_tickets(&mut self, options: &Bag<Ticket>) -> Result<Bag<Ticket>> {
        let answer = self.ask(MessageId::ChooseTickets, &[TICKET_BAG.serialize(options)])?;
        TICKET_BAG.deserialize(&answer)
    }

    fn draw_slot(&mut self) -> Result<DrawSlot> {
        let answer = self.ask(MessageId::DrawSlot, &[])?;
        DRAW_SLOT.deserialize(&answer)
    }

    fn claimed_route(&mut self) -> Result<Route> {
        let answer = self.ask(MessageId::Route, &[])?;
        ROUTE.deserialize(&answer)
    }

    fn initial_claim_cards(&mut self) -> Result<Bag<Card>> {
        let answer = self.ask(MessageId::Cards, &[])?;
        CARD_BAG.deserialize(&answer)
    }

    fn choose_additional_cards(&mut self, options: &[Bag<Card>]) -> Result<Bag<Card>> {
        let answer = self.ask(
            MessageId::ChooseAdditionalCards,
            &[CARD_BAG_LIST.serialize(&options.to_vec())],
        )?;
        CARD_BAG.deserialize(&answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{ROUTES, TICKETS};

    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn proxy(answers: &str) -> RemotePlayerProxy<Cursor<Vec<u8>>, Vec<u8>> {
        RemotePlayerProxy::new(Cursor::new(answers.as_bytes().to_vec()), Vec::new())
    }

    fn sent(proxy: &RemotePlayerProxy<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(proxy.writer.clone()).unwrap()
    }

    #[test]
    fn notifications_are_not_answered() {
        let mut proxy = proxy("");
        let names = PlayerNames::from([
            (PlayerId::Player1, String::from("Ada")),
            (PlayerId::Player2, String::from("Charles")),
        ]);

        proxy.init_players(PlayerId::Player2, &names).unwrap();
        proxy.receive_info("Ada").unwrap();
        proxy
            .set_initial_ticket_choice(&TICKETS.iter().take(2).cloned().collect())
            .unwrap();

        assert_eq!(
            sent(&proxy),
            "INIT_PLAYERS 1 QWRh,Q2hhcmxlcw==\nRECEIVE_INFO QWRh\nSET_INITIAL_TICKETS 0,1\n"
        );
    }

    #[test]
    fn queries_read_answers() {
        let mut proxy = proxy("2\n-1\n13\r\n6,8\n\n");

        assert_eq!(proxy.next_turn().unwrap(), TurnKind::ClaimRoute);
        assert_eq!(proxy.draw_slot().unwrap(), DrawSlot::Deck);
        assert_eq!(proxy.claimed_route().unwrap(), ROUTES[13]);
        assert_eq!(
            proxy.initial_claim_cards().unwrap(),
            Bag::from(vec![Card::Red, Card::Locomotive])
        );
        assert_eq!(
            proxy
                .choose_additional_cards(&[Bag::of(1, Card::Red), Bag::of(1, Card::Locomotive)])
                .unwrap(),
            Bag::new()
        );

        assert_eq!(
            sent(&proxy),
            "NEXT_TURN\nDRAW_SLOT\nROUTE\nCARDS\nCHOOSE_ADDITIONAL_CARDS 6;8\n"
        );
    }

    #[test]
    fn closed_connection_fails() {
        let mut proxy = proxy("");

        let error = proxy.choose_initial_tickets().unwrap_err();
        assert!(matches!(error, crate::Error::Transport(_)));
    }

    #[test]
    fn garbled_answer_fails() {
        let mut proxy = proxy("seven\n");

        let error = proxy.next_turn().unwrap_err();
        assert!(matches!(error, crate::Error::Protocol(_)));
    }
}
