use crate::error::Result;
use crate::net::message_id::MessageId;
use crate::net::serdes::{
    CARD_BAG, CARD_BAG_LIST, DRAW_SLOT, PLAYER_ID, PLAYER_STATE, PUBLIC_GAME_STATE, ROUTE,
    STRING, STRING_LIST, TICKET_BAG, TURN_KIND,
};
use crate::player::{Player, PlayerId, PlayerNames};

use log::{debug, error, trace};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::net::TcpStream;
use std::str::FromStr;
use std::thread::{self, JoinHandle};
use strum::{EnumCount, IntoEnumIterator};

/// Runs a local [`Player`] on behalf of a game hosted elsewhere.
///
/// Reads the messages of a [`crate::net::remote_player_proxy::RemotePlayerProxy`], calls
/// the matching method of the player, and sends back the answers to queries.
pub struct RemotePlayerClient<P: Player, R: BufRead, W: Write> {
    player: P,
    reader: R,
    writer: W,
}

impl<P: Player> RemotePlayerClient<P, BufReader<TcpStream>, BufWriter<TcpStream>> {
    /// A client talking through a connection to the host.
    pub fn connect(player: P, stream: TcpStream) -> Result<Self> {
        let reader = BufReader::new(stream.try_clone()?);
        Ok(Self::new(player, reader, BufWriter::new(stream)))
    }
}

impl<P: Player + Send + 'static> RemotePlayerClient<P, BufReader<TcpStream>, BufWriter<TcpStream>> {
    /// Plays on a thread of its own until the host closes the connection, then hands the
    /// player back.
    pub fn spawn(player: P, stream: TcpStream) -> JoinHandle<Result<P>> {
        thread::spawn(move || {
            let mut client = Self::connect(player, stream)?;
            client.run()?;
            Ok(client.into_player())
        })
    }
}

/// The argument of `message_id` at `index`.
fn argument<'a>(message_id: MessageId, arguments: &[&'a str], index: usize) -> Result<&'a str> {
    arguments.get(index).copied().ok_or_else(|| {
        crate::Error::protocol(format!(
            "{} expects at least {} arguments, but got {}",
            message_id,
            index + 1,
            arguments.len()
        ))
    })
}

impl<P: Player, R: BufRead, W: Write> RemotePlayerClient<P, R, W> {
    pub fn new(player: P, reader: R, writer: W) -> Self {
        Self {
            player,
            reader,
            writer,
        }
    }

    pub fn into_player(self) -> P {
        self.player
    }

    /// Handles messages until the connection is closed.
    ///
    /// Returns an `Err` if a message cannot be understood, if the player fails, or if the
    /// connection breaks.
    pub fn run(&mut self) -> Result<()> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                debug!("The host closed the connection");
                return Ok(());
            }

            let message = line.trim_end_matches(&['\r', '\n'][..]);
            trace!("<- {}", message);
            if let Err(handling_error) = self.handle(message) {
                error!("Cannot handle `{}`: {}", message, handling_error);
                return Err(handling_error);
            }
        }
    }

    /// Calls the player for a single message, and returns the answer, if any.
    fn dispatch(&mut self, message_id: MessageId, arguments: &[&str]) -> Result<Option<String>> {
        let nth = |index: usize| argument(message_id, arguments, index);

        let answer = match message_id {
            MessageId::InitPlayers => {
                let own_id = PLAYER_ID.deserialize(nth(0)?)?;
                let names = STRING_LIST.deserialize(nth(1)?)?;
                if names.len() != PlayerId::COUNT {
                    return Err(crate::Error::protocol(format!(
                        "expected {} player names, but got {}",
                        PlayerId::COUNT,
                        names.len()
                    )));
                }
                let names: PlayerNames = PlayerId::iter().zip(names).collect();

                self.player.init_players(own_id, &names)?;
                None
            }
            MessageId::ReceiveInfo => {
                self.player.receive_info(&STRING.deserialize(nth(0)?)?)?;
                None
            }
            MessageId::UpdateState => {
                let public_state = PUBLIC_GAME_STATE.deserialize(nth(0)?)?;
                let own_state = PLAYER_STATE.deserialize(nth(1)?)?;

                self.player.update_state(&public_state, &own_state)?;
                None
            }
            MessageId::SetInitialTickets => {
                let tickets = TICKET_BAG.deserialize(nth(0)?)?;
                self.player.set_initial_ticket_choice(&tickets)?;
                None
            }
            MessageId::ChooseInitialTickets => {
                let tickets = self.player.choose_initial_tickets()?;
                Some(TICKET_BAG.serialize(&tickets))
            }
            MessageId::NextTurn => Some(TURN_KIND.serialize(&self.player.next_turn()?)),
            MessageId::ChooseTickets => {
                let options = TICKET_BAG.deserialize(nth(0)?)?;
                Some(TICKET_BAG.serialize(&self.player.choose_tickets(&options)?))
            }
            MessageId::DrawSlot => Some(DRAW_SLOT.serialize(&self.player.draw_slot()?)),
            MessageId::Route => Some(ROUTE.serialize(&self.player.claimed_route()?)),
            MessageId::Cards => Some(CARD_BAG.serialize(&self.player.initial_claim_cards()?)),
            MessageId::ChooseAdditionalCards => {
                let options = CARD_BAG_LIST.deserialize(nth(0)?)?;
                Some(CARD_BAG.serialize(&self.player.choose_additional_cards(&options)?))
            }
        };

        Ok(answer)
    }

    fn handle(&mut self, message: &str) -> Result<()> {
        let mut words = message.split(' ');
        let name = words.next().unwrap_or_default();
        let message_id = MessageId::from_str(name)
            .map_err(|_| crate::Error::protocol(format!("unknown message `{}`", name)))?;
        let arguments: Vec<&str> = words.collect();

        if let Some(answer) = self.dispatch(message_id, &arguments)? {
            trace!("-> {}", answer);
            writeln!(self.writer, "{}", answer)?;
            self.writer.flush()?;
        }
        Ok(())
    }
}
