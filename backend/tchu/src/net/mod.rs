//! Playing against someone on another machine.
//!
//! The host runs the game with a [`remote_player_proxy::RemotePlayerProxy`] in place of the
//! distant player, and the distant player runs a [`remote_player_client::RemotePlayerClient`]
//! around their own [`crate::player::Player`]. Both sides exchange one message per line.

pub mod message_id;
pub mod remote_player_client;
pub mod remote_player_proxy;
pub mod serdes;
