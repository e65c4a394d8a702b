pub mod bag;
pub mod bot;
pub mod card;
pub mod card_state;
pub mod config;
pub mod constants;
pub mod deck;
mod error;
pub mod game_phase;
pub mod game_state;
pub mod info;
pub mod logging;
pub mod manager;
pub mod map;
pub mod net;
pub mod player;
pub mod player_state;
pub mod route;
pub mod station;
pub mod station_partition;
pub mod ticket;
pub mod trail;

pub use error::{Error, Result};

#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate smallvec;
