//! Hexagonal floor tiles flipped by lines of moves, then left to follow a
//! life-like rule for a number of days.

pub use utils::{Coord, Direction};
mod utils;

pub use world::{HashedWorld, Tile, World};
pub mod world;

pub use decode::{decode, lines};
mod decode;

pub use config::{SimConfig, PARALLEL_THRESHOLD, SIMULATION_GENERATIONS};
mod config;

pub use sim::{count_painted, Sim, State};
mod sim;
