//! This crate contains the library behind the terminal maze game Maze Explorer.
//!
//! The game logic lives in plain modules that know nothing about the terminal: [`grid`] models the
//! board, [`generator`] carves random mazes and scatters items over them, [`pathfinding`] answers
//! hint requests and [`session`] runs a game from its first move to its win or loss. The terminal
//! interface built on Ratatui sits on top of them and is driven through [`App`].

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
pub mod config;
pub mod error;
mod events;
pub mod generator;
pub mod grid;
pub mod logging;
pub mod pathfinding;
pub mod session;
pub mod types;
mod ui;

pub use app::App;
pub use config::{Config, Settings};
pub use error::{MazeError, Result};
pub use generator::{Maze, MazeGenerator};
pub use grid::{CellKind, Grid, Pos};
pub use pathfinding::shortest_path;
pub use session::{CommandOutcome, Session, Snapshot};
pub use types::{Command, Difficulty, Direction, GameStatus, MoveEffect, MoveOutcome};
