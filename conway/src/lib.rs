//! Conway's Game of Life on a fixed-size bounded grid.
//!
//! [`Board`] stores cells, [`engine`] computes successor generations from an
//! unmodified snapshot, and [`Simulation`] is the single synchronized access
//! point shared by the simulation task, the render task and UI edits (see
//! [`schedule`]).

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod patterns;
pub mod schedule;
pub mod simulation;
pub mod state;

pub use board::{Board, Cell, GRID_SIZE};
pub use config::{ConfigError, LifeConfig};
pub use error::{Error, Result};
pub use patterns::{PATTERNS, Pattern};
pub use simulation::Simulation;
pub use state::SimulationState;
