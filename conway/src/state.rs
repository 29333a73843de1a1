// state.rs - Board, generation counter and run flag as one unit

use tracing::{info, trace};

use crate::board::{Board, Cell};
use crate::engine;
use crate::error::{Error, Result};
use crate::history::CycleDetector;

/// The simulation aggregate: one board, the generation it is at, and whether
/// the simulation loop should advance it.
///
/// This type has no synchronization of its own; share it through
/// [`crate::Simulation`].
#[derive(Debug, Clone)]
pub struct SimulationState {
    board: Board,
    generation: u64,
    running: bool,
    // Bumped by every board mutation so a step computed against an older
    // board can be recognized and discarded.
    revision: u64,
    cycles: Option<CycleDetector>,
}

impl SimulationState {
    pub fn new(size: usize) -> Self {
        Self {
            board: Board::new(size),
            generation: 0,
            running: false,
            revision: 0,
            cycles: None,
        }
    }

    /// Pause automatically once a board repeats one of the recent ones.
    pub fn with_cycle_detection(mut self, enabled: bool) -> Self {
        self.cycles = enabled.then(CycleDetector::new);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn get(&self, x: usize, y: usize) -> Result<Cell> {
        self.board.get(x, y)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub(crate) fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_running(&mut self, running: bool) {
        if self.running != running {
            info!(running, generation = self.generation, "simulation run state changed");
        }
        self.running = running;
    }

    /// Installs `next` as the current board and advances the generation.
    /// Returns `true` if cycle detection paused the simulation.
    pub fn commit(&mut self, next: Board) -> bool {
        debug_assert_eq!(next.size(), self.board.size());

        self.board = next;
        self.generation += 1;
        self.revision += 1;
        trace!(generation = self.generation, population = self.board.population(), "generation committed");

        let repeated = self.cycles.as_mut().is_some_and(|c| c.observe(&self.board));
        if repeated && self.running {
            info!(generation = self.generation, "board repeats a recent generation, pausing");
            self.running = false;
            return true;
        }
        false
    }

    /// Flips one cell. Rejected while running.
    pub fn toggle_cell(&mut self, x: usize, y: usize) -> Result<Cell> {
        if self.running {
            return Err(Error::SimulationRunning);
        }
        let cell = engine::toggle_cell(&mut self.board, x, y)?;
        self.revision += 1;
        Ok(cell)
    }

    /// Pauses, clears the board and sets the generation back to 0.
    pub fn reset(&mut self) {
        self.running = false;
        engine::reset(&mut self.board);
        self.generation = 0;
        self.revision += 1;
        if let Some(cycles) = self.cycles.as_mut() {
            cycles.clear();
        }
        info!("simulation reset");
    }

    /// Rewrites the whole board while paused and starts counting from 0.
    /// A failing `fill` must leave the board untouched.
    pub fn replace_with(&mut self, fill: impl FnOnce(&mut Board) -> Result<()>) -> Result<()> {
        if self.running {
            return Err(Error::SimulationRunning);
        }
        fill(&mut self.board)?;
        self.generation = 0;
        self.revision += 1;
        if let Some(cycles) = self.cycles.as_mut() {
            cycles.clear();
        }
        Ok(())
    }
}
