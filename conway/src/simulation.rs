// simulation.rs - Shared, synchronized handle over the simulation state
//
// Every driver goes through this handle: the simulation task calls tick(),
// the render task reads through view(), and UI events call the edit methods.
// A single RwLock is the serialization point. Successors are computed under
// the read lock so renders keep going, then committed under the write lock.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::board::{Board, Cell};
use crate::config::LifeConfig;
use crate::engine;
use crate::error::Result;
use crate::patterns::{self, Pattern};
use crate::state::SimulationState;

#[derive(Clone)]
pub struct Simulation {
    state: Arc<RwLock<SimulationState>>,
}

impl Simulation {
    pub fn new(state: SimulationState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    pub fn from_config(config: &LifeConfig) -> Self {
        Self::new(SimulationState::new(config.grid_size).with_cycle_detection(config.stop_on_cycle))
    }

    // A panic while holding the lock cannot leave a half-written board: the
    // board is only ever replaced whole or edited one cell at a time.
    fn read(&self) -> RwLockReadGuard<'_, SimulationState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SimulationState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` against the committed state. Board, generation and run flag
    /// seen inside `f` always belong together.
    pub fn view<R>(&self, f: impl FnOnce(&SimulationState) -> R) -> R {
        f(&self.read())
    }

    pub fn generation(&self) -> u64 {
        self.read().generation()
    }

    pub fn is_running(&self) -> bool {
        self.read().is_running()
    }

    pub fn set_running(&self, running: bool) {
        self.write().set_running(running);
    }

    /// Start/pause button. Returns the new run state.
    pub fn toggle_running(&self) -> bool {
        let mut state = self.write();
        let running = !state.is_running();
        state.set_running(running);
        running
    }

    /// Advances one generation if running. Returns whether a generation was
    /// committed.
    pub fn tick(&self) -> bool {
        let (next, revision) = {
            let state = self.read();
            if !state.is_running() {
                return false;
            }
            (engine::step(state.board()), state.revision())
        };
        self.commit_if_current(next, revision)
    }

    /// [`Simulation::tick`] using one tokio task per row.
    pub async fn tick_rows(&self) -> Result<bool> {
        let (board, revision) = {
            let state = self.read();
            if !state.is_running() {
                return Ok(false);
            }
            (Arc::new(state.board().clone()), state.revision())
        };
        let next = engine::step_rows(board).await?;
        Ok(self.commit_if_current(next, revision))
    }

    fn commit_if_current(&self, next: Board, revision: u64) -> bool {
        let mut state = self.write();
        if !state.is_running() || state.revision() != revision {
            debug!(revision, current = state.revision(), "board changed during step, discarding successor");
            return false;
        }
        state.commit(next);
        true
    }

    pub fn toggle_cell(&self, x: usize, y: usize) -> Result<Cell> {
        let result = self.write().toggle_cell(x, y);
        if let Err(err) = &result {
            debug!(x, y, %err, "cell edit rejected");
        }
        result
    }

    pub fn reset(&self) {
        self.write().reset();
    }

    pub fn apply_pattern(&self, pattern: &Pattern) -> Result<()> {
        self.write().replace_with(|board| {
            patterns::place(board, pattern);
            Ok(())
        })?;
        info!(pattern = pattern.name, "pattern applied");
        Ok(())
    }

    pub fn randomize(&self, seed: u64, density: f64) -> Result<()> {
        // Checked before locking so a bad density never reaches the board.
        let density = patterns::checked_density(density)?;
        let mut rng = StdRng::seed_from_u64(seed);
        self.write().replace_with(|board| patterns::randomize(board, &mut rng, density))?;
        info!(seed, density, "board randomized");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn with_blinker() -> Simulation {
        let sim = Simulation::new(SimulationState::new(5));
        for x in 1..4 {
            sim.toggle_cell(x, 2).unwrap();
        }
        sim
    }

    #[test]
    fn tick_is_noop_while_paused() {
        let sim = with_blinker();
        assert!(!sim.tick());
        assert_eq!(sim.generation(), 0);
        sim.view(|s| assert_eq!(s.get(2, 1), Ok(Cell::Dead)));
    }

    #[test]
    fn tick_commits_board_and_generation_together() {
        let sim = with_blinker();
        sim.set_running(true);
        assert!(sim.tick());
        sim.view(|s| {
            assert_eq!(s.generation(), 1);
            assert_eq!(s.get(2, 1), Ok(Cell::Alive));
            assert_eq!(s.get(1, 2), Ok(Cell::Dead));
        });
    }

    #[test]
    fn stale_successor_is_discarded() {
        let sim = with_blinker();
        sim.set_running(true);

        let (next, revision) = sim.view(|s| (engine::step(s.board()), s.revision()));

        // Pause, edit and resume before the commit lands.
        sim.set_running(false);
        sim.toggle_cell(0, 0).unwrap();
        sim.set_running(true);

        assert!(!sim.commit_if_current(next, revision));
        assert_eq!(sim.generation(), 0);
        sim.view(|s| assert_eq!(s.get(0, 0), Ok(Cell::Alive)));
    }

    #[test]
    fn toggle_running_flips() {
        let sim = with_blinker();
        assert!(sim.toggle_running());
        assert!(sim.is_running());
        assert!(!sim.toggle_running());
    }

    #[test]
    fn edits_rejected_while_running() {
        let sim = with_blinker();
        sim.set_running(true);
        assert_eq!(sim.toggle_cell(0, 0), Err(Error::SimulationRunning));
        assert!(sim.apply_pattern(&patterns::PATTERNS[0]).is_err());
        assert!(sim.randomize(1, 0.5).is_err());
    }

    #[test]
    fn invalid_density_leaves_state_usable() {
        let sim = with_blinker();
        assert!(matches!(sim.randomize(1, f64::NAN), Err(Error::InvalidDensity { .. })));
        assert!(!sim.state.is_poisoned());
        sim.view(|s| assert_eq!(s.board().population(), 3));

        sim.randomize(1, 1.0).unwrap();
        sim.view(|s| assert_eq!(s.board().population(), 25));
    }

    #[test]
    fn pattern_resets_generation() {
        let sim = with_blinker();
        sim.set_running(true);
        sim.tick();
        sim.set_running(false);
        sim.apply_pattern(patterns::find("Glider").unwrap()).unwrap();
        assert_eq!(sim.generation(), 0);
        sim.view(|s| assert_eq!(s.board().population(), 5));
    }

    #[test]
    fn reset_pauses_and_zeroes() {
        let sim = with_blinker();
        sim.set_running(true);
        sim.tick();
        sim.reset();
        assert!(!sim.is_running());
        assert_eq!(sim.generation(), 0);
        sim.view(|s| assert_eq!(s.board().population(), 0));
    }

    #[tokio::test]
    async fn tick_rows_matches_tick() {
        let a = with_blinker();
        let b = with_blinker();
        a.set_running(true);
        b.set_running(true);

        assert!(a.tick());
        assert!(b.tick_rows().await.unwrap());

        let board_a = a.view(|s| s.board().clone());
        let board_b = b.view(|s| s.board().clone());
        assert_eq!(board_a, board_b);
        assert_eq!(b.generation(), 1);
    }
}
