// history.rs - Recent-board hashes for spotting still lifes and short cycles

use std::collections::VecDeque;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::board::Board;

/// How many recent generations are remembered.
pub const HISTORY_LEN: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct CycleDetector {
    recent: VecDeque<u64>,
}

impl CycleDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `board` and reports whether it matches one of the last
    /// [`HISTORY_LEN`] boards observed.
    pub fn observe(&mut self, board: &Board) -> bool {
        let hash = hash_board(board);
        if self.recent.contains(&hash) {
            return true;
        }
        if self.recent.len() == HISTORY_LEN {
            self.recent.pop_front();
        }
        self.recent.push_back(hash);
        false
    }

    pub fn clear(&mut self) {
        self.recent.clear();
    }
}

fn hash_board(board: &Board) -> u64 {
    let mut hasher = DefaultHasher::new();
    board.hash(&mut hasher);
    hasher.finish()
}
