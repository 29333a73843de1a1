// patterns.rs - Built-in starting patterns and random fill

use rand::Rng;

use crate::board::{Board, Cell};
use crate::error::{Error, Result};

pub struct Pattern {
    pub name: &'static str,
    /// Alive cells as (x, y) offsets from the pattern's top-left corner.
    pub cells: &'static [(usize, usize)],
}

impl Pattern {
    /// Bounding box as (width, height).
    pub fn extent(&self) -> (usize, usize) {
        self.cells
            .iter()
            .fold((0, 0), |(w, h), &(x, y)| (w.max(x + 1), h.max(y + 1)))
    }
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(0, 0), (1, 0), (2, 0)],
    },
    Pattern {
        name: "Toad",
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            // Top half
            (2, 0), (3, 0), (4, 0), (8, 0), (9, 0), (10, 0),
            (0, 2), (5, 2), (7, 2), (12, 2),
            (0, 3), (5, 3), (7, 3), (12, 3),
            (0, 4), (5, 4), (7, 4), (12, 4),
            (2, 5), (3, 5), (4, 5), (8, 5), (9, 5), (10, 5),
            // Bottom half (mirrored)
            (2, 7), (3, 7), (4, 7), (8, 7), (9, 7), (10, 7),
            (0, 8), (5, 8), (7, 8), (12, 8),
            (0, 9), (5, 9), (7, 9), (12, 9),
            (0, 10), (5, 10), (7, 10), (12, 10),
            (2, 12), (3, 12), (4, 12), (8, 12), (9, 12), (10, 12),
        ],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        cells: &[
            (0, 4), (1, 4), (0, 5), (1, 5),
            (10, 4), (10, 5), (10, 6), (11, 3), (11, 7), (12, 2), (12, 8),
            (13, 2), (13, 8), (14, 5), (15, 3), (15, 7), (16, 4), (16, 5),
            (16, 6), (17, 5), (20, 2), (20, 3), (20, 4), (21, 2), (21, 3),
            (21, 4), (22, 1), (22, 5), (24, 0), (24, 1), (24, 5), (24, 6),
            (34, 2), (34, 3), (35, 2), (35, 3),
        ],
    },
];

pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Clears `board` and draws `pattern` centered on it. Cells that would land
/// off the board are dropped.
pub fn place(board: &mut Board, pattern: &Pattern) {
    board.clear();

    let n = board.size();
    let (w, h) = pattern.extent();
    let (ox, oy) = (n.saturating_sub(w) / 2, n.saturating_sub(h) / 2);

    for &(x, y) in pattern.cells {
        let (cx, cy) = (ox + x, oy + y);
        if cx < n && cy < n {
            board.row_mut(cy)[cx] = Cell::Alive;
        }
    }
}

/// Clamps a fill probability into `[0, 1]`. NaN and infinities are rejected.
pub fn checked_density(density: f64) -> Result<f64> {
    if !density.is_finite() {
        return Err(Error::InvalidDensity { density });
    }
    Ok(density.clamp(0.0, 1.0))
}

/// Fills every cell independently, alive with probability `density`.
/// The board is left untouched if `density` is rejected.
pub fn randomize<R: Rng + ?Sized>(board: &mut Board, rng: &mut R, density: f64) -> Result<()> {
    let density = checked_density(density)?;
    let n = board.size();
    for y in 0..n {
        for cell in board.row_mut(y) {
            *cell = Cell::from(rng.gen_bool(density));
        }
    }
    Ok(())
}
