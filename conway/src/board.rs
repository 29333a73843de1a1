// board.rs - Fixed-size bounded grid for Conway's Game of Life

use std::fmt;

use crate::error::{Error, Result};

/// Default side length of the board.
pub const GRID_SIZE: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    Alive,
    #[default]
    Dead,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        matches!(self, Cell::Alive)
    }

    /// The opposite state.
    pub fn toggled(self) -> Self {
        match self {
            Cell::Alive => Cell::Dead,
            Cell::Dead => Cell::Alive,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

// Moore neighborhood offsets as (dx, dy)
const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// A square `size x size` grid addressed by `(x, y)`, `0 <= x, y < size`.
///
/// The grid is bounded: cells past the edge do not exist, so edge and
/// corner cells have fewer than 8 neighbors. Dimensions never change after
/// construction.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>, // row-major, index = y * size + x
}

impl Board {
    /// An all-dead board.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Dead; size * size],
        }
    }

    /// Parses rows of `#` (alive) and `.` (dead). The row count sets the
    /// side length and every row must be exactly that wide.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let size = rows.len();
        let mut board = Board::new(size);
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != size {
                return Err(Error::RaggedRow { row: y, expected: size, found });
            }
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '#' => Cell::Alive,
                    '.' => Cell::Dead,
                    _ => return Err(Error::InvalidCell { row: y, ch }),
                };
                board.cells[y * size + x] = cell;
            }
        }
        Ok(board)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.size || y >= self.size {
            return Err(Error::OutOfBounds { x, y, size: self.size });
        }
        Ok(y * self.size + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Result<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> Result<()> {
        let i = self.index(x, y)?;
        self.cells[i] = cell;
        Ok(())
    }

    /// Counts alive cells among the neighbors of `(x, y)` that exist on the
    /// grid. Always in `0..=8`.
    pub fn neighbor_count(&self, x: usize, y: usize) -> Result<u8> {
        self.index(x, y)?;
        Ok(self.live_neighbors(x, y))
    }

    // Caller guarantees (x, y) is on the board.
    pub(crate) fn live_neighbors(&self, x: usize, y: usize) -> u8 {
        let mut count = 0;
        for (dx, dy) in NEIGHBORS {
            let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy)) else {
                continue;
            };
            if nx < self.size && ny < self.size && self.cells[ny * self.size + nx].is_alive() {
                count += 1;
            }
        }
        count
    }

    // Unchecked read for in-crate loops that already iterate 0..size.
    pub(crate) fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells[y * self.size + x]
    }

    pub(crate) fn row_mut(&mut self, y: usize) -> &mut [Cell] {
        let start = y * self.size;
        &mut self.cells[start..start + self.size]
    }

    /// Number of alive cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Coordinates of every alive cell in row-major order.
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive())
            .map(|(i, _)| (i % self.size, i / self.size))
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Dead);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size.max(1)) {
            for cell in row {
                f.write_str(if cell.is_alive() { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({}x{})\n{}", self.size, self.size, self)
    }
}
