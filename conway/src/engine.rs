// engine.rs - Generation stepping for Conway's Game of Life
//
// Every successor cell is computed from the untouched pre-step board and
// written into a separate board, so no cell ever sees another cell's update
// from the same generation.

use std::sync::Arc;

use crate::board::{Board, Cell};
use crate::error::{Error, Result};

/// Conway's rule for one cell given its live neighbor count.
pub fn next_state(cell: Cell, neighbors: u8) -> Cell {
    match (cell, neighbors) {
        (Cell::Alive, 2) | (Cell::Alive, 3) => Cell::Alive, // Survival
        (Cell::Alive, _)                    => Cell::Dead,  // Under/overpopulation
        (Cell::Dead, 3)                     => Cell::Alive, // Birth
        (Cell::Dead, _)                     => Cell::Dead,
    }
}

/// Returns the successor of `board`. Pure: the input is never modified.
pub fn step(board: &Board) -> Board {
    let n = board.size();
    step_ordered(board, (0..n).flat_map(|y| (0..n).map(move |x| (x, y))))
}

// Evaluates cells in the given visiting order. Any permutation of the board's
// coordinates yields the same successor.
pub(crate) fn step_ordered<I>(board: &Board, order: I) -> Board
where
    I: IntoIterator<Item = (usize, usize)>,
{
    let mut next = Board::new(board.size());
    for (x, y) in order {
        let cell = next_state(board.cell(x, y), board.live_neighbors(x, y));
        next.row_mut(y)[x] = cell;
    }
    next
}

/// Row coroutine: computes one successor row from the shared pre-step board,
/// yielding to the scheduler between cells.
async fn process_row(y: usize, board: Arc<Board>) -> Vec<Cell> {
    let n = board.size();
    let mut row = Vec::with_capacity(n);
    for x in 0..n {
        row.push(next_state(board.cell(x, y), board.live_neighbors(x, y)));
        tokio::task::yield_now().await; // Cooperative yielding
    }
    row
}

/// Same result as [`step`], computed with one tokio task per row.
///
/// Must be called from within a tokio runtime. A panicking row task
/// re-panics here; a cancelled one yields [`Error::RowTaskFailed`].
pub async fn step_rows(board: Arc<Board>) -> Result<Board> {
    let n = board.size();

    // Spawn every row at once so they interleave
    let handles: Vec<_> = (0..n)
        .map(|y| tokio::spawn(process_row(y, Arc::clone(&board))))
        .collect();

    let mut next = Board::new(n);
    for (y, handle) in handles.into_iter().enumerate() {
        match handle.await {
            Ok(row) => next.row_mut(y).copy_from_slice(&row),
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(_) => return Err(Error::RowTaskFailed { row: y }),
        }
    }
    Ok(next)
}

/// Flips one cell and returns its new state.
///
/// Callers must not run this concurrently with a step; [`crate::Simulation`]
/// enforces that.
pub fn toggle_cell(board: &mut Board, x: usize, y: usize) -> Result<Cell> {
    let cell = board.get(x, y)?.toggled();
    board.set(x, y, cell)?;
    Ok(cell)
}

/// Kills every cell. The generation counter is the caller's to reset.
pub fn reset(board: &mut Board) {
    board.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;

    fn board_strategy(max_size: usize) -> impl Strategy<Value = Board> {
        (1..=max_size).prop_flat_map(|n| {
            proptest::collection::vec(any::<bool>(), n * n).prop_map(move |bits| {
                let mut board = Board::new(n);
                for (i, alive) in bits.into_iter().enumerate() {
                    board.set(i % n, i / n, Cell::from(alive)).unwrap();
                }
                board
            })
        })
    }

    #[test]
    fn rule_table() {
        for n in 0..=8u8 {
            let survives = n == 2 || n == 3;
            assert_eq!(next_state(Cell::Alive, n), Cell::from(survives), "alive with {n}");
            assert_eq!(next_state(Cell::Dead, n), Cell::from(n == 3), "dead with {n}");
        }
    }

    #[test]
    fn empty_board_stays_empty() {
        let board = Board::new(60);
        assert_eq!(step(&board), board);
    }

    #[test]
    fn block_is_still_life() {
        let board = Board::from_rows(&[
            "....",
            ".##.",
            ".##.",
            "....",
        ])
        .unwrap();
        assert_eq!(step(&board), board);
    }

    #[test]
    fn blinker_oscillates_with_period_two() {
        let horizontal = Board::from_rows(&[
            ".....",
            ".....",
            ".###.",
            ".....",
            ".....",
        ])
        .unwrap();
        let vertical = Board::from_rows(&[
            ".....",
            "..#..",
            "..#..",
            "..#..",
            ".....",
        ])
        .unwrap();

        let once = step(&horizontal);
        assert_eq!(once, vertical);
        assert_eq!(step(&once), horizontal);
    }

    #[test]
    fn lone_cell_dies() {
        let mut board = Board::new(5);
        board.set(2, 2, Cell::Alive).unwrap();
        assert_eq!(step(&board).population(), 0);
    }

    #[test]
    fn birth_needs_exactly_three() {
        // Center cell (1, 1) is dead in each case.
        let three = Board::from_rows(&["#.#", "...", "#.."]).unwrap();
        let two = Board::from_rows(&["#.#", "...", "..."]).unwrap();
        let four = Board::from_rows(&["#.#", "...", "#.#"]).unwrap();

        assert_eq!(step(&three).get(1, 1), Ok(Cell::Alive));
        assert_eq!(step(&two).get(1, 1), Ok(Cell::Dead));
        assert_eq!(step(&four).get(1, 1), Ok(Cell::Dead));
    }

    #[test]
    fn overcrowded_cell_dies() {
        let board = Board::from_rows(&["###", "##.", "..."]).unwrap();
        // (1, 1) has 4 live neighbors
        assert_eq!(step(&board).get(1, 1), Ok(Cell::Dead));
    }

    #[test]
    fn step_does_not_modify_input() {
        let board = Board::from_rows(&["...", "###", "..."]).unwrap();
        let before = board.clone();
        let _ = step(&board);
        assert_eq!(board, before);
    }

    #[test]
    fn toggle_and_reset() {
        let mut board = Board::new(3);
        assert_eq!(toggle_cell(&mut board, 1, 2), Ok(Cell::Alive));
        assert_eq!(board.get(1, 2), Ok(Cell::Alive));
        assert_eq!(toggle_cell(&mut board, 1, 2), Ok(Cell::Dead));
        assert!(toggle_cell(&mut board, 3, 0).is_err());

        toggle_cell(&mut board, 0, 0).unwrap();
        reset(&mut board);
        assert_eq!(board.population(), 0);
    }

    #[tokio::test]
    async fn row_tasks_match_sequential_step() {
        let board = Board::from_rows(&[
            "..#....",
            "...#...",
            ".###...",
            ".......",
            "....##.",
            "....##.",
            ".......",
        ])
        .unwrap();
        let expected = step(&board);
        let actual = step_rows(Arc::new(board)).await.unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn row_tasks_cancelled_by_shutdown_report_failure() {
        use std::task::{Context, Poll, Waker};

        // A current-thread runtime that nobody drives: spawned rows stay queued.
        let rows_runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let board = Arc::new(Board::from_rows(&["...", "###", "..."]).unwrap());
        let mut pending = Box::pin(step_rows(board));
        let mut cx = Context::from_waker(Waker::noop());

        {
            let _guard = rows_runtime.enter();
            assert!(pending.as_mut().poll(&mut cx).is_pending());
        }

        // Shutting down drops the queued row tasks unfinished.
        drop(rows_runtime);

        match pending.as_mut().poll(&mut cx) {
            Poll::Ready(result) => assert_eq!(result, Err(Error::RowTaskFailed { row: 0 })),
            Poll::Pending => panic!("step_rows still pending after runtime shutdown"),
        }
    }

    proptest! {
        #[test]
        fn step_preserves_dimensions(board in board_strategy(12)) {
            let next = step(&board);
            prop_assert_eq!(next.size(), board.size());
        }

        #[test]
        fn visiting_order_does_not_matter(board in board_strategy(12), seed: u64) {
            let n = board.size();
            let mut coords: Vec<_> = (0..n).flat_map(|y| (0..n).map(move |x| (x, y))).collect();
            let row_major = step(&board);

            coords.reverse();
            prop_assert_eq!(&step_ordered(&board, coords.iter().copied()), &row_major);

            coords.shuffle(&mut StdRng::seed_from_u64(seed));
            prop_assert_eq!(&step_ordered(&board, coords.iter().copied()), &row_major);
        }
    }

    proptest! {
        // Each case builds its own runtime
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn row_tasks_agree_with_step(board in board_strategy(10)) {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .build()
                .unwrap();
            let expected = step(&board);
            let actual = runtime.block_on(step_rows(Arc::new(board))).unwrap();
            prop_assert_eq!(actual, expected);
        }
    }
}
