//! Cell grid shared by the carver, solver and renderer.
//!
//! The maze is kept at double resolution: logical cells sit at even/even
//! grid positions, the positions between them stand for the connecting
//! walls/openings, and a one-cell ring of `Path` bounds the whole buffer.

/// State of one grid position.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CellState {
    /// Carved/open, or part of the border ring.
    Path,
    Wall,
    /// On the solution path of the current solve attempt.
    Solved,
    /// Backtracked-from dead end of the current solve attempt.
    Tried,
    /// Transient look-ahead marker, display only.
    Check,
}

/// A logical maze cell, `0 <= row < height`, `0 <= col < width`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    /// Grid position of this cell: always even/even.
    pub fn pos(self) -> Pos {
        Pos {
            row: 2 * (self.row + 1),
            col: 2 * (self.col + 1),
        }
    }
}

/// A position in the double-resolution grid.
///
/// Even/even positions are cells, mixed parity positions are the midpoints
/// between adjacent cells (their shared wall or opening).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    /// The adjacent cell position two grid steps away.
    pub fn step(self, dir: Dir) -> Pos {
        let (dr, dc) = dir.delta();
        Pos {
            row: (self.row as isize + 2 * dr) as usize,
            col: (self.col as isize + 2 * dc) as usize,
        }
    }

    /// The midpoint between this position and `self.step(dir)`.
    pub fn midpoint(self, dir: Dir) -> Pos {
        let (dr, dc) = dir.delta();
        Pos {
            row: (self.row as isize + dr) as usize,
            col: (self.col as isize + dc) as usize,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

/// Fixed probe order; the carver randomizes its pick, not the scan.
pub const DIRS: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

impl Dir {
    fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
            Dir::Right => (0, 1),
        }
    }
}

/// The double-resolution cell-state buffer.
///
/// Callers are responsible for coordinate parity; only bounds are checked
/// (by indexing).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<Vec<CellState>>,
}

impl Grid {
    /// A fresh grid for `height` x `width` logical cells: full interior
    /// `Wall`, border ring `Path`.
    pub fn new(height: usize, width: usize) -> Grid {
        let rows = 2 * (height + 1) + 1;
        let cols = 2 * (width + 1) + 1;
        let mut cells = vec![vec![CellState::Wall; cols]; rows];
        for row in cells.iter_mut() {
            row[0] = CellState::Path;
            row[cols - 1] = CellState::Path;
        }
        for col in 0..cols {
            cells[0][col] = CellState::Path;
            cells[rows - 1][col] = CellState::Path;
        }
        Grid {
            height,
            width,
            cells,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of grid rows, border ring included.
    pub fn rows(&self) -> usize {
        2 * (self.height + 1) + 1
    }

    /// Number of grid columns, border ring included.
    pub fn cols(&self) -> usize {
        2 * (self.width + 1) + 1
    }

    pub fn get(&self, p: Pos) -> CellState {
        self.cells[p.row][p.col]
    }

    pub fn set(&mut self, p: Pos, state: CellState) {
        self.cells[p.row][p.col] = state;
    }

    /// Revert all `Solved`/`Tried` positions to `Path`, returning the grid
    /// to its pre-solve carved state. Used between optimizer trials.
    pub fn restore(&mut self) {
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                if *cell == CellState::Solved || *cell == CellState::Tried {
                    *cell = CellState::Path;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_layout() {
        let grid = Grid::new(3, 4);
        assert_eq!(grid.rows(), 9);
        assert_eq!(grid.cols(), 11);
        // Border ring is path.
        for col in 0..grid.cols() {
            assert_eq!(grid.get(Pos { row: 0, col }), CellState::Path);
            assert_eq!(grid.get(Pos { row: 8, col }), CellState::Path);
        }
        for row in 0..grid.rows() {
            assert_eq!(grid.get(Pos { row, col: 0 }), CellState::Path);
            assert_eq!(grid.get(Pos { row, col: 10 }), CellState::Path);
        }
        // Interior is wall.
        for row in 1..grid.rows() - 1 {
            for col in 1..grid.cols() - 1 {
                assert_eq!(grid.get(Pos { row, col }), CellState::Wall);
            }
        }
    }

    #[test]
    fn test_cell_to_pos_is_even() {
        assert_eq!(Cell { row: 0, col: 0 }.pos(), Pos { row: 2, col: 2 });
        assert_eq!(Cell { row: 2, col: 1 }.pos(), Pos { row: 6, col: 4 });
    }

    #[test]
    fn test_step_and_midpoint() {
        let p = Pos { row: 4, col: 4 };
        assert_eq!(p.step(Dir::Up), Pos { row: 2, col: 4 });
        assert_eq!(p.midpoint(Dir::Up), Pos { row: 3, col: 4 });
        assert_eq!(p.step(Dir::Right), Pos { row: 4, col: 6 });
        assert_eq!(p.midpoint(Dir::Left), Pos { row: 4, col: 3 });
    }

    #[test]
    fn test_restore_reverts_solve_states() {
        let mut grid = Grid::new(2, 2);
        grid.set(Pos { row: 2, col: 2 }, CellState::Solved);
        grid.set(Pos { row: 2, col: 4 }, CellState::Tried);
        grid.set(Pos { row: 4, col: 2 }, CellState::Path);
        let mut expected = grid.clone();
        expected.set(Pos { row: 2, col: 2 }, CellState::Path);
        expected.set(Pos { row: 2, col: 4 }, CellState::Path);
        grid.restore();
        assert_eq!(grid, expected);
    }
}
