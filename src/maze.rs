mod maker;
pub mod store;

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::FromRepr;

pub const MIN_DIMENSION: usize = 3;

const WALL_GLYPH: char = '#';
const EMPTY_GLYPH: char = ' ';
const START_GLYPH: char = 'S';
const END_GLYPH: char = 'E';
const PLAYER_GLYPH: char = 'P';

// The discriminants are the persisted byte values and must not change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromRepr)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Empty = 0,
    Wall = 1,
    End = 2,
    Start = 3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub column: i32,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct Maze {
    cells: Vec<Cell>, // Row-major, rows * columns, allocated once for the life of the engine.
    rows: usize,
    columns: usize,
    initialized: bool,
}

impl Maze {
    pub fn new(rows: usize, columns: usize) -> Self {
        assert!(
            rows >= MIN_DIMENSION && columns >= MIN_DIMENSION,
            "maze dimensions must be at least {MIN_DIMENSION}x{MIN_DIMENSION}"
        );

        Self {
            cells: vec![Cell::Wall; rows * columns],
            rows,
            columns,
            initialized: false,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn entrance(&self) -> Position {
        Position { row: 0, column: 1 }
    }

    pub fn exit(&self) -> Position {
        Position {
            row: self.rows as i32 - 1,
            column: self.columns as i32 - 2,
        }
    }

    pub fn is_blocked(&self, row: i32, column: i32) -> bool {
        if !self.initialized {
            return true;
        }

        let in_bounds =
            row >= 0 && row < self.rows as i32 && column >= 0 && column < self.columns as i32;

        // Out of bounds counts as a wall, so hosts can use this directly as a
        // movement check without separate bounds handling.
        !in_bounds || self.at(row as usize, column as usize) == Cell::Wall
    }

    pub fn is_blocked_at(&self, position: Position) -> bool {
        self.is_blocked(position.row, position.column)
    }

    pub fn window(
        &self,
        start_row: i32,
        start_column: i32,
        height: usize,
        width: usize,
    ) -> Vec<Vec<Cell>> {
        (0..height)
            .map(|i| {
                (0..width)
                    .map(|j| {
                        let row = start_row as i64 + i as i64;
                        let column = start_column as i64 + j as i64;
                        let in_bounds = row >= 0
                            && row < self.rows as i64
                            && column >= 0
                            && column < self.columns as i64;

                        // Cells outside the grid, and every cell before the
                        // maze exists, read back as Empty padding.
                        if in_bounds && self.initialized {
                            self.at(row as usize, column as usize)
                        } else {
                            Cell::Empty
                        }
                    })
                    .collect()
            })
            .collect()
    }

    // Positions the window so the focus cell lands at (height / 2, width / 2),
    // the way a display window tracks the player.
    pub fn window_around(&self, focus: Position, height: usize, width: usize) -> Vec<Vec<Cell>> {
        let start_row = focus.row - (height / 2) as i32;
        let start_column = focus.column - (width / 2) as i32;
        self.window(start_row, start_column, height, width)
    }

    pub fn log(&self) -> String {
        (0..self.rows)
            .map(|row| {
                (0..self.columns)
                    .map(|column| match self.at(row, column) {
                        Cell::Wall => WALL_GLYPH,
                        _ => EMPTY_GLYPH,
                    })
                    .collect::<String>()
            })
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn log_with_player(&self, player: Position) -> String {
        (0..self.rows)
            .map(|row| {
                (0..self.columns)
                    .map(|column| {
                        if (row as i32, column as i32) == (player.row, player.column) {
                            PLAYER_GLYPH
                        } else {
                            match self.at(row, column) {
                                Cell::Wall => WALL_GLYPH,
                                Cell::Start => START_GLYPH,
                                Cell::End => END_GLYPH,
                                Cell::Empty => EMPTY_GLYPH,
                            }
                        }
                    })
                    .collect::<String>()
            })
            .collect::<Vec<String>>()
            .join("\n")
    }

    fn at(&self, row: usize, column: usize) -> Cell {
        self.cells[self.index(row, column)]
    }

    fn set(&mut self, row: usize, column: usize, cell: Cell) {
        let index = self.index(row, column);
        self.cells[index] = cell;
    }

    fn index(&self, row: usize, column: usize) -> usize {
        debug_assert!(
            row < self.rows && column < self.columns,
            "cell coordinates are out of bounds"
        );

        row * self.columns + column
    }
}

impl fmt::Debug for Maze {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.log())
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    #[should_panic]
    fn test_dimensions_under_three_are_rejected() {
        Maze::new(2, 5);
    }

    #[test]
    fn test_entrance_and_exit_are_fixed_by_dimensions() {
        let maze = Maze::new(5, 5);

        assert_eq!(maze.dimensions(), (5, 5));
        assert_eq!(maze.entrance(), Position { row: 0, column: 1 });
        assert_eq!(maze.exit(), Position { row: 4, column: 3 });
    }

    #[test]
    fn test_queries_before_generation_are_safe() {
        let maze = Maze::new(5, 5);

        assert!(!maze.is_initialized());
        assert!(maze.is_blocked(1, 1));
        assert!(maze.is_blocked_at(maze.entrance()));
        assert_eq!(maze.window(0, 0, 5, 5), vec![vec![Cell::Empty; 5]; 5]);
    }

    #[test]
    fn test_corner_is_a_border_wall_and_far_windows_read_as_empty() {
        let mut maze = Maze::new(5, 5);
        maze.generate(&mut StdRng::seed_from_u64(0));

        assert!(maze.is_blocked(0, 0));
        assert!(maze.is_blocked(-1, 0));
        assert!(maze.is_blocked(0, 5));

        let outside = maze.window(-3, -3, 3, 3);
        assert_eq!(outside, vec![vec![Cell::Empty; 3]; 3]);

        // A window at (-2, -2) still touches the grid: its last cell lands on
        // the (0, 0) corner wall, and everything else is padding.
        let overlapping = maze.window(-2, -2, 3, 3);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if (i, j) == (2, 2) { Cell::Wall } else { Cell::Empty };
                assert_eq!(overlapping[i][j], expected);
            }
        }
    }

    #[test]
    fn test_window_pads_outside_and_copies_inside() {
        let mut maze = Maze::new(9, 9);
        maze.generate(&mut StdRng::seed_from_u64(7));

        let grid = maze.window(0, 0, 9, 9);
        let window = maze.window(7, 7, 4, 4);

        for i in 0..4 {
            for j in 0..4 {
                let expected = if 7 + i < 9 && 7 + j < 9 {
                    grid[7 + i][7 + j]
                } else {
                    Cell::Empty
                };
                assert_eq!(window[i][j], expected);
            }
        }
    }

    #[test]
    fn test_window_around_centers_the_focus() {
        let mut maze = Maze::new(9, 9);
        maze.generate(&mut StdRng::seed_from_u64(7));

        let focus = Position { row: 4, column: 5 };

        assert_eq!(maze.window_around(focus, 8, 8), maze.window(0, 1, 8, 8));
    }

    #[test]
    fn test_log_renders_walls_only() {
        let mut maze = Maze::new(5, 5);
        maze.generate(&mut rand::rng());

        let dump = maze.log();
        let lines: Vec<&str> = dump.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "# ###");
        assert_eq!(lines[4], "### #");
    }

    #[test]
    fn test_log_with_player_marks_start_end_and_player() {
        let mut maze = Maze::new(5, 5);
        maze.generate(&mut StdRng::seed_from_u64(3));

        let dump = maze.log_with_player(Position { row: 1, column: 1 });
        let lines: Vec<&str> = dump.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|line| line.chars().count() == 5));
        assert_eq!(lines[0].chars().nth(0), Some('#'));
        assert_eq!(lines[0].chars().nth(1), Some('S'));
        assert_eq!(lines[1].chars().nth(1), Some('P'));
        assert_eq!(lines[4].chars().nth(3), Some('E'));
    }
}
