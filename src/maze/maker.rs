use std::collections::VecDeque;

use log::debug;
use rand::Rng;

use super::{Cell, Maze, Position};

// Up, right, down, left. Candidates are always inspected in this order, so a
// fixed random sequence reproduces the same maze.
const DIRECTIONS: [(i32, i32); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

impl Maze {
    pub fn generate<R: Rng>(&mut self, rng: &mut R) {
        self.cells.fill(Cell::Wall);

        let entrance = self.entrance();
        self.set(entrance.row as usize, entrance.column as usize, Cell::Start);

        let origin = self.pick_origin(rng);
        self.set(origin.row as usize, origin.column as usize, Cell::Empty);

        // Each lattice cell is pushed at most once, so the stack can never
        // outgrow the lattice.
        let lattice_capacity = ((self.rows - 1) / 2) * ((self.columns - 1) / 2);
        let mut stack: Vec<Position> = Vec::with_capacity(lattice_capacity);
        stack.push(origin);

        while let Some(&Position { row, column }) = stack.last() {
            let mut candidates = [0; 4];
            let mut count = 0;
            for (direction, &(row_step, column_step)) in DIRECTIONS.iter().enumerate() {
                if self.is_uncarved_interior(row + 2 * row_step, column + 2 * column_step) {
                    candidates[count] = direction;
                    count += 1;
                }
            }

            if count == 0 {
                stack.pop();
                continue;
            }

            let (row_step, column_step) = DIRECTIONS[candidates[rng.random_range(0..count)]];

            // Knock through the wall between the current cell and the chosen
            // neighbor, then move on from the neighbor.
            self.set(
                (row + row_step) as usize,
                (column + column_step) as usize,
                Cell::Empty,
            );
            self.set(
                (row + 2 * row_step) as usize,
                (column + 2 * column_step) as usize,
                Cell::Empty,
            );

            stack.push(Position {
                row: row + 2 * row_step,
                column: column + 2 * column_step,
            });
            debug_assert!(
                stack.len() <= lattice_capacity,
                "carve stack exceeded the lattice cell count"
            );
        }

        let exit = self.exit();
        self.set(exit.row as usize, exit.column as usize, Cell::End);
        self.connect_exit();

        self.initialized = true;
        debug!("generated {}x{} maze", self.rows, self.columns);
    }

    fn pick_origin<R: Rng>(&self, rng: &mut R) -> Position {
        let row = loop {
            let candidate = rng.random_range(1..self.rows - 1);
            if candidate % 2 == 1 {
                break candidate;
            }
        };
        let column = loop {
            let candidate = rng.random_range(1..self.columns - 1);
            if candidate % 2 == 1 {
                break candidate;
            }
        };

        Position {
            row: row as i32,
            column: column as i32,
        }
    }

    fn is_uncarved_interior(&self, row: i32, column: i32) -> bool {
        self.is_interior(row, column) && self.at(row as usize, column as usize) == Cell::Wall
    }

    fn is_interior(&self, row: i32, column: i32) -> bool {
        row >= 1 && row < self.rows as i32 - 1 && column >= 1 && column < self.columns as i32 - 1
    }

    // For odd dimensions the cell just inside the exit is a carved room, found
    // immediately. For even dimensions that cell can be a lattice pillar the
    // carve never touches, which would seal the exit off: walk breadth-first
    // through interior walls to the nearest carved cell and punch the path
    // through. Staying inside the interior keeps the border sealed.
    fn connect_exit(&mut self) {
        let exit = self.exit();
        let start = (exit.row as usize, exit.column as usize);

        let mut visited = vec![false; self.rows * self.columns];
        let mut previous: Vec<Option<(usize, usize)>> = vec![None; self.rows * self.columns];
        let mut queue = VecDeque::new();

        visited[self.index(start.0, start.1)] = true;
        queue.push_back(start);

        let mut target = None;
        while let Some((row, column)) = queue.pop_front() {
            if self.at(row, column) == Cell::Empty {
                target = Some((row, column));
                break;
            }

            for &(row_step, column_step) in DIRECTIONS.iter() {
                let neighbor_row = row as i32 + row_step;
                let neighbor_column = column as i32 + column_step;
                if !self.is_interior(neighbor_row, neighbor_column) {
                    continue;
                }

                let neighbor = (neighbor_row as usize, neighbor_column as usize);
                let index = self.index(neighbor.0, neighbor.1);
                if !visited[index] {
                    visited[index] = true;
                    previous[index] = Some((row, column));
                    queue.push_back(neighbor);
                }
            }
        }

        // Carve back from the found cell to the exit. The endpoints keep
        // their own values, so only the walls strictly between them open up.
        let mut current =
            target.expect("carved interior should always be reachable from the exit");
        while let Some(step) = previous[self.index(current.0, current.1)] {
            if step == start {
                break;
            }
            self.set(step.0, step.1, Cell::Empty);
            current = step;
        }
    }
}
