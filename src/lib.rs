pub mod maze;

pub use maze::store::{MemoryStore, Store};
pub use maze::{Cell, Maze, Position};
