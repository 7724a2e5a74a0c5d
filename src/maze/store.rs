use log::warn;

use super::{Cell, Maze};

// Byte-addressable persistent storage, as exposed by an EEPROM or a reserved
// flash page. The engine trusts the host to size the region correctly.
pub trait Store {
    fn read(&self, offset: usize) -> u8;
    fn write(&mut self, offset: usize, value: u8);
}

#[derive(Clone, Debug)]
pub struct MemoryStore {
    bytes: Vec<u8>,
}

impl MemoryStore {
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
        }
    }
}

impl Store for MemoryStore {
    fn read(&self, offset: usize) -> u8 {
        self.bytes[offset]
    }

    fn write(&mut self, offset: usize, value: u8) {
        self.bytes[offset] = value;
    }
}

impl Maze {
    pub fn save<S: Store>(&self, store: &mut S, base_offset: usize) {
        let mut offset = base_offset;
        for &cell in self.cells.iter() {
            store.write(offset, cell as u8);
            offset += 1;
        }
        store.write(offset, self.checksum());
    }

    pub fn load<S: Store>(&mut self, store: &mut S, base_offset: usize) -> bool {
        self.initialized = false;

        let mut offset = base_offset;
        let mut layout_ok = true;
        for index in 0..self.cells.len() {
            let byte = store.read(offset);
            offset += 1;

            match Cell::from_repr(byte) {
                Some(cell) => self.cells[index] = cell,
                None => {
                    // An unknown value means the region holds something other
                    // than a maze saved with this layout.
                    layout_ok = false;
                    self.cells[index] = Cell::Wall;
                }
            }
        }

        let stored = store.read(offset);
        let computed = self.checksum();
        if layout_ok && stored == computed {
            self.initialized = true;
            true
        } else {
            // The buffer keeps whatever was read; the caller is expected to
            // regenerate.
            warn!("no valid saved maze: stored checksum {stored:#04x}, computed {computed:#04x}");
            false
        }
    }

    pub fn persisted_size(&self) -> usize {
        self.rows * self.columns + 1
    }

    fn checksum(&self) -> u8 {
        self.cells
            .iter()
            .fold(0, |checksum, &cell| checksum ^ cell as u8)
    }
}
