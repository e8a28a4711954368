use std::collections::HashMap;

use cellmut::CellMut;
use libgridisa::{address::Address, Word, CELL_COUNT};

use crate::codec::{self, Color};

pub mod cellmut;

#[cfg(test)]
mod tests;

/// New value of a cell written since patches were last popped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPatch {
    pub new_value: u8,
}

impl CellPatch {
    pub fn color(&self) -> Color {
        codec::encode(self.new_value)
    }
}

/// The pixel grid. Cells only hold their encoded color, except for the two program counter
/// cells which are mirrored into a PC register on every write.
pub struct Memory {
    cells: Vec<Color>,
    pc: Word,
    patches: HashMap<Address, CellPatch>,
}

impl Memory {
    pub fn new() -> Self {
        Self {
            cells: vec![Color::BLANK; CELL_COUNT],
            pc: 0,
            patches: HashMap::new(),
        }
    }

    pub fn read(&self, addr: Address) -> u8 {
        if addr == Address::PC_LOW {
            return libgridisa::word_to_bytes(self.pc)[0];
        }

        if addr == Address::PC_HIGH {
            return libgridisa::word_to_bytes(self.pc)[1];
        }

        codec::decode(self.cells[addr.index()])
    }

    pub fn write(&mut self, addr: Address, value: u8) {
        *self.byte_mut(addr) = value;
    }

    pub fn byte_mut(&mut self, addr: Address) -> CellMut {
        CellMut::new(self, addr)
    }

    pub fn color(&self, addr: Address) -> Color {
        self.cells[addr.index()]
    }

    /// Colors in raster order, ready to be blitted onto a display.
    pub fn colors(&self) -> &[Color] {
        &self.cells
    }

    pub fn pc(&self) -> Word {
        self.pc
    }

    /// Writes both PC cells the same way any other write to them would.
    pub fn set_pc(&mut self, pc: Word) {
        let [low, high] = libgridisa::word_to_bytes(pc);

        self.write(Address::PC_LOW, low);
        self.write(Address::PC_HIGH, high);
    }

    /// Blanks every cell, program counter included.
    pub fn clear(&mut self) {
        for index in 0..CELL_COUNT {
            self.write(Address::from_index(index), 0);
        }
    }

    pub fn iter_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        (0..CELL_COUNT).map(|index| self.read(Address::from_index(index)))
    }

    /// Drains the cells written since the last call. Later writes to a cell replace earlier ones.
    pub fn pop_patches(&mut self) -> impl Iterator<Item = (Address, CellPatch)> + '_ {
        self.patches.drain()
    }

    fn store(&mut self, addr: Address, value: u8) {
        let [low, high] = libgridisa::word_to_bytes(self.pc);

        if addr == Address::PC_LOW {
            self.pc = libgridisa::bytes_to_word([value, high]);
        } else if addr == Address::PC_HIGH {
            self.pc = libgridisa::bytes_to_word([low, value]);
        }

        self.cells[addr.index()] = codec::encode(value);
        self.patches.insert(addr, CellPatch { new_value: value });
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
