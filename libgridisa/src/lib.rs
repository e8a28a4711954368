pub mod address;
pub mod assembler;
pub mod instruction;
pub mod program;

pub type Word = u16;
pub type Byte = u8;

pub const BYTES_PER_WORD: usize = 2;

/// Width and height of the square memory grid.
pub const GRID_SIZE: usize = 64;
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Mask that keeps a coordinate inside the grid.
pub const COORD_MASK: u8 = (GRID_SIZE - 1) as u8;

pub const PC_LOW_INDEX: usize = 0o7777;
pub const PC_HIGH_INDEX: usize = 0o7776;

/// Splits a word into its `[low, high]` bytes, the order the PC cells store it in.
pub fn word_to_bytes(word: Word) -> [Byte; BYTES_PER_WORD] {
    [(word & 0x00FF) as u8, ((word & 0xFF00) >> 8) as u8]
}

pub fn bytes_to_word(bytes: [Byte; BYTES_PER_WORD]) -> Word {
    (bytes[1] as u16) << 8 | (bytes[0] as u16)
}
