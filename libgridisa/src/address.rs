use std::fmt::Display;

use crate::{CELL_COUNT, COORD_MASK, GRID_SIZE, PC_HIGH_INDEX, PC_LOW_INDEX};

/// A cell coordinate on the memory grid. Both coordinates are always in `[0, GRID_SIZE)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address {
    x: u8,
    y: u8,
}

impl Address {
    pub const PC_LOW: Address = Address::from_index(PC_LOW_INDEX);
    pub const PC_HIGH: Address = Address::from_index(PC_HIGH_INDEX);

    /// Builds an address from coordinates, masking them into the grid.
    pub const fn new(x: u8, y: u8) -> Self {
        Self {
            x: x & COORD_MASK,
            y: y & COORD_MASK,
        }
    }

    /// Builds an address from coordinates, or `None` if either one is off the grid.
    pub fn checked(x: usize, y: usize) -> Option<Self> {
        (x < GRID_SIZE && y < GRID_SIZE).then(|| Self::new(x as u8, y as u8))
    }

    /// Raster order index, wrapped into the grid.
    pub const fn from_index(index: usize) -> Self {
        let index = index % CELL_COUNT;

        Self {
            x: (index % GRID_SIZE) as u8,
            y: (index / GRID_SIZE) as u8,
        }
    }

    pub const fn x(&self) -> u8 {
        self.x
    }

    pub const fn y(&self) -> u8 {
        self.y
    }

    pub const fn index(&self) -> usize {
        self.y as usize * GRID_SIZE + self.x as usize
    }

    /// The cell before this one in raster order. Column 0 wraps to the last column of the
    /// previous row, and the first cell wraps to the last cell of the grid.
    pub const fn previous(&self) -> Self {
        Self::from_index(self.index() + CELL_COUNT - 1)
    }

    pub const fn is_pc_cell(&self) -> bool {
        let index = self.index();
        index == PC_LOW_INDEX || index == PC_HIGH_INDEX
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:03o},{:03o}", self.x, self.y)
    }
}

/// An indirect operand. The target's x coordinate lives in `x_cell` and its y coordinate in
/// `y_cell`, which is the cell right before the pointer's literal address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pointer {
    pub x_cell: Address,
    pub y_cell: Address,
}

impl Pointer {
    pub const fn new(literal: Address) -> Self {
        Self {
            x_cell: literal,
            y_cell: literal.previous(),
        }
    }

    /// Builds the target address out of the two coordinate bytes, masking them into the grid.
    pub const fn target(x: u8, y: u8) -> Address {
        Address::new(x, y)
    }
}

impl Display for Pointer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.x_cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raster_index_round_trip() {
        let addr = Address::from_index(0o0707);

        assert_eq!((addr.x(), addr.y()), (7, 7));
        assert_eq!(addr.index(), 0o0707);
    }

    #[test]
    fn pc_cells_are_the_last_two() {
        assert_eq!((Address::PC_LOW.x(), Address::PC_LOW.y()), (63, 63));
        assert_eq!((Address::PC_HIGH.x(), Address::PC_HIGH.y()), (62, 63));
        assert!(Address::PC_LOW.is_pc_cell());
        assert!(!Address::new(0, 0).is_pc_cell());
    }

    #[test]
    fn previous_wraps_rows_and_grid() {
        assert_eq!(Address::new(0, 5).previous(), Address::new(63, 4));
        assert_eq!(Address::new(3, 5).previous(), Address::new(2, 5));
        assert_eq!(Address::new(0, 0).previous(), Address::PC_LOW);
    }

    #[test]
    fn coordinates_are_masked() {
        assert_eq!(Address::new(64 + 5, 255), Address::new(5, 63));
        assert_eq!(Address::checked(64, 0), None);
        assert_eq!(Address::checked(1, 2), Some(Address::new(1, 2)));
    }

    #[test]
    fn pointer_cells() {
        let ptr = Pointer::new(Address::new(0, 1));

        assert_eq!(ptr.x_cell, Address::new(0, 1));
        assert_eq!(ptr.y_cell, Address::new(63, 0));
    }
}
