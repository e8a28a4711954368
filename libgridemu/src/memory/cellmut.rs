use std::ops::{Deref, DerefMut};

use libgridisa::address::Address;

use super::Memory;

/// Mutable view of a single cell's byte. The byte is encoded back into the grid once the
/// view is dropped, so it behaves like a plain `&mut u8` upon dereference.
pub struct CellMut<'a> {
    memory: &'a mut Memory,
    addr: Address,
    value: u8,
    original_value: u8,
}

impl<'a> CellMut<'a> {
    pub(super) fn new(memory: &'a mut Memory, addr: Address) -> Self {
        let value = memory.read(addr);

        Self {
            memory,
            addr,
            value,
            original_value: value,
        }
    }
}

impl Deref for CellMut<'_> {
    type Target = u8;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl DerefMut for CellMut<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.value
    }
}

impl Drop for CellMut<'_> {
    fn drop(&mut self) {
        // Only record a patch if the value was actually changed.
        if self.value != self.original_value {
            self.memory.store(self.addr, self.value);
        }
    }
}
