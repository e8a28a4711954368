use std::collections::HashMap;

use libgridisa::address::Address;

use crate::codec;

use super::{CellPatch, Memory};

#[test]
fn starts_blank() {
    let memory = Memory::new();

    assert!(memory.iter_bytes().all(|byte| byte == 0));
    assert_eq!(memory.pc(), 0);
    assert_eq!(memory.color(Address::new(10, 10)), codec::Color::BLANK);
}

#[test]
fn write_stores_encoded_color() {
    let mut memory = Memory::new();
    let addr = Address::new(3, 4);

    memory.write(addr, 0xA5);

    assert_eq!(memory.read(addr), 0xA5);
    assert_eq!(memory.color(addr), codec::encode(0xA5));
    assert_eq!(memory.colors()[addr.index()], codec::encode(0xA5));
}

#[test]
fn byte_mut_patches_on_drop() {
    let mut memory = Memory::new();
    let addr = Address::new(1, 1);

    {
        let mut cell = memory.byte_mut(addr);
        *cell = 7;
        *cell += 1;
    }

    assert_eq!(memory.read(addr), 8);
}

#[test]
fn pc_cells_alias_register() {
    let mut memory = Memory::new();

    memory.write(Address::PC_LOW, 0x34);
    memory.write(Address::PC_HIGH, 0x12);
    assert_eq!(memory.pc(), 0x1234);

    memory.set_pc(0xBEEF);
    assert_eq!(memory.read(Address::PC_LOW), 0xEF);
    assert_eq!(memory.read(Address::PC_HIGH), 0xBE);
    assert_eq!(memory.color(Address::PC_LOW), codec::encode(0xEF));
}

#[test]
fn patches_keep_last_write_per_cell() {
    let mut memory = Memory::new();
    let a = Address::new(0, 0);
    let b = Address::new(5, 6);

    memory.write(a, 1);
    memory.write(a, 2);
    memory.write(b, 3);
    // Unchanged value, no patch.
    memory.write(Address::new(9, 9), 0);

    let patches: HashMap<_, _> = memory.pop_patches().collect();

    assert_eq!(
        patches,
        HashMap::from([
            (a, CellPatch { new_value: 2 }),
            (b, CellPatch { new_value: 3 }),
        ])
    );
    assert_eq!(memory.pop_patches().count(), 0);
}

#[test]
fn clear_resets_everything() {
    let mut memory = Memory::new();

    memory.write(Address::new(2, 2), 9);
    memory.set_pc(300);
    memory.clear();

    assert!(memory.iter_bytes().all(|byte| byte == 0));
    assert_eq!(memory.pc(), 0);
}
