//! Bulk memory images, packed row-major into the grid starting at the first cell.

use libgridisa::{address::Address, CELL_COUNT};
use log::debug;
use thiserror::Error;

use crate::memory::Memory;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Invalid hex digits \"{digits}\" for byte {index}")]
    InvalidHex { index: usize, digits: String },

    #[error("Image of {0} bytes doesn't fit into {cells} cells", cells = CELL_COUNT)]
    TooLarge(usize),
}

/// Loads two hex digits per byte. Whitespace is ignored and a trailing single digit makes up a
/// byte of its own. Returns the number of bytes written.
pub fn load_hex(memory: &mut Memory, text: &str) -> Result<usize, LoadError> {
    let digits: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();

    let bytes = digits
        .chunks(2)
        .enumerate()
        .map(|(index, pair)| {
            let pair: String = pair.iter().collect();

            u8::from_str_radix(&pair, 16).map_err(|_| LoadError::InvalidHex {
                index,
                digits: pair,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    load_bytes(memory, &bytes)
}

/// Loads one byte per character, keeping the low 8 bits of its code point. Characters outside
/// the Basic Multilingual Plane still take a single cell rather than one per UTF-16 unit.
pub fn load_text(memory: &mut Memory, text: &str) -> Result<usize, LoadError> {
    let bytes: Vec<u8> = text.chars().map(|c| c as u32 as u8).collect();

    load_bytes(memory, &bytes)
}

pub fn load_bytes(memory: &mut Memory, bytes: &[u8]) -> Result<usize, LoadError> {
    if bytes.len() > CELL_COUNT {
        return Err(LoadError::TooLarge(bytes.len()));
    }

    for (index, byte) in bytes.iter().enumerate() {
        memory.write(Address::from_index(index), *byte);
    }

    debug!("Loaded {} bytes into memory", bytes.len());

    Ok(bytes.len())
}
