//! Byte to pixel color mapping.
//!
//! | byte bit | channel | channel bits set |
//! |----------|---------|------------------|
//! | 7        | red     | 7                |
//! | 6        | red     | 6                |
//! | 5        | red     | 5                |
//! | 4        | green   | 7                |
//! | 3        | green   | 6                |
//! | 2        | green   | 5                |
//! | 1        | blue    | 7, 6             |
//! | 0        | blue    | 5..=0            |
//!
//! Alpha is always opaque. Decoding only looks at red and green bits 7..=5 and blue bits 6 and 5,
//! so every byte survives a round trip while arbitrary colors decode to the nearest byte pattern.

#[cfg(test)]
mod tests;

const HIGH_BITS: u8 = 0b1110_0000;
const GREEN_BITS: u8 = 0b0001_1100;

const BLUE_BIT_0: u8 = 0b0011_1111;
const BLUE_BIT_1: u8 = 0b1100_0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLANK: Color = encode(0);

    pub const fn rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLANK
    }
}

pub const fn encode(byte: u8) -> Color {
    let mut b = 0;

    if byte & 0b01 != 0 {
        b |= BLUE_BIT_0;
    }

    if byte & 0b10 != 0 {
        b |= BLUE_BIT_1;
    }

    Color {
        r: byte & HIGH_BITS,
        g: (byte & GREEN_BITS) << 3,
        b,
        a: u8::MAX,
    }
}

pub const fn decode(color: Color) -> u8 {
    (color.r & HIGH_BITS)
        | ((color.g & HIGH_BITS) >> 3)
        | ((color.b & 0b0010_0000) >> 5)
        | ((color.b & 0b0100_0000) >> 5)
}
