use super::{decode, encode, Color};

#[test]
fn every_byte_survives_round_trip() {
    for byte in 0..=u8::MAX {
        assert_eq!(decode(encode(byte)), byte, "byte {:#010b}", byte);
    }
}

#[test]
fn channel_layout() {
    let cases = [
        (0x00, [0x00, 0x00, 0x00]),
        (0b0000_0001, [0x00, 0x00, 0x3F]),
        (0b0000_0010, [0x00, 0x00, 0xC0]),
        (0b0000_0011, [0x00, 0x00, 0xFF]),
        (0b0000_0100, [0x00, 0x20, 0x00]),
        (0b0001_1100, [0x00, 0xE0, 0x00]),
        (0b0010_0000, [0x20, 0x00, 0x00]),
        (0b1110_0000, [0xE0, 0x00, 0x00]),
        (0xFF, [0xE0, 0xE0, 0xFF]),
    ];

    for (byte, [r, g, b]) in cases {
        assert_eq!(encode(byte), Color { r, g, b, a: 0xFF }, "byte {:#04x}", byte);
    }
}

#[test]
fn blank_is_opaque_black() {
    assert_eq!(Color::BLANK.rgba(), [0, 0, 0, 0xFF]);
    assert_eq!(Color::default(), Color::BLANK);
}

#[test]
fn foreign_colors_only_keep_significant_bits() {
    let noise = Color {
        r: 0x1F,
        g: 0x1F,
        b: 0x9F,
        a: 0x00,
    };
    assert_eq!(decode(noise), 0);

    let saturated = Color {
        r: 0xFF,
        g: 0xFF,
        b: 0xFF,
        a: 0xFF,
    };
    assert_eq!(decode(saturated), 0xFF);
}
