//! Per-country bar colours.
//!
//! Well-known countries get a fixed colour; everything else is coloured by a
//! hash of its name.  The hash is FNV-1a rather than `std`'s randomly seeded
//! hasher so a name maps to the same colour in every run.

use ratatui::style::Color;

const FIXED: &[(&str, (u8, u8, u8))] = &[
    ("China", (0x3b, 0x82, 0xf6)),
    ("India", (0x60, 0xa5, 0xfa)),
    ("United States", (0x93, 0xc5, 0xfd)),
    ("Indonesia", (0xbf, 0xdb, 0xfe)),
    ("Pakistan", (0xf8, 0x71, 0x71)),
    ("Brazil", (0x25, 0x63, 0xeb)),
    ("Nigeria", (0xc0, 0x84, 0xfc)),
    ("Bangladesh", (0x4a, 0xde, 0x80)),
    ("Russia", (0xef, 0x44, 0x44)),
    ("Mexico", (0xec, 0x48, 0x99)),
    ("Japan", (0x63, 0x66, 0xf1)),
    ("Ethiopia", (0x22, 0xc5, 0x5e)),
    ("Philippines", (0xa8, 0x55, 0xf7)),
    ("Egypt", (0xea, 0xb3, 0x08)),
    ("Vietnam", (0x16, 0xa3, 0x4a)),
    ("Thailand", (0x14, 0xb8, 0xa6)),
    ("Germany", (0x6b, 0x72, 0x80)),
    ("Turkey", (0xdc, 0x26, 0x26)),
    ("France", (0x93, 0x33, 0xea)),
    ("United Kingdom", (0xfc, 0xa5, 0xa5)),
    ("Italy", (0x86, 0xef, 0xac)),
    ("Ukraine", (0x1d, 0x4e, 0xd8)),
];

/// Darkest value any hashed channel may take, so bars never vanish into
/// a dark terminal background.
const CHANNEL_FLOOR: u8 = 64;

/// Colour for a country's bar.
pub fn country_color(name: &str) -> Color {
    let (r, g, b) = FIXED
        .iter()
        .find(|(known, _)| *known == name)
        .map(|&(_, rgb)| rgb)
        .unwrap_or_else(|| hashed_rgb(name));
    Color::Rgb(r, g, b)
}

fn hashed_rgb(name: &str) -> (u8, u8, u8) {
    let [_, r, g, b] = fnv1a(name.as_bytes()).to_be_bytes();
    let span = u8::MAX - CHANNEL_FLOOR + 1;
    (
        CHANNEL_FLOOR + r % span,
        CHANNEL_FLOOR + g % span,
        CHANNEL_FLOOR + b % span,
    )
}

fn fnv1a(bytes: &[u8]) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for &byte in bytes {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}
