//! Glyph and color tables for the four activities

use crate::core::types::{ColorTag, Glyph};

/// Toys scattered on the counting field
pub const TOYS: [Glyph; 10] = [
    Glyph::new("🧸"),
    Glyph::new("🚗"),
    Glyph::new("🪀"),
    Glyph::new("🎠"),
    Glyph::new("🎲"),
    Glyph::new("🧩"),
    Glyph::new("🪁"),
    Glyph::new("🎯"),
    Glyph::new("🏎️"),
    Glyph::new("🎪"),
];

/// Balls offered in the selection ("balloons") activity
pub const BALLS: [Glyph; 10] = [
    Glyph::new("⚽"),
    Glyph::new("🏀"),
    Glyph::new("🔴"),
    Glyph::new("🟡"),
    Glyph::new("🟢"),
    Glyph::new("🔵"),
    Glyph::new("🟣"),
    Glyph::new("🟠"),
    Glyph::new("⚾"),
    Glyph::new("🎾"),
];

/// Animals that make up the two comparison groups
pub const ANIMALS: [Glyph; 8] = [
    Glyph::new("🐻"),
    Glyph::new("🐰"),
    Glyph::new("🦁"),
    Glyph::new("🐸"),
    Glyph::new("🐱"),
    Glyph::new("🐶"),
    Glyph::new("🐼"),
    Glyph::new("🦊"),
];

pub const GROUP_COLORS: [ColorTag; 6] = [
    ColorTag::new("#ff6b9d"),
    ColorTag::new("#6c5ce7"),
    ColorTag::new("#00b894"),
    ColorTag::new("#fdcb6e"),
    ColorTag::new("#e17055"),
    ColorTag::new("#0984e3"),
];

/// Dolls lined up in the sequencing activity, indexed by `(ordinal - 1) % len`
pub const DOLLS: [Glyph; 8] = [
    Glyph::new("🎎"),
    Glyph::new("👧"),
    Glyph::new("💃"),
    Glyph::new("🧝‍♀️"),
    Glyph::new("🧚"),
    Glyph::new("🎀"),
    Glyph::new("👸"),
    Glyph::new("🌸"),
];

pub const DOLL_COLORS: [ColorTag; 8] = [
    ColorTag::new("#ff6b9d"),
    ColorTag::new("#c471ed"),
    ColorTag::new("#f7797d"),
    ColorTag::new("#fbc2eb"),
    ColorTag::new("#a18cd1"),
    ColorTag::new("#e8a0bf"),
    ColorTag::new("#ff9a9e"),
    ColorTag::new("#fad0c4"),
];
