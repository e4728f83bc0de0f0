//! Strongly-typed wrappers for game concepts
//!
//! Item ids, glyphs and color tags are all small values that would otherwise
//! be bare integers or strings. Wrapping them keeps a glyph from being passed
//! where a color is expected.

use serde::Serialize;
use std::fmt;

/// Identifier of one displayed item within a single round
///
/// Ids are only meaningful for the round that produced them; the next round
/// starts numbering from zero again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ItemId(u32);

impl ItemId {
    pub fn new(id: u32) -> Self {
        ItemId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Emoji drawn for an item (toy, ball, animal, doll)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Glyph(&'static str);

impl Glyph {
    pub const fn new(s: &'static str) -> Self {
        Glyph(s)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// CSS-style hex color attached to a comparison group or sequence doll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ColorTag(&'static str);

impl ColorTag {
    pub const fn new(s: &'static str) -> Self {
        ColorTag(s)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the two groups in a comparison round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// Position of a counting toy, in percent of the play field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_roundtrip() {
        let id = ItemId::new(7);
        assert_eq!(id.as_u32(), 7);
        assert_eq!(id.to_string(), "7");
    }

    #[test]
    fn test_side_other() {
        assert_eq!(Side::A.other(), Side::B);
        assert_eq!(Side::B.other(), Side::A);
    }

    #[test]
    fn test_glyph_display() {
        let g = Glyph::new("🧸");
        assert_eq!(g.to_string(), "🧸");
        assert_eq!(ColorTag::new("#ff6b9d").as_str(), "#ff6b9d");
    }
}
