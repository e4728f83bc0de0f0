//! Activity catalog
//!
//! Each activity on the selection screen maps to one game variant. The ids
//! are the ones the menu hands back when a card is tapped.

use crate::core::glyphs::{ANIMALS, BALLS, DOLLS, TOYS};
use crate::core::types::Glyph;
use crate::{GameError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The four puzzle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// "How many toys are there?" - pick the count among three options
    Counting,
    /// "Grab N balls!" - select exactly N items, then check
    Selection,
    /// "Which has more?" - pick the larger of two animal groups
    Comparison,
    /// "Line them up!" - tap items in ordinal order 1, 2, 3, ...
    Sequencing,
}

impl Variant {
    /// Variants in menu order
    pub const ALL: [Variant; 4] = [
        Variant::Counting,
        Variant::Selection,
        Variant::Sequencing,
        Variant::Comparison,
    ];

    /// Activity id used by the selection menu
    pub fn activity_id(self) -> &'static str {
        match self {
            Variant::Counting => "counting",
            Variant::Selection => "balloons",
            Variant::Comparison => "compare",
            Variant::Sequencing => "sequence",
        }
    }

    /// Look up a variant by activity id, `None` if the id is unknown
    pub fn from_activity_id(id: &str) -> Option<Variant> {
        Variant::ALL
            .iter()
            .copied()
            .find(|v| v.activity_id() == id)
    }

    pub fn title(self) -> &'static str {
        match self {
            Variant::Counting => "Count!",
            Variant::Selection => "Grab!",
            Variant::Comparison => "Which has more?",
            Variant::Sequencing => "In a row!",
        }
    }

    /// Three glyphs shown bouncing on the activity card
    pub fn preview(self) -> [Glyph; 3] {
        match self {
            Variant::Counting => [TOYS[0], TOYS[1], TOYS[4]],
            Variant::Selection => [BALLS[0], BALLS[1], BALLS[9]],
            Variant::Comparison => [ANIMALS[0], ANIMALS[1], ANIMALS[7]],
            Variant::Sequencing => [DOLLS[0], DOLLS[5], DOLLS[7]],
        }
    }

    /// Question the mascot asks at the start of every round
    pub fn prompt(self) -> &'static str {
        match self {
            Variant::Counting => "How many toys are there?",
            Variant::Selection => "Grab the balls!",
            Variant::Comparison => "Which group has more?",
            Variant::Sequencing => "Line them up! Tap 1, then 2, then 3...",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.activity_id())
    }
}

impl FromStr for Variant {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let id = s.trim().to_lowercase();
        // Accept the variant names as well as the menu ids
        let variant = match id.as_str() {
            "selection" => Some(Variant::Selection),
            "comparison" => Some(Variant::Comparison),
            "sequencing" => Some(Variant::Sequencing),
            other => Variant::from_activity_id(other),
        };
        variant.ok_or_else(|| GameError::UnknownActivity(s.to_string()))
    }
}
