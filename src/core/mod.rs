//! Core game types: ids, glyphs, activities and the player profile

pub mod activity;
pub mod glyphs;
pub mod profile;
pub mod types;

pub use activity::Variant;
pub use profile::{DifficultyTier, PlayerProfile, AGE_CHOICES, MAX_NAME_LEN};
pub use types::{ColorTag, Glyph, ItemId, Position, Side};
