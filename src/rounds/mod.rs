//! Round generation
//!
//! A [`RoundSpec`] is the immutable description of one puzzle: what to draw
//! and what the single correct answer is. Each variant has its own generator
//! module; they share the banding table in [`bands`] and the resampling
//! helpers in [`random`].

pub mod bands;
pub mod comparison;
pub mod counting;
pub mod random;
pub mod selection;
pub mod sequencing;

pub use comparison::{ComparisonRound, Group};
pub use counting::{CountingRound, Toy};
pub use random::{RandomSource, ScriptedSource};
pub use selection::{Ball, SelectionRound};
pub use sequencing::{Doll, SequencingRound};

use crate::core::{Glyph, ItemId, Side, Variant};
use serde::Serialize;

/// The unique correct answer of a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Solution {
    /// Counting: the number to pick. Selection: how many items to select.
    Count(u32),
    /// Comparison: the side with more animals
    Side(Side),
    /// Sequencing: ordinals in tap order
    Order(Vec<u8>),
}

/// One drawable item, independent of variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayItem {
    pub id: ItemId,
    pub glyph: Glyph,
}

/// Fully generated round, polymorphic over the variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "variant", rename_all = "lowercase")]
pub enum RoundSpec {
    Counting(CountingRound),
    Selection(SelectionRound),
    Comparison(ComparisonRound),
    Sequencing(SequencingRound),
}

impl RoundSpec {
    pub fn variant(&self) -> Variant {
        match self {
            RoundSpec::Counting(_) => Variant::Counting,
            RoundSpec::Selection(_) => Variant::Selection,
            RoundSpec::Comparison(_) => Variant::Comparison,
            RoundSpec::Sequencing(_) => Variant::Sequencing,
        }
    }

    pub fn round_number(&self) -> u32 {
        match self {
            RoundSpec::Counting(r) => r.round_number,
            RoundSpec::Selection(r) => r.round_number,
            RoundSpec::Comparison(r) => r.round_number,
            RoundSpec::Sequencing(r) => r.round_number,
        }
    }

    pub fn solution(&self) -> Solution {
        match self {
            RoundSpec::Counting(r) => Solution::Count(r.target_count),
            RoundSpec::Selection(r) => Solution::Count(r.target_count),
            RoundSpec::Comparison(r) => Solution::Side(r.correct_side),
            RoundSpec::Sequencing(r) => Solution::Order(r.correct_order()),
        }
    }

    /// Items in display order
    ///
    /// Comparison rounds list group A's animals followed by group B's; those
    /// items are not individually tappable.
    pub fn display_items(&self) -> Vec<DisplayItem> {
        match self {
            RoundSpec::Counting(r) => r
                .toys
                .iter()
                .map(|t| DisplayItem { id: t.id, glyph: t.glyph })
                .collect(),
            RoundSpec::Selection(r) => r
                .balls
                .iter()
                .map(|b| DisplayItem { id: b.id, glyph: b.glyph })
                .collect(),
            RoundSpec::Comparison(r) => {
                let a = std::iter::repeat(r.group_a.glyph).take(r.group_a.count as usize);
                let b = std::iter::repeat(r.group_b.glyph).take(r.group_b.count as usize);
                a.chain(b)
                    .enumerate()
                    .map(|(i, glyph)| DisplayItem {
                        id: ItemId::new(i as u32),
                        glyph,
                    })
                    .collect()
            }
            RoundSpec::Sequencing(r) => r
                .dolls
                .iter()
                .map(|d| DisplayItem { id: d.id, glyph: d.glyph })
                .collect(),
        }
    }

    /// Whether a tap on `id` refers to an item the player can interact with
    pub fn has_item(&self, id: ItemId) -> bool {
        match self {
            RoundSpec::Counting(r) => r.toys.iter().any(|t| t.id == id),
            RoundSpec::Selection(r) => r.has_ball(id),
            RoundSpec::Comparison(_) => false,
            RoundSpec::Sequencing(r) => r.doll(id).is_some(),
        }
    }
}

/// Generate a fresh round of `variant` for `round_number`
pub fn generate_round<S: RandomSource + ?Sized>(
    variant: Variant,
    round_number: u32,
    src: &mut S,
) -> RoundSpec {
    match variant {
        Variant::Counting => RoundSpec::Counting(counting::generate(round_number, src)),
        Variant::Selection => RoundSpec::Selection(selection::generate(round_number, src)),
        Variant::Comparison => RoundSpec::Comparison(comparison::generate(round_number, src)),
        Variant::Sequencing => RoundSpec::Sequencing(sequencing::generate(round_number, src)),
    }
}
