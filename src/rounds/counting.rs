//! Counting rounds: count the toys, pick the number among three choices

use crate::core::glyphs::TOYS;
use crate::core::{Glyph, ItemId, Position};
use crate::rounds::bands::{Band, COUNTING_TARGET};
use crate::rounds::random::{coin, pick, shuffle, RandomSource};
use serde::Serialize;
use smallvec::{smallvec, SmallVec};

/// Smallest answer the choice buttons may show
pub const ANSWER_MIN: u32 = 1;
/// Largest answer the choice buttons may show
pub const ANSWER_MAX: u32 = 10;

/// Horizontal toy placement, in percent of the play field
pub const TOY_X: Band = Band::new(15, 85);
/// Vertical toy placement; the bottom of the field holds the choice buttons
pub const TOY_Y: Band = Band::new(10, 70);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toy {
    pub id: ItemId,
    pub glyph: Glyph,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountingRound {
    pub round_number: u32,
    pub target_count: u32,
    /// Three distinct answers in display order, one equal to `target_count`
    pub choices: SmallVec<[u32; 3]>,
    pub toys: Vec<Toy>,
}

impl CountingRound {
    pub fn is_choice(&self, value: u32) -> bool {
        self.choices.contains(&value)
    }
}

pub fn generate<S: RandomSource + ?Sized>(round_number: u32, src: &mut S) -> CountingRound {
    let target_count = COUNTING_TARGET.for_round(round_number).draw(src);

    let toys = (0..target_count)
        .map(|i| {
            let glyph = pick(src, &TOYS);
            let x = TOY_X.draw(src) as u8;
            let y = TOY_Y.draw(src) as u8;
            Toy {
                id: ItemId::new(i),
                glyph,
                position: Position { x, y },
            }
        })
        .collect();

    let mut choices = distractor_choices(target_count, src);
    shuffle(src, &mut choices);

    CountingRound {
        round_number,
        target_count,
        choices,
        toys,
    }
}

/// Build the unshuffled choice set: the true count first, then two wrong values
///
/// A wrong value is `count +/- 1` or `count +/- 2`. A value below
/// [`ANSWER_MIN`] is replaced by `count + 2`, then a value above
/// [`ANSWER_MAX`] by `count - 2`. For counts far outside the counting bands
/// these substitutions can repeat values forever, so `count` must lie in
/// `0..=11`.
pub(crate) fn distractor_choices<S: RandomSource + ?Sized>(
    count: u32,
    src: &mut S,
) -> SmallVec<[u32; 3]> {
    let mut choices: SmallVec<[u32; 3]> = smallvec![count];
    let count = i64::from(count);

    while choices.len() < 3 {
        let up = coin(src);
        let magnitude = i64::from(src.draw(1, 2));
        let mut wrong = if up { count + magnitude } else { count - magnitude };
        if wrong < i64::from(ANSWER_MIN) {
            wrong = count + 2;
        }
        if wrong > i64::from(ANSWER_MAX) {
            wrong = count - 2;
        }
        // Both substitutions move away from `count`, never below zero
        let wrong = wrong as u32;
        if !choices.contains(&wrong) {
            choices.push(wrong);
        }
    }

    choices
}
