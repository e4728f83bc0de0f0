//! Comparison rounds: two animal groups, tap the bigger one

use crate::core::glyphs::{ANIMALS, GROUP_COLORS};
use crate::core::{ColorTag, Glyph, Side};
use crate::rounds::bands::COMPARISON_COUNT;
use crate::rounds::random::{draw_excluding, pick, pick_excluding, RandomSource};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Group {
    pub glyph: Glyph,
    pub count: u32,
    pub color: ColorTag,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRound {
    pub round_number: u32,
    pub group_a: Group,
    pub group_b: Group,
    pub correct_side: Side,
}

impl ComparisonRound {
    pub fn group(&self, side: Side) -> &Group {
        match side {
            Side::A => &self.group_a,
            Side::B => &self.group_b,
        }
    }
}

/// Draw order: glyphs, then counts, then colors
pub fn generate<S: RandomSource + ?Sized>(round_number: u32, src: &mut S) -> ComparisonRound {
    let glyph_a = pick(src, &ANIMALS);
    let glyph_b = pick_excluding(src, &ANIMALS, glyph_a);

    let band = COMPARISON_COUNT.for_round(round_number);
    let count_a = band.draw(src);
    let count_b = draw_excluding(src, band.min, band.max, |c| c == count_a);

    let color_a = pick(src, &GROUP_COLORS);
    let color_b = pick_excluding(src, &GROUP_COLORS, color_a);

    let correct_side = if count_a > count_b { Side::A } else { Side::B };

    ComparisonRound {
        round_number,
        group_a: Group {
            glyph: glyph_a,
            count: count_a,
            color: color_a,
        },
        group_b: Group {
            glyph: glyph_b,
            count: count_b,
            color: color_b,
        },
        correct_side,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rounds::random::ScriptedSource;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    #[test]
    fn test_scripted_round_resamples_collisions() {
        let mut src = ScriptedSource::new([
            2, 2, 5, // glyph A = lion, B collides once, then dog
            3, 3, 1, // counts 3 vs 3 (resampled) vs 1
            0, 0, 0, 4, // color A, B collides twice, then index 4
        ]);
        let round = generate(1, &mut src);
        assert_eq!(round.group_a.glyph, ANIMALS[2]);
        assert_eq!(round.group_b.glyph, ANIMALS[5]);
        assert_eq!(round.group_a.count, 3);
        assert_eq!(round.group_b.count, 1);
        assert_eq!(round.group_a.color, GROUP_COLORS[0]);
        assert_eq!(round.group_b.color, GROUP_COLORS[4]);
        assert_eq!(round.correct_side, Side::A);
        assert!(src.is_exhausted());
    }

    #[test]
    fn test_group_b_larger() {
        let mut src = ScriptedSource::new([0, 1, 3, 8, 0, 1]);
        let round = generate(5, &mut src);
        assert_eq!(round.group_a.count, 3);
        assert_eq!(round.group_b.count, 8);
        assert_eq!(round.correct_side, Side::B);
        assert_eq!(round.group(Side::B).count, 8);
    }

    #[test]
    fn test_seeded_groups_always_differ() {
        let mut rng = ChaCha12Rng::seed_from_u64(11);
        for round_number in 1..=5 {
            for _ in 0..200 {
                let round = generate(round_number, &mut rng);
                assert_ne!(round.group_a.count, round.group_b.count);
                assert_ne!(round.group_a.glyph, round.group_b.glyph);
                assert_ne!(round.group_a.color, round.group_b.color);
                let larger = round.group(round.correct_side).count;
                let smaller = round.group(round.correct_side.other()).count;
                assert!(larger > smaller);
            }
        }
    }
}
