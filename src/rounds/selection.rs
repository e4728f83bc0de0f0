//! Selection ("balloons") rounds: grab exactly N balls, then check

use crate::core::glyphs::BALLS;
use crate::core::{Glyph, ItemId};
use crate::rounds::bands::SELECTION_TARGET;
use crate::rounds::random::{pick, RandomSource};
use serde::Serialize;

/// Minimum number of balls shown beyond the target
pub const MIN_EXTRA_BALLS: u32 = 2;
/// Maximum number of balls shown beyond the target
pub const MAX_EXTRA_BALLS: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ball {
    pub id: ItemId,
    pub glyph: Glyph,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionRound {
    pub round_number: u32,
    pub target_count: u32,
    pub balls: Vec<Ball>,
}

impl SelectionRound {
    pub fn has_ball(&self, id: ItemId) -> bool {
        self.balls.iter().any(|b| b.id == id)
    }
}

pub fn generate<S: RandomSource + ?Sized>(round_number: u32, src: &mut S) -> SelectionRound {
    let target_count = SELECTION_TARGET.for_round(round_number).draw(src);
    let total = target_count + MIN_EXTRA_BALLS + src.draw(0, MAX_EXTRA_BALLS - MIN_EXTRA_BALLS);

    let balls = (0..total)
        .map(|i| Ball {
            id: ItemId::new(i),
            glyph: pick(src, &BALLS),
        })
        .collect();

    SelectionRound {
        round_number,
        target_count,
        balls,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rounds::random::ScriptedSource;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    #[test]
    fn test_scripted_round() {
        // target 4 in the mid band, 0 extra -> 6 balls
        let mut src = ScriptedSource::new([4, 0, 0, 1, 2, 3, 4, 5]);
        let round = generate(3, &mut src);
        assert_eq!(round.target_count, 4);
        assert_eq!(round.balls.len(), 6);
        assert_eq!(round.balls[5].glyph, BALLS[5]);
        assert!(round.has_ball(ItemId::new(5)));
        assert!(!round.has_ball(ItemId::new(6)));
    }

    #[test]
    fn test_always_more_balls_than_target() {
        let mut rng = ChaCha12Rng::seed_from_u64(3);
        for round_number in 1..=5 {
            for _ in 0..200 {
                let round = generate(round_number, &mut rng);
                let extra = round.balls.len() as u32 - round.target_count;
                assert!((MIN_EXTRA_BALLS..=MAX_EXTRA_BALLS).contains(&extra));
                assert!(SELECTION_TARGET.for_round(round_number).contains(round.target_count));
            }
        }
    }
}
