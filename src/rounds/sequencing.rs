//! Sequencing rounds: tap the dolls in order 1, 2, 3, ...

use crate::core::glyphs::{DOLLS, DOLL_COLORS};
use crate::core::{ColorTag, Glyph, ItemId};
use crate::rounds::bands::sequence_length;
use crate::rounds::random::{shuffle, RandomSource};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Doll {
    pub id: ItemId,
    /// Position of this doll in the correct order, starting at 1
    pub ordinal: u8,
    pub glyph: Glyph,
    pub color: ColorTag,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequencingRound {
    pub round_number: u32,
    pub item_count: u8,
    /// Dolls in display (shuffled) order
    pub dolls: Vec<Doll>,
}

impl SequencingRound {
    /// Always `[1, 2, ..., item_count]`
    pub fn correct_order(&self) -> Vec<u8> {
        (1..=self.item_count).collect()
    }

    pub fn doll(&self, id: ItemId) -> Option<&Doll> {
        self.dolls.iter().find(|d| d.id == id)
    }
}

pub fn generate<S: RandomSource + ?Sized>(round_number: u32, src: &mut S) -> SequencingRound {
    let item_count = sequence_length(round_number) as u8;
    let mut ordinals: Vec<u8> = (1..=item_count).collect();
    shuffle(src, &mut ordinals);

    let dolls = ordinals
        .into_iter()
        .enumerate()
        .map(|(i, ordinal)| {
            let slot = usize::from(ordinal - 1);
            Doll {
                id: ItemId::new(i as u32),
                ordinal,
                glyph: DOLLS[slot % DOLLS.len()],
                color: DOLL_COLORS[slot % DOLL_COLORS.len()],
            }
        })
        .collect();

    SequencingRound {
        round_number,
        item_count,
        dolls,
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
        // [1, 2, 3]: i=2 swaps with 0 -> [3, 2, 1]; i=1 swaps with 0 -> [2, 3, 1]
        let mut src = ScriptedSource::new([0, 0]);
        let round = generate(1, &mut src);
        let ordinals: Vec<u8> = round.dolls.iter().map(|d| d.ordinal).collect();
        assert_eq!(ordinals, vec![2, 3, 1]);
        assert_eq!(round.correct_order(), vec![1, 2, 3]);
        // Glyph follows the ordinal, not the display slot
        assert_eq!(round.dolls[2].glyph, DOLLS[0]);
        assert_eq!(round.dolls[0].color, DOLL_COLORS[1]);
        assert_eq!(round.doll(ItemId::new(1)).map(|d| d.ordinal), Some(3));
    }

    #[test]
    fn test_ordinals_are_a_permutation() {
        let mut rng = ChaCha12Rng::seed_from_u64(5);
        for round_number in 1..=5 {
            for _ in 0..100 {
                let round = generate(round_number, &mut rng);
                assert_eq!(u32::from(round.item_count), sequence_length(round_number));
                let mut ordinals: Vec<u8> = round.dolls.iter().map(|d| d.ordinal).collect();
                ordinals.sort_unstable();
                assert_eq!(ordinals, round.correct_order());
            }
        }
    }
}
