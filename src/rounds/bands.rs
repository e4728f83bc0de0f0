//! Difficulty banding by round number
//!
//! Rounds 1-2 draw from the easy band, rounds 3-4 from the mid band, and
//! round 5 onwards from the hard band.

use crate::rounds::random::RandomSource;

/// Inclusive range for the primary quantity of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub min: u32,
    pub max: u32,
}

impl Band {
    pub const fn new(min: u32, max: u32) -> Self {
        Band { min, max }
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn draw<S: RandomSource + ?Sized>(&self, src: &mut S) -> u32 {
        src.draw(self.min, self.max)
    }
}

/// Easy / mid / hard bands for one activity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyBands {
    pub easy: Band,
    pub mid: Band,
    pub hard: Band,
}

impl DifficultyBands {
    pub const fn new(easy: (u32, u32), mid: (u32, u32), hard: (u32, u32)) -> Self {
        DifficultyBands {
            easy: Band::new(easy.0, easy.1),
            mid: Band::new(mid.0, mid.1),
            hard: Band::new(hard.0, hard.1),
        }
    }

    pub fn for_round(&self, round_number: u32) -> Band {
        match round_number {
            0..=2 => self.easy,
            3 | 4 => self.mid,
            _ => self.hard,
        }
    }
}

/// Number of toys on the counting field
pub const COUNTING_TARGET: DifficultyBands = DifficultyBands::new((2, 4), (3, 6), (5, 8));

/// Number of balls the player is asked to grab
pub const SELECTION_TARGET: DifficultyBands = DifficultyBands::new((1, 3), (3, 5), (4, 7));

/// Size of each comparison group
pub const COMPARISON_COUNT: DifficultyBands = DifficultyBands::new((1, 4), (2, 6), (3, 8));

/// Longest sequence the sequencing activity ever asks for
pub const MAX_SEQUENCE_LENGTH: u32 = 5;

/// Sequence length: 3, 3, 4, 4, 5 for rounds 1-5, capped at 5
pub fn sequence_length(round_number: u32) -> u32 {
    (3 + round_number.saturating_sub(1) / 2).min(MAX_SEQUENCE_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_selection() {
        assert_eq!(COUNTING_TARGET.for_round(1), Band::new(2, 4));
        assert_eq!(COUNTING_TARGET.for_round(2), Band::new(2, 4));
        assert_eq!(COUNTING_TARGET.for_round(3), Band::new(3, 6));
        assert_eq!(COUNTING_TARGET.for_round(4), Band::new(3, 6));
        assert_eq!(COUNTING_TARGET.for_round(5), Band::new(5, 8));
        assert_eq!(COUNTING_TARGET.for_round(9), Band::new(5, 8));
    }

    #[test]
    fn test_sequence_length() {
        let lengths: Vec<u32> = (1..=7).map(sequence_length).collect();
        assert_eq!(lengths, vec![3, 3, 4, 4, 5, 5, 5]);
    }

    #[test]
    fn test_band_contains() {
        let band = SELECTION_TARGET.for_round(3);
        assert!(band.contains(3));
        assert!(band.contains(5));
        assert!(!band.contains(6));
    }
}
