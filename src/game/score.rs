//! Score tracking and star rating

use serde::Serialize;
use std::fmt;

/// Star rating shown on the completion screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Stars {
    One = 1,
    Two = 2,
    Three = 3,
}

impl Stars {
    pub fn count(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Stars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let earned = self.count() as usize;
        write!(f, "{}{}", "★".repeat(earned), "☆".repeat(3 - earned))
    }
}

/// Map a final score to stars: 4+ is three, 2+ is two, anything else one
///
/// The thresholds are absolute and do not scale with the number of rounds.
pub fn stars_for(score: u32) -> Stars {
    if score >= 4 {
        Stars::Three
    } else if score >= 2 {
        Stars::Two
    } else {
        Stars::One
    }
}

/// One point per correct round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreTracker {
    score: u32,
    total_rounds: u32,
}

impl ScoreTracker {
    pub fn new(total_rounds: u32) -> Self {
        ScoreTracker {
            score: 0,
            total_rounds,
        }
    }

    pub fn record_correct(&mut self) {
        self.score = (self.score + 1).min(self.total_rounds);
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    pub fn stars(&self) -> Stars {
        stars_for(self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars_for_every_score() {
        let stars: Vec<u8> = (0..=5).map(|s| stars_for(s).count()).collect();
        assert_eq!(stars, vec![1, 1, 2, 2, 3, 3]);
    }

    #[test]
    fn test_stars_monotonic() {
        for score in 0..10 {
            assert!(stars_for(score) <= stars_for(score + 1));
        }
    }

    #[test]
    fn test_tracker_caps_at_total() {
        let mut tracker = ScoreTracker::new(5);
        for _ in 0..7 {
            tracker.record_correct();
        }
        assert_eq!(tracker.score(), 5);
        assert_eq!(tracker.stars(), Stars::Three);
    }

    #[test]
    fn test_display() {
        assert_eq!(Stars::Two.to_string(), "★★☆");
    }
}
