//! Engine configuration
//!
//! Defaults reproduce the shipped games: five rounds, a 1.5s celebration,
//! a 1.0s "try again", a 0.6s shake for a mistapped doll, and unlimited
//! attempts per round.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Rounds per session
    pub total_rounds: u32,
    /// How long the "correct" celebration lasts before the next round
    pub correct_feedback_ms: u64,
    /// How long the "try again" signal blocks further answers
    pub wrong_feedback_ms: u64,
    /// How long a mistapped sequencing item shakes
    pub mistap_feedback_ms: u64,
    /// How long the mascot speaks after a correct answer
    pub speaking_ms: u64,
    /// Wrong answers allowed per round before it is forfeited (None = unlimited)
    pub max_attempts_per_round: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            total_rounds: 5,
            correct_feedback_ms: 1500,
            wrong_feedback_ms: 1000,
            mistap_feedback_ms: 600,
            speaking_ms: 1200,
            max_attempts_per_round: None,
        }
    }
}

impl EngineConfig {
    /// Load a config from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&text)?;
        Ok(config.normalized())
    }

    /// Raise round and attempt counts below one to one
    pub fn normalized(self) -> Self {
        let total_rounds = self.total_rounds;
        let max_attempts = self.max_attempts_per_round;
        self.with_total_rounds(total_rounds)
            .with_max_attempts(max_attempts)
    }

    pub fn with_total_rounds(mut self, total_rounds: u32) -> Self {
        self.total_rounds = total_rounds.max(1);
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts_per_round = max_attempts.map(|n| n.max(1));
        self
    }

    pub fn with_feedback_ms(mut self, correct: u64, wrong: u64, mistap: u64) -> Self {
        self.correct_feedback_ms = correct;
        self.wrong_feedback_ms = wrong;
        self.mistap_feedback_ms = mistap;
        self
    }

    pub fn correct_feedback(&self) -> Duration {
        Duration::from_millis(self.correct_feedback_ms)
    }

    pub fn wrong_feedback(&self) -> Duration {
        Duration::from_millis(self.wrong_feedback_ms)
    }

    pub fn mistap_feedback(&self) -> Duration {
        Duration::from_millis(self.mistap_feedback_ms)
    }

    pub fn speaking(&self) -> Duration {
        Duration::from_millis(self.speaking_ms)
    }
}
