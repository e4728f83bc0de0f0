//! Player profile produced by onboarding

use crate::{GameError, Result};
use serde::Serialize;
use std::fmt;

/// Maximum length of a player name, in characters
pub const MAX_NAME_LEN: usize = 20;

/// Ages offered on the onboarding screen
pub const AGE_CHOICES: [u8; 6] = [3, 4, 5, 6, 7, 8];

/// Difficulty tier derived from the player's age
///
/// The tier is shown to the player as a title. Round generation does not
/// depend on it; difficulty is driven by the round number alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DifficultyTier {
    LittleExplorers,
    YoungMathematicians,
    SuperMathematicians,
}

impl DifficultyTier {
    pub fn for_age(age: u8) -> Self {
        if age <= 4 {
            DifficultyTier::LittleExplorers
        } else if age <= 6 {
            DifficultyTier::YoungMathematicians
        } else {
            DifficultyTier::SuperMathematicians
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DifficultyTier::LittleExplorers => "Little Explorers",
            DifficultyTier::YoungMathematicians => "Young Mathematicians",
            DifficultyTier::SuperMathematicians => "Super Mathematicians",
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Immutable profile created once onboarding completes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerProfile {
    name: String,
    age: u8,
    tier: DifficultyTier,
}

impl PlayerProfile {
    /// Validate onboarding input and build a profile
    ///
    /// The name is trimmed first; it must then be non-empty and at most
    /// [`MAX_NAME_LEN`] characters. The age must be one of [`AGE_CHOICES`].
    pub fn new(name: &str, age: u8) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::InvalidProfile("name must not be empty".to_string()));
        }
        let len = name.chars().count();
        if len > MAX_NAME_LEN {
            return Err(GameError::InvalidProfile(format!(
                "name is {} characters long (max {})",
                len, MAX_NAME_LEN
            )));
        }
        if !AGE_CHOICES.contains(&age) {
            return Err(GameError::InvalidProfile(format!(
                "age {} is not offered (expected one of {:?})",
                age, AGE_CHOICES
            )));
        }

        Ok(PlayerProfile {
            name: name.to_string(),
            age,
            tier: DifficultyTier::for_age(age),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn tier(&self) -> DifficultyTier {
        self.tier
    }
}
