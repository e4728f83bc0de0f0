//! Session controller: onboarding, activity menu, games and completion
//!
//! ```text
//! Onboarding -> ActivitySelection -> Playing(variant) -> Complete -> ActivitySelection ...
//!                      ^                  |
//!                      +-- exit_to_menu --+
//! ```
//!
//! The profile produced by onboarding is kept for the lifetime of the
//! controller and handed unchanged to every game. `exit` drops everything.

use crate::core::{PlayerProfile, Variant};
use crate::game::config::EngineConfig;
use crate::game::engine::{GameEngine, InputEffect, PlayerInput};
use crate::game::logger::{category, GameLogger, VerbosityLevel};
use crate::game::score::{stars_for, Stars};
use crate::rounds::RandomSource;
use crate::{GameError, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use serde::Serialize;
use std::time::Duration;

/// Which screen the player is looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    Onboarding,
    ActivitySelection,
    Playing { variant: Variant },
    Complete {
        variant: Variant,
        score: u32,
        stars: Stars,
    },
    /// The player left for the outer menu
    Exited,
}

/// Builds the random source for each new game
pub type SourceFactory = Box<dyn FnMut(Variant) -> Box<dyn RandomSource + Send> + Send>;

pub struct SessionController {
    screen: Screen,
    profile: Option<PlayerProfile>,
    engine: Option<GameEngine>,
    config: EngineConfig,
    rng: ChaCha12Rng,
    source_factory: Option<SourceFactory>,
    logger: GameLogger,
}

impl SessionController {
    pub fn new() -> Self {
        Self::with_rng(ChaCha12Rng::from_entropy())
    }

    /// Every game's rounds derive from `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha12Rng::seed_from_u64(seed))
    }

    fn with_rng(rng: ChaCha12Rng) -> Self {
        SessionController {
            screen: Screen::Onboarding,
            profile: None,
            engine: None,
            config: EngineConfig::default(),
            rng,
            source_factory: None,
            logger: GameLogger::with_verbosity(VerbosityLevel::Silent),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Settings copied into every game's logger
    pub fn with_logger(mut self, logger: GameLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Replace the seeded RNG with a custom source per game
    pub fn with_source_factory(mut self, factory: SourceFactory) -> Self {
        self.source_factory = Some(factory);
        self
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn profile(&self) -> Option<&PlayerProfile> {
        self.profile.as_ref()
    }

    /// The running or just-finished game
    pub fn engine(&self) -> Option<&GameEngine> {
        self.engine.as_ref()
    }

    pub fn logger(&self) -> &GameLogger {
        &self.logger
    }

    /// Finish onboarding with the player's name and age
    pub fn onboarding_submit(&mut self, name: &str, age: u8) -> Result<&PlayerProfile> {
        if self.screen != Screen::Onboarding {
            return Err(GameError::InvalidAction(format!(
                "onboarding is over (on {:?})",
                self.screen
            )));
        }
        let profile = PlayerProfile::new(name, age)?;
        self.logger.event(
            VerbosityLevel::Normal,
            category::SESSION,
            &format!("Welcome {} ({})", profile.name(), profile.tier()),
        );
        self.screen = Screen::ActivitySelection;
        Ok(self.profile.insert(profile))
    }

    /// Start the activity with menu id `activity_id`
    ///
    /// Unknown ids, or a call from any screen but the menu, change nothing
    /// and return false.
    pub fn select_activity(&mut self, activity_id: &str) -> bool {
        if self.screen != Screen::ActivitySelection {
            return false;
        }
        let Some(variant) = Variant::from_activity_id(activity_id) else {
            return false;
        };

        let source: Box<dyn RandomSource + Send> = match self.source_factory.as_mut() {
            Some(factory) => factory(variant),
            None => Box::new(ChaCha12Rng::seed_from_u64(self.rng.gen())),
        };
        let mut engine = GameEngine::with_source(variant, self.config.clone(), source)
            .with_logger(self.logger.clone());
        if let Some(profile) = &self.profile {
            engine = engine.with_profile(profile.clone());
        }
        self.engine = Some(engine);
        self.screen = Screen::Playing { variant };
        true
    }

    /// Forward an input to the running game
    pub fn handle(&mut self, input: PlayerInput) -> InputEffect {
        let Some(engine) = self.playing_engine() else {
            return InputEffect::Ignored;
        };
        let effect = engine.handle(input);
        self.check_complete();
        effect
    }

    /// Let time pass in the running game
    pub fn advance_time(&mut self, elapsed: Duration) {
        if let Some(engine) = self.playing_engine() {
            engine.advance_time(elapsed);
            self.check_complete();
        }
    }

    /// Time until the running game's next timer
    pub fn next_deadline(&self) -> Option<Duration> {
        match self.screen {
            Screen::Playing { .. } => self.engine.as_ref().and_then(|e| e.next_deadline()),
            _ => None,
        }
    }

    /// Record the final score of the running game and show the completion screen
    pub fn on_game_complete(&mut self, final_score: u32) {
        let Screen::Playing { variant } = self.screen else {
            return;
        };
        let stars = stars_for(final_score);
        self.logger.event(
            VerbosityLevel::Minimal,
            category::SESSION,
            &format!("{} finished: {} {}", variant.title(), final_score, stars),
        );
        self.screen = Screen::Complete {
            variant,
            score: final_score,
            stars,
        };
    }

    /// Leave the completion screen for the menu
    pub fn back_to_activities(&mut self) {
        if matches!(self.screen, Screen::Complete { .. }) {
            self.engine = None;
            self.screen = Screen::ActivitySelection;
        }
    }

    /// Leave the running or finished game for the activity menu
    pub fn exit_to_menu(&mut self) {
        if matches!(self.screen, Screen::Playing { .. } | Screen::Complete { .. }) {
            if let Some(mut engine) = self.engine.take() {
                engine.shutdown();
            }
            self.screen = Screen::ActivitySelection;
        }
    }

    /// Leave for the outer menu, discarding the profile and any game
    pub fn exit(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.shutdown();
        }
        self.profile = None;
        self.screen = Screen::Exited;
    }

    fn playing_engine(&mut self) -> Option<&mut GameEngine> {
        match self.screen {
            Screen::Playing { .. } => self.engine.as_mut(),
            _ => None,
        }
    }

    fn check_complete(&mut self) {
        let final_score = match &self.engine {
            Some(engine) if engine.is_complete() => engine.score(),
            _ => return,
        };
        self.on_game_complete(final_score);
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}
