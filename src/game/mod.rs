//! Session state machine, controllers and the runner that drives them

pub mod config;
pub mod controller;
pub mod engine;
pub mod fixed_script_controller;
pub mod interaction;
pub mod interactive_controller;
pub mod logger;
pub mod perfect_controller;
pub mod random_controller;
pub mod render;
pub mod runner;
pub mod scheduler;
pub mod score;
pub mod session;
pub mod snapshot;

pub use config::EngineConfig;
pub use controller::{describe_input, PlayerController, RoundView};
pub use engine::{Answer, FeedbackKind, GameEngine, InputEffect, Phase, PlayerInput};
pub use fixed_script_controller::FixedScriptController;
pub use interaction::{InteractionState, RoundOutcome, SessionState};
pub use interactive_controller::InteractiveController;
pub use logger::{GameLogger, LogEntry, OutputFormat, OutputMode, VerbosityLevel};
pub use perfect_controller::PerfectController;
pub use random_controller::RandomController;
pub use render::{render_round, RoundDisplay};
pub use runner::{SessionEndReason, SessionResult, SessionRunner};
pub use scheduler::{Scheduler, TaskId};
pub use score::{stars_for, ScoreTracker, Stars};
pub use session::{Screen, SessionController, SourceFactory};
pub use snapshot::EngineSnapshot;
