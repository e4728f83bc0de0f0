//! Owl Math - the game core of a kids' math activity hub
//!
//! Four short puzzle games (counting, grabbing balls, comparing groups,
//! lining items up) share one engine: rounds are generated from an injectable
//! random source, answers are validated by a per-variant state machine, and
//! feedback windows run on a logical clock the caller advances.

pub mod core;
pub mod error;
pub mod game;
pub mod rounds;
pub mod simulation;

pub use error::{GameError, Result};
