//! Render snapshots
//!
//! An `EngineSnapshot` is everything the rendering layer needs to draw the
//! current frame: the round, the player's in-progress answer, the feedback
//! state and, once the session is over, the stars.

use crate::core::Variant;
use crate::game::engine::{GameEngine, Phase};
use crate::game::interaction::SessionState;
use crate::game::score::Stars;
use crate::rounds::RoundSpec;
use crate::Result;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineSnapshot {
    pub variant: Variant,
    pub total_rounds: u32,
    pub round: RoundSpec,
    pub state: SessionState,
    pub phase: Phase,
    pub speaking: bool,
    /// Logical session time in milliseconds
    pub now_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stars: Option<Stars>,
}

impl EngineSnapshot {
    pub fn capture(engine: &GameEngine) -> Self {
        EngineSnapshot {
            variant: engine.variant(),
            total_rounds: engine.total_rounds(),
            round: engine.round().clone(),
            state: engine.state().clone(),
            phase: engine.phase(),
            speaking: engine.speaking(),
            now_ms: engine.now().as_millis() as u64,
            stars: engine.stars(),
        }
    }

    /// Write the snapshot as a single JSON line
    pub fn write_json_line<W: Write>(&self, out: &mut W) -> Result<()> {
        serde_json::to_writer(&mut *out, self)?;
        writeln!(out)?;
        Ok(())
    }

    /// Save this snapshot to a pretty-printed JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }
}
