//! Session runner: drive one engine with one controller until the end
//!
//! Headless runs jump the logical clock straight to the next timer, so a
//! full session takes microseconds. Real-time runs sleep on tokio for every
//! feedback window and charge the controller's thinking time to the clock.

use crate::core::Variant;
use crate::game::controller::{PlayerController, RoundView};
use crate::game::engine::{GameEngine, PlayerInput};
use crate::game::logger::{category, VerbosityLevel};
use crate::game::score::Stars;
use crate::Result;
use serde::Serialize;
use std::time::Duration;

/// Reason a session run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionEndReason {
    /// All rounds were played
    Completed,
    /// The controller left the session
    Quit,
    /// The controller produced too many inputs without finishing
    InputLimit,
}

/// Result of running a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResult {
    pub variant: Variant,
    pub score: u32,
    /// Only set when the session completed
    pub stars: Option<Stars>,
    pub rounds_played: u32,
    pub inputs: u32,
    pub mistakes: u32,
    pub end_reason: SessionEndReason,
    /// Logical session time in milliseconds
    pub elapsed_ms: u64,
}

pub struct SessionRunner<'a> {
    engine: &'a mut GameEngine,
    /// Maximum inputs before the run is abandoned
    max_inputs: u32,
    /// Clock time charged after each input in headless runs
    think_time: Duration,
    inputs: u32,
}

impl<'a> SessionRunner<'a> {
    pub fn new(engine: &'a mut GameEngine) -> Self {
        SessionRunner {
            engine,
            max_inputs: 1000,
            think_time: Duration::ZERO,
            inputs: 0,
        }
    }

    pub fn with_max_inputs(mut self, max_inputs: u32) -> Self {
        self.max_inputs = max_inputs;
        self
    }

    /// Logical delay between consecutive inputs (headless runs only)
    pub fn with_think_time(mut self, think_time: Duration) -> Self {
        self.think_time = think_time;
        self
    }

    pub fn engine(&self) -> &GameEngine {
        self.engine
    }

    /// Run to the end on the logical clock
    pub fn run_headless(&mut self, controller: &mut dyn PlayerController) -> SessionResult {
        let reason = loop {
            if let Some(reason) = self.finished() {
                break reason;
            }
            if self.engine.is_locked() {
                match self.engine.next_deadline() {
                    Some(wait) => self.engine.advance_time(wait),
                    None => break self.abandon(SessionEndReason::Quit),
                }
                continue;
            }
            if let Some(reason) = self.over_limit() {
                break reason;
            }

            let choice = {
                let view = RoundView::new(self.engine);
                let available = view.available_inputs();
                controller.choose_input(&view, &available)
            };
            if let Some(reason) = self.apply(choice) {
                break reason;
            }
            self.engine.advance_time(self.think_time);
        };
        self.finish(controller, reason)
    }

    /// Run to the end in real time
    ///
    /// Interactive controllers are asked on a blocking section of the
    /// runtime, which requires the multi-threaded scheduler.
    pub async fn run_realtime(
        &mut self,
        controller: &mut (dyn PlayerController + Send),
    ) -> Result<SessionResult> {
        let reason = loop {
            if let Some(reason) = self.finished() {
                break reason;
            }
            if self.engine.is_locked() {
                match self.engine.next_deadline() {
                    Some(wait) => {
                        tokio::time::sleep(wait).await;
                        self.engine.advance_time(wait);
                    }
                    None => break self.abandon(SessionEndReason::Quit),
                }
                continue;
            }
            if let Some(reason) = self.over_limit() {
                break reason;
            }

            let asked = tokio::time::Instant::now();
            let choice = {
                let view = RoundView::new(self.engine);
                let available = view.available_inputs();
                if controller.is_interactive() {
                    tokio::task::block_in_place(|| controller.choose_input(&view, &available))
                } else {
                    controller.choose_input(&view, &available)
                }
            };
            self.engine.advance_time(asked.elapsed());
            if let Some(reason) = self.apply(choice) {
                break reason;
            }
            if !self.think_time.is_zero() {
                tokio::time::sleep(self.think_time).await;
                self.engine.advance_time(self.think_time);
            }
        };
        Ok(self.finish(controller, reason))
    }

    fn finished(&self) -> Option<SessionEndReason> {
        if self.engine.is_complete() {
            Some(SessionEndReason::Completed)
        } else if self.engine.is_finished() {
            Some(SessionEndReason::Quit)
        } else {
            None
        }
    }

    fn over_limit(&mut self) -> Option<SessionEndReason> {
        (self.inputs >= self.max_inputs).then(|| self.abandon(SessionEndReason::InputLimit))
    }

    fn apply(&mut self, choice: Option<PlayerInput>) -> Option<SessionEndReason> {
        match choice {
            Some(input) => {
                self.inputs += 1;
                self.engine.handle(input);
                None
            }
            None => Some(self.abandon(SessionEndReason::Quit)),
        }
    }

    fn abandon(&mut self, reason: SessionEndReason) -> SessionEndReason {
        self.engine.shutdown();
        self.engine.logger().event(
            VerbosityLevel::Minimal,
            category::SESSION,
            &format!("Run ended early: {:?} after {} inputs", reason, self.inputs),
        );
        reason
    }

    fn finish(
        &mut self,
        controller: &mut dyn PlayerController,
        reason: SessionEndReason,
    ) -> SessionResult {
        let engine = &*self.engine;
        controller.on_session_end(&RoundView::new(engine), engine.score());
        let rounds_played = if engine.is_complete() {
            engine.total_rounds()
        } else {
            engine.current_round() - 1
        };
        SessionResult {
            variant: engine.variant(),
            score: engine.score(),
            stars: engine.stars(),
            rounds_played,
            inputs: self.inputs,
            mistakes: engine.mistakes(),
            end_reason: reason,
            elapsed_ms: engine.now().as_millis() as u64,
        }
    }
}
