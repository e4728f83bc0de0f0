//! Fixed script controller for deterministic testing
//!
//! Follows a predetermined sequence of indices into the available inputs.
//! Once the script is exhausted it defaults to index 0, which is always an
//! answer (or the first untapped sequencing item).

use crate::game::controller::{describe_input, PlayerController, RoundView};
use crate::game::engine::PlayerInput;
use crate::{GameError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedScriptController {
    /// The predetermined sequence of choice indices
    script: Vec<usize>,
    /// Current position in the script
    pub current_index: usize,
}

impl FixedScriptController {
    /// Create a scripted controller, e.g. `vec![1, 0, 2]`
    pub fn new(script: Vec<usize>) -> Self {
        FixedScriptController {
            script,
            current_index: 0,
        }
    }

    /// Parse a script such as `"1 0 2"` or `"1,0,2"`
    pub fn parse(text: &str) -> Result<Self> {
        let script = text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .map(|t| {
                t.parse::<usize>()
                    .map_err(|_| GameError::InvalidScript(format!("not an index: {:?}", t)))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(script))
    }

    pub fn is_exhausted(&self) -> bool {
        self.current_index >= self.script.len()
    }

    /// Next index from the script, or 0 once it is exhausted
    fn next_choice(&mut self) -> usize {
        match self.script.get(self.current_index) {
            Some(&choice) => {
                self.current_index += 1;
                choice
            }
            None => 0,
        }
    }
}

impl PlayerController for FixedScriptController {
    fn name(&self) -> &str {
        "SCRIPT"
    }

    fn choose_input(
        &mut self,
        view: &RoundView,
        available: &[PlayerInput],
    ) -> Option<PlayerInput> {
        if available.is_empty() {
            return None;
        }
        let choice = self.next_choice();
        let index = if choice < available.len() {
            choice
        } else {
            view.logger().controller_choice(
                self.name(),
                &format!("index {} out of bounds, defaulting to 0", choice),
            );
            0
        };
        let input = available[index];
        view.logger().controller_choice(
            self.name(),
            &format!(
                "chose {} ({}) out of choices 0-{}",
                index,
                describe_input(&input),
                available.len() - 1
            ),
        );
        Some(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Variant;
    use crate::game::config::EngineConfig;
    use crate::game::engine::GameEngine;

    #[test]
    fn test_parse() {
        let controller = FixedScriptController::parse("1, 0 2").unwrap();
        assert_eq!(controller.script, vec![1, 0, 2]);
        assert!(matches!(
            FixedScriptController::parse("1 x"),
            Err(GameError::InvalidScript(_))
        ));
    }

    #[test]
    fn test_follows_script_then_defaults() {
        let engine = GameEngine::seeded(Variant::Comparison, EngineConfig::default(), 2);
        let view = RoundView::new(&engine);
        let available = view.available_inputs();
        let mut controller = FixedScriptController::new(vec![1, 9]);

        assert_eq!(controller.choose_input(&view, &available), Some(available[1]));
        assert_eq!(controller.choose_input(&view, &available), Some(available[0]));
        assert!(controller.is_exhausted());
        assert_eq!(controller.choose_input(&view, &available), Some(available[0]));
    }
}
