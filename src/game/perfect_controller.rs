//! Controller that always makes the next correct move

use crate::game::controller::{describe_input, PlayerController, RoundView};
use crate::game::engine::PlayerInput;

#[derive(Debug, Clone, Copy, Default)]
pub struct PerfectController;

impl PerfectController {
    pub fn new() -> Self {
        PerfectController
    }
}

impl PlayerController for PerfectController {
    fn name(&self) -> &str {
        "PERFECT"
    }

    fn choose_input(
        &mut self,
        view: &RoundView,
        available: &[PlayerInput],
    ) -> Option<PlayerInput> {
        let input = view.best_input().or_else(|| available.first().copied())?;
        view.logger()
            .controller_choice(self.name(), &format!("chose {}", describe_input(&input)));
        Some(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Variant;
    use crate::game::config::EngineConfig;
    use crate::game::engine::{GameEngine, InputEffect};

    #[test]
    fn test_never_wrong() {
        for variant in Variant::ALL {
            let mut engine = GameEngine::seeded(variant, EngineConfig::default(), 11);
            let mut controller = PerfectController::new();
            while !engine.is_complete() {
                if engine.is_locked() {
                    engine.settle();
                    continue;
                }
                let view = RoundView::new(&engine);
                let available = view.available_inputs();
                let input = controller.choose_input(&view, &available);
                let effect = input.map(|i| engine.handle(i));
                assert!(!matches!(effect, Some(InputEffect::Incorrect) | None));
            }
            assert_eq!(engine.score(), 5);
            assert_eq!(engine.mistakes(), 0);
        }
    }
}
