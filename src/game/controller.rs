//! Player controller trait and round view
//!
//! A controller stands in for the child holding the tablet. The runner asks
//! it for one input at a time, handing over a read-only [`RoundView`] of the
//! engine and the list of inputs that make sense right now.

use crate::core::{ItemId, Side, Variant};
use crate::game::engine::{Answer, GameEngine, PlayerInput};
use crate::game::interaction::{InteractionState, RoundOutcome};
use crate::game::logger::GameLogger;
use crate::rounds::RoundSpec;

/// Read-only view of an engine for controllers
pub struct RoundView<'a> {
    engine: &'a GameEngine,
}

impl<'a> RoundView<'a> {
    pub fn new(engine: &'a GameEngine) -> Self {
        RoundView { engine }
    }

    pub fn variant(&self) -> Variant {
        self.engine.variant()
    }

    pub fn round(&self) -> &RoundSpec {
        self.engine.round()
    }

    pub fn interaction(&self) -> &InteractionState {
        self.engine.interaction()
    }

    pub fn outcome(&self) -> RoundOutcome {
        self.engine.outcome()
    }

    pub fn current_round(&self) -> u32 {
        self.engine.current_round()
    }

    pub fn total_rounds(&self) -> u32 {
        self.engine.total_rounds()
    }

    pub fn score(&self) -> u32 {
        self.engine.score()
    }

    pub fn logger(&self) -> &GameLogger {
        self.engine.logger()
    }

    /// Inputs a well-behaved front end could produce for the current round
    ///
    /// Answers come first, followed by the item toggles that only change the
    /// interaction state. Placed sequencing items are not offered again.
    pub fn available_inputs(&self) -> Vec<PlayerInput> {
        match self.round() {
            RoundSpec::Counting(round) => round
                .choices
                .iter()
                .map(|&c| PlayerInput::SubmitAnswer(Answer::Count(c)))
                .chain(round.toys.iter().map(|t| PlayerInput::ToggleItem(t.id)))
                .collect(),
            RoundSpec::Selection(round) => std::iter::once(PlayerInput::SubmitSelection)
                .chain(round.balls.iter().map(|b| PlayerInput::ToggleItem(b.id)))
                .collect(),
            RoundSpec::Comparison(_) => vec![
                PlayerInput::SubmitAnswer(Answer::Side(Side::A)),
                PlayerInput::SubmitAnswer(Answer::Side(Side::B)),
            ],
            RoundSpec::Sequencing(round) => {
                let placed = self.interaction().placed().len() as u8;
                round
                    .dolls
                    .iter()
                    .filter(|d| d.ordinal > placed)
                    .map(|d| PlayerInput::TapSequenceItem(d.id))
                    .collect()
            }
        }
    }

    /// The next input on the shortest path to a correct answer
    pub fn best_input(&self) -> Option<PlayerInput> {
        match self.round() {
            RoundSpec::Counting(round) => {
                Some(PlayerInput::SubmitAnswer(Answer::Count(round.target_count)))
            }
            RoundSpec::Comparison(round) => {
                Some(PlayerInput::SubmitAnswer(Answer::Side(round.correct_side)))
            }
            RoundSpec::Selection(round) => {
                let interaction = self.interaction();
                let selected = interaction.marked_count() as u32;
                let toggle = |marked: bool| {
                    round
                        .balls
                        .iter()
                        .find(|b| interaction.is_marked(b.id) == marked)
                        .map(|b| PlayerInput::ToggleItem(b.id))
                };
                match selected.cmp(&round.target_count) {
                    std::cmp::Ordering::Less => toggle(false),
                    std::cmp::Ordering::Greater => toggle(true),
                    std::cmp::Ordering::Equal => Some(PlayerInput::SubmitSelection),
                }
            }
            RoundSpec::Sequencing(round) => {
                let next = self.interaction().placed().len() as u8 + 1;
                round
                    .dolls
                    .iter()
                    .find(|d| d.ordinal == next)
                    .map(|d| PlayerInput::TapSequenceItem(d.id))
            }
        }
    }
}

/// Short human-readable form of an input, used in controller logs
pub fn describe_input(input: &PlayerInput) -> String {
    match input {
        PlayerInput::ToggleItem(id) => format!("toggle item {}", id),
        PlayerInput::SubmitAnswer(Answer::Count(n)) => format!("answer {}", n),
        PlayerInput::SubmitAnswer(Answer::Side(side)) => format!("answer group {}", side),
        PlayerInput::SubmitSelection => "check selection".to_string(),
        PlayerInput::TapSequenceItem(id) => format!("tap item {}", id),
    }
}

/// Source of player inputs
///
/// Returning `None` from [`PlayerController::choose_input`] means the player
/// left the session.
pub trait PlayerController {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Choose one input, normally from `available`
    fn choose_input(
        &mut self,
        view: &RoundView,
        available: &[PlayerInput],
    ) -> Option<PlayerInput>;

    /// Whether `choose_input` blocks on a human
    fn is_interactive(&self) -> bool {
        false
    }

    /// Called once the session is over
    fn on_session_end(&mut self, _view: &RoundView, _score: u32) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::EngineConfig;
    use crate::rounds::ScriptedSource;

    fn engine(variant: Variant, script: Vec<u32>) -> GameEngine {
        GameEngine::with_source(
            variant,
            EngineConfig::default(),
            Box::new(ScriptedSource::new(script)),
        )
    }

    #[test]
    fn test_counting_inputs_put_answers_first() {
        let engine = engine(
            Variant::Counting,
            vec![3, 0, 20, 20, 1, 30, 40, 4, 50, 60, 0, 1, 1, 2, 0, 1],
        );
        let view = RoundView::new(&engine);
        let inputs = view.available_inputs();
        assert_eq!(inputs.len(), 3 + 3);
        assert_eq!(inputs[0], PlayerInput::SubmitAnswer(Answer::Count(5)));
        assert_eq!(
            view.best_input(),
            Some(PlayerInput::SubmitAnswer(Answer::Count(3)))
        );
    }

    #[test]
    fn test_sequencing_inputs_shrink_as_items_are_placed() {
        let mut engine = engine(Variant::Sequencing, vec![0, 0]);
        let first = RoundView::new(&engine).best_input();
        assert_eq!(first, Some(PlayerInput::TapSequenceItem(ItemId::new(2))));
        if let Some(input) = first {
            engine.handle(input);
        }
        let view = RoundView::new(&engine);
        assert_eq!(view.available_inputs().len(), 2);
    }

    #[test]
    fn test_selection_best_input_walks_to_target() {
        // Target 2, total 2 + 2 + 0 = 4 balls
        let mut engine = engine(Variant::Selection, vec![2, 0]);
        for _ in 0..2 {
            let input = RoundView::new(&engine).best_input();
            assert!(matches!(input, Some(PlayerInput::ToggleItem(_))));
            if let Some(input) = input {
                engine.handle(input);
            }
        }
        assert_eq!(
            RoundView::new(&engine).best_input(),
            Some(PlayerInput::SubmitSelection)
        );
    }

    #[test]
    fn test_describe_input() {
        assert_eq!(
            describe_input(&PlayerInput::SubmitAnswer(Answer::Side(Side::B))),
            "answer group B"
        );
        assert_eq!(
            describe_input(&PlayerInput::TapSequenceItem(ItemId::new(4))),
            "tap item 4"
        );
    }
}
