//! Plain-text rendering of a round for terminal front ends

use crate::core::Side;
use crate::game::engine::{FeedbackKind, GameEngine, Phase};
use crate::game::interaction::RoundOutcome;
use crate::rounds::RoundSpec;
use std::fmt;

/// Render the current round, its interaction state and any feedback
pub fn render_round(engine: &GameEngine) -> String {
    RoundDisplay(engine).to_string()
}

/// Text view of an engine's current frame
pub struct RoundDisplay<'a>(pub &'a GameEngine);

impl fmt::Display for RoundDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let engine = self.0;
        let variant = engine.variant();
        writeln!(
            f,
            "=== {} | Round {}/{} | Score {} ===",
            variant.title(),
            engine.current_round(),
            engine.total_rounds(),
            engine.score()
        )?;
        writeln!(f, "{}", variant.prompt())?;

        let interaction = engine.interaction();
        match engine.round() {
            RoundSpec::Counting(round) => {
                for toy in &round.toys {
                    let tick = if interaction.is_marked(toy.id) { "✓" } else { " " };
                    writeln!(
                        f,
                        "  [{}]{} {} at ({}%, {}%)",
                        toy.id, tick, toy.glyph, toy.position.x, toy.position.y
                    )?;
                }
                let choices: Vec<String> = round.choices.iter().map(|c| c.to_string()).collect();
                writeln!(f, "Choices: {}", choices.join("  "))?;
            }
            RoundSpec::Selection(round) => {
                writeln!(f, "Grab {} balls!", round.target_count)?;
                for ball in &round.balls {
                    let mark = if interaction.is_marked(ball.id) { "*" } else { " " };
                    writeln!(f, "  [{}]{} {}", ball.id, mark, ball.glyph)?;
                }
                writeln!(f, "Selected: {}", interaction.marked_count())?;
            }
            RoundSpec::Comparison(round) => {
                for side in [Side::A, Side::B] {
                    let group = round.group(side);
                    let glyphs: String = (0..group.count).map(|_| group.glyph.as_str()).collect();
                    writeln!(f, "  {}: {} ({})", side, glyphs, group.color)?;
                }
            }
            RoundSpec::Sequencing(round) => {
                let placed = interaction.placed();
                for doll in &round.dolls {
                    let mark = if placed.contains(&doll.ordinal) {
                        doll.ordinal.to_string()
                    } else {
                        "?".to_string()
                    };
                    writeln!(f, "  [{}] {} ({})", doll.id, doll.glyph, mark)?;
                }
                writeln!(f, "Placed {}/{}", placed.len(), round.item_count)?;
            }
        }

        let status = match (engine.phase(), engine.outcome()) {
            (Phase::Feedback(FeedbackKind::Correct), _) => Some("Great job!"),
            (Phase::Feedback(FeedbackKind::Wrong), _) => Some("Try again!"),
            (_, RoundOutcome::Incorrect) => Some("Oops, not that one!"),
            (Phase::Complete, _) => Some("All done!"),
            _ => None,
        };
        if let Some(status) = status {
            writeln!(f, "{}", status)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Variant;
    use crate::game::config::EngineConfig;
    use crate::rounds::ScriptedSource;

    #[test]
    fn test_render_counting_round() {
        let engine = GameEngine::with_source(
            Variant::Counting,
            EngineConfig::default(),
            Box::new(ScriptedSource::new([
                3, 0, 20, 20, 1, 30, 40, 4, 50, 60, 0, 1, 1, 2, 0, 1,
            ])),
        );
        let text = render_round(&engine);
        assert!(text.contains("Round 1/5"));
        assert!(text.contains("How many toys are there?"));
        assert!(text.contains("Choices: 5  2  3"));
        assert!(text.contains("at (20%, 20%)"));
    }

    #[test]
    fn test_render_shows_wrong_feedback() {
        let mut engine = GameEngine::with_source(
            Variant::Comparison,
            EngineConfig::default(),
            Box::new(ScriptedSource::new([0, 1, 3, 1, 0, 1])),
        );
        engine.submit_answer(crate::game::engine::Answer::Side(Side::B));
        let text = render_round(&engine);
        assert!(text.contains("Try again!"));
        assert!(text.contains("A: "));
    }

    #[test]
    fn test_display_matches_render() {
        let mut engine = GameEngine::with_source(
            Variant::Sequencing,
            EngineConfig::default(),
            Box::new(ScriptedSource::new([0, 0])),
        );
        engine.tap_sequence_item(crate::core::ItemId::new(2));
        let text = format!("{}", RoundDisplay(&engine));
        assert_eq!(text, render_round(&engine));
        assert!(text.contains("Placed 1/3"));
        assert!(text.contains("(1)"));
    }
}
