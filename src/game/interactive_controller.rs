//! Interactive controller for a human at the terminal
//!
//! Shows the round as text and a numbered menu of inputs, then reads a
//! choice per line. `q` leaves the session; end of input does the same.

use crate::game::controller::{describe_input, PlayerController, RoundView};
use crate::game::engine::PlayerInput;
use std::io::{self, BufRead, BufReader, Write};

pub struct InteractiveController {
    input: Box<dyn BufRead + Send>,
    output: Box<dyn Write + Send>,
}

impl InteractiveController {
    /// Controller reading stdin and writing stdout
    pub fn new() -> Self {
        Self::with_io(BufReader::new(io::stdin()), io::stdout())
    }

    /// Controller over arbitrary streams (used by tests)
    pub fn with_io(
        input: impl BufRead + Send + 'static,
        output: impl Write + Send + 'static,
    ) -> Self {
        InteractiveController {
            input: Box::new(input),
            output: Box::new(output),
        }
    }

    fn show_menu(&mut self, view: &RoundView, available: &[PlayerInput]) -> io::Result<()> {
        writeln!(
            self.output,
            "Round {}/{}  Score {}",
            view.current_round(),
            view.total_rounds(),
            view.score()
        )?;
        writeln!(self.output, "{}", view.variant().prompt())?;
        for (i, input) in available.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i, describe_input(input))?;
        }
        write!(self.output, "Choice (0-{}, q to quit): ", available.len().saturating_sub(1))?;
        self.output.flush()
    }

    fn display_help(&mut self) -> io::Result<()> {
        writeln!(self.output, "Enter the number of an action.")?;
        writeln!(self.output, "  ?  - Show this help")?;
        writeln!(self.output, "  q  - Leave the game")
    }
}

impl Default for InteractiveController {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerController for InteractiveController {
    fn name(&self) -> &str {
        "HUMAN"
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn choose_input(
        &mut self,
        view: &RoundView,
        available: &[PlayerInput],
    ) -> Option<PlayerInput> {
        if available.is_empty() {
            return None;
        }
        loop {
            self.show_menu(view, available).ok()?;

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) | Err(_) => return None,
                Ok(_) => {}
            }

            match line.trim() {
                "q" | "quit" => return None,
                "?" => {
                    self.display_help().ok()?;
                    continue;
                }
                trimmed => match trimmed.parse::<usize>() {
                    Ok(choice) if choice < available.len() => {
                        let input = available[choice];
                        view.logger().controller_choice(
                            self.name(),
                            &format!("chose {} ({})", choice, describe_input(&input)),
                        );
                        return Some(input);
                    }
                    _ => {
                        writeln!(
                            self.output,
                            "Invalid choice. Enter 0-{}.",
                            available.len() - 1
                        )
                        .ok()?;
                    }
                },
            }
        }
    }

    fn on_session_end(&mut self, view: &RoundView, score: u32) {
        let _ = writeln!(
            self.output,
            "Finished {} with {}/{}",
            view.variant().title(),
            score,
            view.total_rounds()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Variant;
    use crate::game::config::EngineConfig;
    use crate::game::engine::GameEngine;
    use std::io::Cursor;

    fn controller(input: &str) -> InteractiveController {
        InteractiveController::with_io(Cursor::new(input.to_string()), io::sink())
    }

    #[test]
    fn test_reads_choice_after_invalid_lines() {
        let engine = GameEngine::seeded(Variant::Comparison, EngineConfig::default(), 4);
        let view = RoundView::new(&engine);
        let available = view.available_inputs();
        let mut human = controller("?\n7\nabc\n1\n");
        assert_eq!(human.choose_input(&view, &available), Some(available[1]));
    }

    #[test]
    fn test_quit_and_eof() {
        let engine = GameEngine::seeded(Variant::Comparison, EngineConfig::default(), 4);
        let view = RoundView::new(&engine);
        let available = view.available_inputs();
        assert_eq!(controller("q\n").choose_input(&view, &available), None);
        assert_eq!(controller("").choose_input(&view, &available), None);
    }
}
