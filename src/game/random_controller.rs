//! Random controller
//!
//! Picks uniformly among the available inputs. Serves as the baseline for
//! simulations: a child tapping at whatever is on screen.

use crate::game::controller::{describe_input, PlayerController, RoundView};
use crate::game::engine::PlayerInput;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha12Rng;

pub struct RandomController {
    rng: Box<dyn RngCore + Send>,
}

impl RandomController {
    /// Random controller seeded from entropy
    pub fn new() -> Self {
        RandomController {
            rng: Box::new(ChaCha12Rng::from_entropy()),
        }
    }

    /// Random controller with a seeded RNG (for deterministic testing)
    pub fn with_seed(seed: u64) -> Self {
        RandomController {
            rng: Box::new(ChaCha12Rng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomController {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerController for RandomController {
    fn name(&self) -> &str {
        "RANDOM"
    }

    fn choose_input(
        &mut self,
        view: &RoundView,
        available: &[PlayerInput],
    ) -> Option<PlayerInput> {
        if available.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..available.len());
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
