//! Simulation mode: play many sessions in parallel and collect statistics
//!
//! Sessions run headless on rayon's thread pool. Each one derives its own
//! seeds from the master seed and its index, so a seeded simulation gives
//! the same report regardless of how the pool schedules the work.

use crate::core::Variant;
use crate::game::{
    EngineConfig, GameEngine, PerfectController, PlayerController, RandomController,
    SessionEndReason, SessionResult, SessionRunner,
};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;

/// Controller playing every simulated session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ControllerType {
    Random,
    Perfect,
}

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Variant to play; `None` picks one per session
    pub variant: Option<Variant>,
    pub games: usize,
    pub controller: ControllerType,
    /// Master seed; `None` draws one from entropy
    pub seed: Option<u64>,
    pub engine: EngineConfig,
    pub max_inputs: u32,
}

impl SimulationConfig {
    pub fn new(games: usize, controller: ControllerType) -> Self {
        SimulationConfig {
            variant: None,
            games,
            controller,
            seed: None,
            engine: EngineConfig::default(),
            max_inputs: 1000,
        }
    }

    pub fn with_variant(mut self, variant: Option<Variant>) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_engine_config(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }
}

/// Aggregate over the sessions of one variant
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VariantSummary {
    pub games: usize,
    pub mean_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub seed: u64,
    pub games: usize,
    pub completed: usize,
    pub quit: usize,
    pub input_limit: usize,
    /// Sessions ending with one, two and three stars
    pub star_histogram: [usize; 3],
    pub mean_score: f64,
    pub mean_mistakes: f64,
    pub per_variant: Vec<(Variant, VariantSummary)>,
}

impl SimulationReport {
    fn from_results(seed: u64, results: &[SessionResult]) -> Self {
        let games = results.len();
        let count = |reason: SessionEndReason| {
            results
                .iter()
                .filter(|r| r.end_reason == reason)
                .count()
        };

        let mut star_histogram = [0usize; 3];
        for stars in results.iter().filter_map(|r| r.stars) {
            star_histogram[usize::from(stars.count()) - 1] += 1;
        }

        let per_variant = Variant::ALL
            .iter()
            .filter_map(|&variant| {
                let scores: Vec<u32> = results
                    .iter()
                    .filter(|r| r.variant == variant)
                    .map(|r| r.score)
                    .collect();
                (!scores.is_empty()).then(|| {
                    let summary = VariantSummary {
                        games: scores.len(),
                        mean_score: mean(scores.iter().copied(), scores.len()),
                    };
                    (variant, summary)
                })
            })
            .collect();

        SimulationReport {
            seed,
            games,
            completed: count(SessionEndReason::Completed),
            quit: count(SessionEndReason::Quit),
            input_limit: count(SessionEndReason::InputLimit),
            star_histogram,
            mean_score: mean(results.iter().map(|r| r.score), games),
            mean_mistakes: mean(results.iter().map(|r| r.mistakes), games),
            per_variant,
        }
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Simulation Results ===")?;
        writeln!(f, "Seed: {}", self.seed)?;
        writeln!(
            f,
            "Sessions: {} ({} completed, {} quit, {} hit the input limit)",
            self.games, self.completed, self.quit, self.input_limit
        )?;
        writeln!(
            f,
            "Stars: ★ {}  ★★ {}  ★★★ {}",
            self.star_histogram[0], self.star_histogram[1], self.star_histogram[2]
        )?;
        writeln!(f, "Mean score: {:.2}", self.mean_score)?;
        writeln!(f, "Mean mistakes: {:.2}", self.mean_mistakes)?;
        for (variant, summary) in &self.per_variant {
            writeln!(
                f,
                "  {:<10} {:>6} sessions, mean score {:.2}",
                variant.activity_id(),
                summary.games,
                summary.mean_score
            )?;
        }
        Ok(())
    }
}

fn mean(values: impl Iterator<Item = u32>, n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        values.map(f64::from).sum::<f64>() / n as f64
    }
}

/// Seed of session `index` under `master`
fn session_seed(master: u64, index: usize) -> u64 {
    master.wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

fn run_one(config: &SimulationConfig, master: u64, index: usize) -> SessionResult {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(session_seed(master, index));
    let variant = config
        .variant
        .unwrap_or_else(|| Variant::ALL[rng.gen_range(0..Variant::ALL.len())]);
    let engine_seed: u64 = rng.gen();
    let controller_seed: u64 = rng.gen();

    let mut engine = GameEngine::with_source(
        variant,
        config.engine.clone(),
        Box::new(Xoshiro256PlusPlus::seed_from_u64(engine_seed)),
    );
    let mut controller: Box<dyn PlayerController> = match config.controller {
        ControllerType::Random => Box::new(RandomController::with_seed(controller_seed)),
        ControllerType::Perfect => Box::new(PerfectController::new()),
    };
    SessionRunner::new(&mut engine)
        .with_max_inputs(config.max_inputs)
        .run_headless(&mut *controller)
}

/// Run `config.games` sessions in parallel
pub fn run_simulation(config: &SimulationConfig) -> SimulationReport {
    let master = config.seed.unwrap_or_else(rand::random);
    let results: Vec<SessionResult> = (0..config.games)
        .into_par_iter()
        .map(|index| run_one(config, master, index))
        .collect();
    SimulationReport::from_results(master, &results)
}
