//! Owl Math - Main Binary
//!
//! Terminal front end for the math activities, plus headless session runs
//! and parallel simulations.

use clap::{Parser, Subcommand, ValueEnum};
use owl_math::{
    core::{Variant, AGE_CHOICES},
    game::{
        describe_input, EngineConfig, EngineSnapshot, FixedScriptController, GameEngine,
        GameLogger, InteractiveController, OutputFormat, PerfectController, PlayerController,
        RandomController, RoundDisplay, RoundView, Screen, SessionController, SessionRunner,
        VerbosityLevel,
    },
    simulation::{self, run_simulation, SimulationConfig},
    GameError, Result,
};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::time::Instant;

/// Controller type for a single session run
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ControllerType {
    /// Picks a random input each time
    Random,
    /// Always makes the next correct move
    Perfect,
    /// Follows --script indices into the available inputs
    Script,
    /// Human at the terminal
    Interactive,
}

/// Controller type for simulations
#[derive(Debug, Clone, Copy, ValueEnum)]
enum SimController {
    Random,
    Perfect,
}

impl From<SimController> for simulation::ControllerType {
    fn from(c: SimController) -> Self {
        match c {
            SimController::Random => simulation::ControllerType::Random,
            SimController::Perfect => simulation::ControllerType::Perfect,
        }
    }
}

/// Verbosity level (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

/// Engine settings shared by every subcommand
#[derive(clap::Args, Debug, Clone)]
struct EngineArgs {
    /// JSON engine config file; flags below override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Rounds per session
    #[arg(long)]
    rounds: Option<u32>,

    /// Wrong answers allowed per round before it is forfeited
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Random seed for deterministic rounds
    #[arg(long)]
    seed: Option<u64>,
}

impl EngineArgs {
    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load(path)?,
            None => EngineConfig::default(),
        };
        if let Some(rounds) = self.rounds {
            config = config.with_total_rounds(rounds);
        }
        if self.max_attempts.is_some() {
            config = config.with_max_attempts(self.max_attempts);
        }
        Ok(config)
    }
}

/// Options of a single `run` session
#[derive(clap::Args, Debug)]
struct RunArgs {
    /// Activity id (counting, balloons, sequence, compare)
    #[arg(long, short = 'a')]
    activity: String,

    #[arg(long, value_enum, default_value = "random")]
    controller: ControllerType,

    /// Script for --controller script (space or comma separated indices)
    #[arg(long, value_name = "CHOICES")]
    script: Option<String>,

    /// Sleep through feedback windows in real time
    #[arg(long)]
    realtime: bool,

    /// Time each controller spends before its next input, in milliseconds
    #[arg(long, default_value_t = 0)]
    think_ms: u64,

    /// Give up after this many inputs
    #[arg(long, default_value_t = 1000)]
    max_inputs: u32,

    /// Verbosity level for session output (0=silent, 1=minimal, 2=normal, 3=verbose)
    #[arg(long, default_value = "normal", short = 'v')]
    verbosity: VerbosityArg,

    /// Print the result (and logs) as JSON
    #[arg(long)]
    json: bool,

    /// Save the final frame of the session as a JSON snapshot
    #[arg(long, value_name = "FILE")]
    snapshot: Option<PathBuf>,
}

#[derive(Parser)]
#[command(name = "owl")]
#[command(about = "Owl Math - counting, grabbing, comparing and ordering games", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play in the terminal: onboarding, activity menu, games
    Play {
        #[command(flatten)]
        engine: EngineArgs,

        /// Player name (skips the onboarding prompt together with --age)
        #[arg(long)]
        name: Option<String>,

        /// Player age
        #[arg(long)]
        age: Option<u8>,

        /// Print one JSON snapshot per change instead of text
        #[arg(long)]
        json: bool,
    },

    /// Run one session of an activity with a controller
    Run {
        #[command(flatten)]
        run: RunArgs,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Play many sessions in parallel and report statistics
    Simulate {
        /// Number of sessions
        #[arg(long, short = 'g', default_value_t = 1000)]
        games: usize,

        /// Activity id; every activity when omitted
        #[arg(long, short = 'a')]
        activity: Option<String>,

        #[command(flatten)]
        engine: EngineArgs,

        #[arg(long, value_enum, default_value = "random")]
        controller: SimController,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            engine,
            name,
            age,
            json,
        } => run_play(engine, name, age, json).await?,
        Commands::Run { run, engine } => run_session(run, engine).await?,
        Commands::Simulate {
            games,
            activity,
            engine,
            controller,
            json,
        } => {
            let variant = activity.map(|a| a.parse::<Variant>()).transpose()?;
            let config = SimulationConfig::new(games, controller.into())
                .with_variant(variant)
                .with_seed(engine.seed)
                .with_engine_config(engine.engine_config()?);
            let report = tokio::task::spawn_blocking(move || run_simulation(&config)).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report);
            }
        }
    }

    Ok(())
}

async fn run_session(run: RunArgs, args: EngineArgs) -> Result<()> {
    let variant: Variant = run.activity.parse()?;
    let config = args.engine_config()?;
    let rng = match args.seed {
        Some(seed) => ChaCha12Rng::seed_from_u64(seed),
        None => ChaCha12Rng::from_entropy(),
    };
    let mut logger = GameLogger::with_verbosity(run.verbosity.0);
    if run.json {
        logger.set_output_format(OutputFormat::Json);
    }
    let mut engine = GameEngine::with_source(variant, config, Box::new(rng)).with_logger(logger);

    let mut controller: Box<dyn PlayerController + Send> = match run.controller {
        ControllerType::Random => match args.seed {
            Some(seed) => Box::new(RandomController::with_seed(seed.wrapping_add(1))),
            None => Box::new(RandomController::new()),
        },
        ControllerType::Perfect => Box::new(PerfectController::new()),
        ControllerType::Script => {
            let script = run.script.ok_or_else(|| {
                GameError::InvalidScript("--controller script needs --script".to_string())
            })?;
            Box::new(FixedScriptController::parse(&script)?)
        }
        ControllerType::Interactive => Box::new(InteractiveController::new()),
    };

    let mut runner = SessionRunner::new(&mut engine)
        .with_max_inputs(run.max_inputs)
        .with_think_time(Duration::from_millis(run.think_ms));
    let result = if run.realtime {
        runner.run_realtime(&mut *controller).await?
    } else {
        runner.run_headless(&mut *controller)
    };

    if let Some(path) = &run.snapshot {
        EngineSnapshot::capture(&engine).save_to_file(path)?;
    }

    if run.json {
        println!("{}", serde_json::to_string(&result)?);
    } else {
        println!("=== Session Result ===");
        println!("Activity: {}", result.variant.title());
        println!("Score: {}/{}", result.score, engine.total_rounds());
        if let Some(stars) = result.stars {
            println!("Stars: {}", stars);
        }
        println!(
            "Inputs: {}  Mistakes: {}  Ended: {:?}",
            result.inputs, result.mistakes, result.end_reason
        );
    }
    Ok(())
}

/// Terminal session through the session controller
async fn run_play(
    args: EngineArgs,
    name: Option<String>,
    age: Option<u8>,
    json: bool,
) -> Result<()> {
    let mut session = match args.seed {
        Some(seed) => SessionController::with_seed(seed),
        None => SessionController::new(),
    }
    .with_config(args.engine_config()?);

    if let (Some(name), Some(age)) = (&name, age) {
        session.onboarding_submit(name, age)?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match session.screen() {
            Screen::Onboarding => {
                println!("Hi! I'm the owl. What's your name?");
                let Some(name) = read_line(&mut lines).await? else {
                    session.exit();
                    continue;
                };
                println!("How old are you? ({:?})", AGE_CHOICES);
                let Some(age) = read_line(&mut lines).await? else {
                    session.exit();
                    continue;
                };
                let age = age.trim().parse::<u8>().unwrap_or(0);
                if let Err(err) = session.onboarding_submit(&name, age) {
                    println!("{}", err);
                }
            }
            Screen::ActivitySelection => {
                if let Some(profile) = session.profile() {
                    println!("\n{}, {}! Pick a game:", profile.name(), profile.tier());
                }
                for (i, variant) in Variant::ALL.iter().enumerate() {
                    println!("  {}) {} [{}]", i, variant.title(), variant.activity_id());
                }
                println!("  q) Quit");
                let Some(line) = read_line(&mut lines).await? else {
                    session.exit();
                    continue;
                };
                let choice = line.trim();
                if choice == "q" {
                    session.exit();
                    continue;
                }
                let id = choice
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| Variant::ALL.get(i))
                    .map(|v| v.activity_id())
                    .unwrap_or(choice);
                if !session.select_activity(id) {
                    println!("I don't know that game.");
                }
            }
            Screen::Playing { .. } => {
                let available = match session.engine() {
                    Some(engine) => {
                        show_engine(engine, json)?;
                        if engine.is_locked() {
                            if let Some(wait) = engine.next_deadline() {
                                tokio::time::sleep(wait).await;
                                session.advance_time(wait);
                            }
                            continue;
                        }
                        let available = RoundView::new(engine).available_inputs();
                        if !json {
                            for (i, input) in available.iter().enumerate() {
                                println!("  {}) {}", i, describe_input(input));
                            }
                            println!("  q) Back to the games");
                        }
                        available
                    }
                    None => {
                        session.exit_to_menu();
                        continue;
                    }
                };

                let waiting = Instant::now();
                let shake = session.next_deadline();
                let line = tokio::select! {
                    line = lines.next_line() => Some(line?),
                    _ = sleep_or_forever(shake) => None,
                };
                session.advance_time(waiting.elapsed());

                match line {
                    // A timer fired first; redraw
                    None => {}
                    Some(None) => session.exit(),
                    Some(Some(text)) => {
                        let text = text.trim();
                        if text == "q" {
                            session.exit_to_menu();
                        } else if let Some(input) =
                            text.parse::<usize>().ok().and_then(|i| available.get(i))
                        {
                            session.handle(*input);
                        } else {
                            println!("Pick one of the numbers.");
                        }
                    }
                }
            }
            Screen::Complete { variant, score, stars } => {
                if let Some(engine) = session.engine() {
                    show_engine(engine, json)?;
                }
                println!(
                    "{} finished! Score {} {}  (Enter: more games, q: quit)",
                    variant.title(),
                    score,
                    stars
                );
                match read_line(&mut lines).await? {
                    Some(line) if line.trim() != "q" => session.back_to_activities(),
                    _ => session.exit(),
                }
            }
            Screen::Exited => break,
        }
    }
    println!("Bye!");
    Ok(())
}

fn show_engine(engine: &GameEngine, json: bool) -> Result<()> {
    if json {
        EngineSnapshot::capture(engine).write_json_line(&mut std::io::stdout())
    } else {
        print!("{}", RoundDisplay(engine));
        Ok(())
    }
}

async fn read_line(lines: &mut Lines<BufReader<Stdin>>) -> Result<Option<String>> {
    Ok(lines.next_line().await?)
}

async fn sleep_or_forever(wait: Option<Duration>) {
    match wait {
        Some(wait) => tokio::time::sleep(wait).await,
        None => std::future::pending().await,
    }
}
