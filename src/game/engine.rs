//! Game engine: one five-round session of one variant
//!
//! The engine validates player inputs against the current [`RoundSpec`],
//! keeps score, and runs the feedback windows on its own [`Scheduler`].
//! Inputs that do not fit the current round (unknown item ids, choices that
//! are not offered, an answer shape for another variant) are ignored and
//! reported as [`InputEffect::Ignored`].

use crate::core::{ItemId, PlayerProfile, Side, Variant};
use crate::game::config::EngineConfig;
use crate::game::interaction::{InteractionState, RoundOutcome, SessionState};
use crate::game::logger::{category, GameLogger, VerbosityLevel};
use crate::game::scheduler::{Scheduler, TaskId};
use crate::game::score::{ScoreTracker, Stars};
use crate::rounds::{generate_round, RandomSource, RoundSpec};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::Serialize;
use std::time::Duration;

/// Which feedback window is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Correct,
    Wrong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "phase", content = "feedback", rename_all = "snake_case")]
pub enum Phase {
    /// Accepting answers for the current round
    AwaitingInput,
    /// A feedback window is open; answer submissions are locked out
    Feedback(FeedbackKind),
    /// All rounds played; the score is final
    Complete,
    /// The player left mid-session; every timer has been cancelled
    Abandoned,
}

/// Answer for the single-shot variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Answer {
    /// Counting: one of the offered numbers
    Count(u32),
    /// Comparison: the group believed to be larger
    Side(Side),
}

/// Input events delivered by the rendering layer or a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlayerInput {
    ToggleItem(ItemId),
    SubmitAnswer(Answer),
    SubmitSelection,
    TapSequenceItem(ItemId),
}

/// What an input did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InputEffect {
    /// No state changed
    Ignored,
    /// An item was ticked or selected (`marked`) or released
    Toggled { item: ItemId, marked: bool },
    /// A sequencing item took its place without finishing the order
    Placed { item: ItemId, ordinal: u8 },
    Correct,
    Incorrect,
}

/// Delayed messages the engine sends itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineEvent {
    SpeakingDone,
    AdvanceRound,
    ForfeitRound,
    ClearWrong,
    ClearMistap,
}

pub struct GameEngine {
    variant: Variant,
    config: EngineConfig,
    source: Box<dyn RandomSource + Send>,
    round: RoundSpec,
    state: SessionState,
    phase: Phase,
    tracker: ScoreTracker,
    scheduler: Scheduler<EngineEvent>,
    speaking: bool,
    /// Wrong answers in the current round
    attempts: u32,
    /// Wrong answers and mistaps across the session
    mistakes: u32,
    mistap_task: Option<TaskId>,
    profile: Option<PlayerProfile>,
    logger: GameLogger,
}

impl GameEngine {
    /// Engine with the default config and an entropy-seeded RNG
    pub fn new(variant: Variant) -> Self {
        Self::with_source(
            variant,
            EngineConfig::default(),
            Box::new(ChaCha12Rng::from_entropy()),
        )
    }

    /// Engine whose rounds are reproducible from `seed`
    pub fn seeded(variant: Variant, config: EngineConfig, seed: u64) -> Self {
        Self::with_source(variant, config, Box::new(ChaCha12Rng::seed_from_u64(seed)))
    }

    /// Engine drawing its rounds from `source`; round 1 is generated here
    pub fn with_source(
        variant: Variant,
        config: EngineConfig,
        mut source: Box<dyn RandomSource + Send>,
    ) -> Self {
        let config = config.normalized();
        let round = generate_round(variant, 1, source.as_mut());
        GameEngine {
            variant,
            tracker: ScoreTracker::new(config.total_rounds),
            config,
            source,
            round,
            state: SessionState::new(variant),
            phase: Phase::AwaitingInput,
            scheduler: Scheduler::new(),
            speaking: false,
            attempts: 0,
            mistakes: 0,
            mistap_task: None,
            profile: None,
            logger: GameLogger::with_verbosity(VerbosityLevel::Silent),
        }
    }

    pub fn with_logger(mut self, logger: GameLogger) -> Self {
        self.logger = logger;
        self.log_round_start();
        self
    }

    pub fn with_profile(mut self, profile: PlayerProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The player this session was started for
    pub fn profile(&self) -> Option<&PlayerProfile> {
        self.profile.as_ref()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn round(&self) -> &RoundSpec {
        &self.round
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.state.interaction
    }

    pub fn outcome(&self) -> RoundOutcome {
        self.state.outcome
    }

    pub fn current_round(&self) -> u32 {
        self.state.current_round
    }

    pub fn total_rounds(&self) -> u32 {
        self.tracker.total_rounds()
    }

    pub fn score(&self) -> u32 {
        self.tracker.score()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    /// Whether the session no longer accepts input
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Complete | Phase::Abandoned)
    }

    /// Whether a feedback window is locking out answers
    pub fn is_locked(&self) -> bool {
        matches!(self.phase, Phase::Feedback(_))
    }

    /// Whether the mascot is speaking after a correct answer
    pub fn speaking(&self) -> bool {
        self.speaking
    }

    /// Stars earned, available only once the session is complete
    pub fn stars(&self) -> Option<Stars> {
        self.is_complete().then(|| self.tracker.stars())
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    pub fn attempts_this_round(&self) -> u32 {
        self.attempts
    }

    /// Logical time since the session started
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Time until the next timer fires, if any is pending
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_due_in()
    }

    pub fn logger(&self) -> &GameLogger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut GameLogger {
        &mut self.logger
    }

    pub fn toggle_item(&mut self, item: ItemId) -> InputEffect {
        self.handle(PlayerInput::ToggleItem(item))
    }

    pub fn submit_answer(&mut self, answer: Answer) -> InputEffect {
        self.handle(PlayerInput::SubmitAnswer(answer))
    }

    pub fn submit_selection(&mut self) -> InputEffect {
        self.handle(PlayerInput::SubmitSelection)
    }

    pub fn tap_sequence_item(&mut self, item: ItemId) -> InputEffect {
        self.handle(PlayerInput::TapSequenceItem(item))
    }

    /// Apply one player input
    pub fn handle(&mut self, input: PlayerInput) -> InputEffect {
        if self.is_finished() {
            return InputEffect::Ignored;
        }
        match input {
            PlayerInput::ToggleItem(item) => self.toggle(item),
            PlayerInput::SubmitAnswer(answer) => self.submit(answer),
            PlayerInput::SubmitSelection => self.check_selection(),
            PlayerInput::TapSequenceItem(item) => self.tap(item),
        }
    }

    /// Let `elapsed` pass, firing every timer that comes due
    pub fn advance_time(&mut self, elapsed: Duration) {
        let deadline = self.scheduler.now() + elapsed;
        while let Some(event) = self.scheduler.pop_due(deadline) {
            self.fire(event);
        }
        self.scheduler.advance_to(deadline);
    }

    /// Fire all pending timers, jumping the clock as far as needed
    pub fn settle(&mut self) {
        while let Some(wait) = self.scheduler.next_due_in() {
            self.advance_time(wait);
        }
    }

    /// Leave the session: cancel all timers and stop accepting input
    pub fn shutdown(&mut self) {
        self.scheduler.cancel_all();
        self.mistap_task = None;
        self.speaking = false;
        if !self.is_finished() {
            self.phase = Phase::Abandoned;
            self.logger.event(
                VerbosityLevel::Normal,
                category::SESSION,
                &format!(
                    "Left {} during round {} with score {}",
                    self.variant,
                    self.state.current_round,
                    self.tracker.score()
                ),
            );
        }
    }

    fn toggle(&mut self, item: ItemId) -> InputEffect {
        let allowed = match self.variant {
            // Ticking toys off is a counting aid, not an answer
            Variant::Counting => true,
            Variant::Selection => self.phase == Phase::AwaitingInput,
            Variant::Comparison | Variant::Sequencing => false,
        };
        if !allowed || !self.round.has_item(item) {
            return InputEffect::Ignored;
        }
        match self.state.interaction.toggle(item) {
            Some(marked) => InputEffect::Toggled { item, marked },
            None => InputEffect::Ignored,
        }
    }

    fn submit(&mut self, answer: Answer) -> InputEffect {
        if self.phase != Phase::AwaitingInput {
            return InputEffect::Ignored;
        }
        let correct = match (&self.round, answer, &mut self.state.interaction) {
            (
                RoundSpec::Counting(round),
                Answer::Count(value),
                InteractionState::Counting { last_choice, .. },
            ) => {
                if !round.is_choice(value) {
                    return InputEffect::Ignored;
                }
                *last_choice = Some(value);
                value == round.target_count
            }
            (
                RoundSpec::Comparison(round),
                Answer::Side(side),
                InteractionState::Comparison { last_choice },
            ) => {
                *last_choice = Some(side);
                side == round.correct_side
            }
            _ => return InputEffect::Ignored,
        };
        self.evaluate(correct, &format!("{:?}", answer))
    }

    fn check_selection(&mut self) -> InputEffect {
        if self.phase != Phase::AwaitingInput {
            return InputEffect::Ignored;
        }
        let RoundSpec::Selection(round) = &self.round else {
            return InputEffect::Ignored;
        };
        let selected = self.state.interaction.marked_count() as u32;
        let correct = selected == round.target_count;
        self.evaluate(correct, &format!("{} selected", selected))
    }

    fn tap(&mut self, item: ItemId) -> InputEffect {
        if self.phase != Phase::AwaitingInput {
            return InputEffect::Ignored;
        }
        let RoundSpec::Sequencing(round) = &self.round else {
            return InputEffect::Ignored;
        };
        let Some(ordinal) = round.doll(item).map(|d| d.ordinal) else {
            return InputEffect::Ignored;
        };
        let item_count = round.item_count;
        let InteractionState::Sequencing { placed, wrong_item } = &mut self.state.interaction
        else {
            return InputEffect::Ignored;
        };

        let expected = placed.len() as u8 + 1;
        if ordinal < expected {
            return InputEffect::Ignored;
        }
        if ordinal > expected {
            *wrong_item = Some(item);
            self.state.outcome = RoundOutcome::Incorrect;
            self.mistakes += 1;
            if let Some(task) = self.mistap_task.take() {
                self.scheduler.cancel(task);
            }
            let delay = self.config.mistap_feedback();
            self.mistap_task = Some(self.scheduler.schedule(delay, EngineEvent::ClearMistap));
            self.logger.event(
                VerbosityLevel::Normal,
                category::OUTCOME,
                &format!("Tapped {} while {} was next", ordinal, expected),
            );
            return InputEffect::Incorrect;
        }

        placed.push(ordinal);
        *wrong_item = None;
        let finished = placed.len() as u8 == item_count;
        self.state.outcome = RoundOutcome::Pending;
        if let Some(task) = self.mistap_task.take() {
            self.scheduler.cancel(task);
        }
        if finished {
            self.evaluate(true, &format!("order 1..={}", item_count))
        } else {
            InputEffect::Placed { item, ordinal }
        }
    }

    fn evaluate(&mut self, correct: bool, described: &str) -> InputEffect {
        let round = self.state.current_round;
        if correct {
            self.tracker.record_correct();
            self.state.score = self.tracker.score();
            self.state.outcome = RoundOutcome::Correct;
            self.phase = Phase::Feedback(FeedbackKind::Correct);
            self.speaking = true;
            self.scheduler
                .schedule(self.config.speaking(), EngineEvent::SpeakingDone);
            self.scheduler
                .schedule(self.config.correct_feedback(), EngineEvent::AdvanceRound);
            self.logger.event(
                VerbosityLevel::Normal,
                category::OUTCOME,
                &format!(
                    "Round {}: {} is correct (score {})",
                    round,
                    described,
                    self.tracker.score()
                ),
            );
            return InputEffect::Correct;
        }

        self.attempts += 1;
        self.mistakes += 1;
        self.state.outcome = RoundOutcome::Incorrect;
        self.phase = Phase::Feedback(FeedbackKind::Wrong);
        let exhausted = self
            .config
            .max_attempts_per_round
            .is_some_and(|max| self.attempts >= max);
        let event = if exhausted {
            EngineEvent::ForfeitRound
        } else {
            EngineEvent::ClearWrong
        };
        self.scheduler.schedule(self.config.wrong_feedback(), event);
        self.logger.event(
            VerbosityLevel::Normal,
            category::OUTCOME,
            &format!("Round {}: {} is wrong, try again", round, described),
        );
        InputEffect::Incorrect
    }

    fn fire(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::SpeakingDone => self.speaking = false,
            EngineEvent::ClearWrong => {
                self.phase = Phase::AwaitingInput;
                self.state.outcome = RoundOutcome::Pending;
                self.state.interaction.clear_highlight();
            }
            EngineEvent::ClearMistap => {
                self.mistap_task = None;
                self.state.interaction.clear_highlight();
                if self.state.outcome == RoundOutcome::Incorrect {
                    self.state.outcome = RoundOutcome::Pending;
                }
            }
            EngineEvent::ForfeitRound => {
                self.logger.event(
                    VerbosityLevel::Normal,
                    category::OUTCOME,
                    &format!(
                        "Round {}: out of attempts, moving on",
                        self.state.current_round
                    ),
                );
                self.next_round();
            }
            EngineEvent::AdvanceRound => self.next_round(),
        }
    }

    fn next_round(&mut self) {
        if self.state.current_round >= self.tracker.total_rounds() {
            self.complete();
            return;
        }
        self.state.current_round += 1;
        self.round = generate_round(self.variant, self.state.current_round, self.source.as_mut());
        self.state.interaction = InteractionState::fresh(self.variant);
        self.state.outcome = RoundOutcome::Pending;
        self.phase = Phase::AwaitingInput;
        self.attempts = 0;
        if let Some(task) = self.mistap_task.take() {
            self.scheduler.cancel(task);
        }
        self.log_round_start();
    }

    fn complete(&mut self) {
        self.phase = Phase::Complete;
        self.speaking = false;
        self.mistap_task = None;
        self.scheduler.cancel_all();
        self.logger.event(
            VerbosityLevel::Minimal,
            category::SESSION,
            &format!(
                "Session complete: {} scored {}/{} {}",
                self.variant,
                self.tracker.score(),
                self.tracker.total_rounds(),
                self.tracker.stars()
            ),
        );
    }

    fn log_round_start(&self) {
        self.logger.event(
            VerbosityLevel::Verbose,
            category::ROUND,
            &format!(
                "Round {}/{} ({}): answer {:?}",
                self.state.current_round,
                self.tracker.total_rounds(),
                self.variant,
                self.round.solution()
            ),
        );
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("variant", &self.variant)
            .field("round", &self.state.current_round)
            .field("score", &self.tracker.score())
            .field("phase", &self.phase)
            .field("now", &self.scheduler.now())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rounds::ScriptedSource;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn scripted(variant: Variant, script: Vec<u32>) -> GameEngine {
        GameEngine::with_source(
            variant,
            EngineConfig::default(),
            Box::new(ScriptedSource::new(script)),
        )
    }

    fn comparison_engine() -> GameEngine {
        // Glyphs 0 and 1, counts 3 vs 1, colors 0 and 1: A is larger
        scripted(Variant::Comparison, vec![0, 1, 3, 1, 0, 1])
    }

    #[test]
    fn test_correct_answer_locks_then_advances() {
        let mut engine = comparison_engine();
        assert_eq!(engine.submit_answer(Answer::Side(Side::A)), InputEffect::Correct);
        assert_eq!(engine.score(), 1);
        assert!(engine.is_locked());
        assert!(engine.speaking());

        assert_eq!(
            engine.submit_answer(Answer::Side(Side::A)),
            InputEffect::Ignored
        );
        assert_eq!(engine.score(), 1);

        engine.advance_time(ms(1200));
        assert!(!engine.speaking());
        assert_eq!(engine.current_round(), 1);
        engine.advance_time(ms(300));
        assert_eq!(engine.current_round(), 2);
        assert_eq!(engine.phase(), Phase::AwaitingInput);
        assert_eq!(engine.outcome(), RoundOutcome::Pending);
    }

    #[test]
    fn test_wrong_answer_window() {
        let mut engine = comparison_engine();
        assert_eq!(engine.submit_answer(Answer::Side(Side::B)), InputEffect::Incorrect);
        assert_eq!(engine.outcome(), RoundOutcome::Incorrect);
        assert!(matches!(
            engine.interaction(),
            InteractionState::Comparison { last_choice: Some(Side::B) }
        ));
        engine.advance_time(ms(999));
        assert!(engine.is_locked());
        engine.advance_time(ms(1));
        assert_eq!(engine.phase(), Phase::AwaitingInput);
        assert_eq!(engine.outcome(), RoundOutcome::Pending);
        assert_eq!(engine.current_round(), 1);
        assert_eq!(engine.mistakes(), 1);
    }

    #[test]
    fn test_mismatched_answer_shape_is_ignored() {
        let mut engine = comparison_engine();
        assert_eq!(engine.submit_answer(Answer::Count(3)), InputEffect::Ignored);
        assert_eq!(engine.submit_selection(), InputEffect::Ignored);
        assert_eq!(engine.toggle_item(ItemId::new(0)), InputEffect::Ignored);
        assert_eq!(engine.outcome(), RoundOutcome::Pending);
    }

    #[test]
    fn test_attempt_limit_forfeits_round() {
        let mut engine = GameEngine::with_source(
            Variant::Comparison,
            EngineConfig::default().with_max_attempts(Some(1)),
            Box::new(ScriptedSource::new([0, 1, 3, 1, 0, 1])),
        );
        engine.submit_answer(Answer::Side(Side::B));
        engine.advance_time(ms(1000));
        assert_eq!(engine.current_round(), 2);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.attempts_this_round(), 0);
    }

    #[test]
    fn test_zero_round_config_still_scores() {
        let config = EngineConfig {
            total_rounds: 0,
            ..EngineConfig::default()
        };
        let mut engine = GameEngine::with_source(
            Variant::Comparison,
            config,
            Box::new(ScriptedSource::new([0, 1, 3, 1, 0, 1])),
        );
        assert_eq!(engine.total_rounds(), 1);
        assert_eq!(engine.submit_answer(Answer::Side(Side::A)), InputEffect::Correct);
        assert_eq!(engine.score(), 1);
        engine.settle();
        assert!(engine.is_complete());
        assert_eq!(engine.stars(), Some(Stars::One));
    }

    #[test]
    fn test_shutdown_cancels_timers() {
        let mut engine = comparison_engine();
        engine.submit_answer(Answer::Side(Side::A));
        engine.shutdown();
        assert_eq!(engine.phase(), Phase::Abandoned);
        assert_eq!(engine.next_deadline(), None);
        engine.advance_time(ms(10_000));
        assert_eq!(engine.current_round(), 1);
        assert!(!engine.speaking());
        assert_eq!(engine.submit_answer(Answer::Side(Side::A)), InputEffect::Ignored);
    }

    #[test]
    fn test_stars_only_when_complete() {
        let mut engine = GameEngine::seeded(
            Variant::Comparison,
            EngineConfig::default().with_total_rounds(1),
            7,
        );
        assert_eq!(engine.stars(), None);
        let side = match engine.round() {
            RoundSpec::Comparison(r) => r.correct_side,
            _ => unreachable!(),
        };
        engine.submit_answer(Answer::Side(side));
        engine.settle();
        assert!(engine.is_complete());
        assert_eq!(engine.stars(), Some(Stars::One));
        assert_eq!(engine.next_deadline(), None);
    }

    #[test]
    fn test_logger_records_outcomes() {
        let mut engine = comparison_engine().with_logger(GameLogger::capturing());
        engine.submit_answer(Answer::Side(Side::B));
        let logs = engine.logger().logs();
        assert_eq!(logs[0].category.as_deref(), Some("round"));
        assert_eq!(logs[1].category.as_deref(), Some("outcome"));
        assert!(logs[1].message.contains("wrong"));
    }
}
