use rand::Rng;
use tracing::debug;

use crate::config::{Config, MAX_POINTS, MIN_POINTS};
use crate::error::GameResult;
use crate::round::Round;
use crate::score::Evaluation;
use crate::streak::Streak;

/// New seeds are drawn from `0..SEED_LIMIT`.
pub const SEED_LIMIT: u32 = 1_000_000_000;

pub fn random_seed() -> u32 {
    rand::thread_rng().gen_range(0..SEED_LIMIT)
}

/// What the evaluate/next action did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Evaluated(Evaluation),
    NextRound,
}

/// Game state carried across rounds: settings, the current round and the
/// S-streak. Nothing here outlives the process except what the caller
/// saves from `settings`.
#[derive(Debug, Clone)]
pub struct Session {
    pub settings: Config,
    pub round: Round,
    pub streak: Streak,
}

impl Session {
    pub fn new(settings: Config, seed: Option<u32>) -> GameResult<Self> {
        let settings = settings.sanitized();
        let seed = seed.unwrap_or_else(random_seed);
        let round = Round::with_random_guess(seed, settings.n_points)?;
        Ok(Self {
            settings,
            round,
            streak: Streak::default(),
        })
    }

    pub fn start_round(&mut self, seed: u32) -> GameResult<()> {
        self.round = Round::with_random_guess(seed, self.settings.n_points)?;
        debug!(seed, n = self.settings.n_points, "new round");
        Ok(())
    }

    pub fn next_round(&mut self) -> GameResult<()> {
        self.start_round(random_seed())
    }

    /// Score the round and fold the grade into the streak. Returns `None`
    /// if this round was already scored.
    pub fn evaluate(&mut self) -> Option<Evaluation> {
        if self.round.is_evaluated() {
            return None;
        }
        let evaluation = self.round.evaluate(self.settings.difficulty);
        self.streak = self.streak.record(evaluation.grade);
        Some(evaluation)
    }

    /// Evaluate an open round, or move on from a scored one.
    pub fn act(&mut self) -> GameResult<Action> {
        match self.evaluate() {
            Some(evaluation) => Ok(Action::Evaluated(evaluation)),
            None => {
                self.next_round()?;
                Ok(Action::NextRound)
            }
        }
    }

    pub fn nudge_guess(&mut self, steps: i32) -> bool {
        self.round.nudge_guess(steps, self.settings.r_digits)
    }

    /// Change N by `delta`, clamped, and redraw the same seed.
    pub fn adjust_points(&mut self, delta: isize) -> GameResult<()> {
        let n = self
            .settings
            .n_points
            .saturating_add_signed(delta)
            .clamp(MIN_POINTS, MAX_POINTS);
        if n != self.settings.n_points {
            self.settings.n_points = n;
            self.round.resize(n)?;
        }
        Ok(())
    }

    pub fn cycle_difficulty(&mut self) {
        self.settings.difficulty = self.settings.difficulty.next();
    }

    pub fn cycle_digits(&mut self) {
        self.settings.cycle_digits();
    }

    pub fn toggle_guess_ellipse(&mut self) {
        self.settings.show_guess_ellipse = !self.settings.show_guess_ellipse;
    }

    pub fn toggle_true_ellipse(&mut self) {
        self.settings.show_true_ellipse = !self.settings.show_true_ellipse;
    }
}
