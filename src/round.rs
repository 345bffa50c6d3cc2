use rand::Rng;
use tracing::debug;

use crate::dataset::{synthesize, Dataset};
use crate::ellipse::{ellipse_for, EllipseSettings};
use crate::error::GameResult;
use crate::score::{evaluate, Difficulty, Evaluation};
use crate::summary::{sample_correlation, Bounds, Summary, DOMAIN_PADDING};
use crate::util::round_to;

/// Fresh guesses start somewhere in `[-GUESS_START_LIMIT, GUESS_START_LIMIT)`.
pub const GUESS_START_LIMIT: f64 = 0.8;

/// represents one scatter plot being guessed at
#[derive(Debug, Clone)]
pub struct Round {
    pub seed: u32,
    pub dataset: Dataset,
    pub summary: Summary,
    pub bounds: Bounds,
    pub guess: f64,
    pub evaluation: Option<Evaluation>,
}

impl Round {
    pub fn new(seed: u32, n: usize, guess: f64) -> GameResult<Self> {
        let dataset = synthesize(seed, n)?;
        let summary = Summary::compute(&dataset.points);
        let bounds = Bounds::of(&dataset.points)
            .unwrap_or_default()
            .padded(DOMAIN_PADDING);

        Ok(Self {
            seed,
            dataset,
            summary,
            bounds,
            guess: guess.clamp(-1.0, 1.0),
            evaluation: None,
        })
    }

    /// New round whose starting guess is unrelated to the data. The guess
    /// comes from the thread rng so the seeded stream is left untouched.
    pub fn with_random_guess(seed: u32, n: usize) -> GameResult<Self> {
        let guess = rand::thread_rng().gen_range(-GUESS_START_LIMIT..GUESS_START_LIMIT);
        Self::new(seed, n, guess)
    }

    /// Same seed with a different point count. `true_r` only depends on the
    /// seed, so the guess and any evaluation carry over.
    pub fn resize(&mut self, n: usize) -> GameResult<()> {
        let resized = Self::new(self.seed, n, self.guess)?;
        self.dataset = resized.dataset;
        self.summary = resized.summary;
        self.bounds = resized.bounds;
        Ok(())
    }

    pub fn is_evaluated(&self) -> bool {
        self.evaluation.is_some()
    }

    pub fn true_r(&self) -> f64 {
        self.dataset.true_r
    }

    /// Pearson correlation of the points as drawn.
    pub fn realized_r(&self) -> Option<f64> {
        sample_correlation(&self.dataset.points)
    }

    /// Returns false once the round has been evaluated; the guess is frozen.
    pub fn set_guess(&mut self, r: f64) -> bool {
        if self.is_evaluated() {
            return false;
        }
        self.guess = r.clamp(-1.0, 1.0);
        true
    }

    /// Move the guess by `steps` increments of `10^-digits`.
    pub fn nudge_guess(&mut self, steps: i32, digits: u32) -> bool {
        let step = 10f64.powi(-(digits as i32));
        let target = round_to(self.guess + steps as f64 * step, digits);
        self.set_guess(target)
    }

    /// Score the current guess. A second call returns the first result.
    pub fn evaluate(&mut self, difficulty: Difficulty) -> Evaluation {
        if let Some(evaluation) = self.evaluation {
            return evaluation;
        }
        let evaluation = evaluate(self.guess, self.true_r(), difficulty);
        debug!(
            seed = self.seed,
            guess = self.guess,
            true_r = self.true_r(),
            score = evaluation.score,
            grade = %evaluation.grade,
            "evaluated guess"
        );
        self.evaluation = Some(evaluation);
        evaluation
    }

    pub fn guess_ellipse(&self, settings: EllipseSettings) -> Vec<(f64, f64)> {
        ellipse_for(&self.summary, self.guess, settings)
    }

    /// The truth is only revealed after evaluation.
    pub fn true_ellipse(&self, settings: EllipseSettings) -> Option<Vec<(f64, f64)>> {
        self.is_evaluated()
            .then(|| ellipse_for(&self.summary, self.true_r(), settings))
    }
}
