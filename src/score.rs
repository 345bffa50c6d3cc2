//! Scoring a correlation guess against the hidden truth.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::util::round_to;

/// Difficulty curve: `penalty = min(1, (|guess - truth| / 2)^exponent * multiplier)`.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Strict,
    #[default]
    Normal,
    Lenient,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Strict, Difficulty::Normal, Difficulty::Lenient];

    pub fn exponent(&self) -> f64 {
        match self {
            Difficulty::Strict => 0.9,
            Difficulty::Normal => 1.0,
            Difficulty::Lenient => 1.1,
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            Difficulty::Strict => 2.5,
            Difficulty::Normal => 2.3,
            Difficulty::Lenient => 2.1,
        }
    }

    /// Penalty in `[0, 1]` for a normalized error in `[0, 1]`.
    pub fn penalty(&self, normalized_error: f64) -> f64 {
        (normalized_error.powf(self.exponent()) * self.multiplier()).min(1.0)
    }

    pub fn next(&self) -> Self {
        match self {
            Difficulty::Strict => Difficulty::Normal,
            Difficulty::Normal => Difficulty::Lenient,
            Difficulty::Lenient => Difficulty::Strict,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display)]
pub enum Grade {
    S,
    A,
    B,
    C,
    F,
}

impl Grade {
    /// Bands are inclusive on their lower bound.
    pub fn from_score(score: f64) -> Self {
        if score >= 95.0 {
            Grade::S
        } else if score >= 85.0 {
            Grade::A
        } else if score >= 75.0 {
            Grade::B
        } else if score >= 65.0 {
            Grade::C
        } else {
            Grade::F
        }
    }

    pub fn emblem(&self) -> &'static str {
        match self {
            Grade::S => "🏆",
            Grade::A => "🎉",
            Grade::B => "✨",
            Grade::C => "💪",
            Grade::F => "🔥",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// `0.0..=100.0`, rounded to two decimals.
    pub score: f64,
    pub grade: Grade,
}

pub fn evaluate(guessed_r: f64, true_r: f64, difficulty: Difficulty) -> Evaluation {
    let diff = (guessed_r - true_r).abs();
    let norm = diff / 2.0;
    let penalty = difficulty.penalty(norm);
    let score = round_to(((1.0 - penalty) * 100.0).max(0.0), 2);

    Evaluation {
        score,
        grade: Grade::from_score(score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn exact_guess_is_perfect() {
        for difficulty in Difficulty::ALL {
            for r in [-0.94, -0.3, 0.0, 0.5, 0.9114837087457999] {
                let e = evaluate(r, r, difficulty);
                assert_eq!(e.score, 100.0);
                assert_eq!(e.grade, Grade::S);
            }
        }
    }

    #[test]
    fn saturated_error_scores_zero() {
        let truth = 0.9114837087457999;
        let e = evaluate((truth - 1.0_f64).clamp(-1.0, 1.0), truth, Difficulty::Normal);
        assert_eq!(e.score, 0.0);
        assert_matches!(e.grade, Grade::F);

        let worst = evaluate(-1.0, 1.0, Difficulty::Lenient);
        assert_eq!(worst.score, 0.0);
    }

    #[test]
    fn normal_is_linear_in_error() {
        // diff 0.1 -> norm 0.05 -> penalty 0.115
        let e = evaluate(0.4, 0.5, Difficulty::Normal);
        assert_eq!(e.score, 88.5);
        assert_eq!(e.grade, Grade::A);
    }

    #[test]
    fn strict_is_harsher_than_lenient() {
        let strict = evaluate(0.2, 0.5, Difficulty::Strict).score;
        let normal = evaluate(0.2, 0.5, Difficulty::Normal).score;
        let lenient = evaluate(0.2, 0.5, Difficulty::Lenient).score;
        assert!(strict < normal, "{strict} vs {normal}");
        assert!(normal < lenient, "{normal} vs {lenient}");
    }

    #[test]
    fn score_never_increases_with_error() {
        for difficulty in Difficulty::ALL {
            let truth = -0.25;
            let mut last = f64::INFINITY;
            for i in 0..=125 {
                let guess = truth + i as f64 * 0.01;
                let s = evaluate(guess, truth, difficulty).score;
                assert!(s <= last, "score rose at offset {i}");
                assert!((0.0..=100.0).contains(&s));
                last = s;
            }
        }
    }

    #[test]
    fn direction_of_error_does_not_matter() {
        let above = evaluate(0.35, 0.2, Difficulty::Normal);
        let below = evaluate(0.05, 0.2, Difficulty::Normal);
        assert!((above.score - below.score).abs() <= 0.01);
    }

    #[test]
    fn grade_thresholds_are_inclusive() {
        assert_eq!(Grade::from_score(100.0), Grade::S);
        assert_eq!(Grade::from_score(95.0), Grade::S);
        assert_eq!(Grade::from_score(94.99), Grade::A);
        assert_eq!(Grade::from_score(85.0), Grade::A);
        assert_eq!(Grade::from_score(84.99), Grade::B);
        assert_eq!(Grade::from_score(75.0), Grade::B);
        assert_eq!(Grade::from_score(74.99), Grade::C);
        assert_eq!(Grade::from_score(65.0), Grade::C);
        assert_eq!(Grade::from_score(64.99), Grade::F);
        assert_eq!(Grade::from_score(0.0), Grade::F);
    }

    #[test]
    fn scores_round_the_stored_value() {
        // raw 23.294999999999998 and 20.075 (stored as 20.07499...)
        assert_eq!(evaluate(-0.967, -0.3, Difficulty::Normal).score, 23.29);
        assert_eq!(evaluate(-0.995, -0.3, Difficulty::Normal).score, 20.07);
    }

    #[test]
    fn evaluated_scores_grade_at_band_edges() {
        // Normal: raw score = 100 - 115 * |diff|
        let cases = [
            (0.04348, 95.0, Grade::S),
            (0.04357, 94.99, Grade::A),
            (0.13043, 85.0, Grade::A),
            (0.13052, 84.99, Grade::B),
            (0.21739, 75.0, Grade::B),
            (0.21748, 74.99, Grade::C),
            (0.30434, 65.0, Grade::C),
            (0.30443, 64.99, Grade::F),
        ];
        for (guess, score, grade) in cases {
            let e = evaluate(guess, 0.0, Difficulty::Normal);
            assert_eq!((e.score, e.grade), (score, grade), "guess {guess}");
        }
    }

    #[test]
    fn difficulty_presets() {
        assert_eq!(Difficulty::default(), Difficulty::Normal);
        assert_eq!(
            (Difficulty::Strict.exponent(), Difficulty::Strict.multiplier()),
            (0.9, 2.5)
        );
        assert_eq!(
            (Difficulty::Lenient.exponent(), Difficulty::Lenient.multiplier()),
            (1.1, 2.1)
        );
        assert_eq!(Difficulty::Normal.penalty(0.0), 0.0);
        assert_eq!(Difficulty::Normal.penalty(0.9), 1.0);
    }

    #[test]
    fn difficulty_cycles_and_displays() {
        assert_eq!(Difficulty::Strict.next(), Difficulty::Normal);
        assert_eq!(Difficulty::Lenient.next(), Difficulty::Strict);
        assert_eq!(Difficulty::Lenient.to_string(), "lenient");
        assert_eq!(Grade::S.to_string(), "S");
    }
}
