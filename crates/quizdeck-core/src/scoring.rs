//! Score computation and the pass/fail verdict.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Point values and pass mark.
///
/// The default rule awards 2 points per correct answer, takes 1 point per
/// incorrect answer, ignores unanswered questions, and passes at 17.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRule {
    #[serde(default = "default_correct_points")]
    pub correct_points: i64,
    #[serde(default = "default_incorrect_points")]
    pub incorrect_points: i64,
    #[serde(default = "default_pass_mark")]
    pub pass_mark: i64,
}

fn default_correct_points() -> i64 {
    2
}

fn default_incorrect_points() -> i64 {
    -1
}

fn default_pass_mark() -> i64 {
    17
}

impl Default for ScoringRule {
    fn default() -> Self {
        Self {
            correct_points: default_correct_points(),
            incorrect_points: default_incorrect_points(),
            pass_mark: default_pass_mark(),
        }
    }
}

impl ScoringRule {
    pub fn score(&self, correct: usize, incorrect: usize) -> i64 {
        self.correct_points * correct as i64 + self.incorrect_points * incorrect as i64
    }

    /// A score at or above the pass mark passes; anything below, including
    /// zero and negative scores, fails.
    pub fn verdict(&self, score: i64) -> Verdict {
        if score >= self.pass_mark {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    pub fn card(&self, tally: Tally) -> ScoreCard {
        let score = self.score(tally.correct, tally.incorrect);
        ScoreCard {
            correct: tally.correct,
            incorrect: tally.incorrect,
            unanswered: tally.unanswered,
            score,
            verdict: self.verdict(score),
        }
    }
}

/// Outcome counts for one checked session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub correct: usize,
    pub incorrect: usize,
    pub unanswered: usize,
}

/// Pass or fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    /// Message shown to the user alongside the score.
    pub fn message(self) -> &'static str {
        match self {
            Verdict::Pass => "Passed, congratulations!",
            Verdict::Fail => "Failed...",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => write!(f, "pass"),
            Verdict::Fail => write!(f, "fail"),
        }
    }
}

/// Counts, score, and verdict surfaced after checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub correct: usize,
    pub incorrect: usize,
    pub unanswered: usize,
    pub score: i64,
    pub verdict: Verdict,
}

impl ScoreCard {
    pub fn total(&self) -> usize {
        self.correct + self.incorrect + self.unanswered
    }
}
