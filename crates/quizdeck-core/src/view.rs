//! Presentation output.
//!
//! Views are plain values computed from the session and the status map.
//! Drawing them (HTML, terminal) is left to `quizdeck-report`.

use serde::Serialize;

use crate::model::{Label, QuestionBank, QuestionId, QuestionStatus, StatusMap};
use crate::session::{Outcome, QuizSession};

/// Visual state of one option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionMark {
    None,
    /// Currently selected, not yet checked.
    Active,
    SelectedCorrect,
    SelectedWrong,
    /// The right answer to a question that was missed or skipped.
    ShouldSelect,
}

impl OptionMark {
    pub fn css_class(self) -> &'static str {
        match self {
            OptionMark::None => "",
            OptionMark::Active => "active",
            OptionMark::SelectedCorrect => "selected-correct",
            OptionMark::SelectedWrong => "selected-wrong",
            OptionMark::ShouldSelect => "should-select",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionView {
    pub label: Label,
    pub text: String,
    pub mark: OptionMark,
}

/// One question block.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    /// 1-based position in the session.
    pub position: usize,
    pub id: QuestionId,
    pub heading: String,
    pub body: String,
    /// Answered incorrectly in an earlier session.
    pub flagged_incorrect: bool,
    pub options: Vec<OptionView>,
}

/// Build the question blocks for `session` in its current phase.
pub fn question_views(session: &QuizSession) -> Vec<QuestionView> {
    session
        .questions()
        .iter()
        .enumerate()
        .map(|(index, q)| {
            let selected = session.selection(index);
            let outcome = session.outcome(index);

            let options = q
                .options
                .iter()
                .map(|o| {
                    let is_selected = selected == Some(o.label);
                    let mark = match outcome {
                        None if is_selected => OptionMark::Active,
                        None => OptionMark::None,
                        Some(Outcome::Correct) if is_selected => OptionMark::SelectedCorrect,
                        Some(Outcome::Incorrect) if is_selected => OptionMark::SelectedWrong,
                        Some(Outcome::Incorrect | Outcome::Unanswered) if o.is_correct => {
                            OptionMark::ShouldSelect
                        }
                        Some(_) => OptionMark::None,
                    };
                    OptionView {
                        label: o.label,
                        text: o.text.clone(),
                        mark,
                    }
                })
                .collect();

            QuestionView {
                position: index + 1,
                id: q.id().clone(),
                heading: q.question.heading.clone(),
                body: q.question.body.clone(),
                flagged_incorrect: q.flagged_incorrect,
                options,
            }
        })
        .collect()
}

/// Style of a navigation control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavStyle {
    Success,
    Danger,
    Neutral,
    /// Never attempted.
    Default,
}

impl NavStyle {
    pub fn for_status(status: Option<QuestionStatus>) -> Self {
        match status {
            Some(QuestionStatus::Correct) => NavStyle::Success,
            Some(QuestionStatus::Incorrect) => NavStyle::Danger,
            Some(QuestionStatus::Unanswered) => NavStyle::Neutral,
            None => NavStyle::Default,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            NavStyle::Success => "btn-success",
            NavStyle::Danger => "btn-danger",
            NavStyle::Neutral => "btn-secondary",
            NavStyle::Default => "btn-outline-secondary",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NavButton {
    pub id: QuestionId,
    pub status: Option<QuestionStatus>,
    pub style: NavStyle,
}

/// One control per bank question, sampled or not, in bank order.
pub fn nav_panel(bank: &QuestionBank, statuses: &StatusMap) -> Vec<NavButton> {
    bank.iter()
        .map(|q| {
            let status = statuses.get(&q.id).copied();
            NavButton {
                id: q.id.clone(),
                status,
                style: NavStyle::for_status(status),
            }
        })
        .collect()
}

/// Status totals for a panel: (correct, incorrect, unanswered, never attempted).
pub fn nav_totals(panel: &[NavButton]) -> (usize, usize, usize, usize) {
    panel
        .iter()
        .fold((0, 0, 0, 0), |(c, i, u, n), b| match b.status {
            Some(QuestionStatus::Correct) => (c + 1, i, u, n),
            Some(QuestionStatus::Incorrect) => (c, i + 1, u, n),
            Some(QuestionStatus::Unanswered) => (c, i, u + 1, n),
            None => (c, i, u, n + 1),
        })
}
