//! Plain-text rendering for terminals.

use std::fmt::Write;

use quizdeck_core::scoring::ScoreCard;
use quizdeck_core::view::{nav_totals, NavButton, OptionMark, QuestionView};

fn mark_suffix(mark: OptionMark) -> &'static str {
    match mark {
        OptionMark::None => "",
        OptionMark::Active => "  <",
        OptionMark::SelectedCorrect => "  [correct]",
        OptionMark::SelectedWrong => "  [wrong]",
        OptionMark::ShouldSelect => "  [answer]",
    }
}

/// One question block, options indented under the heading.
pub fn format_question(q: &QuestionView) -> String {
    let mut out = String::new();
    let flag = if q.flagged_incorrect {
        "  (answered incorrectly last time)"
    } else {
        ""
    };
    let _ = writeln!(out, "{}. [#{}] {}{flag}", q.position, q.id, q.heading);
    if !q.body.is_empty() {
        let _ = writeln!(out, "   {}", q.body);
    }
    for o in &q.options {
        let _ = writeln!(out, "   {}) {}{}", o.label, o.text, mark_suffix(o.mark));
    }
    out
}

pub fn format_questions(views: &[QuestionView]) -> String {
    views
        .iter()
        .map(format_question)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_totals(nav: &[NavButton]) -> String {
    let (correct, incorrect, unanswered, never) = nav_totals(nav);
    format!(
        "{correct} correct, {incorrect} incorrect, {unanswered} unanswered, {never} not attempted"
    )
}

/// Counts, score, and verdict message.
pub fn format_scorecard(card: &ScoreCard) -> String {
    format!(
        "Correct: {} | Incorrect: {} | Unanswered: {}\nScore: {}\n{}",
        card.correct,
        card.incorrect,
        card.unanswered,
        card.score,
        card.verdict.message()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizdeck_core::model::{Label, QuestionId, QuestionStatus};
    use quizdeck_core::scoring::{ScoringRule, Tally};
    use quizdeck_core::view::{NavStyle, OptionView};

    fn view(flagged: bool, marks: [OptionMark; 2]) -> QuestionView {
        QuestionView {
            position: 2,
            id: QuestionId::from("17"),
            heading: "Capital of Azerbaijan?".into(),
            body: String::new(),
            flagged_incorrect: flagged,
            options: vec![
                OptionView {
                    label: Label::from_index(0).unwrap(),
                    text: "Baku".into(),
                    mark: marks[0],
                },
                OptionView {
                    label: Label::from_index(1).unwrap(),
                    text: "Ganja".into(),
                    mark: marks[1],
                },
            ],
        }
    }

    #[test]
    fn question_block_layout() {
        let text = format_question(&view(false, [OptionMark::None, OptionMark::Active]));
        assert_eq!(
            text,
            "2. [#17] Capital of Azerbaijan?\n   A) Baku\n   B) Ganja  <\n"
        );
    }

    #[test]
    fn checked_marks_and_flag() {
        let text = format_question(&view(
            true,
            [OptionMark::ShouldSelect, OptionMark::SelectedWrong],
        ));
        assert!(text.contains("answered incorrectly last time"));
        assert!(text.contains("A) Baku  [answer]"));
        assert!(text.contains("B) Ganja  [wrong]"));
    }

    #[test]
    fn totals_line() {
        let nav: Vec<NavButton> = [
            Some(QuestionStatus::Correct),
            Some(QuestionStatus::Incorrect),
            None,
        ]
        .into_iter()
        .enumerate()
        .map(|(i, status)| NavButton {
            id: QuestionId::from(i as u64 + 1),
            status,
            style: NavStyle::for_status(status),
        })
        .collect();

        assert_eq!(
            format_totals(&nav),
            "1 correct, 1 incorrect, 0 unanswered, 1 not attempted"
        );
    }

    #[test]
    fn scorecard_lines() {
        let card = ScoringRule::default().card(Tally {
            correct: 10,
            incorrect: 3,
            unanswered: 12,
        });
        let text = format_scorecard(&card);
        assert!(text.contains("Correct: 10 | Incorrect: 3 | Unanswered: 12"));
        assert!(text.contains("Score: 17"));
        assert!(text.ends_with(card.verdict.message()));
    }
}
