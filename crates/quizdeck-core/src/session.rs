//! The quiz session state machine.
//!
//! A session starts in [`Phase::Answering`], where selections can be made
//! and toggled, and moves to [`Phase::Checked`] exactly once when the
//! answers are checked. Checking again is a no-op that reports the same
//! score card. Nothing in a session survives a restart except the status
//! map the caller persists.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::model::{Label, Question, QuestionBank, QuestionId, QuestionStatus, StatusMap};
use crate::report::SessionReport;
use crate::scoring::{ScoreCard, ScoringRule, Tally};
use crate::selector::{select_questions, DEFAULT_SAMPLE_SIZE};

/// Session parameters.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Questions drawn per session.
    pub sample_size: usize,
    /// Point values and pass mark.
    pub rule: ScoringRule,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            rule: ScoringRule::default(),
        }
    }
}

/// An option in display order.
#[derive(Debug, Clone)]
pub struct PresentedOption {
    /// Fixed label assigned after shuffling.
    pub label: Label,
    /// Key of the option in the bank record.
    pub key: String,
    /// Display text.
    pub text: String,
    /// Whether this is the option the answer key names.
    pub is_correct: bool,
}

/// A question as displayed in one session.
#[derive(Debug, Clone)]
pub struct SessionQuestion {
    pub question: Question,
    /// Options in shuffled display order, labelled A, B, C...
    pub options: Vec<PresentedOption>,
    /// The question was answered incorrectly in an earlier session.
    /// Informational only; it can be answered again like any other.
    pub flagged_incorrect: bool,
}

impl SessionQuestion {
    /// Shuffle the options of `question` and assign display labels.
    pub fn present<R: Rng + ?Sized>(
        question: Question,
        prior: Option<QuestionStatus>,
        rng: &mut R,
    ) -> Self {
        let mut answers = question.answers.clone();
        answers.shuffle(rng);

        let options = answers
            .into_iter()
            .enumerate()
            .filter_map(|(position, answer)| {
                let label = Label::from_index(position)?;
                Some(PresentedOption {
                    label,
                    is_correct: answer.key == question.correct,
                    key: answer.key,
                    text: answer.text,
                })
            })
            .collect();

        Self {
            question,
            options,
            flagged_incorrect: prior == Some(QuestionStatus::Incorrect),
        }
    }

    pub fn id(&self) -> &QuestionId {
        &self.question.id
    }

    pub fn option(&self, label: Label) -> Option<&PresentedOption> {
        self.options.iter().find(|o| o.label == label)
    }

    /// Display label of the correct option.
    pub fn correct_label(&self) -> Option<Label> {
        self.options.iter().find(|o| o.is_correct).map(|o| o.label)
    }
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Answering,
    Checked,
}

/// Effect of a selection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    /// The option is now the question's selection.
    Selected(Label),
    /// The option was already selected and has been cleared.
    Cleared,
    /// The session is checked; nothing changed.
    Frozen,
}

/// Per-question result of checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Correct,
    Incorrect,
    Unanswered,
}

/// Result of checking one displayed question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub id: QuestionId,
    pub selected: Option<Label>,
    pub correct: Option<Label>,
    pub outcome: Outcome,
}

/// One run through a sampled set of questions.
#[derive(Debug, Clone)]
pub struct QuizSession {
    page: String,
    questions: Vec<SessionQuestion>,
    selections: BTreeMap<usize, Label>,
    phase: Phase,
    rule: ScoringRule,
    card: Option<ScoreCard>,
    outcomes: Vec<QuestionOutcome>,
}

impl QuizSession {
    /// Sample questions for `page` and present them.
    pub fn start<R: Rng + ?Sized>(
        page: impl Into<String>,
        bank: &QuestionBank,
        statuses: &StatusMap,
        config: &SessionConfig,
        rng: &mut R,
    ) -> Self {
        let questions = select_questions(bank, config.sample_size, statuses, rng)
            .into_iter()
            .map(|q| {
                let prior = statuses.get(&q.id).copied();
                SessionQuestion::present(q, prior, &mut *rng)
            })
            .collect();
        Self::with_questions(page, questions, config.rule)
    }

    /// Build a session from already-presented questions.
    pub fn with_questions(
        page: impl Into<String>,
        questions: Vec<SessionQuestion>,
        rule: ScoringRule,
    ) -> Self {
        let page = page.into();
        tracing::debug!(page = %page, questions = questions.len(), "session started");
        Self {
            page,
            questions,
            selections: BTreeMap::new(),
            phase: Phase::Answering,
            rule,
            card: None,
            outcomes: Vec::new(),
        }
    }

    pub fn page(&self) -> &str {
        &self.page
    }

    pub fn questions(&self) -> &[SessionQuestion] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_checked(&self) -> bool {
        self.phase == Phase::Checked
    }

    pub fn rule(&self) -> ScoringRule {
        self.rule
    }

    /// Current selection for the question at `index` (zero-based).
    pub fn selection(&self, index: usize) -> Option<Label> {
        self.selections.get(&index).copied()
    }

    /// Number of questions with a selection.
    pub fn answered(&self) -> usize {
        self.selections.len()
    }

    /// Select, switch, or toggle off the option `label` of question `index`.
    ///
    /// At most one option per question is selected. Selecting the current
    /// selection clears it. Once checked, selections are frozen.
    pub fn select(&mut self, index: usize, label: Label) -> Result<SelectionChange, QuizError> {
        if self.is_checked() {
            return Ok(SelectionChange::Frozen);
        }

        let question = self.questions.get(index).ok_or(QuizError::NoSuchQuestion {
            index,
            len: self.questions.len(),
        })?;
        if question.option(label).is_none() {
            return Err(QuizError::NoSuchOption { index, label });
        }

        if self.selections.get(&index) == Some(&label) {
            self.selections.remove(&index);
            Ok(SelectionChange::Cleared)
        } else {
            self.selections.insert(index, label);
            Ok(SelectionChange::Selected(label))
        }
    }

    /// Check every displayed question and update `statuses`.
    ///
    /// The first call scores the session and freezes it. Later calls leave
    /// `statuses` untouched and return the same score card.
    pub fn check(&mut self, statuses: &mut StatusMap) -> ScoreCard {
        if let Some(card) = self.card {
            tracing::debug!(page = %self.page, "answers already checked");
            return card;
        }

        let mut tally = Tally::default();
        let mut outcomes = Vec::with_capacity(self.questions.len());

        for (index, question) in self.questions.iter().enumerate() {
            let id = question.id().clone();
            let selected = self.selections.get(&index).copied();
            let correct = question.correct_label();

            let outcome = match selected {
                None => {
                    tally.unanswered += 1;
                    // An earlier mistake stays visible until it is fixed.
                    if statuses.get(&id) != Some(&QuestionStatus::Incorrect) {
                        statuses.insert(id.clone(), QuestionStatus::Unanswered);
                    }
                    Outcome::Unanswered
                }
                Some(label) if Some(label) == correct => {
                    tally.correct += 1;
                    statuses.insert(id.clone(), QuestionStatus::Correct);
                    Outcome::Correct
                }
                Some(_) => {
                    tally.incorrect += 1;
                    statuses.insert(id.clone(), QuestionStatus::Incorrect);
                    Outcome::Incorrect
                }
            };

            outcomes.push(QuestionOutcome {
                id,
                selected,
                correct,
                outcome,
            });
        }

        let card = self.rule.card(tally);
        tracing::info!(
            page = %self.page,
            correct = card.correct,
            incorrect = card.incorrect,
            unanswered = card.unanswered,
            score = card.score,
            verdict = %card.verdict,
            "answers checked"
        );

        self.phase = Phase::Checked;
        self.card = Some(card);
        self.outcomes = outcomes;
        card
    }

    /// Score card, once checked.
    pub fn scorecard(&self) -> Option<ScoreCard> {
        self.card
    }

    /// Per-question outcomes, once checked.
    pub fn outcomes(&self) -> &[QuestionOutcome] {
        &self.outcomes
    }

    /// Outcome for the question at `index`, once checked.
    pub fn outcome(&self, index: usize) -> Option<Outcome> {
        self.outcomes.get(index).map(|o| o.outcome)
    }

    /// A persistable record of the checked session.
    pub fn report(&self) -> Option<SessionReport> {
        self.card
            .map(|card| SessionReport::new(&self.page, card, self.outcomes.clone()))
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::model::AnswerOption;
    use crate::scoring::Verdict;

    fn question(id: u64) -> Question {
        Question {
            id: QuestionId::from(id),
            heading: format!("Question {id}"),
            body: "body".into(),
            answers: vec![
                AnswerOption::new("A", "first"),
                AnswerOption::new("B", "second"),
                AnswerOption::new("C", "third"),
                AnswerOption::new("D", "fourth"),
            ],
            correct: "C".into(),
        }
    }

    fn bank(n: u64) -> QuestionBank {
        QuestionBank::new((1..=n).map(question).collect())
    }

    fn session(n: u64, statuses: &StatusMap) -> QuizSession {
        let mut rng = StdRng::seed_from_u64(42);
        QuizSession::start("/topic", &bank(n), statuses, &SessionConfig::default(), &mut rng)
    }

    fn wrong_label(q: &SessionQuestion) -> Label {
        q.options.iter().find(|o| !o.is_correct).unwrap().label
    }

    #[test]
    fn presentation_labels_follow_shuffled_order() {
        let mut rng = StdRng::seed_from_u64(5);
        let q = SessionQuestion::present(question(1), None, &mut rng);

        let labels: Vec<String> = q.options.iter().map(|o| o.label.to_string()).collect();
        assert_eq!(labels, ["A", "B", "C", "D"]);
        assert_eq!(q.options.iter().filter(|o| o.is_correct).count(), 1);

        let correct = q.correct_label().unwrap();
        assert_eq!(q.option(correct).unwrap().text, "third");
        assert!(!q.flagged_incorrect);
    }

    #[test]
    fn previously_incorrect_questions_are_flagged() {
        let mut statuses = StatusMap::new();
        statuses.insert(QuestionId::from(1), QuestionStatus::Incorrect);
        let s = session(1, &statuses);
        assert!(s.questions()[0].flagged_incorrect);
    }

    #[test]
    fn session_samples_at_most_configured_size() {
        let s = session(40, &StatusMap::new());
        assert_eq!(s.len(), 25);
        assert_eq!(s.phase(), Phase::Answering);
    }

    #[test]
    fn selecting_toggles_and_switches() {
        let mut s = session(3, &StatusMap::new());
        let a = Label::from_index(0).unwrap();
        let b = Label::from_index(1).unwrap();

        assert_eq!(s.select(0, a).unwrap(), SelectionChange::Selected(a));
        assert_eq!(s.selection(0), Some(a));

        assert_eq!(s.select(0, b).unwrap(), SelectionChange::Selected(b));
        assert_eq!(s.selection(0), Some(b));

        assert_eq!(s.select(0, b).unwrap(), SelectionChange::Cleared);
        assert_eq!(s.selection(0), None);
        assert_eq!(s.answered(), 0);
    }

    #[test]
    fn invalid_selections_are_rejected() {
        let mut s = session(2, &StatusMap::new());
        let e = Label::from_index(4).unwrap();

        assert!(matches!(
            s.select(9, Label::from_index(0).unwrap()),
            Err(QuizError::NoSuchQuestion { index: 9, len: 2 })
        ));
        assert!(matches!(
            s.select(0, e),
            Err(QuizError::NoSuchOption { index: 0, .. })
        ));
        assert_eq!(s.answered(), 0);
    }

    #[test]
    fn check_scores_and_updates_statuses() {
        let mut statuses = StatusMap::new();
        let mut s = session(3, &statuses);

        let right = s.questions()[0].correct_label().unwrap();
        let wrong = wrong_label(&s.questions()[1]);
        s.select(0, right).unwrap();
        s.select(1, wrong).unwrap();

        let card = s.check(&mut statuses);
        assert_eq!((card.correct, card.incorrect, card.unanswered), (1, 1, 1));
        assert_eq!(card.score, 1);
        assert_eq!(card.verdict, Verdict::Fail);

        let ids: Vec<QuestionId> = s.questions().iter().map(|q| q.id().clone()).collect();
        assert_eq!(statuses[&ids[0]], QuestionStatus::Correct);
        assert_eq!(statuses[&ids[1]], QuestionStatus::Incorrect);
        assert_eq!(statuses[&ids[2]], QuestionStatus::Unanswered);

        assert_eq!(s.outcome(0), Some(Outcome::Correct));
        assert_eq!(s.outcomes()[1].selected, Some(wrong));
        assert_eq!(s.outcomes()[1].correct, s.questions()[1].correct_label());
    }

    #[test]
    fn check_is_idempotent() {
        let mut statuses = StatusMap::new();
        let mut s = session(4, &statuses);
        let right = s.questions()[0].correct_label().unwrap();
        s.select(0, right).unwrap();

        let first = s.check(&mut statuses);
        let after_first = statuses.clone();

        // A stray edit between triggers must not leak into the second check.
        statuses.insert(QuestionId::from(999), QuestionStatus::Correct);
        let mut expected = after_first.clone();
        expected.insert(QuestionId::from(999), QuestionStatus::Correct);

        let second = s.check(&mut statuses);
        assert_eq!(first, second);
        assert_eq!(statuses, expected);
        assert!(s.is_checked());
    }

    #[test]
    fn selections_freeze_after_check() {
        let mut statuses = StatusMap::new();
        let mut s = session(2, &statuses);
        s.check(&mut statuses);

        let a = Label::from_index(0).unwrap();
        assert_eq!(s.select(0, a).unwrap(), SelectionChange::Frozen);
        assert_eq!(s.selection(0), None);
    }

    #[test]
    fn unanswered_does_not_downgrade_incorrect() {
        let mut statuses = StatusMap::new();
        statuses.insert(QuestionId::from(1), QuestionStatus::Incorrect);
        statuses.insert(QuestionId::from(2), QuestionStatus::Unanswered);

        let mut s = session(2, &statuses);
        let card = s.check(&mut statuses);

        assert_eq!(card.unanswered, 2);
        assert_eq!(statuses[&QuestionId::from(1)], QuestionStatus::Incorrect);
        assert_eq!(statuses[&QuestionId::from(2)], QuestionStatus::Unanswered);
    }

    #[test]
    fn wrong_answer_overrides_earlier_correct_entry_for_same_id() {
        // A correct question is never sampled, so build the session by hand.
        let mut statuses = StatusMap::new();
        statuses.insert(QuestionId::from(1), QuestionStatus::Correct);
        let mut rng = StdRng::seed_from_u64(11);
        let q = SessionQuestion::present(question(1), None, &mut rng);
        let wrong = wrong_label(&q);

        let mut s = QuizSession::with_questions("/topic", vec![q], ScoringRule::default());
        s.select(0, wrong).unwrap();
        s.check(&mut statuses);
        assert_eq!(statuses[&QuestionId::from(1)], QuestionStatus::Incorrect);
    }

    #[test]
    fn report_available_only_after_check() {
        let mut statuses = StatusMap::new();
        let mut s = session(2, &statuses);
        assert!(s.report().is_none());

        s.check(&mut statuses);
        let report = s.report().unwrap();
        assert_eq!(report.page, "/topic");
        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.card.unanswered, 2);
    }
}
