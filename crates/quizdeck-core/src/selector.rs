//! Random question selection.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{Question, QuestionBank, QuestionStatus, StatusMap};

/// Number of questions in a session unless configured otherwise.
pub const DEFAULT_SAMPLE_SIZE: usize = 25;

/// Whether a question is still eligible for sampling.
///
/// Only questions answered correctly are retired; unanswered and incorrect
/// ones come back until the page status is reset.
pub fn is_eligible(question: &Question, statuses: &StatusMap) -> bool {
    statuses.get(&question.id) != Some(&QuestionStatus::Correct)
}

/// Number of questions that can still be drawn.
pub fn remaining(bank: &QuestionBank, statuses: &StatusMap) -> usize {
    bank.iter().filter(|q| is_eligible(q, statuses)).count()
}

/// Draw up to `count` questions that are not yet mastered.
///
/// The eligible questions are permuted with a uniform shuffle and the first
/// `min(count, remaining)` are returned. A short pool is not an error.
pub fn select_questions<R: Rng + ?Sized>(
    bank: &QuestionBank,
    count: usize,
    statuses: &StatusMap,
    rng: &mut R,
) -> Vec<Question> {
    let mut pool: Vec<Question> = bank
        .iter()
        .filter(|q| is_eligible(q, statuses))
        .cloned()
        .collect();

    pool.shuffle(rng);
    pool.truncate(count);

    tracing::debug!(
        bank = bank.len(),
        selected = pool.len(),
        requested = count,
        "selected session questions"
    );
    pool
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::model::{AnswerOption, QuestionId};

    fn bank(n: usize) -> QuestionBank {
        QuestionBank::new(
            (1..=n as u64)
                .map(|i| Question {
                    id: QuestionId::from(i),
                    heading: format!("Question {i}"),
                    body: String::new(),
                    answers: vec![AnswerOption::new("A", "yes"), AnswerOption::new("B", "no")],
                    correct: "A".into(),
                })
                .collect(),
        )
    }

    fn mark_correct(statuses: &mut StatusMap, ids: impl IntoIterator<Item = u64>) {
        for id in ids {
            statuses.insert(QuestionId::from(id), QuestionStatus::Correct);
        }
    }

    #[test]
    fn never_returns_mastered_questions() {
        let bank = bank(40);
        let mut statuses = StatusMap::new();
        mark_correct(&mut statuses, (1..=40).filter(|i| i % 3 == 0));
        statuses.insert(QuestionId::from(1), QuestionStatus::Incorrect);
        statuses.insert(QuestionId::from(2), QuestionStatus::Unanswered);

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = select_questions(&bank, 25, &statuses, &mut rng);
            assert!(picked
                .iter()
                .all(|q| statuses.get(&q.id) != Some(&QuestionStatus::Correct)));
        }
    }

    #[test]
    fn returns_requested_count_when_pool_is_large_enough() {
        let bank = bank(40);
        let mut statuses = StatusMap::new();
        mark_correct(&mut statuses, 1..=15);
        let mut rng = StdRng::seed_from_u64(7);

        let picked = select_questions(&bank, 25, &statuses, &mut rng);
        assert_eq!(picked.len(), 25);

        let unique: HashSet<_> = picked.iter().map(|q| q.id.clone()).collect();
        assert_eq!(unique.len(), 25);
    }

    #[test]
    fn returns_whole_pool_when_short() {
        let bank = bank(30);
        let mut statuses = StatusMap::new();
        mark_correct(&mut statuses, 1..=20);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(remaining(&bank, &statuses), 10);
        let picked = select_questions(&bank, 25, &statuses, &mut rng);
        assert_eq!(picked.len(), 10);
    }

    #[test]
    fn empty_when_everything_is_mastered() {
        let bank = bank(5);
        let mut statuses = StatusMap::new();
        mark_correct(&mut statuses, 1..=5);
        let mut rng = StdRng::seed_from_u64(3);

        assert!(select_questions(&bank, 25, &statuses, &mut rng).is_empty());
        assert!(select_questions(&QuestionBank::default(), 25, &statuses, &mut rng).is_empty());
    }

    #[test]
    fn same_seed_same_selection() {
        let bank = bank(50);
        let statuses = StatusMap::new();
        let a = select_questions(&bank, 25, &statuses, &mut StdRng::seed_from_u64(99));
        let b = select_questions(&bank, 25, &statuses, &mut StdRng::seed_from_u64(99));
        let ids = |qs: &[Question]| qs.iter().map(|q| q.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&a), ids(&b));
    }

    #[test]
    fn every_eligible_question_can_come_first() {
        let bank = bank(4);
        let statuses = StatusMap::new();
        let mut firsts = HashSet::new();
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..200 {
            let picked = select_questions(&bank, 1, &statuses, &mut rng);
            firsts.insert(picked[0].id.clone());
        }
        assert_eq!(firsts.len(), 4);
    }
}
