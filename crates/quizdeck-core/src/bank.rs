//! Question bank decoding and validation.
//!
//! Banks arrive as untyped JSON. Decoding is lenient: a document that is not
//! a sequence yields an empty bank, and individual records that cannot be
//! presented are skipped with a warning rather than failing the whole load.

use std::collections::HashSet;
use std::path::Path;

use serde_json::Value;

use crate::error::LoadError;
use crate::model::{Question, QuestionBank, QuestionId, MAX_OPTIONS};

/// Decode a bank from a JSON string.
///
/// Fails only when the text is not JSON at all.
pub fn parse_bank_str(content: &str) -> Result<QuestionBank, LoadError> {
    let value: Value =
        serde_json::from_str(content).map_err(|e| LoadError::Parse(e.to_string()))?;
    Ok(bank_from_value(value))
}

/// Build a bank from an already-parsed JSON document.
pub fn bank_from_value(value: Value) -> QuestionBank {
    let questions = decode_records(value)
        .into_iter()
        .filter(|q| {
            let keep = q.is_presentable();
            if !keep {
                tracing::warn!("skipping question {}: not presentable", q.id);
            }
            keep
        })
        .collect();
    QuestionBank::new(questions)
}

/// Decode every record that matches the question layout, without checking
/// whether it can be presented.
pub fn decode_records(value: Value) -> Vec<Question> {
    let Value::Array(records) = value else {
        tracing::error!("question bank is not a sequence, treating it as empty");
        return Vec::new();
    };

    records
        .into_iter()
        .enumerate()
        .filter_map(
            |(position, record)| match serde_json::from_value::<Question>(record) {
                Ok(q) => Some(q),
                Err(e) => {
                    tracing::warn!("skipping record {position}: {e}");
                    None
                }
            },
        )
        .collect()
}

/// Read a bank file from disk and decode it.
pub fn read_bank_file(path: &Path) -> Result<QuestionBank, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_bank_str(&content)
}

/// A warning from bank validation.
#[derive(Debug, Clone)]
pub struct BankWarning {
    /// The question the warning is about (if applicable).
    pub question_id: Option<QuestionId>,
    /// Warning message.
    pub message: String,
}

/// Validate decoded records for common authoring mistakes.
pub fn validate_questions(questions: &[Question]) -> Vec<BankWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = HashSet::new();
    for q in questions {
        if !seen_ids.insert(&q.id) {
            warnings.push(BankWarning {
                question_id: Some(q.id.clone()),
                message: format!("duplicate question id: {}", q.id),
            });
        }
    }

    for q in questions {
        if q.answers.is_empty() {
            warnings.push(BankWarning {
                question_id: Some(q.id.clone()),
                message: "question has no answer options".into(),
            });
        } else if q.answers.len() > MAX_OPTIONS {
            warnings.push(BankWarning {
                question_id: Some(q.id.clone()),
                message: format!(
                    "question has {} options, only {MAX_OPTIONS} can be labelled",
                    q.answers.len()
                ),
            });
        }

        if !q.answers.is_empty() && q.correct_option().is_none() {
            warnings.push(BankWarning {
                question_id: Some(q.id.clone()),
                message: format!("answer key '{}' matches no option", q.correct),
            });
        }

        if q.heading.trim().is_empty() {
            warnings.push(BankWarning {
                question_id: Some(q.id.clone()),
                message: "heading is empty".into(),
            });
        }
    }

    warnings
}
