//! Core data model types for quizdeck.
//!
//! The serde layout of [`Question`] follows the static JSON banks the quiz
//! pages are served with, so a bank file can be read without a translation
//! step.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Number of fixed display labels (A through E).
pub const MAX_OPTIONS: usize = 5;

/// Identifier of a question, unique within its bank.
///
/// Banks write these as numbers or strings; both normalize to the same
/// textual form, which is also the key used in the persisted status map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u64> for QuestionId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl<'de> Deserialize<'de> for QuestionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => QuestionId(s.trim().to_string()),
            RawId::Number(n) => QuestionId(n.to_string()),
        })
    }
}

/// One answer option: a single-key mapping from option key to display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, String>",
    into = "BTreeMap<String, String>"
)]
pub struct AnswerOption {
    /// Key the answer key refers to (e.g. "C").
    pub key: String,
    /// Display text.
    pub text: String,
}

impl AnswerOption {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
        }
    }
}

impl TryFrom<BTreeMap<String, String>> for AnswerOption {
    type Error = String;

    fn try_from(map: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        if map.len() != 1 {
            return Err(format!(
                "answer option must have exactly one key, found {}",
                map.len()
            ));
        }
        let (key, text) = map
            .into_iter()
            .next()
            .ok_or_else(|| "answer option is empty".to_string())?;
        Ok(Self { key, text })
    }
}

impl From<AnswerOption> for BTreeMap<String, String> {
    fn from(option: AnswerOption) -> Self {
        BTreeMap::from([(option.key, option.text)])
    }
}

/// A question record as stored in a bank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within the bank.
    #[serde(rename = "questionNumber")]
    pub id: QuestionId,
    /// Prompt heading.
    #[serde(rename = "questionUp")]
    pub heading: String,
    /// Prompt body.
    #[serde(rename = "questionDown", default)]
    pub body: String,
    /// Answer options in bank order.
    pub answers: Vec<AnswerOption>,
    /// Key of the correct option.
    #[serde(rename = "correctAnwser", alias = "correctAnswer")]
    pub correct: String,
}

impl Question {
    /// The option the answer key points at, if any.
    pub fn correct_option(&self) -> Option<&AnswerOption> {
        self.answers.iter().find(|a| a.key == self.correct)
    }

    /// Whether the record can be presented: it has between one and
    /// [`MAX_OPTIONS`] options and its answer key names one of them.
    pub fn is_presentable(&self) -> bool {
        !self.answers.is_empty()
            && self.answers.len() <= MAX_OPTIONS
            && self.correct_option().is_some()
    }
}

/// An ordered collection of questions for one topic.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    pub fn get(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| &q.id == id)
    }
}

impl<'a> IntoIterator for &'a QuestionBank {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}

/// Persisted outcome of the last attempt at a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionStatus {
    Unanswered,
    Correct,
    Incorrect,
}

impl fmt::Display for QuestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionStatus::Unanswered => write!(f, "unanswered"),
            QuestionStatus::Correct => write!(f, "correct"),
            QuestionStatus::Incorrect => write!(f, "incorrect"),
        }
    }
}

/// Question identifier → status. A missing entry means "never attempted".
pub type StatusMap = BTreeMap<QuestionId, QuestionStatus>;

/// A fixed display label, A through E, assigned after shuffling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Label(u8);

impl Label {
    /// Label for the option at `position` in display order.
    pub fn from_index(position: usize) -> Option<Self> {
        (position < MAX_OPTIONS).then_some(Label(position as u8))
    }

    /// Position in display order.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn as_char(self) -> char {
        (b'A' + self.0) as char
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Label {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => {
                let position = (c.to_ascii_uppercase() as u8 - b'A') as usize;
                Label::from_index(position).ok_or_else(|| format!("unknown label: {s}"))
            }
            _ => Err(format!("unknown label: {s}")),
        }
    }
}

impl TryFrom<String> for Label {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.to_string()
    }
}
