//! quizdeck-core: Question bank model, session state machine, and scoring.
//!
//! This crate defines the data model, the selection and scoring logic, and
//! the page-scoped status store that the rest of quizdeck builds on.

pub mod bank;
pub mod error;
pub mod model;
pub mod report;
pub mod scoring;
pub mod selector;
pub mod session;
pub mod store;
pub mod traits;
pub mod view;

pub use error::{LoadError, QuizError, StoreError};
pub use model::{AnswerOption, Label, Question, QuestionBank, QuestionId, QuestionStatus, StatusMap};
pub use scoring::{ScoreCard, ScoringRule, Verdict};
pub use session::{Phase, QuizSession, SelectionChange, SessionConfig};
pub use store::{KeyValueStore, MemoryStorage, StatusStore};
