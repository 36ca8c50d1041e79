//! Session report with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scoring::ScoreCard;
use crate::session::{Outcome, QuestionOutcome};

/// A checked session, ready to be archived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the answers were checked.
    pub created_at: DateTime<Utc>,
    /// Page the session ran on.
    pub page: String,
    /// Counts, score, and verdict.
    pub card: ScoreCard,
    /// Per-question results in display order.
    pub outcomes: Vec<QuestionOutcome>,
}

impl SessionReport {
    pub fn new(page: &str, card: ScoreCard, outcomes: Vec<QuestionOutcome>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            page: page.to_string(),
            card,
            outcomes,
        }
    }

    /// Questions answered incorrectly, in display order.
    pub fn mistakes(&self) -> impl Iterator<Item = &QuestionOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.outcome == Outcome::Incorrect)
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
