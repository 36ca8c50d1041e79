//! The `quizdeck validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::Value;

use quizdeck_core::bank::{decode_records, validate_questions};

pub fn execute(bank_path: PathBuf) -> Result<()> {
    let content = std::fs::read_to_string(&bank_path)
        .with_context(|| format!("failed to read bank: {}", bank_path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse bank: {}", bank_path.display()))?;

    let record_count = value.as_array().map(Vec::len);
    let questions = decode_records(value);

    println!(
        "Bank: {} ({} questions)",
        bank_path.display(),
        questions.len()
    );

    let mut total_warnings = 0;

    match record_count {
        None => {
            println!("  WARNING: document is not a sequence of questions");
            total_warnings += 1;
        }
        Some(n) if n > questions.len() => {
            println!(
                "  WARNING: {} record(s) do not match the question layout",
                n - questions.len()
            );
            total_warnings += 1;
        }
        Some(_) => {}
    }

    let warnings = validate_questions(&questions);
    for w in &warnings {
        let prefix = w
            .question_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }
    total_warnings += warnings.len();

    if total_warnings == 0 {
        println!("Bank valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
