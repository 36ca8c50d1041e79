//! Bank files on local disk.

use std::path::PathBuf;

use async_trait::async_trait;

use quizdeck_core::bank::parse_bank_str;
use quizdeck_core::error::LoadError;
use quizdeck_core::model::QuestionBank;
use quizdeck_core::traits::BankSource;

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl BankSource for FileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<QuestionBank, LoadError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.display().to_string(),
                source,
            })?;
        parse_bank_str(&content)
    }
}
