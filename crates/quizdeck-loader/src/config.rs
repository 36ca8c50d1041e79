//! quizdeck configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizdeck_core::scoring::ScoringRule;
use quizdeck_core::selector::DEFAULT_SAMPLE_SIZE;
use quizdeck_core::session::SessionConfig;

use crate::topics::{TopicEntry, TopicTable};

/// Top-level quizdeck configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizdeckConfig {
    /// Directory or URL that relative topic resources are resolved against.
    #[serde(default)]
    pub base: Option<String>,
    /// Where statuses are persisted. Unset means the platform default.
    #[serde(default)]
    pub store_path: Option<PathBuf>,
    /// Questions per session.
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
    /// Whether the built-in topic table is consulted after `topics`.
    #[serde(default = "default_true")]
    pub builtin_topics: bool,
    /// Point values and pass mark.
    #[serde(default)]
    pub scoring: ScoringRule,
    /// Extra page → bank mappings, checked before the built-in ones.
    #[serde(default)]
    pub topics: Vec<TopicEntry>,
}

fn default_sample_size() -> usize {
    DEFAULT_SAMPLE_SIZE
}

fn default_true() -> bool {
    true
}

impl Default for QuizdeckConfig {
    fn default() -> Self {
        Self {
            base: None,
            store_path: None,
            sample_size: default_sample_size(),
            builtin_topics: true,
            scoring: ScoringRule::default(),
            topics: Vec::new(),
        }
    }
}

impl QuizdeckConfig {
    /// Configured topics followed by the built-in table (unless disabled).
    pub fn topic_table(&self) -> TopicTable {
        let mut table = TopicTable::new(self.topics.clone());
        if self.builtin_topics {
            table.extend(TopicTable::builtin().entries().to_vec());
        }
        table
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            sample_size: self.sample_size,
            rule: self.scoring,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_config(config: &mut QuizdeckConfig) {
    config.base = config.base.as_deref().map(resolve_env_vars);
    config.store_path = config
        .store_path
        .as_ref()
        .map(|p| PathBuf::from(resolve_env_vars(&p.to_string_lossy())));
    for topic in &mut config.topics {
        topic.resource = resolve_env_vars(&topic.resource);
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizdeck.toml` in the current directory
/// 2. `~/.config/quizdeck/config.toml`
///
/// Environment variable overrides: `QUIZDECK_STORE`, `QUIZDECK_BASE`.
pub fn load_config() -> Result<QuizdeckConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizdeckConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizdeck.toml");
        if local.exists() {
            Some(local)
        } else {
            config_dir()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<QuizdeckConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => QuizdeckConfig::default(),
    };

    if let Ok(store) = std::env::var("QUIZDECK_STORE") {
        config.store_path = Some(PathBuf::from(store));
    }
    if let Ok(base) = std::env::var("QUIZDECK_BASE") {
        config.base = Some(base);
    }

    resolve_config(&mut config);
    anyhow::ensure!(config.sample_size >= 1, "sample_size must be at least 1");

    Ok(config)
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizdeck"))
}
