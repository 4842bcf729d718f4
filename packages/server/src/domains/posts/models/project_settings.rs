use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::common::ProjectId;

/// Per-project publishing policy, read-only for the save pipeline.
///
/// Fetched once per request; this core never writes settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSettings {
    pub project_id: ProjectId,
    pub teaser_mode: TeaserMode,
    pub teaser_truncation_mode: TruncationMode,
    pub teaser_truncation_length: i32,
    pub force_lowercase_categories: bool,
    pub language_code: String,
}

impl ProjectSettings {
    /// Baseline settings for a project that has never customized anything.
    pub fn defaults_for(project_id: ProjectId) -> Self {
        Self {
            project_id,
            teaser_mode: TeaserMode::Truncated,
            teaser_truncation_mode: TruncationMode::Characters,
            teaser_truncation_length: 250,
            force_lowercase_categories: false,
            language_code: "en".to_string(),
        }
    }
}

/// Teaser generation mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TeaserMode {
    /// No teaser is generated or cached.
    Off,
    /// Teaser derived by truncating the rendered published body.
    Truncated,
}

impl std::fmt::Display for TeaserMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TeaserMode::Off => write!(f, "off"),
            TeaserMode::Truncated => write!(f, "truncated"),
        }
    }
}

impl std::str::FromStr for TeaserMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "off" => Ok(TeaserMode::Off),
            "truncated" => Ok(TeaserMode::Truncated),
            _ => Err(anyhow::anyhow!("Invalid teaser mode: {}", s)),
        }
    }
}

/// Teaser truncation policy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TruncationMode {
    /// Cut at a character budget, backing up to a whitespace boundary.
    Characters,
    /// Keep the first N whitespace-separated words.
    Words,
}

impl std::fmt::Display for TruncationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TruncationMode::Characters => write!(f, "characters"),
            TruncationMode::Words => write!(f, "words"),
        }
    }
}

impl std::str::FromStr for TruncationMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "characters" => Ok(TruncationMode::Characters),
            "words" => Ok(TruncationMode::Words),
            _ => Err(anyhow::anyhow!("Invalid truncation mode: {}", s)),
        }
    }
}
