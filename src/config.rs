use crate::errors::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Weights and step sizes used by the ranking update rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Weight of `clickProbability` in the rank formula
    #[serde(default = "default_click_weight")]
    pub click_weight: f64,

    /// Weight of `stayProbability` in the rank formula
    #[serde(default = "default_stay_weight")]
    pub stay_weight: f64,

    /// Weight of `1 - returnRate` in the rank formula
    #[serde(default = "default_return_weight")]
    pub return_weight: f64,

    /// Added to the clicked page's click probability
    #[serde(default = "default_click_boost")]
    pub click_boost: f64,

    /// Added to the clicked page's stay probability
    #[serde(default = "default_stay_boost")]
    pub stay_boost: f64,

    /// Subtracted from every other page's click probability
    #[serde(default = "default_click_decay")]
    pub click_decay: f64,
}

/// How a search term is compared against a page's keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordMatch {
    /// The term occurs anywhere inside the keyword
    #[default]
    Substring,
    /// The term equals the keyword
    Exact,
}

/// Options for the search filter
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub keyword_match: KeywordMatch,
}

/// Options for turning documents into page records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Shortest word accepted as a keyword
    #[serde(default = "default_min_keyword_len")]
    pub min_keyword_len: usize,

    /// Maximum number of keywords kept per page
    #[serde(default = "default_max_keywords")]
    pub max_keywords: usize,

    /// Number of characters of text kept as the content preview
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,

    /// Category assigned to ingested pages
    #[serde(default = "default_category")]
    pub category: String,

    #[serde(default = "default_click_probability")]
    pub click_probability: f64,

    #[serde(default = "default_stay_probability")]
    pub stay_probability: f64,

    #[serde(default = "default_return_rate")]
    pub return_rate: f64,

    /// Words ignored in addition to the built-in stopword list
    #[serde(default)]
    pub stopwords: Vec<String>,
}

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub ranking: RankingConfig,

    #[serde(default)]
    pub search: SearchConfig,

    /// Maximum number of pages returned by the relation resolver
    #[serde(default = "default_related_limit")]
    pub related_limit: usize,

    #[serde(default)]
    pub ingest: IngestConfig,
}

impl EngineConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the update rule cannot work with
    pub fn validate(&self) -> Result<()> {
        let r = &self.ranking;
        let steps = [
            ("click_weight", r.click_weight),
            ("stay_weight", r.stay_weight),
            ("return_weight", r.return_weight),
            ("click_boost", r.click_boost),
            ("stay_boost", r.stay_boost),
            ("click_decay", r.click_decay),
        ];
        for (name, value) in steps {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::InvalidConfig(format!(
                    "ranking.{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if self.related_limit == 0 {
            return Err(EngineError::InvalidConfig(
                "related_limit must be at least 1".to_string(),
            ));
        }

        if self.ingest.max_keywords == 0 {
            return Err(EngineError::InvalidConfig(
                "ingest.max_keywords must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            click_weight: default_click_weight(),
            stay_weight: default_stay_weight(),
            return_weight: default_return_weight(),
            click_boost: default_click_boost(),
            stay_boost: default_stay_boost(),
            click_decay: default_click_decay(),
        }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            min_keyword_len: default_min_keyword_len(),
            max_keywords: default_max_keywords(),
            preview_chars: default_preview_chars(),
            category: default_category(),
            click_probability: default_click_probability(),
            stay_probability: default_stay_probability(),
            return_rate: default_return_rate(),
            stopwords: Vec::new(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ranking: RankingConfig::default(),
            search: SearchConfig::default(),
            related_limit: default_related_limit(),
            ingest: IngestConfig::default(),
        }
    }
}

fn default_click_weight() -> f64 {
    0.5
}

fn default_stay_weight() -> f64 {
    0.3
}

fn default_return_weight() -> f64 {
    0.2
}

fn default_click_boost() -> f64 {
    0.05
}

fn default_stay_boost() -> f64 {
    0.02
}

fn default_click_decay() -> f64 {
    0.01
}

/// Default value for related_limit
fn default_related_limit() -> usize {
    3
}

/// Words of at least this length are keyword candidates
fn default_min_keyword_len() -> usize {
    5
}

fn default_max_keywords() -> usize {
    5
}

fn default_preview_chars() -> usize {
    200
}

fn default_category() -> String {
    "Document".to_string()
}

fn default_click_probability() -> f64 {
    0.5
}

fn default_stay_probability() -> f64 {
    0.5
}

fn default_return_rate() -> f64 {
    0.3
}
