//! Configuration schema definitions

use crate::validation::{ValidationResult, Validator};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static HTTP_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/]+").expect("valid URL pattern"));

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigSchema {
    #[serde(default)]
    pub matching: MatchingConfig,

    #[serde(default)]
    pub browse: BrowseConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub api: ApiConfig,
}

impl ConfigSchema {
    /// Check every section, collecting all problems at once
    pub fn validate(&self) -> ValidationResult {
        Validator::new()
            .range("matching.threshold", self.matching.threshold, 0.0, 1.0)
            .custom(
                "matching.max_suggestions",
                self.matching.max_suggestions > 0,
                "must be at least 1",
            )
            .custom(
                "matching.max_similar",
                self.matching.max_similar > 0,
                "must be at least 1",
            )
            .custom(
                "browse.items_per_page",
                self.browse.items_per_page > 0,
                "must be at least 1",
            )
            .custom(
                "store.fetch_timeout_secs",
                self.store.fetch_timeout_secs > 0,
                "must be at least 1 second",
            )
            .required("api.base_url", &self.api.base_url)
            .pattern("api.base_url", &self.api.base_url, &HTTP_URL, "an http(s) URL")
            .custom(
                "api.timeout_secs",
                self.api.timeout_secs > 0,
                "must be at least 1 second",
            )
            .warn_if(
                "matching.threshold",
                self.matching.threshold < 0.3,
                "thresholds below 0.3 surface mostly noise",
            )
            .validate()
    }
}

/// Match engine tuning
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchingConfig {
    /// Minimum score (exclusive) for a pair to count as a match
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Dashboard suggestion cap
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,

    /// Item-detail "similar items" cap
    #[serde(default = "default_max_similar")]
    pub max_similar: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            max_suggestions: default_max_suggestions(),
            max_similar: default_max_similar(),
        }
    }
}

fn default_threshold() -> f64 {
    0.3
}

fn default_max_suggestions() -> usize {
    5
}

fn default_max_similar() -> usize {
    3
}

/// Listing pagination
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrowseConfig {
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            items_per_page: default_items_per_page(),
        }
    }
}

fn default_items_per_page() -> usize {
    6
}

/// Local item store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// JSON snapshot used when no `--data` flag is given
    #[serde(default)]
    pub data_file: Option<String>,

    /// Upper bound for a single collection fetch
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

/// Remote item service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_api_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_api_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_api_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let schema = ConfigSchema::default();
        let result = schema.validate();
        assert!(result.is_valid(), "{:?}", result.errors());
        assert!(result.warnings().is_empty());
        assert_eq!(schema.browse.items_per_page, 6);
        assert_eq!(schema.matching.max_suggestions, 5);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let schema: ConfigSchema = toml::from_str(
            r#"
            [matching]
            threshold = 0.5

            [store]
            data_file = "items.json"
            "#,
        )
        .unwrap();

        assert!((schema.matching.threshold - 0.5).abs() < f64::EPSILON);
        assert_eq!(schema.matching.max_similar, 3);
        assert_eq!(schema.store.data_file.as_deref(), Some("items.json"));
        assert_eq!(schema.store.fetch_timeout_secs, 10);
        assert_eq!(schema.api.base_url, "http://localhost:5000/api");
    }

    #[test]
    fn test_validate_collects_errors() {
        let mut schema = ConfigSchema::default();
        schema.matching.threshold = 1.5;
        schema.matching.max_suggestions = 0;
        schema.api.base_url = "ftp://example.org".to_string();

        let result = schema.validate();
        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 3);
    }

    #[test]
    fn test_low_threshold_warns() {
        let mut schema = ConfigSchema::default();
        schema.matching.threshold = 0.1;

        let result = schema.validate();
        assert!(result.is_valid());
        assert_eq!(result.warnings().len(), 1);
    }
}
