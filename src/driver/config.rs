//! Batch configuration.
//!
//! A configuration is a list of groups. Each group names a model, the folder generated
//! documents go to, and the templates to render for every record of that model:
//!
//! ```json
//! {
//!   "groups": [
//!     { "model": "SaleOrder",
//!       "destination_folder": "folder-123",
//!       "templates": [ { "id": "tpl-quote", "name": "Quotation" } ] }
//!   ],
//!   "page_limit": 3,
//!   "workers": 4,
//!   "max_depth": 3
//! }
//! ```
//!
//! Only `groups` is required.

use crate::driver::error::ConfigError;
use crate::flatten::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_PAGE_LIMIT: usize = 3;
pub const DEFAULT_WORKERS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl TemplateRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigGroup {
    pub model: String,
    pub destination_folder: String,
    pub templates: Vec<TemplateRef>,
}

impl ConfigGroup {
    pub fn new(
        model: impl Into<String>,
        destination_folder: impl Into<String>,
        templates: Vec<TemplateRef>,
    ) -> Self {
        Self {
            model: model.into(),
            destination_folder: destination_folder.into(),
            templates,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    pub groups: Vec<ConfigGroup>,

    /// Records fetched per model.
    #[serde(default = "default_page_limit")]
    pub page_limit: usize,

    /// Maximum number of merge jobs in flight.
    #[serde(default = "default_workers")]
    pub workers: usize,

    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_page_limit() -> usize {
    DEFAULT_PAGE_LIMIT
}

fn default_workers() -> usize {
    DEFAULT_WORKERS
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl BatchConfig {
    pub fn new(groups: Vec<ConfigGroup>) -> Self {
        Self {
            groups,
            page_limit: DEFAULT_PAGE_LIMIT,
            workers: DEFAULT_WORKERS,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_page_limit(mut self, page_limit: usize) -> Self {
        self.page_limit = page_limit;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.groups.is_empty() {
            return Err(ConfigError::Invalid("no groups configured".into()));
        }
        if self.workers == 0 {
            return Err(ConfigError::Invalid("workers must be at least 1".into()));
        }
        for group in &self.groups {
            if group.model.trim().is_empty() {
                return Err(ConfigError::Invalid("group without a model".into()));
            }
            if group.templates.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "group {} has no templates",
                    group.model
                )));
            }
        }
        Ok(())
    }

    /// Total number of templates across groups.
    pub fn template_count(&self) -> usize {
        self.groups.iter().map(|g| g.templates.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply() {
        let config = BatchConfig::from_json_str(
            r#"{"groups":[{"model":"SaleOrder","destination_folder":"out","templates":[{"id":"t1"},{"id":"t2","name":"Quote"}]}]}"#,
        )
        .unwrap();
        assert_eq!(config.page_limit, DEFAULT_PAGE_LIMIT);
        assert_eq!(config.workers, DEFAULT_WORKERS);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.template_count(), 2);
        assert_eq!(config.groups[0].templates[1].name.as_deref(), Some("Quote"));
    }

    #[test]
    fn test_validation() {
        let empty = BatchConfig::new(vec![]);
        assert!(matches!(empty.validate(), Err(ConfigError::Invalid(_))));

        let no_templates = BatchConfig::new(vec![ConfigGroup::new("SaleOrder", "out", vec![])]);
        assert!(matches!(no_templates.validate(), Err(ConfigError::Invalid(msg)) if msg.contains("SaleOrder")));

        let no_workers = BatchConfig::new(vec![ConfigGroup::new(
            "SaleOrder",
            "out",
            vec![TemplateRef::new("t1")],
        )])
        .with_workers(0);
        assert!(no_workers.validate().is_err());
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            BatchConfig::from_json_str("{\"groups\": \"nope\"}"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            BatchConfig::load("/definitely/not/here.json"),
            Err(ConfigError::Io { .. })
        ));
    }
}
