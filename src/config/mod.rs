use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

use crate::hierarchy::DanglingPolicy;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub hierarchy: HierarchyConfig,
    pub source: SourceConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchyConfig {
    pub dangling_policy: DanglingPolicy,
    pub strict: bool,
    /// Order string applied to siblings, e.g. `"name asc"`
    pub default_order: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub url: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub indent: usize,
    pub hide_inactive: bool,
    pub log_level: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_overrides(|key| env::var(key).ok())
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Hierarchy overrides
        if let Some(v) = lookup("HIERARCHY_DANGLING_POLICY") {
            self.hierarchy.dangling_policy = v.parse().unwrap_or(self.hierarchy.dangling_policy);
        }
        if let Some(v) = lookup("HIERARCHY_STRICT") {
            self.hierarchy.strict = v.parse().unwrap_or(self.hierarchy.strict);
        }
        if let Some(v) = lookup("HIERARCHY_DEFAULT_ORDER") {
            self.hierarchy.default_order = Some(v).filter(|s| !s.trim().is_empty());
        }

        // Source overrides
        if let Some(v) = lookup("SOURCE_URL") {
            self.source.url = Some(v).filter(|s| !s.trim().is_empty());
        }
        if let Some(v) = lookup("SOURCE_TOKEN") {
            self.source.token = Some(v).filter(|s| !s.is_empty());
        }
        if let Some(v) = lookup("SOURCE_TIMEOUT_SECS") {
            self.source.timeout_secs = v.parse().unwrap_or(self.source.timeout_secs);
        }

        // Output overrides
        if let Some(v) = lookup("OUTPUT_INDENT") {
            self.output.indent = v.parse().unwrap_or(self.output.indent);
        }
        if let Some(v) = lookup("OUTPUT_HIDE_INACTIVE") {
            self.output.hide_inactive = v.parse().unwrap_or(self.output.hide_inactive);
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            self.output.log_level = v;
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            hierarchy: HierarchyConfig {
                dangling_policy: DanglingPolicy::Drop,
                strict: false,
                default_order: None,
            },
            source: SourceConfig {
                url: None,
                token: None,
                timeout_secs: 30,
            },
            output: OutputConfig {
                indent: 4,
                hide_inactive: false,
                log_level: "structure_tree=debug".to_string(),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            hierarchy: HierarchyConfig {
                dangling_policy: DanglingPolicy::Drop,
                strict: false,
                default_order: None,
            },
            source: SourceConfig {
                url: None,
                token: None,
                timeout_secs: 10,
            },
            output: OutputConfig {
                indent: 4,
                hide_inactive: false,
                log_level: "structure_tree=info".to_string(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            hierarchy: HierarchyConfig {
                dangling_policy: DanglingPolicy::Drop,
                strict: false,
                default_order: None,
            },
            source: SourceConfig {
                url: None,
                token: None,
                timeout_secs: 5,
            },
            output: OutputConfig {
                indent: 4,
                hide_inactive: true,
                log_level: "structure_tree=warn".to_string(),
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}
