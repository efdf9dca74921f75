use serde::{Deserialize, Serialize};

use super::error::SourceError;
use crate::hierarchy::FlatNode;

/// Response envelope used by the evaluation API: `{ success, data }` on
/// success, `{ success: false, error }` otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn into_result(self) -> Result<T, SourceError> {
        if !self.success {
            return Err(SourceError::Api(
                self.error.unwrap_or_else(|| "request was not successful".to_string()),
            ));
        }
        self.data
            .ok_or_else(|| SourceError::Parse("envelope has no data".to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputFormat {
    /// JSON first, then YAML
    #[default]
    Auto,
    Json,
    Yaml,
}

impl InputFormat {
    /// Guess from a file extension, falling back to auto-detection
    pub fn from_path(path: &str) -> Self {
        let lower = path.to_ascii_lowercase();
        if lower.ends_with(".yaml") || lower.ends_with(".yml") {
            InputFormat::Yaml
        } else if lower.ends_with(".json") {
            InputFormat::Json
        } else {
            InputFormat::Auto
        }
    }
}

/// Parse a node collection given either as a bare array or wrapped in the
/// API envelope.
///
/// Record-level errors keep serde's message (which field, what was expected)
/// plus the line/column for JSON or the record index for YAML.
pub fn parse_nodes(text: &str, format: InputFormat) -> Result<Vec<FlatNode>, SourceError> {
    match format {
        InputFormat::Json => parse_json(text).map_err(|e| SourceError::Parse(e.to_string()))?,
        InputFormat::Yaml => parse_yaml(text),
        InputFormat::Auto => match parse_json(text) {
            Ok(result) => result,
            // Well-formed JSON with bad records: the JSON error is the useful one
            Err(json_err) if json_err.is_data() => Err(SourceError::Parse(json_err.to_string())),
            Err(json_err) => match parse_yaml(text) {
                Err(SourceError::Parse(yaml_msg)) if looks_like_json(text) => {
                    tracing::debug!(yaml = %yaml_msg, "YAML fallback failed too");
                    Err(SourceError::Parse(json_err.to_string()))
                }
                other => other,
            },
        },
    }
}

fn looks_like_json(text: &str) -> bool {
    matches!(text.trim_start().chars().next(), Some('[') | Some('{'))
}

/// Outer error is a JSON syntax/data error; inner result is the envelope outcome
fn parse_json(text: &str) -> Result<Result<Vec<FlatNode>, SourceError>, serde_json::Error> {
    if text.trim_start().starts_with('{') {
        let envelope: ApiEnvelope<Vec<FlatNode>> = serde_json::from_str(text)?;
        Ok(envelope.into_result())
    } else {
        Ok(Ok(serde_json::from_str(text)?))
    }
}

fn parse_yaml(text: &str) -> Result<Vec<FlatNode>, SourceError> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|e| SourceError::Parse(e.to_string()))?;

    let records = if value.is_mapping() {
        let envelope: ApiEnvelope<serde_yaml::Value> =
            serde_yaml::from_value(value).map_err(|e| SourceError::Parse(e.to_string()))?;
        envelope.into_result()?
    } else {
        value
    };

    match records {
        serde_yaml::Value::Sequence(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                serde_yaml::from_value::<FlatNode>(item)
                    .map_err(|e| SourceError::Parse(format!("record {}: {}", i, e)))
            })
            .collect(),
        _ => Err(SourceError::Parse(
            "expected a list of structure nodes or a { success, data } envelope".to_string(),
        )),
    }
}
