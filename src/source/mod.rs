pub mod error;
pub mod parse;

pub use error::SourceError;
pub use parse::{parse_nodes, ApiEnvelope, InputFormat};

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;

use crate::hierarchy::FlatNode;

/// Somewhere a flat snapshot of structure nodes can be loaded from
#[async_trait]
pub trait NodeSource: Send + Sync {
    /// Human-readable origin, used in logs
    fn describe(&self) -> String;

    async fn load(&self) -> Result<Vec<FlatNode>, SourceError>;
}

pub struct FileSource {
    pub path: PathBuf,
    pub format: InputFormat,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = InputFormat::from_path(&path.to_string_lossy());
        Self { path, format }
    }
}

#[async_trait]
impl NodeSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<Vec<FlatNode>, SourceError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.describe(),
                source,
            })?;
        parse_nodes(&text, self.format)
    }
}

#[derive(Default)]
pub struct StdinSource {
    pub format: InputFormat,
}

#[async_trait]
impl NodeSource for StdinSource {
    fn describe(&self) -> String {
        "<stdin>".to_string()
    }

    async fn load(&self) -> Result<Vec<FlatNode>, SourceError> {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .map_err(|source| SourceError::Io {
                path: self.describe(),
                source,
            })?;
        parse_nodes(&text, self.format)
    }
}

/// `GET` a node listing from the REST API
pub struct HttpSource {
    url: url::Url,
    token: Option<String>,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: &str, token: Option<String>, timeout: Duration) -> Result<Self, SourceError> {
        let parsed = url::Url::parse(url).map_err(|e| SourceError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SourceError::InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        Ok(Self {
            url: parsed,
            token,
            timeout,
            client: reqwest::Client::new(),
        })
    }
}

#[async_trait]
impl NodeSource for HttpSource {
    fn describe(&self) -> String {
        self.url.to_string()
    }

    async fn load(&self) -> Result<Vec<FlatNode>, SourceError> {
        let mut request = self.client.get(self.url.clone()).timeout(self.timeout);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Prefer the API's own error message when the body is an envelope
            if let Ok(envelope) = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&body) {
                if let Some(message) = envelope.error {
                    return Err(SourceError::Api(message));
                }
            }
            return Err(SourceError::Status {
                status: status.as_u16(),
                url: self.describe(),
            });
        }

        parse_nodes(&body, InputFormat::Json)
    }
}

/// Load nodes and log where they came from
pub async fn load_from(source: &dyn NodeSource) -> Result<Vec<FlatNode>, SourceError> {
    let nodes = source.load().await?;
    tracing::info!(source = %source.describe(), count = nodes.len(), "loaded structure nodes");
    Ok(nodes)
}
