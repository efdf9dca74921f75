use std::time::Duration;

use serde::Serialize;
use serde_json::json;

use crate::cli::{OutputFormat, SourceArgs};
use crate::config::config;
use crate::hierarchy::FlatNode;
use crate::source::{self, ApiEnvelope, FileSource, HttpSource, NodeSource, StdinSource};

/// Pick the node source: explicit path, then `--url`, then `SOURCE_URL`,
/// then stdin.
pub fn resolve_source(args: &SourceArgs) -> anyhow::Result<Box<dyn NodeSource>> {
    let settings = &config().source;

    if let Some(path) = args.source.as_deref() {
        if path == "-" {
            return Ok(Box::new(StdinSource::default()));
        }
        return Ok(Box::new(FileSource::new(path)));
    }

    if let Some(url) = args.url.as_deref().or(settings.url.as_deref()) {
        let token = args.token.clone().or_else(|| settings.token.clone());
        let timeout = Duration::from_secs(args.timeout.unwrap_or(settings.timeout_secs));
        return Ok(Box::new(HttpSource::new(url, token, timeout)?));
    }

    Ok(Box::new(StdinSource::default()))
}

pub async fn load_nodes(args: &SourceArgs) -> anyhow::Result<Vec<FlatNode>> {
    let origin = resolve_source(args)?;
    Ok(source::load_from(origin.as_ref()).await?)
}

/// Print `data` wrapped in the same `{ success, data }` envelope the API uses
pub fn output_data<T: Serialize>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&ApiEnvelope::success(data))?);
    Ok(())
}

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "success": true,
                    "message": message
                }))?
            );
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}
