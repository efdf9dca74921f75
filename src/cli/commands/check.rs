use serde_json::json;

use crate::cli::utils::{load_nodes, output_success};
use crate::cli::{OutputFormat, SourceArgs};
use crate::hierarchy::diagnose;

pub async fn handle(args: SourceArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let nodes = load_nodes(&args).await?;
    let problems = diagnose(&nodes);

    if problems.is_empty() {
        return output_success(
            &output_format,
            &format!("No problems found in {} structure nodes", nodes.len()),
        );
    }

    match output_format {
        OutputFormat::Json => {
            let listed: Vec<_> = problems.iter().map(|p| p.to_json()).collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "success": false,
                    "data": {
                        "nodes": nodes.len(),
                        "problems": listed
                    }
                }))?
            );
        }
        OutputFormat::Text => {
            for problem in &problems {
                println!("{:<16} {}", problem.kind().code(), problem);
            }
        }
    }

    anyhow::bail!("{} structural problem(s) found", problems.len())
}
