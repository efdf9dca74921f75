use clap::Args;

use crate::cli::utils::{load_nodes, output_data};
use crate::cli::{OutputFormat, SourceArgs};
use crate::config::config;
use crate::render::{render_list, RenderOptions};

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(long, help = "Hide inactive nodes")]
    pub hide_inactive: bool,
}

pub async fn handle(args: ListArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let nodes = load_nodes(&args.source).await?;
    let hide_inactive = args.hide_inactive || config().output.hide_inactive;

    match output_format {
        OutputFormat::Json => {
            let shown: Vec<_> = nodes
                .iter()
                .filter(|n| !hide_inactive || n.is_active)
                .collect();
            output_data(&shown)
        }
        OutputFormat::Text => {
            if nodes.is_empty() {
                println!("No structure nodes");
                return Ok(());
            }
            let options = RenderOptions {
                hide_inactive,
                ..RenderOptions::default()
            };
            print!("{}", render_list(&nodes, &options));
            Ok(())
        }
    }
}
