pub mod commands;
pub mod utils;

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "structree")]
#[command(about = "Build and inspect the organizational structure hierarchy")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Print the structure nodes as a tree")]
    Tree(commands::tree::TreeArgs),

    #[command(about = "Print the structure nodes as a flat list, in input order")]
    List(commands::list::ListArgs),

    #[command(about = "Report duplicate ids, missing parents and parent cycles")]
    Check(SourceArgs),

    #[command(about = "Summarize node, root and depth counts")]
    Stats(SourceArgs),
}

/// Where to read the flat node collection from
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    #[arg(help = "JSON or YAML file with structure nodes, '-' for stdin")]
    pub source: Option<String>,

    #[arg(long, help = "Fetch structure nodes from this API endpoint")]
    pub url: Option<String>,

    #[arg(long, help = "Bearer token for --url")]
    pub token: Option<String>,

    #[arg(long, help = "Request timeout in seconds for --url")]
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Tree(args) => commands::tree::handle(args, output_format).await,
        Commands::List(args) => commands::list::handle(args, output_format).await,
        Commands::Check(args) => commands::check::handle(args, output_format).await,
        Commands::Stats(args) => commands::stats::handle(args, output_format).await,
    }
}
