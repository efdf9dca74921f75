use clap::Args;

use crate::cli::utils::load_nodes;
use crate::cli::{OutputFormat, SourceArgs};
use crate::config::config;
use crate::hierarchy::{parse_order, DanglingPolicy, HierarchyBuilder};
use crate::render::{render_json, render_tree, RenderOptions};

#[derive(Args, Debug, Clone, Default)]
pub struct TreeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(long, help = "Sibling order, e.g. \"name asc, level desc\"")]
    pub order: Option<String>,

    #[arg(long, help = "Fail on duplicate ids, missing parents or cycles")]
    pub strict: bool,

    #[arg(long, help = "Show nodes with a missing parent as roots instead of dropping them")]
    pub promote_orphans: bool,

    #[arg(long, help = "Hide inactive nodes and everything below them")]
    pub hide_inactive: bool,

    #[arg(long, help = "Indent width of one tree level")]
    pub indent: Option<usize>,
}

impl TreeArgs {
    /// Flags win over configuration
    pub fn builder(&self) -> anyhow::Result<HierarchyBuilder> {
        let settings = &config().hierarchy;

        let order = match self.order.as_deref().or(settings.default_order.as_deref()) {
            Some(s) => parse_order(s)?,
            None => Vec::new(),
        };
        let dangling = if self.promote_orphans {
            DanglingPolicy::Promote
        } else {
            settings.dangling_policy
        };

        Ok(HierarchyBuilder::new()
            .dangling(dangling)
            .strict(self.strict || settings.strict)
            .order(order))
    }

    pub fn render_options(&self) -> RenderOptions {
        let settings = &config().output;
        RenderOptions {
            indent: self.indent.unwrap_or(settings.indent),
            hide_inactive: self.hide_inactive || settings.hide_inactive,
        }
    }
}

pub async fn handle(args: TreeArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let builder = args.builder()?;
    let nodes = load_nodes(&args.source).await?;
    let forest = builder.build(&nodes)?;
    let options = args.render_options();

    match output_format {
        OutputFormat::Json => println!("{}", render_json(&forest, options.hide_inactive)?),
        OutputFormat::Text => {
            let text = render_tree(&forest, &options);
            if text.is_empty() {
                println!("No structure nodes");
            } else {
                print!("{}", text);
            }
        }
    }
    Ok(())
}
