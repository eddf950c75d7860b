use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use grocery_map::{
    app::App,
    config::ProjectConfig,
    fetch::{bootstrap, progress_bar, Source},
    page::{render_page, StaticLegend, StaticMap},
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
struct Cli {
    /// Project config (YAML). The built-in grocery map when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Web root or directory the layer URLs are relative to.
    #[arg(long, global = true, default_value = ".")]
    base: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Write a standalone HTML map of every layer.
    Render {
        /// Region to show on filterable layers.
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List the region choices of a layer.
    Regions { layer: String },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("grocery_map=info".parse()?))
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ProjectConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => ProjectConfig::default(),
    };
    let source = Source::parse(&cli.base).context("Invalid --base")?;

    let layers = config.layers.len() as u64;
    let mut app = App::new(config, StaticMap::default(), StaticLegend::default());
    bootstrap(&mut app, &source, &progress_bar(layers));

    match cli.command {
        Command::Render { region, out } => {
            if let Some(region) = region {
                let filterable: Vec<_> = app
                    .config()
                    .layers
                    .iter()
                    .filter(|x| x.filterable)
                    .map(|x| x.id.clone())
                    .collect();
                for layer in filterable {
                    if !app.set_filter(&layer, &region) {
                        warn!(layer = %layer, region = %region, "region not shown");
                    }
                }
            }

            let html = render_page(&app)?;
            match out {
                Some(path) => fs::write(&path, html)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => print!("{html}"),
            }
        }
        Command::Regions { layer } => {
            if app.config().layer(&layer).is_none() {
                bail!("Unknown layer: {layer}");
            }
            let Some(filter) = app.region_filter(&layer) else {
                bail!("Layer {layer} is not loaded or not filterable");
            };
            for option in filter.options() {
                println!("{option}");
            }
        }
    }

    Ok(())
}
