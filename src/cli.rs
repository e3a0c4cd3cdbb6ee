use crate::annotate::Annotator;
use crate::config::{Config, load_config};
use crate::encode::render_url;
use crate::query::{EngineCli, WorkflowSource};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "wfviz",
    version,
    about = "Render a live PlantUML view of a running workflow"
)]
pub struct Args {
    /// Workflow execution to visualize
    pub workflow_id: String,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Color for active states
    #[arg(long = "success-color")]
    pub success_color: Option<String>,

    /// Color for active states flagged as errors
    #[arg(long = "failure-color")]
    pub failure_color: Option<String>,

    /// Rendering service base URL
    #[arg(long = "base-url")]
    pub base_url: Option<String>,

    /// Workflow engine CLI binary
    #[arg(long = "engine")]
    pub engine: Option<String>,

    /// Print the URL without opening a browser
    #[arg(long = "no-open")]
    pub no_open: bool,

    /// Echo the fetched definition and the annotated diagram to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, &args);

    let source = EngineCli::new(&config.engine);
    let url = visualize(&source, &config, &args.workflow_id, args.verbose)?;

    if !args.no_open {
        open_in_browser(&url);
    }
    println!("{url}");
    Ok(())
}

/// Fetches the diagram and status for `workflow_id` and builds the render
/// URL.
pub fn visualize(
    source: &dyn WorkflowSource,
    config: &Config,
    workflow_id: &str,
    verbose: bool,
) -> Result<String> {
    let diagram = source.diagram_definition(workflow_id)?;
    if verbose {
        eprintln!("-- diagram definition --\n{diagram}");
    }

    let status = source.workflow_status(workflow_id)?;
    let annotator = Annotator::new(&config.colors.success, &config.colors.failure);
    let annotated = annotator.annotate(&diagram, &status);
    if verbose {
        eprintln!("-- annotated diagram --\n{annotated}");
    }

    Ok(render_url(&config.render.base_url, &annotated))
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(color) = &args.success_color {
        config.colors.success = color.clone();
    }
    if let Some(color) = &args.failure_color {
        config.colors.failure = color.clone();
    }
    if let Some(base_url) = &args.base_url {
        config.render.base_url = base_url.clone();
    }
    if let Some(binary) = &args.engine {
        config.engine.binary = binary.clone();
    }
}

#[cfg(feature = "open")]
fn open_in_browser(url: &str) {
    if let Err(err) = webbrowser::open(url) {
        eprintln!("could not open browser: {err}");
    }
}

#[cfg(not(feature = "open"))]
fn open_in_browser(_url: &str) {}
