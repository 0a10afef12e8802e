//! Trace Timeline CLI
//!
//! Renders a recorded call trace as an SVG timeline flamegraph.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

use trace_timeline::commands::{execute_render, validate_args, RenderArgs};
use trace_timeline::utils::config::DEFAULT_X_SCALE;

/// Trace Timeline - call tree timelines from recorded traces
#[derive(Parser, Debug)]
#[command(name = "trace-timeline")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Trace file written by the tracing hook
    input: PathBuf,

    /// Output path for the SVG timeline (defaults to the input with .svg extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pixels per millisecond
    #[arg(short = 'x', long, default_value_t = DEFAULT_X_SCALE)]
    x_scale: f64,

    /// Print the indented call outline to stdout
    #[arg(long)]
    dump: bool,

    /// Print a hot calls table to stdout
    #[arg(long)]
    summary: bool,

    /// Number of functions in the summary and profile
    #[arg(long, default_value = "20")]
    top: usize,

    /// Also write a JSON profile to this path
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let args = RenderArgs {
        input: cli.input,
        output: cli.output,
        x_scale: cli.x_scale,
        dump: cli.dump,
        print_summary: cli.summary,
        top_calls: cli.top,
        profile: cli.profile,
    };

    // Validate args first
    validate_args(&args)?;

    let written = execute_render(args)?;
    println!("Wrote: {}", written.display());

    Ok(())
}
