//! Render command implementation.
//!
//! The render command:
//! 1. Reads and validates the trace file
//! 2. Rebuilds the call tree
//! 3. Renders the timeline scene
//! 4. Writes output files

use super::models::RenderArgs;
use crate::calltree::{build_call_tree, calculate_hot_calls, calculate_tree_stats, CallTree};
use crate::flamegraph::{generate_text_outline, generate_text_summary, render_timeline, TimelineConfig};
use crate::output::{default_output_path, write_profile, write_svg};
use crate::parser::{read_trace_file, ParsedTrace, Profile};
use crate::utils::config::{MAX_TOP_CALLS, PROFILE_SCHEMA_VERSION};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::Instant;

/// Execute the render command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// Path of the written SVG file
///
/// # Errors
/// * Unreadable or malformed trace document
/// * Trace without any call record
/// * File write errors
pub fn execute_render(args: RenderArgs) -> Result<PathBuf> {
    let start_time = Instant::now();

    info!("Rendering trace: {}", args.input.display());

    // Step 1: Parse trace
    info!("Step 1/4: Reading trace file...");
    let parsed = read_trace_file(&args.input)
        .with_context(|| format!("Failed to read trace {}", args.input.display()))?;

    if let Some(captured) = format_capture_time(&parsed) {
        debug!("Trace captured at {}", captured);
    }

    // Step 2: Rebuild call tree
    info!("Step 2/4: Rebuilding call tree...");
    let tree = build_call_tree(&parsed.records).context("Failed to rebuild call tree")?;

    let stats = calculate_tree_stats(&tree.root);
    info!("Call tree: {}", stats.summary());

    let structural = tree.structural_anomalies().count();
    if let Some(first) = tree.structural_anomalies().next() {
        warn!(
            "{} records skipped as structural anomalies (first at record {})",
            structural,
            first.index()
        );
    }

    // Step 3: Render timeline
    info!("Step 3/4: Rendering timeline at {} px/ms...", args.x_scale);
    let config = TimelineConfig::new().with_x_scale(args.x_scale);
    let scene = render_timeline(&tree.root, &config);

    // Step 4: Write outputs
    info!("Step 4/4: Writing output files...");
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));

    if output == args.input {
        anyhow::bail!(
            "Refusing to overwrite input trace {}",
            args.input.display()
        );
    }

    write_svg(&scene.to_svg_string(), &output).context("Failed to write timeline SVG")?;

    if let Some(profile_path) = &args.profile {
        let profile = build_profile(&args, &parsed, &tree, scene.rects().len());
        write_profile(&profile, profile_path).context("Failed to write profile JSON")?;
        info!("✓ Profile written to: {}", profile_path.display());
    }

    if args.dump {
        println!("{}", generate_text_outline(&tree.root));
    }

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("TRACE SUMMARY");
        println!("{}", "=".repeat(80));
        println!("Trace:     {}", args.input.display());
        if let Some(captured) = format_capture_time(&parsed) {
            println!("Captured:  {}", captured);
        }
        println!("Records:   {} ({} malformed)", parsed.records.len(), parsed.skipped_records);
        println!("Anomalies: {}", tree.anomalies.len());
        println!(
            "\n{}",
            generate_text_summary(&calculate_hot_calls(&tree.root, args.top_calls), &stats)
        );
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Render completed in {:.2}s", elapsed.as_secs_f64());

    Ok(output)
}

/// Assemble the JSON profile
///
/// **Private** - internal helper for execute_render
fn build_profile(
    args: &RenderArgs,
    parsed: &ParsedTrace,
    tree: &CallTree,
    visible_boxes: usize,
) -> Profile {
    let stats = calculate_tree_stats(&tree.root);

    Profile {
        version: PROFILE_SCHEMA_VERSION.to_string(),
        input_file: args.input.display().to_string(),
        captured_at: format_capture_time(parsed),
        x_scale: args.x_scale,
        total_duration_ms: stats.total_duration,
        node_count: stats.node_count,
        max_depth: stats.max_depth,
        anomaly_count: tree.anomalies.len(),
        visible_boxes,
        hot_calls: calculate_hot_calls(&tree.root, args.top_calls),
        generated_at: Utc::now().to_rfc3339(),
    }
}

/// Capture time as RFC 3339, if the tracer recorded a usable one
fn format_capture_time(parsed: &ParsedTrace) -> Option<String> {
    let seconds = parsed.capture_time?;
    if !seconds.is_finite() {
        return None;
    }
    DateTime::<Utc>::from_timestamp(seconds.trunc() as i64, 0).map(|t| t.to_rfc3339())
}

/// Validate render arguments
///
/// **Public** - can be called before execute_render for early validation
pub fn validate_args(args: &RenderArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input trace path cannot be empty");
    }

    if !args.x_scale.is_finite() || args.x_scale <= 0.0 {
        anyhow::bail!("x-scale must be a positive number");
    }

    if args.top_calls == 0 {
        anyhow::bail!("top must be greater than 0");
    }

    if args.top_calls > MAX_TOP_CALLS {
        anyhow::bail!("top is too large (max {})", MAX_TOP_CALLS);
    }

    if let Some(output) = &args.output {
        if output == &args.input {
            anyhow::bail!("Output path must differ from the input trace");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> RenderArgs {
        RenderArgs {
            input: PathBuf::from("trace.dfl.json"),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_args_valid() {
        assert!(validate_args(&args()).is_ok());
    }

    #[test]
    fn test_validate_args_empty_input() {
        assert!(validate_args(&RenderArgs::default()).is_err());
    }

    #[test]
    fn test_validate_args_bad_scale() {
        for x_scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let args = RenderArgs { x_scale, ..args() };
            assert!(validate_args(&args).is_err(), "scale {} accepted", x_scale);
        }
    }

    #[test]
    fn test_validate_args_top_bounds() {
        assert!(validate_args(&RenderArgs { top_calls: 0, ..args() }).is_err());
        assert!(validate_args(&RenderArgs { top_calls: 5000, ..args() }).is_err());
    }

    #[test]
    fn test_validate_args_output_equals_input() {
        let args = RenderArgs {
            output: Some(PathBuf::from("trace.dfl.json")),
            ..args()
        };
        assert!(validate_args(&args).is_err());
    }
}
