use crate::utils::config::DEFAULT_X_SCALE;
use std::path::PathBuf;

/// Arguments for the render command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct RenderArgs {
    /// Trace file to read
    pub input: PathBuf,

    /// Output path for the SVG timeline (None = input with `.svg` extension)
    pub output: Option<PathBuf>,

    /// Pixels per millisecond
    pub x_scale: f64,

    /// Print the indented call outline to stdout
    pub dump: bool,

    /// Print the hot calls table to stdout
    pub print_summary: bool,

    /// Number of functions in the hot calls table and profile
    pub top_calls: usize,

    /// Output path for the JSON profile (optional)
    pub profile: Option<PathBuf>,
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: None,
            x_scale: DEFAULT_X_SCALE,
            dump: false,
            print_summary: false,
            top_calls: 20,
            profile: None,
        }
    }
}
