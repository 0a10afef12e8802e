//! SVG timeline generation.
//!
//! Unlike a classic flamegraph, which sorts and merges stacks by weight,
//! the timeline keeps real time on the x axis:
//! - one box per call, spanning its start to end
//! - nesting depth on the y axis, root on top
//! - boxes narrower than `MIN_VISIBLE_WIDTH` are culled with their subtree
//! - gridlines every `GRIDLINE_INTERVAL` ms

use crate::calltree::Event;
use crate::scene::{Scene, Style};
use crate::utils::config::{DEFAULT_X_SCALE, GRIDLINE_INTERVAL, MIN_VISIBLE_WIDTH, ROW_HEIGHT};
use log::{debug, info};

/// Timeline configuration
#[derive(Debug, Clone)]
pub struct TimelineConfig {
    /// Pixels per millisecond
    pub x_scale: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            x_scale: DEFAULT_X_SCALE,
        }
    }
}

impl TimelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_x_scale(mut self, x_scale: f64) -> Self {
        self.x_scale = x_scale;
        self
    }

    fn time_to_x(&self, time: f64) -> f64 {
        time * self.x_scale
    }
}

fn level_to_y(level: usize) -> f64 {
    level as f64 * ROW_HEIGHT
}

/// Running maxima over the drawn boxes
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Extents {
    /// Rightmost box edge in pixels
    pub max_x: f64,
    /// Bottom edge of the deepest row in pixels
    pub max_y: f64,
    /// Latest end time in milliseconds
    pub max_end: f64,
}

impl Extents {
    fn include(&mut self, x1: f64, y1: f64, end: f64) {
        self.max_x = self.max_x.max(x1);
        self.max_y = self.max_y.max(y1);
        self.max_end = self.max_end.max(end);
    }
}

/// Whether a call is wide enough to draw at this scale
///
/// A call that fails this check hides its whole subtree.
pub fn is_visible(event: &Event, config: &TimelineConfig) -> bool {
    let x0 = config.time_to_x(event.start());
    let x1 = config.time_to_x(event.end());
    x1 - x0 >= MIN_VISIBLE_WIDTH
}

/// Render a call tree into a scene
///
/// **Public** - main entry point for timeline rendering
///
/// The scene is sized to the drawn boxes. If even the root is too narrow
/// the result is an empty 0x0 scene.
pub fn render_timeline(root: &Event, config: &TimelineConfig) -> Scene {
    let mut scene = Scene::new();

    let extents = draw_calls(&mut scene, root, config);
    draw_gridlines(&mut scene, &extents, config);
    scene.set_size(extents.max_x, extents.max_y);

    info!(
        "Timeline rendered: {} boxes, {}x{} px",
        scene.rects().len(),
        extents.max_x,
        extents.max_y
    );

    scene
}

/// Pre-order walk over visible calls
///
/// **Private** - internal helper for render_timeline
fn draw_calls(scene: &mut Scene, root: &Event, config: &TimelineConfig) -> Extents {
    let mut extents = Extents::default();
    let mut culled = 0usize;

    let box_style = Style::new()
        .set("stroke_width", 1)
        .set("fill", "white")
        .set("stroke", "#003300");
    let label_style = Style::new().set("font", "9px sans-serif");

    // Explicit stack: traced programs can nest deeper than we want to recurse
    let mut pending = vec![(root, 0usize)];
    while let Some((event, level)) = pending.pop() {
        if !is_visible(event, config) {
            culled += 1;
            continue;
        }

        let x0 = config.time_to_x(event.start());
        let x1 = config.time_to_x(event.end());
        let y0 = level_to_y(level);
        let y1 = level_to_y(level + 1);
        let title = event.name();

        scene.rect(x0, y0, x1 - x0, y1 - y0, box_style.clone(), Some(title));
        scene.text(x0 + 2.0, y1 - 3.0, title, label_style.clone());

        extents.include(x1, y1, event.end());

        // Reversed so the first child is drawn first
        pending.extend(event.children().iter().rev().map(|child| (child, level + 1)));
    }

    debug!("Culled {} subtrees below {}px", culled, MIN_VISIBLE_WIDTH);
    extents
}

/// Vertical time markers from 0 up to the latest drawn end time
///
/// **Private** - internal helper for render_timeline
fn draw_gridlines(scene: &mut Scene, extents: &Extents, config: &TimelineConfig) {
    let label_style = Style::new().set("font", "11px sans-serif");
    let line_style = Style::new().set("stroke_width", 1).set("stroke", "#CCFFCC");

    // Tick times come from the index, never a running sum
    let mut tick = 0usize;
    loop {
        let time = tick as f64 * GRIDLINE_INTERVAL;
        if time >= extents.max_end {
            break;
        }

        let x = config.time_to_x(time);
        scene.text(x, 15.0, format!("{:.2}ms", time), label_style.clone());
        scene.line(x, 0.0, x, extents.max_y, line_style.clone());
        tick += 1;
    }

    debug!("Drew {} gridlines up to {:.2}ms", tick, extents.max_end);
}
