//! Minimal vector graphics model.
//!
//! Knows about rectangles, text, lines, and groups, and nothing about
//! traces. The timeline renderer draws into a [`Scene`], which is then
//! serialized to SVG.

pub mod document;
pub mod style;

pub use document::{escape_xml, fmt_num, Element, Scene};
pub use style::Style;
