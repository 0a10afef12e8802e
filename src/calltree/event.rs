//! Call tree nodes.
//!
//! Nodes go through two phases. While a call is open it lives on the
//! builder stack as an [`OpenEvent`]; when it returns (or the stream ends)
//! it is finalized into an immutable [`Event`] with its end time fixed.

use crate::parser::QualifiedName;
use crate::utils::config::LEAF_EPSILON;

/// One reconstructed call
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    target: QualifiedName,
    start: f64,
    end: f64,
    level: u32,
    children: Vec<Event>,
}

impl Event {
    /// Qualified name of the call site
    pub fn target(&self) -> &QualifiedName {
        &self.target
    }

    /// Display name (last element of the target path)
    pub fn name(&self) -> &str {
        self.target.display_name()
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Nesting level recorded by the tracer
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Nested calls in the order they were made
    pub fn children(&self) -> &[Event] {
        &self.children
    }

    /// Inclusive duration, never negative
    pub fn length(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }

    /// Duration not spent in nested calls
    pub fn self_time(&self) -> f64 {
        let nested: f64 = self.children.iter().map(Event::length).sum();
        (self.length() - nested).max(0.0)
    }

    /// Pre-order iterator over this node and everything below it
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Iterative pre-order walk, see [`Event::descendants`]
pub struct Descendants<'a> {
    stack: Vec<&'a Event>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Event;

    fn next(&mut self) -> Option<Self::Item> {
        let event = self.stack.pop()?;
        self.stack.extend(event.children.iter().rev());
        Some(event)
    }
}

/// A call that has not returned yet
#[derive(Debug)]
pub(crate) struct OpenEvent {
    target: QualifiedName,
    start: f64,
    level: u32,
    children: Vec<Event>,
}

impl OpenEvent {
    pub(crate) fn new(target: QualifiedName, start: f64, level: u32) -> Self {
        Self {
            target,
            start,
            level,
            children: Vec::new(),
        }
    }

    pub(crate) fn target(&self) -> &QualifiedName {
        &self.target
    }

    pub(crate) fn push_child(&mut self, child: Event) {
        self.children.push(child);
    }

    /// Freeze into an [`Event`].
    ///
    /// With no explicit end, the call ends with its last child, or
    /// `LEAF_EPSILON` after it started if it has none.
    pub(crate) fn finalize(self, end: Option<f64>) -> Event {
        let end = end.unwrap_or_else(|| match self.children.last() {
            Some(last) => last.end,
            None => self.start + LEAF_EPSILON,
        });

        Event {
            target: self.target,
            start: self.start,
            end,
            level: self.level,
            children: self.children,
        }
    }
}
