//! Inline CSS style strings.

use std::fmt;

/// Ordered `key:value` pairs rendered as an SVG `style` attribute
///
/// Pairs with an empty value are dropped when declared, so optional
/// styling can be passed straight through.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pairs: Vec<(String, String)>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a property; `_` in the key becomes `-` (`stroke_width` -> `stroke-width`)
    pub fn set(mut self, key: &str, value: impl fmt::Display) -> Self {
        let value = value.to_string();
        if !value.is_empty() {
            self.pairs.push((key.replace('_', "-"), value));
        }
        self
    }

    /// Declare a property only when a value is present
    pub fn set_opt<V: fmt::Display>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{}:{}", key, value)?;
        }
        Ok(())
    }
}
