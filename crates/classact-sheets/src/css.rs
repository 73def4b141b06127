//! CSS declaration blocks.
//!
//! A [`Declarations`] value is an ordered property → value block, the
//! payload of every rule. Order is preserved because it is significant in
//! CSS output: later declarations win on conflict, and stable output keeps
//! diffs and snapshots readable.

use indexmap::IndexMap;
use serde::Serialize;

/// An ordered block of CSS declarations.
///
/// Properties keep insertion order. Setting an existing property replaces
/// its value without moving it.
///
/// # Example
///
/// ```rust
/// use classact_sheets::Declarations;
///
/// let block = Declarations::new()
///     .set("display", "flex")
///     .set("color", "teal");
///
/// assert_eq!(block.get("color"), Some("teal"));
/// assert_eq!(block.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Declarations {
    properties: IndexMap<String, String>,
}

impl Declarations {
    /// Creates an empty declaration block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property, returning the block for chaining.
    ///
    /// Replaces the value in place if the property already exists.
    pub fn set(mut self, property: &str, value: impl Into<String>) -> Self {
        self.properties.insert(property.to_string(), value.into());
        self
    }

    /// Returns the value of a property, if set.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.properties.get(property).map(|v| v.as_str())
    }

    /// Returns the number of declarations.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns true if the block has no declarations.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterates over (property, value) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }

    /// Writes the block body as indented `property: value;` lines.
    pub(crate) fn write_body(&self, out: &mut String) {
        for (property, value) in self.iter() {
            out.push_str("  ");
            out.push_str(property);
            out.push_str(": ");
            out.push_str(value);
            out.push_str(";\n");
        }
    }
}
