//! Rule definitions and named rule sets.
//!
//! A [`RuleSet`] is the input to sheet compilation: an ordered collection
//! of named rule definitions. Each definition is either a static
//! declaration block shared by every consumer of the sheet, or a dynamic
//! function that computes declarations from per-instance data.
//!
//! Dynamic definitions exist because per-instance values (say, a color
//! taken from component props) cannot live in a shared sheet: two
//! instances with different data must not collide. The compiled sheet
//! keeps an empty placeholder rule for each dynamic definition; the
//! overlay layer in `classact` inserts one concrete variant per instance.

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use indexmap::IndexMap;

use crate::css::Declarations;
use crate::error::EvalError;

/// Function computing declarations from per-instance data.
///
/// The data payload is the instance's JSON value; the function returns
/// the concrete declarations for this instance, or an [`EvalError`] when
/// the data is malformed.
pub type DynamicFn = Rc<dyn Fn(&Value) -> std::result::Result<Declarations, EvalError>>;

/// A single named rule definition.
#[derive(Clone)]
pub enum RuleDef {
    /// Fixed declarations shared by every consumer of the sheet.
    Static(Declarations),

    /// Declarations computed per component instance from its data.
    ///
    /// Compiles to an empty placeholder in the shared sheet; concrete
    /// per-instance variants are layered on top of it.
    Dynamic(DynamicFn),
}

impl fmt::Debug for RuleDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleDef::Static(declarations) => f.debug_tuple("Static").field(declarations).finish(),
            RuleDef::Dynamic(_) => f.debug_tuple("Dynamic").field(&"<fn>").finish(),
        }
    }
}

/// An ordered collection of named rule definitions.
///
/// # Example
///
/// ```rust
/// use classact_sheets::{Declarations, RuleSet};
/// use serde_json::Value;
///
/// let rules = RuleSet::new()
///     .add("root", Declarations::new().set("display", "flex"))
///     .add_dynamic("accent", |data: &Value| {
///         let color = data
///             .get("color")
///             .and_then(|v| v.as_str())
///             .unwrap_or("teal");
///         Ok(Declarations::new().set("color", color))
///     });
///
/// assert_eq!(rules.len(), 2);
/// assert!(rules.has_dynamic());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: IndexMap<String, RuleDef>,
}

impl RuleSet {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a static rule, returning the set for chaining.
    ///
    /// If a rule with the same name exists, it is replaced in place.
    pub fn add(mut self, name: &str, declarations: Declarations) -> Self {
        self.rules
            .insert(name.to_string(), RuleDef::Static(declarations));
        self
    }

    /// Adds a dynamic rule computed from per-instance data.
    pub fn add_dynamic<F>(mut self, name: &str, f: F) -> Self
    where
        F: Fn(&Value) -> std::result::Result<Declarations, EvalError> + 'static,
    {
        self.rules
            .insert(name.to_string(), RuleDef::Dynamic(Rc::new(f)));
        self
    }

    /// Returns the definition for a rule name, if present.
    pub fn get(&self, name: &str) -> Option<&RuleDef> {
        self.rules.get(name)
    }

    /// Iterates over (name, definition) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleDef)> {
        self.rules.iter().map(|(n, d)| (n.as_str(), d))
    }

    /// Returns the number of rule definitions.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the set has no definitions.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns true if any definition is dynamic.
    pub fn has_dynamic(&self) -> bool {
        self.rules
            .values()
            .any(|def| matches!(def, RuleDef::Dynamic(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_set_new_is_empty() {
        let rules = RuleSet::new();
        assert!(rules.is_empty());
        assert!(!rules.has_dynamic());
    }

    #[test]
    fn test_rule_set_preserves_order() {
        let rules = RuleSet::new()
            .add("b", Declarations::new())
            .add("a", Declarations::new())
            .add("c", Declarations::new());

        let names: Vec<&str> = rules.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_rule_set_has_dynamic() {
        let static_only = RuleSet::new().add("root", Declarations::new());
        assert!(!static_only.has_dynamic());

        let mixed = static_only.add_dynamic("accent", |_| Ok(Declarations::new()));
        assert!(mixed.has_dynamic());
    }

    #[test]
    fn test_dynamic_rule_evaluates_against_data() {
        let rules = RuleSet::new().add_dynamic("accent", |data: &Value| {
            let color = data
                .get("color")
                .and_then(|v| v.as_str())
                .ok_or_else(|| EvalError::new("missing field 'color'"))?;
            Ok(Declarations::new().set("color", color))
        });

        let Some(RuleDef::Dynamic(f)) = rules.get("accent") else {
            panic!("expected dynamic definition");
        };

        let declarations = f(&serde_json::json!({"color": "red"})).unwrap();
        assert_eq!(declarations.get("color"), Some("red"));

        let err = f(&serde_json::json!({})).unwrap_err();
        assert_eq!(err.message(), "missing field 'color'");
    }
}
