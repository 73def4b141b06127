//! Style descriptions.
//!
//! A [`Styles`] value describes the rules a call site wants: either a
//! fixed rule set, or a function from theme to rule set. The variant is
//! decided once, at construction; the sheet factory resolves it against a
//! concrete theme when a sheet is actually needed.
//!
//! Cloning shares the underlying description. That sharing is the
//! identity the cache is keyed on: every binding minted from one `styled`
//! call site carries the same description.

use std::fmt;
use std::rc::Rc;

use classact_sheets::{EvalError, RuleSet};

use crate::error::{Result, StyleError};
use crate::theme::Theme;

/// Function resolving a theme into a concrete rule set.
pub type ThemeFn = Rc<dyn Fn(&Theme) -> std::result::Result<RuleSet, EvalError>>;

/// A static or theme-dependent description of named rules.
///
/// # Example
///
/// ```rust
/// use classact::{Styles, Theme};
/// use classact_sheets::{Declarations, RuleSet};
///
/// let fixed = Styles::from(RuleSet::new().add("root", Declarations::new().set("margin", "0")));
/// assert!(!fixed.is_themed());
///
/// let themed = Styles::themed(|theme: &Theme| {
///     let accent = theme
///         .value()
///         .get("accent")
///         .and_then(|v| v.as_str())
///         .unwrap_or("teal");
///     Ok(RuleSet::new().add("root", Declarations::new().set("color", accent)))
/// });
/// assert!(themed.is_themed());
/// ```
#[derive(Clone)]
pub enum Styles {
    /// A fixed rule set; the theme plays no part in sheet identity.
    Static(Rc<RuleSet>),

    /// A rule set computed from the resolved theme.
    Themed(ThemeFn),
}

impl Styles {
    /// Creates a theme-dependent description.
    pub fn themed<F>(f: F) -> Self
    where
        F: Fn(&Theme) -> std::result::Result<RuleSet, EvalError> + 'static,
    {
        Styles::Themed(Rc::new(f))
    }

    /// Returns true for theme-dependent descriptions.
    pub fn is_themed(&self) -> bool {
        matches!(self, Styles::Themed(_))
    }

    /// Resolves the description against a theme into a concrete rule set.
    pub(crate) fn resolve(&self, theme: &Theme) -> Result<RuleSet> {
        match self {
            Styles::Static(rules) => Ok((**rules).clone()),
            Styles::Themed(f) => f(theme).map_err(|source| StyleError::Styles { source }),
        }
    }
}

impl From<RuleSet> for Styles {
    fn from(rules: RuleSet) -> Self {
        Styles::Static(Rc::new(rules))
    }
}

impl fmt::Debug for Styles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Styles::Static(rules) => f.debug_tuple("Static").field(rules).finish(),
            Styles::Themed(_) => f.debug_tuple("Themed").field(&"<fn>").finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classact_sheets::Declarations;
    use serde_json::json;

    #[test]
    fn test_static_resolve_ignores_theme() {
        let styles = Styles::from(RuleSet::new().add("root", Declarations::new().set("margin", "0")));

        let with_theme = styles.resolve(&Theme::new(json!({"accent": "red"}))).unwrap();
        let without = styles.resolve(&Theme::none()).unwrap();
        assert_eq!(with_theme.len(), 1);
        assert_eq!(without.len(), 1);
    }

    #[test]
    fn test_themed_resolve_reads_theme() {
        let styles = Styles::themed(|theme: &Theme| {
            let accent = theme
                .value()
                .get("accent")
                .and_then(|v| v.as_str())
                .unwrap_or("teal");
            Ok(RuleSet::new().add("root", Declarations::new().set("color", accent)))
        });

        let rules = styles.resolve(&Theme::new(json!({"accent": "red"}))).unwrap();
        let Some(classact_sheets::RuleDef::Static(declarations)) = rules.get("root") else {
            panic!("expected static rule");
        };
        assert_eq!(declarations.get("color"), Some("red"));
    }

    #[test]
    fn test_themed_resolve_propagates_failure() {
        let styles =
            Styles::themed(|_: &Theme| Err(EvalError::new("theme is missing the palette")));

        let err = styles.resolve(&Theme::none()).unwrap_err();
        assert!(matches!(err, StyleError::Styles { .. }));
    }

    #[test]
    fn test_clone_shares_description() {
        let styles = Styles::from(RuleSet::new());
        let clone = styles.clone();
        match (&styles, &clone) {
            (Styles::Static(a), Styles::Static(b)) => assert!(Rc::ptr_eq(a, b)),
            _ => panic!("expected static variants"),
        }
    }
}
