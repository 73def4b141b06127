//! Theme handles and the ambient theme scope.
//!
//! A [`Theme`] is a cheaply-cloneable handle around an arbitrary JSON
//! value. Two handles are equal only when they share the same underlying
//! allocation — identity, never deep comparison — because theme equality
//! is a cache key: a "new theme object with the same contents" must
//! produce a new sheet, exactly like the binding it models.
//!
//! [`Theme::none`] returns the `NoTheme` sentinel: one shared handle per
//! thread that stands in for "no theme in play". Static style
//! descriptions always resolve to it.
//!
//! A [`ThemeScope`] is the ambient provider: the host sets the current
//! theme on a scope, bindings read it at mount/commit time. The
//! per-thread [`ThemeScope::global`] scope is the default; a binding call
//! site can be pointed at a different scope through its options.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

thread_local! {
    static NO_THEME: Theme = Theme {
        value: Rc::new(Value::Null),
    };

    static GLOBAL_SCOPE: ThemeScope = ThemeScope::new();
}

/// An identity-compared theme handle.
///
/// # Example
///
/// ```rust
/// use classact::Theme;
/// use serde_json::json;
///
/// let theme = Theme::new(json!({"accent": "tomato"}));
/// let alias = theme.clone();
/// let twin = Theme::new(json!({"accent": "tomato"}));
///
/// assert!(theme.same(&alias)); // same allocation
/// assert!(!theme.same(&twin)); // equal contents, different identity
/// ```
#[derive(Clone)]
pub struct Theme {
    value: Rc<Value>,
}

impl Theme {
    /// Creates a theme handle from a JSON value.
    pub fn new(value: Value) -> Self {
        Self {
            value: Rc::new(value),
        }
    }

    /// Returns the `NoTheme` sentinel for this thread.
    ///
    /// All clones share one allocation, so every `NoTheme` compares equal
    /// to every other.
    pub fn none() -> Self {
        NO_THEME.with(|theme| theme.clone())
    }

    /// Returns true if this handle is the `NoTheme` sentinel.
    pub fn is_none(&self) -> bool {
        NO_THEME.with(|none| Rc::ptr_eq(&self.value, &none.value))
    }

    /// Returns the underlying theme value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Identity comparison: true only when both handles share the same
    /// underlying allocation.
    pub fn same(&self, other: &Theme) -> bool {
        Rc::ptr_eq(&self.value, &other.value)
    }
}

impl PartialEq for Theme {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl Eq for Theme {}

impl fmt::Debug for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "Theme(none)")
        } else {
            write!(f, "Theme({})", self.value)
        }
    }
}

/// Ambient theme provider.
///
/// Clones share state: setting the theme on one clone is visible through
/// every other, which is what lets a host own the scope while bindings
/// hold cheap handles to it.
///
/// # Example
///
/// ```rust
/// use classact::{Theme, ThemeScope};
/// use serde_json::json;
///
/// let scope = ThemeScope::new();
/// assert!(scope.current().is_none());
///
/// let dark = Theme::new(json!({"mode": "dark"}));
/// scope.set(dark.clone());
/// assert!(scope.current().unwrap().same(&dark));
/// ```
#[derive(Clone, Default)]
pub struct ThemeScope {
    current: Rc<RefCell<Option<Theme>>>,
}

impl ThemeScope {
    /// Creates an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the per-thread default scope.
    pub fn global() -> Self {
        GLOBAL_SCOPE.with(|scope| scope.clone())
    }

    /// Sets the current theme.
    pub fn set(&self, theme: Theme) {
        *self.current.borrow_mut() = Some(theme);
    }

    /// Clears the current theme.
    pub fn clear(&self) {
        *self.current.borrow_mut() = None;
    }

    /// Returns the current theme, if one is set.
    pub fn current(&self) -> Option<Theme> {
        self.current.borrow().clone()
    }
}

impl fmt::Debug for ThemeScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeScope")
            .field("current", &self.current.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_theme_identity_not_deep_equality() {
        let a = Theme::new(json!({"spacing": 8}));
        let b = Theme::new(json!({"spacing": 8}));
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_no_theme_is_shared() {
        let a = Theme::none();
        let b = Theme::none();
        assert_eq!(a, b);
        assert!(a.is_none());
    }

    #[test]
    fn test_regular_theme_is_not_none() {
        let theme = Theme::new(json!(null));
        assert!(!theme.is_none());
    }

    #[test]
    fn test_scope_clones_share_state() {
        let scope = ThemeScope::new();
        let view = scope.clone();

        let theme = Theme::new(json!({"mode": "dark"}));
        scope.set(theme.clone());
        assert!(view.current().unwrap().same(&theme));

        view.clear();
        assert!(scope.current().is_none());
    }

    #[test]
    fn test_global_scope_is_shared_per_thread() {
        let theme = Theme::new(json!({"mode": "light"}));
        ThemeScope::global().set(theme.clone());
        assert!(ThemeScope::global().current().unwrap().same(&theme));
        ThemeScope::global().clear();
    }
}
