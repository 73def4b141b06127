//! The public entry point.
//!
//! [`styled`] is called once per call site with a style description and
//! options; the resulting [`Styled`] value mints one
//! [`StyleBinding`](crate::StyleBinding) per component instance. All
//! bindings from one call site share the description, the ordering
//! index, and the theme scope — which is exactly what makes their sheets
//! shareable.

use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use classact_sheets::SheetOptions;

use crate::binder::StyleBinding;
use crate::styles::Styles;
use crate::theme::ThemeScope;

/// Source of default ordering indexes: every call site that doesn't pick
/// an index explicitly gets the next one, so later call sites sort after
/// earlier ones on the surface.
static NEXT_SHEET_INDEX: AtomicUsize = AtomicUsize::new(0);

fn next_sheet_index() -> usize {
    NEXT_SHEET_INDEX.fetch_add(1, Ordering::Relaxed)
}

/// Options for a [`styled`] call site.
///
/// # Example
///
/// ```rust
/// use classact::StyledOptions;
///
/// let options = StyledOptions::default().name("button").index(10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StyledOptions {
    index: Option<usize>,
    name: Option<String>,
    theme_scope: Option<ThemeScope>,
    sheet_options: SheetOptions,
}

impl StyledOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the ordering index instead of taking the next global one.
    ///
    /// Call sites sharing an index (and theme and context) share a
    /// sheet; lower indexes sort earlier on the surface.
    pub fn index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Sets the debug/namespacing label.
    ///
    /// The name becomes the class-name prefix and feeds the sheet's meta
    /// label (`<name>-Themed` / `<name>-Unthemed`).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Points this call site at a specific ambient theme scope instead
    /// of the per-thread global one.
    pub fn theme_scope(mut self, scope: ThemeScope) -> Self {
        self.theme_scope = Some(scope);
        self
    }

    /// Sets sheet options passed through to compilation untouched.
    pub fn sheet_options(mut self, options: SheetOptions) -> Self {
        self.sheet_options = options;
        self
    }
}

pub(crate) struct StyledShared {
    pub(crate) styles: Styles,
    pub(crate) index: usize,
    pub(crate) scope: ThemeScope,
    pub(crate) sheet_options: SheetOptions,
}

impl StyledShared {
    pub(crate) fn label(&self) -> &str {
        self.sheet_options.label.as_deref().unwrap_or("sheet")
    }
}

/// A configured call site, ready to mint per-instance bindings.
pub struct Styled {
    shared: Rc<StyledShared>,
}

impl Styled {
    /// Creates one binding for one component instance.
    pub fn bind(&self) -> StyleBinding {
        StyleBinding::new(Rc::clone(&self.shared))
    }

    /// Returns the ordering index of this call site.
    pub fn index(&self) -> usize {
        self.shared.index
    }
}

impl std::fmt::Debug for Styled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Styled")
            .field("label", &self.shared.label())
            .field("index", &self.shared.index)
            .finish()
    }
}

/// Configures a call site: a style description plus options.
///
/// # Example
///
/// ```rust
/// use classact::{styled, InstanceData, Styles, StyledOptions, StylingContext};
/// use classact_sheets::{Declarations, RuleSet};
/// use serde_json::json;
///
/// let button = styled(
///     Styles::from(RuleSet::new().add("root", Declarations::new().set("margin", "0"))),
///     StyledOptions::default().name("button"),
/// );
///
/// let context = StylingContext::new();
/// let mut binding = button.bind();
/// let classes = binding
///     .on_mount(&context, &InstanceData::new(json!({})))
///     .unwrap();
/// assert!(classes.get("root").is_some());
/// # binding.on_unmount().unwrap();
/// ```
pub fn styled(styles: Styles, options: StyledOptions) -> Styled {
    let index = options.index.unwrap_or_else(next_sheet_index);
    let scope = options.theme_scope.unwrap_or_else(ThemeScope::global);

    let mut sheet_options = options.sheet_options;
    if let Some(name) = &options.name {
        if sheet_options.label.is_none() {
            let flavor = if styles.is_themed() {
                "Themed"
            } else {
                "Unthemed"
            };
            sheet_options.label = Some(format!("{}-{}", name, flavor));
        }
        if sheet_options.class_prefix.is_none() {
            sheet_options.class_prefix = Some(name.clone());
        }
    }

    Styled {
        shared: Rc::new(StyledShared {
            styles,
            index,
            scope,
            sheet_options,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classact_sheets::{Declarations, RuleSet};

    fn rules() -> RuleSet {
        RuleSet::new().add("root", Declarations::new())
    }

    #[test]
    fn test_default_indexes_increase() {
        let first = styled(Styles::from(rules()), StyledOptions::default());
        let second = styled(Styles::from(rules()), StyledOptions::default());
        assert!(first.index() < second.index());
    }

    #[test]
    fn test_explicit_index_is_kept() {
        let call_site = styled(Styles::from(rules()), StyledOptions::default().index(42));
        assert_eq!(call_site.index(), 42);
    }

    #[test]
    fn test_name_derives_label_and_prefix() {
        let call_site = styled(
            Styles::from(rules()),
            StyledOptions::default().name("button"),
        );
        assert_eq!(call_site.shared.label(), "button-Unthemed");
        assert_eq!(
            call_site.shared.sheet_options.class_prefix.as_deref(),
            Some("button")
        );

        let themed = styled(
            Styles::themed(|_| Ok(RuleSet::new())),
            StyledOptions::default().name("button"),
        );
        assert_eq!(themed.shared.label(), "button-Themed");
    }

    #[test]
    fn test_explicit_sheet_options_win_over_name() {
        let options = StyledOptions::default()
            .name("button")
            .sheet_options(SheetOptions {
                label: Some("custom".to_string()),
                class_prefix: None,
            });
        let call_site = styled(Styles::from(rules()), options);
        assert_eq!(call_site.shared.label(), "custom");
        assert_eq!(
            call_site.shared.sheet_options.class_prefix.as_deref(),
            Some("button")
        );
    }
}
