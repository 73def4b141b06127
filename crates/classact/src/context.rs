//! The styling context: surface + registry under one handle.
//!
//! A [`StylingContext`] is the opaque handle bindings are given: it owns
//! the rendering [`Surface`] (or none, in headless environments), the
//! sheet registry, and the sheet id counter. Handles are cheap clones of
//! one shared allocation and are identity-compared — a binding treats "a
//! different context object" as a different rendering world, even if the
//! contents look alike.
//!
//! Acquire/release is the whole sharing protocol: acquisition either
//! reuses a cached sheet (bumping its consumer count) or compiles and
//! physically attaches a new one; release drops a consumer and detaches
//! the sheet when the last one is gone. A sheet is never detached while
//! someone still holds it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use classact_sheets::{Sheet, SheetOptions, Surface};

use crate::error::{Result, StyleError};
use crate::factory;
use crate::registry::SheetRegistry;
use crate::styles::Styles;
use crate::theme::Theme;

struct ContextInner {
    surface: Option<Surface>,
    registry: RefCell<SheetRegistry>,
    next_sheet_id: Cell<usize>,
}

/// Handle to one rendering context.
///
/// # Example
///
/// ```rust
/// use classact::StylingContext;
///
/// let context = StylingContext::new();
/// assert!(!context.is_headless());
/// assert_eq!(context.css_text(), "");
///
/// let headless = StylingContext::headless();
/// assert!(headless.is_headless());
/// ```
#[derive(Clone)]
pub struct StylingContext {
    inner: Rc<ContextInner>,
}

impl StylingContext {
    /// Creates a context with a live rendering surface.
    pub fn new() -> Self {
        Self::build(Some(Surface::new()))
    }

    /// Creates a context without a rendering surface.
    ///
    /// Acquisition fails with [`StyleError::SurfaceUnavailable`]; the
    /// lifecycle binder turns that into empty class mappings, so
    /// components keep working unstyled.
    pub fn headless() -> Self {
        Self::build(None)
    }

    fn build(surface: Option<Surface>) -> Self {
        Self {
            inner: Rc::new(ContextInner {
                surface,
                registry: RefCell::new(SheetRegistry::new()),
                next_sheet_id: Cell::new(1),
            }),
        }
    }

    /// Returns true when no rendering surface is present.
    pub fn is_headless(&self) -> bool {
        self.inner.surface.is_none()
    }

    /// Returns the rendering surface, if present.
    pub fn surface(&self) -> Option<&Surface> {
        self.inner.surface.as_ref()
    }

    /// Renders the current surface state to CSS text (empty when
    /// headless).
    pub fn css_text(&self) -> String {
        self.inner
            .surface
            .as_ref()
            .map(|surface| surface.css_text())
            .unwrap_or_default()
    }

    /// Identity comparison of context handles.
    pub fn same(a: &StylingContext, b: &StylingContext) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }

    /// Acquires the sheet for (index, styles, theme).
    ///
    /// A cached sheet for the exact (index, theme-identity) pair gains a
    /// consumer; otherwise a new sheet is compiled, attached to the
    /// surface at the position implied by `index`, and cached with a
    /// consumer count of one.
    pub fn acquire(
        &self,
        index: usize,
        styles: &Styles,
        theme: &Theme,
        options: &SheetOptions,
    ) -> Result<Rc<Sheet>> {
        let surface = self
            .inner
            .surface
            .as_ref()
            .ok_or(StyleError::SurfaceUnavailable)?;

        if let Some(sheet) = self.inner.registry.borrow_mut().retain(index, theme) {
            return Ok(sheet);
        }

        let id = self.inner.next_sheet_id.get();
        self.inner.next_sheet_id.set(id + 1);

        let sheet = factory::compile(styles, theme, id, index, options)?;
        self.inner
            .registry
            .borrow_mut()
            .insert(index, theme.clone(), Rc::clone(&sheet));
        surface.attach(&sheet);
        Ok(sheet)
    }

    /// Releases one consumer of a previously acquired sheet.
    ///
    /// When the last consumer is gone the sheet is detached from the
    /// surface and the cache entry evicted. Releasing more times than
    /// acquiring fails with [`StyleError::UnbalancedRelease`].
    pub fn release(&self, index: usize, sheet: &Rc<Sheet>, theme: &Theme) -> Result<()> {
        let evicted = self
            .inner
            .registry
            .borrow_mut()
            .release(index, sheet, theme)?;
        if let (Some(sheet), Some(surface)) = (evicted, self.inner.surface.as_ref()) {
            surface.detach(&sheet);
        }
        Ok(())
    }

    /// Returns the consumer count for (index, theme); zero when absent.
    pub fn consumer_count(&self, index: usize, theme: &Theme) -> usize {
        self.inner.registry.borrow().consumer_count(index, theme)
    }

    /// Returns the number of cached sheets in this context.
    pub fn cached_sheet_count(&self) -> usize {
        self.inner.registry.borrow().sheet_count()
    }
}

impl Default for StylingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StylingContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StylingContext")
            .field("headless", &self.is_headless())
            .field("cached_sheets", &self.cached_sheet_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classact_sheets::{Declarations, RuleSet};
    use serde_json::json;

    fn styles() -> Styles {
        Styles::from(RuleSet::new().add("root", Declarations::new().set("margin", "0")))
    }

    #[test]
    fn test_acquire_compiles_and_attaches_once() {
        let context = StylingContext::new();
        let theme = Theme::none();

        let first = context
            .acquire(0, &styles(), &theme, &SheetOptions::default())
            .unwrap();
        let second = context
            .acquire(0, &styles(), &theme, &SheetOptions::default())
            .unwrap();

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(context.consumer_count(0, &theme), 2);
        assert_eq!(context.surface().unwrap().attach_count(), 1);
    }

    #[test]
    fn test_distinct_themes_get_distinct_sheets() {
        let context = StylingContext::new();
        let light = Theme::new(json!({"mode": "light"}));
        let dark = Theme::new(json!({"mode": "dark"}));

        let a = context
            .acquire(0, &styles(), &light, &SheetOptions::default())
            .unwrap();
        let b = context
            .acquire(0, &styles(), &dark, &SheetOptions::default())
            .unwrap();

        assert!(!Rc::ptr_eq(&a, &b));
        assert_eq!(context.cached_sheet_count(), 2);
        assert_eq!(context.surface().unwrap().len(), 2);
    }

    #[test]
    fn test_release_detaches_at_zero() {
        let context = StylingContext::new();
        let theme = Theme::none();
        let sheet = context
            .acquire(0, &styles(), &theme, &SheetOptions::default())
            .unwrap();
        context
            .acquire(0, &styles(), &theme, &SheetOptions::default())
            .unwrap();

        context.release(0, &sheet, &theme).unwrap();
        assert!(sheet.is_attached());

        context.release(0, &sheet, &theme).unwrap();
        assert!(!sheet.is_attached());
        assert!(context.surface().unwrap().is_empty());
        assert_eq!(context.cached_sheet_count(), 0);
    }

    #[test]
    fn test_release_without_acquire_fails() {
        let context = StylingContext::new();
        let theme = Theme::none();
        let sheet = context
            .acquire(0, &styles(), &theme, &SheetOptions::default())
            .unwrap();
        context.release(0, &sheet, &theme).unwrap();

        let err = context.release(0, &sheet, &theme).unwrap_err();
        assert_eq!(err, StyleError::UnbalancedRelease { index: 0 });
    }

    #[test]
    fn test_headless_acquire_fails() {
        let context = StylingContext::headless();
        let err = context
            .acquire(0, &styles(), &Theme::none(), &SheetOptions::default())
            .unwrap_err();
        assert_eq!(err, StyleError::SurfaceUnavailable);
    }

    #[test]
    fn test_sheet_ids_are_unique_per_context() {
        let context = StylingContext::new();
        let theme_a = Theme::new(json!(1));
        let theme_b = Theme::new(json!(2));

        let a = context
            .acquire(0, &styles(), &theme_a, &SheetOptions::default())
            .unwrap();
        let b = context
            .acquire(1, &styles(), &theme_b, &SheetOptions::default())
            .unwrap();
        assert_ne!(a.id(), b.id());
    }
}
