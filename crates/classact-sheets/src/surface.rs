//! The shared rendering surface.
//!
//! A [`Surface`] holds the sheets that are currently live, in the order
//! their rules take effect. Attachment keeps the sequence sorted by
//! ordering index with a stable tie-break: a sheet lands after every
//! sheet whose index is lower *or equal*, so equal indexes keep attach
//! order. That makes rule precedence deterministic across independent
//! call sites regardless of which sheet happened to be created first.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::debug;

use crate::sheet::Sheet;

/// An ordered sequence of attached sheets.
///
/// # Example
///
/// ```rust
/// use classact_sheets::{Declarations, RuleSet, Sheet, SheetOptions, Surface};
/// use std::rc::Rc;
///
/// let surface = Surface::new();
/// let rules = RuleSet::new().add("root", Declarations::new().set("margin", "0"));
/// let sheet = Rc::new(Sheet::compile(rules, 1, 0, &SheetOptions::default()));
///
/// surface.attach(&sheet);
/// assert_eq!(surface.len(), 1);
///
/// surface.detach(&sheet);
/// assert!(surface.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct Surface {
    sheets: RefCell<Vec<Rc<Sheet>>>,
    attaches: Cell<usize>,
    detaches: Cell<usize>,
}

impl Surface {
    /// Creates an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a sheet at the position implied by its ordering index.
    pub fn attach(&self, sheet: &Rc<Sheet>) {
        let mut sheets = self.sheets.borrow_mut();
        let position = sheets
            .iter()
            .position(|existing| existing.index() > sheet.index())
            .unwrap_or(sheets.len());
        sheets.insert(position, Rc::clone(sheet));

        sheet.set_attached(true);
        self.attaches.set(self.attaches.get() + 1);
        debug!(
            "attached sheet '{}' (index {}) at position {}",
            sheet.label(),
            sheet.index(),
            position
        );
    }

    /// Detaches a sheet from the surface.
    ///
    /// Detaching a sheet that is not attached is a no-op for the
    /// sequence; the sheet's attached flag is cleared either way.
    pub fn detach(&self, sheet: &Rc<Sheet>) {
        let mut sheets = self.sheets.borrow_mut();
        let before = sheets.len();
        sheets.retain(|existing| !Rc::ptr_eq(existing, sheet));

        if sheets.len() < before {
            self.detaches.set(self.detaches.get() + 1);
            debug!(
                "detached sheet '{}' (index {})",
                sheet.label(),
                sheet.index()
            );
        }
        sheet.set_attached(false);
    }

    /// Returns the number of attached sheets.
    pub fn len(&self) -> usize {
        self.sheets.borrow().len()
    }

    /// Returns true if no sheets are attached.
    pub fn is_empty(&self) -> bool {
        self.sheets.borrow().is_empty()
    }

    /// Returns handles to the attached sheets in surface order.
    pub fn sheets(&self) -> Vec<Rc<Sheet>> {
        self.sheets.borrow().clone()
    }

    /// Renders every attached sheet to CSS text, in surface order.
    pub fn css_text(&self) -> String {
        let mut out = String::new();
        for sheet in self.sheets.borrow().iter() {
            sheet.write_css(&mut out);
        }
        out
    }

    /// Total number of attach operations performed.
    pub fn attach_count(&self) -> usize {
        self.attaches.get()
    }

    /// Total number of detach operations performed.
    pub fn detach_count(&self) -> usize {
        self.detaches.get()
    }
}
