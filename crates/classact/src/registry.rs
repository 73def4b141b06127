//! The sheet cache with consumer counting.
//!
//! One registry lives inside each [`StylingContext`](crate::StylingContext);
//! there is deliberately no process-global registry, so cache lifetime is
//! the context's lifetime.
//!
//! Entries are keyed by (ordering index, theme identity). Theme lookup is
//! identity comparison over a short vector rather than hashing: a given
//! call site sees a handful of themes at most, and identity is the
//! contract — two equal-content themes are still two cache entries.

use std::collections::HashMap;
use std::rc::Rc;

use log::debug;

use classact_sheets::Sheet;

use crate::error::{Result, StyleError};
use crate::theme::Theme;

struct RegistryEntry {
    theme: Theme,
    sheet: Rc<Sheet>,
    consumers: usize,
}

/// Theme-keyed sheet cache for one rendering context.
#[derive(Default)]
pub(crate) struct SheetRegistry {
    managers: HashMap<usize, Vec<RegistryEntry>>,
}

impl SheetRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Looks up a cached sheet for (index, theme) and bumps its consumer
    /// count on a hit.
    pub(crate) fn retain(&mut self, index: usize, theme: &Theme) -> Option<Rc<Sheet>> {
        let entry = self
            .managers
            .get_mut(&index)?
            .iter_mut()
            .find(|entry| entry.theme.same(theme))?;
        entry.consumers += 1;
        debug!(
            "sheet '{}' reused (index {}, consumers {})",
            entry.sheet.label(),
            index,
            entry.consumers
        );
        Some(Rc::clone(&entry.sheet))
    }

    /// Records a freshly compiled sheet with a consumer count of one.
    pub(crate) fn insert(&mut self, index: usize, theme: Theme, sheet: Rc<Sheet>) {
        debug!("sheet '{}' cached (index {})", sheet.label(), index);
        self.managers.entry(index).or_default().push(RegistryEntry {
            theme,
            sheet,
            consumers: 1,
        });
    }

    /// Drops one consumer of (index, theme).
    ///
    /// Returns the sheet when the count reaches zero — the caller is then
    /// responsible for detaching it — and evicts the entry. Releasing a
    /// pair that has no entry is an unbalanced release.
    pub(crate) fn release(
        &mut self,
        index: usize,
        sheet: &Rc<Sheet>,
        theme: &Theme,
    ) -> Result<Option<Rc<Sheet>>> {
        let entries = self
            .managers
            .get_mut(&index)
            .ok_or(StyleError::UnbalancedRelease { index })?;
        let position = entries
            .iter()
            .position(|entry| entry.theme.same(theme) && Rc::ptr_eq(&entry.sheet, sheet))
            .ok_or(StyleError::UnbalancedRelease { index })?;

        let entry = &mut entries[position];
        entry.consumers -= 1;
        if entry.consumers > 0 {
            debug!(
                "sheet '{}' released (index {}, consumers {})",
                entry.sheet.label(),
                index,
                entry.consumers
            );
            return Ok(None);
        }

        let entry = entries.remove(position);
        if entries.is_empty() {
            self.managers.remove(&index);
        }
        debug!(
            "sheet '{}' evicted (index {}, last consumer gone)",
            entry.sheet.label(),
            index
        );
        Ok(Some(entry.sheet))
    }

    /// Returns the consumer count for (index, theme); zero when absent.
    pub(crate) fn consumer_count(&self, index: usize, theme: &Theme) -> usize {
        self.managers
            .get(&index)
            .and_then(|entries| entries.iter().find(|entry| entry.theme.same(theme)))
            .map(|entry| entry.consumers)
            .unwrap_or(0)
    }

    /// Returns the number of cached sheets across all indexes.
    pub(crate) fn sheet_count(&self) -> usize {
        self.managers.values().map(|entries| entries.len()).sum()
    }
}
