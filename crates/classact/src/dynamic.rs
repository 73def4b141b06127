//! Per-instance dynamic rule overlays.
//!
//! A shared sheet cannot hold values that differ between component
//! instances: two instances with different data must not collide. The
//! overlay gives each instance private rules layered on the shared sheet
//! — one instance-scoped variant per dynamic definition — so the shared
//! sheet stays one-per-theme while instances still vary.
//!
//! The lifecycle is strict:
//!
//! 1. [`DynamicRules::instantiate`] once, right after the sheet is
//!    acquired, evaluating every dynamic definition against the
//!    instance's data.
//! 2. [`DynamicRules::update`] on later data changes; declarations are
//!    patched in place, class names never churn, and calling it twice
//!    with the same data is a no-op by construction.
//! 3. [`DynamicRules::remove`] exactly once, before the sheet is
//!    released. A second removal is a lifecycle bug and fails loudly.

use log::trace;

use classact_sheets::{DynamicFn, RuleDef, Sheet, SheetError};

use crate::data::InstanceData;
use crate::error::{Result, StyleError};

struct DynamicEntry {
    rule: String,
    scoped: String,
    func: DynamicFn,
}

/// One instance's private rules on top of a shared sheet.
///
/// Owned exclusively by the binding that created it; destroyed when the
/// instance unmounts or its sheet changes.
pub struct DynamicRules {
    entries: Vec<DynamicEntry>,
    removed: bool,
}

impl DynamicRules {
    /// Evaluates every dynamic definition in `sheet` against `data` and
    /// inserts the results as instance-scoped rules.
    ///
    /// Returns `Ok(None)` when the sheet has no dynamic definitions
    /// (purely static styling needs no overlay).
    pub fn instantiate(sheet: &Sheet, data: &InstanceData) -> Result<Option<Self>> {
        let mut entries = Vec::new();
        for (name, def) in sheet.defs().iter() {
            let RuleDef::Dynamic(func) = def else {
                continue;
            };
            let declarations = func(data.values()).map_err(|source| SheetError::Rule {
                rule: name.to_string(),
                source,
            })?;
            let scoped = sheet.insert_scoped(name, declarations);
            entries.push(DynamicEntry {
                rule: name.to_string(),
                scoped,
                func: func.clone(),
            });
        }

        if entries.is_empty() {
            return Ok(None);
        }
        trace!(
            "instantiated {} dynamic rule(s) on sheet '{}'",
            entries.len(),
            sheet.label()
        );
        Ok(Some(Self {
            entries,
            removed: false,
        }))
    }

    /// Re-evaluates every dynamic rule against `data` and patches the
    /// concrete rules in place.
    ///
    /// No re-insertion, no name churn: the classes handed out at
    /// instantiation stay valid. Idempotent for equal data.
    pub fn update(&self, data: &InstanceData, sheet: &Sheet) -> Result<()> {
        if self.removed {
            return Err(StyleError::RulesAlreadyRemoved {
                label: sheet.label().to_string(),
            });
        }
        for entry in &self.entries {
            let declarations = (entry.func)(data.values()).map_err(|source| SheetError::Rule {
                rule: entry.rule.clone(),
                source,
            })?;
            sheet.update_rule(&entry.scoped, declarations)?;
        }
        Ok(())
    }

    /// Deletes the instance-scoped rules from the sheet.
    ///
    /// Must be called exactly once, while the sheet is still alive (in
    /// the binder: before the sheet is released).
    pub fn remove(&mut self, sheet: &Sheet) -> Result<()> {
        if self.removed {
            return Err(StyleError::RulesAlreadyRemoved {
                label: sheet.label().to_string(),
            });
        }
        for entry in &self.entries {
            sheet.remove_rule(&entry.scoped)?;
        }
        self.removed = true;
        trace!(
            "removed {} dynamic rule(s) from sheet '{}'",
            self.entries.len(),
            sheet.label()
        );
        Ok(())
    }

    /// Returns the instance-scoped rule name for a logical rule, if that
    /// rule has a dynamic variant.
    pub(crate) fn scoped_name(&self, rule: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.rule == rule)
            .map(|entry| entry.scoped.as_str())
    }

    /// Returns the number of dynamic rules in the overlay.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the overlay holds no rules.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for DynamicRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicRules")
            .field("rules", &self.entries.len())
            .field("removed", &self.removed)
            .finish()
    }
}
