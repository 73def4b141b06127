//! Compiled sheets with generated class names.
//!
//! A [`Sheet`] is the compiled form of a [`RuleSet`]: every definition
//! gets a generated class name that stays stable for the sheet's
//! lifetime. Static definitions compile to their declarations; dynamic
//! definitions compile to empty placeholders that instance-scoped rules
//! are layered onto later.
//!
//! Sheets are shared (`Rc<Sheet>`) and mutated through interior
//! mutability: all callers run on one logical thread, so `RefCell` and
//! `Cell` are the whole synchronization story.

use std::cell::{Cell, RefCell};

use indexmap::IndexMap;
use log::trace;

use crate::css::Declarations;
use crate::error::{Result, SheetError};
use crate::rule::{RuleDef, RuleSet};

/// Options controlling sheet compilation.
#[derive(Debug, Clone, Default)]
pub struct SheetOptions {
    /// Meta label for diagnostics and error messages.
    ///
    /// Defaults to `"sheet"` when absent.
    pub label: Option<String>,

    /// Prefix for generated class names.
    ///
    /// With a prefix, classes look like `prefix-rule-3`; without one,
    /// `rule-3` (the trailing number is the sheet id).
    pub class_prefix: Option<String>,
}

/// One compiled rule: a generated class name plus current declarations.
#[derive(Debug, Clone)]
struct CompiledRule {
    class: String,
    declarations: Declarations,
}

/// A compiled, named collection of CSS rules.
///
/// Created by [`Sheet::compile`] and shared behind `Rc`. The sheet keeps
/// the rule definitions it was compiled from so overlay code can find the
/// dynamic ones, and supports inserting, patching, and deleting
/// instance-scoped rules without disturbing class names.
///
/// # Example
///
/// ```rust
/// use classact_sheets::{Declarations, RuleSet, Sheet, SheetOptions};
///
/// let rules = RuleSet::new().add("root", Declarations::new().set("margin", "0"));
/// let options = SheetOptions {
///     class_prefix: Some("button".to_string()),
///     ..SheetOptions::default()
/// };
/// let sheet = Sheet::compile(rules, 7, 0, &options);
///
/// assert_eq!(sheet.class("root"), Some("button-root-7".to_string()));
/// ```
pub struct Sheet {
    id: usize,
    index: usize,
    label: String,
    class_prefix: Option<String>,
    defs: RuleSet,
    rules: RefCell<IndexMap<String, CompiledRule>>,
    attached: Cell<bool>,
    next_scoped: Cell<usize>,
}

impl Sheet {
    /// Compiles a rule set into a sheet.
    ///
    /// `id` must be unique per rendering context (it is baked into class
    /// names); `index` is the ordering index the surface sorts by.
    pub fn compile(defs: RuleSet, id: usize, index: usize, options: &SheetOptions) -> Self {
        let label = options
            .label
            .clone()
            .unwrap_or_else(|| "sheet".to_string());

        let sheet = Self {
            id,
            index,
            label,
            class_prefix: options.class_prefix.clone(),
            defs,
            rules: RefCell::new(IndexMap::new()),
            attached: Cell::new(false),
            next_scoped: Cell::new(0),
        };

        let mut rules = sheet.rules.borrow_mut();
        for (name, def) in sheet.defs.iter() {
            let declarations = match def {
                RuleDef::Static(declarations) => declarations.clone(),
                // Placeholder; instances layer their own variants on top.
                RuleDef::Dynamic(_) => Declarations::new(),
            };
            rules.insert(
                name.to_string(),
                CompiledRule {
                    class: sheet.make_class(name),
                    declarations,
                },
            );
        }
        drop(rules);

        sheet
    }

    /// Returns the sheet id.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Returns the ordering index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the meta label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns true while the sheet is attached to a surface.
    pub fn is_attached(&self) -> bool {
        self.attached.get()
    }

    pub(crate) fn set_attached(&self, attached: bool) {
        self.attached.set(attached);
    }

    /// Returns the rule definitions this sheet was compiled from.
    pub fn defs(&self) -> &RuleSet {
        &self.defs
    }

    /// Returns true if any definition is dynamic.
    pub fn has_dynamic(&self) -> bool {
        self.defs.has_dynamic()
    }

    /// Returns the generated class name for a rule, if present.
    pub fn class(&self, rule: &str) -> Option<String> {
        self.rules.borrow().get(rule).map(|r| r.class.clone())
    }

    /// Returns a snapshot of a rule's current declarations.
    pub fn declarations(&self, rule: &str) -> Option<Declarations> {
        self.rules.borrow().get(rule).map(|r| r.declarations.clone())
    }

    /// Returns (rule name, class name) pairs for the compiled
    /// definitions, in definition order. Instance-scoped rules are not
    /// included.
    pub fn static_classes(&self) -> Vec<(String, String)> {
        self.defs
            .iter()
            .filter_map(|(name, _)| self.class(name).map(|class| (name.to_string(), class)))
            .collect()
    }

    /// Returns the total number of compiled rules, scoped ones included.
    pub fn rule_count(&self) -> usize {
        self.rules.borrow().len()
    }

    /// Inserts an instance-scoped variant of `rule` with the given
    /// declarations and returns its scoped rule name.
    ///
    /// Scoped names look like `accent-d0`, `accent-d1`, ... and are never
    /// reused within a sheet, so class names stay unique across instance
    /// churn.
    pub fn insert_scoped(&self, rule: &str, declarations: Declarations) -> String {
        let serial = self.next_scoped.get();
        self.next_scoped.set(serial + 1);

        let scoped = format!("{}-d{}", rule, serial);
        let class = self.make_class(&scoped);
        trace!("sheet '{}': inserting scoped rule '{}'", self.label, scoped);

        self.rules.borrow_mut().insert(
            scoped.clone(),
            CompiledRule {
                class,
                declarations,
            },
        );
        scoped
    }

    /// Replaces the declarations of an existing rule in place.
    ///
    /// The rule's class name is untouched, which is what makes repeated
    /// updates invisible to anyone holding the class.
    pub fn update_rule(&self, rule: &str, declarations: Declarations) -> Result<()> {
        let mut rules = self.rules.borrow_mut();
        let compiled = rules.get_mut(rule).ok_or_else(|| SheetError::UnknownRule {
            label: self.label.clone(),
            rule: rule.to_string(),
        })?;
        compiled.declarations = declarations;
        Ok(())
    }

    /// Deletes a rule from the sheet.
    pub fn remove_rule(&self, rule: &str) -> Result<()> {
        trace!("sheet '{}': removing rule '{}'", self.label, rule);
        self.rules
            .borrow_mut()
            .shift_remove(rule)
            .map(|_| ())
            .ok_or_else(|| SheetError::UnknownRule {
                label: self.label.clone(),
                rule: rule.to_string(),
            })
    }

    /// Renders the sheet to CSS text, one block per rule in insertion
    /// order.
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        self.write_css(&mut out);
        out
    }

    pub(crate) fn write_css(&self, out: &mut String) {
        for compiled in self.rules.borrow().values() {
            out.push('.');
            out.push_str(&compiled.class);
            out.push_str(" {\n");
            compiled.declarations.write_body(out);
            out.push_str("}\n");
        }
    }

    fn make_class(&self, rule: &str) -> String {
        match &self.class_prefix {
            Some(prefix) => format!("{}-{}-{}", prefix, rule, self.id),
            None => format!("{}-{}", rule, self.id),
        }
    }
}

impl std::fmt::Debug for Sheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sheet")
            .field("id", &self.id)
            .field("index", &self.index)
            .field("label", &self.label)
            .field("rules", &self.rule_count())
            .field("attached", &self.attached.get())
            .finish()
    }
}
