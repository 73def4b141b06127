//! # Classact Sheets - Compiled CSS Rule Sets
//!
//! `classact-sheets` is the rule engine underneath the `classact` binding:
//! it turns named rule definitions into compiled sheets with generated,
//! stable class names, and manages the ordered rendering surface those
//! sheets attach to.
//!
//! This crate knows nothing about themes, component lifecycles, or sheet
//! sharing. Those live in `classact`; this crate only answers "what does
//! a sheet contain and what does the surface look like right now".
//!
//! ## Core Concepts
//!
//! - [`Declarations`]: An ordered CSS property/value block
//! - [`RuleSet`]: Named rule definitions, static or computed from data
//! - [`Sheet`]: A compiled rule set with generated class names
//! - [`Surface`]: The shared, ordered sequence of attached sheets
//!
//! ## Quick Start
//!
//! ```rust
//! use classact_sheets::{Declarations, RuleSet, Sheet, SheetOptions, Surface};
//! use std::rc::Rc;
//!
//! let rules = RuleSet::new()
//!     .add("root", Declarations::new().set("display", "flex"))
//!     .add("label", Declarations::new().set("font-weight", "bold"));
//!
//! let sheet = Rc::new(Sheet::compile(rules, 1, 0, &SheetOptions::default()));
//!
//! let surface = Surface::new();
//! surface.attach(&sheet);
//!
//! assert!(sheet.is_attached());
//! assert!(surface.css_text().contains("display: flex;"));
//! ```
//!
//! ## Ordering
//!
//! Sheets carry an ordering index. The surface keeps attached sheets
//! sorted by index (stable: equal indexes keep attach order), so rule
//! precedence across independent style sources is deterministic no matter
//! in which order the sheets were created.

mod css;
mod error;
mod rule;
mod sheet;
mod surface;

pub use css::Declarations;
pub use error::{EvalError, Result, SheetError};
pub use rule::{DynamicFn, RuleDef, RuleSet};
pub use sheet::{Sheet, SheetOptions};
pub use surface::Surface;
