//! Shared style-sheet lifecycle binding for component-based UIs.
//!
//! `classact` lets a component instance ask for a set of computed,
//! uniquely-named style rules derived from a style description, a theme,
//! and per-instance data — while the described rules are physically
//! inserted into and removed from a shared rendering surface exactly once
//! per distinct (description, theme) pair, no matter how many instances
//! request it.
//!
//! # Features
//!
//! - **Sheet sharing**: One physical sheet per (ordering index, theme)
//!   pair per context, reference-counted across instances
//! - **Theming**: Identity-keyed theme handles, an ambient theme scope,
//!   and per-instance overrides
//! - **Dynamic rules**: Private per-instance rule variants layered on the
//!   shared sheet, patched in place on data changes
//! - **Explicit lifecycle**: A per-instance state machine driven by
//!   `on_mount` / `on_commit` / `on_unmount`, free of any UI framework's
//!   scheduling primitives
//! - **Headless degradation**: Without a rendering surface, bindings
//!   serve empty class mappings instead of failing
//!
//! # Quick Start
//!
//! ```rust
//! use classact::{styled, InstanceData, Styles, StyledOptions, StylingContext};
//! use classact_sheets::{Declarations, RuleSet};
//! use serde_json::json;
//!
//! // One call site, configured once.
//! let button = styled(
//!     Styles::from(
//!         RuleSet::new()
//!             .add("root", Declarations::new().set("display", "inline-flex"))
//!             .add_dynamic("accent", |data| {
//!                 let color = data
//!                     .get("color")
//!                     .and_then(|v| v.as_str())
//!                     .unwrap_or("teal");
//!                 Ok(Declarations::new().set("color", color))
//!             }),
//!     ),
//!     StyledOptions::default().name("button"),
//! );
//!
//! let context = StylingContext::new();
//!
//! // One binding per component instance.
//! let mut first = button.bind();
//! let mut second = button.bind();
//!
//! let classes = first
//!     .on_mount(&context, &InstanceData::new(json!({"color": "tomato"})))
//!     .unwrap();
//! second
//!     .on_mount(&context, &InstanceData::new(json!({"color": "navy"})))
//!     .unwrap();
//!
//! // Both instances share one physical sheet.
//! assert_eq!(context.surface().unwrap().attach_count(), 1);
//! assert!(classes.get("root").is_some());
//!
//! first.on_unmount().unwrap();
//! second.on_unmount().unwrap();
//! assert!(context.surface().unwrap().is_empty());
//! ```
//!
//! # Lifecycle Contract
//!
//! The host integration layer calls, per instance:
//!
//! 1. [`StyleBinding::on_mount`] once, before the first output commit;
//! 2. [`StyleBinding::on_commit`] after every committed render with the
//!    latest data — the binder remounts when the (context, theme)
//!    identity changed and patches dynamic rules otherwise;
//! 3. [`StyleBinding::on_unmount`] exactly once on teardown.
//!
//! Driving the machine out of order fails loudly: those errors indicate
//! lifecycle-tracking bugs in the host, not recoverable conditions.

mod binder;
mod classes;
mod context;
mod data;
mod dynamic;
mod error;
mod factory;
mod registry;
mod styled;
mod styles;
mod theme;

pub use binder::StyleBinding;
pub use classes::Classes;
pub use context::StylingContext;
pub use data::InstanceData;
pub use dynamic::DynamicRules;
pub use error::{Result, StyleError};
pub use styled::{styled, Styled, StyledOptions};
pub use styles::{Styles, ThemeFn};
pub use theme::{Theme, ThemeScope};
