//! Sheet compilation.
//!
//! The factory is pure: the same (styles, theme, options) always yields
//! an equivalent sheet. Reuse is the registry's job, never this one's —
//! caching here would trap sharing inside a single call site instead of
//! crossing instance boundaries.

use std::rc::Rc;

use classact_sheets::{Sheet, SheetOptions};

use crate::error::Result;
use crate::styles::Styles;
use crate::theme::Theme;

/// Resolves a style description against a theme and compiles a sheet.
///
/// Themed descriptions are evaluated with the resolved theme; static
/// descriptions use their rule set directly (the theme is irrelevant to
/// the output, though the registry still tracks it for cache identity).
/// Evaluation failures propagate synchronously.
pub(crate) fn compile(
    styles: &Styles,
    theme: &Theme,
    id: usize,
    index: usize,
    options: &SheetOptions,
) -> Result<Rc<Sheet>> {
    let rules = styles.resolve(theme)?;
    Ok(Rc::new(Sheet::compile(rules, id, index, options)))
}
