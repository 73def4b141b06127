//! The per-instance lifecycle binder.
//!
//! A [`StyleBinding`] is the state machine that ties one component
//! instance to the shared sheet machinery. The host integration drives it
//! with three calls, in the order the host's own lifecycle guarantees:
//!
//! - [`on_mount`](StyleBinding::on_mount) once, before the instance's
//!   first output is committed;
//! - [`on_commit`](StyleBinding::on_commit) after every committed
//!   render, with the latest instance data;
//! - [`on_unmount`](StyleBinding::on_unmount) exactly once on teardown.
//!
//! The binder resolves the effective theme, acquires and releases the
//! shared sheet, owns the instance's dynamic overlay, and exposes the
//! resulting class mapping. It holds no reference to any particular UI
//! framework's scheduling primitives.
//!
//! Two deliberate subtleties, both inherited from the behavior this
//! models:
//!
//! - The first `on_commit` after a (re)mount skips the dynamic-rule
//!   update: the data used at acquisition is already reflected in the
//!   just-instantiated overlay, so re-running it would be redundant.
//! - Theme resolution is asymmetric. Themed descriptions resolve the
//!   per-instance override first, then the ambient scope, then
//!   `NoTheme`; static descriptions always pin `NoTheme` and consult
//!   neither.

use std::mem;
use std::rc::Rc;

use log::debug;

use classact_sheets::Sheet;

use crate::classes::Classes;
use crate::context::StylingContext;
use crate::data::InstanceData;
use crate::dynamic::DynamicRules;
use crate::error::{Result, StyleError};
use crate::styled::StyledShared;
use crate::theme::Theme;

struct MountedBinding {
    context: StylingContext,
    theme: Theme,
    /// `None` when the context is headless; the binding then serves the
    /// empty mapping and touches nothing on unmount.
    sheet: Option<Rc<Sheet>>,
    dynamic: Option<DynamicRules>,
    classes: Classes,
    /// Armed at (re)mount, disarmed by the first commit.
    fresh: bool,
}

enum BindingState {
    Unmounted,
    Mounted(MountedBinding),
}

/// Per-component-instance binding to a shared sheet.
///
/// Created by [`Styled::bind`](crate::Styled::bind); one per component
/// instance.
pub struct StyleBinding {
    shared: Rc<StyledShared>,
    state: BindingState,
}

impl StyleBinding {
    pub(crate) fn new(shared: Rc<StyledShared>) -> Self {
        Self {
            shared,
            state: BindingState::Unmounted,
        }
    }

    /// Mounts the binding: resolves the theme, acquires the shared
    /// sheet, instantiates the dynamic overlay, and returns the class
    /// mapping.
    ///
    /// An unreachable surface degrades to the empty mapping; evaluation
    /// failures propagate (the sheet acquired for this mount is released
    /// first, so the attempt leaves no consumer behind). Mounting a
    /// mounted binding is an error.
    pub fn on_mount(&mut self, context: &StylingContext, data: &InstanceData) -> Result<Classes> {
        if matches!(self.state, BindingState::Mounted(_)) {
            return Err(StyleError::BindingAlreadyMounted);
        }

        let mounted = Self::mount(&self.shared, context, data)?;
        let classes = mounted.classes.clone();
        self.state = BindingState::Mounted(mounted);
        Ok(classes)
    }

    /// Commits a render: remounts if the (context, theme) identity
    /// changed, otherwise propagates the latest data into the dynamic
    /// overlay.
    ///
    /// The first commit after a (re)mount is skipped (see module docs).
    /// A commit arriving after the binding was unmounted is dropped and
    /// yields the empty mapping — a cancelled update must not touch a
    /// rule set that no longer exists.
    pub fn on_commit(&mut self, context: &StylingContext, data: &InstanceData) -> Result<Classes> {
        let state = mem::replace(&mut self.state, BindingState::Unmounted);
        let mut mounted = match state {
            BindingState::Unmounted => return Ok(Classes::default()),
            BindingState::Mounted(mounted) => mounted,
        };

        let theme = Self::resolve_theme(&self.shared, data);
        if !StylingContext::same(&mounted.context, context) || !mounted.theme.same(&theme) {
            debug!(
                "binding '{}': context or theme changed, remounting",
                self.shared.label()
            );
            Self::teardown(&self.shared, &mut mounted)?;
            let next = Self::mount(&self.shared, context, data)?;
            let classes = next.classes.clone();
            self.state = BindingState::Mounted(next);
            return Ok(classes);
        }

        if mounted.fresh {
            mounted.fresh = false;
            let classes = mounted.classes.clone();
            self.state = BindingState::Mounted(mounted);
            return Ok(classes);
        }

        let updated = match (&mounted.sheet, &mounted.dynamic) {
            (Some(sheet), Some(dynamic)) => dynamic.update(data, sheet),
            _ => Ok(()),
        };
        let classes = mounted.classes.clone();
        // An update failure leaves the binding mounted with its previous
        // rule content; the error still reaches the caller.
        self.state = BindingState::Mounted(mounted);
        updated?;
        Ok(classes)
    }

    /// Unmounts the binding: removes the dynamic overlay, then releases
    /// the shared sheet — strictly in that order, so rules are detached
    /// from a sheet that is guaranteed to still exist.
    pub fn on_unmount(&mut self) -> Result<()> {
        let state = mem::replace(&mut self.state, BindingState::Unmounted);
        let mut mounted = match state {
            BindingState::Unmounted => return Err(StyleError::BindingNotMounted),
            BindingState::Mounted(mounted) => mounted,
        };
        Self::teardown(&self.shared, &mut mounted)
    }

    /// Returns the current class mapping (empty while unmounted).
    pub fn classes(&self) -> Classes {
        match &self.state {
            BindingState::Mounted(mounted) => mounted.classes.clone(),
            BindingState::Unmounted => Classes::default(),
        }
    }

    /// Returns the currently resolved theme, while mounted.
    pub fn theme(&self) -> Option<Theme> {
        match &self.state {
            BindingState::Mounted(mounted) => Some(mounted.theme.clone()),
            BindingState::Unmounted => None,
        }
    }

    /// Returns true while the binding is mounted.
    pub fn is_mounted(&self) -> bool {
        matches!(self.state, BindingState::Mounted(_))
    }

    fn resolve_theme(shared: &StyledShared, data: &InstanceData) -> Theme {
        if !shared.styles.is_themed() {
            return Theme::none();
        }
        data.theme()
            .cloned()
            .or_else(|| shared.scope.current())
            .unwrap_or_else(Theme::none)
    }

    fn mount(
        shared: &StyledShared,
        context: &StylingContext,
        data: &InstanceData,
    ) -> Result<MountedBinding> {
        let theme = Self::resolve_theme(shared, data);

        let (sheet, dynamic, classes) = match context.acquire(
            shared.index,
            &shared.styles,
            &theme,
            &shared.sheet_options,
        ) {
            Ok(sheet) => {
                let dynamic = match DynamicRules::instantiate(&sheet, data) {
                    Ok(dynamic) => dynamic,
                    Err(err) => {
                        context.release(shared.index, &sheet, &theme)?;
                        return Err(err);
                    }
                };
                let classes = Classes::from_sheet(&sheet, dynamic.as_ref());
                (Some(sheet), dynamic, classes)
            }
            Err(StyleError::SurfaceUnavailable) => (None, None, Classes::default()),
            Err(err) => return Err(err),
        };

        Ok(MountedBinding {
            context: context.clone(),
            theme,
            sheet,
            dynamic,
            classes,
            fresh: true,
        })
    }

    fn teardown(shared: &StyledShared, mounted: &mut MountedBinding) -> Result<()> {
        if let Some(sheet) = mounted.sheet.take() {
            if let Some(dynamic) = mounted.dynamic.as_mut() {
                dynamic.remove(&sheet)?;
            }
            mounted.context.release(shared.index, &sheet, &mounted.theme)?;
        }
        mounted.dynamic = None;
        Ok(())
    }
}

impl std::fmt::Debug for StyleBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleBinding")
            .field("label", &self.shared.label())
            .field("mounted", &self.is_mounted())
            .finish()
    }
}
