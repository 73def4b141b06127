//! Property-based tests for sheet sharing and dynamic-rule stability.

use proptest::prelude::*;
use serde_json::json;

use classact::{
    styled, InstanceData, StyleBinding, StyledOptions, Styles, StylingContext, Theme,
};
use classact_sheets::{Declarations, RuleSet};

// ============================================================================
// Test helpers
// ============================================================================

fn static_styles() -> Styles {
    Styles::from(RuleSet::new().add("root", Declarations::new().set("display", "flex")))
}

fn dynamic_styles() -> Styles {
    Styles::from(
        RuleSet::new()
            .add("root", Declarations::new().set("display", "flex"))
            .add_dynamic("accent", |data| {
                let color = data
                    .get("color")
                    .and_then(|v| v.as_str())
                    .unwrap_or("teal");
                Ok(Declarations::new().set("color", color))
            }),
    )
}

fn color(value: &str) -> InstanceData {
    InstanceData::new(json!({ "color": value }))
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// For any interleaving of mounts and unmounts of instances sharing
    /// one (index, theme), the physical sheet is attached exactly once
    /// per span during which at least one consumer is alive, and the
    /// surface ends empty once every mount has been matched.
    #[test]
    fn interleaved_mounts_attach_and_detach_in_matched_pairs(
        instances in 1usize..6,
        steps in prop::collection::vec((any::<bool>(), any::<prop::sample::Index>()), 0..32),
    ) {
        let call_site = styled(static_styles(), StyledOptions::default());
        let context = StylingContext::new();

        let mut steps = steps.into_iter();
        let mut pending = instances;
        let mut mounted: Vec<StyleBinding> = Vec::new();
        let mut expected_attaches = 0usize;

        while pending > 0 || !mounted.is_empty() {
            let decision = steps.next();
            let (mount_bias, pick) = match &decision {
                Some((bias, index)) => (*bias, Some(index)),
                None => (true, None),
            };

            let mount_next = if pending == 0 {
                false
            } else if mounted.is_empty() {
                true
            } else {
                mount_bias
            };

            if mount_next {
                if mounted.is_empty() {
                    expected_attaches += 1;
                }
                let mut binding = call_site.bind();
                binding.on_mount(&context, &InstanceData::empty()).unwrap();
                mounted.push(binding);
                pending -= 1;
            } else {
                let at = pick.map(|index| index.index(mounted.len())).unwrap_or(0);
                let mut binding = mounted.swap_remove(at);
                binding.on_unmount().unwrap();
            }
        }

        prop_assert!(context.surface().unwrap().is_empty());
        prop_assert_eq!(context.surface().unwrap().attach_count(), expected_attaches);
        prop_assert_eq!(context.surface().unwrap().detach_count(), expected_attaches);
        prop_assert_eq!(context.consumer_count(call_site.index(), &Theme::none()), 0);
        prop_assert_eq!(context.cached_sheet_count(), 0);
    }

    /// Class names are minted once at mount; any sequence of data
    /// updates patches rule content without ever renaming a class.
    #[test]
    fn dynamic_class_names_survive_arbitrary_updates(
        colors in prop::collection::vec("[a-z]{3,8}", 1..10),
    ) {
        let call_site = styled(dynamic_styles(), StyledOptions::default());
        let context = StylingContext::new();

        let mut binding = call_site.bind();
        let initial = binding.on_mount(&context, &color(&colors[0])).unwrap();
        let accent = initial.get("accent").unwrap().to_string();
        // Disarm the first-commit skip before exercising updates.
        binding.on_commit(&context, &color(&colors[0])).unwrap();

        for value in &colors {
            let classes = binding.on_commit(&context, &color(value)).unwrap();
            prop_assert_eq!(classes.get("accent").unwrap(), accent.as_str());
            let needle = format!("color: {};", value);
            prop_assert!(context.css_text().contains(&needle));
        }

        binding.on_unmount().unwrap();
    }

    /// Committing the same data twice leaves the rendered surface
    /// byte-for-byte identical.
    #[test]
    fn repeated_commits_with_equal_data_leave_the_surface_unchanged(
        value in "[a-z]{3,8}",
    ) {
        let call_site = styled(dynamic_styles(), StyledOptions::default());
        let context = StylingContext::new();

        let mut binding = call_site.bind();
        binding.on_mount(&context, &color(&value)).unwrap();
        binding.on_commit(&context, &color(&value)).unwrap();

        binding.on_commit(&context, &color(&value)).unwrap();
        let once = context.css_text();
        binding.on_commit(&context, &color(&value)).unwrap();
        let twice = context.css_text();

        prop_assert_eq!(once, twice);
        binding.on_unmount().unwrap();
    }
}
