//! Generated class-name mappings.

use indexmap::IndexMap;
use serde::Serialize;

use classact_sheets::Sheet;

use crate::dynamic::DynamicRules;

/// Immutable mapping from logical rule name to generated class string.
///
/// For rules with a per-instance dynamic variant, the shared class and
/// the instance class are space-joined (`"root-1 root-d0-1"`), so the
/// string can be dropped straight into a `class` attribute.
///
/// Serializes as a plain name → class object for diagnostic dumps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Classes {
    classes: IndexMap<String, String>,
}

impl Classes {
    /// Builds the mapping for a sheet and an optional dynamic overlay.
    pub(crate) fn from_sheet(sheet: &Sheet, dynamic: Option<&DynamicRules>) -> Self {
        let mut classes = IndexMap::new();
        for (rule, class) in sheet.static_classes() {
            let combined = dynamic
                .and_then(|d| d.scoped_name(&rule))
                .and_then(|scoped| sheet.class(scoped))
                .map(|instance_class| format!("{} {}", class, instance_class))
                .unwrap_or(class);
            classes.insert(rule, combined);
        }
        Self { classes }
    }

    /// Returns the class string for a logical rule name.
    pub fn get(&self, rule: &str) -> Option<&str> {
        self.classes.get(rule).map(|c| c.as_str())
    }

    /// Iterates over (rule, class) pairs in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.classes.iter().map(|(r, c)| (r.as_str(), c.as_str()))
    }

    /// Returns the number of mapped rules.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns true if the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classact_sheets::{Declarations, RuleSet, SheetOptions};

    #[test]
    fn test_static_only_mapping() {
        let rules = RuleSet::new()
            .add("root", Declarations::new().set("margin", "0"))
            .add("label", Declarations::new().set("color", "gray"));
        let sheet = Sheet::compile(rules, 1, 0, &SheetOptions::default());

        let classes = Classes::from_sheet(&sheet, None);
        assert_eq!(classes.len(), 2);
        assert_eq!(classes.get("root"), Some("root-1"));
        assert_eq!(classes.get("label"), Some("label-1"));
    }

    #[test]
    fn test_mapping_serializes_as_object() {
        let rules = RuleSet::new().add("root", Declarations::new());
        let sheet = Sheet::compile(rules, 1, 0, &SheetOptions::default());
        let classes = Classes::from_sheet(&sheet, None);

        let json = serde_json::to_value(&classes).unwrap();
        assert_eq!(json, serde_json::json!({"root": "root-1"}));
    }
}
