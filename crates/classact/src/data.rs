//! Per-instance input data.

use serde_json::Value;

use crate::theme::Theme;

/// The data a component instance hands to its binding on every render.
///
/// Carries the JSON payload dynamic rules are evaluated against, plus an
/// optional theme override. The override only matters to themed style
/// descriptions; static descriptions ignore it.
///
/// # Example
///
/// ```rust
/// use classact::InstanceData;
/// use serde_json::json;
///
/// let data = InstanceData::new(json!({"color": "tomato"}));
/// assert_eq!(data.get("color").and_then(|v| v.as_str()), Some("tomato"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InstanceData {
    theme: Option<Theme>,
    values: Value,
}

impl InstanceData {
    /// Creates instance data from a JSON payload.
    pub fn new(values: Value) -> Self {
        Self {
            theme: None,
            values,
        }
    }

    /// Creates empty instance data (a `null` payload, no override).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sets a per-instance theme override, returning the data for
    /// chaining.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Returns the theme override, if any.
    pub fn theme(&self) -> Option<&Theme> {
        self.theme.as_ref()
    }

    /// Returns the JSON payload.
    pub fn values(&self) -> &Value {
        &self.values
    }

    /// Looks up a key in the payload (objects only).
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}

impl From<Value> for InstanceData {
    fn from(values: Value) -> Self {
        Self::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_data_has_no_override() {
        let data = InstanceData::empty();
        assert!(data.theme().is_none());
        assert!(data.values().is_null());
    }

    #[test]
    fn test_with_theme_sets_override() {
        let theme = Theme::new(json!({"mode": "dark"}));
        let data = InstanceData::empty().with_theme(theme.clone());
        assert!(data.theme().unwrap().same(&theme));
    }

    #[test]
    fn test_from_value() {
        let data: InstanceData = json!({"size": 3}).into();
        assert_eq!(data.get("size").and_then(|v| v.as_u64()), Some(3));
    }
}
