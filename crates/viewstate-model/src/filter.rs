//! Named, independently toggleable filters.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One filter of a list view.
///
/// Enablement is independent of the value: a filter may hold a value while
/// disabled, which is how a UI remembers the last choice of a switched-off
/// filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub value: Value,
    /// Filter-specific keys kept alongside `enabled` and `value`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Filter {
    pub fn new(enabled: bool, value: impl Into<Value>) -> Self {
        Self {
            enabled,
            value: value.into(),
            extra: Map::new(),
        }
    }

    /// An enabled filter holding `value`.
    pub fn enabled(value: impl Into<Value>) -> Self {
        Self::new(true, value)
    }

    /// A disabled filter holding `value`.
    pub fn disabled(value: impl Into<Value>) -> Self {
        Self::new(false, value)
    }

    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// The filter set of a view, keyed by filter id.
///
/// Serialized as one JSON object: the `_disabled` marker sits next to the
/// filter ids. Ids are kept sorted so encodings are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filters {
    /// Switches the whole filter set off without losing individual state.
    #[serde(rename = "_disabled", default)]
    pub disabled: bool,
    #[serde(flatten)]
    pub entries: BTreeMap<String, Filter>,
}

impl Filters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, id: impl Into<String>, filter: Filter) -> Self {
        self.entries.insert(id.into(), filter);
        self
    }

    pub fn get(&self, id: &str) -> Option<&Filter> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Filter> {
        self.entries.get_mut(id)
    }

    pub fn insert(&mut self, id: impl Into<String>, filter: Filter) -> Option<Filter> {
        self.entries.insert(id.into(), filter)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Filter> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Enabled filters in id order.
    pub fn enabled(&self) -> impl Iterator<Item = (&str, &Filter)> {
        self.entries
            .iter()
            .filter(|(_, filter)| filter.enabled)
            .map(|(id, filter)| (id.as_str(), filter))
    }

    /// True when the set is switched on and at least one filter is enabled.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.disabled && self.entries.values().any(|filter| filter.enabled)
    }

    /// Switch every filter off, keeping their values.
    pub fn disable_all(&mut self) {
        for filter in self.entries.values_mut() {
            filter.enabled = false;
        }
    }
}

impl<'a> IntoIterator for &'a Filters {
    type Item = (&'a String, &'a Filter);
    type IntoIter = btree_map::Iter<'a, String, Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filters_json_flattens_ids_next_to_marker() {
        let filters = Filters::new()
            .with("status", Filter::enabled("open"))
            .with("owner", Filter::disabled(json!(null)).with_extra("label", "Owner"));
        let value = serde_json::to_value(&filters).unwrap();
        assert_eq!(
            value,
            json!({
                "_disabled": false,
                "owner": {"enabled": false, "value": null, "label": "Owner"},
                "status": {"enabled": true, "value": "open"},
            })
        );
        let back: Filters = serde_json::from_value(value).unwrap();
        assert_eq!(back, filters);
    }

    #[test]
    fn active_requires_enabled_filter_and_set_switched_on() {
        let mut filters = Filters::new().with("status", Filter::disabled("open"));
        assert!(!filters.is_active());

        filters.get_mut("status").unwrap().enabled = true;
        assert!(filters.is_active());

        filters.disabled = true;
        assert!(!filters.is_active());
    }

    #[test]
    fn disable_all_keeps_values() {
        let mut filters = Filters::new()
            .with("a", Filter::enabled(1))
            .with("b", Filter::enabled(true));
        filters.disable_all();
        assert_eq!(filters.enabled().count(), 0);
        assert_eq!(filters.get("a").unwrap().value, json!(1));
    }
}
