//! Output fields, sort directions and the field catalogue of a view.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Sort direction of an output field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sorting {
    Asc,
    Desc,
    #[default]
    None,
}

impl Sorting {
    /// Wire and JSON spelling of the direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
            Self::None => "none",
        }
    }

    #[must_use]
    pub const fn is_sorted(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for Sorting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sorting {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            "none" => Ok(Self::None),
            other => Err(ModelError::UnknownSorting {
                value: other.to_string(),
            }),
        }
    }
}

/// One selected output field of a list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldState {
    pub id: String,
    #[serde(default)]
    pub sorting: Sorting,
    /// Fixed fields are always present; only their sorting can change.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fixed: bool,
}

impl FieldState {
    /// An unsorted, removable field.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sorting: Sorting::None,
            fixed: false,
        }
    }

    /// An unsorted field that cannot be removed.
    pub fn fixed(id: impl Into<String>) -> Self {
        Self {
            fixed: true,
            ..Self::new(id)
        }
    }

    #[must_use]
    pub fn with_sorting(mut self, sorting: Sorting) -> Self {
        self.sorting = sorting;
        self
    }

    /// A fixed, unsorted field carries no information a URL has to keep:
    /// reconciliation restores it from the current state.
    #[must_use]
    pub fn is_implicit(&self) -> bool {
        self.fixed && !self.sorting.is_sorted()
    }
}

/// Declaration of a field a view can show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub fixed: bool,
    /// Shown before the user picks any field. Fixed fields are always shown.
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl FieldSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            sortable: false,
            fixed: false,
            visible: true,
        }
    }

    #[must_use]
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    #[must_use]
    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Ordered set of fields available on one screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldCatalogue {
    specs: Vec<FieldSpec>,
}

impl FieldCatalogue {
    /// Build a catalogue, rejecting duplicate ids.
    pub fn new(specs: Vec<FieldSpec>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for spec in &specs {
            if !seen.insert(spec.id.as_str()) {
                return Err(ModelError::DuplicateField {
                    id: spec.id.clone(),
                });
            }
        }
        Ok(Self { specs })
    }

    pub fn get(&self, id: &str) -> Option<&FieldSpec> {
        self.specs.iter().find(|spec| spec.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        self.specs.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    #[must_use]
    pub fn is_sortable(&self, id: &str) -> bool {
        self.get(id).is_some_and(|spec| spec.sortable)
    }

    #[must_use]
    pub fn is_fixed(&self, id: &str) -> bool {
        self.get(id).is_some_and(|spec| spec.fixed)
    }

    /// Field list a freshly mounted view starts with: every fixed or
    /// visible field, in catalogue order, unsorted.
    #[must_use]
    pub fn default_fields(&self) -> Vec<FieldState> {
        self.specs
            .iter()
            .filter(|spec| spec.fixed || spec.visible)
            .map(|spec| FieldState {
                id: spec.id.clone(),
                sorting: Sorting::None,
                fixed: spec.fixed,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorting_parses_known_directions() {
        assert_eq!("asc".parse::<Sorting>().unwrap(), Sorting::Asc);
        assert_eq!("desc".parse::<Sorting>().unwrap(), Sorting::Desc);
        assert_eq!("none".parse::<Sorting>().unwrap(), Sorting::None);
    }

    #[test]
    fn sorting_rejects_unknown_direction() {
        let err = "up".parse::<Sorting>().unwrap_err();
        assert_eq!(
            err,
            ModelError::UnknownSorting {
                value: "up".to_string()
            }
        );
    }

    #[test]
    fn implicit_only_when_fixed_and_unsorted() {
        assert!(FieldState::fixed("id").is_implicit());
        assert!(!FieldState::fixed("id").with_sorting(Sorting::Asc).is_implicit());
        assert!(!FieldState::new("name").is_implicit());
    }

    #[test]
    fn catalogue_rejects_duplicates() {
        let err = FieldCatalogue::new(vec![FieldSpec::new("a"), FieldSpec::new("a")]).unwrap_err();
        assert_eq!(
            err,
            ModelError::DuplicateField {
                id: "a".to_string()
            }
        );
    }

    #[test]
    fn default_fields_keep_fixed_and_visible() {
        let catalogue = FieldCatalogue::new(vec![
            FieldSpec::new("id").fixed().hidden(),
            FieldSpec::new("name").sortable(),
            FieldSpec::new("notes").hidden(),
        ])
        .unwrap();
        let fields = catalogue.default_fields();
        assert_eq!(fields, vec![FieldState::fixed("id"), FieldState::new("name")]);
        assert!(catalogue.is_sortable("name"));
        assert!(!catalogue.is_sortable("notes"));
        assert!(catalogue.is_fixed("id"));
    }
}
