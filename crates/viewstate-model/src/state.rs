//! The full state of one list view.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ModelError, Result};
use crate::field::FieldState;
use crate::filter::Filters;

/// Page size used when a view does not declare one.
pub const DEFAULT_LIMIT: u64 = 25;

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

/// Free-text search over one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchState {
    pub field: String,
    pub query: String,
}

impl SearchState {
    pub fn new(field: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            query: query.into(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }
}

/// Raw filter expression. Carried in the state but never put on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonFilterState {
    #[serde(default)]
    pub filter: Value,
    #[serde(rename = "_disabled", default)]
    pub disabled: bool,
}

/// Everything a list screen needs to rebuild itself from a URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchState>,
    #[serde(
        rename = "jsonFilter",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub json_filter: Option<JsonFilterState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Filters>,
    /// Selected output fields in display order.
    #[serde(default)]
    pub fields: Vec<FieldState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search: None,
            json_filter: None,
            filters: None,
            fields: Vec::new(),
            offset: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ViewState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, field: impl Into<String>, query: impl Into<String>) -> Self {
        self.search = Some(SearchState::new(field, query));
        self
    }

    #[must_use]
    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = Some(filters);
        self
    }

    #[must_use]
    pub fn with_fields(mut self, fields: Vec<FieldState>) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn with_page(mut self, offset: u64, limit: u64) -> Self {
        self.offset = Some(offset);
        self.limit = limit;
        self
    }

    pub fn field(&self, id: &str) -> Option<&FieldState> {
        self.fields.iter().find(|field| field.id == id)
    }

    pub fn field_ids(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.id.as_str())
    }

    /// Ids of the filters currently enabled, in id order.
    #[must_use]
    pub fn enabled_filter_ids(&self) -> Vec<&str> {
        self.filters
            .as_ref()
            .map(|filters| filters.enabled().map(|(id, _)| id).collect())
            .unwrap_or_default()
    }

    /// Check the structural invariants: unique field ids and a non-zero limit.
    pub fn validate(&self) -> Result<()> {
        if self.limit == 0 {
            return Err(ModelError::InvalidLimit);
        }
        let mut seen = BTreeSet::new();
        for field in &self.fields {
            if !seen.insert(field.id.as_str()) {
                return Err(ModelError::DuplicateField {
                    id: field.id.clone(),
                });
            }
        }
        Ok(())
    }
}
