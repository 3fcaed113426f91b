//! JSON description of one list view.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use viewstate_model::{DEFAULT_LIMIT, FieldCatalogue, FieldSpec, Filter, SearchState, ViewState};

use crate::codec::{FilterCodec, JsonCodec, ListCodec, PrimitiveCodec};
use crate::error::{QueryError, Result};
use crate::registry::{FilterRegistry, FilterSpec};

/// Which stock codec a filter uses on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecKind {
    #[default]
    Primitive,
    List,
    Json,
}

impl CodecKind {
    fn build(self) -> Box<dyn FilterCodec> {
        match self {
            Self::Primitive => Box::new(PrimitiveCodec),
            Self::List => Box::new(ListCodec),
            Self::Json => Box::new(JsonCodec),
        }
    }
}

/// Default value and codec of one filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDefinition {
    #[serde(default)]
    pub default: Filter,
    #[serde(default)]
    pub codec: CodecKind,
}

/// Filters, fields and paging of one list view.
///
/// ```json
/// {
///   "search_field": "name",
///   "filters": {
///     "status": { "default": { "enabled": true, "value": "open" } },
///     "tags": { "default": { "value": [] }, "codec": "list" }
///   },
///   "fields": [{ "id": "id", "fixed": true }, { "id": "name", "sortable": true }],
///   "limit": 50
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_field: Option<String>,
    #[serde(default)]
    pub filters: BTreeMap<String, FilterDefinition>,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

impl ViewDefinition {
    /// Parse and validate a definition.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let definition: Self =
            serde_json::from_str(text).map_err(|err| QueryError::config(err.to_string()))?;
        definition.validate()?;
        Ok(definition)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    fn validate(&self) -> Result<()> {
        if self.limit == 0 {
            return Err(QueryError::config("limit must be greater than zero"));
        }
        self.catalogue()
            .map_err(|err| QueryError::config(err.to_string()))?;
        Ok(())
    }

    /// Registry with one specification per declared filter.
    #[must_use]
    pub fn registry(&self) -> FilterRegistry {
        self.filters
            .iter()
            .fold(FilterRegistry::new(), |registry, (id, definition)| {
                registry.with(
                    id.clone(),
                    FilterSpec::new(definition.default.clone())
                        .with_shared_codec(definition.codec.build().into()),
                )
            })
    }

    pub fn catalogue(&self) -> Result<FieldCatalogue> {
        Ok(FieldCatalogue::new(self.fields.clone())?)
    }

    /// State of a freshly mounted view: empty search, default filters,
    /// default fields.
    pub fn initial_state(&self) -> Result<ViewState> {
        let catalogue = self.catalogue()?;
        let filters = (!self.filters.is_empty()).then(|| self.registry().default_filters());
        Ok(ViewState {
            search: self
                .search_field
                .as_ref()
                .map(|field| SearchState::new(field.clone(), "")),
            json_filter: None,
            filters,
            fields: catalogue.default_fields(),
            offset: self.offset,
            limit: self.limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use viewstate_model::FieldState;

    const VIEW: &str = r#"{
        "search_field": "name",
        "filters": {
            "status": { "default": { "enabled": true, "value": "open" } },
            "tags": { "default": { "value": [] }, "codec": "list" }
        },
        "fields": [
            { "id": "id", "fixed": true, "visible": false },
            { "id": "name", "sortable": true },
            { "id": "notes", "visible": false }
        ],
        "limit": 50
    }"#;

    #[test]
    fn parses_definition() {
        let view = ViewDefinition::from_json_str(VIEW).unwrap();
        assert_eq!(view.search_field.as_deref(), Some("name"));
        assert_eq!(view.filters["tags"].codec, CodecKind::List);
        assert_eq!(view.filters["status"].codec, CodecKind::Primitive);
        assert_eq!(view.limit, 50);
    }

    #[test]
    fn initial_state_uses_defaults() {
        let state = ViewDefinition::from_json_str(VIEW)
            .unwrap()
            .initial_state()
            .unwrap();
        assert_eq!(state.search, Some(SearchState::new("name", "")));
        assert_eq!(state.enabled_filter_ids(), vec!["status"]);
        assert_eq!(
            state.fields,
            vec![FieldState::fixed("id"), FieldState::new("name")]
        );
        assert_eq!((state.offset, state.limit), (None, 50));
    }

    #[test]
    fn registry_uses_declared_codecs() {
        let registry = ViewDefinition::from_json_str(VIEW).unwrap().registry();
        let filter = Filter::enabled(json!(["a", "b"]));
        assert_eq!(registry.serialize("tags", &filter).unwrap(), "(a)(b)");
    }

    #[test]
    fn empty_definition_has_no_filters() {
        let view = ViewDefinition::from_json_str("{}").unwrap();
        assert_eq!(view.limit, DEFAULT_LIMIT);
        let state = view.initial_state().unwrap();
        assert!(state.filters.is_none());
        assert!(state.search.is_none());
    }

    #[test]
    fn invalid_definitions_are_rejected() {
        for text in [
            r#"{"limit": 0}"#,
            r#"{"fields": [{"id": "a"}, {"id": "a"}]}"#,
            r#"{"filters": {"x": {"codec": "yaml"}}}"#,
            "not json",
        ] {
            assert!(
                matches!(
                    ViewDefinition::from_json_str(text),
                    Err(QueryError::Config { .. })
                ),
                "text {text}"
            );
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            ViewDefinition::from_path("/nonexistent/view.json"),
            Err(QueryError::Io(_))
        ));
    }
}
