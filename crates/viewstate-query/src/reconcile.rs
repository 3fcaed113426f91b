//! Merge a decoded query onto the current view state.

use viewstate_model::{FieldState, Filters, SearchState, ViewState};

use crate::decoder::{DecodedField, DecodedQuery, decode};
use crate::error::Result;
use crate::registry::FilterRegistry;

/// Build the state a token describes, starting from `current`.
///
/// Sections missing from the token reset what they govern: the search query
/// is cleared and every filter is switched off. With `soft_initial` the
/// filters are left alone instead, so the defaults of a freshly mounted view
/// survive an empty URL. Fields and paging only change when their section
/// was present. Neither input is modified.
#[must_use]
pub fn apply(decoded: &DecodedQuery, current: &ViewState, soft_initial: bool) -> ViewState {
    let search = match (&decoded.search, &current.search) {
        (Some(search), _) => Some(search.clone()),
        (None, Some(search)) => Some(SearchState::new(search.field.clone(), "")),
        (None, None) => None,
    };

    let filters = match &decoded.filters {
        Some(entries) => {
            let mut filters = current.filters.clone().unwrap_or_default();
            filters.disabled = false;
            for (id, filter) in filters.entries.iter_mut() {
                if !entries.contains_key(id) {
                    filter.enabled = false;
                }
            }
            for (id, filter) in entries {
                filters.insert(id.clone(), filter.clone());
            }
            Some(filters)
        }
        None if soft_initial => current.filters.clone(),
        None => current.filters.clone().map(|mut filters: Filters| {
            filters.disable_all();
            filters
        }),
    };

    let fields = match &decoded.fields {
        Some(decoded_fields) => merge_fields(&current.fields, decoded_fields),
        None => current.fields.clone(),
    };

    ViewState {
        search,
        json_filter: current.json_filter.clone(),
        filters,
        fields,
        offset: decoded.offset.or(current.offset),
        limit: decoded.limit.unwrap_or(current.limit),
    }
}

/// Parse `input` and merge it onto `current` in one step.
pub fn decode_and_apply(
    input: &str,
    current: &ViewState,
    registry: &FilterRegistry,
    soft_initial: bool,
) -> Result<ViewState> {
    let decoded = decode(input, registry)?;
    Ok(apply(&decoded, current, soft_initial))
}

fn merge_fields(current: &[FieldState], decoded: &[DecodedField]) -> Vec<FieldState> {
    let mut fields: Vec<FieldState> = current.iter().filter(|field| field.fixed).cloned().collect();
    for entry in decoded {
        match fields.iter_mut().find(|field| field.id == entry.id) {
            Some(field) => field.sorting = entry.sorting,
            None => fields.push(FieldState::new(entry.id.clone()).with_sorting(entry.sorting)),
        }
    }
    fields
}
