//! Query token writer.

use std::fmt::Write as _;

use tracing::trace;
use viewstate_model::{FieldState, Filters, SearchState, Sorting, ViewState};

use crate::conditional::{ENTRY_UNSAFE, SEARCH_FIELD_UNSAFE, SEARCH_QUERY_UNSAFE, maybe_encode};
use crate::error::Result;
use crate::registry::FilterRegistry;
use crate::section::Section;

/// Encode `state` as one query token.
///
/// Sections are written in a fixed order and only when they carry
/// information: an empty search, a filter set with nothing enabled, a field
/// list made only of fixed unsorted fields and a missing offset all produce
/// nothing. `jsonFilter` is reserved and never written.
///
/// Fails only when a filter codec rejects an enabled filter's value.
pub fn encode(state: &ViewState, registry: &FilterRegistry) -> Result<String> {
    let mut out = String::new();

    if let Some(search) = state.search.as_ref().filter(|search| !search.is_empty()) {
        write_section(&mut out, Section::Search, &search_body(search));
    }

    if let Some(filters) = state.filters.as_ref().filter(|filters| filters.is_active()) {
        write_section(&mut out, Section::Filter, &filter_body(filters, registry)?);
    }

    let listed: Vec<String> = state
        .fields
        .iter()
        .filter(|field| !field.is_implicit())
        .map(field_entry)
        .collect();
    if !listed.is_empty() {
        write_section(&mut out, Section::Fields, &listed.join(","));
    }

    if let Some(offset) = state.offset {
        // Writing to a String cannot fail.
        let _ = write!(out, "{}({offset},{})", Section::Pos, state.limit);
    }

    trace!(token = %out, "encoded view state");
    Ok(out)
}

fn write_section(out: &mut String, section: Section, body: &str) {
    out.push_str(section.name());
    out.push('(');
    out.push_str(body);
    out.push(')');
}

fn search_body(search: &SearchState) -> String {
    format!(
        "{},{}",
        maybe_encode(&search.field, SEARCH_FIELD_UNSAFE),
        maybe_encode(&search.query, SEARCH_QUERY_UNSAFE)
    )
}

fn filter_body(filters: &Filters, registry: &FilterRegistry) -> Result<String> {
    let entries = filters
        .enabled()
        .map(|(id, filter)| {
            let raw = registry.serialize(id, filter)?;
            Ok(format!(
                "{}:{}",
                maybe_encode(id, ENTRY_UNSAFE),
                maybe_encode(&raw, ENTRY_UNSAFE)
            ))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(entries.join(","))
}

fn field_entry(field: &FieldState) -> String {
    let id = maybe_encode(&field.id, ENTRY_UNSAFE);
    match field.sorting {
        Sorting::None => id,
        sorting => format!("{id}:{}", maybe_encode(sorting.as_str(), ENTRY_UNSAFE)),
    }
}
