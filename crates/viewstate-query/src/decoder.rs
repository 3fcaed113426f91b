//! Query token parser.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{trace, warn};
use viewstate_model::{Filter, SearchState, Sorting};

use crate::conditional::{ENTRY_UNSAFE, SEARCH_FIELD_UNSAFE, SEARCH_QUERY_UNSAFE};
use crate::cursor::Cursor;
use crate::error::{QueryError, Result};
use crate::registry::FilterRegistry;
use crate::section::Section;

/// Partial view state read from a token.
///
/// `None` means the section was absent; what that implies for the current
/// state is decided by [`crate::apply`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DecodedQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<BTreeMap<String, Filter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<DecodedField>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl DecodedQuery {
    /// True when the token carried no section that populates the state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.filters.is_none()
            && self.fields.is_none()
            && self.offset.is_none()
            && self.limit.is_none()
    }
}

/// A field listed in `fields(...)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedField {
    pub id: String,
    pub sorting: Sorting,
}

/// Parse a query token.
///
/// Filter values are rebuilt with the codec `registry` holds for their id.
/// The parse is single-pass and all-or-nothing: the first error aborts it.
pub fn decode(input: &str, registry: &FilterRegistry) -> Result<DecodedQuery> {
    let mut cursor = Cursor::new(input);
    let mut decoded = DecodedQuery::default();

    while !cursor.is_at_end() {
        let start = cursor.position();
        let name = cursor.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
        if name.is_empty() || !cursor.eat('(') {
            return Err(QueryError::InvalidSectionHeader { position: start });
        }
        let section = Section::from_name(name).ok_or_else(|| QueryError::UnknownSection {
            name: name.to_string(),
            position: start,
        })?;

        match section {
            Section::Search => decoded.search = Some(decode_search(&mut cursor)?),
            Section::JsonFilter => {
                cursor.paren_decode()?;
                warn!(position = start, "jsonFilter section is not supported, ignoring it");
            }
            Section::Filter => decode_filters(
                &mut cursor,
                registry,
                decoded.filters.get_or_insert_with(BTreeMap::new),
            )?,
            Section::Fields => {
                decode_fields(&mut cursor, decoded.fields.get_or_insert_with(Vec::new))?;
            }
            Section::Pos => {
                let (offset, limit) = decode_pos(&mut cursor)?;
                decoded.offset = Some(offset);
                decoded.limit = Some(limit);
            }
        }

        if !cursor.eat(')') {
            return Err(QueryError::UnterminatedSection {
                section: section.name(),
                position: cursor.position(),
            });
        }
        trace!(section = section.name(), "decoded section");
    }

    Ok(decoded)
}

fn decode_search(cursor: &mut Cursor<'_>) -> Result<SearchState> {
    let field = cursor.maybe_decode(SEARCH_FIELD_UNSAFE)?;
    cursor.expect(',')?;
    let query = cursor.maybe_decode(SEARCH_QUERY_UNSAFE)?;
    Ok(SearchState { field, query })
}

fn decode_filters(
    cursor: &mut Cursor<'_>,
    registry: &FilterRegistry,
    filters: &mut BTreeMap<String, Filter>,
) -> Result<()> {
    loop {
        let id = cursor.maybe_decode(ENTRY_UNSAFE)?;
        cursor.expect(':')?;
        let raw = cursor.maybe_decode(ENTRY_UNSAFE)?;
        let filter = registry.deserialize(&id, &raw)?;
        filters.insert(id, filter);
        if !cursor.eat(',') {
            return Ok(());
        }
    }
}

fn decode_fields(cursor: &mut Cursor<'_>, fields: &mut Vec<DecodedField>) -> Result<()> {
    loop {
        let id = cursor.maybe_decode(ENTRY_UNSAFE)?;
        let sorting = if cursor.eat(':') {
            let raw = cursor.maybe_decode(ENTRY_UNSAFE)?;
            raw.parse::<Sorting>()
                .map_err(|source| QueryError::InvalidSorting {
                    field: id.clone(),
                    source,
                })?
        } else {
            Sorting::None
        };
        if !id.is_empty() {
            fields.push(DecodedField { id, sorting });
        }
        if !cursor.eat(',') {
            return Ok(());
        }
    }
}

fn decode_pos(cursor: &mut Cursor<'_>) -> Result<(u64, u64)> {
    let start = cursor.position();
    let bad = || QueryError::BadPageSection { position: start };

    let offset = cursor.take_while(|c| c.is_ascii_digit());
    if offset.is_empty() || !cursor.eat(',') {
        return Err(bad());
    }
    let limit = cursor.take_while(|c| c.is_ascii_digit());
    if limit.is_empty() {
        return Err(bad());
    }
    Ok((
        offset.parse().map_err(|_| bad())?,
        limit.parse().map_err(|_| bad())?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(input: &str) -> Result<DecodedQuery> {
        decode(input, &FilterRegistry::new())
    }

    #[test]
    fn empty_token_decodes_to_nothing() {
        let decoded = parse("").unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn decodes_every_section() {
        let decoded =
            parse("search(name,red%20fox)filter(status:open,size:3)fields(id,name:desc)pos(20,10)")
                .unwrap();
        assert_eq!(decoded.search, Some(SearchState::new("name", "red fox")));
        let filters = decoded.filters.unwrap();
        assert_eq!(filters["status"], Filter::enabled("open"));
        assert_eq!(filters["size"], Filter::enabled(3));
        assert_eq!(
            decoded.fields.unwrap(),
            vec![
                DecodedField {
                    id: "id".to_string(),
                    sorting: Sorting::None
                },
                DecodedField {
                    id: "name".to_string(),
                    sorting: Sorting::Desc
                },
            ]
        );
        assert_eq!(decoded.offset, Some(20));
        assert_eq!(decoded.limit, Some(10));
    }

    #[test]
    fn sections_may_come_in_any_order() {
        let decoded = parse("pos(0,5)search(q,x)").unwrap();
        assert_eq!(decoded.offset, Some(0));
        assert_eq!(decoded.search, Some(SearchState::new("q", "x")));
    }

    #[test]
    fn empty_field_ids_are_skipped() {
        let decoded = parse("fields()").unwrap();
        assert_eq!(decoded.fields, Some(vec![]));

        let decoded = parse("fields(,a,)").unwrap();
        assert_eq!(decoded.fields.unwrap().len(), 1);
    }

    #[test]
    fn parenthesized_slots_are_unwrapped() {
        let decoded = parse("search((a%2Cb),(x%29%20y))filter((a%3Ab):((f(x))))").unwrap();
        assert_eq!(decoded.search, Some(SearchState::new("a,b", "x) y")));
        assert_eq!(
            decoded.filters.unwrap()["a:b"],
            Filter::enabled(json!("f(x)"))
        );
    }

    #[test]
    fn json_filter_is_discarded() {
        let decoded = parse("jsonFilter((%7B%7D))pos(1,2)").unwrap();
        assert_eq!(decoded.offset, Some(1));
        assert!(decoded.filters.is_none());
    }

    #[test]
    fn unknown_section_fails() {
        let err = parse("pos(0,5)sort(name)").unwrap_err();
        match err {
            QueryError::UnknownSection { name, position } => {
                assert_eq!(name, "sort");
                assert_eq!(position, 8);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_header_fails() {
        assert!(matches!(
            parse("(x)"),
            Err(QueryError::InvalidSectionHeader { position: 0 })
        ));
        assert!(matches!(
            parse("search"),
            Err(QueryError::InvalidSectionHeader { position: 0 })
        ));
        assert!(matches!(
            parse("pos(1,2))"),
            Err(QueryError::InvalidSectionHeader { position: 8 })
        ));
    }

    #[test]
    fn unterminated_section_fails() {
        assert!(matches!(
            parse("search(a,b"),
            Err(QueryError::UnterminatedSection {
                section: "search",
                position: 10
            })
        ));
        assert!(matches!(
            parse("pos(1,2"),
            Err(QueryError::UnterminatedSection { section: "pos", .. })
        ));
    }

    #[test]
    fn bad_page_section_fails() {
        for input in ["pos()", "pos(1)", "pos(a,2)", "pos(1,)", "pos(-1,2)"] {
            assert!(
                matches!(parse(input), Err(QueryError::BadPageSection { position: 4 })),
                "input {input}"
            );
        }
        assert!(matches!(
            parse("pos(99999999999999999999,1)"),
            Err(QueryError::BadPageSection { .. })
        ));
    }

    #[test]
    fn missing_separators_fail() {
        assert!(matches!(
            parse("search(name)"),
            Err(QueryError::UnexpectedCharacter { expected: ',', position: 11, .. })
        ));
        assert!(matches!(
            parse("filter(status)"),
            Err(QueryError::UnexpectedCharacter { expected: ':', .. })
        ));
        assert!(matches!(
            parse("filter()"),
            Err(QueryError::UnexpectedCharacter { expected: ':', position: 7, .. })
        ));
    }

    #[test]
    fn invalid_sorting_fails() {
        let err = parse("fields(name:up)").unwrap_err();
        assert!(matches!(err, QueryError::InvalidSorting { ref field, .. } if field == "name"));
    }
}
