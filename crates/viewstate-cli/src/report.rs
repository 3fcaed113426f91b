use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use viewstate_query::{DecodedQuery, Section};

/// Table with one row per decoded entry.
pub fn decoded_table(decoded: &DecodedQuery) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Section"),
        header_cell("Entry"),
        header_cell("Value"),
    ]);
    apply_table_style(&mut table);

    if let Some(search) = &decoded.search {
        table.add_row(vec![
            Cell::new(Section::Search),
            Cell::new(&search.field),
            Cell::new(&search.query),
        ]);
    }
    if let Some(filters) = &decoded.filters {
        for (id, filter) in filters {
            table.add_row(vec![
                Cell::new(Section::Filter),
                Cell::new(id),
                Cell::new(filter.value.to_string()),
            ]);
        }
    }
    if let Some(fields) = &decoded.fields {
        for field in fields {
            let sorting = if field.sorting.is_sorted() {
                Cell::new(field.sorting)
            } else {
                dim_cell(field.sorting)
            };
            table.add_row(vec![Cell::new(Section::Fields), Cell::new(&field.id), sorting]);
        }
    }
    if let Some(offset) = decoded.offset {
        table.add_row(vec![Cell::new(Section::Pos), Cell::new("offset"), Cell::new(offset)]);
    }
    if let Some(limit) = decoded.limit {
        table.add_row(vec![Cell::new(Section::Pos), Cell::new("limit"), Cell::new(limit)]);
    }
    if decoded.is_empty() {
        table.add_row(vec![dim_cell("-"), dim_cell("-"), dim_cell("empty token")]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewstate_query::{FilterRegistry, decode};

    #[test]
    fn rows_follow_sections() {
        let decoded = decode(
            "search(name,fox)filter(status:open)fields(name:asc)pos(0,10)",
            &FilterRegistry::new(),
        )
        .unwrap();
        let table = decoded_table(&decoded);
        assert_eq!(table.row_count(), 5);
        let text = table.to_string();
        assert!(text.contains("fox"));
        assert!(text.contains("\"open\""));
        assert!(text.contains("asc"));
    }

    #[test]
    fn empty_token_gets_placeholder_row() {
        let table = decoded_table(&DecodedQuery::default());
        assert_eq!(table.row_count(), 1);
        assert!(table.to_string().contains("empty token"));
    }
}
