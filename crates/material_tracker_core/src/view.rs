//! crates/material_tracker_core/src/view.rs
//!
//! The table render model: a pure function from the current record list plus
//! a search query to the rows a caller would display. Rendering targets (an
//! HTML table, a terminal, a JSON payload) are external concerns.

use crate::domain::MaterialRecord;
use serde::Serialize;

/// One display-ready table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub id: i64,
    pub material_type: String,
    pub weight: String,
    pub intake_date: String,
    pub location: String,
    pub description: String,
}

/// The rendered table plus the summary panel values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub rows: Vec<TableRow>,
    /// Count over the full record set, not the filtered rows.
    pub total_records: usize,
    pub total_weight: f64,
}

/// Builds the table view. The search query is a case-insensitive substring
/// match over material type, location, and description; a blank query keeps
/// every record. Row order follows the input order.
pub fn render_table(records: &[MaterialRecord], search: Option<&str>) -> TableView {
    let query = search.map(|q| q.trim().to_lowercase()).unwrap_or_default();
    let rows = records
        .iter()
        .filter(|record| query.is_empty() || matches_query(record, &query))
        .map(render_row)
        .collect();
    TableView {
        rows,
        total_records: records.len(),
        total_weight: records.iter().map(|r| r.weight).sum(),
    }
}

fn matches_query(record: &MaterialRecord, query: &str) -> bool {
    record.material_type.to_lowercase().contains(query)
        || record.location.to_lowercase().contains(query)
        || record.description.to_lowercase().contains(query)
}

fn render_row(record: &MaterialRecord) -> TableRow {
    TableRow {
        id: record.id,
        material_type: capitalize_first(&record.material_type),
        weight: format!("{:.2}", record.weight),
        intake_date: record.intake_date.format("%d/%m/%Y").to_string(),
        location: record.location.clone(),
        description: if record.description.is_empty() {
            "-".to_string()
        } else {
            record.description.clone()
        },
    }
}

/// Uppercases the first character of a catalog value for display.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(id: i64, material_type: &str, location: &str, description: &str) -> MaterialRecord {
        MaterialRecord {
            id,
            material_type: material_type.to_string(),
            weight: 2.5,
            intake_date: NaiveDate::from_ymd_opt(2026, 8, 29).unwrap(),
            location: location.to_string(),
            description: description.to_string(),
            created_at: None,
            modified_at: None,
        }
    }

    #[test]
    fn blank_query_keeps_every_record() {
        let records = vec![record(1, "oro", "A", ""), record(2, "plata", "B", "")];
        let view = render_table(&records, None);
        assert_eq!(view.rows.len(), 2);
        let view = render_table(&records, Some("   "));
        assert_eq!(view.rows.len(), 2);
    }

    #[test]
    fn query_matches_any_text_field_case_insensitively() {
        let records = vec![
            record(1, "oro", "Mina Norte", ""),
            record(2, "plata", "Mina Sur", "lote especial"),
            record(3, "cobre", "Bodega", ""),
        ];
        let by_type = render_table(&records, Some("ORO"));
        assert_eq!(by_type.rows.len(), 1);
        assert_eq!(by_type.rows[0].id, 1);

        let by_location = render_table(&records, Some("mina"));
        assert_eq!(by_location.rows.len(), 2);

        let by_description = render_table(&records, Some("especial"));
        assert_eq!(by_description.rows.len(), 1);
        assert_eq!(by_description.rows[0].id, 2);
    }

    #[test]
    fn summary_counts_the_full_set_even_when_filtered() {
        let records = vec![record(1, "oro", "A", ""), record(2, "plata", "B", "")];
        let view = render_table(&records, Some("oro"));
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.total_records, 2);
        assert!((view.total_weight - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rows_format_for_display() {
        let records = vec![record(7, "oro", "Mina Norte", "")];
        let view = render_table(&records, None);
        let row = &view.rows[0];
        assert_eq!(row.material_type, "Oro");
        assert_eq!(row.weight, "2.50");
        assert_eq!(row.intake_date, "29/08/2026");
        assert_eq!(row.description, "-");
    }
}
