//! View model for diff results.
//!
//! The backend answers a diff request with an object keyed by column name,
//! each value mapping a row key to a cell value:
//!
//! ```json
//! { "testcase": { "0": "a.txt", "1": "b.txt" }, "status": { "0": "AC", "1": "WA" } }
//! ```
//!
//! Both levels keep their insertion order. The same [`DiffTable`] is used by
//! the in-page component and by [`render_document`] for a new tab.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::columns::ColumnSet;
use crate::config::TABLE_ID;

const UNSORTABLE_COLUMNS: [&str; 4] = ["in", "stdout", "stderr", "status"];

/// `stdout.1` -> `stdout`. Names without a numeric suffix are returned as-is.
fn base_column_name(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((base, suffix)) if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) => base,
        _ => name,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DiffRow {
    pub key: String,
    pub cells: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiffTable {
    pub columns: Vec<String>,
    pub rows: Vec<DiffRow>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl DiffTable {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let object: Map<String, Value> = serde_json::from_str(body)?;
        Ok(Self::from_map(&object))
    }

    pub fn from_map(object: &Map<String, Value>) -> Self {
        let columns: Vec<String> = object.keys().cloned().collect();

        // Row keys in order of first appearance across all columns
        let mut seen: HashSet<&str> = HashSet::new();
        let mut row_keys: Vec<&str> = Vec::new();
        for value in object.values() {
            if let Value::Object(cells) = value {
                for key in cells.keys() {
                    if seen.insert(key) {
                        row_keys.push(key);
                    }
                }
            }
        }

        let rows = row_keys
            .into_iter()
            .map(|key| DiffRow {
                key: key.to_string(),
                cells: object
                    .values()
                    .map(|column| match column {
                        Value::Object(cells) => cells.get(key).map(cell_text).unwrap_or_default(),
                        _ => String::new(),
                    })
                    .collect(),
            })
            .collect();

        Self { columns, rows }
    }

    /// Link and status columns (and their per-log copies such as
    /// `status.2`) are not sortable; every other column is.
    pub fn is_sortable(&self, column: usize) -> bool {
        self.columns
            .get(column)
            .is_some_and(|name| !UNSORTABLE_COLUMNS.contains(&base_column_name(name)))
    }

    /// Fresh column controls for this table, every column visible.
    pub fn column_set(&self) -> ColumnSet {
        ColumnSet::from_labels(self.columns.iter().cloned())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Stable sort on one column. Numbers sort before text.
    pub fn sort_by(&mut self, column: usize, order: SortOrder) {
        if column >= self.columns.len() {
            return;
        }
        self.rows.sort_by(|a, b| {
            let ordering = compare_cells(&a.cells[column], &b.cells[column]);
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if n.is_f64() {
                n.as_f64()
                    .map(round_float)
                    .unwrap_or_else(|| n.to_string())
            } else {
                n.to_string()
            }
        }
        other => other.to_string(),
    }
}

/// Three decimal places at most; whole values keep a trailing `.0`.
fn round_float(f: f64) -> String {
    let rounded = (f * 1000.0).round() / 1000.0;
    if rounded.fract() == 0.0 && rounded.is_finite() {
        format!("{rounded:.1}")
    } else {
        rounded.to_string()
    }
}

fn compare_cells(a: &str, b: &str) -> Ordering {
    let parse = |s: &str| s.trim().parse::<f64>().ok().filter(|f| f.is_finite());
    match (parse(a), parse(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn class_attr(columns: &ColumnSet, index: usize) -> String {
    columns
        .cell_class(index)
        .map(|class| format!(" class=\"{class}\""))
        .unwrap_or_default()
}

/// Renders the table fragment. Hidden columns carry the hidden class.
pub fn render_table(table: &DiffTable, columns: &ColumnSet) -> String {
    let mut html = format!("<table id=\"{TABLE_ID}\">\n<thead>\n<tr>");
    for (index, name) in table.columns.iter().enumerate() {
        html.push_str(&format!(
            "<th{}>{}</th>",
            class_attr(columns, index),
            escape_html(name)
        ));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in &table.rows {
        html.push_str("<tr>");
        for (index, cell) in row.cells.iter().enumerate() {
            html.push_str(&format!(
                "<td{}>{}</td>",
                class_attr(columns, index),
                escape_html(cell)
            ));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>");
    html
}

/// Full page for a freshly opened tab.
pub fn render_document(title: &str, table: &DiffTable) -> String {
    let columns = table.column_set();
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <style>.hidden {{ display: none; }} table {{ border-collapse: collapse; }} \
         th, td {{ border: 1px solid #ccc; padding: 0.25em 0.5em; }}</style>\n</head>\n<body>\n\
         <h1>{title}</h1>\n{table}\n</body>\n</html>\n",
        title = escape_html(title),
        table = render_table(table, &columns),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "testcase": {"0": "b.txt", "1": "a.txt", "2": "c.txt"},
        "score": {"0": 10, "1": 2.34567, "2": null},
        "status": {"0": "AC", "2": "WA"}
    }"#;

    #[test]
    fn test_columns_and_rows_keep_key_order() {
        let table = DiffTable::from_json(BODY).unwrap();
        assert_eq!(table.columns, ["testcase", "score", "status"]);
        let keys: Vec<_> = table.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["0", "1", "2"]);
        assert_eq!(table.rows[0].cells, ["b.txt", "10", "AC"]);
        // Floats rounded, missing and null cells empty
        assert_eq!(table.rows[1].cells, ["a.txt", "2.346", ""]);
        assert_eq!(table.rows[2].cells, ["c.txt", "", "WA"]);
    }

    #[test]
    fn test_whole_floats_keep_fraction() {
        let table = DiffTable::from_json(r#"{"time": {"0": 2.0, "1": 1.23456, "2": 3}}"#).unwrap();
        let cells: Vec<_> = table.rows.iter().map(|r| r.cells[0].as_str()).collect();
        assert_eq!(cells, ["2.0", "1.235", "3"]);
        assert_eq!(round_float(0.9999), "1.0");
    }

    #[test]
    fn test_large_body_keeps_row_order() {
        let rows = 20_000;
        let mut object = Map::new();
        for c in 0..10 {
            let cells: Map<String, Value> = (0..rows)
                .map(|r| (format!("row{r}"), Value::from(r * c)))
                .collect();
            object.insert(format!("col{c}"), Value::Object(cells));
        }
        let body = Value::Object(object).to_string();

        let table = DiffTable::from_json(&body).unwrap();
        assert_eq!(table.columns.len(), 10);
        assert_eq!(table.rows.len(), rows);
        assert_eq!(table.rows[0].key, "row0");
        assert_eq!(table.rows[rows - 1].key, format!("row{}", rows - 1));
        assert_eq!(table.rows[3].cells[2], "6");
    }

    #[test]
    fn test_link_and_status_columns_not_sortable() {
        let table = DiffTable::from_json(
            r#"{"testcase": {}, "in": {}, "stdout.1": {}, "status.2": {}, "score.1": {}, "v1.2a": {}}"#,
        )
        .unwrap();
        let sortable: Vec<_> = (0..7).map(|i| table.is_sortable(i)).collect();
        assert_eq!(sortable, [true, false, false, false, true, true, false]);
        assert_eq!(base_column_name("stdout.12"), "stdout");
        assert_eq!(base_column_name("status."), "status.");
    }

    #[test]
    fn test_row_keys_follow_first_appearance() {
        let table = DiffTable::from_json(r#"{"a": {"y": 1}, "b": {"x": 2, "y": 3}}"#).unwrap();
        let keys: Vec<_> = table.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["y", "x"]);
        assert_eq!(table.rows[1].cells, ["", "2"]);
    }

    #[test]
    fn test_non_object_body_is_an_error() {
        assert!(DiffTable::from_json("[1, 2]").is_err());
        assert!(DiffTable::from_json("<table></table>").is_err());
    }

    #[test]
    fn test_sort_numeric_then_text() {
        let mut table = DiffTable::from_json(
            r#"{"v": {"a": "10", "b": "9", "c": "x", "d": "-1"}}"#,
        )
        .unwrap();
        table.sort_by(0, SortOrder::Ascending);
        let keys: Vec<_> = table.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["d", "b", "a", "c"]);

        table.sort_by(0, SortOrder::Descending);
        let keys: Vec<_> = table.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["c", "a", "b", "d"]);
    }

    #[test]
    fn test_sort_out_of_range_is_noop() {
        let mut table = DiffTable::from_json(BODY).unwrap();
        let before = table.clone();
        table.sort_by(9, SortOrder::Ascending);
        assert_eq!(table, before);
    }

    #[test]
    fn test_render_marks_hidden_column_only() {
        let table = DiffTable::from_json(r#"{"Name": {"0": "x"}, "Status": {"0": "AC"}}"#).unwrap();
        let mut columns = ColumnSet::from_labels(table.columns.iter().cloned());
        columns.toggle(1);
        let html = render_table(&table, &columns);
        assert!(html.contains("<th>Name</th><th class=\"hidden\">Status</th>"));
        assert!(html.contains("<td>x</td><td class=\"hidden\">AC</td>"));
    }

    #[test]
    fn test_render_escapes_cells() {
        let table = DiffTable::from_json(r#"{"<b>": {"0": "a & \"b\""}}"#).unwrap();
        let html = render_document("Compare <Result>", &table);
        assert!(html.contains("<th>&lt;b&gt;</th>"));
        assert!(html.contains("<td>a &amp; &quot;b&quot;</td>"));
        assert!(html.contains("<title>Compare &lt;Result&gt;</title>"));
    }
}
