use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Columns shown for each record kind in table output. JSON output always
/// carries every field.
pub mod columns {
    pub const TICKET: &[&str] = &[
        "code",
        "title",
        "status",
        "priority",
        "location",
        "technician_id",
        "updated_at",
    ];
    pub const CLIENT: &[&str] = &["id", "name", "contact_person", "city", "state", "phone"];
    pub const USER: &[&str] = &["id", "name", "email", "role", "created_at"];
    pub const AUDIT: &[&str] = &["created_at", "action", "entity", "user_id", "details"];
}

/// Render a serializable response to a string in the requested format.
///
/// `columns` narrows table output for lists of records; `None` shows every key.
pub fn render<T: Serialize>(
    value: &T,
    format: OutputFormat,
    columns: Option<&[&str]>,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Compact => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => render_table(value, columns),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(value, format, None)?);
    Ok(())
}

/// Print a list of records, narrowing table output to `columns`.
pub fn output_rows<T: Serialize>(
    rows: &[T],
    format: OutputFormat,
    columns: &[&str],
) -> anyhow::Result<()> {
    println!("{}", render(&rows, format, Some(columns))?);
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: Serialize>(value: &T, columns: Option<&[&str]>) -> anyhow::Result<String> {
    let options = table_options();

    match serde_json::to_value(value)? {
        Value::Array(items) => Ok(render_array_table(&items, columns, options)),
        Value::Object(map) => {
            let rows = map
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&["field", "value"], &rows, options))
        }
        scalar => Ok(value_to_cell(&scalar)),
    }
}

fn render_array_table(
    items: &[Value],
    columns: Option<&[&str]>,
    options: table::TableOptions,
) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&["value"], &rows, options);
    }

    let headers: Vec<String> = match columns {
        Some(columns) => columns.iter().map(|c| (*c).to_string()).collect(),
        None => {
            let mut keys = Vec::<String>::new();
            for map in items.iter().filter_map(Value::as_object) {
                for key in map.keys() {
                    if !keys.contains(key) {
                        keys.push(key.clone());
                    }
                }
            }
            keys
        }
    };

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, options)
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Row {
        code: &'static str,
        status: &'static str,
        technician_id: Option<&'static str>,
    }

    #[test]
    fn json_render_is_valid_json() {
        let row = Row {
            code: "HD-000001",
            status: "open",
            technician_id: None,
        };
        let out = render(&row, OutputFormat::Json, None).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["code"], "HD-000001");
        assert!(parsed["technician_id"].is_null());
    }

    #[test]
    fn compact_render_is_single_line() {
        let rows = vec![
            Row {
                code: "HD-000001",
                status: "open",
                technician_id: None,
            },
            Row {
                code: "HD-000002",
                status: "closed",
                technician_id: Some("usr-1"),
            },
        ];
        let out = render(&rows, OutputFormat::Compact, None).expect("compact render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_keeps_only_requested_columns() {
        let rows = vec![Row {
            code: "HD-000007",
            status: "pending",
            technician_id: None,
        }];
        let out = render(&rows, OutputFormat::Table, Some(&["code", "status"]))
            .expect("table render should work");
        let header = out.lines().next().expect("header line");
        assert!(header.contains("code"));
        assert!(header.contains("status"));
        assert!(!header.contains("technician_id"));
        assert!(out.contains("HD-000007"));
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let rows: Vec<Row> = Vec::new();
        let out = render(&rows, OutputFormat::Table, None).expect("table render should work");
        assert_eq!(out, "(no rows)");
    }
}
