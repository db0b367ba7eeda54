use std::fs;
use std::path::Path;

use serde_json::{json, Map, Value};
use sqlpane_core::result_set::ResultSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export file at {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize JSON export: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn export_csv(path: &Path, result: &ResultSet) -> Result<usize, ExportError> {
    let mut content = String::new();
    content.push_str(
        &result
            .columns()
            .iter()
            .map(|column| csv_escape(column))
            .collect::<Vec<_>>()
            .join(","),
    );
    content.push('\n');

    for row in result.rows() {
        content.push_str(
            &row.iter()
                .map(|cell| csv_escape(cell))
                .collect::<Vec<_>>()
                .join(","),
        );
        content.push('\n');
    }

    fs::write(path, content).map_err(|source| ExportError::Write {
        path: path.display().to_string(),
        source,
    })?;
    Ok(result.row_count())
}

pub fn export_json(path: &Path, result: &ResultSet) -> Result<usize, ExportError> {
    let mut records = Vec::with_capacity(result.row_count());
    for row in result.rows() {
        let mut object = Map::with_capacity(result.columns().len());
        for (column, cell) in result.columns().iter().zip(row) {
            object.insert(column.clone(), json!(cell));
        }
        records.push(Value::Object(object));
    }

    let payload = serde_json::to_string_pretty(&records)?;
    fs::write(path, payload).map_err(|source| ExportError::Write {
        path: path.display().to_string(),
        source,
    })?;
    Ok(result.row_count())
}

fn csv_escape(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use sqlpane_core::result_set::ResultSet;
    use tempfile::TempDir;

    use super::{export_csv, export_json};

    fn sample_result() -> ResultSet {
        let mut result = ResultSet::new(vec!["id".to_string(), "name".to_string()]);
        result
            .push_row(vec!["1".to_string(), "alpha".to_string()])
            .expect("row should fit");
        result
            .push_row(vec!["2".to_string(), "quote \"name\"".to_string()])
            .expect("row should fit");
        result
    }

    #[test]
    fn exports_rows_to_csv_with_header_and_escaping() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("result.csv");

        let written = export_csv(&path, &sample_result()).expect("csv export failed");

        assert_eq!(written, 2);
        let output = fs::read_to_string(path).expect("failed to read csv output");
        assert!(output.starts_with("id,name\n"));
        assert!(output.contains("2,\"quote \"\"name\"\"\""));
    }

    #[test]
    fn exports_rows_to_json_objects_keyed_by_column() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("result.json");

        let written = export_json(&path, &sample_result()).expect("json export failed");

        assert_eq!(written, 2);
        let output = fs::read_to_string(path).expect("failed to read json output");
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("invalid json");
        assert_eq!(parsed[0]["id"], "1");
        assert_eq!(parsed[1]["name"], "quote \"name\"");
    }

    #[test]
    fn empty_result_still_writes_the_header_line() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("empty.csv");
        let result = ResultSet::new(vec!["id".to_string()]);

        let written = export_csv(&path, &result).expect("csv export failed");

        assert_eq!(written, 0);
        let output = fs::read_to_string(path).expect("failed to read csv output");
        assert_eq!(output, "id\n");
    }
}
