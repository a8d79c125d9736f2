//! Output serialization for responses.
//!
//! The target format is chosen by file extension: `.json` for an indented
//! JSON document, `.csv` for a header row plus one row per record. Anything
//! else is rejected before the file is touched.

use std::path::Path;

use serde_json::Value;

use crate::error::{RestError, Result};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
}

impl OutputFormat {
    /// Select the format from a file path ending in `.json` or `.csv`.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::UnsupportedFormat`] for any other path,
    /// including paths with no extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();

        // Suffix check rather than Path::extension, so a bare dotfile
        // target like `.json` still selects a format.
        if name.ends_with(".json") {
            Ok(OutputFormat::Json)
        } else if name.ends_with(".csv") {
            Ok(OutputFormat::Csv)
        } else {
            match path.extension().and_then(|e| e.to_str()) {
                Some(ext) => Err(RestError::UnsupportedFormat(ext.to_string())),
                None => Err(RestError::UnsupportedFormat(path.display().to_string())),
            }
        }
    }
}

/// Write a JSON value to a file in the format selected by its extension.
///
/// The whole document is rendered in memory and written with a single
/// `fs::write`, so format and shape failures are detected before the file
/// is created and a failed write never leaves a partial file behind.
///
/// # Errors
///
/// Returns an error if:
/// - The path's extension is not `.json` or `.csv`
/// - The value cannot be laid out as CSV rows (for `.csv` targets)
/// - The file cannot be written
pub fn write_to_file(value: &Value, path: &Path) -> Result<()> {
    let bytes = match OutputFormat::from_path(path)? {
        OutputFormat::Json => render_json(value)?,
        OutputFormat::Csv => render_csv(value)?,
    };

    std::fs::write(path, bytes)?;
    Ok(())
}

/// Render a value as an indented JSON document with a trailing newline.
fn render_json(value: &Value) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(value).map_err(|e| {
        RestError::Io(std::io::Error::other(format!(
            "JSON serialization failed: {}",
            e
        )))
    })?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Render a value as CSV: header from the first record's keys, then one
/// row per record in sequence order.
///
/// The value must be a non-empty array of objects sharing a single key
/// set; anything else is an [`RestError::UnsupportedShape`].
fn render_csv(value: &Value) -> Result<Vec<u8>> {
    let records = match value {
        Value::Array(records) => records,
        other => {
            return Err(RestError::UnsupportedShape(format!(
                "expected an array of records, got {}",
                value_kind(other)
            )))
        }
    };

    if records.is_empty() {
        return Err(RestError::UnsupportedShape(
            "expected a non-empty array of records".to_string(),
        ));
    }

    let first = records[0].as_object().ok_or_else(|| {
        RestError::UnsupportedShape(format!(
            "expected an array of objects, record 0 is {}",
            value_kind(&records[0])
        ))
    })?;
    let header: Vec<&str> = first.keys().map(String::as_str).collect();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&header)?;

    for (index, record) in records.iter().enumerate() {
        let fields = record.as_object().ok_or_else(|| {
            RestError::UnsupportedShape(format!(
                "expected an array of objects, record {} is {}",
                index,
                value_kind(record)
            ))
        })?;

        if fields.len() != header.len() || !header.iter().all(|k| fields.contains_key(*k)) {
            return Err(RestError::UnsupportedShape(format!(
                "record {} does not match the header keys of record 0",
                index
            )));
        }

        let row: Vec<String> = header
            .iter()
            .map(|key| render_cell(&fields[*key]))
            .collect();
        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|e| RestError::Io(std::io::Error::other(e.to_string())))
}

/// Render a single CSV cell: strings raw, null empty, scalars via their
/// JSON text, nested values as compact JSON.
fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
