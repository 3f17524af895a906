//! Output rendering
//!
//! Every item is converted to a `serde_json::Value` first, so one renderer
//! serves all commands.

use anyhow::Result;
use clap::ValueEnum;
use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;
use serde_json::Value;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON, one document per item
    Json,
    /// A table with one row per item
    Table,
    /// Plain values, `key: value` lines for objects
    Text,
}

/// Writes command output in the selected format
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    format: OutputFormat,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render `items`. Nothing is written for an empty slice.
    pub fn render<T: Serialize>(&self, out: &mut dyn Write, items: &[T]) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }
        let values = items
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;

        match self.format {
            OutputFormat::Json => {
                for value in &values {
                    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
                }
            }
            OutputFormat::Table => writeln!(out, "{}", table(&values))?,
            OutputFormat::Text => {
                for (i, value) in values.iter().enumerate() {
                    match value {
                        Value::Object(map) => {
                            if i > 0 {
                                writeln!(out)?;
                            }
                            for (key, field) in map {
                                writeln!(out, "{key}: {}", cell_text(field))?;
                            }
                        }
                        other => writeln!(out, "{}", cell_text(other))?,
                    }
                }
            }
        }
        Ok(())
    }
}

/// Build a table from serialized items.
///
/// Objects become rows with one column per key, in first-seen order;
/// anything else becomes a single `Value` column.
pub fn table(values: &[Value]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut columns: Vec<String> = Vec::new();
    for value in values {
        if let Value::Object(map) = value {
            for key in map.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }
    }

    if columns.is_empty() {
        table.set_header(vec![Cell::new("Value")]);
        for value in values {
            table.add_row(vec![Cell::new(cell_text(value))]);
        }
        return table;
    }

    table.set_header(columns.iter().map(Cell::new).collect::<Vec<_>>());
    for value in values {
        let row = columns
            .iter()
            .map(|column| Cell::new(value.get(column).map(cell_text).unwrap_or_default()))
            .collect::<Vec<_>>();
        table.add_row(row);
    }
    table
}

/// Text for a single value: strings unquoted, null empty, nested values as
/// compact JSON
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        _ => value.to_string(),
    }
}
