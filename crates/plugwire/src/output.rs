use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use serde_json::Value;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// Print any serializable result in the requested format.
pub fn print_output<T: Serialize>(out: &T, format: OutputFormat) {
    let value = serde_json::to_value(out).unwrap_or(Value::Null);
    print_value(&value, format);
}

pub fn print_value(value: &Value, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
            );
        }
        OutputFormat::Pretty => {
            println!(
                "{}",
                serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
            );
        }
        OutputFormat::Table => match value {
            Value::Object(map) => {
                let mut table = Table::new();
                table
                    .load_preset(UTF8_FULL)
                    .set_content_arrangement(ContentArrangement::Dynamic)
                    .set_header(vec!["FIELD", "VALUE"]);
                for (key, field) in map {
                    table.add_row(vec![key.clone(), cell(field)]);
                }
                println!("{table}");
            }
            scalar => println!("{}", cell(scalar)),
        },
        OutputFormat::Raw => {
            let mut text = cell(value);
            text.push('\n');
            print_raw(text.as_bytes());
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

/// Strings print bare, everything else as compact JSON.
fn cell(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
