//! Output rendering: table, JSON, or TOML.

pub mod table;

use anyhow::Result;
use serde::Serialize;

use harborctl_config::{JsonSettings, OutputFormat};

use crate::context::Context;

pub use table::Tabular;

/// Renders a result in the context's output format and prints it to
/// stdout.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render<T: Serialize + Tabular>(ctx: &Context, value: &T) -> Result<()> {
    let text = match ctx.format {
        OutputFormat::Table => value.table(&ctx.config.output.table).to_string(),
        OutputFormat::Json => to_json(value, &ctx.config.output.json)?,
        OutputFormat::Toml => to_toml(value)?,
    };
    println!("{text}");
    Ok(())
}

/// Serializes a value as JSON, honoring indent and key ordering settings.
///
/// With `sort_keys` the value takes a round-trip through
/// `serde_json::Value`, whose object representation keeps keys sorted;
/// without it fields appear in declaration order.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json<T: Serialize>(value: &T, settings: &JsonSettings) -> Result<String> {
    let indent = " ".repeat(settings.indent);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    if settings.sort_keys {
        serde_json::to_value(value)?.serialize(&mut serializer)?;
    } else {
        value.serialize(&mut serializer)?;
    }
    Ok(String::from_utf8(buf)?)
}

/// Serializes a value as TOML.
///
/// TOML has no top-level arrays, so sequences are wrapped under an
/// `items` key.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_toml<T: Serialize>(value: &T) -> Result<String> {
    let value = serde_json::to_value(value)?;
    let value = match value {
        serde_json::Value::Array(items) => serde_json::json!({ "items": items }),
        other => other,
    };
    Ok(toml::to_string_pretty(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use harborctl_client::models::CveAllowlistItem;

    #[derive(Serialize)]
    struct Sample {
        zebra: u32,
        apple: u32,
    }

    #[test]
    fn test_to_json_sorts_keys() {
        let settings = JsonSettings {
            indent: 2,
            sort_keys: true,
        };
        let json = to_json(&Sample { zebra: 1, apple: 2 }, &settings).unwrap();
        let apple = json.find("apple").unwrap();
        let zebra = json.find("zebra").unwrap();
        assert!(apple < zebra);
    }

    #[test]
    fn test_to_json_declaration_order_without_sorting() {
        let settings = JsonSettings {
            indent: 2,
            sort_keys: false,
        };
        let json = to_json(&Sample { zebra: 1, apple: 2 }, &settings).unwrap();
        assert!(json.find("zebra").unwrap() < json.find("apple").unwrap());
    }

    #[test]
    fn test_to_json_honors_indent() {
        let settings = JsonSettings {
            indent: 4,
            sort_keys: true,
        };
        let json = to_json(&Sample { zebra: 1, apple: 2 }, &settings).unwrap();
        assert!(json.contains("\n    \"apple\""));
    }

    #[test]
    fn test_to_toml_wraps_sequences() {
        let items = vec![CveAllowlistItem::new("CVE-2024-1")];
        let rendered = to_toml(&items).unwrap();
        assert!(rendered.contains("[[items]]"));
        assert!(rendered.contains("CVE-2024-1"));
    }
}
