//! Concrete output formatters.

use serde::Serialize;

use super::OutputFormatter;
use crate::error::{Error, Result};
use crate::provider::ItemKind;
use crate::resolver::{Existence, ResolvedItem};

/// Formatter printing one path per line.
pub struct LinesFormatter;

impl OutputFormatter for LinesFormatter {
    fn format(&self, items: &[ResolvedItem], as_native: bool) -> Result<String> {
        Ok(items
            .iter()
            .map(|item| item.render(as_native))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// Formatter for JSON output.
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonItem<'a> {
    path: String,
    provider: &'a str,
    native: &'a str,
    leaf: &'a str,
    kind: ItemKind,
    existence: Existence,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, items: &[ResolvedItem], as_native: bool) -> Result<String> {
        let records: Vec<JsonItem<'_>> = items
            .iter()
            .map(|item| JsonItem {
                path: item.render(as_native),
                provider: item.path.provider(),
                native: item.native(),
                leaf: &item.leaf,
                kind: item.kind,
                existence: item.existence,
            })
            .collect();

        serde_json::to_string_pretty(&records).map_err(|e| Error::Validation {
            field: "json_output".to_string(),
            message: format!("failed to serialize to JSON: {e}"),
        })
    }
}
