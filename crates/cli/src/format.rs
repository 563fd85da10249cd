//! Hit list → human/json string formatting.
//!
//! - **Human** (default): one `rank. name score` line per hit
//! - **JSON** (`--json`): `serde_json::to_string_pretty` of the hit array

use quarry_core::{Error, RankedHit};

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Format the ranked hits for one query.
pub fn format_hits(hits: &[RankedHit], mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => {
            serde_json::to_string_pretty(hits).unwrap_or_else(|_| "[]".to_string())
        }
        OutputMode::Human => {
            if hits.is_empty() {
                return "(no matches)".to_string();
            }
            hits.iter()
                .map(|h| format!("{}. {} {:.4}", h.rank, h.name, h.score))
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

/// Format an error.
pub fn format_error(err: &Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(&serde_json::json!({
            "error": err.to_string()
        }))
        .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", err)),
        OutputMode::Human => format!("(error) {}", err),
    }
}
