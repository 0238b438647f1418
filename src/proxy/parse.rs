//! Coerce a free-text model reply into a list of alternatives
//!
//! The model is asked for `{"alternatives": [...]}` but does not always
//! comply. Fallback order:
//!
//! 1. Greedy `{ ... }` substring parsed as JSON, `alternatives` read from it
//!    (absent field means an empty list).
//! 2. No brace substring at all: one alternative per non-blank line.
//! 3. Brace substring that fails to parse: one alternative per non-blank line,
//!    skipping lines that open or close an object.
//!
//! Every path strips leading list markers, trims, drops empty entries and
//! keeps at most `count`. An empty result is [`ProxyError::NoAlternativesProduced`].

use crate::error::ProxyError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

static JSON_OBJECT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[\s\S]*\}").expect("valid regex"));

static LIST_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\d.\-*]+\s*").expect("valid regex"));

#[derive(Debug, Deserialize)]
struct StructuredReply {
    #[serde(default)]
    alternatives: Option<Vec<Value>>,
}

/// Parse `content` into at most `count` alternatives
pub fn parse_alternatives(content: &str, count: usize) -> Result<Vec<String>, ProxyError> {
    let candidates = match JSON_OBJECT.find(content) {
        Some(found) => match serde_json::from_str::<StructuredReply>(found.as_str()) {
            Ok(reply) => reply
                .alternatives
                .unwrap_or_default()
                .into_iter()
                .filter_map(|value| value.as_str().map(str::to_string))
                .collect(),
            Err(e) => {
                tracing::debug!(error = %e, "model reply is not valid JSON, reading lines");
                lines(content, true)
            }
        },
        None => {
            tracing::debug!("model reply has no JSON object, reading lines");
            lines(content, false)
        }
    };

    let alternatives: Vec<String> = candidates
        .into_iter()
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .take(count)
        .collect();

    if alternatives.is_empty() {
        return Err(ProxyError::NoAlternativesProduced);
    }

    Ok(alternatives)
}

fn lines(content: &str, skip_braces: bool) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !(skip_braces && (line.starts_with('{') || line.starts_with('}'))))
        .map(strip_list_marker)
        .collect()
}

/// Drop a leading `1.`, `-`, `*` style marker
pub fn strip_list_marker(line: &str) -> String {
    LIST_MARKER.replace(line, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_json_reply() {
        let result = parse_alternatives(r#"{"alternatives":["A","B","C"]}"#, 3).unwrap();
        assert_eq!(result, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_json_wrapped_in_prose_and_fences() {
        let content = "Here you go:\n```json\n{\"alternatives\": [\"Rent downtown\", \"Buy in the suburbs\"]}\n```";
        let result = parse_alternatives(content, 3).unwrap();
        assert_eq!(result, vec!["Rent downtown", "Buy in the suburbs"]);
    }

    #[test]
    fn test_json_reply_truncated_to_count() {
        let content = r#"{"alternatives":["A","B","C","D","E"]}"#;
        assert_eq!(parse_alternatives(content, 2).unwrap(), vec!["A", "B"]);
    }

    #[test]
    fn test_json_entries_trimmed_and_blank_dropped() {
        let content = r#"{"alternatives":["  A  ", "", "   ", "B", 42]}"#;
        assert_eq!(parse_alternatives(content, 5).unwrap(), vec!["A", "B"]);
    }

    #[test]
    fn test_numbered_lines_without_json() {
        let result = parse_alternatives("1. Option A\n2. Option B\n", 2).unwrap();
        assert_eq!(result, vec!["Option A", "Option B"]);
    }

    #[test]
    fn test_plain_lines_keep_order_and_limit() {
        let content = "\n- Take the job offer\n\n* Stay and negotiate a raise\n- Freelance for a year\n";
        let result = parse_alternatives(content, 2).unwrap();
        assert_eq!(result, vec!["Take the job offer", "Stay and negotiate a raise"]);
    }

    #[test]
    fn test_malformed_json_without_usable_lines() {
        let err = parse_alternatives("{not json}", 3).unwrap_err();
        assert!(matches!(err, ProxyError::NoAlternativesProduced));
    }

    #[test]
    fn test_malformed_json_falls_back_to_lines_without_braces() {
        let content = "Sure!\n{\n1. Alpha\n2. Beta\n}";
        let result = parse_alternatives(content, 3).unwrap();
        assert_eq!(result, vec!["Sure!", "Alpha", "Beta"]);
    }

    #[test]
    fn test_missing_field_yields_nothing() {
        let err = parse_alternatives(r#"{"options": ["A"]}"#, 3).unwrap_err();
        assert!(matches!(err, ProxyError::NoAlternativesProduced));
    }

    #[test]
    fn test_non_array_field_is_treated_as_malformed() {
        let err = parse_alternatives(r#"{"alternatives": "A"}"#, 3).unwrap_err();
        assert!(matches!(err, ProxyError::NoAlternativesProduced));
    }

    #[test]
    fn test_strip_list_marker() {
        assert_eq!(strip_list_marker("12. Twelve"), "Twelve");
        assert_eq!(strip_list_marker("- dash"), "dash");
        assert_eq!(strip_list_marker("** bold-ish"), "bold-ish");
        assert_eq!(strip_list_marker("No marker"), "No marker");
        assert_eq!(strip_list_marker("1."), "");
    }
}
