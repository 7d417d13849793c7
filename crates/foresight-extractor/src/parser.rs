//! Parse oracle replies into forward-looking statements

use crate::error::ExtractorError;
use foresight_domain::{FinancialMetric, ForwardLookingStatement};
use serde_json::{Map, Value};
use tracing::{debug, warn};

const STATEMENTS_KEY: &str = "forward_looking_statements";

/// Parse the oracle's reply text
///
/// The reply may wrap the JSON object in prose or a code fence; everything
/// from the first `{` to the last `}` is parsed. A reply without the
/// statements key is a legitimate empty result.
///
/// # Errors
///
/// `InvalidFormat` when the reply holds no JSON object at all, `JsonParse`
/// when the braced region is not valid JSON.
pub fn parse_oracle_reply(reply: &str) -> Result<Vec<ForwardLookingStatement>, ExtractorError> {
    let json_str = extract_json(reply)?;
    let json: Value = serde_json::from_str(json_str)?;

    let Some(entries) = json.get(STATEMENTS_KEY) else {
        debug!("Reply has no '{}' key; treating as empty", STATEMENTS_KEY);
        return Ok(Vec::new());
    };
    let entries = entries.as_array().ok_or_else(|| {
        ExtractorError::InvalidFormat(format!("'{}' is not an array", STATEMENTS_KEY))
    })?;

    let mut statements = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        match parse_statement(entry) {
            Ok(statement) => statements.push(statement),
            Err(e) => warn!("Skipping statement {}: {}", idx, e),
        }
    }

    Ok(statements)
}

/// Slice from the first `{` to the last `}`
fn extract_json(reply: &str) -> Result<&str, ExtractorError> {
    match (reply.find('{'), reply.rfind('}')) {
        (Some(start), Some(end)) if start < end => Ok(&reply[start..=end]),
        _ => Err(ExtractorError::InvalidFormat(
            "Reply contains no JSON object".to_string(),
        )),
    }
}

fn parse_statement(entry: &Value) -> Result<ForwardLookingStatement, String> {
    let obj = entry
        .as_object()
        .ok_or_else(|| "Statement is not a JSON object".to_string())?;

    let raw_category = text_field(obj, "category");
    let category = FinancialMetric::parse(&raw_category)
        .ok_or_else(|| format!("Unknown category '{}'", raw_category))?;

    let mut statement = ForwardLookingStatement::new(category, text_field(obj, "sentence"))
        .with_speaker(text_field(obj, "speaker"));
    for metric in FinancialMetric::ALL {
        statement.values.set(metric, text_field(obj, metric.as_str()));
    }

    Ok(statement)
}

/// Strings as-is, numbers stringified, anything else empty
fn text_field(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
