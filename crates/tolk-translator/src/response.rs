//! Parser for the endpoint's nested-array body.
//!
//! The shape is undocumented and loose: `[[["frag", "src", ...], ...], null, "detected", ...]`.
//! Missing indices inside a sentence are "no data"; a missing or malformed sentence list
//! is a parse failure.

use serde_json::Value;

use crate::error::TranslationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTranslation {
    pub text: String,
    pub detected_source_lang: Option<String>,
}

pub fn parse_response(body: &str) -> Result<ParsedTranslation, TranslationError> {
    let json: Value = serde_json::from_str(body)
        .map_err(|e| TranslationError::parse_failure(format!("invalid JSON: {e}")))?;

    parse_value(&json)
}

pub fn parse_value(json: &Value) -> Result<ParsedTranslation, TranslationError> {
    let top = json
        .as_array()
        .ok_or_else(|| TranslationError::parse_failure("top level is not an array"))?;

    let sentences = top
        .first()
        .ok_or_else(|| TranslationError::parse_failure("top level array is empty"))?
        .as_array()
        .ok_or_else(|| TranslationError::parse_failure("sentence list is not an array"))?;

    let text: String = sentences
        .iter()
        .filter_map(|sentence| sentence.get(0).and_then(Value::as_str))
        .collect();

    let detected_source_lang = top
        .get(2)
        .and_then(Value::as_str)
        .filter(|code| !code.is_empty())
        .map(str::to_string);

    Ok(ParsedTranslation {
        text,
        detected_source_lang,
    })
}
