//! Output parsers that turn generated text into plain strings or JSON.

use crate::error::{ParleyError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Trait for turning generated text into a typed value.
pub trait OutputParser {
    type Output;

    fn parse(&self, text: &str) -> Result<Self::Output>;
}

/// Returns the generated text unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrOutputParser;

impl OutputParser for StrOutputParser {
    type Output = String;

    fn parse(&self, text: &str) -> Result<String> {
        Ok(text.to_string())
    }
}

/// Parses generated text as JSON.
///
/// A single surrounding markdown code fence is accepted; nothing else is
/// repaired. The optional schema hint is only used to instruct the model.
#[derive(Debug, Clone, Default)]
pub struct JsonOutputParser {
    schema_hint: Option<String>,
}

impl JsonOutputParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Describe the expected shape, e.g. `keys 'animal' and 'facts' (a list of strings)`.
    pub fn with_schema_hint(mut self, hint: impl Into<String>) -> Self {
        self.schema_hint = Some(hint.into());
        self
    }

    /// Instruction text to include in a system prompt.
    pub fn format_instructions(&self) -> String {
        let base = "Always respond in valid JSON format. No markdown, no code fences, just raw JSON.";
        match &self.schema_hint {
            Some(hint) => format!("{} Return JSON with {}.", base, hint),
            None => base.to_string(),
        }
    }

    /// Parse and deserialize into a concrete type.
    pub fn parse_into<T: DeserializeOwned>(&self, text: &str) -> Result<T> {
        let value = self.parse(text)?;
        serde_json::from_value(value).map_err(|e| {
            ParleyError::MalformedOutput(format!("JSON does not match expected shape: {}", e))
        })
    }
}

impl OutputParser for JsonOutputParser {
    type Output = Value;

    fn parse(&self, text: &str) -> Result<Value> {
        let body = strip_code_fence(text.trim());
        serde_json::from_str(body).map_err(|e| {
            let preview: String = text.chars().take(200).collect();
            ParleyError::MalformedOutput(format!("{}. Response was: {}", e, preview))
        })
    }
}

/// Remove a surrounding ```` ``` ```` or ```` ```json ```` fence, if present.
fn strip_code_fence(text: &str) -> &str {
    let Some(inner) = text.strip_prefix("```") else {
        return text;
    };
    let Some(inner) = inner.strip_suffix("```") else {
        return text;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct AnimalFacts {
        animal: String,
        facts: Vec<String>,
    }

    #[test]
    fn test_str_parser_is_identity() {
        let text = "  An octopus has three hearts.\n";
        assert_eq!(StrOutputParser.parse(text).unwrap(), text);
    }

    #[test]
    fn test_json_parser_structured_output() {
        let value = JsonOutputParser::new()
            .parse(r#"{"animal":"dolphin","facts":["a","b","c"]}"#)
            .unwrap();

        assert_eq!(value["animal"], "dolphin");
        let facts = value["facts"].as_array().unwrap();
        assert_eq!(facts.len(), 3);
        assert_eq!(facts[0], "a");
        assert_eq!(facts[2], "c");
    }

    #[test]
    fn test_json_parser_rejects_plain_text() {
        let err = JsonOutputParser::new().parse("not json").unwrap_err();
        assert!(matches!(err, ParleyError::MalformedOutput(_)));
    }

    #[test]
    fn test_json_parser_accepts_code_fence() {
        let text = "```json\n{\"animal\": \"dolphin\", \"facts\": []}\n```";
        let value = JsonOutputParser::new().parse(text).unwrap();
        assert_eq!(value["animal"], "dolphin");
    }

    #[test]
    fn test_json_parser_does_not_repair_surrounding_prose() {
        let text = "Here you go: {\"animal\": \"dolphin\"}";
        assert!(JsonOutputParser::new().parse(text).is_err());
    }

    #[test]
    fn test_parse_into_typed() {
        let parser = JsonOutputParser::new();
        let facts: AnimalFacts = parser
            .parse_into(r#"{"animal":"dolphin","facts":["a","b","c"]}"#)
            .unwrap();
        assert_eq!(facts.animal, "dolphin");
        assert_eq!(facts.facts, vec!["a", "b", "c"]);

        let err = parser.parse_into::<AnimalFacts>(r#"{"animal":"dolphin"}"#).unwrap_err();
        assert!(matches!(err, ParleyError::MalformedOutput(_)));
    }

    #[test]
    fn test_format_instructions_include_hint() {
        let parser = JsonOutputParser::new().with_schema_hint("keys 'animal' and 'facts'");
        let instructions = parser.format_instructions();
        assert!(instructions.starts_with("Always respond in valid JSON"));
        assert!(instructions.ends_with("Return JSON with keys 'animal' and 'facts'."));
    }
}
