//! Facts command implementation.

use super::{ensure_ready, GROUNDED_TEMPERATURE};
use crate::cli::preflight::Operation;
use crate::cli::Output;
use crate::config::Settings;
use crate::llm::Role;
use crate::orchestrator::Orchestrator;
use crate::output::{JsonOutputParser, OutputParser, StrOutputParser};
use crate::prompt::ChatPromptTemplate;
use anyhow::Result;
use serde::Deserialize;

/// Shape requested from the model in JSON mode.
#[derive(Debug, Deserialize, PartialEq)]
pub(crate) struct AnimalFacts {
    pub animal: String,
    pub facts: Vec<String>,
}

pub(crate) fn json_parser() -> JsonOutputParser {
    JsonOutputParser::new().with_schema_hint("keys 'animal' and 'facts' (a list of strings)")
}

pub(crate) fn json_template(parser: &JsonOutputParser) -> ChatPromptTemplate {
    ChatPromptTemplate::from_messages([
        (Role::System, parser.format_instructions()),
        (Role::Human, "Give me 3 fun facts about {animal}.".to_string()),
    ])
}

/// Ask for a plain-text fact, then for structured facts parsed from JSON.
pub async fn run_facts(animal: &str, json_animal: &str, mut settings: Settings) -> Result<()> {
    settings.llm.default_temperature(GROUNDED_TEMPERATURE);
    ensure_ready(Operation::Generate, &settings)?;

    let orchestrator = Orchestrator::new(settings)?;

    Output::header("Plain text");
    let template =
        ChatPromptTemplate::from_messages([(Role::Human, "Give me a fun fact about {animal}.")]);
    let values = orchestrator.prompts().values().text("animal", animal);
    let completion = orchestrator.invoke(&template, &values).await?;
    println!("{}", StrOutputParser.parse(&completion.text)?);

    Output::header("JSON");
    let parser = json_parser();
    let values = orchestrator.prompts().values().text("animal", json_animal);
    let completion = orchestrator.invoke(&json_template(&parser), &values).await?;

    match parser.parse_into::<AnimalFacts>(&completion.text) {
        Ok(facts) => {
            Output::kv("animal", &facts.animal);
            for (i, fact) in facts.facts.iter().enumerate() {
                println!("  {}. {}", i + 1, fact);
            }
        }
        Err(e) => {
            Output::error(&format!("Model did not return the expected JSON: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::PromptValues;

    #[test]
    fn test_json_prompt_carries_format_instructions() {
        let parser = json_parser();
        let messages = json_template(&parser)
            .render(&PromptValues::new().text("animal", "dolphin"))
            .unwrap();

        assert!(messages[0].content.starts_with("Always respond in valid JSON format."));
        assert!(messages[0].content.contains("'facts' (a list of strings)"));
        assert_eq!(messages[1].content, "Give me 3 fun facts about dolphin.");
    }

    #[test]
    fn test_parses_animal_facts() {
        let reply = r#"{"animal": "dolphin", "facts": ["a", "b", "c"]}"#;
        let facts: AnimalFacts = json_parser().parse_into(reply).unwrap();
        assert_eq!(facts.animal, "dolphin");
        assert_eq!(facts.facts.len(), 3);

        assert!(json_parser().parse_into::<AnimalFacts>(r#"{"animal": "dolphin"}"#).is_err());
    }
}
