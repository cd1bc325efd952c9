//! Explain command implementation.

use super::{ensure_ready, CREATIVE_TEMPERATURE};
use crate::cli::preflight::Operation;
use crate::cli::Output;
use crate::config::Settings;
use crate::llm::Role;
use crate::orchestrator::Orchestrator;
use crate::output::{OutputParser, StrOutputParser};
use crate::prompt::ChatPromptTemplate;
use anyhow::Result;

/// Template used for every audience; only the values change between calls.
pub(crate) fn explain_template() -> ChatPromptTemplate {
    ChatPromptTemplate::from_messages([
        (
            Role::System,
            "You are a helpful assistant who explains things simply for a {audience}.",
        ),
        (Role::Human, "Explain {topic} in {num_sentences} sentences."),
    ])
}

/// Explain a topic once per audience, reusing one template.
pub async fn run_explain(
    audiences: &[String],
    topic: &str,
    sentences: u32,
    mut settings: Settings,
) -> Result<()> {
    settings.llm.default_temperature(CREATIVE_TEMPERATURE);
    ensure_ready(Operation::Generate, &settings)?;

    let orchestrator = Orchestrator::new(settings)?;
    let template = explain_template();

    for audience in audiences {
        let values = orchestrator
            .prompts()
            .values()
            .text("audience", audience)
            .text("topic", topic)
            .text("num_sentences", sentences);

        let spinner = Output::spinner(&format!("Explaining for a {}...", audience));
        let result = orchestrator.invoke(&template, &values).await;
        spinner.finish_and_clear();

        Output::header(&format!("Explanation for a {}", audience));
        println!("{}", StrOutputParser.parse(&result?.text)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::PromptValues;

    #[test]
    fn test_template_renders_for_each_audience() {
        let template = explain_template();
        assert_eq!(
            template.input_variables(),
            vec!["audience", "num_sentences", "topic"]
        );

        for audience in ["5-year-old", "senior software engineer"] {
            let values = PromptValues::new()
                .text("audience", audience)
                .text("topic", "how the internet works")
                .text("num_sentences", 3);
            let messages = template.render(&values).unwrap();
            assert!(messages[0].content.ends_with(&format!("for a {}.", audience)));
            assert_eq!(messages[1].content, "Explain how the internet works in 3 sentences.");
        }
    }
}
