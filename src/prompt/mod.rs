//! Chat prompt templates with named placeholders.
//!
//! A template is an ordered list of parts. Message parts hold content with
//! `{name}` placeholders; `{{` and `}}` produce literal braces. Placeholder
//! parts splice a named list of messages, such as conversation history.

use crate::error::{ParleyError, Result};
use crate::llm::{Message, Role};
use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{\{|\}\}|\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
    })
}

/// Values substituted into a template.
#[derive(Debug, Clone, Default)]
pub struct PromptValues {
    text: HashMap<String, String>,
    messages: HashMap<String, Vec<Message>>,
}

impl PromptValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a text variable.
    pub fn text(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.text.insert(name.into(), value.to_string());
        self
    }

    /// Set a message list for a placeholder part.
    pub fn messages(mut self, name: impl Into<String>, messages: Vec<Message>) -> Self {
        self.messages.insert(name.into(), messages);
        self
    }

    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.text.get(name).map(String::as_str)
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for PromptValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |values, (name, value)| values.text(name, value))
    }
}

/// One part of a chat prompt template.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptPart {
    /// A role-tagged message whose content may contain `{name}` placeholders.
    Message { role: Role, template: String },
    /// Splices the named message list in place.
    Placeholder(String),
}

/// An ordered chat prompt template.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatPromptTemplate {
    parts: Vec<PromptPart>,
}

impl ChatPromptTemplate {
    pub fn from_parts(parts: Vec<PromptPart>) -> Self {
        Self { parts }
    }

    /// Build a template from `(role, template)` pairs.
    pub fn from_messages<S: Into<String>>(messages: impl IntoIterator<Item = (Role, S)>) -> Self {
        Self::from_parts(
            messages
                .into_iter()
                .map(|(role, template)| PromptPart::Message {
                    role,
                    template: template.into(),
                })
                .collect(),
        )
    }

    /// Append a message part.
    pub fn with_message(mut self, role: Role, template: impl Into<String>) -> Self {
        self.parts.push(PromptPart::Message {
            role,
            template: template.into(),
        });
        self
    }

    /// Append a message-list placeholder part.
    pub fn with_placeholder(mut self, name: impl Into<String>) -> Self {
        self.parts.push(PromptPart::Placeholder(name.into()));
        self
    }

    pub fn parts(&self) -> &[PromptPart] {
        &self.parts
    }

    /// Names referenced by the template, sorted.
    pub fn input_variables(&self) -> Vec<String> {
        let mut names = BTreeSet::new();
        for part in &self.parts {
            match part {
                PromptPart::Message { template, .. } => {
                    for caps in token_pattern().captures_iter(template) {
                        if let Some(name) = caps.get(1) {
                            names.insert(name.as_str().to_string());
                        }
                    }
                }
                PromptPart::Placeholder(name) => {
                    names.insert(name.clone());
                }
            }
        }
        names.into_iter().collect()
    }

    /// Render into messages, failing with `MissingVariable` for any name
    /// absent from `values`. Extra values are ignored.
    pub fn render(&self, values: &PromptValues) -> Result<Vec<Message>> {
        let mut rendered = Vec::with_capacity(self.parts.len());

        for part in &self.parts {
            match part {
                PromptPart::Message { role, template } => {
                    rendered.push(Message::new(*role, render_template(template, values)?));
                }
                PromptPart::Placeholder(name) => {
                    let messages = values
                        .messages
                        .get(name)
                        .ok_or_else(|| ParleyError::MissingVariable(name.clone()))?;
                    rendered.extend(messages.iter().cloned());
                }
            }
        }

        Ok(rendered)
    }
}

/// Substitute `{name}` placeholders in a single template string.
pub fn render_template(template: &str, values: &PromptValues) -> Result<String> {
    let mut output = String::with_capacity(template.len());
    let mut last = 0;

    for caps in token_pattern().captures_iter(template) {
        let Some(token) = caps.get(0) else { continue };
        output.push_str(&template[last..token.start()]);

        match caps.get(1) {
            Some(name) => {
                let value = values
                    .get_text(name.as_str())
                    .ok_or_else(|| ParleyError::MissingVariable(name.as_str().to_string()))?;
                output.push_str(value);
            }
            None => output.push_str(&token.as_str()[..1]),
        }

        last = token.end();
    }

    output.push_str(&template[last..]);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn explain_template() -> ChatPromptTemplate {
        ChatPromptTemplate::from_messages([
            (
                Role::System,
                "You are a helpful assistant who explains things simply for a {audience}.",
            ),
            (Role::Human, "Explain {topic} in {num_sentences} sentences."),
        ])
    }

    #[test]
    fn test_render_substitutes_all_placeholders() {
        let values: PromptValues = [
            ("audience", "5-year-old"),
            ("topic", "how the internet works"),
            ("num_sentences", "3"),
        ]
        .into_iter()
        .collect();

        let messages = explain_template().render(&values).unwrap();

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(
            messages[0].content,
            "You are a helpful assistant who explains things simply for a 5-year-old."
        );
        assert_eq!(messages[1].content, "Explain how the internet works in 3 sentences.");
        for message in &messages {
            assert!(!message.content.contains('{') && !message.content.contains('}'));
        }
    }

    #[test]
    fn test_missing_variable() {
        let values = PromptValues::new()
            .text("audience", "engineer")
            .text("topic", "DNS");

        let err = explain_template().render(&values).unwrap_err();
        assert!(matches!(err, ParleyError::MissingVariable(ref name) if name == "num_sentences"));
    }

    #[test]
    fn test_unused_values_are_ignored() {
        let template = ChatPromptTemplate::from_messages([(Role::Human, "Fact about {animal}.")]);
        let values = PromptValues::new()
            .text("animal", "octopus")
            .text("unused", "ignored");

        let messages = template.render(&values).unwrap();
        assert_eq!(messages[0].content, "Fact about octopus.");
    }

    #[test]
    fn test_escaped_braces_render_literally() {
        let template = ChatPromptTemplate::from_messages([(
            Role::System,
            r#"Respond like {{"animal": "{animal}"}}"#,
        )]);
        let messages = template
            .render(&PromptValues::new().text("animal", "dolphin"))
            .unwrap();
        assert_eq!(messages[0].content, r#"Respond like {"animal": "dolphin"}"#);
    }

    #[test]
    fn test_substituted_values_are_not_rescanned() {
        let template = ChatPromptTemplate::from_messages([(Role::Human, "{question}")]);
        let messages = template
            .render(&PromptValues::new().text("question", "what is {context}?"))
            .unwrap();
        assert_eq!(messages[0].content, "what is {context}?");
    }

    #[test]
    fn test_placeholder_splices_history() {
        let template = ChatPromptTemplate::from_messages([(Role::System, "You are Buddy.")])
            .with_placeholder("chat_history")
            .with_message(Role::Human, "{input}");

        let history = vec![Message::human("Hi! My name is Alex."), Message::assistant("Hi Alex!")];
        let values = PromptValues::new()
            .messages("chat_history", history.clone())
            .text("input", "What's my name?");

        let messages = template.render(&values).unwrap();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[1..3], history[..]);
        assert_eq!(messages[3], Message::human("What's my name?"));

        let err = template
            .render(&PromptValues::new().text("input", "hi"))
            .unwrap_err();
        assert!(matches!(err, ParleyError::MissingVariable(ref name) if name == "chat_history"));
    }

    #[test]
    fn test_input_variables() {
        let template = explain_template().with_placeholder("chat_history");
        assert_eq!(
            template.input_variables(),
            vec!["audience", "chat_history", "num_sentences", "topic"]
        );
    }
}
