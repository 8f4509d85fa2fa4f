//! Prompt assembly for the retrieval-augmented chat pipeline.
//!
//! Retrieved passage text is joined, brace-escaped, and interpolated into a
//! fixed instructional template; the result leads a message sequence of
//! system instructions, prior turns in original order, and the current
//! question. For history H the sequence length is always |H| + 2.

use crate::domain::{ConversationTurn, Message, MessageRole, RetrievedPassage};

/// Persona and answer-style instructions. `{doc_content}` is the sole slot.
pub const SYSTEM_PROMPT_TEMPLATE: &str = "\
Your name is CoMUI MB-2 Pharmacology Chatbot. You are a Professor specializing in Pharmacology in CoMUI. Answer questions very very elaborately and accurately. Use the following information to answer the user's question:

{doc_content}

Provide very brief accurate and helpful health response based on the provided information and your expertise.";

/// Substituted for `{doc_content}` when retrieval returns zero matches.
pub const NO_CONTEXT_PLACEHOLDER: &str = "No additional information found.";

/// Builds the system message content from retrieved passages.
pub fn build_system_prompt(passages: &[RetrievedPassage]) -> String {
    let doc_content = if passages.is_empty() {
        NO_CONTEXT_PLACEHOLDER.to_string()
    } else {
        let joined = passages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        escape_braces(&joined)
    };

    SYSTEM_PROMPT_TEMPLATE.replace("{doc_content}", &doc_content)
}

/// Composes the full message sequence for one generation call: system
/// instructions, every prior turn in chronological order, then the new
/// question as the final user message.
pub fn assemble_messages(
    question: &str,
    history: &[ConversationTurn],
    passages: &[RetrievedPassage],
) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(Message::new(
        MessageRole::System,
        build_system_prompt(passages),
    ));
    messages.extend(history.iter().map(Message::from));
    messages.push(Message::new(MessageRole::User, question));
    messages
}

/// Doubles curly braces so passage text cannot be read as template
/// placeholders inside the interpolated system prompt.
fn escape_braces(text: &str) -> String {
    text.replace('{', "{{").replace('}', "}}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passage(text: &str) -> RetrievedPassage {
        RetrievedPassage::new(text, 0.9)
    }

    fn turn(role: MessageRole, content: &str) -> ConversationTurn {
        ConversationTurn::new(role, content)
    }

    #[test]
    fn system_prompt_interpolates_joined_passages() {
        let prompt = build_system_prompt(&[passage("aminoglycosides"), passage("beta-lactams")]);

        assert!(prompt.contains("aminoglycosides\nbeta-lactams"));
        assert!(prompt.starts_with("Your name is CoMUI MB-2 Pharmacology Chatbot."));
        assert!(!prompt.contains("{doc_content}"));
    }

    #[test]
    fn empty_retrieval_uses_placeholder_verbatim() {
        let prompt = build_system_prompt(&[]);
        assert!(prompt.contains(NO_CONTEXT_PLACEHOLDER));
    }

    #[test]
    fn braces_in_passages_are_doubled() {
        let prompt = build_system_prompt(&[passage("dose {mg/kg} per {day}")]);

        assert!(prompt.contains("dose {{mg/kg}} per {{day}}"));
        // No single-brace remnant of the passage text survives. The template's
        // own slot is gone, so every brace left comes from escaping.
        let body = prompt
            .split("question:")
            .nth(1)
            .expect("template preserves its surrounding text");
        assert!(!body.replace("{{", "").contains('{'));
        assert!(!body.replace("}}", "").contains('}'));
    }

    #[test]
    fn sequence_is_history_plus_two() {
        let history = vec![
            turn(MessageRole::Assistant, "greeting"),
            turn(MessageRole::User, "q1"),
            turn(MessageRole::Assistant, "a1"),
        ];

        let messages = assemble_messages("q2", &history, &[passage("context")]);

        assert_eq!(messages.len(), history.len() + 2);
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages.last().unwrap().role, MessageRole::User);
        assert_eq!(messages.last().unwrap().content, "q2");
    }

    #[test]
    fn history_order_is_preserved() {
        let history = vec![
            turn(MessageRole::User, "first"),
            turn(MessageRole::Assistant, "second"),
            turn(MessageRole::User, "third"),
        ];

        let messages = assemble_messages("fourth", &history, &[]);

        let contents: Vec<&str> = messages[1..4].iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn empty_history_yields_two_messages() {
        let messages = assemble_messages("q", &[], &[]);
        assert_eq!(messages.len(), 2);
    }
}
