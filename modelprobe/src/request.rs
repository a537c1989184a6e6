use modelprobe_llm::{Content, Message, ResponseRequest};

use crate::overrides::PromptOverrides;

pub const PROMPT_TEXT: &str =
    "What model are you, and what application are you currently being used inside of?";

/// The fixed `[system, user]` probe conversation with storage disabled.
///
/// Without a system-prompt override the system message is still sent, just
/// without a `content` field.
pub fn build_probe_request(model: &str, overrides: &PromptOverrides) -> ResponseRequest {
    let system = match &overrides.system_prompt {
        Some(prompt) => Message::system(prompt.as_str()),
        None => Message::empty_system(),
    };
    let user = Message::human(Content::input_text(PROMPT_TEXT));

    ResponseRequest::new(model, vec![system, user])
        .with_store(false)
        .with_instructions(overrides.instructions.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_without_overrides() {
        let request = build_probe_request("gpt-5", &PromptOverrides::default());

        assert_eq!(request.model, "gpt-5");
        assert!(!request.store);
        assert!(request.instructions.is_none());
        assert_eq!(request.input.len(), 2);
        assert_eq!(request.input[0], Message::empty_system());
        assert_eq!(request.input[1].role(), "user");
        assert_eq!(
            request.input[1].content().and_then(Content::as_text),
            Some(PROMPT_TEXT)
        );
    }

    #[test]
    fn test_request_with_overrides() {
        let overrides = PromptOverrides {
            instructions: Some("Follow the house rules.".to_string()),
            system_prompt: Some("You are terse.".to_string()),
        };
        let request = build_probe_request("gpt-5-codex", &overrides);

        assert_eq!(request.model, "gpt-5-codex");
        assert_eq!(request.instructions.as_deref(), Some("Follow the house rules."));
        assert_eq!(request.input[0], Message::system("You are terse."));
        assert_eq!(request.input[0].role(), "system");
        assert!(!request.store);
    }
}
