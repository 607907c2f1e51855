//! Role-tagged transcript formatting for text-generation backends.

use std::fmt::Write;

use crate::types::{Role, Turn};

const SYSTEM_TAG: &str = "<|system|>";
const END_TAG: &str = "</s>";

/// Serialize a preamble, prior turns and a new user message into one prompt.
///
/// Segments appear in chronological order and the prompt ends with an open
/// assistant tag for the model to complete.
pub fn format_conversation(preamble: &str, history: &[Turn], message: &str) -> String {
    let mut prompt = String::new();
    push_segment(&mut prompt, SYSTEM_TAG, preamble);
    for turn in history {
        push_segment(&mut prompt, turn.role().prompt_tag(), turn.content());
    }
    push_segment(&mut prompt, Role::User.prompt_tag(), message);
    prompt.push_str(Role::Assistant.prompt_tag());
    prompt.push('\n');
    prompt
}

fn push_segment(prompt: &mut String, tag: &str, body: &str) {
    // Writing into a String cannot fail.
    let _ = write!(prompt, "{tag}\n{body}\n{END_TAG}\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_history_has_preamble_user_and_open_assistant() {
        let prompt = format_conversation("Be brief.", &[], "Hello");
        assert_eq!(
            prompt,
            "<|system|>\nBe brief.\n</s>\n<|user|>\nHello\n</s>\n<|assistant|>\n"
        );
    }

    #[test]
    fn history_turns_are_tagged_in_order() {
        let history = vec![Turn::user("Hi"), Turn::assistant("Hello there")];
        let prompt = format_conversation("P", &history, "Skills?");
        assert_eq!(
            prompt,
            "<|system|>\nP\n</s>\n\
             <|user|>\nHi\n</s>\n\
             <|assistant|>\nHello there\n</s>\n\
             <|user|>\nSkills?\n</s>\n\
             <|assistant|>\n"
        );
    }
}
