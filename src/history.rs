use crate::data_models::ChatEntry;

/// Number of trailing turns included in the prompt, to keep token usage bounded.
const HISTORY_WINDOW: usize = 10;

pub const NO_HISTORY: &str = "No previous conversation.";

/// Renders the last ten turns as a flat text block, one "<Role>: <text>" line
/// per turn in original order. Entries that do not match the expected shape
/// are rendered as compact JSON rather than dropped.
pub fn format_chat_history(history: &[ChatEntry]) -> String {
    if history.is_empty() {
        return NO_HISTORY.to_string();
    }

    let start = history.len().saturating_sub(HISTORY_WINDOW);
    history[start..]
        .iter()
        .map(|entry| match entry {
            ChatEntry::Message(m) => {
                let role = if m.sender == "user" { "User" } else { "Assistant" };
                format!("{role}: {}", m.text)
            }
            ChatEntry::Other(value) => value.to_string(),
        })
        .collect::<Vec<String>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_models::ChatMessage;

    fn turn(sender: &str, text: &str) -> ChatEntry {
        ChatEntry::Message(ChatMessage {
            sender: sender.to_string(),
            text: text.to_string(),
        })
    }

    #[test]
    fn test_empty_history_sentinel() {
        assert_eq!(format_chat_history(&[]), NO_HISTORY);
    }

    #[test]
    fn test_role_labels() {
        let history = vec![turn("user", "hello"), turn("assistant", "hi")];
        assert_eq!(format_chat_history(&history), "User: hello\nAssistant: hi");
    }

    #[test]
    fn test_unknown_sender_maps_to_assistant() {
        let history = vec![turn("bot", "beep")];
        assert_eq!(format_chat_history(&history), "Assistant: beep");
    }

    #[test]
    fn test_window_keeps_last_ten_in_order() {
        let history: Vec<ChatEntry> = (0..12).map(|i| turn("user", &format!("m{i}"))).collect();
        let out = format_chat_history(&history);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "User: m2");
        assert_eq!(lines[9], "User: m11");
        assert!(!out.contains(NO_HISTORY));
    }

    #[test]
    fn test_malformed_entry_rendered_not_dropped() {
        let history = vec![
            turn("user", "hello"),
            ChatEntry::Other(serde_json::json!({"note": "odd"})),
        ];
        let out = format_chat_history(&history);
        assert!(out.contains("User: hello"));
        assert!(out.contains("odd"));
    }
}
