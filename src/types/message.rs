//! Message envelope exchanged between caller and session

use serde::{Deserialize, Serialize};

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Written by the person in the conversation
    Human,
    /// Produced by the model
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::Human => "human",
            Role::Assistant => "assistant",
        };
        write!(f, "{}", name)
    }
}

/// A single conversation message
///
/// `content` is always present; a payload without it deserializes to empty text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    #[serde(default)]
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Human-authored message
    pub fn human(content: impl Into<String>) -> Self {
        Self::new(Role::Human, content)
    }

    /// Assistant-authored message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_role() {
        assert_eq!(Message::human("hi").role, Role::Human);
        assert!(Message::assistant("hello").is_assistant());
        assert!(!Message::human("hi").is_assistant());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Message::assistant("x")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"x"}"#);
    }

    #[test]
    fn test_missing_content_is_empty() {
        let msg: Message = serde_json::from_str(r#"{"role":"human"}"#).unwrap();
        assert_eq!(msg.role, Role::Human);
        assert_eq!(msg.content, "");
    }

    #[test]
    fn test_unknown_role_rejected() {
        let result: Result<Message, _> = serde_json::from_str(r#"{"role":"system","content":"x"}"#);
        assert!(result.is_err());
    }
}
