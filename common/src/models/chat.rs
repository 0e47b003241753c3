// common/src/models/chat.rs
use serde::{Deserialize, Deserializer, Serialize};

/// A single chat message as exchanged with the backend chat service.
///
/// `author` carries the caller Identity on the way out; the backend fills in
/// both `author` and `author_name` with the record owner when it appends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub chat: String,
    #[serde(rename = "user", default, skip_serializing_if = "String::is_empty")]
    pub author: String,
    #[serde(rename = "name", default, skip_serializing_if = "String::is_empty")]
    pub author_name: String,
}

impl ChatMessage {
    /// An outbound message carrying only the text and the author Identity
    pub fn outbound(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            chat: text.into(),
            author: author.into(),
            author_name: String::new(),
        }
    }
}

/// A user record as stored by the backend chat service.
///
/// The backend serializes an empty chat log as JSON `null`, so `chats` must
/// accept null and default to an empty vec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub id: String,
    #[serde(
        default,
        deserialize_with = "null_to_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub chats: Vec<ChatMessage>,
}

fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_with_null_chat_log() {
        let user: User =
            serde_json::from_str(r#"{"name":"Dave","id":"abc123","chats":null}"#).unwrap();
        assert_eq!(user.name, "Dave");
        assert!(user.chats.is_empty());
    }

    #[test]
    fn test_user_with_missing_chat_log() {
        let user: User = serde_json::from_str(r#"{"name":"Dave","id":"abc123"}"#).unwrap();
        assert!(user.chats.is_empty());
    }

    #[test]
    fn test_chat_message_wire_names() {
        let message: ChatMessage =
            serde_json::from_str(r#"{"chat":"hello","user":"abc123","name":"Dave"}"#).unwrap();
        assert_eq!(message.chat, "hello");
        assert_eq!(message.author, "abc123");
        assert_eq!(message.author_name, "Dave");
    }

    #[test]
    fn test_outbound_message_omits_empty_fields() {
        let message = ChatMessage::outbound("hello", "abc123");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json, serde_json::json!({"chat": "hello", "user": "abc123"}));
    }
}
