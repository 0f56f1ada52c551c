//! Wire records exchanged with the therapy backend.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Session identifiers arrive as integers, but some endpoints send them as
/// numeric strings.
fn deserialize_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a numeric string")
        }

        fn visit_i64<E>(self, value: i64) -> Result<i64, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<i64, E>
        where
            E: de::Error,
        {
            i64::try_from(value).map_err(|_| E::custom(format!("id {} out of range", value)))
        }

        fn visit_str<E>(self, value: &str) -> Result<i64, E>
        where
            E: de::Error,
        {
            value
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid id: {:?}", value)))
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

/// `null` and missing both become the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A chat session as listed by `GET /Chats/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Assistant mode, e.g. `therapy`.
    #[serde(rename = "AiMode", default, deserialize_with = "null_as_default")]
    pub ai_mode: String,
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// Body of `POST /Chats/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewChatSession {
    pub title: String,
    #[serde(rename = "AiMode")]
    pub ai_mode: String,
}

/// One session's stored transcript, from `GET /ChatData/`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatHistory {
    #[serde(deserialize_with = "deserialize_id")]
    pub chat: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Vec<HistoryEntry>,
}

impl ChatHistory {
    /// The transcript in display form.
    pub fn display_messages(&self) -> Vec<DisplayMessage> {
        self.content.iter().map(DisplayMessage::from).collect()
    }
}

/// A stored transcript entry. Older records carry the text in `message`,
/// newer ones in `content`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct HistoryEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// A transcript line ready to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayMessage {
    pub role: String,
    pub content: String,
}

impl DisplayMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == "user"
    }
}

impl From<&HistoryEntry> for DisplayMessage {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            role: entry.role.clone(),
            content: entry
                .message
                .clone()
                .or_else(|| entry.content.clone())
                .unwrap_or_default(),
        }
    }
}

/// Body of `POST /ChatData/continue_chat/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContinueChatRequest {
    #[serde(rename = "ChatID")]
    pub chat_id: i64,
    pub prompt: String,
    pub mode: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContinueChatResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub response: String,
}

/// A team and its members, from `GET /TeamMembers/`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TeamRoster {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub teamname: String,
    /// Member records; their shape is not fixed by the backend.
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Vec<serde_json::Value>,
}

impl TeamRoster {
    /// Member entries as display text. Strings are shown as-is.
    pub fn member_labels(&self) -> Vec<String> {
        self.content
            .iter()
            .map(|member| match member {
                serde_json::Value::String(name) => name.clone(),
                other => other.to_string(),
            })
            .collect()
    }
}

/// A problem record, from `GET /Problems/`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Problem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_history_remap_message_shape() {
        let history: ChatHistory = serde_json::from_value(json!({
            "chat": 7,
            "content": [{"role": "user", "message": "hi"}]
        }))
        .unwrap();

        assert_eq!(history.display_messages(), vec![DisplayMessage::user("hi")]);
    }

    #[test]
    fn test_history_remap_content_shape_is_stable() {
        let history: ChatHistory = serde_json::from_value(json!({
            "chat": 7,
            "content": [{"role": "user", "content": "hi"}]
        }))
        .unwrap();

        assert_eq!(history.display_messages(), vec![DisplayMessage::user("hi")]);
    }

    #[test]
    fn test_malformed_history_is_tolerated() {
        let missing: ChatHistory = serde_json::from_value(json!({"chat": 3})).unwrap();
        assert!(missing.display_messages().is_empty());

        let null: ChatHistory =
            serde_json::from_value(json!({"chat": 3, "content": null})).unwrap();
        assert!(null.display_messages().is_empty());

        let blank: ChatHistory = serde_json::from_value(json!({
            "chat": 3,
            "content": [{"role": "assistant"}, {"role": "user", "message": null}]
        }))
        .unwrap();
        assert_eq!(
            blank.display_messages(),
            vec![DisplayMessage::assistant(""), DisplayMessage::user("")]
        );
    }

    #[test]
    fn test_session_wire_names() {
        let session: ChatSession = serde_json::from_value(json!({
            "id": "12",
            "title": "Anxiety about work",
            "AiMode": "therapy",
            "last_updated": "2024-03-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(session.id, 12);
        assert_eq!(session.ai_mode, "therapy");

        let body = serde_json::to_value(NewChatSession {
            title: "t".to_string(),
            ai_mode: "therapy".to_string(),
        })
        .unwrap();
        assert_eq!(body, json!({"title": "t", "AiMode": "therapy"}));
    }

    #[test]
    fn test_bad_id_is_rejected() {
        let result = serde_json::from_value::<ChatSession>(json!({"id": "abc"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_continue_chat_body() {
        let body = serde_json::to_value(ContinueChatRequest {
            chat_id: 7,
            prompt: "hello".to_string(),
            mode: "therapy".to_string(),
        })
        .unwrap();
        assert_eq!(body, json!({"ChatID": 7, "prompt": "hello", "mode": "therapy"}));
    }

    #[test]
    fn test_roster_member_labels() {
        let roster: TeamRoster = serde_json::from_value(json!({
            "id": 1,
            "teamname": "Blue",
            "content": ["ana", {"name": "bo"}]
        }))
        .unwrap();
        assert_eq!(roster.member_labels(), vec!["ana".to_string(), r#"{"name":"bo"}"#.to_string()]);
    }
}
