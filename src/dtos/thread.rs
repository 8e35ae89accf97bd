//! Thread DTOs - Data Transfer Objects per thread e messaggi

use super::{MODEL_ID_RE, non_blank};
use crate::entities::{Message, MessageRole, Thread};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_THREAD_TITLE: &str = "New chat";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThreadDTO {
    pub id: i32,
    pub sidekiq_id: Option<i32>,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Thread> for ThreadDTO {
    fn from(value: Thread) -> Self {
        Self {
            id: value.id,
            sidekiq_id: value.sidekiq_id,
            title: value.title,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MessageDTO {
    pub id: i32,
    pub thread_id: i32,
    pub role: MessageRole,
    pub content: String,
    pub model: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Message> for MessageDTO {
    fn from(value: Message) -> Self {
        Self {
            id: value.id,
            thread_id: value.thread_id,
            role: value.role,
            content: value.content,
            model: value.model,
            created_at: value.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ThreadWithMessagesDTO {
    pub thread: ThreadDTO,
    pub messages: Vec<MessageDTO>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListThreadsInput {
    #[serde(default)]
    pub sidekiq_id: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ThreadIdInput {
    pub thread_id: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateThreadInput {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: Option<String>,

    #[serde(default)]
    pub sidekiq_id: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RenameThreadInput {
    pub thread_id: i32,

    #[validate(custom(function = "non_blank"), length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AppendMessageInput {
    pub thread_id: i32,

    pub role: MessageRole,

    #[validate(length(min = 1, max = 100000, message = "Message content must be between 1 and 100000 characters"))]
    pub content: String,

    #[serde(default)]
    #[validate(regex(path = *MODEL_ID_RE, message = "Model id is not valid"))]
    pub model: Option<String>,
}

/// DTO per creare un nuovo thread (senza id)
#[derive(Debug, Clone)]
pub struct CreateThreadDTO {
    pub user_id: i32,
    pub sidekiq_id: Option<i32>,
    pub title: String,
}

/// DTO per creare un nuovo messaggio (senza id)
#[derive(Debug, Clone)]
pub struct CreateMessageDTO {
    pub thread_id: i32,
    pub role: MessageRole,
    pub content: String,
    pub model: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_append_message_rejects_unknown_role() {
        let result = serde_json::from_value::<AppendMessageInput>(json!({
            "threadId": 1,
            "role": "tool",
            "content": "hi"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_append_message_rejects_empty_content() {
        let input: AppendMessageInput = serde_json::from_value(json!({
            "threadId": 1,
            "role": "user",
            "content": ""
        }))
        .unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_create_thread_input_defaults() {
        let input: CreateThreadInput = serde_json::from_value(json!({})).unwrap();
        assert!(input.validate().is_ok());
        assert!(input.title.is_none());
        assert!(input.sidekiq_id.is_none());
    }

    #[test]
    fn test_rename_rejects_blank_title() {
        let input: RenameThreadInput =
            serde_json::from_value(json!({"threadId": 1, "title": "   "})).unwrap();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));

        let input: RenameThreadInput =
            serde_json::from_value(json!({"threadId": 1, "title": " PR #42 "})).unwrap();
        assert!(input.validate().is_ok());
    }
}
