//! Direct messages between users.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{UserCard, UserId};

/// Longest accepted message body, in characters.
pub const MESSAGE_MAX: usize = 5_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessageValidationError {
    #[error("content must not be empty")]
    Empty,
    #[error("content must be at most {max} characters")]
    TooLong { max: usize },
}

/// Trimmed, non-empty message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBody(String);

impl MessageBody {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, MessageValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(MessageValidationError::Empty);
        }
        if trimmed.chars().count() > MESSAGE_MAX {
            return Err(MessageValidationError::TooLong { max: MESSAGE_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for MessageBody {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Uuid,
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub content: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Message ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub id: Uuid,
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub content: MessageBody,
}

impl NewMessage {
    pub fn new(sender_id: UserId, receiver_id: UserId, content: MessageBody) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender_id,
            receiver_id,
            content,
        }
    }
}

/// One entry in the inbox: the partner, the latest message, and how many of
/// the partner's messages are still unread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationSummary {
    pub partner: UserCard,
    pub last_message: Message,
    pub unread_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", MessageValidationError::Empty)]
    #[case("   \n", MessageValidationError::Empty)]
    fn blank_messages_are_rejected(#[case] raw: &str, #[case] expected: MessageValidationError) {
        assert_eq!(MessageBody::new(raw), Err(expected));
    }

    #[rstest]
    fn overlong_messages_are_rejected() {
        let raw = "a".repeat(MESSAGE_MAX + 1);
        assert_eq!(
            MessageBody::new(raw),
            Err(MessageValidationError::TooLong { max: MESSAGE_MAX })
        );
    }

    #[rstest]
    fn body_is_trimmed() {
        let body = MessageBody::new("  hello there ").expect("valid");
        assert_eq!(body.as_ref(), "hello there");
    }
}
