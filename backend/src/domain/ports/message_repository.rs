//! Port for direct messages.

use async_trait::async_trait;

use crate::domain::{ConversationSummary, Message, NewMessage, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by message repository adapters.
    pub enum MessageRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "message repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "message repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn insert(&self, message: &NewMessage) -> Result<Message, MessageRepositoryError>;

    /// Messages exchanged between `user` and `partner`, oldest first.
    async fn thread(
        &self,
        user: &UserId,
        partner: &UserId,
    ) -> Result<Vec<Message>, MessageRepositoryError>;

    /// Mark messages from `sender` to `receiver` as read; returns how many
    /// changed.
    async fn mark_read(
        &self,
        receiver: &UserId,
        sender: &UserId,
    ) -> Result<u64, MessageRepositoryError>;

    /// One summary per conversation partner, most recent first.
    async fn conversations(
        &self,
        user: &UserId,
    ) -> Result<Vec<ConversationSummary>, MessageRepositoryError>;

    async fn unread_count(&self, user: &UserId) -> Result<i64, MessageRepositoryError>;
}
