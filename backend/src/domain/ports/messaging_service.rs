//! Driving port for direct messaging.

use async_trait::async_trait;

use crate::domain::{Actor, ConversationSummary, Error, Message, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagingService: Send + Sync {
    async fn send(&self, actor: &Actor, receiver: &UserId, content: &str)
    -> Result<Message, Error>;

    async fn thread(&self, actor: &Actor, partner: &UserId) -> Result<Vec<Message>, Error>;

    /// Mark everything `partner` sent to the caller as read.
    async fn mark_read(&self, actor: &Actor, partner: &UserId) -> Result<u64, Error>;

    async fn conversations(&self, actor: &Actor) -> Result<Vec<ConversationSummary>, Error>;
}
