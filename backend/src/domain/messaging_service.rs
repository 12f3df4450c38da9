//! Direct messaging service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{MessageRepository, MessagingService, UserRepository};
use crate::domain::service_errors::{map_message_error, map_user_error};
use crate::domain::{Actor, ConversationSummary, Error, Message, MessageBody, NewMessage, UserId};

#[derive(Clone)]
pub struct MessagingServiceImpl<M, U> {
    messages: Arc<M>,
    users: Arc<U>,
}

impl<M, U> MessagingServiceImpl<M, U> {
    pub fn new(messages: Arc<M>, users: Arc<U>) -> Self {
        Self { messages, users }
    }
}

#[async_trait]
impl<M, U> MessagingService for MessagingServiceImpl<M, U>
where
    M: MessageRepository,
    U: UserRepository,
{
    async fn send(
        &self,
        actor: &Actor,
        receiver: &UserId,
        content: &str,
    ) -> Result<Message, Error> {
        let body = MessageBody::new(content)
            .map_err(|err| Error::invalid_request(format!("invalid message: {err}")))?;
        if *receiver == actor.id {
            return Err(Error::invalid_request("cannot message yourself"));
        }
        self.users
            .find_by_id(receiver)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("Receiver not found"))?;

        let message = self
            .messages
            .insert(&NewMessage::new(actor.id, *receiver, body))
            .await
            .map_err(map_message_error)?;
        debug!(message_id = %message.id, "message sent");
        Ok(message)
    }

    async fn thread(&self, actor: &Actor, partner: &UserId) -> Result<Vec<Message>, Error> {
        self.messages
            .thread(&actor.id, partner)
            .await
            .map_err(map_message_error)
    }

    async fn mark_read(&self, actor: &Actor, partner: &UserId) -> Result<u64, Error> {
        self.messages
            .mark_read(&actor.id, partner)
            .await
            .map_err(map_message_error)
    }

    async fn conversations(&self, actor: &Actor) -> Result<Vec<ConversationSummary>, Error> {
        self.messages
            .conversations(&actor.id)
            .await
            .map_err(map_message_error)
    }
}
