//! PostgreSQL-backed `MessageRepository` implementation using Diesel ORM.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{MessageRepository, MessageRepositoryError};
use crate::domain::{ConversationSummary, Message, NewMessage, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::diesel_helpers::load_user_cards;
use super::models::{MessageRow, NewMessageRow};
use super::pool::{DbPool, PoolError};
use super::schema::messages;

#[derive(Clone)]
pub struct DieselMessageRepository {
    pool: DbPool,
}

impl DieselMessageRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MessageRepositoryError {
    map_basic_pool_error(error, |message| MessageRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> MessageRepositoryError {
    map_basic_diesel_error(
        error,
        MessageRepositoryError::query,
        MessageRepositoryError::connection,
    )
}

/// Conversation partner, latest message and unread count per partner, most
/// recent conversation first. `rows` must be ordered newest first.
fn group_conversations(user: Uuid, rows: Vec<MessageRow>) -> Vec<(Uuid, MessageRow, i64)> {
    let mut order: Vec<Uuid> = Vec::new();
    let mut latest: HashMap<Uuid, (MessageRow, i64)> = HashMap::new();
    for row in rows {
        let partner = if row.sender_id == user {
            row.receiver_id
        } else {
            row.sender_id
        };
        let unread = i64::from(row.receiver_id == user && !row.read);
        match latest.get_mut(&partner) {
            Some((_, count)) => *count += unread,
            None => {
                order.push(partner);
                latest.insert(partner, (row, unread));
            }
        }
    }
    order
        .into_iter()
        .filter_map(|partner| {
            latest
                .remove(&partner)
                .map(|(row, unread)| (partner, row, unread))
        })
        .collect()
}

#[async_trait]
impl MessageRepository for DieselMessageRepository {
    async fn insert(&self, message: &NewMessage) -> Result<Message, MessageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: MessageRow = diesel::insert_into(messages::table)
            .values(NewMessageRow::from(message))
            .returning(MessageRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }

    async fn thread(
        &self,
        user: &UserId,
        partner: &UserId,
    ) -> Result<Vec<Message>, MessageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (me, them) = (user.as_uuid(), partner.as_uuid());
        let rows: Vec<MessageRow> = messages::table
            .filter(
                (messages::sender_id.eq(me).and(messages::receiver_id.eq(them)))
                    .or(messages::sender_id.eq(them).and(messages::receiver_id.eq(me))),
            )
            .order(messages::created_at.asc())
            .select(MessageRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Message::from).collect())
    }

    async fn mark_read(
        &self,
        receiver: &UserId,
        sender: &UserId,
    ) -> Result<u64, MessageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(
            messages::table
                .filter(messages::receiver_id.eq(receiver.as_uuid()))
                .filter(messages::sender_id.eq(sender.as_uuid()))
                .filter(messages::read.eq(false)),
        )
        .set(messages::read.eq(true))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(updated as u64)
    }

    async fn conversations(
        &self,
        user: &UserId,
    ) -> Result<Vec<ConversationSummary>, MessageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let me = *user.as_uuid();
        let rows: Vec<MessageRow> = messages::table
            .filter(messages::sender_id.eq(me).or(messages::receiver_id.eq(me)))
            .order(messages::created_at.desc())
            .select(MessageRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let grouped = group_conversations(me, rows);
        let partner_ids: Vec<Uuid> = grouped.iter().map(|(partner, _, _)| *partner).collect();
        let cards = load_user_cards(&mut conn, &partner_ids)
            .await
            .map_err(|error| {
                error.into_repository_error(map_diesel_error, |message| {
                    MessageRepositoryError::query(format!("corrupt user row: {message}"))
                })
            })?;

        Ok(grouped
            .into_iter()
            .filter_map(|(partner, row, unread_count)| {
                Some(ConversationSummary {
                    partner: cards.get(&partner)?.clone(),
                    last_message: row.into(),
                    unread_count,
                })
            })
            .collect())
    }

    async fn unread_count(&self, user: &UserId) -> Result<i64, MessageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        messages::table
            .filter(messages::receiver_id.eq(user.as_uuid()))
            .filter(messages::read.eq(false))
            .select(count_star())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use rstest::rstest;

    fn row(sender: Uuid, receiver: Uuid, read: bool, minutes_ago: i64) -> MessageRow {
        MessageRow {
            id: Uuid::new_v4(),
            sender_id: sender,
            receiver_id: receiver,
            content: format!("sent {minutes_ago}m ago"),
            read,
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[rstest]
    fn conversations_keep_latest_message_and_count_unread() {
        let me = Uuid::new_v4();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let rows = vec![
            row(bob, me, false, 1),
            row(me, alice, false, 2),
            row(alice, me, false, 3),
            row(alice, me, false, 4),
            row(bob, me, true, 5),
        ];

        let grouped = group_conversations(me, rows);

        assert_eq!(grouped.len(), 2);
        let (first, latest, unread) = &grouped[0];
        assert_eq!(*first, bob);
        assert_eq!(latest.content, "sent 1m ago");
        assert_eq!(*unread, 1);
        let (second, latest, unread) = &grouped[1];
        assert_eq!(*second, alice);
        assert_eq!(latest.content, "sent 2m ago");
        assert_eq!(*unread, 2);
    }

    #[rstest]
    fn own_unread_messages_do_not_count() {
        let me = Uuid::new_v4();
        let partner = Uuid::new_v4();

        let grouped = group_conversations(me, vec![row(me, partner, false, 1)]);

        assert_eq!(grouped[0].2, 0);
    }
}
