//! In-memory driving-port doubles for the HTTP flow tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use encore::domain::ports::{
    AccountService, BookingService, ContentService, DashboardService, FavoriteService,
    MessagingService, OwnProfile, PaymentService, ProfileService, WebhookOutcome,
};
use encore::domain::{
    Actor, Booking, BookingDetails, BookingDraft, BookingStatus, CheckoutSession, Content,
    ContentCounters, ContentDraft, ConversationSummary, CounterChange, Dashboard, EarningsReport,
    Error, Favorite, FavoriteEntry, LoginCredentials, Message, MessageBody, PerformerPage,
    Profile, ProfileDraft, ProfileSummary, Registration, User, UserCard, UserId,
};

struct StoredAccount {
    user: User,
    password: String,
}

/// Accounts keyed by email with plain-text passwords.
#[derive(Clone, Default)]
pub struct InMemoryAccounts {
    accounts: Arc<Mutex<HashMap<String, StoredAccount>>>,
}

impl InMemoryAccounts {
    fn find<T>(&self, pred: impl Fn(&User) -> bool, map: impl Fn(&User) -> T) -> Option<T> {
        self.accounts
            .lock()
            .expect("accounts lock")
            .values()
            .find(|stored| pred(&stored.user))
            .map(|stored| map(&stored.user))
    }
}

#[async_trait]
impl AccountService for InMemoryAccounts {
    async fn register(&self, registration: Registration) -> Result<UserId, Error> {
        let mut accounts = self.accounts.lock().expect("accounts lock");
        let email = registration.email().as_ref().to_owned();
        if accounts.contains_key(&email) {
            return Err(Error::invalid_request("User already exists"));
        }
        let user = User {
            id: UserId::random(),
            name: registration.name().clone(),
            email: registration.email().clone(),
            role: registration.role(),
            image: None,
            created_at: Utc::now(),
        };
        let id = user.id;
        accounts.insert(
            email,
            StoredAccount {
                user,
                password: registration.password().to_owned(),
            },
        );
        Ok(id)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let accounts = self.accounts.lock().expect("accounts lock");
        accounts
            .get(credentials.email().as_ref())
            .filter(|stored| stored.password == credentials.password())
            .map(|stored| stored.user.clone())
            .ok_or_else(|| Error::unauthorized("Invalid credentials"))
    }

    async fn current_user(&self, id: &UserId) -> Result<User, Error> {
        self.find(|user| user.id == *id, Clone::clone)
            .ok_or_else(|| Error::not_found("User not found"))
    }

    async fn update_image(&self, id: &UserId, image: &str) -> Result<User, Error> {
        let mut accounts = self.accounts.lock().expect("accounts lock");
        let stored = accounts
            .values_mut()
            .find(|stored| stored.user.id == *id)
            .ok_or_else(|| Error::not_found("User not found"))?;
        stored.user.image = Some(image.to_owned());
        Ok(stored.user.clone())
    }

    async fn user_card(&self, id: &UserId) -> Result<UserCard, Error> {
        self.find(|user| user.id == *id, User::card)
            .ok_or_else(|| Error::not_found("User not found"))
    }
}

/// Message store that trusts [`InMemoryAccounts`] for receiver lookups.
#[derive(Clone)]
pub struct InMemoryMessages {
    accounts: InMemoryAccounts,
    messages: Arc<Mutex<Vec<Message>>>,
}

impl InMemoryMessages {
    pub fn new(accounts: InMemoryAccounts) -> Self {
        Self {
            accounts,
            messages: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn between(message: &Message, a: UserId, b: UserId) -> bool {
        (message.sender_id == a && message.receiver_id == b)
            || (message.sender_id == b && message.receiver_id == a)
    }
}

#[async_trait]
impl MessagingService for InMemoryMessages {
    async fn send(&self, actor: &Actor, receiver: &UserId, content: &str) -> Result<Message, Error> {
        if actor.id == *receiver {
            return Err(Error::invalid_request("Cannot message yourself"));
        }
        self.accounts.user_card(receiver).await?;
        let body = MessageBody::new(content).map_err(|err| Error::invalid_request(err.to_string()))?;
        let message = Message {
            id: Uuid::new_v4(),
            sender_id: actor.id,
            receiver_id: *receiver,
            content: body.into_inner(),
            read: false,
            created_at: Utc::now(),
        };
        self.messages
            .lock()
            .expect("messages lock")
            .push(message.clone());
        Ok(message)
    }

    async fn thread(&self, actor: &Actor, partner: &UserId) -> Result<Vec<Message>, Error> {
        let messages = self.messages.lock().expect("messages lock");
        Ok(messages
            .iter()
            .filter(|message| Self::between(message, actor.id, *partner))
            .cloned()
            .collect())
    }

    async fn mark_read(&self, actor: &Actor, partner: &UserId) -> Result<u64, Error> {
        let mut messages = self.messages.lock().expect("messages lock");
        let mut updated = 0;
        for message in messages
            .iter_mut()
            .filter(|message| message.sender_id == *partner && message.receiver_id == actor.id)
            .filter(|message| !message.read)
        {
            message.read = true;
            updated += 1;
        }
        Ok(updated)
    }

    async fn conversations(&self, actor: &Actor) -> Result<Vec<ConversationSummary>, Error> {
        let snapshot = self.messages.lock().expect("messages lock").clone();
        let mut latest: HashMap<UserId, (Message, i64)> = HashMap::new();
        for message in snapshot {
            let partner = if message.sender_id == actor.id {
                message.receiver_id
            } else if message.receiver_id == actor.id {
                message.sender_id
            } else {
                continue;
            };
            let unread = i64::from(message.receiver_id == actor.id && !message.read);
            let entry = latest.entry(partner).or_insert_with(|| (message.clone(), 0));
            entry.1 += unread;
            if message.created_at >= entry.0.created_at {
                entry.0 = message;
            }
        }
        let mut summaries = Vec::with_capacity(latest.len());
        for (partner, (last_message, unread_count)) in latest {
            summaries.push(ConversationSummary {
                partner: self.accounts.user_card(&partner).await?,
                last_message,
                unread_count,
            });
        }
        summaries.sort_by(|a, b| b.last_message.created_at.cmp(&a.last_message.created_at));
        Ok(summaries)
    }
}

/// Every other port answers `503` so stray calls fail loudly.
#[derive(Clone, Copy, Default)]
pub struct Offline;

fn offline<T>() -> Result<T, Error> {
    Err(Error::service_unavailable("offline in tests"))
}

#[async_trait]
impl ProfileService for Offline {
    async fn own_profile(&self, _: &Actor) -> Result<OwnProfile, Error> {
        offline()
    }
    async fn upsert_profile(&self, _: &Actor, _: ProfileDraft) -> Result<Profile, Error> {
        offline()
    }
    async fn list_performers(&self) -> Result<Vec<ProfileSummary>, Error> {
        offline()
    }
    async fn performer_page(&self, _: &Actor, _: &UserId) -> Result<PerformerPage, Error> {
        offline()
    }
}

#[async_trait]
impl ContentService for Offline {
    async fn create(&self, _: &Actor, _: ContentDraft) -> Result<Content, Error> {
        offline()
    }
    async fn list(&self, _: &Actor, _: Option<Uuid>) -> Result<Vec<Content>, Error> {
        offline()
    }
    async fn delete(&self, _: &Actor, _: &Uuid) -> Result<(), Error> {
        offline()
    }
    async fn engage(&self, _: &Actor, _: &Uuid, _: CounterChange) -> Result<ContentCounters, Error> {
        offline()
    }
}

#[async_trait]
impl BookingService for Offline {
    async fn create(&self, _: &Actor, _: BookingDraft) -> Result<BookingDetails, Error> {
        offline()
    }
    async fn list(&self, _: &Actor) -> Result<Vec<BookingDetails>, Error> {
        offline()
    }
    async fn update_status(&self, _: &Actor, _: &Uuid, _: BookingStatus) -> Result<Booking, Error> {
        offline()
    }
}

#[async_trait]
impl PaymentService for Offline {
    async fn create_checkout(&self, _: &Actor, _: &Uuid) -> Result<CheckoutSession, Error> {
        offline()
    }
    async fn handle_webhook(&self, _: &[u8], _: &str) -> Result<WebhookOutcome, Error> {
        offline()
    }
}

#[async_trait]
impl FavoriteService for Offline {
    async fn add(&self, _: &Actor, _: &Uuid) -> Result<Favorite, Error> {
        offline()
    }
    async fn remove(&self, _: &Actor, _: &Uuid) -> Result<(), Error> {
        offline()
    }
    async fn list(&self, _: &Actor) -> Result<Vec<FavoriteEntry>, Error> {
        offline()
    }
}

#[async_trait]
impl DashboardService for Offline {
    async fn dashboard(&self, _: &Actor) -> Result<Dashboard, Error> {
        offline()
    }
    async fn earnings(&self, _: &Actor) -> Result<EarningsReport, Error> {
        offline()
    }
}
