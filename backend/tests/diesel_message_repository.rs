//! `DieselMessageRepository` conversation listing against embedded PostgreSQL.

use encore::domain::ports::MessageRepository;
use encore::domain::{MessageBody, NewMessage, Role, User, UserId};
use encore::outbound::persistence::DieselMessageRepository;
use rstest::{fixture, rstest};

mod support;

use support::TestDatabase;

struct Context {
    messages: DieselMessageRepository,
    client: User,
    first_performer: User,
    second_performer: User,
    db: TestDatabase,
}

impl Context {
    fn send(&self, from: &User, to: &User, text: &str) {
        let body = MessageBody::new(text).expect("valid body");
        self.db
            .runtime
            .block_on(self.messages.insert(&NewMessage::new(from.id, to.id, body)))
            .expect("message insert succeeds");
    }
}

#[fixture]
fn context() -> Option<Context> {
    let db = TestDatabase::start()?;
    let client = db.seed_user("Regular Client", Role::Client);
    let (first_performer, _) = db.seed_performer("First Act");
    let (second_performer, _) = db.seed_performer("Second Act");
    Some(Context {
        messages: DieselMessageRepository::new(db.pool.clone()),
        client,
        first_performer,
        second_performer,
        db,
    })
}

#[rstest]
fn conversations_group_by_partner_newest_first(context: Option<Context>) {
    let Some(ctx) = context else { return };

    ctx.send(&ctx.first_performer, &ctx.client, "hello from the first act");
    ctx.send(&ctx.second_performer, &ctx.client, "hello from the second act");
    ctx.send(&ctx.client, &ctx.first_performer, "see you friday");
    ctx.send(&ctx.second_performer, &ctx.client, "any questions?");

    let conversations = ctx
        .db
        .runtime
        .block_on(ctx.messages.conversations(&ctx.client.id))
        .expect("listing succeeds");

    let partners: Vec<UserId> = conversations.iter().map(|c| c.partner.id).collect();
    assert_eq!(partners, vec![ctx.second_performer.id, ctx.first_performer.id]);

    let latest = &conversations[0];
    assert_eq!(latest.last_message.content, "any questions?");
    assert_eq!(latest.unread_count, 2);

    let older = &conversations[1];
    assert_eq!(older.last_message.content, "see you friday");
    assert_eq!(older.unread_count, 1);
}

#[rstest]
fn reading_a_thread_clears_its_unread_count(context: Option<Context>) {
    let Some(ctx) = context else { return };

    ctx.send(&ctx.first_performer, &ctx.client, "first");
    ctx.send(&ctx.first_performer, &ctx.client, "second");
    ctx.send(&ctx.second_performer, &ctx.client, "other thread");

    ctx.db
        .runtime
        .block_on(
            ctx.messages
                .mark_read(&ctx.client.id, &ctx.first_performer.id),
        )
        .expect("mark read succeeds");

    let unread = ctx
        .db
        .runtime
        .block_on(ctx.messages.unread_count(&ctx.client.id))
        .expect("count succeeds");
    assert_eq!(unread, 1);

    let thread = ctx
        .db
        .runtime
        .block_on(
            ctx.messages
                .thread(&ctx.client.id, &ctx.first_performer.id),
        )
        .expect("thread loads");
    let contents: Vec<&str> = thread.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["first", "second"]);
    assert!(thread.iter().all(|m| m.read));
}
