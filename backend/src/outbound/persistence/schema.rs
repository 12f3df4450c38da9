//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. When a migration
//! changes a table, regenerate with `diesel print-schema` or edit by hand.

diesel::table! {
    /// Registered accounts. `email` is unique; `role` holds `PERFORMER` or
    /// `CLIENT`.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        /// Argon2 PHC string; never leaves the persistence layer.
        password_hash -> Text,
        role -> Varchar,
        image -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Performer profiles, one per performer (`user_id` is unique).
    profiles (id) {
        id -> Uuid,
        user_id -> Uuid,
        bio -> Nullable<Text>,
        location -> Nullable<Varchar>,
        age -> Nullable<Int4>,
        height -> Nullable<Varchar>,
        measurements -> Nullable<Varchar>,
        services -> Nullable<Jsonb>,
        rates -> Nullable<Jsonb>,
        availability -> Nullable<Jsonb>,
        featured -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Published media. Counters are constrained to be non-negative.
    content (id) {
        id -> Uuid,
        user_id -> Uuid,
        profile_id -> Uuid,
        kind -> Varchar,
        url -> Text,
        thumbnail -> Nullable<Text>,
        title -> Nullable<Varchar>,
        description -> Nullable<Text>,
        is_premium -> Bool,
        /// Minor currency units.
        price -> Nullable<Int8>,
        views -> Int8,
        likes -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    bookings (id) {
        id -> Uuid,
        performer_id -> Uuid,
        client_id -> Uuid,
        kind -> Varchar,
        scheduled_at -> Timestamptz,
        /// Minutes.
        duration -> Int4,
        /// Hourly rate in minor currency units.
        rate -> Int8,
        notes -> Nullable<Text>,
        location -> Nullable<Varchar>,
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Settled checkouts. Both `booking_id` and `processor_id` are unique so a
    /// redelivered webhook cannot record a second payment.
    payments (id) {
        id -> Uuid,
        booking_id -> Uuid,
        payer_id -> Uuid,
        amount -> Int8,
        currency -> Varchar,
        processor_id -> Varchar,
        status -> Varchar,
        description -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    messages (id) {
        id -> Uuid,
        sender_id -> Uuid,
        receiver_id -> Uuid,
        content -> Text,
        read -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Client bookmarks of performer profiles; `(user_id, profile_id)` is
    /// unique.
    favorites (id) {
        id -> Uuid,
        user_id -> Uuid,
        profile_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(profiles -> users (user_id));
diesel::joinable!(content -> profiles (profile_id));
diesel::joinable!(payments -> bookings (booking_id));
diesel::joinable!(favorites -> profiles (profile_id));

diesel::allow_tables_to_appear_in_same_query!(
    users, profiles, content, bookings, payments, messages, favorites,
);
