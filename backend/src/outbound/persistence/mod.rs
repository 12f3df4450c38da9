//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports, backed by
//! PostgreSQL through `diesel-async` and `bb8` pooling.
//!
//! - **Thin adapters**: repositories translate between Diesel rows and domain
//!   types; no business rules live here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: every Diesel and pool failure is mapped to the
//!   port's own error enum.
//!
//! ```ignore
//! use encore::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/encore")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_booking_repository;
mod diesel_content_repository;
mod diesel_favorite_repository;
mod diesel_helpers;
mod diesel_message_repository;
mod diesel_payment_repository;
mod diesel_profile_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_booking_repository::DieselBookingRepository;
pub use diesel_content_repository::DieselContentRepository;
pub use diesel_favorite_repository::DieselFavoriteRepository;
pub use diesel_message_repository::DieselMessageRepository;
pub use diesel_payment_repository::DieselPaymentRepository;
pub use diesel_profile_repository::DieselProfileRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
