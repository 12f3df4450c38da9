//! Shared context for the Diesel repository integration tests.
//!
//! Each test gets its own embedded cluster with the schema migrated, plus a
//! Tokio runtime to drive the async repositories from synchronous tests.

use encore::domain::ports::{NewUser, ProfileRepository, UserRepository};
use encore::domain::{DisplayName, Email, Profile, Role, User, UserId};
use encore::outbound::persistence::{
    DbPool, DieselProfileRepository, DieselUserRepository, PoolConfig, run_migrations,
};
use pg_embedded_setup_unpriv::TestCluster;
use tokio::runtime::Runtime;

mod pg_embed;

/// True when `SKIP_TEST_CLUSTER` is "1", "true" or "yes" (any case).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip with a marker when `SKIP_TEST_CLUSTER` is set, otherwise fail loudly
/// so a broken cluster never passes silently in CI.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Migrated database backed by a private embedded cluster.
///
/// Field order matters: the pool closes before the runtime, and the cluster
/// stops last.
pub struct TestDatabase {
    pub pool: DbPool,
    pub runtime: Runtime,
    _cluster: TestCluster,
}

impl TestDatabase {
    /// Start a cluster, migrate it and open a small pool.
    ///
    /// Returns `None` when the cluster cannot start and skipping is allowed.
    pub fn start() -> Option<Self> {
        let cluster = match pg_embed::test_cluster() {
            Ok(cluster) => cluster,
            Err(reason) => return handle_cluster_setup_failure(reason),
        };
        let database_url = cluster.connection().database_url("postgres").to_string();
        let runtime = match Runtime::new() {
            Ok(runtime) => runtime,
            Err(err) => return handle_cluster_setup_failure(err),
        };
        let pool = runtime.block_on(async {
            run_migrations(&database_url)
                .await
                .map_err(|err| err.to_string())?;
            DbPool::new(
                PoolConfig::new(database_url.as_str())
                    .with_max_size(2)
                    .with_min_idle(Some(1)),
            )
            .await
            .map_err(|err| err.to_string())
        });
        let pool = match pool {
            Ok(pool) => pool,
            Err(reason) => return handle_cluster_setup_failure(reason),
        };
        Some(Self {
            pool,
            runtime,
            _cluster: cluster,
        })
    }

    /// Register an account with the given role.
    pub fn seed_user(&self, name: &str, role: Role) -> User {
        let users = DieselUserRepository::new(self.pool.clone());
        let id = UserId::random();
        let new_user = NewUser {
            email: Email::new(format!("{id}@example.com")).expect("valid email"),
            id,
            name: DisplayName::new(name).expect("valid display name"),
            password_hash: "$argon2id$stub".to_owned(),
            role,
        };
        self.runtime
            .block_on(users.insert(&new_user))
            .expect("user insert succeeds")
    }

    /// Register a performer together with the empty profile created at signup.
    pub fn seed_performer(&self, name: &str) -> (User, Profile) {
        let user = self.seed_user(name, Role::Performer);
        let profiles = DieselProfileRepository::new(self.pool.clone());
        let profile = self
            .runtime
            .block_on(profiles.create_empty(&user.id))
            .expect("profile insert succeeds");
        (user, profile)
    }
}
