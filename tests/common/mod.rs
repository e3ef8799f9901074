//! Shared fixtures for integration tests: an in-memory user repository and
//! a fully wired router backed by it.

use async_trait::async_trait;
use axum::Router;
use chrono::Utc;
use std::sync::{Arc, Mutex};

use user_service::config::{
    Config, DatabaseConfig, JwtConfig, RateLimitConfig, SignatureConfig,
};
use user_service::domain::{CreateUserRecord, StringUuid, UpdateUserRecord, User};
use user_service::error::Result;
use user_service::jwt::TokenCodec;
use user_service::repository::UserRepository;
use user_service::server::{build_router, AppState};
use user_service::service::{Argon2PasswordHasher, PasswordHasher, UserService};

pub const JWT_SECRET: &str = "integration-test-jwt-secret-of-ample-length";
pub const SIGNATURE_SECRET: &str = "integration-test-service-secret";
pub const ADMIN_PASSWORD: &str = "admin-password-123";

/// Vec-backed repository for driving the full HTTP pipeline without MySQL.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn seed(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_uuid(&self, uuid: StringUuid) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.uuid == uuid)
            .cloned())
    }

    async fn create(&self, record: &CreateUserRecord) -> Result<User> {
        let now = Utc::now();
        let user = User {
            uuid: StringUuid::new_v4(),
            name: record.name.clone(),
            username: record.username.clone(),
            email: record.email.clone(),
            password: record.password.clone(),
            phone_number: record.phone_number.clone(),
            role_code: record.role_code.clone(),
            created_at: now,
            updated_at: now,
        };
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn update(&self, uuid: StringUuid, record: &UpdateUserRecord) -> Result<User> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.uuid == uuid)
            .expect("update target must exist");

        user.name = record.name.clone();
        user.username = record.username.clone();
        user.email = record.email.clone();
        user.phone_number = record.phone_number.clone();
        if let Some(password) = &record.password {
            user.password = password.clone();
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

pub fn test_config(max_requests: u64) -> Config {
    Config {
        http_host: "127.0.0.1".to_string(),
        http_port: 0,
        database: DatabaseConfig {
            url: "mysql://unused/test".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
        jwt: JwtConfig {
            secret: JWT_SECRET.to_string(),
            expiration_minutes: 60,
        },
        signature: SignatureConfig {
            secret: SIGNATURE_SECRET.to_string(),
        },
        rate_limit: RateLimitConfig {
            max_requests,
            window_secs: 60,
        },
    }
}

pub struct TestApp {
    pub router: Router,
    pub codec: Arc<TokenCodec>,
    pub admin_uuid: StringUuid,
}

/// Build the production router over the in-memory repository, pre-seeded
/// with one `admin` account whose password is [`ADMIN_PASSWORD`].
pub fn build_test_app(max_requests: u64) -> TestApp {
    let config = test_config(max_requests);
    let codec = Arc::new(TokenCodec::new(&config.jwt));
    let hasher = Argon2PasswordHasher;

    let repo = InMemoryUserRepository::default();
    let admin_uuid = StringUuid::new_v4();
    let now = Utc::now();
    repo.seed(User {
        uuid: admin_uuid,
        name: "Admin".to_string(),
        username: "admin".to_string(),
        email: "admin@example.com".to_string(),
        password: hasher.hash(ADMIN_PASSWORD).unwrap(),
        phone_number: "+6281234567890".to_string(),
        role_code: "ADMIN".to_string(),
        created_at: now,
        updated_at: now,
    });

    let user_service = Arc::new(UserService::new(
        Arc::new(repo),
        Arc::new(hasher),
        codec.clone(),
    ));

    let router = build_router(AppState {
        config: Arc::new(config),
        user_service,
        token_codec: codec.clone(),
    });

    TestApp {
        router,
        codec,
        admin_uuid,
    }
}
