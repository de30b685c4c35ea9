// tests/support/mocks/security.rs
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use stockroom::application::{
    ApplicationResult,
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::ApplicationError,
    ports::security::TokenManager,
};
use stockroom::domain::user::{Role, UserId};

pub const ADMIN_TOKEN: &str = "admin-token";
pub const CUSTOMER_TOKEN: &str = "customer-token";
pub const EXPIRED_TOKEN: &str = "expired-token";

/// Accepts a fixed set of opaque tokens instead of verifying signatures.
#[derive(Clone, Debug, Default)]
pub struct DummyTokenManager;

#[async_trait]
impl TokenManager for DummyTokenManager {
    async fn issue(&self, _subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        Err(ApplicationError::infrastructure("not implemented"))
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let now = super::time::fixed_now();
        match token {
            ADMIN_TOKEN => Ok(admin_user(now)),
            CUSTOMER_TOKEN => Ok(customer_user(now)),
            EXPIRED_TOKEN => Err(ApplicationError::unauthorized("token expired")),
            _ => Err(ApplicationError::unauthorized("invalid token")),
        }
    }
}

pub fn admin_user(now: DateTime<Utc>) -> AuthenticatedUser {
    AuthenticatedUser {
        id: UserId::new(1).expect("invalid user id"),
        name: Some("Alice Admin".into()),
        email: Some("alice@example.com".into()),
        role: Role::Admin,
        issued_at: now,
        expires_at: now + Duration::hours(1),
    }
}

fn customer_user(now: DateTime<Utc>) -> AuthenticatedUser {
    AuthenticatedUser {
        id: UserId::new(2).expect("invalid user id"),
        name: Some("Carl Customer".into()),
        email: None,
        role: Role::Customer,
        issued_at: now,
        expires_at: now + Duration::hours(1),
    }
}
