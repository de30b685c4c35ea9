// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod audit;
pub mod security;
pub mod time;

pub use audit::{FailingAuditRepo, StalledAuditRepo};
pub use security::{ADMIN_TOKEN, CUSTOMER_TOKEN, DummyTokenManager, EXPIRED_TOKEN, admin_user};
pub use time::{FixedClock, fixed_now};
