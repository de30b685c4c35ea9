// src/application/ports/time.rs
use chrono::{DateTime, Utc};

/// Source of "now" for every timestamp the application writes.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
