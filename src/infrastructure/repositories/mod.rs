// src/infrastructure/repositories/mod.rs
mod error;
mod memory;
mod postgres_audit_log;
mod postgres_category;
mod postgres_ledger;
mod postgres_leftover;
mod postgres_product;

pub use error::map_sqlx;
pub use memory::InMemoryStore;
pub use postgres_audit_log::PostgresAuditLogRepository;
pub use postgres_category::PostgresCategoryRepository;
pub use postgres_ledger::PostgresInventoryLedger;
pub use postgres_leftover::PostgresLeftOverRepository;
pub use postgres_product::PostgresProductRepository;
