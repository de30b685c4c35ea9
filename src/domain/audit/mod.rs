pub mod cursor;
pub mod diff;
pub mod entity;
pub mod repository;

pub use cursor::AuditLogCursor;
pub use diff::diff;
pub use entity::{AuditAction, AuditLog, EntityType, NewAuditLog};
pub use repository::{AuditLogFilter, AuditLogRepository};
