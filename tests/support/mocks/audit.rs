// tests/support/mocks/audit.rs
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use stockroom::domain::audit::{
    AuditLog, AuditLogCursor, AuditLogFilter, AuditLogRepository, NewAuditLog,
};
use stockroom::domain::errors::{DomainError, DomainResult};

/// Audit store whose inserts always fail.
#[derive(Debug, Default)]
pub struct FailingAuditRepo {
    pub attempts: AtomicU32,
}

impl FailingAuditRepo {
    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuditLogRepository for FailingAuditRepo {
    async fn insert(&self, _log: NewAuditLog) -> DomainResult<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(DomainError::Persistence("audit store unavailable".into()))
    }

    async fn list(
        &self,
        _filter: AuditLogFilter,
        _limit: u32,
        _cursor: Option<AuditLogCursor>,
    ) -> DomainResult<(Vec<AuditLog>, Option<AuditLogCursor>)> {
        Ok((Vec::new(), None))
    }
}

/// Audit store whose inserts never complete.
#[derive(Debug, Default)]
pub struct StalledAuditRepo;

#[async_trait]
impl AuditLogRepository for StalledAuditRepo {
    async fn insert(&self, _log: NewAuditLog) -> DomainResult<()> {
        std::future::pending().await
    }

    async fn list(
        &self,
        _filter: AuditLogFilter,
        _limit: u32,
        _cursor: Option<AuditLogCursor>,
    ) -> DomainResult<(Vec<AuditLog>, Option<AuditLogCursor>)> {
        Ok((Vec::new(), None))
    }
}
