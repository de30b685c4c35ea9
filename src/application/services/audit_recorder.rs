//! Best-effort audit trail.
//!
//! Command services call [`AuditRecorder::record`] after their primary write
//! succeeded. Entries go onto a bounded outbox channel drained by a single
//! background task, so recording never waits on storage and can never undo
//! the mutation it describes. Anything that goes wrong on this path is logged
//! and dropped: delivery is at-most-once.

use crate::application::dto::AuditContext;
use crate::application::ports::time::Clock;
use crate::domain::audit::{AuditAction, AuditLogRepository, EntityType, NewAuditLog, diff};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// The record a mutation touched.
#[derive(Debug, Clone)]
pub struct AuditTarget {
    pub entity_type: EntityType,
    pub entity_id: i64,
    pub entity_name: Option<String>,
}

impl AuditTarget {
    pub fn new(entity_type: EntityType, entity_id: i64, entity_name: impl Into<String>) -> Self {
        Self {
            entity_type,
            entity_id,
            entity_name: Some(entity_name.into()),
        }
    }
}

enum AuditMessage {
    Entry(Box<NewAuditLog>),
    Flush(oneshot::Sender<()>),
}

#[derive(Clone)]
pub struct AuditRecorder {
    sender: mpsc::Sender<AuditMessage>,
    clock: Arc<dyn Clock>,
}

/// Owns the background writer. Resolves once every recorder clone is dropped
/// and the queue is drained.
pub struct AuditWorkerHandle {
    join: JoinHandle<()>,
}

impl AuditWorkerHandle {
    pub async fn shutdown(self) {
        if let Err(err) = self.join.await {
            warn!(error = %err, "audit worker terminated abnormally");
        }
    }
}

impl AuditRecorder {
    /// Start the writer task on the current tokio runtime.
    pub fn spawn(
        repo: Arc<dyn AuditLogRepository>,
        clock: Arc<dyn Clock>,
        capacity: usize,
    ) -> (Self, AuditWorkerHandle) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let join = tokio::spawn(run_worker(receiver, repo));
        (Self { sender, clock }, AuditWorkerHandle { join })
    }

    /// Queue one entry describing a committed mutation.
    ///
    /// `old` and `new` are serialized to JSON; when both are present the
    /// field-level diff is stored alongside them.
    pub fn record<T: Serialize>(
        &self,
        ctx: &AuditContext,
        action: AuditAction,
        target: AuditTarget,
        old: Option<&T>,
        new: Option<&T>,
    ) {
        let (old_data, new_data) = match (snapshot(old), snapshot(new)) {
            (Ok(old_data), Ok(new_data)) => (old_data, new_data),
            (Err(err), _) | (_, Err(err)) => {
                warn!(
                    error = %err,
                    entity_type = %target.entity_type,
                    entity_id = target.entity_id,
                    "failed to serialize audit snapshot"
                );
                return;
            }
        };

        let changes = match (&old_data, &new_data) {
            (Some(_), Some(_)) => Some(Value::Object(diff(old_data.as_ref(), new_data.as_ref()))),
            _ => None,
        };

        let entry = NewAuditLog {
            user_id: ctx.actor.id,
            user_name: ctx.actor.name.clone(),
            user_email: ctx.actor.email.clone(),
            action,
            entity_type: target.entity_type,
            entity_id: target.entity_id,
            entity_name: target.entity_name,
            old_data,
            new_data,
            changes,
            ip_address: Some(ctx.client.ip_address.clone()),
            user_agent: Some(ctx.client.user_agent.clone()),
            created_at: self.clock.now(),
        };

        let entity_type = entry.entity_type;
        let entity_id = entry.entity_id;
        match self.sender.try_send(AuditMessage::Entry(Box::new(entry))) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(%entity_type, entity_id, %action, "audit queue full, dropping entry");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                warn!(%entity_type, entity_id, %action, "audit worker stopped, dropping entry");
            }
        }
    }

    /// Wait until every entry queued before this call has been handled.
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.sender.send(AuditMessage::Flush(ack)).await.is_err() {
            return;
        }
        let _ = done.await;
    }
}

fn snapshot<T: Serialize>(value: Option<&T>) -> serde_json::Result<Option<Value>> {
    value.map(serde_json::to_value).transpose()
}

async fn run_worker(mut receiver: mpsc::Receiver<AuditMessage>, repo: Arc<dyn AuditLogRepository>) {
    while let Some(message) = receiver.recv().await {
        match message {
            AuditMessage::Entry(entry) => {
                let entity_type = entry.entity_type;
                let entity_id = entry.entity_id;
                if let Err(err) = repo.insert(*entry).await {
                    warn!(error = %err, %entity_type, entity_id, "failed to insert audit log");
                }
            }
            AuditMessage::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
    debug!("audit worker drained");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::{AuthenticatedUser, ClientInfo};
    use crate::domain::audit::{AuditLog, AuditLogCursor, AuditLogFilter};
    use crate::domain::errors::{DomainError, DomainResult};
    use crate::domain::user::{Role, UserId};
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use serde_json::json;
    use std::sync::Mutex;

    struct FixedClock;

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
                .unwrap()
                .with_timezone(&Utc)
        }
    }

    #[derive(Default)]
    struct Capturing {
        inserted: Mutex<Vec<NewAuditLog>>,
    }

    #[async_trait]
    impl AuditLogRepository for Capturing {
        async fn insert(&self, log: NewAuditLog) -> DomainResult<()> {
            self.inserted.lock().unwrap().push(log);
            Ok(())
        }

        async fn list(
            &self,
            _filter: AuditLogFilter,
            _limit: u32,
            _cursor: Option<AuditLogCursor>,
        ) -> DomainResult<(Vec<AuditLog>, Option<AuditLogCursor>)> {
            Ok((vec![], None))
        }
    }

    #[derive(Default)]
    struct Failing {
        attempts: Mutex<u32>,
    }

    #[async_trait]
    impl AuditLogRepository for Failing {
        async fn insert(&self, _log: NewAuditLog) -> DomainResult<()> {
            *self.attempts.lock().unwrap() += 1;
            Err(DomainError::Persistence("database unavailable".into()))
        }

        async fn list(
            &self,
            _filter: AuditLogFilter,
            _limit: u32,
            _cursor: Option<AuditLogCursor>,
        ) -> DomainResult<(Vec<AuditLog>, Option<AuditLogCursor>)> {
            Ok((vec![], None))
        }
    }

    /// Never finishes an insert, so the queue behind it fills up.
    struct Stalled;

    #[async_trait]
    impl AuditLogRepository for Stalled {
        async fn insert(&self, _log: NewAuditLog) -> DomainResult<()> {
            std::future::pending().await
        }

        async fn list(
            &self,
            _filter: AuditLogFilter,
            _limit: u32,
            _cursor: Option<AuditLogCursor>,
        ) -> DomainResult<(Vec<AuditLog>, Option<AuditLogCursor>)> {
            Ok((vec![], None))
        }
    }

    fn ctx() -> AuditContext {
        let now = FixedClock.now();
        AuditContext::new(
            AuthenticatedUser {
                id: UserId::new(1).unwrap(),
                name: Some("Admin".into()),
                email: Some("admin@example.com".into()),
                role: Role::Admin,
                issued_at: now,
                expires_at: now,
            },
            ClientInfo {
                ip_address: "10.0.0.1".into(),
                user_agent: "unit-test".into(),
            },
        )
    }

    #[tokio::test]
    async fn update_entries_carry_snapshots_and_diff() {
        let repo = Arc::new(Capturing::default());
        let (recorder, _worker) = AuditRecorder::spawn(repo.clone(), Arc::new(FixedClock), 8);

        let old = json!({"name": "Mug", "stock": 10});
        let new = json!({"name": "Mug", "stock": 6});
        recorder.record(
            &ctx(),
            AuditAction::Update,
            AuditTarget::new(EntityType::Product, 5, "Mug"),
            Some(&old),
            Some(&new),
        );
        recorder.flush().await;

        let inserted = repo.inserted.lock().unwrap();
        assert_eq!(inserted.len(), 1);
        let entry = &inserted[0];
        assert_eq!(entry.action, AuditAction::Update);
        assert_eq!(entry.entity_id, 5);
        assert_eq!(entry.user_email.as_deref(), Some("admin@example.com"));
        assert_eq!(entry.ip_address.as_deref(), Some("10.0.0.1"));
        assert_eq!(
            entry.changes,
            Some(json!({"stock": {"old": 10, "new": 6}}))
        );
    }

    #[tokio::test]
    async fn deletions_store_only_the_old_snapshot() {
        let repo = Arc::new(Capturing::default());
        let (recorder, _worker) = AuditRecorder::spawn(repo.clone(), Arc::new(FixedClock), 8);

        let old = json!({"name": "Mugs"});
        recorder.record(
            &ctx(),
            AuditAction::Delete,
            AuditTarget::new(EntityType::Category, 2, "Mugs"),
            Some(&old),
            None,
        );
        recorder.flush().await;

        let inserted = repo.inserted.lock().unwrap();
        assert_eq!(inserted[0].old_data, Some(old));
        assert!(inserted[0].new_data.is_none());
        assert!(inserted[0].changes.is_none());
    }

    #[tokio::test]
    async fn repository_failures_are_swallowed() {
        let repo = Arc::new(Failing::default());
        let (recorder, worker) = AuditRecorder::spawn(repo.clone(), Arc::new(FixedClock), 8);
        for id in 1..=2 {
            recorder.record(
                &ctx(),
                AuditAction::Create,
                AuditTarget::new(EntityType::Product, id, "Mug"),
                None,
                Some(&json!({"name": "Mug"})),
            );
        }
        recorder.flush().await;
        assert_eq!(*repo.attempts.lock().unwrap(), 2);

        drop(recorder);
        worker.shutdown().await;
    }

    #[tokio::test]
    async fn record_on_a_full_queue_returns_immediately() {
        let (recorder, _worker) = AuditRecorder::spawn(Arc::new(Stalled), Arc::new(FixedClock), 1);

        let burst = async {
            for id in 1..=10 {
                recorder.record(
                    &ctx(),
                    AuditAction::Update,
                    AuditTarget::new(EntityType::LeftOver, id, "Bilal"),
                    Some(&json!({"quantity": 1})),
                    Some(&json!({"quantity": 2})),
                );
                tokio::task::yield_now().await;
            }
        };
        tokio::time::timeout(std::time::Duration::from_secs(1), burst)
            .await
            .expect("record must not wait for queue capacity");
    }

    #[tokio::test]
    async fn shutdown_drains_pending_entries() {
        let repo = Arc::new(Capturing::default());
        let (recorder, worker) = AuditRecorder::spawn(repo.clone(), Arc::new(FixedClock), 8);
        for id in 1..=3 {
            recorder.record(
                &ctx(),
                AuditAction::Create,
                AuditTarget::new(EntityType::LeftOver, id, "Bilal"),
                None,
                Some(&json!({"id": id})),
            );
        }
        drop(recorder);
        worker.shutdown().await;
        assert_eq!(repo.inserted.lock().unwrap().len(), 3);
    }
}
