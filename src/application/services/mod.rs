// src/application/services/mod.rs
pub mod audit_recorder;

use std::sync::Arc;

use crate::{
    application::{
        ApplicationResult,
        commands::{
            categories::CategoryCommandService, leftovers::LeftOverCommandService,
            products::ProductCommandService,
        },
        dto::AuthenticatedUser,
        error::ApplicationError,
        ports::{security::TokenManager, time::Clock},
        queries::{
            audit::AuditQueryService, categories::CategoryQueryService,
            leftovers::LeftOverQueryService, products::ProductQueryService,
        },
    },
    domain::{
        audit::AuditLogRepository, category::CategoryRepository, inventory::InventoryLedger,
        leftover::LeftOverReadRepository, product::ProductRepository,
    },
};

pub use audit_recorder::{AuditRecorder, AuditTarget, AuditWorkerHandle};

pub struct ApplicationServices {
    pub product_commands: Arc<ProductCommandService>,
    pub product_queries: Arc<ProductQueryService>,
    pub category_commands: Arc<CategoryCommandService>,
    pub category_queries: Arc<CategoryQueryService>,
    pub leftover_commands: Arc<LeftOverCommandService>,
    pub leftover_queries: Arc<LeftOverQueryService>,
    pub audit_queries: Arc<AuditQueryService>,
    token_manager: Arc<dyn TokenManager>,
    audit_recorder: AuditRecorder,
}

impl ApplicationServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        product_repo: Arc<dyn ProductRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        leftover_repo: Arc<dyn LeftOverReadRepository>,
        ledger: Arc<dyn InventoryLedger>,
        audit_log_repo: Arc<dyn AuditLogRepository>,
        audit_recorder: AuditRecorder,
        token_manager: Arc<dyn TokenManager>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let product_commands = Arc::new(ProductCommandService::new(
            Arc::clone(&product_repo),
            Arc::clone(&ledger),
            audit_recorder.clone(),
            Arc::clone(&clock),
        ));
        let category_commands = Arc::new(CategoryCommandService::new(
            Arc::clone(&category_repo),
            audit_recorder.clone(),
            Arc::clone(&clock),
        ));
        let leftover_commands = Arc::new(LeftOverCommandService::new(
            Arc::clone(&ledger),
            audit_recorder.clone(),
            Arc::clone(&clock),
        ));

        let product_queries = Arc::new(ProductQueryService::new(Arc::clone(&product_repo)));
        let category_queries = Arc::new(CategoryQueryService::new(Arc::clone(&category_repo)));
        let leftover_queries = Arc::new(LeftOverQueryService::new(Arc::clone(&leftover_repo)));
        let audit_queries = Arc::new(AuditQueryService::new(Arc::clone(&audit_log_repo)));

        Self {
            product_commands,
            product_queries,
            category_commands,
            category_queries,
            leftover_commands,
            leftover_queries,
            audit_queries,
            token_manager,
            audit_recorder,
        }
    }

    pub fn token_manager(&self) -> Arc<dyn TokenManager> {
        Arc::clone(&self.token_manager)
    }

    pub const fn audit_recorder(&self) -> &AuditRecorder {
        &self.audit_recorder
    }

    /// Authenticate a raw bearer token and require the admin role.
    ///
    /// This is the single authorization gate in front of every back-office
    /// operation; the HTTP layer applies it as middleware.
    pub async fn authenticate_admin(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let user = self.token_manager.authenticate(token).await?;
        if !user.is_admin() {
            return Err(ApplicationError::unauthorized("admin role required"));
        }
        Ok(user)
    }
}
