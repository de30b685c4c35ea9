// src/domain/inventory/mod.rs
pub mod ledger;
pub mod plan;

pub use ledger::{Change, InventoryLedger, Restock};
pub use plan::{StockAdjustment, StockPlan};
