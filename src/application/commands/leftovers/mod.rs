// src/application/commands/leftovers/mod.rs
mod create;
mod delete;
mod service;
mod update;

pub use create::CreateLeftOverCommand;
pub use delete::DeleteLeftOverCommand;
pub use service::LeftOverCommandService;
pub use update::UpdateLeftOverCommand;
