pub mod audit;
pub mod category;
pub mod errors;
pub mod inventory;
pub mod leftover;
pub mod product;
pub mod user;
