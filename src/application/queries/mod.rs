pub mod audit;
pub mod categories;
pub mod leftovers;
pub mod products;
