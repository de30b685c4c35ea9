pub mod categories;
pub mod leftovers;
pub mod products;
