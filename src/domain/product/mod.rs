pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::{NewProduct, Product, ProductDetails, ProductUpdate};
pub use repository::ProductRepository;
pub use value_objects::{Price, ProductId, ProductName, Stock};
