pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::{LeftOver, LeftOverUpdate, LeftOverWithProduct, NewLeftOver};
pub use repository::LeftOverReadRepository;
pub use value_objects::{Custodian, LeftOverId, Quantity};
