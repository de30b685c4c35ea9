pub mod audit;
pub mod auth;
pub mod categories;
pub mod leftovers;
pub mod pagination;
pub mod products;
pub mod serde_time;

pub use audit::{AuditContext, AuditLogDto, ClientInfo};
pub use auth::{AuthTokenDto, AuthenticatedUser, TokenSubject};
pub use categories::CategoryDto;
pub use leftovers::{LeftOverDetailDto, LeftOverDto};
pub use pagination::CursorPage;
pub use products::ProductDto;
