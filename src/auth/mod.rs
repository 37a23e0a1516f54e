//! Authentication: password hashing, JWT issuance, request identity.

pub mod extract;
pub mod jwt;
pub mod password;

pub use extract::CurrentUser;
pub use jwt::{Claims, JwtConfig, JwtKeys};
pub use password::PasswordHasher;
