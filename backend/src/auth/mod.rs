//! Authentication module
//!
//! Provides JWT-based request authentication. Tokens are minted by the
//! surrounding account platform; this service validates them and extracts
//! the user identity.

mod jwt;
mod middleware;

pub use jwt::{Claims, JwtService};
pub use middleware::AuthUser;
