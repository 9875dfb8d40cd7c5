//! JWT authentication — token verification and Axum middleware

pub mod jwt;
pub mod middleware;

pub use jwt::{create_token, verify_token, AuthError, Claims, JwtConfig};
pub use middleware::{auth_middleware, AuthState};
