//! HTTP middleware
//!
//! The per-request admission chain, outermost first:
//! - panic barrier (uniform 500 on any unrecovered fault)
//! - rate limiting (global fixed window, 429 on rejection)
//! - authentication (bearer token + service signature, 401 on rejection)

pub mod auth;
pub mod panic_barrier;
pub mod rate_limit;
pub mod signature;

pub use auth::{authenticate, AuthState, AuthenticatedUser, RawBearer};
pub use panic_barrier::handle_panic;
pub use rate_limit::{rate_limit_middleware, RateLimiter};
