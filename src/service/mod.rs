//! Business logic services

pub mod password;
pub mod user;

pub use password::{Argon2PasswordHasher, PasswordHasher};
pub use user::UserService;
