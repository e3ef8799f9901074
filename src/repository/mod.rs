//! Data access layer

pub mod user;

pub use user::{UserRepository, UserRepositoryImpl};
