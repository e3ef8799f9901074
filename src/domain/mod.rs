//! Domain models

pub mod common;
pub mod user;

pub use common::StringUuid;
pub use user::{
    CreateUserRecord, LoginRequest, RegisterRequest, UpdateUserInput, UpdateUserRecord, User,
    UserResponse, ROLE_USER,
};
