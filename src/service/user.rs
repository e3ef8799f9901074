//! User business logic: login, registration and profile updates

use std::sync::Arc;

use validator::Validate;

use crate::domain::{
    CreateUserRecord, LoginRequest, RegisterRequest, StringUuid, UpdateUserInput,
    UpdateUserRecord, UserResponse, ROLE_USER,
};
use crate::error::{AppError, Result};
use crate::jwt::TokenCodec;
use crate::repository::UserRepository;
use crate::service::PasswordHasher;

pub struct UserService {
    repo: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    codec: Arc<TokenCodec>,
}

impl UserService {
    pub fn new(
        repo: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        codec: Arc<TokenCodec>,
    ) -> Self {
        Self {
            repo,
            hasher,
            codec,
        }
    }

    /// Verify credentials and mint a session token.
    ///
    /// An unknown username and a wrong password surface the same generic
    /// error so the endpoint cannot be used to enumerate accounts.
    pub async fn login(&self, input: LoginRequest) -> Result<(UserResponse, String)> {
        input.validate()?;

        let user = self
            .repo
            .find_by_username(&input.username)
            .await?
            .ok_or(AppError::CredentialInvalid)?;

        if !self.hasher.verify(&input.password, &user.password) {
            return Err(AppError::CredentialInvalid);
        }

        let data = UserResponse::from(&user);
        let token = self.codec.issue(&data)?;

        Ok((data, token))
    }

    /// Create a new account. The role is always `user`; clients cannot
    /// choose one.
    pub async fn register(&self, input: RegisterRequest) -> Result<UserResponse> {
        input.validate()?;

        let digest = self.hasher.hash(&input.password)?;

        if self.repo.find_by_username(&input.username).await?.is_some() {
            return Err(AppError::UsernameExists);
        }
        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::EmailExists);
        }
        if input.password != input.confirm_password {
            return Err(AppError::PasswordMismatch);
        }

        let user = self
            .repo
            .create(&CreateUserRecord {
                name: input.name,
                username: input.username,
                email: input.email,
                password: digest,
                phone_number: input.phone_number,
                role_code: ROLE_USER.to_string(),
            })
            .await?;

        Ok(UserResponse::from(&user))
    }

    /// Update an existing account. Username/email may only change to values
    /// not taken by a *different* record; a new password must match its
    /// confirmation and is re-hashed.
    pub async fn update(&self, uuid: StringUuid, input: UpdateUserInput) -> Result<UserResponse> {
        input.validate()?;

        let current = self
            .repo
            .find_by_uuid(uuid)
            .await?
            .ok_or(AppError::NotFound)?;

        if current.username != input.username
            && self.repo.find_by_username(&input.username).await?.is_some()
        {
            return Err(AppError::UsernameExists);
        }
        if current.email != input.email && self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::EmailExists);
        }

        let password = match &input.password {
            Some(plain) => {
                if input.confirm_password.as_deref() != Some(plain) {
                    return Err(AppError::PasswordMismatch);
                }
                Some(self.hasher.hash(plain)?)
            }
            None => None,
        };

        let user = self
            .repo
            .update(
                uuid,
                &UpdateUserRecord {
                    name: input.name,
                    username: input.username,
                    email: input.email,
                    password,
                    phone_number: input.phone_number,
                },
            )
            .await?;

        Ok(UserResponse::from(&user))
    }

    pub async fn get_by_uuid(&self, uuid: StringUuid) -> Result<UserResponse> {
        let user = self
            .repo
            .find_by_uuid(uuid)
            .await?
            .ok_or(AppError::NotFound)?;
        Ok(UserResponse::from(&user))
    }
}
