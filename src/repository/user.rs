//! User repository

use crate::domain::{CreateUserRecord, StringUuid, UpdateUserRecord, User};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

const USER_COLUMNS: &str = r#"
    u.uuid, u.name, u.username, u.email, u.password, u.phone_number,
    r.code AS role_code, u.created_at, u.updated_at
"#;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_by_uuid(&self, uuid: StringUuid) -> Result<Option<User>>;
    async fn create(&self, record: &CreateUserRecord) -> Result<User>;
    async fn update(&self, uuid: StringUuid, record: &UpdateUserRecord) -> Result<User>;
}

pub struct UserRepositoryImpl {
    pool: MySqlPool,
}

impl UserRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users u JOIN roles r ON r.id = u.role_id
            WHERE u.username = ?
            "#
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users u JOIN roles r ON r.id = u.role_id
            WHERE u.email = ?
            "#
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_uuid(&self, uuid: StringUuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users u JOIN roles r ON r.id = u.role_id
            WHERE u.uuid = ?
            "#
        ))
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, record: &CreateUserRecord) -> Result<User> {
        let uuid = StringUuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO users (uuid, name, username, email, password, phone_number, role_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, (SELECT id FROM roles WHERE code = ?), NOW(), NOW())
            "#,
        )
        .bind(uuid)
        .bind(&record.name)
        .bind(&record.username)
        .bind(&record.email)
        .bind(&record.password)
        .bind(&record.phone_number)
        .bind(&record.role_code)
        .execute(&self.pool)
        .await?;

        self.find_by_uuid(uuid)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create user")))
    }

    async fn update(&self, uuid: StringUuid, record: &UpdateUserRecord) -> Result<User> {
        // COALESCE keeps the stored digest when no password change was requested
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = ?, username = ?, email = ?, phone_number = ?,
                password = COALESCE(?, password), updated_at = NOW()
            WHERE uuid = ?
            "#,
        )
        .bind(&record.name)
        .bind(&record.username)
        .bind(&record.email)
        .bind(&record.phone_number)
        .bind(&record.password)
        .bind(uuid)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Database(sqlx::Error::RowNotFound));
        }

        self.find_by_uuid(uuid)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update user")))
    }
}
