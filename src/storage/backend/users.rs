//! User operations for SeaOrmStorage
//!
//! Passwords arrive here already hashed; the hash is only ever read back by
//! `find_credentials`.

use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder};
use tracing::info;

use super::SeaOrmStorage;
use super::converters::model_to_user;
use super::retry;
use crate::errors::{LivescoreError, Result};
use crate::storage::models::{User, UserRole};

use migration::entities::user;

/// Stored login data for one user
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Column values for an update; `None` leaves the column alone
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

impl SeaOrmStorage {
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let db = &self.db;
        let models = retry::with_retry("list_users", self.retry_config, || async {
            user::Entity::find()
                .order_by_asc(user::Column::Id)
                .all(db)
                .await
        })
        .await
        .map_err(|e| LivescoreError::database_operation(format!("Failed to load users: {}", e)))?;

        Ok(models.into_iter().map(model_to_user).collect())
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        let db = &self.db;
        let model = retry::with_retry(&format!("get_user({})", id), self.retry_config, || async {
            user::Entity::find_by_id(id).one(db).await
        })
        .await
        .map_err(|e| {
            LivescoreError::database_operation(format!("Failed to load user {}: {}", id, e))
        })?;

        Ok(model.map(model_to_user))
    }

    pub async fn find_credentials(&self, username: &str) -> Result<Option<UserCredentials>> {
        let db = &self.db;
        let model = retry::with_retry("find_credentials", self.retry_config, || async {
            user::Entity::find()
                .filter(user::Column::Username.eq(username))
                .one(db)
                .await
        })
        .await
        .map_err(|e| {
            LivescoreError::database_operation(format!("Failed to load user '{}': {}", username, e))
        })?;

        Ok(model.map(|m| {
            let password_hash = m.password_hash.clone();
            UserCredentials {
                user: model_to_user(m),
                password_hash,
            }
        }))
    }

    /// Whether another user (other than `exclude_id`) already holds the username or email
    pub async fn user_identity_taken(
        &self,
        username: Option<&str>,
        email: Option<&str>,
        exclude_id: Option<i32>,
    ) -> Result<bool> {
        let mut any = Condition::any();
        if let Some(username) = username {
            any = any.add(user::Column::Username.eq(username));
        }
        if let Some(email) = email {
            any = any.add(user::Column::Email.eq(email));
        }
        if username.is_none() && email.is_none() {
            return Ok(false);
        }

        let mut query = user::Entity::find().filter(any);
        if let Some(id) = exclude_id {
            query = query.filter(user::Column::Id.ne(id));
        }

        let existing = query.one(&self.db).await.map_err(|e| {
            LivescoreError::database_operation(format!("Failed to check user uniqueness: {}", e))
        })?;
        Ok(existing.is_some())
    }

    pub async fn insert_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role: UserRole,
        is_active: bool,
    ) -> Result<User> {
        let now = Utc::now();
        let active_model = user::ActiveModel {
            id: NotSet,
            username: Set(username.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
            role: Set(role.as_ref().to_string()),
            is_active: Set(is_active),
            last_login: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(|e| {
            LivescoreError::database_operation(format!("Failed to create user '{}': {}", username, e))
        })?;

        info!("User created: {} ({})", model.username, model.role);
        Ok(model_to_user(model))
    }

    pub async fn update_user(&self, id: i32, changes: UserChanges) -> Result<Option<User>> {
        let mut update = user::Entity::update_many()
            .col_expr(user::Column::UpdatedAt, Expr::val(Utc::now()))
            .filter(user::Column::Id.eq(id));

        if let Some(username) = changes.username {
            update = update.col_expr(user::Column::Username, Expr::val(username));
        }
        if let Some(email) = changes.email {
            update = update.col_expr(user::Column::Email, Expr::val(email));
        }
        if let Some(hash) = changes.password_hash {
            update = update.col_expr(user::Column::PasswordHash, Expr::val(hash));
        }
        if let Some(role) = changes.role {
            update = update.col_expr(user::Column::Role, Expr::val(role.as_ref()));
        }
        if let Some(is_active) = changes.is_active {
            update = update.col_expr(user::Column::IsActive, Expr::val(is_active));
        }

        let result = update.exec(&self.db).await.map_err(|e| {
            LivescoreError::database_operation(format!("Failed to update user {}: {}", id, e))
        })?;
        if result.rows_affected == 0 {
            return Ok(None);
        }

        info!("User updated: {}", id);
        self.get_user(id).await
    }

    pub async fn delete_user(&self, id: i32) -> Result<bool> {
        let db = &self.db;
        let result = retry::with_retry(&format!("delete_user({})", id), self.retry_config, || async {
            user::Entity::delete_by_id(id).exec(db).await
        })
        .await
        .map_err(|e| {
            LivescoreError::database_operation(format!("Failed to delete user {}: {}", id, e))
        })?;

        if result.rows_affected > 0 {
            info!("User deleted: {}", id);
        }
        Ok(result.rows_affected > 0)
    }

    pub async fn touch_last_login(&self, id: i32) -> Result<()> {
        user::Entity::update_many()
            .col_expr(user::Column::LastLogin, Expr::val(Some(Utc::now())))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                LivescoreError::database_operation(format!(
                    "Failed to record login for user {}: {}",
                    id, e
                ))
            })?;
        Ok(())
    }

    pub async fn count_admins(&self) -> Result<u64> {
        use sea_orm::PaginatorTrait;

        user::Entity::find()
            .filter(user::Column::Role.eq(UserRole::Admin.as_ref()))
            .filter(user::Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(|e| LivescoreError::database_operation(format!("Failed to count admins: {}", e)))
    }
}
