//! Back-office user accounts

use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::{LivescoreError, Result};
use crate::storage::{NewUser, SeaOrmStorage, User, UserChanges, UserPatch, UserRole};
use crate::utils::password::{hash_password, is_argon2_hash, process_update_password, verify_password};

const MIN_PASSWORD_LEN: usize = 8;

pub struct UserService {
    storage: Arc<SeaOrmStorage>,
}

fn validate_username(username: &str) -> Result<()> {
    let len = username.chars().count();
    if !(3..=50).contains(&len) {
        return Err(LivescoreError::validation(
            "Username must be between 3 and 50 characters",
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        return Err(LivescoreError::validation(
            "Username may only contain letters, digits, '_', '.' and '-'",
        ));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(LivescoreError::validation(format!(
            "Invalid email address: {}",
            email
        )));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(LivescoreError::validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

impl UserService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.storage.list_users().await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        self.storage.get_user(id).await
    }

    pub async fn create_user(&self, new_user: NewUser) -> Result<User> {
        let username = new_user.username.trim();
        let email = new_user.email.trim().to_lowercase();
        validate_username(username)?;
        validate_email(&email)?;
        validate_password(&new_user.password)?;

        if self
            .storage
            .user_identity_taken(Some(username), Some(&email), None)
            .await?
        {
            return Err(LivescoreError::validation(
                "A user with this username or email already exists",
            ));
        }

        let hash = hash_password(&new_user.password)?;
        self.storage
            .insert_user(username, &email, &hash, new_user.role, new_user.is_active)
            .await
    }

    /// Partial update; `None` when the user does not exist
    pub async fn update_user(&self, id: i32, patch: UserPatch) -> Result<Option<User>> {
        let Some(existing) = self.storage.get_user(id).await? else {
            return Ok(None);
        };

        let username = patch.username.as_deref().map(str::trim);
        let email = patch.email.as_deref().map(|e| e.trim().to_lowercase());
        if let Some(username) = username {
            validate_username(username)?;
        }
        if let Some(email) = &email {
            validate_email(email)?;
        }
        if let Some(password) = patch.password.as_deref().filter(|p| !p.is_empty()) {
            validate_password(password)?;
        }

        if self
            .storage
            .user_identity_taken(username, email.as_deref(), Some(id))
            .await?
        {
            return Err(LivescoreError::validation(
                "A user with this username or email already exists",
            ));
        }

        let loses_admin = existing.role == UserRole::Admin
            && existing.is_active
            && (patch.role.is_some_and(|r| r != UserRole::Admin) || patch.is_active == Some(false));
        if loses_admin {
            self.ensure_other_admin().await?;
        }

        let changes = UserChanges {
            username: username.map(str::to_string),
            email,
            password_hash: process_update_password(patch.password.as_deref())?,
            role: patch.role,
            is_active: patch.is_active,
        };
        self.storage.update_user(id, changes).await
    }

    /// `false` when there was nothing to delete
    pub async fn delete_user(&self, id: i32) -> Result<bool> {
        let Some(existing) = self.storage.get_user(id).await? else {
            return Ok(false);
        };
        if existing.role == UserRole::Admin && existing.is_active {
            self.ensure_other_admin().await?;
        }
        self.storage.delete_user(id).await
    }

    async fn ensure_other_admin(&self) -> Result<()> {
        if self.storage.count_admins().await? <= 1 {
            return Err(LivescoreError::validation(
                "Cannot remove the last active admin",
            ));
        }
        Ok(())
    }

    /// `None` for unknown users, inactive users and wrong passwords
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>> {
        let Some(credentials) = self.storage.find_credentials(username.trim()).await? else {
            return Ok(None);
        };

        if !credentials.user.is_active {
            info!("Login rejected for inactive user '{}'", credentials.user.username);
            return Ok(None);
        }

        if !is_argon2_hash(&credentials.password_hash) {
            warn!(
                "User '{}' has a legacy password value, reset it with create-user",
                credentials.user.username
            );
            return Ok(None);
        }

        match verify_password(password, &credentials.password_hash) {
            Ok(true) => {}
            Ok(false) => return Ok(None),
            Err(e) => {
                warn!(
                    "Unreadable password hash for user '{}': {}",
                    credentials.user.username, e
                );
                return Ok(None);
            }
        }

        let id = credentials.user.id;
        self.storage.touch_last_login(id).await?;
        Ok(Some(self.storage.get_user(id).await?.unwrap_or(credentials.user)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("editor_01").is_ok());
        assert!(validate_username("a.b-c").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username(&"x".repeat(51)).is_err());
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("admin@example.com").is_ok());
        assert!(validate_email("admin@localhost").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("admin example@x.com").is_err());
    }

    #[test]
    fn test_password_length() {
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password("short").is_err());
    }
}
