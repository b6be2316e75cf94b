use super::UserStore;
use crate::{models::User, utils::AppError};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::RwLock;

/// Store backed by a vector, with the same uniqueness rule as the
/// `users(email)` index.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn count_by_email(&self, email: &str) -> usize {
        self.users
            .read()
            .map(|users| users.iter().filter(|u| u.email == email).count())
            .unwrap_or(0)
    }

    pub fn total_users(&self) -> usize {
        self.users.read().map(|users| users.len()).unwrap_or(0)
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self
            .users
            .read()
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, mut user: User) -> Result<User, AppError> {
        let mut users = self
            .users
            .write()
            .map_err(|e| AppError::StoreWriteError(e.to_string()))?;

        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::DuplicateAccount);
        }

        user.id = Some(ObjectId::new());
        users.push(user.clone());
        Ok(user)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Store whose every call fails, as if MongoDB went away.
pub struct UnavailableUserStore;

#[async_trait]
impl UserStore for UnavailableUserStore {
    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, AppError> {
        Err(AppError::StoreUnavailable("server selection timeout".to_string()))
    }

    async fn insert(&self, _user: User) -> Result<User, AppError> {
        Err(AppError::StoreWriteError("server selection timeout".to_string()))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(AppError::StoreUnavailable("server selection timeout".to_string()))
    }
}
