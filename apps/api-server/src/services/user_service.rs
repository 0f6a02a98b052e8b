use std::sync::Arc;

use postboard_core::DomainError;
use postboard_core::domain::User;
use postboard_core::ports::UserRepository;
use postboard_shared::dto::{UserRequest, UserResponse};
use validator::Validate;

use super::mapping::{new_user, replaced_user, user_response};
use crate::middleware::error::AppResult;

/// User CRUD.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn list(&self) -> AppResult<Vec<UserResponse>> {
        let users = self.users.find_all().await?;

        Ok(users.into_iter().map(user_response).collect())
    }

    pub async fn get(&self, id: i64) -> AppResult<UserResponse> {
        Ok(user_response(self.find(id).await?))
    }

    pub async fn create(&self, req: UserRequest) -> AppResult<UserResponse> {
        req.validate()?;

        let user = self.users.insert(new_user(req)?).await?;
        tracing::info!(user_id = user.id, "User created");

        Ok(user_response(user))
    }

    /// Replace username and email of an existing user.
    pub async fn update(&self, id: i64, req: UserRequest) -> AppResult<UserResponse> {
        req.validate()?;
        self.find(id).await?;

        let user = self.users.update(replaced_user(id, req)?).await?;
        tracing::info!(user_id = id, "User updated");

        Ok(user_response(user))
    }

    /// Delete a user together with all of the user's posts.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.find(id).await?;
        self.users.delete(id).await?;
        tracing::info!(user_id = id, "User deleted");

        Ok(())
    }

    async fn find(&self, id: i64) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id).into())
    }
}
