use async_trait::async_trait;

use crate::domain::{NewPost, NewUser, PageRequest, Post, PostFilter, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
///
/// `D` is the draft type accepted by [`insert`](Self::insert); the store
/// assigns the identifier.
#[async_trait]
pub trait BaseRepository<T, D, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Load every entity of this type.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Persist a new entity and return it with its generated ID.
    async fn insert(&self, draft: D) -> Result<T, RepoError>;

    /// Overwrite every column of an existing entity.
    ///
    /// Returns [`RepoError::NotFound`] when no row carries the entity's ID.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository. Deleting a user removes the user's posts as well.
pub trait UserRepository: BaseRepository<User, NewUser, i64> {}

/// Post repository with filtered queries.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, NewPost, i64> {
    /// One page of posts matching `filter`, ordered by id.
    async fn find_page(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<Vec<Post>, RepoError>;

    /// Number of posts matching `filter`.
    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError>;

    /// Every post matching `filter`, ordered by id.
    async fn find_matching(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError>;
}
