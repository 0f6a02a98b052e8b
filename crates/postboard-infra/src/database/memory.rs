//! In-memory repositories - used as fallback when no database is configured.
//!
//! Users and posts share one set of tables so the relational rules of the
//! SQL schema (unique username/email, post owner must exist, cascading user
//! delete) hold here as well. Data is lost on process restart.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use postboard_core::domain::{NewPost, NewUser, PageRequest, Post, PostFilter, User};
use postboard_core::error::RepoError;
use postboard_core::ports::{BaseRepository, PostRepository, UserRepository};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    posts: BTreeMap<i64, Post>,
    user_seq: i64,
    post_seq: i64,
}

impl Tables {
    fn check_unique(
        &self,
        username: &str,
        email: &str,
        skip: Option<i64>,
    ) -> Result<(), RepoError> {
        let taken = |u: &&User| Some(u.id) != skip && (u.username == username || u.email == email);
        let clash = self.users.values().find(taken);

        match clash {
            Some(existing) if existing.username == username => Err(RepoError::Constraint(
                format!("Entity already exists: username '{username}' is taken"),
            )),
            Some(_) => Err(RepoError::Constraint(format!(
                "Entity already exists: email '{email}' is taken"
            ))),
            None => Ok(()),
        }
    }

    fn check_owner(&self, user_id: i64) -> Result<(), RepoError> {
        if self.users.contains_key(&user_id) {
            Ok(())
        } else {
            Err(RepoError::Constraint(format!(
                "Referenced entity does not exist: user {user_id}"
            )))
        }
    }
}

/// Shared in-memory store handing out user and post repositories.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repository(&self) -> InMemoryUserRepository {
        InMemoryUserRepository {
            tables: self.tables.clone(),
        }
    }

    pub fn post_repository(&self) -> InMemoryPostRepository {
        InMemoryPostRepository {
            tables: self.tables.clone(),
        }
    }
}

/// In-memory user repository.
pub struct InMemoryUserRepository {
    tables: Arc<RwLock<Tables>>,
}

/// In-memory post repository.
pub struct InMemoryPostRepository {
    tables: Arc<RwLock<Tables>>,
}

#[async_trait]
impl BaseRepository<User, NewUser, i64> for InMemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }

    async fn insert(&self, draft: NewUser) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        tables.check_unique(&draft.username, &draft.email, None)?;

        tables.user_seq += 1;
        let user = draft.with_id(tables.user_seq);
        tables.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn update(&self, entity: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&entity.id) {
            return Err(RepoError::NotFound);
        }
        tables.check_unique(&entity.username, &entity.email, Some(entity.id))?;
        tables.users.insert(entity.id, entity.clone());

        Ok(entity)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }

        // ON DELETE CASCADE
        tables.posts.retain(|_, post| post.user_id != id);
        Ok(())
    }
}

impl UserRepository for InMemoryUserRepository {}

#[async_trait]
impl BaseRepository<Post, NewPost, i64> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.tables.read().await.posts.values().cloned().collect())
    }

    async fn insert(&self, draft: NewPost) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        tables.check_owner(draft.user_id)?;

        tables.post_seq += 1;
        let post = draft.with_id(tables.post_seq);
        tables.posts.insert(post.id, post.clone());

        Ok(post)
    }

    async fn update(&self, entity: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&entity.id) {
            return Err(RepoError::NotFound);
        }
        tables.check_owner(entity.user_id)?;
        tables.posts.insert(entity.id, entity.clone());

        Ok(entity)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        match self.tables.write().await.posts.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_page(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;

        Ok(tables
            .posts
            .values()
            .filter(|post| filter.matches(post))
            .skip(page.offset() as usize)
            .take(page.size() as usize)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        let tables = self.tables.read().await;

        let matching = tables.posts.values().filter(|post| filter.matches(post));

        Ok(matching.count() as u64)
    }

    async fn find_matching(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;

        Ok(tables
            .posts
            .values()
            .filter(|post| filter.matches(post))
            .cloned()
            .collect())
    }
}
