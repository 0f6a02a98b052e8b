//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};

use postboard_core::domain::{PageRequest, Post, PostFilter};
use postboard_core::error::RepoError;
use postboard_core::ports::{PostRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::Entity as UserEntity;
use super::filter::post_condition;
use super::postgres_base::{PostgresBaseRepository, query_err};

/// PostgreSQL user repository.
///
/// Post removal on user delete is handled by the `ON DELETE CASCADE`
/// foreign key created by the migration.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

impl UserRepository for PostgresUserRepository {}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_page(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(?filter, page = page.page(), size = page.size(), "Finding post page");

        let result = PostEntity::find()
            .filter(post_condition(filter))
            .order_by_asc(post::Column::Id)
            .offset(page.offset())
            .limit(page.size())
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        PostEntity::find()
            .filter(post_condition(filter))
            .count(&self.db)
            .await
            .map_err(query_err)
    }

    async fn find_matching(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(?filter, "Finding all matching posts");

        let result = PostEntity::find()
            .filter(post_condition(filter))
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
