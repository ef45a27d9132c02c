//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter};

use bulletin_core::domain::{Post, PostFilter};
use bulletin_core::error::RepoError;
use bulletin_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, repo_err};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// Equality filters joined with AND; absent filters add nothing.
pub(crate) fn condition(filter: &PostFilter) -> Condition {
    Condition::all()
        .add_option(filter.id.map(|id| post::Column::Id.eq(id)))
        .add_option(
            filter
                .poster
                .as_deref()
                .map(|poster| post::Column::Poster.eq(poster)),
        )
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(?filter, "Querying posts");

        let result = PostEntity::find()
            .filter(condition(filter))
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_one(&self, filter: &PostFilter) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(condition(filter))
            .one(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.map(Into::into))
    }

    async fn delete_all(&self) -> Result<u64, RepoError> {
        let result = PostEntity::delete_many()
            .exec(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.rows_affected)
    }
}
