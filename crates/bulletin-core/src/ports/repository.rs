use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, PostFilter};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// All posts matching `filter`.
    async fn find(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError>;

    /// The first post matching `filter`.
    async fn find_one(&self, filter: &PostFilter) -> Result<Option<Post>, RepoError>;

    /// Remove every post in one statement, returning the number removed.
    async fn delete_all(&self) -> Result<u64, RepoError>;
}
