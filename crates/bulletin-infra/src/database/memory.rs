//! In-memory post repository - used when the server is built without Postgres.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use bulletin_core::domain::{Post, PostFilter};
use bulletin_core::error::RepoError;
use bulletin_core::ports::{BaseRepository, PostRepository};

/// In-memory post store guarded by an async RwLock.
///
/// Rows are kept in insertion order. Data is lost on process restart.
pub struct InMemoryPostRepository {
    rows: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut rows = self.rows.write().await;

        if rows.iter().any(|p| p.id == post.id) {
            return Err(RepoError::Constraint(format!("Post {} already exists", post.id)));
        }

        rows.push(post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(RepoError::NotFound)?;

        *row = post.clone();
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|p| p.id != id);

        if rows.len() == before {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().filter(|p| filter.matches(p)).cloned().collect())
    }

    async fn find_one(&self, filter: &PostFilter) -> Result<Option<Post>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|p| filter.matches(p)).cloned())
    }

    async fn delete_all(&self) -> Result<u64, RepoError> {
        let mut rows = self.rows.write().await;
        let removed = rows.len() as u64;
        rows.clear();

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(poster: &str, title: &str) -> Post {
        Post::new(poster.to_string(), title.to_string(), "body".to_string())
    }

    #[tokio::test]
    async fn test_insert_and_find_by_id() {
        let repo = InMemoryPostRepository::new();
        let saved = repo.insert(post("alice", "Hi")).await.unwrap();

        assert_eq!(repo.find_by_id(saved.id).await.unwrap(), Some(saved.clone()));
        assert!(matches!(
            repo.insert(saved).await,
            Err(RepoError::Constraint(_))
        ));
    }

    #[tokio::test]
    async fn test_find_keeps_insertion_order() {
        let repo = InMemoryPostRepository::new();
        for (poster, title) in [("bob", "first"), ("alice", "second"), ("bob", "third")] {
            repo.insert(post(poster, title)).await.unwrap();
        }

        let bob: Vec<_> = repo
            .find(&PostFilter::by_poster("bob"))
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();

        assert_eq!(bob, ["first", "third"]);
        assert_eq!(repo.find(&PostFilter::all()).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_find_one_requires_every_filter() {
        let repo = InMemoryPostRepository::new();
        let saved = repo.insert(post("alice", "Hi")).await.unwrap();

        let owned = repo.find_one(&PostFilter::owned(saved.id, "alice")).await.unwrap();
        let other = repo.find_one(&PostFilter::owned(saved.id, "bob")).await.unwrap();

        assert_eq!(owned, Some(saved));
        assert_eq!(other, None);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_rows() {
        let repo = InMemoryPostRepository::new();

        assert!(matches!(
            repo.update(post("alice", "Hi")).await,
            Err(RepoError::NotFound)
        ));
        assert!(matches!(
            repo.delete(Uuid::new_v4()).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_all() {
        let repo = InMemoryPostRepository::new();
        repo.insert(post("alice", "a")).await.unwrap();
        repo.insert(post("bob", "b")).await.unwrap();

        assert_eq!(repo.delete_all().await.unwrap(), 2);
        assert!(repo.find(&PostFilter::all()).await.unwrap().is_empty());
        assert_eq!(repo.delete_all().await.unwrap(), 0);
    }
}
