//! Post operations: validation, ownership checks and the guarded reset.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Post, PostDraft, PostFilter};
use crate::error::DomainError;
use crate::ports::{AuthError, PasswordService, PostRepository};

/// Hashed credentials that unlock the reset operation.
///
/// Both halves are stored as password hashes so a reset request is never
/// compared against plain text.
#[derive(Debug, Clone)]
pub struct ResetCredentials {
    username_hash: String,
    password_hash: String,
}

impl ResetCredentials {
    /// Hash a plain username/password pair.
    pub fn hash(
        passwords: &dyn PasswordService,
        username: &str,
        password: &str,
    ) -> Result<Self, AuthError> {
        Ok(Self {
            username_hash: passwords.hash(username)?,
            password_hash: passwords.hash(password)?,
        })
    }

    /// Use a password that was hashed ahead of time.
    ///
    /// Fails if `password_hash` is not a hash `passwords` can verify against.
    pub fn with_password_hash(
        passwords: &dyn PasswordService,
        username: &str,
        password_hash: String,
    ) -> Result<Self, AuthError> {
        passwords.verify("", &password_hash)?;

        Ok(Self {
            username_hash: passwords.hash(username)?,
            password_hash,
        })
    }
}

/// Post service - turns decoded requests into store calls.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    passwords: Arc<dyn PasswordService>,
    reset: Option<ResetCredentials>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        passwords: Arc<dyn PasswordService>,
        reset: Option<ResetCredentials>,
    ) -> Self {
        Self {
            posts,
            passwords,
            reset,
        }
    }

    /// List posts, optionally only those by `poster`.
    pub async fn list(&self, poster: Option<String>) -> Result<Vec<Post>, DomainError> {
        let filter = poster.map(PostFilter::by_poster).unwrap_or_default();
        tracing::debug!(?filter, "Listing posts");

        Ok(self.posts.find(&filter).await?)
    }

    pub async fn get(&self, id: Option<Uuid>) -> Result<Post, DomainError> {
        let Some(id) = id else {
            return Err(DomainError::post_not_found("with malformed id"));
        };

        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    pub async fn create(&self, draft: PostDraft) -> Result<Post, DomainError> {
        let post = self.posts.insert(draft.into_post()?).await?;
        tracing::info!(post_id = %post.id, poster = %post.poster, "Post created");

        Ok(post)
    }

    /// Replace the body of a post owned by the draft's poster.
    ///
    /// Title and poster are never changed.
    pub async fn update(&self, id: Option<Uuid>, draft: PostDraft) -> Result<Post, DomainError> {
        let (Some(id), Some(poster), Some(body)) = (id, draft.poster, draft.body) else {
            return Err(DomainError::PartialInformation(
                "Requires poster: <String> and body: <String>".to_string(),
            ));
        };

        let mut post = self.find_owned(id, poster).await?;
        post.body = body;

        let post = self.posts.update(post).await?;
        tracing::info!(post_id = %post.id, "Post updated");

        Ok(post)
    }

    /// Delete a post owned by the draft's poster, returning what was removed.
    pub async fn delete(&self, id: Option<Uuid>, draft: PostDraft) -> Result<Post, DomainError> {
        let (Some(id), Some(poster)) = (id, draft.poster) else {
            return Err(DomainError::PartialInformation(
                "Requires poster: <String>".to_string(),
            ));
        };

        let post = self.find_owned(id, poster).await?;
        self.posts.delete(post.id).await?;
        tracing::info!(post_id = %post.id, "Post deleted");

        Ok(post)
    }

    /// Wipe every post once the reset credentials check out.
    pub async fn reset(&self, username: &str, password: &str) -> Result<u64, DomainError> {
        let Some(credentials) = &self.reset else {
            tracing::warn!("Reset requested but no reset credentials are configured");
            return Err(DomainError::Unauthorized);
        };

        // Both checks run so timing does not tell which half was wrong.
        let username_ok = self.verify(username, &credentials.username_hash)?;
        let password_ok = self.verify(password, &credentials.password_hash)?;

        if !(username_ok & password_ok) {
            tracing::warn!("Reset denied: credentials mismatch");
            return Err(DomainError::Unauthorized);
        }

        let deleted = self.posts.delete_all().await?;
        tracing::info!(deleted, "All posts reset");

        Ok(deleted)
    }

    async fn find_owned(&self, id: Uuid, poster: String) -> Result<Post, DomainError> {
        self.posts
            .find_one(&PostFilter::owned(id, poster))
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    fn verify(&self, secret: &str, hash: &str) -> Result<bool, DomainError> {
        self.passwords
            .verify(secret, hash)
            .map_err(|e| DomainError::Internal(e.to_string()))
    }
}
