use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Post entity - a message left on the board by a poster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub poster: String,
    pub title: String,
    pub body: String,
}

impl Post {
    /// Create a new post with a generated ID.
    pub fn new(poster: String, title: String, body: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            poster,
            title,
            body,
        }
    }
}

/// Post fields taken from a request, any of which may be missing.
///
/// The service decides which fields an operation needs. There is no id: ids
/// are always generated on creation or taken from the request path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub poster: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
}

impl PostDraft {
    /// Turn a complete draft into a new post, or report what is missing.
    pub fn into_post(self) -> Result<Post, DomainError> {
        match (self.poster, self.title, self.body) {
            (Some(poster), Some(title), Some(body)) => Ok(Post::new(poster, title, body)),
            _ => Err(DomainError::PartialInformation(
                "Requires poster, body, and title".to_string(),
            )),
        }
    }
}

/// Equality filters over the post table. Empty filters match every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub id: Option<Uuid>,
    pub poster: Option<String>,
}

impl PostFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_poster(poster: impl Into<String>) -> Self {
        Self {
            id: None,
            poster: Some(poster.into()),
        }
    }

    /// Match a single post only when it belongs to `poster`.
    pub fn owned(id: Uuid, poster: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            poster: Some(poster.into()),
        }
    }

    pub fn matches(&self, post: &Post) -> bool {
        self.id.is_none_or(|id| post.id == id)
            && self.poster.as_deref().is_none_or(|p| post.poster == p)
    }
}

/// Parse a post id taken from a request path. Malformed ids count as absent.
pub fn parse_post_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_draft_becomes_post() {
        let draft = PostDraft {
            poster: Some("alice".into()),
            title: Some("Hi".into()),
            body: Some("Hello".into()),
        };

        let post = draft.into_post().unwrap();
        assert_eq!(post.poster, "alice");
        assert_eq!(post.title, "Hi");
        assert_eq!(post.body, "Hello");
        assert!(!post.id.is_nil());
    }

    #[test]
    fn test_draft_missing_any_field_is_partial() {
        let full = PostDraft {
            poster: Some("alice".into()),
            title: Some("Hi".into()),
            body: Some("Hello".into()),
        };
        let drafts = [
            PostDraft { poster: None, ..full.clone() },
            PostDraft { title: None, ..full.clone() },
            PostDraft { body: None, ..full },
        ];

        for draft in drafts {
            let err = draft.into_post().unwrap_err();
            assert!(matches!(err, DomainError::PartialInformation(ref msg) if msg.contains("poster, body, and title")));
        }
    }

    #[test]
    fn test_filter_matching() {
        let post = Post::new("alice".into(), "Hi".into(), "Hello".into());

        assert!(PostFilter::all().matches(&post));
        assert!(PostFilter::by_poster("alice").matches(&post));
        assert!(!PostFilter::by_poster("bob").matches(&post));
        assert!(PostFilter::owned(post.id, "alice").matches(&post));
        assert!(!PostFilter::owned(post.id, "bob").matches(&post));
        assert!(!PostFilter::owned(Uuid::new_v4(), "alice").matches(&post));
    }

    #[test]
    fn test_parse_post_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_post_id(&id.to_string()), Some(id));
        assert_eq!(parse_post_id("reset"), None);
    }
}
