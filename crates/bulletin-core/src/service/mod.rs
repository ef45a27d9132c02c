//! Services - the operations exposed to the HTTP layer.

mod post_service;

pub use post_service::{PostService, ResetCredentials};
