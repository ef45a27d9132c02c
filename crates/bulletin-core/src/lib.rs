//! # Bulletin Core
//!
//! The domain layer of the bulletin backend.
//! This crate contains the post model, validation rules and the service that
//! drives them, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
pub use service::{PostService, ResetCredentials};
