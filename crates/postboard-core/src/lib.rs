//! # Postboard Core
//!
//! The domain layer of the Postboard backend.
//! Entities, query types and repository ports live here; nothing in this
//! crate knows which database (if any) sits behind the ports.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
