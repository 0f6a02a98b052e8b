//! # Postboard Shared
//!
//! Wire types shared by the API server and its clients: request/response
//! DTOs with their validation rules, and the JSON error body.

pub mod dto;
pub mod response;

pub use response::{ErrorDetail, ErrorResponse, MessageResponse};
