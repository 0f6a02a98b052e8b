//! Application services - validation, mapping and orchestration between
//! handlers and repositories.

mod mapping;
mod post_service;
mod report;
mod user_service;

pub use post_service::PostService;
pub use user_service::UserService;
