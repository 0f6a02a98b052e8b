//! Domain entities - the core business objects.

mod filter;
mod post;
mod user;

pub use filter::{PageRequest, PostFilter};
pub use post::{NewPost, Post};
pub use user::{NewUser, User};
