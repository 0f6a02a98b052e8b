use serde::{Deserialize, Serialize};

/// Post entity - a piece of content owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub likes_count: i32,
    pub user_id: i64,
}

/// A post that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub published: bool,
    pub likes_count: i32,
    pub user_id: i64,
}

impl NewPost {
    /// Create a draft with no likes yet.
    pub fn new(user_id: i64, title: String, content: String, published: bool) -> Self {
        Self {
            title,
            content,
            published,
            likes_count: 0,
            user_id,
        }
    }

    pub fn with_likes(mut self, likes_count: i32) -> Self {
        self.likes_count = likes_count;
        self
    }

    pub fn with_id(self, id: i64) -> Post {
        Post {
            id,
            title: self.title,
            content: self.content,
            published: self.published,
            likes_count: self.likes_count,
            user_id: self.user_id,
        }
    }
}
