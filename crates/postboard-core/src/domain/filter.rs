//! Typed query inputs for post listings and reports.

use super::Post;
use crate::error::DomainError;

/// Conjunctive filter over a single user's posts.
///
/// `None` means "no constraint" for that column, never "false".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostFilter {
    pub user_id: i64,
    /// Lower bound (inclusive) on `likes_count`.
    pub min_likes: Option<i32>,
    pub published: Option<bool>,
}

impl PostFilter {
    pub fn for_user(user_id: i64) -> Self {
        Self {
            user_id,
            min_likes: None,
            published: None,
        }
    }

    pub fn with_min_likes(mut self, min_likes: Option<i32>) -> Self {
        self.min_likes = min_likes;
        self
    }

    pub fn with_published(mut self, published: Option<bool>) -> Self {
        self.published = published;
        self
    }

    /// Evaluate the filter against an already loaded post.
    pub fn matches(&self, post: &Post) -> bool {
        post.user_id == self.user_id
            && self.min_likes.is_none_or(|min| post.likes_count >= min)
            && self.published.is_none_or(|flag| post.published == flag)
    }
}

/// Zero-based page index plus a page size of at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    size: u64,
}

impl PageRequest {
    /// Validate raw page parameters before any query is issued.
    pub fn new(page: i64, size: i64) -> Result<Self, DomainError> {
        if page < 0 {
            return Err(DomainError::Validation(
                "'page' parameter must be a positive integer or 0".to_string(),
            ));
        }
        if size < 1 {
            return Err(DomainError::Validation(
                "'size' parameter must be a positive integer greater than 0".to_string(),
            ));
        }

        Ok(Self {
            page: page as u64,
            size: size as u64,
        })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }

    /// `ceil(total / size)`.
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.size)
    }
}
