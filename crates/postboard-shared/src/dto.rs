//! Data Transfer Objects - request/response types for the API.
//!
//! Request fields are `Option`s so that a missing field is reported through
//! validation (`required`) with a per-field error instead of failing JSON
//! deserialization as a whole.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Request body for creating or replacing a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    #[validate(
        required(message = "Name is required"),
        custom(function = "not_blank", message = "Name is required")
    )]
    pub username: Option<String>,

    #[validate(
        required(message = "Email is required"),
        custom(function = "not_blank", message = "Email is required"),
        email(message = "must be a well-formed email address")
    )]
    pub email: Option<String>,
}

impl UserRequest {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            email: Some(email.into()),
        }
    }
}

/// A user's public information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

/// Reference to the owning user inside a post payload: `{"id": 1}`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Validate)]
pub struct UserRef {
    #[validate(required(message = "must not be null"))]
    pub id: Option<i64>,
}

/// Request body for creating a post, also the element type of bulk imports.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[validate(
        required(message = "Title is required"),
        custom(function = "not_blank", message = "Title is required"),
        length(max = 100, message = "Title must be at most 100 characters")
    )]
    pub title: Option<String>,

    #[validate(
        required(message = "Text is required"),
        custom(function = "not_blank", message = "Text is required"),
        length(max = 500, message = "Text must be at most 500 characters")
    )]
    pub content: Option<String>,

    #[validate(required(message = "must not be null"))]
    pub is_published: Option<bool>,

    /// Defaults to 0 when omitted.
    #[validate(range(min = 0, message = "Parameter must be a positive integer or 0"))]
    pub likes_count: Option<i32>,

    #[validate(required(message = "must not be null"), nested)]
    pub user: Option<UserRef>,
}

impl CreatePostRequest {
    pub fn new(title: &str, content: &str, is_published: bool, user_id: i64) -> Self {
        Self {
            title: Some(title.to_string()),
            content: Some(content.to_string()),
            is_published: Some(is_published),
            likes_count: None,
            user: Some(UserRef { id: Some(user_id) }),
        }
    }

    pub fn with_likes(mut self, likes_count: i32) -> Self {
        self.likes_count = Some(likes_count);
        self
    }
}

/// Request body for replacing a post. Every field is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[validate(
        required(message = "Title is required"),
        custom(function = "not_blank", message = "Title is required"),
        length(max = 100, message = "Title must be at most 100 characters")
    )]
    pub title: Option<String>,

    #[validate(
        required(message = "Text is required"),
        custom(function = "not_blank", message = "Text is required"),
        length(max = 500, message = "Text must be at most 500 characters")
    )]
    pub content: Option<String>,

    #[validate(required(message = "must not be null"))]
    pub is_published: Option<bool>,

    #[validate(
        required(message = "must not be null"),
        range(min = 0, message = "Parameter must be a positive integer or 0")
    )]
    pub likes_count: Option<i32>,

    #[validate(required(message = "must not be null"), nested)]
    pub user: Option<UserRef>,
}

/// Filters for the CSV report.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostQueryRequest {
    #[validate(required(message = "must not be null"))]
    pub user_id: Option<i64>,

    pub is_published: Option<bool>,

    /// Minimum likes count (inclusive).
    #[validate(range(min = 0, message = "Parameter must be a positive integer or 0"))]
    pub likes_count: Option<i32>,
}

/// Filters plus pagination for the post listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostListRequest {
    #[validate(required(message = "must not be null"))]
    pub user_id: Option<i64>,

    pub is_published: Option<bool>,

    #[validate(range(min = 0, message = "Parameter must be a positive integer or 0"))]
    pub likes_count: Option<i32>,

    /// Zero-based page index.
    #[validate(
        required(message = "must not be null"),
        range(min = 0, message = "Parameter must be a positive integer or 0")
    )]
    pub page: Option<i64>,

    #[validate(
        required(message = "must not be null"),
        range(min = 1, message = "Parameter must be a positive integer greater than 0")
    )]
    pub size: Option<i64>,
}

/// A post as it appears in listings and reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub is_published: bool,
    pub likes_count: i32,
    pub user_id: i64,
}

/// A single post with its owner expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostInfoResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub is_published: bool,
    pub likes_count: i32,
    pub user: UserResponse,
}

/// One page of a post listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
    pub list: Vec<PostResponse>,
    pub total_pages: u64,
}

/// Outcome of a bulk import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub successful_imports: u32,
    pub failed_imports: u32,
}
