//! Domain <-> DTO conversions.

use postboard_core::domain::{NewPost, NewUser, Post, PostFilter, User};
use postboard_shared::ErrorDetail;
use postboard_shared::dto::{
    CreatePostRequest, PostInfoResponse, PostListRequest, PostQueryRequest, PostResponse,
    UpdatePostRequest, UserRequest, UserResponse,
};

use crate::middleware::error::{AppError, AppResult};

/// Unwrap a field that validation has already checked for presence.
fn required<T>(value: Option<T>, field: &str) -> AppResult<T> {
    value.ok_or_else(|| {
        AppError::Validation(vec![ErrorDetail {
            field_name: field.to_string(),
            invalid_value: serde_json::Value::Null,
            constraint: "must not be null".to_string(),
        }])
    })
}

pub fn user_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username,
        email: user.email,
    }
}

pub fn new_user(req: UserRequest) -> AppResult<NewUser> {
    Ok(NewUser {
        username: required(req.username, "username")?,
        email: required(req.email, "email")?,
    })
}

pub fn replaced_user(id: i64, req: UserRequest) -> AppResult<User> {
    Ok(new_user(req)?.with_id(id))
}

pub fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        is_published: post.published,
        likes_count: post.likes_count,
        user_id: post.user_id,
    }
}

pub fn post_info(post: Post, owner: User) -> PostInfoResponse {
    PostInfoResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        is_published: post.published,
        likes_count: post.likes_count,
        user: user_response(owner),
    }
}

pub fn new_post(req: CreatePostRequest) -> AppResult<NewPost> {
    let user = required(req.user, "user")?;
    let draft = NewPost::new(
        required(user.id, "user.id")?,
        required(req.title, "title")?,
        required(req.content, "content")?,
        required(req.is_published, "isPublished")?,
    );

    Ok(draft.with_likes(req.likes_count.unwrap_or(0)))
}

pub fn replaced_post(id: i64, req: UpdatePostRequest) -> AppResult<Post> {
    let user = required(req.user, "user")?;

    Ok(Post {
        id,
        title: required(req.title, "title")?,
        content: required(req.content, "content")?,
        published: required(req.is_published, "isPublished")?,
        likes_count: required(req.likes_count, "likesCount")?,
        user_id: required(user.id, "user.id")?,
    })
}

pub fn report_filter(req: &PostQueryRequest) -> AppResult<PostFilter> {
    Ok(PostFilter::for_user(required(req.user_id, "userId")?)
        .with_min_likes(req.likes_count)
        .with_published(req.is_published))
}

pub fn list_filter(req: &PostListRequest) -> AppResult<PostFilter> {
    Ok(PostFilter::for_user(required(req.user_id, "userId")?)
        .with_min_likes(req.likes_count)
        .with_published(req.is_published))
}
