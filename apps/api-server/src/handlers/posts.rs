//! Post handlers.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, http::header, web};
use futures::StreamExt;
use postboard_shared::MessageResponse;
use postboard_shared::dto::{
    CreatePostRequest, PostListRequest, PostQueryRequest, UpdatePostRequest,
};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/posts/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let post = state.posts.get(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// POST /api/v1/posts
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let post = state.posts.create(body.into_inner()).await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/v1/posts/{}", post.id)))
        .json(post))
}

/// PUT /api/v1/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .update(path.into_inner(), body.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/v1/posts/{id}
pub async fn delete(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    state.posts.delete(path.into_inner()).await?;

    let message = MessageResponse::new("Post deleted successfully.");

    Ok(HttpResponse::Ok().json(message))
}

/// POST /api/v1/posts/_list
pub async fn list(
    state: web::Data<AppState>,
    body: web::Json<PostListRequest>,
) -> AppResult<HttpResponse> {
    let page = state.posts.list(body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(page))
}

/// POST /api/v1/posts/_report
pub async fn report(
    state: web::Data<AppState>,
    body: web::Json<PostQueryRequest>,
) -> AppResult<HttpResponse> {
    let csv = state.posts.report(body.into_inner()).await?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header((header::CONTENT_DISPOSITION, "attachment; filename=report.csv"))
        .body(csv))
}

/// POST /api/v1/posts/upload
///
/// Only the first multipart part is read; it must hold a JSON array of posts
/// no larger than the configured upload limit.
pub async fn upload(state: web::Data<AppState>, mut payload: Multipart) -> AppResult<HttpResponse> {
    let limit = state.upload_limit;
    let mut contents = Vec::new();

    if let Some(field) = payload.next().await {
        let mut field = field.map_err(|e| AppError::BadRequest(e.to_string()))?;
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| AppError::BadRequest(e.to_string()))?;
            if contents.len() + chunk.len() > limit {
                tracing::warn!(limit, "Rejecting oversized upload");
                return Err(AppError::BadRequest(format!(
                    "Uploaded file exceeds the limit of {limit} bytes"
                )));
            }
            contents.extend_from_slice(&chunk);
        }
    }

    let summary = state.posts.import(&contents).await?;

    Ok(HttpResponse::Ok().json(summary))
}
