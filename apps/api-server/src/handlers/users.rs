//! User handlers.

use actix_web::{HttpResponse, http::header, web};
use postboard_shared::MessageResponse;
use postboard_shared::dto::UserRequest;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/v1/users
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.users.list().await?))
}

/// GET /api/v1/users/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let user = state.users.get(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(user))
}

/// POST /api/v1/users
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<UserRequest>,
) -> AppResult<HttpResponse> {
    let user = state.users.create(body.into_inner()).await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/v1/users/{}", user.id)))
        .json(user))
}

/// PUT /api/v1/users/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<UserRequest>,
) -> AppResult<HttpResponse> {
    let user = state
        .users
        .update(path.into_inner(), body.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(user))
}

/// DELETE /api/v1/users/{id}
pub async fn delete(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    state.users.delete(path.into_inner()).await?;

    let message = MessageResponse::new("User deleted successfully.");

    Ok(HttpResponse::Ok().json(message))
}
