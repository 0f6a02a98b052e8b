//! Error handling - translates failures into the JSON error body.

use std::borrow::Cow;

use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use postboard_core::{DomainError, RepoError};
use postboard_shared::{ErrorDetail, ErrorResponse};
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation errors: {0:?}")]
    Validation(Vec<ErrorDetail>),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Validation(errors) => ErrorResponse::fields(errors.clone()),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { .. } => AppError::NotFound(err.to_string()),
            DomainError::Validation(msg) => AppError::BadRequest(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => AppError::BadRequest(msg),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(field_errors(&errors))
    }
}

/// Flatten validator output into one entry per rejected constraint.
///
/// Field names use the JSON spelling; nested structs are dotted
/// (`user.id`) and list items indexed (`items[2].title`).
pub fn field_errors(errors: &ValidationErrors) -> Vec<ErrorDetail> {
    let mut details = Vec::new();
    collect_field_errors("", errors, &mut details);
    details.sort_by(|a, b| a.field_name.cmp(&b.field_name));
    details
}

fn collect_field_errors(prefix: &str, errors: &ValidationErrors, out: &mut Vec<ErrorDetail>) {
    for (field, kind) in errors.errors() {
        let name = camel_case(field);
        let path = if prefix.is_empty() {
            name.into_owned()
        } else {
            format!("{prefix}.{name}")
        };

        match kind {
            ValidationErrorsKind::Field(list) => {
                for error in list {
                    out.push(ErrorDetail {
                        field_name: path.clone(),
                        invalid_value: error
                            .params
                            .get("value")
                            .cloned()
                            .unwrap_or(serde_json::Value::Null),
                        constraint: error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| error.code.to_string()),
                    });
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_field_errors(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_field_errors(&format!("{path}[{index}]"), inner, out);
                }
            }
        }
    }
}

fn camel_case(field: &str) -> Cow<'_, str> {
    if !field.contains('_') {
        return Cow::Borrowed(field);
    }

    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

/// Route JSON body extraction failures through [`AppError`].
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Route path parameter extraction failures through [`AppError`].
pub fn path_error_handler(
    err: actix_web::error::PathError,
    _req: &HttpRequest,
) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use postboard_shared::dto::CreatePostRequest;
    use validator::Validate;

    #[test]
    fn camel_case_conversion() {
        assert_eq!(camel_case("title"), "title");
        assert_eq!(camel_case("is_published"), "isPublished");
        assert_eq!(camel_case("likes_count"), "likesCount");
    }

    #[test]
    fn nested_field_errors_are_dotted() {
        let mut req = CreatePostRequest::new("Title", "Content", true, 1);
        req.user.as_mut().unwrap().id = None;
        req.is_published = None;

        let details = field_errors(&req.validate().unwrap_err());
        let names: Vec<&str> = details.iter().map(|d| d.field_name.as_str()).collect();

        assert_eq!(names, vec!["isPublished", "user.id"]);
    }

    #[test]
    fn length_violation_carries_rejected_value() {
        let long = "x".repeat(101);
        let req = CreatePostRequest::new(&long, "Content", true, 1);

        let details = field_errors(&req.validate().unwrap_err());

        assert_eq!(details.len(), 1);
        assert_eq!(details[0].field_name, "title");
        assert_eq!(details[0].invalid_value, serde_json::Value::String(long));
        assert_eq!(details[0].constraint, "Title must be at most 100 characters");
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Validation(vec![]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(DomainError::user_not_found(3)).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(DomainError::Validation("page".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(RepoError::Constraint("dup".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(RepoError::Query("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
