use std::sync::Arc;

use postboard_core::DomainError;
use postboard_core::domain::{PageRequest, Post, User};
use postboard_core::ports::{PostRepository, UserRepository};
use postboard_shared::dto::{
    CreatePostRequest, ImportSummary, PostInfoResponse, PostListRequest, PostListResponse,
    PostQueryRequest, UpdatePostRequest,
};
use serde_json::Value;
use validator::Validate;

use super::mapping::{list_filter, new_post, post_info, post_response, replaced_post, report_filter};
use super::report::render_csv;
use crate::middleware::error::{AppError, AppResult};

/// Post CRUD, listing, reporting and bulk import.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { posts, users }
    }

    pub async fn get(&self, id: i64) -> AppResult<PostInfoResponse> {
        let post = self.find(id).await?;
        let owner = self.owner(post.user_id).await?;

        Ok(post_info(post, owner))
    }

    pub async fn create(&self, req: CreatePostRequest) -> AppResult<PostInfoResponse> {
        req.validate()?;

        let draft = new_post(req)?;
        let owner = self.owner(draft.user_id).await?;
        let post = self.posts.insert(draft).await?;
        tracing::info!(post_id = post.id, user_id = owner.id, "Post created");

        Ok(post_info(post, owner))
    }

    /// Replace every field of an existing post.
    pub async fn update(&self, id: i64, req: UpdatePostRequest) -> AppResult<PostInfoResponse> {
        req.validate()?;
        self.find(id).await?;

        let replacement = replaced_post(id, req)?;
        let owner = self.owner(replacement.user_id).await?;
        let post = self.posts.update(replacement).await?;
        tracing::info!(post_id = id, "Post updated");

        Ok(post_info(post, owner))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.find(id).await?;
        self.posts.delete(id).await?;
        tracing::info!(post_id = id, "Post deleted");

        Ok(())
    }

    /// One page of a user's posts plus the total page count.
    pub async fn list(&self, req: PostListRequest) -> AppResult<PostListResponse> {
        req.validate()?;

        let filter = list_filter(&req)?;
        let page = PageRequest::new(req.page.unwrap_or(-1), req.size.unwrap_or(0))?;

        let posts = self.posts.find_page(&filter, page).await?;
        let total = self.posts.count(&filter).await?;
        tracing::debug!(?filter, total, returned = posts.len(), "Listed posts");

        Ok(PostListResponse {
            list: posts.into_iter().map(post_response).collect(),
            total_pages: page.total_pages(total),
        })
    }

    /// CSV report of every post matching the filters.
    pub async fn report(&self, req: PostQueryRequest) -> AppResult<String> {
        req.validate()?;

        let filter = report_filter(&req)?;
        let posts = self.posts.find_matching(&filter).await?;
        tracing::debug!(?filter, rows = posts.len(), "Generated post report");

        Ok(render_csv(&posts))
    }

    /// Import a JSON array of create-post payloads.
    ///
    /// The upload as a whole is rejected when it is empty or not a JSON
    /// array. Individual records that fail to parse, validate or persist are
    /// counted as failures and the import carries on.
    pub async fn import(&self, contents: &[u8]) -> AppResult<ImportSummary> {
        if contents.iter().all(u8::is_ascii_whitespace) {
            return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
        }

        let records = match serde_json::from_slice::<Value>(contents) {
            Ok(Value::Array(records)) => records,
            Ok(_) => {
                return Err(AppError::BadRequest(
                    "Invalid JSON format: expected array".to_string(),
                ));
            }
            Err(e) => return Err(AppError::BadRequest(format!("Invalid JSON format: {e}"))),
        };

        let mut summary = ImportSummary::default();
        for (index, record) in records.into_iter().enumerate() {
            match self.import_record(record).await {
                Ok(post) => {
                    tracing::debug!(index, post_id = post.id, "Imported post");
                    summary.successful_imports += 1;
                }
                Err(e) => {
                    tracing::warn!(index, error = %e, "Skipping post record");
                    summary.failed_imports += 1;
                }
            }
        }

        tracing::info!(
            successful = summary.successful_imports,
            failed = summary.failed_imports,
            "Post import finished"
        );
        Ok(summary)
    }

    /// The owner is not looked up first; a dangling user id fails on insert.
    async fn import_record(&self, record: Value) -> AppResult<Post> {
        let req: CreatePostRequest =
            serde_json::from_value(record).map_err(|e| AppError::BadRequest(e.to_string()))?;
        req.validate()?;

        Ok(self.posts.insert(new_post(req)?).await?)
    }

    async fn find(&self, id: i64) -> AppResult<Post> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id).into())
    }

    async fn owner(&self, user_id: i64) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(user_id).into())
    }
}
