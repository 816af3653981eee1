/// Refine endpoints
///
/// # Endpoints
///
/// - `POST /refine` - rewrite one section's content per an instruction
/// - `POST /refine/feedback` - set the tri-state approval flag on a section
///
/// Both look the section up through its parent project's owner: a section
/// in someone else's project yields the same 404 as a nonexistent id, so
/// authenticated users cannot probe or mutate foreign sections.

use crate::{
    app::{AppState, CurrentUser},
    error::{validation_error, ApiError, ApiResult},
};
use axum::{extract::State, Extension, Json};
use draftforge_shared::models::section::Section;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Refine request
#[derive(Debug, Deserialize, Validate)]
pub struct RefineRequest {
    /// Section to rewrite
    pub section_id: i64,

    /// Free-form rewrite instruction
    #[validate(length(min = 1, message = "Prompt must not be empty"))]
    pub prompt: String,

    /// Optional reviewer comment to attach
    pub comment: Option<String>,
}

/// Refine response
#[derive(Debug, Serialize)]
pub struct RefineResponse {
    /// The new section content
    pub updated: String,

    /// True when the rewrite fell back to the prior content because the
    /// model call failed; omitted otherwise
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub degraded: bool,
}

/// Feedback request
#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    /// Section to flag
    pub section_id: i64,

    /// Approval flag: true, false, or null to clear
    pub liked: Option<bool>,
}

/// Feedback response
#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    /// Section that was flagged
    pub section_id: i64,

    /// The stored flag value
    pub liked: Option<bool>,
}

/// Rewrite a section's content per an instruction
///
/// Always overwrites, whatever the prior state, drafted or already
/// refined. A failed model call keeps the prior content and reports
/// `"degraded": true`. A supplied non-empty comment is persisted alongside;
/// comment and content mutate independently.
///
/// # Endpoint
///
/// ```text
/// POST /refine
/// token: <token>
///
/// { "section_id": 7, "prompt": "Make it more formal", "comment": "tone" }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: section missing or not owned by the caller
pub async fn refine(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<RefineRequest>,
) -> ApiResult<Json<RefineResponse>> {
    req.validate().map_err(validation_error)?;

    let section = Section::find_for_user(&state.db, req.section_id, user.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Section not found".to_string()))?;

    let rewritten = state.generator.rewrite(&section.content, &req.prompt).await;
    Section::update_content(&state.db, section.id, &rewritten.text).await?;

    if let Some(comment) = req.comment.as_deref().filter(|c| !c.is_empty()) {
        Section::update_comment(&state.db, section.id, comment).await?;
    }

    Ok(Json(RefineResponse {
        updated: rewritten.text,
        degraded: rewritten.degraded,
    }))
}

/// Set or clear a section's approval flag
///
/// The flag is tri-state: `true`, `false`, or `null` (unset). It never
/// touches content or comment.
///
/// # Endpoint
///
/// ```text
/// POST /refine/feedback
/// token: <token>
///
/// { "section_id": 7, "liked": true }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: section missing or not owned by the caller
pub async fn feedback(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<FeedbackRequest>,
) -> ApiResult<Json<FeedbackResponse>> {
    let section = Section::find_for_user(&state.db, req.section_id, user.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Section not found".to_string()))?;

    Section::update_liked(&state.db, section.id, req.liked).await?;

    Ok(Json(FeedbackResponse {
        section_id: section.id,
        liked: req.liked,
    }))
}
