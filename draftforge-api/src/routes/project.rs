/// Project endpoints
///
/// # Endpoints
///
/// - `POST /project/create` - create a project with its outline
/// - `POST /project/{id}/generate` - draft content for all empty sections
/// - `GET /project/{id}` - fetch a project with its sections
/// - `POST /project/{id}/export` - write the project to a docx/pptx file
///
/// All routes are token-authenticated and scoped to the caller: a project
/// that exists but belongs to someone else returns the same 404 as one that
/// does not exist.

use crate::{
    app::{AppState, CurrentUser},
    error::{validation_error, ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use draftforge_shared::models::{
    project::{CreateProject, DocType, Project},
    section::Section,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Create project request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    /// Document title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Target export format ("docx" | "pptx")
    pub doc_type: DocType,

    /// Ordered list of section titles
    pub outline: Vec<String>,
}

/// Create project response
#[derive(Debug, Serialize)]
pub struct CreateProjectResponse {
    /// Id of the newly created project
    pub project_id: i64,
}

/// Section as returned by project endpoints
#[derive(Debug, Serialize)]
pub struct SectionResponse {
    /// Section id
    pub id: i64,

    /// Section title from the outline
    pub title: String,

    /// Current content (empty string until drafted)
    pub content: String,

    /// Reviewer comment, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Tri-state approval flag, if set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked: Option<bool>,

    /// True when this response filled the section with fallback content
    /// because the model call failed; omitted otherwise
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub degraded: bool,
}

impl SectionResponse {
    fn from_section(section: Section) -> Self {
        SectionResponse {
            id: section.id,
            title: section.title,
            content: section.content,
            comment: section.comment,
            liked: section.liked,
            degraded: false,
        }
    }
}

/// Project with sections, as returned by generate/fetch
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    /// Project id
    pub id: i64,

    /// Document title
    pub title: String,

    /// Target export format
    pub doc_type: DocType,

    /// Sections in outline order
    pub sections: Vec<SectionResponse>,
}

/// Export response
#[derive(Debug, Serialize)]
pub struct ExportResponse {
    /// Path of the written file
    pub path: String,

    /// Format that was exported
    pub doc_type: DocType,
}

/// Loads a project for the caller or fails with the uniform 404.
async fn load_owned_project(
    state: &AppState,
    project_id: i64,
    user: CurrentUser,
) -> ApiResult<Project> {
    Project::find_for_user(&state.db, project_id, user.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))
}

/// Create a project with its outline
///
/// Creates the project row plus one empty section per outline entry in a
/// single transaction: a failure leaves nothing behind.
///
/// # Endpoint
///
/// ```text
/// POST /project/create
/// token: <token>
///
/// { "title": "Q3 Report", "doc_type": "docx", "outline": ["Intro", "Body"] }
/// ```
pub async fn create_project(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<Json<CreateProjectResponse>> {
    req.validate().map_err(validation_error)?;

    let project = Project::create_with_outline(
        &state.db,
        CreateProject {
            user_id: user.user_id,
            title: req.title,
            doc_type: req.doc_type,
            outline: req.outline,
        },
    )
    .await?;

    tracing::info!(project_id = project.id, user_id = user.user_id, "Project created");

    Ok(Json(CreateProjectResponse {
        project_id: project.id,
    }))
}

/// Draft content for every empty section
///
/// Sections that already have content are left untouched, so re-invoking
/// only fills gaps. Sections filled by a fallback (model unavailable) are
/// marked `"degraded": true` in the response; the placeholder is persisted
/// like any other content.
///
/// # Endpoint
///
/// ```text
/// POST /project/{id}/generate
/// token: <token>
/// ```
///
/// # Errors
///
/// - `404 Not Found`: project missing or not owned by the caller
pub async fn generate_all(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(project_id): Path<i64>,
) -> ApiResult<Json<ProjectResponse>> {
    let project = load_owned_project(&state, project_id, user).await?;
    let sections = Section::list_for_project(&state.db, project.id).await?;

    let mut rendered = Vec::with_capacity(sections.len());
    for section in sections {
        if !section.is_empty() {
            rendered.push(SectionResponse::from_section(section));
            continue;
        }

        let generated = state.generator.draft(&section.title).await;
        Section::update_content(&state.db, section.id, &generated.text).await?;

        rendered.push(SectionResponse {
            content: generated.text,
            degraded: generated.degraded,
            ..SectionResponse::from_section(section)
        });
    }

    Ok(Json(ProjectResponse {
        id: project.id,
        title: project.title,
        doc_type: project.doc_type,
        sections: rendered,
    }))
}

/// Fetch a project with its sections
///
/// # Endpoint
///
/// ```text
/// GET /project/{id}
/// token: <token>
/// ```
///
/// # Errors
///
/// - `404 Not Found`: project missing or not owned by the caller
pub async fn get_project(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(project_id): Path<i64>,
) -> ApiResult<Json<ProjectResponse>> {
    let project = load_owned_project(&state, project_id, user).await?;
    let sections = Section::list_for_project(&state.db, project.id).await?;

    Ok(Json(ProjectResponse {
        id: project.id,
        title: project.title,
        doc_type: project.doc_type,
        sections: sections
            .into_iter()
            .map(SectionResponse::from_section)
            .collect(),
    }))
}

/// Export a project to its target file format
///
/// Writes the file into the configured export directory and returns the
/// path. Export failures are the one adapter error class that propagates to
/// the caller.
///
/// # Endpoint
///
/// ```text
/// POST /project/{id}/export
/// token: <token>
/// ```
///
/// # Errors
///
/// - `404 Not Found`: project missing or not owned by the caller
/// - `500 Internal Server Error`: the file write failed
pub async fn export_project(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(project_id): Path<i64>,
) -> ApiResult<Json<ExportResponse>> {
    let project = load_owned_project(&state, project_id, user).await?;
    let sections = Section::list_for_project(&state.db, project.id).await?;

    let path = crate::export::export_project(&state.config.export.dir, &project, &sections)?;

    Ok(Json(ExportResponse {
        path: path.display().to_string(),
        doc_type: project.doc_type,
    }))
}
