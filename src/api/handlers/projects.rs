//! Route collection for the project resource.
//!
//! Reads are open; writes require a bearer token. Handlers never trust the
//! owner claimed by the request body: it is overwritten from the
//! authenticated caller before the DTO touches the domain.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::middleware::auth::AuthUser;
use crate::app::AppState;
use crate::domain::project::{Project, ProjectDto};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(list).post(create))
        .route("/projects/:id", get(read).put(update).delete(delete))
}

/// GET /projects
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProjectDto>>, ApiError> {
    let repo = state.repositories().projects();
    let projects = repo.find_all().await?;

    Ok(Json(projects.iter().map(Project::to_dto).collect()))
}

/// GET /projects/:id
pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectDto>, ApiError> {
    let repo = state.repositories().projects();
    let project = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("project not found: {id}")))?;

    Ok(Json(project.to_dto()))
}

/// POST /projects
pub async fn create(
    State(state): State<AppState>,
    AuthUser(owner): AuthUser,
    Json(mut body): Json<ProjectDto>,
) -> Result<(StatusCode, Json<ProjectDto>), ApiError> {
    body.user_id = Some(owner);

    let project = Project::from_dto(&body).map_err(ApiError::bad_request)?;
    let created = state.repositories().projects().create(project).await?;

    Ok((StatusCode::CREATED, Json(created.to_dto())))
}

/// PUT /projects/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AuthUser(owner): AuthUser,
    Json(mut body): Json<ProjectDto>,
) -> Result<Json<ProjectDto>, ApiError> {
    body.user_id = Some(owner);

    let repo = state.repositories().projects();
    let mut saved = repo.find_owned(id, owner).await?;
    saved.apply(&body).map_err(ApiError::bad_request)?;

    // Owner reassignment would be a logic defect, not a request error.
    assert_eq!(saved.user_id(), owner, "project owner changed during update");

    repo.update(&saved).await?;

    Ok(Json(saved.to_dto()))
}

/// DELETE /projects/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AuthUser(_owner): AuthUser,
) -> Result<StatusCode, ApiError> {
    state.repositories().projects().delete(id).await?;

    Ok(StatusCode::OK)
}
