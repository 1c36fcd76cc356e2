//! Author handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::Author;
use quill_core::ports::AuthorPatch;
use quill_shared::dto::{AuthorResponse, CreateAuthorRequest, UpdateAuthorRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn missing_field(field: &str) -> AppError {
    AppError::BadRequest(format!("Missing `{}` in request body", field))
}

fn id_mismatch(path_id: &str, body_id: Option<&str>) -> AppError {
    AppError::BadRequest(format!(
        "Request path id ({}) and request body id ({}) must match",
        path_id,
        body_id.unwrap_or("")
    ))
}

fn duplicate_user_name() -> AppError {
    AppError::BadRequest("userName already exists".to_string())
}

fn author_view(author: Author) -> AuthorResponse {
    let name = author.display_name();
    AuthorResponse {
        id: author.id,
        name,
        user_name: author.user_name,
    }
}

/// Check-then-act guard over the userName. The unique index backstops the
/// race between this lookup and the write. `own_id` exempts the author being
/// updated from matching themselves.
async fn reject_taken_user_name(
    state: &AppState,
    user_name: &str,
    own_id: Option<Uuid>,
) -> AppResult<()> {
    if let Some(existing) = state.authors.find_by_user_name(user_name).await? {
        if own_id != Some(existing.id) {
            return Err(duplicate_user_name());
        }
    }
    Ok(())
}

/// POST /authors
pub async fn create_author(
    state: web::Data<AppState>,
    body: web::Json<CreateAuthorRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let first_name = req.first_name.ok_or_else(|| missing_field("firstName"))?;
    let last_name = req.last_name.ok_or_else(|| missing_field("lastName"))?;

    if let Some(user_name) = &req.user_name {
        reject_taken_user_name(&state, user_name, None).await?;
    }

    let author = Author::new(first_name, last_name, req.user_name);
    let created = state.authors.create(author).await?;

    Ok(HttpResponse::Created().json(author_view(created)))
}

/// PUT /authors/{id}
pub async fn update_author(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateAuthorRequest>,
) -> AppResult<HttpResponse> {
    let path_id = path.into_inner();
    let req = body.into_inner();

    if req.id.as_deref() != Some(path_id.as_str()) {
        return Err(id_mismatch(&path_id, req.id.as_deref()));
    }

    let id = Uuid::parse_str(&path_id).map_err(|_| AppError::NotFound)?;

    if let Some(user_name) = &req.user_name {
        reject_taken_user_name(&state, user_name, Some(id)).await?;
    }

    let patch = AuthorPatch {
        first_name: req.first_name,
        last_name: req.last_name,
        user_name: req.user_name,
    };

    let updated = state
        .authors
        .update(id, patch)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(HttpResponse::Ok().json(author_view(updated)))
}

/// DELETE /authors/{id}
pub async fn delete_author(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    // Idempotent; posts referencing this author are left in place.
    if let Ok(id) = Uuid::parse_str(&path.into_inner()) {
        state.authors.delete(id).await?;
    }

    Ok(HttpResponse::NoContent().finish())
}
