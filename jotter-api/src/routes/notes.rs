/// Note CRUD endpoints
///
/// Every handler here runs behind the session gate and takes the acting
/// user from [`CurrentUser`] in the request extensions. The owner ID is
/// never read from the request body or URL, so a client cannot act on
/// another user's behalf no matter what it sends.
///
/// A note that does not exist and a note owned by someone else both come
/// back as 404; the API never reveals whether a foreign note exists.
///
/// # Endpoints
///
/// - `GET    /notes`     - List the caller's notes, newest first
/// - `POST   /notes`     - Create a note
/// - `GET    /notes/:id` - Fetch one note
/// - `PUT    /notes/:id` - Update a note's content (and optionally title)
/// - `DELETE /notes/:id` - Delete a note

use crate::{
    app::AppState,
    config::NoteLimits,
    error::{ApiError, ApiResult, FieldError},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use jotter_shared::{
    auth::middleware::CurrentUser,
    models::note::{CreateNote, Note, UpdateNote},
};
use serde::Deserialize;
use uuid::Uuid;

/// Create note request
#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    /// Note title
    pub title: String,

    /// Note body
    pub content: String,
}

/// Update note request
///
/// Content is required; omitting the title keeps the stored one.
#[derive(Debug, Deserialize)]
pub struct UpdateNoteRequest {
    /// New title, if changing it
    pub title: Option<String>,

    /// New body
    pub content: String,
}

/// Validates note fields against the configured bounds.
///
/// Lengths are counted in characters, not bytes, so multi-byte text is not
/// penalized. `title: None` means "unchanged" and skips the title checks.
/// All failures are collected so the client sees every problem at once.
fn validate_note_fields(
    title: Option<&str>,
    content: &str,
    limits: &NoteLimits,
) -> Result<(), ApiError> {
    let mut errors = Vec::new();

    if let Some(title) = title {
        if title.trim().is_empty() {
            errors.push(FieldError {
                field: "title".to_string(),
                message: "Title must not be empty".to_string(),
            });
        } else if title.chars().count() > limits.title_max_chars {
            errors.push(FieldError {
                field: "title".to_string(),
                message: format!("Title must be at most {} characters", limits.title_max_chars),
            });
        }
    }

    if content.is_empty() {
        errors.push(FieldError {
            field: "content".to_string(),
            message: "Content must not be empty".to_string(),
        });
    } else if content.chars().count() > limits.content_max_chars {
        errors.push(FieldError {
            field: "content".to_string(),
            message: format!(
                "Content must be at most {} characters",
                limits.content_max_chars
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::ValidationError(errors))
    }
}

/// List the caller's notes
///
/// Returns every note owned by the authenticated user, newest-created
/// first. A user with no notes gets an empty array.
pub async fn list_notes(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<Note>>> {
    let notes = Note::list_by_owner(&state.db, user.id).await?;
    Ok(Json(notes))
}

/// Fetch a single note
///
/// # Errors
///
/// - `404 Not Found`: note missing or owned by someone else
pub async fn get_note(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Note>> {
    let note = Note::find_by_id_and_owner(&state.db, id, user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;

    Ok(Json(note))
}

/// Create a note
///
/// The server assigns the ID and timestamps; the caller becomes the owner.
///
/// # Errors
///
/// - `400 Bad Request`: title or content out of bounds
pub async fn create_note(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreateNoteRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_note_fields(Some(&req.title), &req.content, &state.config.notes)?;

    let note = Note::create(
        &state.db,
        CreateNote {
            owner_id: user.id,
            title: req.title,
            content: req.content,
        },
    )
    .await?;

    tracing::debug!(note_id = %note.id, owner_id = %user.id, "Note created");

    Ok((StatusCode::CREATED, Json(note)))
}

/// Update a note
///
/// Replaces the content (and optionally the title) in one atomic,
/// owner-scoped statement, refreshing `updated_at`. Returns the
/// post-update note.
///
/// # Errors
///
/// - `400 Bad Request`: title or content out of bounds
/// - `404 Not Found`: note missing or owned by someone else
pub async fn update_note(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateNoteRequest>,
) -> ApiResult<Json<Note>> {
    validate_note_fields(req.title.as_deref(), &req.content, &state.config.notes)?;

    let note = Note::update(
        &state.db,
        id,
        user.id,
        UpdateNote {
            content: req.content,
            title: req.title,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;

    Ok(Json(note))
}

/// Delete a note
///
/// Returns 204 with no body on success. Deleting the same note twice gives
/// 404 the second time; zero affected rows and a foreign note look the
/// same.
///
/// # Errors
///
/// - `404 Not Found`: note missing or owned by someone else
pub async fn delete_note(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let deleted = Note::delete(&state.db, id, user.id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Note not found".to_string()));
    }

    tracing::debug!(note_id = %id, owner_id = %user.id, "Note deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> NoteLimits {
        NoteLimits::default()
    }

    #[test]
    fn test_valid_fields_pass() {
        assert!(validate_note_fields(Some("Groceries"), "milk, eggs", &limits()).is_ok());
    }

    #[test]
    fn test_empty_title_rejected() {
        let err = validate_note_fields(Some("   "), "body", &limits()).unwrap_err();
        match err {
            ApiError::ValidationError(details) => {
                assert_eq!(details.len(), 1);
                assert_eq!(details[0].field, "title");
            }
            other => panic!("expected validation error, got {}", other),
        }
    }

    #[test]
    fn test_title_skipped_when_unchanged() {
        // None means the stored title stays, so no title checks run
        assert!(validate_note_fields(None, "body", &limits()).is_ok());
    }

    #[test]
    fn test_empty_content_rejected() {
        let err = validate_note_fields(Some("t"), "", &limits()).unwrap_err();
        match err {
            ApiError::ValidationError(details) => {
                assert_eq!(details[0].field, "content");
            }
            other => panic!("expected validation error, got {}", other),
        }
    }

    #[test]
    fn test_content_at_limit_passes() {
        let content = "x".repeat(limits().content_max_chars);
        assert!(validate_note_fields(Some("t"), &content, &limits()).is_ok());
    }

    #[test]
    fn test_content_over_limit_rejected() {
        let content = "x".repeat(limits().content_max_chars + 1);
        let err = validate_note_fields(Some("t"), &content, &limits()).unwrap_err();
        match err {
            ApiError::ValidationError(details) => {
                assert_eq!(details[0].field, "content");
            }
            other => panic!("expected validation error, got {}", other),
        }
    }

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        // Four-byte scorpions; 255 of them exceed 255 bytes but not 255 chars
        let title = "\u{1F982}".repeat(limits().title_max_chars);
        assert!(validate_note_fields(Some(&title), "body", &limits()).is_ok());
    }

    #[test]
    fn test_multiple_failures_reported_together() {
        let title = "x".repeat(limits().title_max_chars + 1);
        let content = "x".repeat(limits().content_max_chars + 1);
        let err = validate_note_fields(Some(&title), &content, &limits()).unwrap_err();
        match err {
            ApiError::ValidationError(details) => assert_eq!(details.len(), 2),
            other => panic!("expected validation error, got {}", other),
        }
    }
}
