/// Note model and ownership-scoped operations
///
/// Every note belongs to exactly one user, and every operation here takes
/// the owner ID resolved by the authorization gate. The owner filter is
/// part of each SQL statement (`WHERE id = $1 AND owner_id = $2`), never a
/// separate check-then-act pair, so there is no window in which a row can
/// change hands or disappear between the check and the mutation.
///
/// A note that does not exist and a note owned by someone else are
/// indistinguishable to the caller: both come back as `None` / zero rows.
/// That uniformity is deliberate — it prevents probing for the existence
/// of other users' notes.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE notes (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title TEXT NOT NULL,
///     content TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// Note record
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Note {
    /// Unique note ID (UUID v4, server-assigned)
    pub id: Uuid,

    /// Owning user; immutable after creation
    pub owner_id: Uuid,

    /// Note title
    pub title: String,

    /// Note body
    pub content: String,

    /// Set once at insertion
    pub created_at: DateTime<Utc>,

    /// Refreshed on every successful content mutation
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a note
#[derive(Debug, Clone)]
pub struct CreateNote {
    /// Owner, resolved by the authorization gate — never client input
    pub owner_id: Uuid,

    /// Title (validated upstream against configured bounds)
    pub title: String,

    /// Body (validated upstream against configured bounds)
    pub content: String,
}

/// Input for updating a note
///
/// Content is required; a missing title keeps the stored one.
#[derive(Debug, Clone)]
pub struct UpdateNote {
    /// New body
    pub content: String,

    /// New title, or `None` to leave the title unchanged
    pub title: Option<String>,
}

impl Note {
    /// Lists all notes owned by `owner_id`, newest-created-first.
    ///
    /// The `id` tiebreak makes the order deterministic when two notes share
    /// a creation timestamp. An owner with no notes gets an empty vec, not
    /// an error.
    pub async fn list_by_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let notes = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, owner_id, title, content, created_at, updated_at
            FROM notes
            WHERE owner_id = $1
            ORDER BY created_at DESC, id
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

        Ok(notes)
    }

    /// Fetches one note if it exists and belongs to `owner_id`.
    ///
    /// Returns `None` both for a missing note and for someone else's note.
    pub async fn find_by_id_and_owner(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, owner_id, title, content, created_at, updated_at
            FROM notes
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(note)
    }

    /// Inserts a new note and returns the stored row.
    ///
    /// The database assigns the id and stamps `created_at = updated_at`,
    /// so the caller observes server-assigned values.
    pub async fn create(pool: &PgPool, data: CreateNote) -> Result<Self, sqlx::Error> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (owner_id, title, content)
            VALUES ($1, $2, $3)
            RETURNING id, owner_id, title, content, created_at, updated_at
            "#,
        )
        .bind(data.owner_id)
        .bind(data.title)
        .bind(data.content)
        .fetch_one(pool)
        .await?;

        Ok(note)
    }

    /// Updates a note's content (and optionally title) in one atomic
    /// statement, refreshing `updated_at`.
    ///
    /// The ownership check is the `WHERE` clause itself. Returns the
    /// post-update row, or `None` when the note is missing or not owned by
    /// `owner_id`.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
        data: UpdateNote,
    ) -> Result<Option<Self>, sqlx::Error> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            UPDATE notes
            SET content = $3,
                title = COALESCE($4, title),
                updated_at = NOW()
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, title, content, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(data.content)
        .bind(data.title)
        .fetch_optional(pool)
        .await?;

        Ok(note)
    }

    /// Deletes a note if it belongs to `owner_id`.
    ///
    /// Returns true only if a row was actually removed; zero affected rows
    /// means the note was missing or not theirs, even if it existed a
    /// moment earlier.
    pub async fn delete(pool: &PgPool, id: Uuid, owner_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_serialization_shape() {
        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            title: "T".to_string(),
            content: "C".to_string(),
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&note).unwrap();
        for field in ["id", "owner_id", "title", "content", "created_at", "updated_at"] {
            assert!(json.get(field).is_some(), "missing field {}", field);
        }
        // chrono serializes as RFC 3339
        assert!(json["created_at"].as_str().unwrap().contains('T'));
    }

    // Ownership scoping and the atomic update/delete paths are covered by
    // the API crate's integration tests.
}
