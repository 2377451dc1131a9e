/// Database models for Jotter
///
/// # Models
///
/// - `user`: user accounts backing the credential store
/// - `note`: ownership-scoped notes; every operation filters by owner
///
/// # Example
///
/// ```no_run
/// use jotter_shared::models::note::{CreateNote, Note};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, owner_id: Uuid) -> Result<(), sqlx::Error> {
/// let note = Note::create(
///     &pool,
///     CreateNote {
///         owner_id,
///         title: "Groceries".to_string(),
///         content: "milk, eggs".to_string(),
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod note;
pub mod user;
