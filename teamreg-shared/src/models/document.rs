/// Document records
///
/// Only the write path exists: a document row records where a stored file
/// lives. The team identifier is not validated.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE documents (
///     id TEXT NOT NULL,
///     team_id TEXT NOT NULL,
///     path TEXT NOT NULL,
///     CONSTRAINT documents_pkey PRIMARY KEY (id)
/// );
/// ```

use sqlx::PgPool;
use tracing::info;

use crate::db::error::{constraints, StoreError, Violation};
use crate::ids::RecordId;

pub struct Document;

impl Document {
    /// Records `path` as a document of `team_id`
    ///
    /// # Errors
    ///
    /// - `StoreError::IdentifierCollision` if the generated id is taken
    /// - `StoreError::Database` for anything else
    pub async fn add(pool: &PgPool, team_id: &RecordId, path: &str) -> Result<RecordId, StoreError> {
        let id = RecordId::generate();

        sqlx::query("INSERT INTO documents (id, team_id, path) VALUES ($1, $2, $3)")
            .bind(&id)
            .bind(team_id)
            .bind(path)
            .execute(pool)
            .await
            .map_err(|e| match Violation::from_sqlx(&e) {
                Some(v) if v.is_constraint(constraints::DOCUMENTS_PKEY) => {
                    StoreError::IdentifierCollision("documents".to_string())
                }
                _ => StoreError::Database(e),
            })?;

        info!(team_id = %team_id, document_id = %id, "Recorded document");
        Ok(id)
    }
}
