/// Document upload endpoint
///
/// ```text
/// POST /api/upload-document?team_id=482913
/// <raw bytes>
/// ```
///
/// The body is written to `DOCUMENT_DIR/<uuid>` and the path recorded for
/// the team. Files are only written for the team's owner, and a file whose
/// record fails to insert is deleted again.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::auth::NO_ID,
};
use axum::{
    extract::{Query, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use teamreg_shared::{
    auth::{
        authorization::{authorize_team, AccessFlags},
        cookies::CallerToken,
    },
    db::error::StoreError,
    ids::RecordId,
    models::document::Document,
};
use std::{future::Future, path::Path};
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct UploadParams {
    pub team_id: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadDocumentResponse {
    pub document_id: String,
    pub success: bool,

    #[serde(flatten)]
    pub access: AccessFlags,
}

pub async fn upload_document(
    State(state): State<AppState>,
    CallerToken(token): CallerToken,
    Query(params): Query<UploadParams>,
    body: Bytes,
) -> ApiResult<Json<UploadDocumentResponse>> {
    let team_id = RecordId::new(params.team_id);
    let access = authorize_team(&state.db, token.as_ref(), &team_id).await?;

    if !access.is_owner() {
        return Ok(Json(UploadDocumentResponse {
            document_id: NO_ID.to_string(),
            success: false,
            access: access.flags(),
        }));
    }

    let (db, team) = (&state.db, &team_id);
    let document_id = store_document(&state.config.documents.dir, &body, |path| async move {
        Document::add(db, team, &path).await
    })
    .await?;

    info!(team_id = %team_id, document_id = %document_id, "Document uploaded");
    Ok(Json(UploadDocumentResponse {
        document_id: document_id.into_inner(),
        success: true,
        access: AccessFlags::GRANTED,
    }))
}

/// Writes `body` to a fresh file under `dir` and hands its path to `record`
///
/// A file whose path could not be recorded is removed again.
async fn store_document<F, Fut>(dir: &Path, body: &[u8], record: F) -> ApiResult<RecordId>
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<RecordId, StoreError>>,
{
    tokio::fs::create_dir_all(dir).await?;

    let path = dir.join(Uuid::new_v4().to_string());
    tokio::fs::write(&path, body).await?;
    debug!(path = %path.display(), bytes = body.len(), "Wrote document");

    match record(path.to_string_lossy().into_owned()).await {
        Ok(document_id) => Ok(document_id),
        Err(e) => {
            if let Err(remove_err) = tokio::fs::remove_file(&path).await {
                warn!(path = %path.display(), error = %remove_err, "Failed to remove unrecorded document");
            }
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("teamreg-store-{}", Uuid::new_v4()))
    }

    async fn file_count(dir: &Path) -> usize {
        let mut entries = tokio::fs::read_dir(dir).await.unwrap();
        let mut count = 0;
        while entries.next_entry().await.unwrap().is_some() {
            count += 1;
        }
        count
    }

    #[tokio::test]
    async fn test_store_document_keeps_recorded_file() {
        let dir = scratch_dir();

        let id = store_document(&dir, b"%PDF-1.4", |path| async move {
            assert_eq!(tokio::fs::read(&path).await.unwrap(), b"%PDF-1.4");
            Ok(RecordId::new("123456"))
        })
        .await
        .unwrap();

        assert_eq!(id.as_str(), "123456");
        assert_eq!(file_count(&dir).await, 1);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_store_document_removes_file_when_record_fails() {
        let dir = scratch_dir();

        let result = store_document(&dir, b"%PDF-1.4", |_| async {
            Err(StoreError::IdentifierCollision("documents".to_string()))
        })
        .await;

        assert!(matches!(result, Err(ApiError::InternalError(_))));
        assert_eq!(file_count(&dir).await, 0);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
