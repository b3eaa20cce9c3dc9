//! Multipart form extractor
//!
//! Streams file parts into `UPLOAD_DIR` under random names and collects the
//! text parts. Whoever takes a file path owns the temp file; anything left in
//! the form must be discarded.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use axum::{
    async_trait,
    extract::{FromRef, FromRequest, Multipart, Request},
};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;
use vidtube_service::dto::remove_temp_file;

use crate::response::ApiError;
use crate::state::AppState;

/// Parsed multipart form
#[derive(Debug, Default)]
pub struct UploadForm {
    fields: HashMap<String, String>,
    files: HashMap<String, PathBuf>,
}

impl UploadForm {
    /// Text field value, empty when absent
    pub fn text(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    /// Take ownership of an uploaded file
    pub fn take_file(&mut self, name: &str) -> Option<PathBuf> {
        self.files.remove(name)
    }

    /// Remove every file nobody took
    pub async fn discard(self) {
        for path in self.files.values() {
            remove_temp_file(path).await;
        }
    }

    async fn insert_file(&mut self, name: String, path: PathBuf) {
        if let Some(previous) = self.files.insert(name, path) {
            remove_temp_file(&previous).await;
        }
    }
}

#[async_trait]
impl<S> FromRequest<S> for UploadForm
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let upload_dir = AppState::from_ref(state).config().storage.upload_dir.clone();
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::Multipart(e.body_text()))?;

        let mut form = UploadForm::default();
        match read_parts(&mut multipart, &upload_dir, &mut form).await {
            Ok(()) => Ok(form),
            Err(e) => {
                form.discard().await;
                Err(e)
            }
        }
    }
}

async fn read_parts(
    multipart: &mut Multipart,
    upload_dir: &Path,
    form: &mut UploadForm,
) -> Result<(), ApiError> {
    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Multipart(e.body_text()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match field.file_name().map(str::to_string) {
            // Browsers send an empty file part when nothing was selected
            Some(file_name) if !file_name.is_empty() => {
                let path = upload_dir.join(temp_file_name(&file_name));
                let mut file = tokio::fs::File::create(&path)
                    .await
                    .map_err(ApiError::internal)?;
                form.insert_file(name, path.clone()).await;

                let mut written = 0usize;
                while let Some(chunk) = field
                    .chunk()
                    .await
                    .map_err(|e| ApiError::Multipart(e.body_text()))?
                {
                    file.write_all(&chunk).await.map_err(ApiError::internal)?;
                    written += chunk.len();
                }
                file.flush().await.map_err(ApiError::internal)?;

                tracing::debug!(path = %path.display(), bytes = written, "Stored upload");
            }
            Some(_) => {}
            None => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::Multipart(e.body_text()))?;
                form.fields.insert(name, value);
            }
        }
    }
    Ok(())
}

/// Random name keeping the lowercased extension of the client's file name
fn temp_file_name(original: &str) -> String {
    let id = Uuid::new_v4().simple();
    match Path::new(original).extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() => format!("{id}.{}", ext.to_lowercase()),
        _ => id.to_string(),
    }
}
