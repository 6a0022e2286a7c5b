use std::path::PathBuf;

use magshelf_core::{FileStorage, FileStorageError};
use uuid::Uuid;

/// Writes uploads to a local directory served under `/uploads`.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    directory: PathBuf,
    public_url: String,
}

impl LocalFileStorage {
    pub fn new(directory: impl Into<PathBuf>, public_url: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            public_url: public_url.into(),
        }
    }
}

fn sanitize(file_name: &str) -> String {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "file".to_owned()
    } else {
        cleaned.to_owned()
    }
}

#[async_trait::async_trait]
impl FileStorage for LocalFileStorage {
    #[tracing::instrument(name = "Storing uploaded file", skip(self, bytes))]
    async fn store(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<String, FileStorageError> {
        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| FileStorageError::Io(e.to_string()))?;

        let stored_name = format!("{}-{}", Uuid::new_v4(), sanitize(file_name));
        tokio::fs::write(self.directory.join(&stored_name), bytes)
            .await
            .map_err(|e| FileStorageError::Io(e.to_string()))?;

        Ok(format!(
            "{}/uploads/{stored_name}",
            self.public_url.trim_end_matches('/')
        ))
    }
}
