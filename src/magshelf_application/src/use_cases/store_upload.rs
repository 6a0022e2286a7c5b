use magshelf_core::{FileStorage, FileStorageError, FileUpload, UploadError};

#[derive(Debug, thiserror::Error)]
pub enum StoreUploadError {
    #[error("{0}")]
    Invalid(#[from] UploadError),
    #[error("{0}")]
    Storage(#[from] FileStorageError),
}

/// Validates an uploaded file and hands it to storage, returning its public URL
pub struct StoreUploadUseCase<'a, S>
where
    S: FileStorage + ?Sized,
{
    file_storage: &'a S,
}

impl<'a, S> StoreUploadUseCase<'a, S>
where
    S: FileStorage + ?Sized,
{
    pub fn new(file_storage: &'a S) -> Self {
        Self { file_storage }
    }

    #[tracing::instrument(name = "StoreUploadUseCase::execute", skip(self, bytes), fields(size = bytes.len()))]
    pub async fn execute(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StoreUploadError> {
        let upload = FileUpload::new(file_name, content_type, bytes)?;
        let url = self
            .file_storage
            .store(upload.file_name(), upload.content_type(), upload.bytes())
            .await?;
        Ok(url)
    }
}
