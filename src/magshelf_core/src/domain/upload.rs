use thiserror::Error;

/// Content types accepted for magazine files and cover images.
pub const ALLOWED_CONTENT_TYPES: [&str; 4] =
    ["application/pdf", "image/jpeg", "image/jpg", "image/png"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("No file uploaded")]
    Empty,
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
}

/// A single file received from a multipart form.
#[derive(Debug, Clone)]
pub struct FileUpload {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, UploadError> {
        let content_type = content_type.into().to_ascii_lowercase();
        if bytes.is_empty() {
            return Err(UploadError::Empty);
        }
        if !ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
            return Err(UploadError::UnsupportedType(content_type));
        }
        Ok(Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}
