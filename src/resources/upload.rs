//! File attachments for multipart writes

use reqwest::multipart::Part;
use std::path::Path;

use crate::error::{ApiError, ApiResult};

/// An image file attached to a carousel or review write
#[derive(Clone, PartialEq, Eq)]
pub struct Upload {
    file_name: String,
    bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Read a local file
    pub async fn from_path(path: impl AsRef<Path>) -> ApiResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::Upload {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Content type guessed from the extension
    pub fn mime_type(&self) -> Option<mime_guess::Mime> {
        mime_guess::from_path(&self.file_name).first()
    }

    pub(crate) fn into_part(self) -> ApiResult<Part> {
        let mime = self.mime_type();
        let part = Part::bytes(self.bytes).file_name(self.file_name);
        match mime {
            Some(mime) => Ok(part.mime_str(mime.essence_str())?),
            None => Ok(part),
        }
    }
}

impl std::fmt::Debug for Upload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Upload")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}
