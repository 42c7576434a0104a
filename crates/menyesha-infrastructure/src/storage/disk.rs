//! Disk-backed upload store.
//!
//! Uploaded files land under a fixed root served statically: identity
//! documents directly in the root, evidence images in a `complaints/`
//! subdirectory. Filenames are server-generated (timestamp + random
//! suffix + original extension) so concurrent uploads cannot collide.

use std::path::{Path, PathBuf};

use chrono::Utc;
use rand::Rng;
use thiserror::Error;
use tracing::info;

use menyesha_shared::constants::{MAX_EVIDENCE_BYTES, MAX_ID_CARD_BYTES};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Only image files are allowed")]
    NotAnImage,
    #[error("File exceeds the {limit_bytes} byte limit")]
    TooLarge { limit_bytes: usize },
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    IdCard,
    Evidence,
}

impl UploadKind {
    fn prefix(&self) -> &'static str {
        match self {
            UploadKind::IdCard => "id-card",
            UploadKind::Evidence => "evidence",
        }
    }

    fn subdir(&self) -> Option<&'static str> {
        match self {
            UploadKind::IdCard => None,
            UploadKind::Evidence => Some("complaints"),
        }
    }

    fn max_bytes(&self) -> usize {
        match self {
            UploadKind::IdCard => MAX_ID_CARD_BYTES,
            UploadKind::Evidence => MAX_EVIDENCE_BYTES,
        }
    }
}

pub struct DiskFileStore {
    root: PathBuf,
}

impl DiskFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the upload directories if they do not exist yet.
    pub async fn ensure_dirs(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::create_dir_all(self.root.join("complaints")).await?;
        Ok(())
    }

    /// Validate and persist one uploaded file, returning the stored
    /// filename (the database records filenames, not paths).
    pub async fn save(
        &self,
        kind: UploadKind,
        original_name: &str,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<String, StorageError> {
        if !content_type.is_some_and(|ct| ct.starts_with("image/")) {
            return Err(StorageError::NotAnImage);
        }
        if bytes.len() > kind.max_bytes() {
            return Err(StorageError::TooLarge {
                limit_bytes: kind.max_bytes(),
            });
        }

        let filename = generate_filename(kind.prefix(), original_name);
        let dir = match kind.subdir() {
            Some(sub) => self.root.join(sub),
            None => self.root.clone(),
        };
        tokio::fs::write(dir.join(&filename), bytes).await?;

        info!("Stored {} upload as {}", kind.prefix(), filename);
        Ok(filename)
    }
}

/// `<prefix>-<unix millis>-<9-digit random><ext>`. The millisecond
/// timestamp plus the random suffix keeps concurrent uploads apart.
fn generate_filename(prefix: &str, original_name: &str) -> String {
    let suffix: u32 = rand::rng().random_range(0..1_000_000_000);
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    format!("{}-{}-{:09}{}", prefix, Utc::now().timestamp_millis(), suffix, ext)
}
