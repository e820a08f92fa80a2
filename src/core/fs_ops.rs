// src/core/fs_ops.rs
//! File system helpers and the upload store

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};
use uuid::Uuid;

/// URL prefix under which stored uploads are served.
pub const UPLOADS_ROUTE: &str = "/uploads";

pub struct FsOps;

impl FsOps {
    pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)
                .await
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
            info!("Created directory: {}", path.display());
        }
        Ok(())
    }

    /// Keep the last path component and reduce it to `[A-Za-z0-9._-]`.
    pub fn sanitize_file_name(name: &str) -> String {
        let base = name.rsplit(['/', '\\']).next().unwrap_or_default();

        let cleaned: String = base
            .trim()
            .chars()
            .map(|c| match c {
                c if c.is_ascii_alphanumeric() => c,
                '.' | '-' | '_' => c,
                _ => '_',
            })
            .collect();

        let cleaned = cleaned.trim_start_matches('.').to_string();
        if cleaned.is_empty() {
            "upload".to_string()
        } else {
            cleaned
        }
    }
}

/// Where an upload should be written, and the reference stored on the profile.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredFile {
    pub path: PathBuf,
    pub reference: String,
}

#[derive(Debug, Clone)]
pub struct FileStore {
    uploads_dir: PathBuf,
}

impl FileStore {
    pub fn new(uploads_dir: PathBuf) -> Self {
        Self { uploads_dir }
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    /// Reserve a unique slot for an upload named `original_name`.
    pub fn reserve(&self, original_name: Option<&str>, extension: Option<&str>) -> StoredFile {
        let mut name = FsOps::sanitize_file_name(original_name.unwrap_or("upload"));
        if let Some(ext) = extension {
            if !name.contains('.') {
                name = format!("{}.{}", name, FsOps::sanitize_file_name(ext));
            }
        }

        let file_name = format!("{}-{}", Uuid::new_v4().simple(), name);
        StoredFile {
            path: self.uploads_dir.join(&file_name),
            reference: format!("{}/{}", UPLOADS_ROUTE, file_name),
        }
    }

    /// Remove uploads that never ended up on a profile. Failures are only logged.
    pub async fn discard(&self, stored: &[StoredFile]) {
        for file in stored {
            match fs::remove_file(&file.path).await {
                Ok(()) => info!("Removed orphaned upload {}", file.reference),
                Err(e) => warn!(
                    "Failed to remove orphaned upload {}: {}",
                    file.path.display(),
                    e
                ),
            }
        }
    }
}
