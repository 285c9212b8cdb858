// Copyright 2026 Depot Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Local filesystem file store.
//!
//! Stores every file in a single flat base directory, keyed by the
//! client-supplied filename. No metadata sidecar, no manifest. Concurrent
//! saves to the same name race with last-writer-wins.

use crate::error::StorageError;
use crate::storage::engine::{FileMetadata, FileStore};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File store backed by a single directory on the local filesystem.
pub struct LocalFileStore {
    /// Directory all files are stored in.
    base_dir: PathBuf,
}

impl LocalFileStore {
    /// Creates a new store over the given base directory.
    ///
    /// The directory is not created here; the caller is responsible for
    /// making sure it exists before the first save.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Returns the base directory of this store.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolves the on-disk path for a filename.
    ///
    /// Plain join of base directory and filename. No normalization and no
    /// traversal protection: a filename containing `..` resolves outside
    /// the base directory.
    pub fn resolve_path(&self, filename: &str) -> PathBuf {
        self.base_dir.join(filename)
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn save(&self, filename: &str, data: &[u8]) -> Result<PathBuf, StorageError> {
        let path = self.resolve_path(filename);
        tokio::fs::write(&path, data).await?;
        let target = std::path::absolute(&path)?;
        debug!("Saved file: path={:?}, size={}", target, data.len());
        Ok(target)
    }

    async fn read(&self, filename: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.resolve_path(filename);
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::NotFound {
                filename: filename.to_string(),
            }),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn metadata(&self, filename: &str) -> Result<FileMetadata, StorageError> {
        let path = self.resolve_path(filename);
        match tokio::fs::metadata(&path).await {
            Ok(meta) => Ok(FileMetadata {
                size: meta.len(),
                modified: meta.modified()?,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::NotFound {
                filename: filename.to_string(),
            }),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (LocalFileStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = LocalFileStore::new(temp_dir.path());
        (store, temp_dir)
    }

    #[test]
    fn test_resolve_path_joins_base_and_filename() {
        let store = LocalFileStore::new("/data/uploads");
        assert_eq!(
            store.resolve_path("photo.png"),
            PathBuf::from("/data/uploads/photo.png")
        );
    }

    #[test]
    fn test_resolve_path_does_not_sanitize() {
        // Traversal-shaped names pass through untouched.
        let store = LocalFileStore::new("/data/uploads");
        assert_eq!(
            store.resolve_path("../escape.txt"),
            PathBuf::from("/data/uploads/../escape.txt")
        );
    }

    #[tokio::test]
    async fn test_save_then_read_round_trip() {
        let (store, _temp) = create_test_store();

        let target = store.save("hello.txt", b"hello world").await.unwrap();
        assert!(target.is_absolute());
        assert!(target.ends_with("hello.txt"));

        let data = store.read("hello.txt").await.unwrap();
        assert_eq!(data, b"hello world");
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_file() {
        let (store, _temp) = create_test_store();

        store.save("doc.txt", b"first").await.unwrap();
        store.save("doc.txt", b"second").await.unwrap();

        let data = store.read("doc.txt").await.unwrap();
        assert_eq!(data, b"second");
    }

    #[tokio::test]
    async fn test_read_missing_file_is_not_found() {
        let (store, _temp) = create_test_store();

        let err = store.read("missing.bin").await.unwrap_err();
        match err {
            StorageError::NotFound { filename } => assert_eq!(filename, "missing.bin"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_metadata_reports_size() {
        let (store, _temp) = create_test_store();

        store.save("sized.bin", &[0u8; 1234]).await.unwrap();
        let meta = store.metadata("sized.bin").await.unwrap();
        assert_eq!(meta.size, 1234);
    }

    #[tokio::test]
    async fn test_metadata_missing_file_is_not_found() {
        let (store, _temp) = create_test_store();

        let err = store.metadata("missing.bin").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_save_to_missing_directory_fails_with_io() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = LocalFileStore::new(temp_dir.path().join("does-not-exist"));

        let err = store.save("file.txt", b"data").await.unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
    }
}
