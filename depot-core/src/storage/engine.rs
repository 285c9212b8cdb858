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

//! File store trait.

use crate::error::StorageError;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::SystemTime;

/// Metadata of a stored file.
#[derive(Debug, Clone, Copy)]
pub struct FileMetadata {
    /// Size in bytes.
    pub size: u64,
    /// Last modification time, as assigned by the filesystem.
    pub modified: SystemTime,
}

/// Main file store interface.
///
/// This trait defines the operations for storing and retrieving uploaded
/// files. Filenames are client-supplied and used verbatim; the store
/// performs no sanitization (callers must treat them as trusted or apply
/// external checks).
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Writes a file to the store, overwriting any existing file with
    /// the same name.
    ///
    /// # Arguments
    ///
    /// * `filename` - Name the file is stored under
    /// * `data` - File content
    ///
    /// # Returns
    ///
    /// Returns the absolute path the file was written to.
    async fn save(&self, filename: &str, data: &[u8]) -> Result<PathBuf, StorageError>;

    /// Reads the full content of a stored file.
    ///
    /// # Arguments
    ///
    /// * `filename` - Name of the stored file
    ///
    /// # Returns
    ///
    /// Returns the file content, or `NotFound` if no such file exists.
    async fn read(&self, filename: &str) -> Result<Vec<u8>, StorageError>;

    /// Gets file metadata without reading the content.
    ///
    /// # Arguments
    ///
    /// * `filename` - Name of the stored file
    ///
    /// # Returns
    ///
    /// Returns size and modification time, or `NotFound` if no such
    /// file exists.
    async fn metadata(&self, filename: &str) -> Result<FileMetadata, StorageError>;
}
