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

//! Depot storage layer.
//!
//! This crate provides the storage abstraction for Depot:
//! - `FileStore` trait for saving and reading uploaded files
//! - `LocalFileStore` backed by a single flat directory
//! - Storage error types
//!
//! No HTTP types live in this crate; the API layer depends on it
//! through the `FileStore` trait.

pub mod error;
pub mod storage;

pub use error::StorageError;
pub use storage::{FileMetadata, FileStore, LocalFileStore};
