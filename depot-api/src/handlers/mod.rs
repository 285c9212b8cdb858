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

//! HTTP request handlers.
//!
//! This module provides handlers for:
//! - File upload via multipart form data (POST /files)
//! - Download variants: plain, media-typed, conditionally cached
//! - Reverse-proxy delegated download (X-Accel-Redirect)
//! - JSON echo diagnostic (field-visibility demonstration)

pub mod delegate;
pub mod download;
pub mod echo;
pub mod upload;

pub use delegate::{delegate_download, DelegatedDownload};
pub use download::{
    download_cached, download_file, download_media, serve_download, CacheMode, DownloadOptions,
    MediaTypeResolution,
};
pub use echo::{echo, EchoPayload};
pub use upload::{upload_file, UploadResponse};
