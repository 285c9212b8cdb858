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

//! File upload handler.

use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Json},
};
use serde::Serialize;
use tracing::{error, info};

use crate::error::ApiError;
use crate::server::AppState;

/// Response payload for a completed upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Absolute path the file was written to.
    pub target: String,
}

/// Uploads a file.
///
/// API: POST /files, multipart form data with a `file` field.
///
/// The file is written verbatim under its original filename, overwriting
/// any existing file with that name. The filename is used as sent by the
/// client; no sanitization is applied.
///
/// # Returns
///
/// - 200 OK with `{"target": "<absolute path>"}` on success
/// - 400 Bad Request if the `file` field is missing or unreadable
/// - 500 Internal Server Error if the write fails
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return ApiError::MissingFile.into_response(),
            Err(e) => return ApiError::InvalidUpload(e.to_string()).into_response(),
        };

        if field.name() != Some("file") {
            continue;
        }

        let filename = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return ApiError::MissingFile.into_response(),
        };

        let data = match field.bytes().await {
            Ok(data) => data,
            Err(e) => return ApiError::InvalidUpload(e.to_string()).into_response(),
        };

        info!("Upload: filename={}, size={}", filename, data.len());

        return match state.store.save(&filename, &data).await {
            Ok(target) => {
                info!("File stored: target={:?}", target);
                Json(UploadResponse {
                    target: target.display().to_string(),
                })
                .into_response()
            }
            Err(e) => {
                error!("Failed to store file: {:?}", e);
                ApiError::Storage(e).into_response()
            }
        };
    }
}
