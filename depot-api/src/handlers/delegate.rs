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

//! Reverse-proxy delegated download.
//!
//! The handler never touches storage. It answers with an
//! `X-Accel-Redirect` header pointing at an internal-only location, and
//! the reverse proxy in front of the service performs the actual transfer.
//! Any authorization checks belong in front of this handler; none are
//! performed here.

use axum::{
    body::Body,
    extract::{Path, State},
    http::HeaderValue,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::error::ApiError;
use crate::server::AppState;

/// A download delegated to the reverse proxy.
///
/// Distinct from the direct-streaming download responses: it carries no
/// body and no content type, only the internal redirect location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegatedDownload {
    /// Internal location the proxy serves the file from.
    pub location: String,
}

impl DelegatedDownload {
    /// Builds the internal location from the configured prefix and the
    /// requested filename.
    pub fn new(prefix: &str, filename: &str) -> Self {
        Self {
            location: format!("{}/{}", prefix, filename),
        }
    }
}

impl IntoResponse for DelegatedDownload {
    fn into_response(self) -> Response {
        // The path segment arrives percent-decoded, so it can carry bytes
        // that are not representable as a header value.
        match HeaderValue::from_str(&self.location) {
            Ok(location) => {
                let mut response = Response::new(Body::empty());
                response.headers_mut().insert("X-Accel-Redirect", location);
                response
            }
            Err(_) => ApiError::InvalidRedirect {
                location: self.location,
            }
            .into_response(),
        }
    }
}

/// Delegates a download to the reverse proxy.
///
/// API: GET /files4/{filename}
///
/// # Returns
///
/// - 200 OK with `X-Accel-Redirect: <prefix>/<filename>` and no body
///   (no existence check is made)
/// - 400 Bad Request if the decoded filename cannot be carried in a
///   header value
pub async fn delegate_download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> DelegatedDownload {
    debug!("DelegateDownload: filename={}", filename);
    DelegatedDownload::new(&state.accel_prefix, &filename)
}
