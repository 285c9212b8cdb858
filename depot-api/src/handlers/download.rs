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

//! Download handlers.
//!
//! One configurable download operation serves three endpoints that differ
//! only in media type resolution and caching:
//! - GET /files/{filename} - plain octet-stream transfer
//! - GET /files2/{filename} - media type resolved from the extension table
//! - GET /files3/{filename} - media-typed plus conditional caching

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, NaiveDateTime, Utc};
use depot_core::StorageError;
use std::time::SystemTime;
use tracing::{debug, error};

use crate::error::ApiError;
use crate::media::APPLICATION_OCTET_STREAM;
use crate::server::AppState;

/// How the response `Content-Type` is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaTypeResolution {
    /// Always `application/octet-stream`.
    OctetStream,
    /// Resolve through the extension table, octet-stream fallback.
    Table,
}

/// Whether conditional caching is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMode {
    /// Plain 200 responses, no cache headers.
    Off,
    /// Honor `If-Modified-Since` and attach `Cache-Control: max-age=N`
    /// plus `Last-Modified` to full responses.
    MaxAge(u32),
}

/// Per-endpoint download behavior.
#[derive(Debug, Clone, Copy)]
pub struct DownloadOptions {
    /// Content type resolution.
    pub media_types: MediaTypeResolution,
    /// Caching behavior.
    pub caching: CacheMode,
}

/// Downloads a file with plain binary content type.
///
/// API: GET /files/{filename}
///
/// # Returns
///
/// - 200 OK with `Content-Type: application/octet-stream` and the file content
/// - 404 Not Found with empty body if no such file is stored
pub async fn download_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    serve_download(
        &state,
        &filename,
        &headers,
        DownloadOptions {
            media_types: MediaTypeResolution::OctetStream,
            caching: CacheMode::Off,
        },
    )
    .await
}

/// Downloads a file with the media type resolved from its extension.
///
/// API: GET /files2/{filename}
///
/// # Returns
///
/// - 200 OK with `Content-Type` from the extension table (octet-stream
///   when unmapped or extensionless) and the file content
/// - 404 Not Found with empty body if no such file is stored
pub async fn download_media(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    serve_download(
        &state,
        &filename,
        &headers,
        DownloadOptions {
            media_types: MediaTypeResolution::Table,
            caching: CacheMode::Off,
        },
    )
    .await
}

/// Downloads a file with media type resolution and conditional caching.
///
/// API: GET /files3/{filename}
///
/// # Request Headers
///
/// - `If-Modified-Since`: HTTP date the client's cached copy carries
///
/// # Returns
///
/// - 304 Not Modified with no body when the stored file is not newer than
///   the conditional timestamp (equal timestamps count as not modified)
/// - 200 OK with `Cache-Control: max-age=N`, `Last-Modified`, resolved
///   `Content-Type`, and the file content otherwise
/// - 404 Not Found with empty body if no such file is stored
pub async fn download_cached(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    serve_download(
        &state,
        &filename,
        &headers,
        DownloadOptions {
            media_types: MediaTypeResolution::Table,
            caching: CacheMode::MaxAge(state.cache_max_age),
        },
    )
    .await
}

/// Serves a stored file according to the given options.
///
/// This is the single download operation behind all three download
/// endpoints. It reads the whole file into memory and answers with the
/// full content; there is no range support and no streaming.
pub async fn serve_download(
    state: &AppState,
    filename: &str,
    headers: &HeaderMap,
    options: DownloadOptions,
) -> Response {
    debug!("Download: filename={}, options={:?}", filename, options);

    // Conditional handling needs the modification time before the content
    // is read; a 304 answer skips the read entirely.
    let cache_headers = match options.caching {
        CacheMode::Off => None,
        CacheMode::MaxAge(max_age) => {
            let meta = match state.store.metadata(filename).await {
                Ok(meta) => meta,
                Err(StorageError::NotFound { .. }) => {
                    debug!("Download miss: filename={}", filename);
                    return ApiError::NotFound {
                        filename: filename.to_string(),
                    }
                    .into_response();
                }
                Err(e) => {
                    error!("Failed to stat file: {:?}", e);
                    return ApiError::Storage(e).into_response();
                }
            };

            if not_modified_since(headers, meta.modified) {
                return Response::builder()
                    .status(StatusCode::NOT_MODIFIED)
                    .body(Body::empty())
                    .unwrap();
            }

            Some((
                format!("max-age={}", max_age),
                format_http_date(meta.modified),
            ))
        }
    };

    let data = match state.store.read(filename).await {
        Ok(data) => data,
        Err(StorageError::NotFound { .. }) => {
            debug!("Download miss: filename={}", filename);
            return ApiError::NotFound {
                filename: filename.to_string(),
            }
            .into_response();
        }
        Err(e) => {
            error!("Failed to read file: {:?}", e);
            return ApiError::Storage(e).into_response();
        }
    };

    let content_type = match options.media_types {
        MediaTypeResolution::OctetStream => APPLICATION_OCTET_STREAM,
        MediaTypeResolution::Table => state.media_types.resolve(filename),
    };

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type);

    if let Some((cache_control, last_modified)) = cache_headers {
        builder = builder
            .header(header::CACHE_CONTROL, cache_control)
            .header(header::LAST_MODIFIED, last_modified);
    }

    builder.body(Body::from(data)).unwrap()
}

/// Formats a timestamp as an HTTP date (IMF-fixdate).
fn format_http_date(time: SystemTime) -> String {
    let dt: DateTime<Utc> = time.into();
    dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parses an HTTP date in any of the three forms RFC 9110 requires
/// recipients to accept: IMF-fixdate, the obsolete RFC 850 form, and the
/// asctime form.
fn parse_http_date(value: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.timestamp());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%A, %d-%b-%y %H:%M:%S GMT") {
        return Some(dt.and_utc().timestamp());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%a %b %e %H:%M:%S %Y") {
        return Some(dt.and_utc().timestamp());
    }
    None
}

/// Checks whether the request's `If-Modified-Since` header covers the
/// file's modification time.
///
/// HTTP dates carry whole seconds, so the comparison truncates the
/// modification time to seconds; equality counts as not modified. A
/// missing or unparseable header never matches.
fn not_modified_since(headers: &HeaderMap, modified: SystemTime) -> bool {
    let since = headers
        .get(header::IF_MODIFIED_SINCE)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_http_date);

    match since {
        Some(since) => since >= DateTime::<Utc>::from(modified).timestamp(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use std::time::Duration;

    fn unix_time(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn if_modified_since(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::IF_MODIFIED_SINCE,
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn test_format_http_date() {
        let formatted = format_http_date(unix_time(1_704_067_200)); // 2024-01-01 00:00:00 UTC
        assert_eq!(formatted, "Mon, 01 Jan 2024 00:00:00 GMT");
    }

    #[test]
    fn test_format_then_parse_round_trip() {
        let time = unix_time(1_704_067_200);
        let formatted = format_http_date(time);
        let parsed = DateTime::parse_from_rfc2822(&formatted).unwrap();
        assert_eq!(parsed.timestamp(), 1_704_067_200);
    }

    #[test]
    fn test_not_modified_on_equal_timestamp() {
        let time = unix_time(1_704_067_200);
        let headers = if_modified_since(&format_http_date(time));
        assert!(not_modified_since(&headers, time));
    }

    #[test]
    fn test_not_modified_truncates_subsecond_mtime() {
        // The header carries whole seconds; a half-second-newer file still
        // counts as unmodified.
        let exact = unix_time(1_704_067_200);
        let with_nanos = exact + Duration::from_millis(500);
        let headers = if_modified_since(&format_http_date(exact));
        assert!(not_modified_since(&headers, with_nanos));
    }

    #[test]
    fn test_modified_when_file_is_newer() {
        let headers = if_modified_since(&format_http_date(unix_time(1_704_067_200)));
        assert!(!not_modified_since(&headers, unix_time(1_704_067_260)));
    }

    #[test]
    fn test_not_modified_when_header_is_newer() {
        let headers = if_modified_since(&format_http_date(unix_time(1_704_067_260)));
        assert!(not_modified_since(&headers, unix_time(1_704_067_200)));
    }

    #[test]
    fn test_rfc_850_header_is_accepted() {
        let headers = if_modified_since("Monday, 01-Jan-24 00:00:00 GMT");
        assert!(not_modified_since(&headers, unix_time(1_704_067_200)));
        assert!(!not_modified_since(&headers, unix_time(1_704_067_260)));
    }

    #[test]
    fn test_asctime_header_is_accepted() {
        let headers = if_modified_since("Mon Jan  1 00:00:00 2024");
        assert!(not_modified_since(&headers, unix_time(1_704_067_200)));
        assert!(!not_modified_since(&headers, unix_time(1_704_067_260)));
    }

    #[test]
    fn test_unparseable_header_is_ignored() {
        let headers = if_modified_since("not a date");
        assert!(!not_modified_since(&headers, unix_time(1_704_067_200)));
    }

    #[test]
    fn test_absent_header_is_ignored() {
        let headers = HeaderMap::new();
        assert!(!not_modified_since(&headers, unix_time(1_704_067_200)));
    }
}
