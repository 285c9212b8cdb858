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

//! Axum HTTP server setup and routing.
//!
//! This module provides the shared application state and the router for
//! the Depot endpoints.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use depot_core::FileStore;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::media::MediaTypeMap;
use crate::middleware::logging_middleware;

/// Default maximum upload size (256MB).
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 256 * 1024 * 1024;

/// Default client-side cache lifetime for the cached download endpoint.
pub const DEFAULT_CACHE_MAX_AGE: u32 = 60;

/// Default internal location prefix for proxy-delegated downloads.
pub const DEFAULT_ACCEL_PREFIX: &str = "/ngdownload";

/// Shared application state for all handlers.
///
/// Built once at startup and cloned per request. Nothing here is mutable
/// after construction: the store and media type table are shared
/// read-only, so handlers need no locking.
#[derive(Clone)]
pub struct AppState {
    /// File store instance.
    pub store: Arc<dyn FileStore>,
    /// Extension to media type table.
    pub media_types: Arc<MediaTypeMap>,
    /// Seconds for `Cache-Control: max-age` on the cached download endpoint.
    pub cache_max_age: u32,
    /// Internal location prefix for `X-Accel-Redirect`.
    pub accel_prefix: String,
    /// Maximum upload size in bytes.
    pub max_upload_size: usize,
}

impl AppState {
    /// Creates application state over a file store, with defaults for
    /// everything else.
    pub fn new(store: Arc<dyn FileStore>) -> Self {
        Self {
            store,
            media_types: Arc::new(MediaTypeMap::new()),
            cache_max_age: DEFAULT_CACHE_MAX_AGE,
            accel_prefix: DEFAULT_ACCEL_PREFIX.to_string(),
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
        }
    }

    /// Replaces the media type table.
    pub fn with_media_types(mut self, media_types: MediaTypeMap) -> Self {
        self.media_types = Arc::new(media_types);
        self
    }

    /// Sets the cache lifetime for the cached download endpoint.
    pub fn with_cache_max_age(mut self, seconds: u32) -> Self {
        self.cache_max_age = seconds;
        self
    }

    /// Sets the internal location prefix for delegated downloads.
    pub fn with_accel_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.accel_prefix = prefix.into();
        self
    }

    /// Sets the maximum upload size.
    pub fn with_max_upload_size(mut self, max_upload_size: usize) -> Self {
        self.max_upload_size = max_upload_size;
        self
    }
}

/// Creates the main router with all Depot endpoints.
///
/// # Routing
///
/// - `POST /files` - upload (multipart field `file`)
/// - `GET /files/:filename` - plain download
/// - `GET /files2/:filename` - media-typed download
/// - `GET /files3/:filename` - media-typed download with conditional caching
/// - `GET /files4/:filename` - proxy-delegated download
/// - `POST /as` - JSON echo diagnostic
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/files", post(handlers::upload_file))
        .route("/files/:filename", get(handlers::download_file))
        .route("/files2/:filename", get(handlers::download_media))
        .route("/files3/:filename", get(handlers::download_cached))
        .route("/files4/:filename", get(handlers::delegate_download))
        .route("/as", post(handlers::echo))
        // Add tracing layer for request logging
        .layer(TraceLayer::new_for_http())
        // Add one-line-per-request logging with latency
        .layer(middleware::from_fn(logging_middleware))
        // Bound request bodies by the configured upload size
        .layer(DefaultBodyLimit::max(state.max_upload_size))
        // Attach shared state
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_core::LocalFileStore;

    #[test]
    fn test_state_defaults() {
        let state = AppState::new(Arc::new(LocalFileStore::new("/tmp/depot")));
        assert_eq!(state.cache_max_age, DEFAULT_CACHE_MAX_AGE);
        assert_eq!(state.accel_prefix, DEFAULT_ACCEL_PREFIX);
        assert_eq!(state.max_upload_size, DEFAULT_MAX_UPLOAD_SIZE);
    }

    #[test]
    fn test_state_builders() {
        let state = AppState::new(Arc::new(LocalFileStore::new("/tmp/depot")))
            .with_cache_max_age(300)
            .with_accel_prefix("/protected")
            .with_max_upload_size(1024);
        assert_eq!(state.cache_max_age, 300);
        assert_eq!(state.accel_prefix, "/protected");
        assert_eq!(state.max_upload_size, 1024);
    }
}
