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

//! Depot API Layer - HTTP endpoints for file transfer
//!
//! This crate provides the HTTP API layer for Depot, including:
//! - Multipart file upload
//! - Download endpoints (plain, media-typed, conditionally cached)
//! - Reverse-proxy delegated download
//! - A JSON echo endpoint for serialization diagnostics
//! - Middleware for request logging

pub mod error;
pub mod handlers;
pub mod media;
pub mod middleware;
pub mod server;

pub use error::ApiError;
pub use handlers::download;
pub use handlers::upload;
pub use media::{MediaTypeMap, APPLICATION_OCTET_STREAM};
pub use server::{
    create_router, AppState, DEFAULT_ACCEL_PREFIX, DEFAULT_CACHE_MAX_AGE, DEFAULT_MAX_UPLOAD_SIZE,
};
