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

//! Application initialization and runtime.
//!
//! This module handles:
//! - File store initialization
//! - HTTP server setup and routing
//! - Graceful shutdown

use crate::config::Config;
use anyhow::Result;
use axum::ServiceExt;
use depot_api::{create_router, AppState, MediaTypeMap};
use depot_core::LocalFileStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::normalize_path::NormalizePath;
use tracing::{error, info};

/// Main application.
pub struct App {
    config: Config,
    /// File store rooted at the configured storage directory.
    store: LocalFileStore,
}

impl App {
    /// Creates a new application instance.
    ///
    /// Initializes the file store with configuration settings.
    pub async fn new(config: Config) -> Result<Self> {
        info!("Initializing Depot application...");

        // Ensure the storage directory exists up front. Creation failure is
        // not fatal here; uploads keep failing individually until it exists.
        if let Err(e) = tokio::fs::create_dir_all(&config.storage.base_dir).await {
            error!(
                "Failed to create storage directory {:?}: {}",
                config.storage.base_dir, e
            );
        }

        let store = LocalFileStore::new(&config.storage.base_dir);

        info!("File store initialized at {:?}", store.base_dir());

        Ok(Self { config, store })
    }

    /// Runs the application (HTTP server).
    pub async fn run(self) -> Result<()> {
        info!("Depot server starting...");
        info!("Storage directory: {:?}", self.config.storage.base_dir);
        info!(
            "Max upload size: {} bytes ({:.2} MB)",
            self.config.server.max_upload_size,
            self.config.server.max_upload_size as f64 / (1024.0 * 1024.0)
        );

        // Parse bind address
        let addr: SocketAddr = self.config.server.bind.parse()?;

        // Layer configured media type entries over the built-in table
        let mut media_types = MediaTypeMap::new();
        for (extension, media_type) in &self.config.http.media_types {
            media_types.insert(extension, media_type);
        }

        // Create application state (consumes self.store)
        let state = AppState::new(Arc::new(self.store))
            .with_media_types(media_types)
            .with_cache_max_age(self.config.http.cache_max_age)
            .with_accel_prefix(self.config.http.accel_prefix.clone())
            .with_max_upload_size(self.config.server.max_upload_size);

        // Create router
        let router = create_router(state);

        info!("Listening on http://{}", addr);
        run_http_server(addr, router).await
    }
}

/// Runs the HTTP server.
async fn run_http_server(addr: SocketAddr, router: axum::Router) -> Result<()> {
    // Create TCP listener
    let listener = TcpListener::bind(addr).await?;

    // Wrap with NormalizePath to trim trailing slashes
    let app = NormalizePath::trim_trailing_slash(router);

    // Run server with graceful shutdown
    axum::serve(
        listener,
        ServiceExt::<axum::http::Request<axum::body::Body>>::into_make_service(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Handles graceful shutdown signals.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown...");
        }
    }
}
