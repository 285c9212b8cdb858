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

//! Configuration management for the Depot server.

use depot_api::{DEFAULT_ACCEL_PREFIX, DEFAULT_CACHE_MAX_AGE, DEFAULT_MAX_UPLOAD_SIZE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings (bind address, upload limits)
    pub server: ServerConfig,
    /// Storage settings (upload directory)
    pub storage: StorageConfig,
    /// Download behavior (cache headers, nginx delegation, media types)
    pub http: HttpConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    /// Can be set via DEPOT_BIND environment variable.
    pub bind: String,
    /// Maximum upload size in bytes.
    /// Can be set via DEPOT_MAX_UPLOAD_SIZE environment variable (e.g., "256MB", "1GB", "1024KB").
    pub max_upload_size: usize,
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory uploaded files are written to.
    /// Can be set via DEPOT_STORAGE_DIR environment variable.
    pub base_dir: PathBuf,
}

/// Download behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Cache-Control max-age in seconds for cache-aware downloads.
    /// Can be set via DEPOT_CACHE_MAX_AGE environment variable.
    pub cache_max_age: u32,
    /// Internal location prefix for nginx-delegated downloads.
    /// Can be set via DEPOT_ACCEL_PREFIX environment variable.
    pub accel_prefix: String,
    /// Extra extension-to-media-type entries layered over the built-in table.
    /// Can be set via DEPOT_MEDIA_TYPES (e.g., "svg=image/svg+xml,webm=video/webm").
    pub media_types: Vec<(String, String)>,
}

/// Parses a size string like "1GB", "256MB", "1024KB", "5000" into bytes.
///
/// Supported suffixes (case-insensitive):
/// - GB, G: Gigabytes
/// - MB, M: Megabytes
/// - KB, K: Kilobytes
/// - B or no suffix: Bytes
pub fn parse_size(s: &str) -> Result<usize, String> {
    let s = s.trim().to_uppercase();

    if s.is_empty() {
        return Err("Empty size string".to_string());
    }

    // Find where the numeric part ends
    let num_end = s.chars().position(|c| !c.is_ascii_digit() && c != '.').unwrap_or(s.len());

    let (num_str, suffix) = s.split_at(num_end);
    let suffix = suffix.trim();

    let num: f64 = num_str.parse().map_err(|_| format!("Invalid number: {}", num_str))?;

    let multiplier: usize = match suffix {
        "GB" | "G" => 1024 * 1024 * 1024,
        "MB" | "M" => 1024 * 1024,
        "KB" | "K" => 1024,
        "B" | "" => 1,
        _ => return Err(format!("Unknown size suffix: {}", suffix)),
    };

    Ok((num * multiplier as f64) as usize)
}

/// Parses a media type list like "svg=image/svg+xml,webm=video/webm".
///
/// Entries are comma-separated `extension=media-type` pairs. Whitespace
/// around entries and around the separator is ignored. Extensions are
/// matched case-sensitively at download time.
pub fn parse_media_types(s: &str) -> Result<Vec<(String, String)>, String> {
    let mut entries = Vec::new();

    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (extension, media_type) = part
            .split_once('=')
            .ok_or_else(|| format!("Invalid media type entry: {}", part))?;
        entries.push((extension.trim().to_string(), media_type.trim().to_string()));
    }

    Ok(entries)
}

impl Config {
    /// Loads configuration from environment variables or uses defaults.
    pub fn load() -> anyhow::Result<Self> {
        // For now, environment variables only
        // Later: load from config.toml
        Ok(Self::default())
    }
}

impl Default for Config {
    fn default() -> Self {
        // Use temp directory for development, can be overridden per deployment
        let base_dir = std::env::var("DEPOT_STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| std::env::temp_dir().join("depot-uploads"));

        Self {
            server: ServerConfig {
                bind: std::env::var("DEPOT_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
                max_upload_size: std::env::var("DEPOT_MAX_UPLOAD_SIZE")
                    .ok()
                    .and_then(|s| parse_size(&s).ok())
                    .unwrap_or(DEFAULT_MAX_UPLOAD_SIZE),
            },
            storage: StorageConfig { base_dir },
            http: HttpConfig {
                cache_max_age: std::env::var("DEPOT_CACHE_MAX_AGE")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_CACHE_MAX_AGE),
                accel_prefix: std::env::var("DEPOT_ACCEL_PREFIX")
                    .unwrap_or_else(|_| DEFAULT_ACCEL_PREFIX.to_string()),
                media_types: std::env::var("DEPOT_MEDIA_TYPES")
                    .ok()
                    .and_then(|s| parse_media_types(&s).ok())
                    .unwrap_or_default(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size_bytes() {
        assert_eq!(parse_size("1024").unwrap(), 1024);
        assert_eq!(parse_size("0").unwrap(), 0);
    }

    #[test]
    fn test_parse_size_suffixes() {
        assert_eq!(parse_size("1KB").unwrap(), 1024);
        assert_eq!(parse_size("256mb").unwrap(), 256 * 1024 * 1024);
        assert_eq!(parse_size("1G").unwrap(), 1024 * 1024 * 1024);
    }

    #[test]
    fn test_parse_size_invalid() {
        assert!(parse_size("").is_err());
        assert!(parse_size("abc").is_err());
        assert!(parse_size("1TB").is_err()); // TB not supported
    }

    #[test]
    fn test_parse_media_types_single() {
        let entries = parse_media_types("svg=image/svg+xml").unwrap();
        assert_eq!(entries, vec![("svg".to_string(), "image/svg+xml".to_string())]);
    }

    #[test]
    fn test_parse_media_types_multiple_with_whitespace() {
        let entries = parse_media_types(" svg = image/svg+xml , webm=video/webm ").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], ("svg".to_string(), "image/svg+xml".to_string()));
        assert_eq!(entries[1], ("webm".to_string(), "video/webm".to_string()));
    }

    #[test]
    fn test_parse_media_types_empty() {
        assert!(parse_media_types("").unwrap().is_empty());
        assert!(parse_media_types(" , ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_media_types_missing_separator() {
        assert!(parse_media_types("svg").is_err());
        assert!(parse_media_types("svg=image/svg+xml,webm").is_err());
    }
}
