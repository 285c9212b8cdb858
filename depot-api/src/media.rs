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

//! Extension to media type resolution.
//!
//! A fixed table maps filename extensions to the literal `Content-Type`
//! value the media-aware download endpoints respond with. Lookup is a
//! case-sensitive exact match on the extension; anything unmapped falls
//! back to `application/octet-stream`. The table is built once at startup
//! and shared read-only afterwards.

use std::collections::HashMap;

/// Fallback media type for unmapped or missing extensions.
pub const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";

/// Extension to media type table.
///
/// Ships with four built-in entries:
///
/// | extension | media type |
/// |---|---|
/// | `mp4` | `video/mp4` |
/// | `jpeg` | `image/jpeg` |
/// | `jpg` | `jpg` |
/// | `png` | `image/png` |
///
/// The `jpg` entry is not a valid MIME string. It is kept as-is for
/// compatibility: existing clients observe that literal header value.
#[derive(Debug, Clone)]
pub struct MediaTypeMap {
    entries: HashMap<String, String>,
}

impl MediaTypeMap {
    /// Creates the table with the built-in entries.
    pub fn new() -> Self {
        let mut entries = HashMap::new();
        entries.insert("mp4".to_string(), "video/mp4".to_string());
        entries.insert("jpeg".to_string(), "image/jpeg".to_string());
        entries.insert("jpg".to_string(), "jpg".to_string());
        entries.insert("png".to_string(), "image/png".to_string());
        Self { entries }
    }

    /// Adds or replaces an entry. Intended for startup-time configuration,
    /// before the table is shared.
    pub fn insert(&mut self, extension: impl Into<String>, media_type: impl Into<String>) {
        self.entries.insert(extension.into(), media_type.into());
    }

    /// Resolves the media type for a filename.
    ///
    /// The extension is the substring after the last `.`. Filenames with
    /// no `.` at all, and extensions absent from the table, resolve to
    /// `application/octet-stream`.
    pub fn resolve(&self, filename: &str) -> &str {
        match extension(filename) {
            Some(ext) => self
                .entries
                .get(ext)
                .map(String::as_str)
                .unwrap_or(APPLICATION_OCTET_STREAM),
            None => APPLICATION_OCTET_STREAM,
        }
    }
}

impl Default for MediaTypeMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts the extension as the substring after the last `.`.
fn extension(filename: &str) -> Option<&str> {
    filename.rsplit_once('.').map(|(_, ext)| ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_entries() {
        let map = MediaTypeMap::new();
        assert_eq!(map.resolve("clip.mp4"), "video/mp4");
        assert_eq!(map.resolve("photo.jpeg"), "image/jpeg");
        assert_eq!(map.resolve("logo.png"), "image/png");
    }

    #[test]
    fn test_jpg_entry_is_the_literal_string_jpg() {
        // Not image/jpeg. Clients observe this exact header value.
        let map = MediaTypeMap::new();
        assert_eq!(map.resolve("photo.jpg"), "jpg");
    }

    #[test]
    fn test_unmapped_extension_falls_back() {
        let map = MediaTypeMap::new();
        assert_eq!(map.resolve("notes.txt"), APPLICATION_OCTET_STREAM);
        assert_eq!(map.resolve("archive.zip"), APPLICATION_OCTET_STREAM);
    }

    #[test]
    fn test_no_extension_falls_back() {
        let map = MediaTypeMap::new();
        assert_eq!(map.resolve("README"), APPLICATION_OCTET_STREAM);
        assert_eq!(map.resolve(""), APPLICATION_OCTET_STREAM);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let map = MediaTypeMap::new();
        assert_eq!(map.resolve("CLIP.MP4"), APPLICATION_OCTET_STREAM);
    }

    #[test]
    fn test_last_dot_wins() {
        let map = MediaTypeMap::new();
        assert_eq!(map.resolve("backup.tar.png"), "image/png");
    }

    #[test]
    fn test_trailing_dot_falls_back() {
        let map = MediaTypeMap::new();
        assert_eq!(map.resolve("oddname."), APPLICATION_OCTET_STREAM);
    }

    #[test]
    fn test_insert_extends_table() {
        let mut map = MediaTypeMap::new();
        map.insert("svg", "image/svg+xml");
        assert_eq!(map.resolve("icon.svg"), "image/svg+xml");
    }
}
