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

//! JSON echo diagnostic.
//!
//! Demonstrates per-field serialization visibility: `name` is write-only
//! (accepted on input, never serialized back) and `age` is read-only
//! (input ignored, the default is always serialized). The endpoint has no
//! other behavior.

use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Echo payload with asymmetric field visibility.
#[derive(Debug, Serialize, Deserialize)]
pub struct EchoPayload {
    /// Round-trips normally.
    #[serde(default = "default_id")]
    pub id: i64,
    /// Write-only: deserialized from the request, never serialized.
    #[serde(default = "default_name", skip_serializing)]
    pub name: String,
    /// Read-only: request value ignored, default always serialized.
    #[serde(default = "default_age", skip_deserializing)]
    pub age: String,
}

fn default_id() -> i64 {
    1
}

fn default_name() -> String {
    "张三".to_string()
}

fn default_age() -> String {
    "12".to_string()
}

impl Default for EchoPayload {
    fn default() -> Self {
        Self {
            id: default_id(),
            name: default_name(),
            age: default_age(),
        }
    }
}

/// Echoes the payload back through the visibility rules.
///
/// API: POST /as
///
/// # Returns
///
/// - 200 OK with the JSON payload, `name` omitted and `age` reset to its
///   default
pub async fn echo(Json(payload): Json<EchoPayload>) -> Json<EchoPayload> {
    info!("Echo: {:?}", payload);
    Json(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_accepted_but_never_serialized() {
        let payload: EchoPayload = serde_json::from_str(r#"{"id":7,"name":"Alice"}"#).unwrap();
        assert_eq!(payload.name, "Alice");

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("name").is_none());
        assert_eq!(json["id"], 7);
    }

    #[test]
    fn test_age_input_is_ignored() {
        let payload: EchoPayload = serde_json::from_str(r#"{"id":7,"age":"99"}"#).unwrap();
        assert_eq!(payload.age, "12");

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["age"], "12");
    }

    #[test]
    fn test_defaults_for_empty_input() {
        let payload: EchoPayload = serde_json::from_str("{}").unwrap();
        assert_eq!(payload.id, 1);
        assert_eq!(payload.name, "张三");
        assert_eq!(payload.age, "12");
    }
}
