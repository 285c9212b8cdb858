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

//! API error types and responses.
//!
//! Maps domain errors to HTTP status codes. Download misses answer with an
//! empty body; every other error carries a small JSON document. All error
//! responses get a generated `x-request-id` header for log correlation.

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use depot_core::StorageError;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// API errors.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No stored file with the requested name.
    #[error("File not found: {filename}")]
    NotFound {
        /// Filename that was not found.
        filename: String,
    },

    /// The multipart request carried no usable `file` field.
    #[error("Multipart field 'file' is missing or has no filename")]
    MissingFile,

    /// The multipart body could not be read.
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    /// The delegated redirect location is not a legal header value.
    #[error("Redirect location is not a valid header value: {location:?}")]
    InvalidRedirect {
        /// Location that could not be carried in a header.
        location: String,
    },

    /// Storage layer failure.
    #[error("Storage error: {0}")]
    Storage(StorageError),
}

impl ApiError {
    /// Returns the machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "NotFound",
            ApiError::MissingFile => "MissingFile",
            ApiError::InvalidUpload(_) => "InvalidUpload",
            ApiError::InvalidRedirect { .. } => "InvalidRedirect",
            ApiError::Storage(_) => "InternalError",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::MissingFile => StatusCode::BAD_REQUEST,
            ApiError::InvalidUpload(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidRedirect { .. } => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { filename } => ApiError::NotFound { filename },
            other => ApiError::Storage(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();

        let mut builder = Response::builder()
            .status(self.status_code())
            .header("x-request-id", request_id);

        let body = if matches!(self, ApiError::NotFound { .. }) {
            Body::empty()
        } else {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            let doc = json!({
                "error": self.code(),
                "message": self.to_string(),
            });
            Body::from(doc.to_string())
        };

        builder.body(body).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let not_found = ApiError::NotFound {
            filename: "a.txt".to_string(),
        };
        assert_eq!(not_found.code(), "NotFound");
        assert_eq!(ApiError::MissingFile.code(), "MissingFile");
        assert_eq!(
            ApiError::InvalidUpload("bad boundary".to_string()).code(),
            "InvalidUpload"
        );
        let redirect = ApiError::InvalidRedirect {
            location: "/ngdownload/\u{1}".to_string(),
        };
        assert_eq!(redirect.code(), "InvalidRedirect");
        assert_eq!(redirect.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_status_codes() {
        let not_found = ApiError::NotFound {
            filename: "a.txt".to_string(),
        };
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::MissingFile.status_code(), StatusCode::BAD_REQUEST);
        let io = StorageError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        assert_eq!(
            ApiError::Storage(io).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_storage_not_found_maps_to_api_not_found() {
        let err = StorageError::NotFound {
            filename: "gone.bin".to_string(),
        };
        match ApiError::from(err) {
            ApiError::NotFound { filename } => assert_eq!(filename, "gone.bin"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_storage_io_maps_to_internal() {
        let err = StorageError::Io(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert!(matches!(ApiError::from(err), ApiError::Storage(_)));
    }
}
