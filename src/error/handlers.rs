//! Error handlers
//!
//! Converts errors into HTTP status codes and response bodies.

use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use log::{error, warn};

use crate::error::types::{IdentityError, ObjectError, ServerError};

const BASIC_CHALLENGE: &str = "Basic realm=\"images\"";

/// Handle a server error
pub fn handle_error(err: &ServerError) {
    match status_for(err) {
        status if status.is_server_error() => error!("Image server error: {}", err),
        _ => warn!("Request rejected: {}", err),
    }
}

/// Convert error to HTTP status code
pub fn status_for(err: &ServerError) -> StatusCode {
    match err {
        ServerError::Identity(e) => identity_status(e),
        ServerError::Object(e) => object_status(e),
        ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
        ServerError::Config(_) | ServerError::IoError(_) | ServerError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn identity_status(err: &IdentityError) -> StatusCode {
    match err {
        IdentityError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        // Unknown users authenticate like wrong passwords
        IdentityError::NotFound(_) | IdentityError::Unauthenticated => StatusCode::UNAUTHORIZED,
        IdentityError::AlreadyExists(_) => StatusCode::BAD_REQUEST,
        IdentityError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn object_status(err: &ObjectError) -> StatusCode {
    match err {
        ObjectError::InvalidName(_)
        | ObjectError::InvalidExtension(_)
        | ObjectError::AlreadyExists(_) => StatusCode::BAD_REQUEST,
        ObjectError::NotFound(_) => StatusCode::NOT_FOUND,
        ObjectError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Client-facing text for an error.
///
/// I/O details stay in the log.
pub fn public_message(err: &ServerError) -> String {
    match err {
        ServerError::Identity(IdentityError::NotFound(_))
        | ServerError::Identity(IdentityError::Unauthenticated) => {
            "Invalid username or password".to_string()
        }
        ServerError::Object(ObjectError::NotFound(_)) => "Image not found".to_string(),
        ServerError::Object(ObjectError::AlreadyExists(_)) => {
            "Image already exists, to overwrite send a overwrite=true as parameter".to_string()
        }
        ServerError::Identity(IdentityError::Io { .. })
        | ServerError::Object(ObjectError::Io { .. })
        | ServerError::IoError(_)
        | ServerError::Config(_)
        | ServerError::Internal(_) => "Internal server error".to_string(),
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        handle_error(&self);
        let status = status_for(&self);
        let body = Json(public_message(&self));
        if status == StatusCode::UNAUTHORIZED {
            (status, [(header::WWW_AUTHENTICATE, BASIC_CHALLENGE)], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}
