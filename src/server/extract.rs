//! Request extraction
//!
//! Shared state, authentication of incoming requests, and decoding of the
//! `overwrite` flag and the multipart `image` field.

use axum::async_trait;
use axum::extract::{FromRequestParts, Multipart};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use std::sync::Arc;

use crate::auth::{AuthenticationGate, parse_basic_authorization};
use crate::config::StoreConfig;
use crate::error::{IdentityError, ServerError};
use crate::service::ObjectService;

/// Multipart field carrying the image
pub const IMAGE_FIELD: &str = "image";

/// State shared by every request
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<StoreConfig>,
    pub gate: Arc<dyn AuthenticationGate>,
}

impl AppState {
    pub fn new(config: StoreConfig, gate: Arc<dyn AuthenticationGate>) -> Self {
        Self {
            config: Arc::new(config),
            gate,
        }
    }
}

/// Run blocking filesystem work off the async executor.
pub async fn run_blocking<F, T>(work: F) -> Result<T, ServerError>
where
    F: FnOnce() -> Result<T, ServerError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ServerError::Internal(format!("blocking task failed: {e}")))?
}

/// An authenticated request, carrying the object service of its user
pub struct Authenticated(pub ObjectService);

#[async_trait]
impl FromRequestParts<AppState> for Authenticated {
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let credentials = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_basic_authorization)
            .ok_or(ServerError::Identity(IdentityError::Unauthenticated))?;

        let gate = Arc::clone(&state.gate);
        let handle = run_blocking(move || Ok(gate.authenticate(&credentials)?)).await?;
        Ok(Authenticated(ObjectService::new(&handle, &state.config)))
    }
}

/// Parse the `overwrite` query flag: `true`/`false`, any case, default false.
pub fn parse_overwrite(value: Option<&str>) -> Result<bool, ServerError> {
    match value {
        None => Ok(false),
        Some(v) if v.eq_ignore_ascii_case("true") => Ok(true),
        Some(v) if v.eq_ignore_ascii_case("false") => Ok(false),
        Some(v) => Err(ServerError::BadRequest(format!(
            "overwrite must be true or false, got {v:?}"
        ))),
    }
}

/// An uploaded image: client-supplied file name and raw bytes
#[derive(Debug)]
pub struct ImageField {
    pub file_name: String,
    pub content: Vec<u8>,
}

/// Pull the `image` field out of a multipart body.
///
/// Returns `Ok(None)` if the body has no such field. Any directory part of
/// the client's file name is dropped.
pub async fn read_image_field(multipart: &mut Multipart) -> Result<Option<ImageField>, ServerError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let file_name = field
            .file_name()
            .and_then(|name| name.rsplit(['/', '\\']).next())
            .unwrap_or_default()
            .to_string();
        let content = field
            .bytes()
            .await
            .map_err(|e| ServerError::BadRequest(format!("failed to read image: {e}")))?;

        return Ok(Some(ImageField {
            file_name,
            content: content.to_vec(),
        }));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrite_flag_parsing() {
        assert!(!parse_overwrite(None).unwrap());
        assert!(parse_overwrite(Some("true")).unwrap());
        assert!(parse_overwrite(Some("TRUE")).unwrap());
        assert!(!parse_overwrite(Some("False")).unwrap());
        assert!(matches!(
            parse_overwrite(Some("yes")),
            Err(ServerError::BadRequest(_))
        ));
        assert!(parse_overwrite(Some("")).is_err());
    }
}
