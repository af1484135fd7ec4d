//! Route handlers
//!
//! Each handler authenticates through [`Authenticated`], moves the
//! filesystem work onto a blocking thread and maps the outcome onto the
//! status codes clients rely on.

use axum::Json;
use axum::extract::{Multipart, Path, Query};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use log::warn;
use serde::Deserialize;

use crate::error::{ObjectError, ServerError};
use crate::server::extract::{Authenticated, parse_overwrite, read_image_field, run_blocking};
use crate::service::{Download, ImageListing};
use crate::storage::is_addressable_name;

const MISSING_IMAGE: &str = "Image not given, set the field name to image";

#[derive(Debug, Deserialize)]
pub struct UploadParams {
    pub overwrite: Option<String>,
}

/// `GET /images`
pub async fn list_images(
    Authenticated(service): Authenticated,
) -> Result<Json<ImageListing>, ServerError> {
    let listing = run_blocking(move || Ok(service.list()?)).await?;
    Ok(Json(listing))
}

/// `POST /images[?overwrite=true]`
pub async fn upload_image(
    Authenticated(service): Authenticated,
    Query(params): Query<UploadParams>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<&'static str>), ServerError> {
    let Some(image) = read_image_field(&mut multipart).await? else {
        return Err(ServerError::BadRequest(MISSING_IMAGE.into()));
    };
    let overwrite = parse_overwrite(params.overwrite.as_deref())?;

    run_blocking(move || {
        service
            .upload(&image.file_name, &image.content, overwrite)
            .map_err(|e| match e {
                ObjectError::InvalidExtension(_) => ServerError::BadRequest(format!(
                    "Give a valid image file {{ {} }}",
                    service.allowed_extensions().join(", ")
                )),
                other => ServerError::from(other),
            })
    })
    .await?;

    Ok((StatusCode::CREATED, Json("Image successfully uploaded")))
}

/// `GET /image/{file_name}`
pub async fn fetch_image(
    Authenticated(service): Authenticated,
    Path(file_name): Path<String>,
) -> Result<Response, ServerError> {
    ensure_addressable(&file_name)?;

    let download = run_blocking(move || {
        service.download(&file_name).map_err(|e| match e {
            ObjectError::Io { context, source } => {
                warn!("Failed to fetch image ({}): {}", context, source);
                ServerError::BadRequest("Failed to fetch image".into())
            }
            other => ServerError::from(other),
        })
    })
    .await?;

    Ok(image_response(download))
}

/// `PATCH /image/{file_name}`
pub async fn modify_image(
    Authenticated(service): Authenticated,
    Path(file_name): Path<String>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<&'static str>), ServerError> {
    ensure_addressable(&file_name)?;

    let probe = service.clone();
    let name = file_name.clone();
    if !run_blocking(move || Ok(probe.contains(&name))).await? {
        return Err(ObjectError::NotFound(file_name).into());
    }

    let Some(image) = read_image_field(&mut multipart).await? else {
        return Err(ServerError::BadRequest(MISSING_IMAGE.into()));
    };

    run_blocking(move || Ok(service.replace(&file_name, &image.content)?)).await?;
    Ok((StatusCode::CREATED, Json("Image successfully modified")))
}

/// `DELETE /image/{file_name}`
pub async fn delete_image(
    Authenticated(service): Authenticated,
    Path(file_name): Path<String>,
) -> Result<Json<&'static str>, ServerError> {
    ensure_addressable(&file_name)?;

    run_blocking(move || Ok(service.delete(&file_name)?)).await?;
    Ok(Json("Image successfully deleted"))
}

/// Names outside `[A-Za-z0-9_.]+` have no route.
fn ensure_addressable(file_name: &str) -> Result<(), ServerError> {
    if is_addressable_name(file_name) {
        Ok(())
    } else {
        Err(ObjectError::NotFound(file_name.to_string()).into())
    }
}

fn image_response(download: Download) -> Response {
    let disposition = download.content_disposition();
    (
        [
            (header::CONTENT_TYPE, Download::CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        download.content,
    )
        .into_response()
}
