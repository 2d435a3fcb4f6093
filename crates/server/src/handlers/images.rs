//! Image endpoint (read path).

use crate::error::ApiResult;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};

/// GET /image/{image_filename}
///
/// Serves stored image bytes. A name without the `.jpg` suffix is rejected
/// before any filesystem access; a missing image is answered with the
/// `default.jpg` sentinel.
pub async fn get_image(
    State(state): State<AppState>,
    Path(image_filename): Path<String>,
) -> ApiResult<Response> {
    let data = state.service.fetch_image(&image_filename).await?;
    Ok(([(CONTENT_TYPE, "image/jpeg")], data).into_response())
}
