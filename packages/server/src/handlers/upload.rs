use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::state::AppState;

/// Request a one-time direct-upload URL from Cloudflare Images.
///
/// The client uploads the image straight to Cloudflare and stores only the
/// resulting URL string on the article or ingredient link; this server never
/// proxies image bytes.
#[utoipa::path(
    post,
    path = "/url",
    tag = "Uploads",
    operation_id = "requestUploadUrl",
    summary = "Issue a one-time image upload URL",
    responses(
        (status = 200, description = "Upload URL issued (Cloudflare `result` payload)"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 500, description = "Issuance failed (INTERNAL_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn request_upload_url(
    _auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let images = &state.config.images;
    if images.cf_account_id.is_empty() || images.cf_api_token.is_empty() {
        return Err(AppError::Internal(
            "Cloudflare Images credentials are not configured".into(),
        ));
    }

    let url = format!(
        "https://api.cloudflare.com/client/v4/accounts/{}/images/v2/direct_upload",
        images.cf_account_id
    );

    let response = state
        .http
        .post(url)
        .bearer_auth(&images.cf_api_token)
        .send()
        .await
        .map_err(|e| AppError::Internal(format!("Upload URL request failed: {e}")))?;

    if !response.status().is_success() {
        return Err(AppError::Internal(format!(
            "Upload URL issuance returned {}",
            response.status()
        )));
    }

    let body: serde_json::Value = response
        .json()
        .await
        .map_err(|e| AppError::Internal(format!("Upload URL response was not JSON: {e}")))?;

    let result = body
        .get("result")
        .cloned()
        .ok_or_else(|| AppError::Internal("Upload URL response had no result field".into()))?;

    Ok(Json(result))
}
