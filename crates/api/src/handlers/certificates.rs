//! Handlers for saved certificates.

use axum::extract::{Query, State};
use axum::Json;
use certgen_db::models::certificate::CertificateRecord;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::{AuthUser, BearerToken};
use crate::response::{CertificateResponse, DataResponse};
use crate::state::AppState;

/// Query parameters for `GET /api/get-certificate`.
#[derive(Debug, Deserialize)]
pub struct FetchCertificateParams {
    pub id: Option<String>,
}

/// GET /api/get-certificate?id=<uuid>
///
/// Fetch one certificate owned by the caller. Answers 401 without a valid
/// bearer token, 400 without `id`, 404 when no owned record matches.
pub async fn get_certificate(
    State(state): State<AppState>,
    token: BearerToken,
    Query(params): Query<FetchCertificateParams>,
) -> AppResult<Json<CertificateResponse>> {
    let certificate = state
        .records
        .fetch_certificate(token.as_deref(), params.id.as_deref())
        .await?;

    Ok(Json(CertificateResponse { certificate }))
}

/// GET /api/certificates
///
/// List the caller's certificates, newest first.
pub async fn list_certificates(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CertificateRecord>>>> {
    let certificates = state.records.list_certificates(user.user_id).await?;
    Ok(Json(DataResponse { data: certificates }))
}
