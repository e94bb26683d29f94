//! Exchange and credential-read handlers, one pair per account source.
//!
//! ```text
//! POST /api/google/exchange {"device_id":"..."}
//! POST /api/github/exchange {"device_id":"..."}
//! POST /api/google/token    {"device_id":"...","account_id":"..."}
//! POST /api/github/token    {"device_id":"...","account_id":"..."}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::ExchangeOutcome;
use crate::domain::{AccountSource, CredentialBundle};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::DeviceRequest;
use crate::inbound::http::validation::{require_account_id, require_device_id};

/// Request body for credential reads.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TokenRequest {
    /// Client-supplied installation identifier.
    pub device_id: Option<String>,
    /// The owned account to read.
    pub account_id: Option<String>,
}

/// Exchange response payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct ExchangeData {
    /// Identifier of the freshly allocated account.
    pub account_id: Uuid,
    /// The allocated credential bundle's fields, flattened.
    #[serde(flatten)]
    pub credentials: CredentialBundle,
    /// Balance left after the debit.
    pub remaining_points: i32,
}

impl From<ExchangeOutcome> for ExchangeData {
    fn from(outcome: ExchangeOutcome) -> Self {
        Self {
            account_id: outcome.account.id,
            credentials: outcome.account.credentials,
            remaining_points: outcome.remaining_points,
        }
    }
}

async fn exchange_for(
    state: &HttpState,
    payload: DeviceRequest,
    source: AccountSource,
) -> ApiResult<HttpResponse> {
    let device_id = require_device_id(payload.device_id)?;
    let outcome = state.exchange.exchange(&device_id, source).await?;
    Ok(Envelope::ok(ExchangeData::from(outcome)))
}

async fn token_for(
    state: &HttpState,
    payload: TokenRequest,
    source: AccountSource,
) -> ApiResult<HttpResponse> {
    let device_id = require_device_id(payload.device_id)?;
    let account_id = require_account_id(payload.account_id)?;
    let account = state
        .accounts
        .credentials(&device_id, account_id, Some(source))
        .await?;
    Ok(Envelope::ok(account.credentials))
}

/// Spend points for a Google pool account.
#[utoipa::path(
    post,
    path = "/api/google/exchange",
    request_body = DeviceRequest,
    responses(
        (status = 200, description = "Envelope carrying the allocated account or a handled failure", body = Envelope)
    ),
    tags = ["exchange"],
    operation_id = "exchangeGoogle"
)]
#[post("/api/google/exchange")]
pub async fn exchange_google(
    state: web::Data<HttpState>,
    payload: web::Json<DeviceRequest>,
) -> ApiResult<HttpResponse> {
    exchange_for(&state, payload.into_inner(), AccountSource::Google).await
}

/// Spend points for a GitHub pool account.
#[utoipa::path(
    post,
    path = "/api/github/exchange",
    request_body = DeviceRequest,
    responses(
        (status = 200, description = "Envelope carrying the allocated account or a handled failure", body = Envelope)
    ),
    tags = ["exchange"],
    operation_id = "exchangeGithub"
)]
#[post("/api/github/exchange")]
pub async fn exchange_github(
    state: web::Data<HttpState>,
    payload: web::Json<DeviceRequest>,
) -> ApiResult<HttpResponse> {
    exchange_for(&state, payload.into_inner(), AccountSource::Github).await
}

/// Read the credential bundle of an owned Google account.
#[utoipa::path(
    post,
    path = "/api/google/token",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Envelope carrying the credential bundle or a handled failure", body = Envelope)
    ),
    tags = ["exchange"],
    operation_id = "googleToken"
)]
#[post("/api/google/token")]
pub async fn google_token(
    state: web::Data<HttpState>,
    payload: web::Json<TokenRequest>,
) -> ApiResult<HttpResponse> {
    token_for(&state, payload.into_inner(), AccountSource::Google).await
}

/// Read the credential bundle of an owned GitHub account.
#[utoipa::path(
    post,
    path = "/api/github/token",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Envelope carrying the credential bundle or a handled failure", body = Envelope)
    ),
    tags = ["exchange"],
    operation_id = "githubToken"
)]
#[post("/api/github/token")]
pub async fn github_token(
    state: web::Data<HttpState>,
    payload: web::Json<TokenRequest>,
) -> ApiResult<HttpResponse> {
    token_for(&state, payload.into_inner(), AccountSource::Github).await
}
