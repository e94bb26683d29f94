//! Login and logout handlers.
//!
//! ```text
//! POST /api/user/login  {"device_id":"..."}
//! POST /api/user/logout {"device_id":"..."}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::LoginOutcome;
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{AccountDto, ActivatedCodeDto};
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::require_device_id;

/// Request body for login and logout.
#[derive(Debug, Deserialize, ToSchema)]
pub struct DeviceRequest {
    /// Client-supplied installation identifier.
    pub device_id: Option<String>,
}

/// Login response payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginData {
    /// Current point balance.
    pub points: i32,
    /// Whether the device displays as activated.
    pub is_activated: bool,
    /// Visible accounts, newest first.
    pub accounts: Vec<AccountDto>,
    /// Most recent redemption marker; explicit `null` when absent.
    pub activated_code: Option<ActivatedCodeDto>,
}

impl From<LoginOutcome> for LoginData {
    fn from(outcome: LoginOutcome) -> Self {
        let activated_code = ActivatedCodeDto::from_user(&outcome.user);
        Self {
            points: outcome.user.points,
            is_activated: outcome.user.is_activated(),
            accounts: outcome.accounts.into_iter().map(AccountDto::from).collect(),
            activated_code,
        }
    }
}

/// Resolve a device to its user record, creating one on first contact.
#[utoipa::path(
    post,
    path = "/api/user/login",
    request_body = DeviceRequest,
    responses(
        (status = 200, description = "Envelope carrying login data or a handled failure", body = Envelope)
    ),
    tags = ["user"],
    operation_id = "login"
)]
#[post("/api/user/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<DeviceRequest>,
) -> ApiResult<HttpResponse> {
    let device_id = require_device_id(payload.into_inner().device_id)?;
    let outcome = state.identity.login(&device_id).await?;
    Ok(Envelope::ok(LoginData::from(outcome)))
}

/// Clear the device's activation display marker.
///
/// Points and allocated accounts survive logout; only the marker resets.
#[utoipa::path(
    post,
    path = "/api/user/logout",
    request_body = DeviceRequest,
    responses(
        (status = 200, description = "Confirmation envelope", body = Envelope)
    ),
    tags = ["user"],
    operation_id = "logout"
)]
#[post("/api/user/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    payload: web::Json<DeviceRequest>,
) -> ApiResult<HttpResponse> {
    let device_id = require_device_id(payload.into_inner().device_id)?;
    state.identity.logout(&device_id).await?;
    Ok(Envelope::ok_message("logged out"))
}
