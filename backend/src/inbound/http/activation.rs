//! Activation-code redemption handler.
//!
//! ```text
//! POST /api/activate {"device_id":"...","code":"..."}
//! ```

use actix_web::{HttpResponse, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::RedeemOutcome;
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::AccountDto;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{require_code, require_device_id};

/// Request body for code redemption.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RedeemRequest {
    /// Client-supplied installation identifier.
    pub device_id: Option<String>,
    /// The one-time code to redeem.
    pub code: Option<String>,
}

/// Redemption response payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct RedeemData {
    /// Balance after the credit.
    pub current_points: i32,
    /// Expiry of the redeemed code.
    pub expire_at: DateTime<Utc>,
    /// Visible accounts, newest first.
    pub accounts: Vec<AccountDto>,
}

impl From<RedeemOutcome> for RedeemData {
    fn from(outcome: RedeemOutcome) -> Self {
        Self {
            current_points: outcome.current_points,
            expire_at: outcome.expires_at,
            accounts: outcome.accounts.into_iter().map(AccountDto::from).collect(),
        }
    }
}

/// Redeem a one-time code, crediting its points to the device's balance.
#[utoipa::path(
    post,
    path = "/api/activate",
    request_body = RedeemRequest,
    responses(
        (status = 200, description = "Envelope carrying the updated balance or a handled failure", body = Envelope)
    ),
    tags = ["activation"],
    operation_id = "redeemCode"
)]
#[post("/api/activate")]
pub async fn redeem(
    state: web::Data<HttpState>,
    payload: web::Json<RedeemRequest>,
) -> ApiResult<HttpResponse> {
    let RedeemRequest { device_id, code } = payload.into_inner();
    let device_id = require_device_id(device_id)?;
    let code = require_code(code)?;
    let outcome = state.redemption.redeem(&device_id, &code).await?;
    Ok(Envelope::ok(RedeemData::from(outcome)))
}
