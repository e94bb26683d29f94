//! Account hiding handler.
//!
//! ```text
//! POST /api/account/hide {"device_id":"...","account_id":"..."}
//! ```

use actix_web::{HttpResponse, post, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::exchange::TokenRequest;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{require_account_id, require_device_id};

/// Remove an account from the caller's visible list.
///
/// Soft delete: the record survives for audit and token reads by id keep
/// working. Hiding an account the caller does not own is a silent no-op.
#[utoipa::path(
    post,
    path = "/api/account/hide",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Confirmation envelope", body = Envelope)
    ),
    tags = ["account"],
    operation_id = "hideAccount"
)]
#[post("/api/account/hide")]
pub async fn hide_account(
    state: web::Data<HttpState>,
    payload: web::Json<TokenRequest>,
) -> ApiResult<HttpResponse> {
    let TokenRequest {
        device_id,
        account_id,
    } = payload.into_inner();
    let device_id = require_device_id(device_id)?;
    let account_id = require_account_id(account_id)?;
    state.accounts.hide(&device_id, account_id).await?;
    Ok(Envelope::ok_message("account removed"))
}
