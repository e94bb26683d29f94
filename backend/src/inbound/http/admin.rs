//! Administrative handlers: code minting and ledger counts.
//!
//! ```text
//! POST /admin/create-code {"code":"...","points":500,"expire_days":30,"admin_token":"..."}
//! GET  /admin/stats?admin_token=...
//! ```
//!
//! Every call authenticates against the configured admin token before
//! touching the ledger.

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::{IntoParams, ToSchema};

use crate::domain::Error;
use crate::domain::ports::{LedgerStats, MintCodeRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::state::HttpState;

/// Request body for code minting.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCodeRequest {
    /// The code string to mint.
    pub code: Option<String>,
    /// Points the code will credit.
    pub points: Option<i32>,
    /// Validity window in days from now.
    pub expire_days: Option<i64>,
    /// Shared administrative secret.
    pub admin_token: Option<String>,
}

/// Query parameters for the stats endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub struct StatsQuery {
    /// Shared administrative secret.
    pub admin_token: Option<String>,
}

/// Minted-code response payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateCodeData {
    /// The minted code string.
    pub code: String,
    /// Points the code credits on redemption.
    pub points: i32,
    /// End of the validity window.
    pub expire_at: DateTime<Utc>,
}

/// Ledger count response payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatsData {
    /// Registered users.
    pub total_users: i64,
    /// Visible allocated accounts.
    pub total_accounts: i64,
    /// Codes still waiting to be redeemed.
    pub unused_codes: i64,
}

impl From<LedgerStats> for StatsData {
    fn from(value: LedgerStats) -> Self {
        Self {
            total_users: value.total_users,
            total_accounts: value.total_accounts,
            unused_codes: value.unused_codes,
        }
    }
}

fn require_admin(state: &HttpState, provided: Option<&str>) -> Result<(), Error> {
    let Some(expected) = state.gateway.admin_token.as_deref() else {
        warn!("administrative call refused: no admin token configured");
        return Err(Error::unauthorized());
    };
    match provided {
        Some(token) if token == expected => Ok(()),
        _ => {
            warn!("administrative call refused: token mismatch");
            Err(Error::unauthorized())
        }
    }
}

/// Mint a one-time activation code.
#[utoipa::path(
    post,
    path = "/admin/create-code",
    request_body = CreateCodeRequest,
    responses(
        (status = 200, description = "Envelope carrying the minted code or a handled failure", body = Envelope)
    ),
    tags = ["admin"],
    operation_id = "createCode"
)]
#[post("/admin/create-code")]
pub async fn create_code(
    state: web::Data<HttpState>,
    payload: web::Json<CreateCodeRequest>,
) -> ApiResult<HttpResponse> {
    let CreateCodeRequest {
        code,
        points,
        expire_days,
        admin_token,
    } = payload.into_inner();
    require_admin(&state, admin_token.as_deref())?;

    let code = code.ok_or_else(|| Error::invalid_input("code is required"))?;
    let points = points.ok_or_else(|| Error::invalid_input("points is required"))?;
    let expire_days =
        expire_days.ok_or_else(|| Error::invalid_input("expire_days is required"))?;

    let minted = state
        .admin
        .mint_code(MintCodeRequest {
            code,
            points,
            expire_days,
        })
        .await?;

    Ok(Envelope::ok(CreateCodeData {
        code: minted.code,
        points: minted.points,
        expire_at: minted.expires_at,
    }))
}

/// Read ledger volume counts.
#[utoipa::path(
    get,
    path = "/admin/stats",
    params(StatsQuery),
    responses(
        (status = 200, description = "Envelope carrying the counts or a handled failure", body = Envelope)
    ),
    tags = ["admin"],
    operation_id = "ledgerStats"
)]
#[get("/admin/stats")]
pub async fn stats(
    state: web::Data<HttpState>,
    query: web::Query<StatsQuery>,
) -> ApiResult<HttpResponse> {
    require_admin(&state, query.admin_token.as_deref())?;
    let stats = state.admin.stats().await?;
    Ok(Envelope::ok(StatsData::from(stats)))
}
