//! Announcement banner handler.

use actix_web::{HttpResponse, get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::state::HttpState;

/// Announcement response payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct AnnouncementData {
    /// The configured banner text.
    pub announcement: String,
}

/// Serve the configured announcement banner.
#[utoipa::path(
    get,
    path = "/api/announcement",
    responses(
        (status = 200, description = "Envelope carrying the banner", body = Envelope)
    ),
    tags = ["misc"],
    operation_id = "announcement"
)]
#[get("/api/announcement")]
pub async fn announcement(state: web::Data<HttpState>) -> HttpResponse {
    Envelope::ok(AnnouncementData {
        announcement: state.gateway.announcement.clone(),
    })
}
