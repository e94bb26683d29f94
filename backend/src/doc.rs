//! OpenAPI documentation configuration.
//!
//! Registers every gateway endpoint and the payload schemas they carry.
//! Swagger UI serves the generated document in debug builds.

use utoipa::OpenApi;

/// OpenAPI document for the ledger gateway.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Points ledger backend API",
        description = "Device login, activation-code redemption, and point-for-account exchange."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::activation::redeem,
        crate::inbound::http::exchange::exchange_google,
        crate::inbound::http::exchange::exchange_github,
        crate::inbound::http::exchange::google_token,
        crate::inbound::http::exchange::github_token,
        crate::inbound::http::accounts::hide_account,
        crate::inbound::http::announcement::announcement,
        crate::inbound::http::admin::create_code,
        crate::inbound::http::admin::stats,
        crate::inbound::http::health::service_info,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        crate::inbound::http::envelope::Envelope,
        crate::inbound::http::dto::AccountDto,
        crate::inbound::http::dto::ActivatedCodeDto,
        crate::inbound::http::users::DeviceRequest,
        crate::inbound::http::users::LoginData,
        crate::inbound::http::activation::RedeemRequest,
        crate::inbound::http::activation::RedeemData,
        crate::inbound::http::exchange::TokenRequest,
        crate::inbound::http::exchange::ExchangeData,
        crate::inbound::http::announcement::AnnouncementData,
        crate::inbound::http::admin::CreateCodeRequest,
        crate::inbound::http::admin::CreateCodeData,
        crate::inbound::http::admin::StatsData,
        crate::inbound::http::health::ServiceInfo,
        crate::domain::account::AccountSource,
        crate::domain::account::CredentialBundle,
    ))
)]
pub struct ApiDoc;
