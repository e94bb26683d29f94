//! Server construction and route wiring.

mod config;

pub use config::{AppConfig, ConfigError};

use std::sync::Arc;

use actix_web::{App, HttpResponse, HttpServer, web};
use mockable::DefaultClock;
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::{
    AccountService, ActivationService, AdminService, ExchangePricing, ExchangeService,
    IdentityService,
};
use crate::inbound::http::accounts::hide_account;
use crate::inbound::http::activation::redeem;
use crate::inbound::http::admin::{create_code, stats};
use crate::inbound::http::announcement::announcement;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::exchange::{
    exchange_github, exchange_google, github_token, google_token,
};
use crate::inbound::http::health::{HealthState, live, ready, service_info};
use crate::inbound::http::state::{GatewayConfig, HttpState};
use crate::inbound::http::users::{login, logout};
use crate::middleware::RequestTrace;
use crate::outbound::persistence::{
    DbPool, DieselAccountPool, DieselActivationLedger, DieselAdminStore, DieselExchangeStore,
    DieselUserStore, PoolConfig, run_pending_migrations,
};

/// Register every gateway route.
///
/// Kept separate from app construction so integration tests can mount the
/// same routes over stub ports.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(login)
        .service(logout)
        .service(redeem)
        .service(exchange_google)
        .service(exchange_github)
        .service(google_token)
        .service(github_token)
        .service(hide_account)
        .service(announcement)
        .service(create_code)
        .service(stats)
        .service(service_info)
        .service(ready)
        .service(live);
}

/// Envelope-shaped JSON body failures instead of framework 400s.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        actix_web::error::InternalError::from_response(
            err,
            Envelope::fail("request body is not valid JSON"),
        )
        .into()
    })
}

/// Envelope-shaped unknown-route handler.
pub async fn not_found() -> HttpResponse {
    Envelope::route_not_found()
}

/// Assemble the production port implementations over one connection pool.
pub fn build_http_state(pool: DbPool, config: &AppConfig) -> HttpState {
    let users = Arc::new(DieselUserStore::new(pool.clone()));
    let accounts = Arc::new(DieselAccountPool::new(pool.clone()));
    let ledger = Arc::new(DieselActivationLedger::new(pool.clone()));
    let exchange_store = Arc::new(DieselExchangeStore::new(pool.clone()));
    let admin_store = Arc::new(DieselAdminStore::new(pool));
    let clock: Arc<dyn mockable::Clock> = Arc::new(DefaultClock);

    let mut gateway = GatewayConfig {
        admin_token: config.admin_token.clone(),
        ..GatewayConfig::default()
    };
    if let Some(banner) = &config.announcement {
        gateway.announcement.clone_from(banner);
    }

    HttpState {
        identity: Arc::new(IdentityService::new(users.clone(), accounts.clone())),
        redemption: Arc::new(ActivationService::new(
            users.clone(),
            ledger,
            accounts.clone(),
            clock.clone(),
        )),
        exchange: Arc::new(ExchangeService::new(
            users.clone(),
            exchange_store,
            ExchangePricing::new(config.exchange_price),
            clock.clone(),
        )),
        accounts: Arc::new(AccountService::new(users, accounts)),
        admin: Arc::new(AdminService::new(admin_store, clock)),
        gateway,
    }
}

/// Bootstrap the store, mount the gateway, and serve until shutdown.
///
/// # Errors
/// Fails fatally when the store is unreachable at startup or the bind
/// address is taken; both mean there is nothing useful to serve.
pub async fn run(config: AppConfig) -> std::io::Result<()> {
    let pool = DbPool::new(PoolConfig::new(&config.database_url))
        .await
        .map_err(|err| std::io::Error::other(format!("database pool: {err}")))?;

    let database_url = config.database_url.clone();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&database_url))
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?
        .map_err(std::io::Error::other)?;
    info!(applied, "database schema ready");

    if config.admin_token.is_none() {
        tracing::warn!("ADMIN_TOKEN not set; administrative endpoints will refuse every call");
    }

    let state = web::Data::new(build_http_state(pool, &config));
    let health_state = web::Data::new(HealthState::new());
    let server_health_state = health_state.clone();

    let bind_addr = config.bind_addr;
    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(state.clone())
            .app_data(server_health_state.clone())
            .app_data(json_config())
            .wrap(RequestTrace)
            .configure(configure)
            .default_service(web::route().to(not_found));

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(bind_addr)?;

    info!(%bind_addr, "listening");
    health_state.mark_ready();
    server.run().await
}
