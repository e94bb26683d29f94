//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend on
//! the driving ports only and stay testable without a database.

use std::sync::Arc;

use crate::domain::ports::{
    AccountsCommand, AdminCommand, ExchangeCommand, IdentityCommand, RedeemCommand,
};

/// Boundary configuration the gateway needs beyond the ports.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Shared secret every administrative call must present. `None` refuses
    /// all administrative calls.
    pub admin_token: Option<String>,
    /// Banner served by the announcement endpoint.
    pub announcement: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            admin_token: None,
            announcement: "100 points buys one account. Contact the administrator for \
                           activation codes."
                .to_owned(),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Login and logout.
    pub identity: Arc<dyn IdentityCommand>,
    /// Activation-code redemption.
    pub redemption: Arc<dyn RedeemCommand>,
    /// Point-for-account exchange.
    pub exchange: Arc<dyn ExchangeCommand>,
    /// Credential reads and hiding.
    pub accounts: Arc<dyn AccountsCommand>,
    /// Code minting and stats.
    pub admin: Arc<dyn AdminCommand>,
    /// Boundary configuration.
    pub gateway: GatewayConfig,
}
