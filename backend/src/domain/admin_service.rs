//! Administrative service: code minting and ledger counts.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use mockable::Clock;
use tracing::info;

use crate::domain::Error;
use crate::domain::ports::{
    AdminCommand, AdminStore, AdminStoreError, LedgerStats, MintCodeError, MintCodeRequest,
};

use super::{ActivationCode, ActivationCodeDraft};

fn map_admin_store_error(error: AdminStoreError) -> Error {
    match error {
        AdminStoreError::Connection { message } => Error::store_unavailable(message),
        AdminStoreError::Query { message } => Error::internal(message),
    }
}

/// Mints activation codes and reports ledger volume.
///
/// Token authentication happens at the boundary before any call reaches
/// this service.
#[derive(Clone)]
pub struct AdminService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> AdminService<S> {
    /// Create a new service over the admin store.
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}

#[async_trait]
impl<S> AdminCommand for AdminService<S>
where
    S: AdminStore,
{
    async fn mint_code(&self, request: MintCodeRequest) -> Result<ActivationCode, Error> {
        if request.expire_days <= 0 {
            return Err(Error::invalid_input("expire_days must be positive"));
        }

        let expires_at = self.clock.utc() + Duration::days(request.expire_days);
        let draft = ActivationCodeDraft::new(request.code, request.points, expires_at)
            .map_err(|err| Error::invalid_input(err.to_string()))?;

        let code = self
            .store
            .mint_code(&draft)
            .await
            .map_err(|error| match error {
                MintCodeError::DuplicateCode => {
                    Error::invalid_input("activation code already exists")
                }
                MintCodeError::Connection { message } => Error::store_unavailable(message),
                MintCodeError::Query { message } => Error::internal(message),
            })?;

        info!(
            code = %code.code,
            points = code.points,
            expires_at = %code.expires_at,
            "activation code minted"
        );

        Ok(code)
    }

    async fn stats(&self) -> Result<LedgerStats, Error> {
        self.store.stats().await.map_err(map_admin_store_error)
    }
}

#[cfg(test)]
#[path = "admin_service_tests.rs"]
mod tests;
