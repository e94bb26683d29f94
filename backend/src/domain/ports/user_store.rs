//! Port abstraction for user identity persistence.

use async_trait::async_trait;

use crate::domain::{DeviceId, User};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by the user store adapter.
    pub enum UserStoreError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "user store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user store query failed: {message}",
    }
}

/// Port for resolving device identities to user records.
///
/// `resolve_or_create` must be idempotent under concurrency: the unique key
/// on the device identifier is the guarantee, not a read-then-insert race.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up the user for a device, creating a zero-balance record on
    /// first contact.
    async fn resolve_or_create(&self, device_id: &DeviceId) -> Result<User, UserStoreError>;

    /// Look up the user for a device without creating one.
    async fn find_by_device_id(
        &self,
        device_id: &DeviceId,
    ) -> Result<Option<User>, UserStoreError>;

    /// Clear the activated-code marker and its expiry.
    ///
    /// Returns whether a user record was touched, so callers can tell the
    /// idempotent no-op apart from a real clear.
    async fn clear_activation(&self, device_id: &DeviceId) -> Result<bool, UserStoreError>;
}
