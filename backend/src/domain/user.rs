//! User aggregate: the per-device point balance and activation marker.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::device::DeviceId;

/// A device's ledger record.
///
/// Created on first contact and never deleted. `points` is kept non-negative
/// by the store (conditional debits); `activated_code` is a display marker
/// that tracks only the most recent redemption, while every redemption's
/// points accumulate in the balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Stable identifier.
    pub id: Uuid,
    /// Unique correlation key supplied by the client.
    pub device_id: DeviceId,
    /// Current point balance.
    pub points: i32,
    /// Most recently redeemed activation code, if any.
    pub activated_code: Option<String>,
    /// Expiry of the most recently redeemed code.
    pub activation_expires_at: Option<DateTime<Utc>>,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether the device counts as activated for display purposes.
    pub fn is_activated(&self) -> bool {
        self.points > 0 || self.activated_code.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(points: i32, activated_code: Option<&str>) -> User {
        User {
            id: Uuid::new_v4(),
            device_id: DeviceId::new("d1").expect("valid device id"),
            points,
            activated_code: activated_code.map(str::to_owned),
            activation_expires_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn fresh_users_are_not_activated() {
        assert!(!user(0, None).is_activated());
    }

    #[test]
    fn points_or_marker_count_as_activated() {
        assert!(user(50, None).is_activated());
        // A fully spent balance still displays as activated while the marker lasts.
        assert!(user(0, Some("X1")).is_activated());
    }
}
