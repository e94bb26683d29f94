//! Tests for the exchange service.

use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use mockable::Clock;
use uuid::Uuid;

use super::*;
use crate::domain::ports::{ExchangeReceipt, MockExchangeStore, MockUserStore};
use crate::domain::{Account, ErrorCode, User};

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn fixture_timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-06-01T12:00:00Z")
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

fn device() -> DeviceId {
    DeviceId::new("d1").expect("valid device id")
}

fn stored_user(points: i32) -> User {
    User {
        id: Uuid::new_v4(),
        device_id: device(),
        points,
        activated_code: None,
        activation_expires_at: None,
        created_at: fixture_timestamp(),
    }
}

fn service_with(
    users: MockUserStore,
    store: MockExchangeStore,
) -> ExchangeService<MockUserStore, MockExchangeStore> {
    ExchangeService::new(
        Arc::new(users),
        Arc::new(store),
        ExchangePricing::default(),
        Arc::new(FixtureClock {
            utc_now: fixture_timestamp(),
        }),
    )
}

#[tokio::test]
async fn exchange_debits_the_default_price_and_returns_the_receipt() {
    let user = stored_user(500);
    let user_id = user.id;

    let mut users = MockUserStore::new();
    users
        .expect_find_by_device_id()
        .times(1)
        .return_once(move |_| Ok(Some(user)));

    let mut store = MockExchangeStore::new();
    store
        .expect_debit_and_allocate()
        .withf(move |id, price, draft| {
            *id == user_id
                && *price == ExchangePricing::DEFAULT_PRICE
                && draft.source() == AccountSource::Google
        })
        .times(1)
        .return_once(move |id, _, draft| {
            Ok(ExchangeReceipt {
                account: Account {
                    id: draft.id,
                    user_id: id,
                    source: draft.source(),
                    credentials: draft.credentials,
                    is_hidden: false,
                    created_at: fixture_timestamp(),
                },
                remaining_points: 400,
            })
        });

    let outcome = service_with(users, store)
        .exchange(&device(), AccountSource::Google)
        .await
        .expect("exchange succeeds");

    assert_eq!(outcome.remaining_points, 400);
    assert_eq!(outcome.account.source, AccountSource::Google);
}

#[tokio::test]
async fn exchange_requires_a_known_device() {
    let mut users = MockUserStore::new();
    users.expect_find_by_device_id().return_once(|_| Ok(None));

    let mut store = MockExchangeStore::new();
    store.expect_debit_and_allocate().times(0);

    let error = service_with(users, store)
        .exchange(&device(), AccountSource::Google)
        .await
        .expect_err("unknown device rejected");
    assert_eq!(error.code(), ErrorCode::UserNotFound);
}

#[tokio::test]
async fn exchange_surfaces_the_conditional_debit_failure() {
    let user = stored_user(40);

    let mut users = MockUserStore::new();
    users
        .expect_find_by_device_id()
        .return_once(move |_| Ok(Some(user)));

    let mut store = MockExchangeStore::new();
    store
        .expect_debit_and_allocate()
        .return_once(|_, _, _| Err(ExchangeStoreError::insufficient_points()));

    let error = service_with(users, store)
        .exchange(&device(), AccountSource::Google)
        .await
        .expect_err("insufficient balance rejected");
    assert_eq!(error.code(), ErrorCode::InsufficientPoints);
}

#[tokio::test]
async fn exchange_drafts_credentials_for_the_requested_source() {
    let user = stored_user(500);

    let mut users = MockUserStore::new();
    users
        .expect_find_by_device_id()
        .return_once(move |_| Ok(Some(user)));

    let mut store = MockExchangeStore::new();
    store
        .expect_debit_and_allocate()
        .withf(|_, _, draft| draft.source() == AccountSource::Github)
        .times(1)
        .return_once(|id, _, draft| {
            Ok(ExchangeReceipt {
                account: Account {
                    id: draft.id,
                    user_id: id,
                    source: draft.source(),
                    credentials: draft.credentials,
                    is_hidden: false,
                    created_at: fixture_timestamp(),
                },
                remaining_points: 400,
            })
        });

    let outcome = service_with(users, store)
        .exchange(&device(), AccountSource::Github)
        .await
        .expect("exchange succeeds");
    assert_eq!(outcome.account.source, AccountSource::Github);
}

#[test]
fn non_positive_prices_fall_back_to_the_default() {
    assert_eq!(ExchangePricing::new(0).price(), ExchangePricing::DEFAULT_PRICE);
    assert_eq!(ExchangePricing::new(-5).price(), ExchangePricing::DEFAULT_PRICE);
    assert_eq!(ExchangePricing::new(250).price(), 250);
}
