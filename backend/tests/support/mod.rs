//! In-memory port implementations and app plumbing for integration tests.
//!
//! `InMemoryLedger` mirrors the store contracts the Diesel adapters promise:
//! every mutating operation runs to completion under one lock, so the
//! single-redemption and conditional-debit guarantees hold under concurrent
//! callers exactly as they do with row locks in PostgreSQL.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::DefaultClock;
use uuid::Uuid;

use backend::domain::ports::{
    AccountPool, AccountPoolError, ActivationLedger, AdminStore, AdminStoreError, ExchangeReceipt,
    ExchangeStore, ExchangeStoreError, LedgerStats, MintCodeError, Redemption, RedemptionError,
    UserStore, UserStoreError,
};
use backend::domain::{
    Account, AccountDraft, AccountService, AccountSource, ActivationCode, ActivationCodeDraft,
    ActivationService, AdminService, DeviceId, ExchangePricing, ExchangeService, IdentityService,
    User,
};
use backend::inbound::http::state::{GatewayConfig, HttpState};

/// Admin token the test gateway is configured with.
pub const TEST_ADMIN_TOKEN: &str = "test-admin-token";

#[derive(Default)]
struct LedgerState {
    users: Vec<User>,
    accounts: Vec<Account>,
    codes: Vec<ActivationCode>,
}

/// Shared in-memory store implementing every driven port.
#[derive(Default)]
pub struct InMemoryLedger {
    state: Mutex<LedgerState>,
}

impl InMemoryLedger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().expect("ledger state lock poisoned")
    }

    /// Seed a code directly, bypassing minting validation (e.g. already
    /// expired codes).
    pub fn seed_code(&self, code: &str, points: i32, expires_at: DateTime<Utc>) {
        self.lock().codes.push(ActivationCode {
            id: Uuid::new_v4(),
            code: code.to_owned(),
            points,
            expires_at,
            is_used: false,
            used_by: None,
            created_at: Utc::now(),
        });
    }

    pub fn balance_of(&self, device: &str) -> Option<i32> {
        self.lock()
            .users
            .iter()
            .find(|user| user.device_id.as_str() == device)
            .map(|user| user.points)
    }

    pub fn account_count(&self) -> usize {
        self.lock().accounts.len()
    }

    pub fn code_is_used(&self, code: &str) -> bool {
        self.lock()
            .codes
            .iter()
            .any(|candidate| candidate.code == code && candidate.is_used)
    }
}

#[async_trait]
impl UserStore for InMemoryLedger {
    async fn resolve_or_create(&self, device_id: &DeviceId) -> Result<User, UserStoreError> {
        let mut state = self.lock();
        if let Some(user) = state
            .users
            .iter()
            .find(|user| user.device_id == *device_id)
        {
            return Ok(user.clone());
        }
        let user = User {
            id: Uuid::new_v4(),
            device_id: device_id.clone(),
            points: 0,
            activated_code: None,
            activation_expires_at: None,
            created_at: Utc::now(),
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_device_id(
        &self,
        device_id: &DeviceId,
    ) -> Result<Option<User>, UserStoreError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|user| user.device_id == *device_id)
            .cloned())
    }

    async fn clear_activation(&self, device_id: &DeviceId) -> Result<bool, UserStoreError> {
        let mut state = self.lock();
        match state
            .users
            .iter_mut()
            .find(|user| user.device_id == *device_id)
        {
            Some(user) => {
                user.activated_code = None;
                user.activation_expires_at = None;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl ActivationLedger for InMemoryLedger {
    async fn redeem(
        &self,
        user_id: Uuid,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Redemption, RedemptionError> {
        let mut state = self.lock();

        let Some(position) = state
            .codes
            .iter()
            .position(|candidate| candidate.code == code)
        else {
            return Err(RedemptionError::invalid_or_used());
        };
        let (points, expires_at) = {
            let found = &state.codes[position];
            if found.is_used {
                return Err(RedemptionError::invalid_or_used());
            }
            if now >= found.expires_at {
                return Err(RedemptionError::expired());
            }
            (found.points, found.expires_at)
        };

        state.codes[position].is_used = true;
        state.codes[position].used_by = Some(user_id);

        let user = state
            .users
            .iter_mut()
            .find(|user| user.id == user_id)
            .ok_or_else(|| RedemptionError::query("user row missing"))?;
        user.points += points;
        user.activated_code = Some(code.to_owned());
        user.activation_expires_at = Some(expires_at);

        Ok(Redemption {
            code: code.to_owned(),
            points_granted: points,
            new_balance: user.points,
            expires_at,
        })
    }
}

#[async_trait]
impl AccountPool for InMemoryLedger {
    async fn list_visible(&self, user_id: Uuid) -> Result<Vec<Account>, AccountPoolError> {
        // Insertion order doubles as creation order; reverse for newest
        // first.
        Ok(self
            .lock()
            .accounts
            .iter()
            .rev()
            .filter(|account| account.user_id == user_id && !account.is_hidden)
            .cloned()
            .collect())
    }

    async fn find_owned(
        &self,
        user_id: Uuid,
        account_id: Uuid,
        source: Option<AccountSource>,
    ) -> Result<Option<Account>, AccountPoolError> {
        Ok(self
            .lock()
            .accounts
            .iter()
            .find(|account| {
                account.id == account_id
                    && account.user_id == user_id
                    && source.is_none_or(|wanted| account.source == wanted)
            })
            .cloned())
    }

    async fn hide(&self, user_id: Uuid, account_id: Uuid) -> Result<bool, AccountPoolError> {
        let mut state = self.lock();
        match state
            .accounts
            .iter_mut()
            .find(|account| account.id == account_id && account.user_id == user_id)
        {
            Some(account) => {
                account.is_hidden = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl ExchangeStore for InMemoryLedger {
    async fn debit_and_allocate(
        &self,
        user_id: Uuid,
        price: i32,
        draft: AccountDraft,
    ) -> Result<ExchangeReceipt, ExchangeStoreError> {
        let mut state = self.lock();

        let remaining = {
            let user = state
                .users
                .iter_mut()
                .find(|user| user.id == user_id)
                .ok_or_else(|| ExchangeStoreError::query("user row missing"))?;
            if user.points < price {
                return Err(ExchangeStoreError::insufficient_points());
            }
            user.points -= price;
            user.points
        };

        let account = Account {
            id: draft.id,
            user_id,
            source: draft.source(),
            credentials: draft.credentials,
            is_hidden: false,
            created_at: Utc::now(),
        };
        state.accounts.push(account.clone());

        Ok(ExchangeReceipt {
            account,
            remaining_points: remaining,
        })
    }
}

#[async_trait]
impl AdminStore for InMemoryLedger {
    async fn mint_code(
        &self,
        draft: &ActivationCodeDraft,
    ) -> Result<ActivationCode, MintCodeError> {
        let mut state = self.lock();
        if state
            .codes
            .iter()
            .any(|candidate| candidate.code == draft.code)
        {
            return Err(MintCodeError::duplicate_code());
        }
        let code = ActivationCode {
            id: Uuid::new_v4(),
            code: draft.code.clone(),
            points: draft.points,
            expires_at: draft.expires_at,
            is_used: false,
            used_by: None,
            created_at: Utc::now(),
        };
        state.codes.push(code.clone());
        Ok(code)
    }

    async fn stats(&self) -> Result<LedgerStats, AdminStoreError> {
        let state = self.lock();
        Ok(LedgerStats {
            total_users: state.users.len() as i64,
            total_accounts: state
                .accounts
                .iter()
                .filter(|account| !account.is_hidden)
                .count() as i64,
            unused_codes: state.codes.iter().filter(|code| !code.is_used).count() as i64,
        })
    }
}

/// Real services over the shared in-memory store, wired the way the server
/// wires the Diesel adapters.
pub fn test_state(ledger: &Arc<InMemoryLedger>, price: i32) -> HttpState {
    let clock: Arc<dyn mockable::Clock> = Arc::new(DefaultClock);

    HttpState {
        identity: Arc::new(IdentityService::new(ledger.clone(), ledger.clone())),
        redemption: Arc::new(ActivationService::new(
            ledger.clone(),
            ledger.clone(),
            ledger.clone(),
            clock.clone(),
        )),
        exchange: Arc::new(ExchangeService::new(
            ledger.clone(),
            ledger.clone(),
            ExchangePricing::new(price),
            clock.clone(),
        )),
        accounts: Arc::new(AccountService::new(ledger.clone(), ledger.clone())),
        admin: Arc::new(AdminService::new(ledger.clone(), clock)),
        gateway: GatewayConfig {
            admin_token: Some(TEST_ADMIN_TOKEN.to_owned()),
            ..GatewayConfig::default()
        },
    }
}
