//! Application configuration loaded from the environment.

use std::net::{Ipv4Addr, SocketAddr};

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `DATABASE_URL` is not set.
    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,
    /// `PORT` is set but not a number.
    #[error("PORT must be a number: {value}")]
    InvalidPort {
        /// The offending value.
        value: String,
    },
    /// `EXCHANGE_PRICE` is set but not a number.
    #[error("EXCHANGE_PRICE must be a number: {value}")]
    InvalidPrice {
        /// The offending value.
        value: String,
    },
}

/// Explicit configuration passed into each component at construction.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds.
    pub bind_addr: SocketAddr,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Shared administrative secret; `None` disables the admin surface.
    pub admin_token: Option<String>,
    /// Points debited per exchanged account.
    pub exchange_price: i32,
    /// Banner served by the announcement endpoint.
    pub announcement: Option<String>,
}

const DEFAULT_PORT: u16 = 8080;

impl AppConfig {
    /// Read configuration from process environment variables.
    ///
    /// # Errors
    /// Fails when `DATABASE_URL` is missing or a numeric variable does not
    /// parse; the caller treats this as fatal.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an injectable lookup, so tests need not
    /// mutate process state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::MissingDatabaseUrl)?;

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { value: raw })?,
            None => DEFAULT_PORT,
        };

        let exchange_price = match lookup("EXCHANGE_PRICE") {
            Some(raw) => raw
                .parse::<i32>()
                .map_err(|_| ConfigError::InvalidPrice { value: raw })?,
            None => crate::domain::ExchangePricing::DEFAULT_PRICE,
        };

        Ok(Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)),
            database_url,
            admin_token: lookup("ADMIN_TOKEN").filter(|token| !token.is_empty()),
            exchange_price,
            announcement: lookup("ANNOUNCEMENT"),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        move |name| map.get(name).map(|value| (*value).to_owned())
    }

    #[test]
    fn database_url_is_mandatory() {
        let result = AppConfig::from_lookup(lookup_from(&[]));
        assert_eq!(result.unwrap_err(), ConfigError::MissingDatabaseUrl);
    }

    #[test]
    fn defaults_apply_when_only_the_url_is_set() {
        let config = AppConfig::from_lookup(lookup_from(&[(
            "DATABASE_URL",
            "postgres://localhost/ledger",
        )]))
        .expect("config loads");

        assert_eq!(config.bind_addr.port(), DEFAULT_PORT);
        assert_eq!(
            config.exchange_price,
            crate::domain::ExchangePricing::DEFAULT_PRICE
        );
        assert!(config.admin_token.is_none());
        assert!(config.announcement.is_none());
    }

    #[test]
    fn explicit_values_override_the_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/ledger"),
            ("PORT", "9000"),
            ("ADMIN_TOKEN", "s3cret"),
            ("EXCHANGE_PRICE", "250"),
        ]))
        .expect("config loads");

        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.admin_token.as_deref(), Some("s3cret"));
        assert_eq!(config.exchange_price, 250);
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let result = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/ledger"),
            ("PORT", "not-a-port"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidPort { .. })));
    }

    #[test]
    fn empty_admin_tokens_disable_the_admin_surface() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/ledger"),
            ("ADMIN_TOKEN", ""),
        ]))
        .expect("config loads");
        assert!(config.admin_token.is_none());
    }
}
