//! Gateway configuration loaded from the environment.

use stack_store::StoreConfig;

use crate::rate::{RateTable, RateWindow, DEFAULT_LIMIT, DEFAULT_PERIOD_MS};

/// Listen address used when `WIDGET_LISTEN_ADDR` is unset.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

/// Override applied when `WIDGET_RATE_OVERRIDES` is unset.
pub const DEFAULT_OVERRIDES: &str = "/widget/many=3:5000";

/// A configuration variable held a value that could not be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value '{value}' for {var}: {reason}")]
pub struct ConfigError {
    /// Environment variable at fault.
    pub var: &'static str,
    /// Offending value.
    pub value: String,
    /// Why it was rejected.
    pub reason: String,
}

/// Everything the gateway binary needs to start.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct GatewayConfig {
    /// Socket address to bind, e.g. `127.0.0.1:8080`.
    pub listen_addr: String,
    /// Store behaviour, including durable mode.
    pub store: StoreConfig,
    /// Rate limits, built once at startup.
    pub rates: RateTable,
}

impl GatewayConfig {
    /// Load configuration from process environment variables.
    ///
    /// # Errors
    /// Returns [`ConfigError`] naming the first variable with an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its
    /// value if set.
    ///
    /// # Errors
    /// Returns [`ConfigError`] naming the first variable with an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let listen_addr =
            lookup("WIDGET_LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_owned());

        let durable = match lookup("WIDGET_DB_STORE") {
            Some(value) => parse_bool("WIDGET_DB_STORE", &value)?,
            None => false,
        };
        let store = if durable { StoreConfig::durable() } else { StoreConfig::in_memory() };

        let limit = match lookup("WIDGET_RATE_LIMIT") {
            Some(value) => parse_number("WIDGET_RATE_LIMIT", &value)?,
            None => DEFAULT_LIMIT,
        };
        let period_ms = match lookup("WIDGET_RATE_PERIOD_MS") {
            Some(value) => parse_number("WIDGET_RATE_PERIOD_MS", &value)?,
            None => DEFAULT_PERIOD_MS,
        };

        let overrides =
            lookup("WIDGET_RATE_OVERRIDES").unwrap_or_else(|| DEFAULT_OVERRIDES.to_owned());
        let rates = parse_overrides(&overrides)?
            .into_iter()
            .fold(RateTable::new(RateWindow::new(limit, period_ms)), |table, (route, window)| {
                table.with_route(route, window)
            });

        Ok(Self {
            listen_addr,
            store,
            rates,
        })
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_owned(),
            store: StoreConfig::default(),
            rates: RateTable::default(),
        }
    }
}

/// Parse a comma-separated list of `route=limit:periodMs` entries.
///
/// Blank entries are skipped, so an empty string yields no overrides.
///
/// # Errors
/// Returns [`ConfigError`] for an entry that is not of the form
/// `route=limit:periodMs` or whose numbers do not parse.
pub fn parse_overrides(raw: &str) -> Result<Vec<(String, RateWindow)>, ConfigError> {
    const VAR: &str = "WIDGET_RATE_OVERRIDES";

    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let invalid = |reason: &str| ConfigError {
                var: VAR,
                value: entry.to_owned(),
                reason: reason.to_owned(),
            };
            let (route, window) =
                entry.split_once('=').ok_or_else(|| invalid("expected route=limit:periodMs"))?;
            let (limit, period) =
                window.split_once(':').ok_or_else(|| invalid("expected limit:periodMs"))?;
            let route = route.trim();
            if !route.starts_with('/') {
                return Err(invalid("route must start with '/'"));
            }
            let limit = parse_number(VAR, limit.trim())?;
            let period_ms = parse_number(VAR, period.trim())?;
            Ok((route.to_owned(), RateWindow::new(limit, period_ms)))
        })
        .collect()
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError {
            var,
            value: value.to_owned(),
            reason: "expected true or false".to_owned(),
        }),
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError {
        var,
        value: value.to_owned(),
        reason: e.to_string(),
    })
}
