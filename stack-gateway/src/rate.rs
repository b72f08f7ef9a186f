//! Fixed-window request admission.
//!
//! One counter is shared by every route; only the limit it is compared
//! against varies per route. Once the counter passes the active limit,
//! requests are rejected until the active period has elapsed since the window
//! opened, at which point the counter drops to zero and the request goes
//! through. Bursts straddling a window boundary can therefore exceed the
//! nominal rate.

use std::{
    sync::{Mutex, MutexGuard},
    time::{Duration, Instant},
};

use indexmap::IndexMap;

/// Global limit applied to routes without an override.
pub const DEFAULT_LIMIT: u32 = 1000;

/// Global window length in milliseconds applied to routes without an override.
pub const DEFAULT_PERIOD_MS: u64 = 1;

/// Limit and period governing one route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateWindow {
    /// Requests admitted before the window must roll over.
    pub limit: u32,
    /// Window length.
    pub period: Duration,
}

impl RateWindow {
    /// Creates a window of `limit` requests per `period_ms` milliseconds.
    #[must_use]
    pub const fn new(limit: u32, period_ms: u64) -> Self {
        Self {
            limit,
            period: Duration::from_millis(period_ms),
        }
    }

    /// Window length in milliseconds.
    #[must_use]
    pub fn period_ms(&self) -> u64 {
        u64::try_from(self.period.as_millis()).unwrap_or(u64::MAX)
    }
}

impl Default for RateWindow {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, DEFAULT_PERIOD_MS)
    }
}

/// Route-to-window table, fixed once the limiter is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateTable {
    default: RateWindow,
    overrides: IndexMap<String, RateWindow>,
}

impl RateTable {
    /// Creates a table with `default` for every route and no overrides.
    #[must_use]
    pub fn new(default: RateWindow) -> Self {
        Self {
            default,
            overrides: IndexMap::new(),
        }
    }

    /// Adds (or replaces) the override for `route`.
    #[must_use]
    pub fn with_route(mut self, route: impl Into<String>, window: RateWindow) -> Self {
        self.overrides.insert(route.into(), window);
        self
    }

    /// The window that applies to `route`.
    #[must_use]
    pub fn resolve(&self, route: &str) -> RateWindow {
        self.overrides.get(route).copied().unwrap_or(self.default)
    }

    /// The window for routes without an override.
    #[must_use]
    pub fn default_window(&self) -> RateWindow {
        self.default
    }

    /// Declared overrides in declaration order.
    pub fn overrides(&self) -> impl Iterator<Item = (&str, RateWindow)> {
        self.overrides.iter().map(|(route, window)| (route.as_str(), *window))
    }
}

/// A request was refused because the current window is exhausted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("rate limit exceeded for {route}: {limit} requests per {period_ms}ms")]
pub struct RateLimitExceeded {
    /// Route the rejected request was addressed to.
    pub route: String,
    /// Limit that was in force.
    pub limit: u32,
    /// Period that was in force, in milliseconds.
    pub period_ms: u64,
}

#[derive(Debug, Default)]
struct WindowState {
    count: u64,
    started_at: Option<Instant>,
}

/// Thread-safe fixed-window admission control.
#[derive(Debug)]
pub struct RateLimiter {
    table: RateTable,
    state: Mutex<WindowState>,
}

impl RateLimiter {
    /// Create a limiter over `table` with an unopened window.
    #[must_use]
    pub fn new(table: RateTable) -> Self {
        Self {
            table,
            state: Mutex::new(WindowState::default()),
        }
    }

    /// The route table this limiter resolves against.
    #[must_use]
    pub fn table(&self) -> &RateTable {
        &self.table
    }

    /// Admit or reject a request for `route` at the current instant.
    ///
    /// # Errors
    /// Returns [`RateLimitExceeded`] if the shared counter is past the route's
    /// limit and the route's period has not yet elapsed.
    pub fn admit(&self, route: &str) -> Result<(), RateLimitExceeded> {
        self.admit_at(route, Instant::now())
    }

    /// Admit or reject a request for `route` observed at `now`.
    ///
    /// The counter is bumped on every call, rejected or not. The window opens
    /// when the counter reaches one.
    ///
    /// # Errors
    /// Returns [`RateLimitExceeded`] under the same conditions as
    /// [`admit`](Self::admit).
    pub fn admit_at(&self, route: &str, now: Instant) -> Result<(), RateLimitExceeded> {
        let window = self.table.resolve(route);
        let mut state = self.lock();

        state.count = state.count.saturating_add(1);
        if state.count == 1 {
            state.started_at = Some(now);
        }

        if state.count <= u64::from(window.limit) {
            return Ok(());
        }

        let started_at = *state.started_at.get_or_insert(now);
        if now.saturating_duration_since(started_at) >= window.period {
            tracing::debug!(route, count = state.count, "rate window rolled over");
            state.count = 0;
            return Ok(());
        }

        tracing::warn!(
            route,
            count = state.count,
            limit = window.limit,
            period_ms = window.period_ms(),
            "request rejected by rate limiter"
        );
        Err(RateLimitExceeded {
            route: route.to_owned(),
            limit: window.limit,
            period_ms: window.period_ms(),
        })
    }

    /// Requests counted in the current window.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.lock().count
    }

    #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
    fn lock(&self) -> MutexGuard<'_, WindowState> {
        self.state.lock().expect("rate limiter lock poisoned")
    }
}
