use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::config;
use crate::database::DatabaseManager;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings read timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Database(#[from] crate::database::DatabaseError),

    #[error("settings query failed: {0}")]
    Query(#[from] sqlx::Error),
}

/// Source of the global maintenance flag consumed by the access gate.
/// Production uses the database-backed [`SettingsService`]; tests use
/// [`MemorySettings`].
#[async_trait]
pub trait SettingsProvider: Send + Sync {
    async fn maintenance_mode(&self) -> Result<bool, SettingsError>;

    /// Drop any cached state after the settings row changes. Providers
    /// without a cache ignore this.
    async fn invalidate(&self) {}
}

#[derive(Debug, Clone, Copy)]
struct CachedFlag {
    value: bool,
    read_at: Instant,
}

/// Staleness-bounded cache over the `site_settings` row.
///
/// The flag is re-read at most once per TTL and every read runs under a
/// timeout, so the request path never blocks on an unresponsive store.
/// When a refresh fails, the last known value keeps being served.
pub struct SettingsService {
    ttl: Duration,
    fetch_timeout: Duration,
    cached: RwLock<Option<CachedFlag>>,
}

impl SettingsService {
    pub fn new() -> Self {
        let gate = &config::config().gate;
        Self {
            ttl: Duration::from_secs(gate.settings_ttl_secs),
            fetch_timeout: Duration::from_secs(gate.settings_fetch_timeout_secs),
            cached: RwLock::new(None),
        }
    }

    async fn fetch_flag(&self) -> Result<bool, SettingsError> {
        let pool = DatabaseManager::pool().await?;
        let row: Option<(bool,)> = tokio::time::timeout(
            self.fetch_timeout,
            sqlx::query_as("SELECT maintenance_mode FROM site_settings LIMIT 1")
                .fetch_optional(&pool),
        )
        .await
        .map_err(|_| SettingsError::Timeout(self.fetch_timeout))??;

        // No settings row yet means the site runs on defaults: not in maintenance.
        Ok(row.map(|(flag,)| flag).unwrap_or(false))
    }
}

impl Default for SettingsService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SettingsProvider for SettingsService {
    async fn maintenance_mode(&self) -> Result<bool, SettingsError> {
        // Fast path: fresh cached value.
        {
            let cached = self.cached.read().await;
            if let Some(flag) = *cached {
                if flag.read_at.elapsed() < self.ttl {
                    return Ok(flag.value);
                }
            }
        }

        match self.fetch_flag().await {
            Ok(value) => {
                debug!("Refreshed maintenance flag: {}", value);
                *self.cached.write().await = Some(CachedFlag {
                    value,
                    read_at: Instant::now(),
                });
                Ok(value)
            }
            Err(err) => {
                // Stale beats nothing: keep serving the last known value.
                let cached = self.cached.read().await;
                if let Some(flag) = *cached {
                    warn!("Settings refresh failed, serving stale value: {}", err);
                    Ok(flag.value)
                } else {
                    Err(err)
                }
            }
        }
    }

    /// Called after an admin updates the settings row, so toggling
    /// maintenance mode takes effect without waiting out the TTL.
    async fn invalidate(&self) {
        *self.cached.write().await = None;
    }
}

/// Fixed in-memory provider for router-level tests.
pub struct MemorySettings {
    maintenance: AtomicBool,
    failing: AtomicBool,
}

impl MemorySettings {
    pub fn new(maintenance: bool) -> Self {
        Self {
            maintenance: AtomicBool::new(maintenance),
            failing: AtomicBool::new(false),
        }
    }

    /// Provider whose reads always fail, for exercising fail-open paths.
    pub fn failing() -> Self {
        Self {
            maintenance: AtomicBool::new(false),
            failing: AtomicBool::new(true),
        }
    }

    pub fn set_maintenance(&self, on: bool) {
        self.maintenance.store(on, Ordering::SeqCst);
    }
}

#[async_trait]
impl SettingsProvider for MemorySettings {
    async fn maintenance_mode(&self) -> Result<bool, SettingsError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SettingsError::Timeout(Duration::from_secs(0)));
        }
        Ok(self.maintenance.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_provider_reflects_flag() {
        let settings = MemorySettings::new(false);
        assert!(!settings.maintenance_mode().await.unwrap());
        settings.set_maintenance(true);
        assert!(settings.maintenance_mode().await.unwrap());
    }

    #[tokio::test]
    async fn failing_provider_errors() {
        let settings = MemorySettings::failing();
        assert!(settings.maintenance_mode().await.is_err());
    }
}
