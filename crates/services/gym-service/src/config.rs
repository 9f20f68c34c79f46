//! Gym service configuration.

use std::env;
use std::path::PathBuf;

use common::{LogConfig, StorageBackend, StorageConfig};
use domain::{RevenueWindow, DEFAULT_MEMBER_PASSWORD};

/// Gym service configuration.
#[derive(Debug, Clone)]
pub struct GymServiceConfig {
    /// Where the collections are kept
    pub storage: StorageConfig,
    pub log: LogConfig,
    /// Login password for members an admin creates
    pub default_member_password: String,
    /// Revenue chart window when none is given
    pub revenue_window: RevenueWindow,
}

impl GymServiceConfig {
    /// Load configuration from environment variables and `.env`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();
        Self {
            storage: StorageConfig {
                backend: env::var("GYM_STORE")
                    .ok()
                    .and_then(|b| b.parse::<StorageBackend>().ok())
                    .unwrap_or(defaults.storage.backend),
                data_dir: env::var("GYM_DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.storage.data_dir),
            },
            log: LogConfig {
                level: env::var("GYM_LOG").unwrap_or(defaults.log.level),
            },
            default_member_password: env::var("GYM_DEFAULT_MEMBER_PASSWORD")
                .unwrap_or(defaults.default_member_password),
            revenue_window: env::var("GYM_REVENUE_WINDOW_MONTHS")
                .ok()
                .and_then(|m| m.parse().ok())
                .and_then(RevenueWindow::from_months)
                .unwrap_or(defaults.revenue_window),
        }
    }
}

impl Default for GymServiceConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            log: LogConfig::default(),
            default_member_password: DEFAULT_MEMBER_PASSWORD.to_string(),
            revenue_window: RevenueWindow::SixMonths,
        }
    }
}
