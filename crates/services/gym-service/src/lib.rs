//! Gym Service Library
//!
//! Membership, plan, trainer, booking and inventory management over a
//! key-value store. The `gymctl` binary drives it from the command line.

pub mod cli;
pub mod commands;
pub mod config;
pub mod infra;
pub mod repository;
pub mod seed;
pub mod service;

use std::sync::Arc;

use common::AppResult;
use domain::{Clock, SystemClock};

use crate::config::GymServiceConfig;
use crate::infra::{Persistence, UnitOfWork};
use crate::service::{ServiceContainer, Services};

/// Storage and services opened from one configuration.
pub struct GymApp {
    pub uow: Arc<dyn UnitOfWork>,
    pub services: Arc<dyn ServiceContainer>,
    pub config: GymServiceConfig,
}

impl GymApp {
    /// Open the configured store and wire the services on the system clock.
    pub async fn open(config: GymServiceConfig) -> AppResult<Self> {
        let persistence = Persistence::open(&config.storage).await?;
        Ok(Self::with_parts(Arc::new(persistence), Arc::new(SystemClock), config))
    }

    pub fn with_parts(uow: Arc<dyn UnitOfWork>, clock: Arc<dyn Clock>, config: GymServiceConfig) -> Self {
        let services = Arc::new(Services::new(uow.clone(), clock, &config));
        Self { uow, services, config }
    }
}
