//! # Command Context
//!
//! What every command handler gets: the resolved [`Config`], the backend
//! holding the data directory, and the clock. Mutating commands open a
//! [`Workspace`] over it; read-only aggregation commands take a tolerant
//! [`Snapshot`] straight from the backend, so they still answer over a
//! damaged collection.

use std::sync::Arc;

use upkeep_core::{Clock, SystemClock, Timestamp, UpkeepError};
use upkeep_store::{CollectionBackend, FileBackend, Snapshot, Workspace};

use crate::config::Config;

#[derive(Debug, Clone)]
pub struct Context {
    config: Config,
    backend: Arc<dyn CollectionBackend>,
    clock: Arc<dyn Clock>,
}

impl Context {
    /// Open the configured data directory with the wall clock.
    pub fn open(config: Config) -> Result<Self, UpkeepError> {
        let backend = FileBackend::open(&config.data_dir)?;
        Ok(Self::with_backend(
            config,
            Arc::new(backend),
            Arc::new(SystemClock),
        ))
    }

    pub fn with_backend(
        config: Config,
        backend: Arc<dyn CollectionBackend>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            backend,
            clock,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn workspace(&self) -> Result<Workspace, UpkeepError> {
        Workspace::open(Arc::clone(&self.backend), Arc::clone(&self.clock))
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::load(self.backend.as_ref())
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }
}
