//! Owned application state shared by the CLI and TUI front-ends

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::{get_config_dir, Config};
use crate::docker::{self, ContainerRuntime, Docker};
use crate::reconcile::{self, ActionOutcome, PlannedAction};
use crate::snapshot::{DesiredStates, Snapshot};
use crate::watchlist::{Watchlist, WatchlistError};

/// The watchlist, the latest snapshot and the runtime used to refresh and
/// reconcile it.
#[derive(Debug)]
pub struct Monitor<R = Docker> {
    runtime: R,
    watchlist: Watchlist,
    snapshot: Snapshot,
}

impl Monitor<Docker> {
    /// Resolve the config dir, read settings and load the watchlist. The
    /// snapshot starts empty; call [`Monitor::refresh`] to populate it.
    pub fn open(config_dir: Option<&Path>) -> Result<Self> {
        let config_dir: PathBuf = get_config_dir(config_dir)?;
        let config = Config::load(&config_dir)?;
        let watchlist = Watchlist::open(&config, &config_dir);
        let runtime = Docker::from_config(&config.docker);
        Ok(Self::new(runtime, watchlist))
    }
}

impl<R: ContainerRuntime> Monitor<R> {
    pub fn new(runtime: R, watchlist: Watchlist) -> Self {
        Self {
            runtime,
            watchlist,
            snapshot: Snapshot::new(),
        }
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub fn watchlist(&self) -> &Watchlist {
        &self.watchlist
    }

    pub fn watchlist_mut(&mut self) -> &mut Watchlist {
        &mut self.watchlist
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn refresh(&mut self) -> docker::Result<usize> {
        self.snapshot.refresh(&self.runtime, &self.watchlist)
    }

    pub fn plan(&self, desired: &DesiredStates) -> Vec<PlannedAction> {
        reconcile::plan(&self.snapshot, desired)
    }

    pub fn apply(&self, desired: &DesiredStates) -> Vec<ActionOutcome> {
        reconcile::apply(&self.runtime, &self.snapshot, desired)
    }

    pub fn save_watchlist(&mut self, text: &str) -> std::result::Result<(), WatchlistError> {
        self.watchlist.save(text)
    }
}
