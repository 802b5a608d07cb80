//! Container snapshot - the watched subset of `docker ps` output

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::docker::{ContainerRuntime, Result};
use crate::watchlist::Watchlist;

/// Map from container id to "should be running".
pub type DesiredStates = HashMap<String, bool>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRecord {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "State", default)]
    pub state: String,
    #[serde(rename = "Status", default)]
    pub status: String,
}

impl ContainerRecord {
    pub fn is_running(&self) -> bool {
        self.state == "running"
    }
}

/// Parse one listing line. Returns `None` for blank lines and anything that
/// isn't a JSON object with string fields.
pub fn parse_line(line: &str) -> Option<ContainerRecord> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    match serde_json::from_str::<ContainerRecord>(line) {
        Ok(record) => Some(record),
        Err(e) => {
            debug!("Skipping unparseable listing line ({}): {}", e, line);
            None
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    records: Vec<ContainerRecord>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a full listing and keep the records whose id or name occurs in
    /// the watchlist, in listing order.
    pub fn from_listing(output: &str, watchlist: &Watchlist) -> Self {
        let records = output
            .lines()
            .filter_map(parse_line)
            .filter(|r| watchlist.contains(&r.id) || watchlist.contains(&r.name))
            .collect();
        Self { records }
    }

    /// Throw away the current records and rebuild from a fresh listing.
    /// If the listing itself fails the snapshot is left empty.
    pub fn refresh(
        &mut self,
        runtime: &impl ContainerRuntime,
        watchlist: &Watchlist,
    ) -> Result<usize> {
        self.records.clear();
        let output = runtime.list_containers()?;
        *self = Self::from_listing(&output, watchlist);
        debug!("Snapshot refreshed: {} watched containers", self.len());
        Ok(self.len())
    }

    pub fn records(&self) -> &[ContainerRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContainerRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&ContainerRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Current actual states, keyed by id.
    pub fn desired_states(&self) -> DesiredStates {
        self.records
            .iter()
            .map(|r| (r.id.clone(), r.is_running()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a ContainerRecord;
    type IntoIter = std::slice::Iter<'a, ContainerRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
