//! In-memory runtime used by unit and integration tests.

use std::cell::RefCell;
use std::collections::HashSet;

use super::error::{DockerError, Result};
use super::runtime::ContainerRuntime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeCall {
    Start(String),
    Stop(String),
}

#[derive(Debug, Default)]
pub struct FakeRuntime {
    listing: String,
    list_error: Option<String>,
    failing: HashSet<String>,
    calls: RefCell<Vec<RuntimeCall>>,
}

impl FakeRuntime {
    pub fn new(listing: impl Into<String>) -> Self {
        Self {
            listing: listing.into(),
            ..Default::default()
        }
    }

    /// Build a listing from `(id, name, state, status)` tuples in the same
    /// shape `docker ps --format` emits.
    pub fn with_containers(containers: &[(&str, &str, &str, &str)]) -> Self {
        let listing = containers
            .iter()
            .map(|(id, name, state, status)| {
                serde_json::json!({
                    "ID": id,
                    "Name": name,
                    "State": state,
                    "Status": status,
                })
                .to_string()
            })
            .collect::<Vec<_>>()
            .join("\n");
        Self::new(listing)
    }

    pub fn failing_list(message: &str) -> Self {
        Self {
            list_error: Some(message.to_string()),
            ..Default::default()
        }
    }

    /// Make start/stop calls targeting `id` return an error.
    pub fn fail_on(mut self, id: &str) -> Self {
        self.failing.insert(id.to_string());
        self
    }

    pub fn calls(&self) -> Vec<RuntimeCall> {
        self.calls.borrow().clone()
    }
}

impl ContainerRuntime for FakeRuntime {
    fn list_containers(&self) -> Result<String> {
        match &self.list_error {
            Some(message) => Err(DockerError::ListFailed(message.clone())),
            None => Ok(self.listing.clone()),
        }
    }

    fn start_container(&self, id: &str) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(RuntimeCall::Start(id.to_string()));
        if self.failing.contains(id) {
            return Err(DockerError::StartFailed(format!("cannot start {id}")));
        }
        Ok(())
    }

    fn stop_container(&self, id: &str) -> Result<()> {
        self.calls.borrow_mut().push(RuntimeCall::Stop(id.to_string()));
        if self.failing.contains(id) {
            return Err(DockerError::StopFailed(format!("cannot stop {id}")));
        }
        Ok(())
    }
}
