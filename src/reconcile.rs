//! Diff desired running states against a snapshot and issue start/stop calls

use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use crate::docker::{ContainerRuntime, DockerError};
use crate::snapshot::{DesiredStates, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerAction {
    Start,
    Stop,
}

impl ContainerAction {
    pub fn past_tense(self) -> &'static str {
        match self {
            ContainerAction::Start => "Started",
            ContainerAction::Stop => "Stopped",
        }
    }
}

impl fmt::Display for ContainerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerAction::Start => write!(f, "start"),
            ContainerAction::Stop => write!(f, "stop"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedAction {
    pub id: String,
    pub name: String,
    pub action: ContainerAction,
}

#[derive(Debug)]
pub struct ActionOutcome {
    pub planned: PlannedAction,
    pub result: Result<(), DockerError>,
}

impl ActionOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// One action per snapshot record whose desired state is known and differs
/// from its actual state. Ids in `desired` that aren't in the snapshot are
/// ignored.
pub fn plan(snapshot: &Snapshot, desired: &DesiredStates) -> Vec<PlannedAction> {
    snapshot
        .iter()
        .filter_map(|record| {
            let &want_running = desired.get(&record.id)?;
            if want_running == record.is_running() {
                return None;
            }
            Some(PlannedAction {
                id: record.id.clone(),
                name: record.name.clone(),
                action: if want_running {
                    ContainerAction::Start
                } else {
                    ContainerAction::Stop
                },
            })
        })
        .collect()
}

/// Issue one runtime call per mismatch. A failure is recorded in its outcome
/// and doesn't stop the remaining calls. The snapshot is not refreshed.
pub fn apply(
    runtime: &impl ContainerRuntime,
    snapshot: &Snapshot,
    desired: &DesiredStates,
) -> Vec<ActionOutcome> {
    plan(snapshot, desired)
        .into_iter()
        .map(|planned| {
            let result = match planned.action {
                ContainerAction::Start => runtime.start_container(&planned.id),
                ContainerAction::Stop => runtime.stop_container(&planned.id),
            };
            match &result {
                Ok(()) => info!("{} {} ({})", planned.action.past_tense(), planned.id, planned.name),
                Err(e) => warn!("Failed to {} {}: {}", planned.action, planned.id, e),
            }
            ActionOutcome { planned, result }
        })
        .collect()
}
