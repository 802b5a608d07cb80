//! `dmon start`, `dmon stop` and `dmon apply` command implementations

use anyhow::{bail, Result};
use clap::Args;

use crate::monitor::Monitor;
use crate::reconcile::ActionOutcome;
use crate::snapshot::{DesiredStates, Snapshot};

#[derive(Args)]
pub struct TargetArgs {
    /// Container IDs, ID prefixes or names
    #[arg(required = true)]
    pub containers: Vec<String>,
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Containers that should end up running
    #[arg(long, num_args = 1.., value_name = "CONTAINER")]
    pub running: Vec<String>,

    /// Containers that should end up stopped
    #[arg(long, num_args = 1.., value_name = "CONTAINER")]
    pub stopped: Vec<String>,
}

pub fn run_start(monitor: &mut Monitor, args: TargetArgs) -> Result<()> {
    run_targets(monitor, &args.containers, &[])
}

pub fn run_stop(monitor: &mut Monitor, args: TargetArgs) -> Result<()> {
    run_targets(monitor, &[], &args.containers)
}

pub fn run_apply(monitor: &mut Monitor, args: ApplyArgs) -> Result<()> {
    if args.running.is_empty() && args.stopped.is_empty() {
        bail!("Nothing to apply: pass --running and/or --stopped");
    }
    run_targets(monitor, &args.running, &args.stopped)
}

/// Resolve the requested identifiers against the snapshot. Returns the
/// desired states and the identifiers that matched no watched container.
/// A container asked to be both running and stopped is an error.
fn desired_states<'a>(
    snapshot: &Snapshot,
    running: &'a [String],
    stopped: &'a [String],
) -> Result<(DesiredStates, Vec<&'a str>)> {
    let mut desired = DesiredStates::new();
    let mut unknown = Vec::new();
    let requests = running
        .iter()
        .map(|c| (c, true))
        .chain(stopped.iter().map(|c| (c, false)));
    for (identifier, want_running) in requests {
        let Some(record) = super::resolve_container(identifier, snapshot) else {
            unknown.push(identifier.as_str());
            continue;
        };
        if let Some(&previous) = desired.get(&record.id) {
            if previous != want_running {
                bail!(
                    "{} ({}) is listed as both running and stopped",
                    record.name,
                    super::truncate_id(&record.id, 12)
                );
            }
        }
        desired.insert(record.id.clone(), want_running);
    }
    Ok((desired, unknown))
}

fn run_targets(monitor: &mut Monitor, running: &[String], stopped: &[String]) -> Result<()> {
    monitor.refresh()?;

    let (desired, unknown) = desired_states(monitor.snapshot(), running, stopped)?;
    for identifier in &unknown {
        eprintln!("Not a watched container: {}", identifier);
    }

    let outcomes = monitor.apply(&desired);
    if outcomes.is_empty() && !desired.is_empty() {
        println!("No changes.");
    }
    let failed = report(&outcomes);

    if failed > 0 {
        bail!("{} of {} actions failed", failed, outcomes.len());
    }
    if desired.is_empty() {
        bail!("No matching watched containers");
    }

    Ok(())
}

fn report(outcomes: &[ActionOutcome]) -> usize {
    let mut failed = 0;
    for outcome in outcomes {
        let planned = &outcome.planned;
        match &outcome.result {
            Ok(()) => println!(
                "✓ {} {} ({})",
                planned.action.past_tense(),
                planned.name,
                super::truncate_id(&planned.id, 12)
            ),
            Err(e) => {
                failed += 1;
                eprintln!("✗ Failed to {} {}: {}", planned.action, planned.name, e);
            }
        }
    }
    failed
}
