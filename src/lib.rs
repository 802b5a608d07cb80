//! Docker Monitor - watch a list of containers and start/stop them
//!
//! The core is three pieces of owned state: a [`watchlist::Watchlist`] text
//! blob, a [`snapshot::Snapshot`] of the containers it matches, and the
//! [`reconcile`] step that turns desired running states into `docker
//! start`/`docker stop` calls. [`monitor::Monitor`] bundles them for the CLI
//! and TUI front-ends.

pub mod cli;
pub mod config;
pub mod docker;
pub mod monitor;
pub mod reconcile;
pub mod snapshot;
pub mod tui;
pub mod watchlist;
