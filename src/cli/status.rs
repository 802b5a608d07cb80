//! `dmon status` command implementation

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::monitor::Monitor;
use crate::snapshot::ContainerRecord;

const TABLE_COL_ID: usize = 14;
const TABLE_COL_NAME: usize = 24;
const TABLE_COL_STATE: usize = 10;
const TABLE_COL_STATUS: usize = 28;

#[derive(Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ContainerJson<'a> {
    id: &'a str,
    name: &'a str,
    state: &'a str,
    status: &'a str,
    running: bool,
}

impl<'a> From<&'a ContainerRecord> for ContainerJson<'a> {
    fn from(record: &'a ContainerRecord) -> Self {
        Self {
            id: &record.id,
            name: &record.name,
            state: &record.state,
            status: &record.status,
            running: record.is_running(),
        }
    }
}

fn print_table_header() {
    println!(
        "{:<width_id$} {:<width_name$} {:<width_state$} {:<width_status$} RUNNING",
        "ID",
        "NAME",
        "STATE",
        "STATUS",
        width_id = TABLE_COL_ID,
        width_name = TABLE_COL_NAME,
        width_state = TABLE_COL_STATE,
        width_status = TABLE_COL_STATUS,
    );
    println!(
        "{}",
        "-".repeat(TABLE_COL_ID + TABLE_COL_NAME + TABLE_COL_STATE + TABLE_COL_STATUS + 11)
    );
}

fn print_table_row(record: &ContainerRecord) {
    println!(
        "{:<width_id$} {:<width_name$} {:<width_state$} {:<width_status$} {}",
        super::truncate_id(&record.id, 12),
        super::truncate(&record.name, TABLE_COL_NAME),
        super::truncate(&record.state, TABLE_COL_STATE),
        super::truncate(&record.status, TABLE_COL_STATUS),
        super::checkbox(record.is_running()),
        width_id = TABLE_COL_ID,
        width_name = TABLE_COL_NAME,
        width_state = TABLE_COL_STATE,
        width_status = TABLE_COL_STATUS,
    );
}

pub fn run(monitor: &mut Monitor, args: StatusArgs) -> Result<()> {
    monitor.refresh()?;
    let snapshot = monitor.snapshot();

    if args.json {
        let containers: Vec<ContainerJson> = snapshot.iter().map(ContainerJson::from).collect();
        println!("{}", serde_json::to_string_pretty(&containers)?);
        return Ok(());
    }

    if monitor.watchlist().text().is_none() {
        println!("No watchlist configured.");
        println!("Create one with: dmon watch add <container>");
        return Ok(());
    }

    if snapshot.is_empty() {
        println!("No watched containers found.");
        return Ok(());
    }

    print_table_header();
    for record in snapshot {
        print_table_row(record);
    }
    let running = snapshot.iter().filter(|r| r.is_running()).count();
    println!("\nTotal: {} containers ({} running)", snapshot.len(), running);

    Ok(())
}
