//! CLI command implementations

pub mod control;
pub mod definition;
pub mod status;
pub mod watch;

pub use definition::{Cli, Commands};

use crate::snapshot::{ContainerRecord, Snapshot};

pub const ABOUT: &str = "This is a simple application to control docker containers";

/// Find a watched container by exact ID, then exact name, then a unique ID
/// prefix. A prefix shared by several containers resolves to nothing.
pub fn resolve_container<'a>(identifier: &str, snapshot: &'a Snapshot) -> Option<&'a ContainerRecord> {
    if identifier.is_empty() {
        return None;
    }

    if let Some(record) = snapshot.find(identifier) {
        return Some(record);
    }

    if let Some(record) = snapshot.iter().find(|r| r.name == identifier) {
        return Some(record);
    }

    let mut by_prefix = snapshot.iter().filter(|r| r.id.starts_with(identifier));
    match (by_prefix.next(), by_prefix.next()) {
        (Some(record), None) => Some(record),
        _ => None,
    }
}

pub fn print_about() {
    println!("dmon {}", env!("CARGO_PKG_VERSION"));
    println!("{}", ABOUT);
}

pub fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max <= 3 {
        s.chars().take(max).collect()
    } else {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    }
}

pub fn truncate_id(id: &str, max_len: usize) -> &str {
    if id.len() > max_len && id.is_char_boundary(max_len) {
        &id[..max_len]
    } else {
        id
    }
}
