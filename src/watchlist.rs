//! Watchlist store - a free-form text blob persisted as a flat file
//!
//! Membership is raw substring containment against the whole blob, so an
//! entry like `web10` also watches a container whose id is `web1`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

#[derive(Debug, Error)]
pub enum WatchlistError {
    #[error("Failed to read watchlist {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write watchlist {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct Watchlist {
    path: PathBuf,
    text: Option<String>,
}

impl Watchlist {
    /// An unset watchlist bound to `path`. Call [`Watchlist::load`] to read it.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            text: None,
        }
    }

    /// Bind to the watchlist location named by `config` and load it.
    pub fn open(config: &Config, config_dir: &Path) -> Self {
        let mut watchlist = Self::new(config.watchlist_path(config_dir));
        watchlist.load();
        watchlist
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Read the whole file into memory. A missing or unreadable file leaves
    /// the watchlist unset.
    pub fn load(&mut self) {
        if let Err(e) = self.try_load() {
            warn!("{}", e);
        }
    }

    fn try_load(&mut self) -> Result<(), WatchlistError> {
        self.text = None;
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                self.text = Some(content);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No watchlist at {}", self.path.display());
                Ok(())
            }
            Err(source) => Err(WatchlistError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Replace the blob and write it out. The in-memory value is updated even
    /// when the write fails; the error is only reported.
    pub fn save(&mut self, text: &str) -> Result<(), WatchlistError> {
        self.text = Some(text.to_string());

        let write = || -> io::Result<()> {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&self.path, text)
        };

        write().map_err(|source| {
            warn!("Failed to save watchlist to {}: {}", self.path.display(), source);
            WatchlistError::Write {
                path: self.path.clone(),
                source,
            }
        })
    }

    pub fn contains(&self, candidate: &str) -> bool {
        match &self.text {
            Some(text) => !candidate.is_empty() && text.contains(candidate),
            None => false,
        }
    }

    /// Entries as a user would read them, split on commas and whitespace.
    /// Matching never uses this.
    pub fn entries(&self) -> Vec<&str> {
        self.text
            .as_deref()
            .unwrap_or_default()
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Append `entry` on its own line unless the blob already contains it.
    pub fn add(&mut self, entry: &str) -> Result<bool, WatchlistError> {
        let entry = entry.trim();
        if entry.is_empty() || self.entries().contains(&entry) {
            return Ok(false);
        }

        let mut text = self.text.clone().unwrap_or_default();
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(entry);
        text.push('\n');
        self.save(&text)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn watchlist_with(text: &str) -> Watchlist {
        let mut watchlist = Watchlist::new("/nonexistent/dockermonitor.cfg");
        watchlist.text = Some(text.to_string());
        watchlist
    }

    #[test]
    fn test_contains_substring() {
        let watchlist = watchlist_with("web1,db1");
        assert!(watchlist.contains("web1"));
        assert!(watchlist.contains("db1"));
        assert!(watchlist.contains("b1,d"));
        assert!(!watchlist.contains("cache1"));
    }

    #[test]
    fn test_contains_matches_inside_unrelated_token() {
        let watchlist = watchlist_with("my-postgres-backup");
        assert!(watchlist.contains("gres"));
    }

    #[test]
    fn test_contains_empty_candidate_is_false() {
        let watchlist = watchlist_with("anything");
        assert!(!watchlist.contains(""));
    }

    #[test]
    fn test_contains_unset_is_false() {
        let watchlist = Watchlist::new("/nonexistent/dockermonitor.cfg");
        assert!(watchlist.text().is_none());
        assert!(!watchlist.contains("web1"));
    }

    #[test]
    fn test_contains_is_case_sensitive() {
        let watchlist = watchlist_with("Web1");
        assert!(!watchlist.contains("web1"));
    }

    #[test]
    fn test_load_missing_file_leaves_unset() {
        let temp = TempDir::new().unwrap();
        let mut watchlist = Watchlist::new(temp.path().join("missing.cfg"));
        watchlist.load();
        assert!(watchlist.text().is_none());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dockermonitor.cfg");

        let mut watchlist = Watchlist::new(&path);
        watchlist.save("a,b,c").unwrap();

        let mut reloaded = Watchlist::new(&path);
        reloaded.load();
        assert_eq!(reloaded.text(), Some("a,b,c"));
    }

    #[test]
    fn test_save_replaces_previous_contents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dockermonitor.cfg");

        let mut watchlist = Watchlist::new(&path);
        watchlist.save("a much longer first version").unwrap();
        watchlist.save("short").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "short");
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("dockermonitor.cfg");

        let mut watchlist = Watchlist::new(&path);
        watchlist.save("web1").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_save_failure_still_updates_memory() {
        let temp = TempDir::new().unwrap();
        // A directory where the file should be makes the write fail
        let path = temp.path().join("taken");
        fs::create_dir_all(&path).unwrap();

        let mut watchlist = Watchlist::new(&path);
        let result = watchlist.save("web1");

        assert!(matches!(result, Err(WatchlistError::Write { .. })));
        assert_eq!(watchlist.text(), Some("web1"));
        assert!(watchlist.contains("web1"));
    }

    #[test]
    fn test_entries_splits_on_commas_and_whitespace() {
        let watchlist = watchlist_with("web1, db1\ncache1\n\n");
        assert_eq!(watchlist.entries(), vec!["web1", "db1", "cache1"]);
    }

    #[test]
    fn test_add_appends_new_entry() {
        let temp = TempDir::new().unwrap();
        let mut watchlist = Watchlist::new(temp.path().join("dockermonitor.cfg"));
        watchlist.save("web1").unwrap();

        assert!(watchlist.add("db1").unwrap());
        assert_eq!(watchlist.text(), Some("web1\ndb1\n"));
    }

    #[test]
    fn test_add_skips_existing_entry() {
        let temp = TempDir::new().unwrap();
        let mut watchlist = Watchlist::new(temp.path().join("dockermonitor.cfg"));
        watchlist.save("web1,db1").unwrap();

        assert!(!watchlist.add("db1").unwrap());
        assert!(!watchlist.add("  ").unwrap());
        assert_eq!(watchlist.text(), Some("web1,db1"));
    }
}
