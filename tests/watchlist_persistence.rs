//! Integration tests for the watchlist file and config directory wiring

use docker_monitor::config::{Config, CONFIG_DIR_ENV};
use docker_monitor::monitor::Monitor;
use docker_monitor::watchlist::Watchlist;
use serial_test::serial;
use std::fs;

#[test]
fn test_save_then_load_from_persisted_path() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("dockermonitor.cfg");

    Watchlist::new(&path).save("a,b,c").unwrap();

    let mut reloaded = Watchlist::new(&path);
    reloaded.load();
    assert_eq!(reloaded.text(), Some("a,b,c"));
}

#[test]
fn test_monitor_reads_watchlist_from_config_dir() {
    let temp = tempfile::TempDir::new().unwrap();
    fs::write(temp.path().join("dockermonitor.cfg"), "web1\ndb1\n").unwrap();

    let monitor = Monitor::open(Some(temp.path())).unwrap();
    assert!(monitor.watchlist().contains("db1"));
    assert_eq!(monitor.watchlist().entries(), vec!["web1", "db1"]);
}

#[test]
fn test_settings_redirect_watchlist_and_binary() {
    let temp = tempfile::TempDir::new().unwrap();
    let custom = temp.path().join("elsewhere").join("watch.txt");
    fs::create_dir_all(custom.parent().unwrap()).unwrap();
    fs::write(&custom, "redis").unwrap();

    let mut config = Config::default();
    config.docker.binary = "podman".to_string();
    config.watchlist.path = Some(custom.clone());
    config.save(temp.path()).unwrap();

    let monitor = Monitor::open(Some(temp.path())).unwrap();
    assert_eq!(monitor.watchlist().path(), custom.as_path());
    assert_eq!(monitor.watchlist().text(), Some("redis"));
    assert_eq!(monitor.runtime().binary(), "podman");
}

#[test]
fn test_missing_watchlist_is_not_an_error() {
    let temp = tempfile::TempDir::new().unwrap();
    let monitor = Monitor::open(Some(temp.path())).unwrap();
    assert!(monitor.watchlist().text().is_none());
    assert!(!monitor.watchlist().contains("anything"));
}

#[test]
#[serial]
fn test_config_dir_env_var() {
    let temp = tempfile::TempDir::new().unwrap();
    fs::write(temp.path().join("dockermonitor.cfg"), "from-env").unwrap();
    std::env::set_var(CONFIG_DIR_ENV, temp.path());

    let monitor = Monitor::open(None);
    std::env::remove_var(CONFIG_DIR_ENV);

    assert_eq!(monitor.unwrap().watchlist().text(), Some("from-env"));
}
