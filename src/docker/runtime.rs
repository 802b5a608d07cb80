use std::process::Command;

use super::error::{DockerError, Result};
use crate::config::DockerConfig;

/// Go template handed to `docker ps --format`, producing one JSON object
/// per container.
pub const LIST_FORMAT: &str =
    r#"{"ID":"{{.ID}}","Name":"{{.Names}}","State":"{{.State}}","Status":"{{.Status}}"}"#;

/// The three external invocations the monitor needs from a container engine.
pub trait ContainerRuntime {
    /// Raw newline-delimited JSON listing, one container per line.
    fn list_containers(&self) -> Result<String>;

    fn start_container(&self, id: &str) -> Result<()>;

    fn stop_container(&self, id: &str) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct Docker {
    binary: String,
    include_stopped: bool,
}

impl Default for Docker {
    fn default() -> Self {
        Self {
            binary: "docker".to_string(),
            include_stopped: true,
        }
    }
}

impl Docker {
    pub fn from_config(config: &DockerConfig) -> Self {
        Self {
            binary: config.binary.clone(),
            include_stopped: config.include_stopped,
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    /// Arguments for the listing invocation. Separated out for unit testing.
    pub(crate) fn list_args(&self) -> Vec<&str> {
        let mut args = vec!["ps"];
        if self.include_stopped {
            args.push("-a");
        }
        args.push("--format");
        args.push(LIST_FORMAT);
        args
    }

    fn command(&self) -> Command {
        Command::new(&self.binary)
    }
}

impl ContainerRuntime for Docker {
    fn list_containers(&self) -> Result<String> {
        let args = self.list_args();
        tracing::debug!("{} {}", self.binary, args.join(" "));

        let output = match self.command().args(&args).output() {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DockerError::NotInstalled)
            }
            Err(e) => return Err(e.into()),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::debug!("stderr: {}", stderr);
            return Err(DockerError::classify(&stderr, DockerError::ListFailed));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn start_container(&self, id: &str) -> Result<()> {
        tracing::debug!("{} start {}", self.binary, id);
        let output = self.command().args(["start", id]).output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("No such container") {
                return Err(DockerError::ContainerNotFound(id.to_string()));
            }
            return Err(DockerError::classify(&stderr, DockerError::StartFailed));
        }

        Ok(())
    }

    fn stop_container(&self, id: &str) -> Result<()> {
        tracing::debug!("{} stop {}", self.binary, id);
        let output = self.command().args(["stop", id]).output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("No such container") {
                return Err(DockerError::ContainerNotFound(id.to_string()));
            }
            return Err(DockerError::classify(&stderr, DockerError::StopFailed));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_docker_if_available() -> Option<Docker> {
        let docker = Docker::default();
        if docker.is_available() {
            Some(docker)
        } else {
            None
        }
    }

    #[test]
    fn test_list_args_include_stopped() {
        let docker = Docker::default();
        assert_eq!(docker.list_args(), vec!["ps", "-a", "--format", LIST_FORMAT]);
    }

    #[test]
    fn test_list_args_running_only() {
        let docker = Docker::from_config(&DockerConfig {
            binary: "podman".to_string(),
            include_stopped: false,
        });
        assert_eq!(docker.binary(), "podman");
        assert_eq!(docker.list_args(), vec!["ps", "--format", LIST_FORMAT]);
    }

    #[test]
    fn test_list_format_is_valid_json_shape() {
        let sample = LIST_FORMAT
            .replace("{{.ID}}", "abc")
            .replace("{{.Names}}", "web")
            .replace("{{.State}}", "running")
            .replace("{{.Status}}", "Up 2 hours");
        let value: serde_json::Value = serde_json::from_str(&sample).unwrap();
        assert_eq!(value["Name"], "web");
    }

    #[test]
    fn test_missing_binary_reports_not_installed() {
        let docker = Docker::from_config(&DockerConfig {
            binary: "definitely-not-a-real-docker-binary".to_string(),
            include_stopped: true,
        });
        assert!(!docker.is_available());
        assert!(matches!(
            docker.list_containers(),
            Err(DockerError::NotInstalled)
        ));
    }

    #[test]
    fn test_list_containers_against_local_daemon() {
        if let Some(docker) = get_docker_if_available() {
            // Daemon may be down even when the CLI is installed
            if let Ok(listing) = docker.list_containers() {
                for line in listing.lines().filter(|l| !l.trim().is_empty()) {
                    assert!(serde_json::from_str::<serde_json::Value>(line).is_ok());
                }
            }
        }
    }

    #[test]
    fn test_stop_unknown_container_fails() {
        if let Some(docker) = get_docker_if_available() {
            assert!(docker
                .stop_container("nonexistent-container-that-does-not-exist")
                .is_err());
        }
    }
}
