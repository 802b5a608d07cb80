use thiserror::Error;

#[derive(Debug, Error)]
pub enum DockerError {
    #[error(
        "Docker is not installed or not in PATH.\n\
         Install Docker: https://docs.docker.com/get-docker/"
    )]
    NotInstalled,

    #[error(
        "Docker daemon is not running.\n\
         Start Docker Desktop or run: sudo systemctl start docker"
    )]
    DaemonNotRunning,

    #[error(
        "Docker permission denied.\n\
         On Linux, add your user to the docker group:\n\
         sudo usermod -aG docker $USER\n\
         Then log out and back in."
    )]
    PermissionDenied,

    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("Failed to list containers: {0}")]
    ListFailed(String),

    #[error("Failed to start container: {0}")]
    StartFailed(String),

    #[error("Failed to stop container: {0}")]
    StopFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DockerError {
    /// Map well-known docker CLI stderr messages to a specific variant,
    /// falling back to `fallback` for anything unrecognised.
    pub(crate) fn classify(stderr: &str, fallback: impl FnOnce(String) -> Self) -> Self {
        if stderr.contains("permission denied") {
            return DockerError::PermissionDenied;
        }
        if stderr.contains("Cannot connect to the Docker daemon") {
            return DockerError::DaemonNotRunning;
        }
        fallback(stderr.trim().to_string())
    }
}

pub type Result<T> = std::result::Result<T, DockerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_permission_denied() {
        let err = DockerError::classify(
            "Got permission denied while trying to connect to the Docker daemon socket",
            DockerError::ListFailed,
        );
        assert!(matches!(err, DockerError::PermissionDenied));
    }

    #[test]
    fn test_classify_daemon_not_running() {
        let err = DockerError::classify(
            "Cannot connect to the Docker daemon at unix:///var/run/docker.sock.",
            DockerError::StartFailed,
        );
        assert!(matches!(err, DockerError::DaemonNotRunning));
    }

    #[test]
    fn test_classify_falls_back_with_trimmed_message() {
        let err = DockerError::classify("  something broke\n", DockerError::StopFailed);
        match err {
            DockerError::StopFailed(msg) => assert_eq!(msg, "something broke"),
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
