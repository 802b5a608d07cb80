pub mod error;
#[cfg(any(test, feature = "test-support"))]
pub mod fake;
pub mod runtime;

pub use error::{DockerError, Result};
pub use runtime::{ContainerRuntime, Docker, LIST_FORMAT};
