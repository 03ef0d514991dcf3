//! Top-level error model: distinct from [`crate::device::error::Error`],
//! which only covers ioctl/I/O failures on the device layer. This enum
//! covers everything that can make the daemon itself fail to start or run,
//! each mapped to a stable process exit code in [`ExitCode`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to acquire a required resource: {0}")]
    Resource(#[from] crate::device::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Stable exit codes, checked by callers scripting against this daemon.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    Config = 64,
    Resource = 71,
    Io = 74,
    Internal = 70,
}

impl DaemonError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            DaemonError::Config(_) => ExitCode::Config,
            DaemonError::Resource(_) => ExitCode::Resource,
            DaemonError::Io(_) => ExitCode::Io,
            DaemonError::Internal(_) => ExitCode::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_and_resource_exit_codes_are_distinct() {
        let io = DaemonError::Io(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        let resource = DaemonError::Resource(crate::device::Error::InvalidEvent);
        assert_eq!(io.exit_code(), ExitCode::Io);
        assert_eq!(resource.exit_code(), ExitCode::Resource);
        assert_ne!(io.exit_code(), resource.exit_code());
    }
}
