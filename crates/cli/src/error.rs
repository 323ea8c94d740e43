//! CLI errors and exit codes for scripting.
//!
//! Responsibilities:
//! - Define CLI-level errors that are not configuration I/O failures.
//! - Map errors in an `anyhow` chain to structured exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-5 are reserved for specific error categories.

use nestcfg::ConfigError;
use thiserror::Error;

/// Errors raised by command handlers.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("No value at '{0}'")]
    NotFound(String),

    #[error("'{path}' is not a section")]
    NotASection { path: String },

    #[error("Invalid value '{value}': {message}")]
    InvalidValue { value: String, message: String },
}

/// Structured exit codes for nestcfg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Command completed successfully.
    #[allow(dead_code)]
    Success = 0,

    /// Unhandled or generic failure.
    GeneralError = 1,

    /// The configuration file could not be created, read or parsed.
    LoadFailed = 2,

    /// The configuration file could not be encoded or written.
    SaveFailed = 3,

    /// The requested path holds no value.
    NotFound = 4,

    /// A value given on the command line could not be parsed.
    InvalidValue = 5,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        if err.is_save_error() {
            ExitCode::SaveFailed
        } else {
            ExitCode::LoadFailed
        }
    }
}

impl From<&CliError> for ExitCode {
    fn from(err: &CliError) -> Self {
        match err {
            CliError::NotFound(_) | CliError::NotASection { .. } => ExitCode::NotFound,
            CliError::InvalidValue { .. } => ExitCode::InvalidValue,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(err) = cause.downcast_ref::<CliError>() {
                return ExitCode::from(err);
            }
            if let Some(err) = cause.downcast_ref::<ConfigError>() {
                return ExitCode::from(err);
            }
        }
        ExitCode::GeneralError
    }
}
