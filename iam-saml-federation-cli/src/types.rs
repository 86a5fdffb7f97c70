//! CLI-specific type definitions.
//!
//! This module contains types that are specific to the CLI binary and should
//! not be part of the core library.

use clap::ValueEnum;
use iam_saml_federation_core::DesiredState;

/// Exit codes for the CLI application.
///
/// These codes follow the documented convention where:
/// - 0 indicates the provider is in the desired state (changed or not)
/// - 1 indicates the request was rejected before any AWS call
/// - 2 indicates an AWS call or client setup failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Provider converged
    Success,

    /// Invalid arguments or desired state
    InvalidInput,

    /// Remote failure
    Failure,
}

impl ExitCode {
    /// Convert to the integer exit code for process::exit()
    pub fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::InvalidInput => 1,
            Self::Failure => 2,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(exit_code: ExitCode) -> Self {
        exit_code.code()
    }
}

/// `--state` values
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StateArg {
    Present,
    Absent,
}

impl From<StateArg> for DesiredState {
    fn from(value: StateArg) -> Self {
        match value {
            StateArg::Present => Self::Present,
            StateArg::Absent => Self::Absent,
        }
    }
}
