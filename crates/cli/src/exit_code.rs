//! Exit code definitions for the sharelink CLI
//!
//! Per-file link failures never change the exit code; only problems that stop
//! the run as a whole do.

use sharelink_core::Error;

/// Exit codes for the sharelink application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Run completed (individual files may still have failed)
    Success = 0,

    /// General/unspecified error, e.g. an unreadable scan directory
    GeneralError = 1,

    /// Configuration error: bad config file, unsupported schema, bad URL
    UsageError = 2,

    /// Network error while setting up the client
    NetworkError = 3,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Create exit code from i32 value
    ///
    /// Returns None if the value doesn't correspond to a known exit code.
    pub const fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            1 => Some(Self::GeneralError),
            2 => Some(Self::UsageError),
            3 => Some(Self::NetworkError),
            _ => None,
        }
    }

    /// Exit code for an error that stopped the run
    pub fn from_error(error: &Error) -> Self {
        Self::from_i32(error.exit_code()).unwrap_or(Self::GeneralError)
    }
}
