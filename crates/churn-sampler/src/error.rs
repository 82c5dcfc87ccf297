//! Sampler error types.

use thiserror::Error;

/// Why a sample or reclamation request failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SampleError {
    /// The host would not tell us our own pid.
    #[error("current process id unavailable: {0}")]
    NoCurrentPid(&'static str),

    /// The process table did not contain the current process.
    #[error("process {0} not visible to the sampler")]
    ProcessNotFound(u32),

    /// Failure injected by a test sampler.
    #[error("scripted failure: {0}")]
    Scripted(String),
}

/// Result type for sampler operations.
pub type SampleResult<T> = Result<T, SampleError>;
