//! Process memory sampling.
//!
//! Samples are a trend signal, not an accounting: the harness compares how
//! the footprint moves across churn cycles. Every operation here may fail,
//! and callers are expected to keep going when it does.

mod error;
mod process;
pub mod sim;

pub use error::{SampleError, SampleResult};
pub use process::ProcessSampler;

/// Bytes per reported megabyte.
pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Convert a byte count to megabytes.
#[must_use]
pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

/// Reads the process footprint and asks the host to reclaim memory.
pub trait MemorySampler {
    /// Current process memory footprint in MB.
    fn sample(&mut self) -> SampleResult<f64>;

    /// Request a full reclamation pass before the next sample.
    fn force_reclaim(&mut self) -> SampleResult<()>;
}

impl<S: MemorySampler + ?Sized> MemorySampler for Box<S> {
    fn sample(&mut self) -> SampleResult<f64> {
        (**self).sample()
    }

    fn force_reclaim(&mut self) -> SampleResult<()> {
        (**self).force_reclaim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_to_mb() {
        assert!((bytes_to_mb(1024 * 1024) - 1.0).abs() < f64::EPSILON);
        assert!((bytes_to_mb(512 * 1024) - 0.5).abs() < f64::EPSILON);
        assert!(bytes_to_mb(0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_boxed_sampler_delegates() {
        let mut boxed: Box<dyn MemorySampler> = Box::new(sim::ScriptedSampler::constant(12.5));

        assert!(boxed.force_reclaim().is_ok());
        assert!((boxed.sample().unwrap() - 12.5).abs() < f64::EPSILON);
    }
}
