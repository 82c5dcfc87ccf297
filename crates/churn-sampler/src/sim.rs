//! Deterministic sampler for tests.

use std::collections::VecDeque;

use crate::{MemorySampler, SampleError, SampleResult};

/// Replays scripted samples, then settles on a steady value.
///
/// `None` entries are sampling failures.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSampler {
    script: VecDeque<Option<f64>>,
    steady: Option<f64>,
    fail_reclaim: bool,
    samples_taken: usize,
    reclaim_calls: usize,
}

impl ScriptedSampler {
    /// Always reports `mb`.
    #[must_use]
    pub fn constant(mb: f64) -> Self {
        Self {
            steady: Some(mb),
            ..Self::default()
        }
    }

    /// Every sample fails.
    #[must_use]
    pub fn failing() -> Self {
        Self::default()
    }

    /// Replay `script` first, then fall back to `steady`.
    #[must_use]
    pub fn scripted(script: impl IntoIterator<Item = Option<f64>>, steady: Option<f64>) -> Self {
        Self {
            script: script.into_iter().collect(),
            steady,
            ..Self::default()
        }
    }

    /// Make every reclamation request fail.
    #[must_use]
    pub fn with_failing_reclaim(mut self) -> Self {
        self.fail_reclaim = true;
        self
    }

    #[must_use]
    pub const fn samples_taken(&self) -> usize {
        self.samples_taken
    }

    #[must_use]
    pub const fn reclaim_calls(&self) -> usize {
        self.reclaim_calls
    }
}

impl MemorySampler for ScriptedSampler {
    fn sample(&mut self) -> SampleResult<f64> {
        self.samples_taken += 1;
        let next = self.script.pop_front().unwrap_or(self.steady);
        next.ok_or_else(|| SampleError::Scripted(format!("sample #{}", self.samples_taken)))
    }

    fn force_reclaim(&mut self) -> SampleResult<()> {
        self.reclaim_calls += 1;
        if self.fail_reclaim {
            return Err(SampleError::Scripted("reclaim refused".into()));
        }
        Ok(())
    }
}
