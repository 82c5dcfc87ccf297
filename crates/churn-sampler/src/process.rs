//! Sampler backed by the host's process table.

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};
use tracing::debug;

use crate::{MemorySampler, SampleError, SampleResult, bytes_to_mb};

/// Samples the resident set size of the current process.
pub struct ProcessSampler {
    system: System,
    pid: Result<Pid, &'static str>,
}

impl Default for ProcessSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessSampler {
    /// Create a sampler for the current process.
    ///
    /// Never fails; if the pid cannot be resolved every sample reports it.
    #[must_use]
    pub fn new() -> Self {
        Self {
            system: System::new(),
            pid: sysinfo::get_current_pid(),
        }
    }

    /// Resident set size in bytes.
    pub fn resident_bytes(&mut self) -> SampleResult<u64> {
        let pid = self.pid.map_err(SampleError::NoCurrentPid)?;

        self.system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );

        self.system
            .process(pid)
            .map(|process| process.memory())
            .ok_or(SampleError::ProcessNotFound(pid.as_u32()))
    }
}

impl MemorySampler for ProcessSampler {
    fn sample(&mut self) -> SampleResult<f64> {
        self.resident_bytes().map(bytes_to_mb)
    }

    fn force_reclaim(&mut self) -> SampleResult<()> {
        trim_heap();
        Ok(())
    }
}

impl core::fmt::Debug for ProcessSampler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProcessSampler")
            .field("pid", &self.pid)
            .finish_non_exhaustive()
    }
}

/// Hand freed heap pages back to the OS so they stop counting as resident.
#[cfg(all(target_os = "linux", target_env = "gnu"))]
#[allow(unsafe_code)]
fn trim_heap() {
    // SAFETY: malloc_trim only walks allocator-internal free lists.
    let released = unsafe { libc::malloc_trim(0) } != 0;
    debug!(released, "malloc_trim");
}

/// Freed memory is already returned by the allocator on this platform.
#[cfg(not(all(target_os = "linux", target_env = "gnu")))]
fn trim_heap() {
    debug!("heap trim not available on this platform");
}
