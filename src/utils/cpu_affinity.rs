//! Thread pinning for the duration of a measurement.
//!
//! On Linux the calling thread is pinned to the core it is currently running
//! on (via `sched_setaffinity`) and its previous mask is restored afterwards.
//! Other platforms get a no-op guard that reports itself as unpinned.

#[cfg(target_os = "linux")]
mod platform {
    /// Affinity mask to restore when the guard is dropped
    pub struct Saved(libc::cpu_set_t);

    pub fn current_cpu() -> Option<usize> {
        let cpu = unsafe { libc::sched_getcpu() };
        usize::try_from(cpu).ok()
    }

    pub fn save() -> Option<Saved> {
        unsafe {
            let mut set: libc::cpu_set_t = std::mem::zeroed();
            (libc::sched_getaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &mut set) == 0)
                .then_some(Saved(set))
        }
    }

    pub fn pin(core_id: usize) -> bool {
        unsafe {
            let mut set: libc::cpu_set_t = std::mem::zeroed();
            libc::CPU_ZERO(&mut set);
            libc::CPU_SET(core_id, &mut set);
            libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &set) == 0
        }
    }

    pub fn restore(saved: &Saved) -> bool {
        unsafe {
            libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &saved.0) == 0
        }
    }
}

#[cfg(not(target_os = "linux"))]
mod platform {
    #[allow(dead_code)]
    pub struct Saved;

    pub fn current_cpu() -> Option<usize> {
        None
    }
    pub fn save() -> Option<Saved> {
        None
    }
    pub fn pin(_core_id: usize) -> bool {
        false
    }
    pub fn restore(_saved: &Saved) -> bool {
        true
    }
}

/// RAII guard for CPU pinning - pins on creation, restores on drop.
pub struct CpuPinGuard {
    pinned_core: Option<usize>,
    saved: Option<platform::Saved>,
}

impl CpuPinGuard {
    /// Pin to the core the thread is running on, falling back to core 0.
    pub fn new() -> Self {
        let Some(saved) = platform::save() else {
            return Self {
                pinned_core: None,
                saved: None,
            };
        };

        let core = platform::current_cpu().unwrap_or(0);
        if platform::pin(core) {
            Self {
                pinned_core: Some(core),
                saved: Some(saved),
            }
        } else {
            Self {
                pinned_core: None,
                saved: None,
            }
        }
    }

    /// Get the core ID this thread is pinned to, if any.
    pub fn core_id(&self) -> Option<usize> {
        self.pinned_core
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned_core.is_some()
    }
}

impl Drop for CpuPinGuard {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            if !platform::restore(&saved) {
                tracing::warn!("failed to restore CPU affinity");
            }
        }
    }
}

impl Default for CpuPinGuard {
    fn default() -> Self {
        Self::new()
    }
}
