//! Cycle counter access for x86/x86_64 (RDTSC) and aarch64 (CNTVCT_EL0).

/// Read the current CPU cycle counter / timer.
#[inline(always)]
pub fn read_cycles() -> u64 {
    #[cfg(target_arch = "x86_64")]
    {
        use core::arch::x86_64::{_mm_lfence, _rdtsc};
        // LFENCE on both sides keeps the measured loop from leaking past the read
        unsafe {
            _mm_lfence();
            let cycles = _rdtsc();
            _mm_lfence();
            cycles
        }
    }

    #[cfg(target_arch = "x86")]
    {
        use core::arch::x86::{_mm_lfence, _rdtsc};
        unsafe {
            _mm_lfence();
            let cycles = _rdtsc();
            _mm_lfence();
            cycles
        }
    }

    #[cfg(target_arch = "aarch64")]
    {
        // Fixed-frequency virtual counter, not core cycles
        let val: u64;
        unsafe {
            core::arch::asm!("isb", "mrs {}, cntvct_el0", out(reg) val, options(nostack));
        }
        val
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64")))]
    {
        compile_error!("cpu_cycles feature requires x86, x86_64, or aarch64 architecture");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hint::black_box;

    #[test]
    fn test_read_cycles_roughly_monotonic() {
        let c1 = read_cycles();
        let mut sum = 0u64;
        for i in 0..10_000u64 {
            sum = black_box(sum.wrapping_add(black_box(i)));
        }
        let c2 = read_cycles();

        assert!(sum > 0);
        assert!(c2 >= c1 || c1 - c2 < 1000, "counter went backwards: {} -> {}", c1, c2);
    }
}
