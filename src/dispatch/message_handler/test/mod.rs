//! Tests for the message handler drivers and benchmark cases

use crate::registry::BenchmarkRegistry;
use crate::utils::runner::verify_cases;

/// Run every registered case once on fresh state and compare its accumulator
/// with the reference value.
pub fn verify_all(registry: &BenchmarkRegistry) -> Result<(), String> {
    let cases: Vec<_> = registry.all().iter().collect();
    verify_cases(&cases).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::super::bench::{
        BoxedFn, BoxedFnInline, CFnPtr, DispatchStrategy, FnPtr, FnPtrAdapter, Generic,
    };
    use super::super::code::c_impl::{self, C_IMPL_AVAILABLE};
    use super::super::code::{
        adapter, expected_total, fn_ptr, generic, type_erased, BigCapture, Capture, Message,
        SmallCapture, ITERS, SYS,
    };
    use super::*;
    use crate::registry::build_registry;
    use libc::c_void;
    use rand::Rng;

    unsafe extern "C" fn record(msg: *const Message, userdata: *mut c_void) {
        let seen = unsafe { &mut *userdata.cast::<Vec<i32>>() };
        seen.push(unsafe { (*msg).i });
    }

    /// Payloads seen by each driver for one call with `sys`, labelled.
    fn payloads_per_driver(sys: i32) -> Vec<(&'static str, Vec<i32>)> {
        let mut out = Vec::new();

        let mut seen = Vec::new();
        type_erased::run(sys, Box::new(|msg: &Message| seen.push(msg.i)));
        out.push(("boxed_fn", seen));

        let mut seen = Vec::new();
        type_erased::run_inlined(sys, Box::new(|msg: &Message| seen.push(msg.i)));
        out.push(("boxed_fn_inline", seen));

        let mut seen = Vec::new();
        generic::run(sys, |msg: &Message| seen.push(msg.i));
        out.push(("generic", seen));

        let mut seen: Vec<i32> = Vec::new();
        unsafe { fn_ptr::run(sys, record, (&mut seen as *mut Vec<i32>).cast()) };
        out.push(("fn_ptr", seen));

        let mut seen = Vec::new();
        adapter::run(sys, |msg: &Message| seen.push(msg.i));
        out.push(("fn_ptr_adapter", seen));

        if C_IMPL_AVAILABLE {
            let mut seen: Vec<i32> = Vec::new();
            unsafe { c_impl::run(sys, record, (&mut seen as *mut Vec<i32>).cast()) };
            out.push(("c-fn_ptr", seen));
        }

        out
    }

    fn total<S: DispatchStrategy, C: Capture>(sys: i32, capture: C) -> i32 {
        let mut output = 0;
        S::invoke(sys, &mut output, capture);
        output
    }

    fn totals<C: Capture>(sys: i32, capture: C) -> Vec<(&'static str, i32)> {
        let mut out = vec![
            (BoxedFn::NAME, total::<BoxedFn, C>(sys, capture)),
            (BoxedFnInline::NAME, total::<BoxedFnInline, C>(sys, capture)),
            (Generic::NAME, total::<Generic, C>(sys, capture)),
            (FnPtr::NAME, total::<FnPtr, C>(sys, capture)),
            (FnPtrAdapter::NAME, total::<FnPtrAdapter, C>(sys, capture)),
        ];
        if C_IMPL_AVAILABLE {
            out.push((CFnPtr::NAME, total::<CFnPtr, C>(sys, capture)));
        }
        out
    }

    #[test]
    fn test_all_cases() {
        verify_all(&build_registry()).expect("All cases should produce the reference total");
    }

    #[test]
    fn test_invocation_count_and_payloads() {
        for sys in [0, SYS, -500] {
            let expected: Vec<i32> = (0..ITERS).map(|i| sys + i).collect();
            for (name, seen) in payloads_per_driver(sys) {
                assert_eq!(seen.len(), ITERS as usize, "{}: invocation count", name);
                assert_eq!(seen, expected, "{}: payloads for sys={}", name, sys);
            }
        }
    }

    #[test]
    fn test_reference_total_for_every_strategy() {
        for (name, value) in totals(SYS, SmallCapture::default()) {
            assert_eq!(value, 1_836_500, "{} (small)", name);
        }
        for (name, value) in totals(SYS, BigCapture::default()) {
            assert_eq!(value, 1_836_500, "{} (big)", name);
        }
    }

    #[test]
    fn test_cross_strategy_equivalence_random_inputs() {
        let mut rng = rand::rng();
        for _ in 0..20 {
            let sys = rng.random_range(-100_000..100_000);
            let head = rng.random_range(-1_000..1_000);
            let expected = expected_total(sys, head);

            let small = SmallCapture { i: [head] };
            let mut big = BigCapture::default();
            big.i[0] = head;
            // Only the first element may influence the result.
            for slot in big.i.iter_mut().skip(1) {
                *slot = rng.random();
            }

            for (name, value) in totals(sys, small) {
                assert_eq!(value, expected, "{} small sys={} head={}", name, sys, head);
            }
            for (name, value) in totals(sys, big) {
                assert_eq!(value, expected, "{} big sys={} head={}", name, sys, head);
            }
        }
    }

    fn continued_from<S: DispatchStrategy>(start: i32) -> i32 {
        let mut output = start;
        S::invoke(SYS, &mut output, BigCapture::default());
        output
    }

    #[test]
    fn test_invoke_continues_existing_accumulator() {
        for start in [0, 5, -1_836_500, i32::MAX - 10] {
            let expected = start.wrapping_add(1_836_500);
            assert_eq!(continued_from::<BoxedFn>(start), expected, "boxed_fn from {}", start);
            assert_eq!(continued_from::<Generic>(start), expected, "generic from {}", start);
            assert_eq!(continued_from::<FnPtr>(start), expected, "fn_ptr from {}", start);
            assert_eq!(
                continued_from::<FnPtrAdapter>(start),
                expected,
                "fn_ptr_adapter from {}",
                start
            );
            if C_IMPL_AVAILABLE {
                assert_eq!(continued_from::<CFnPtr>(start), expected, "c-fn_ptr from {}", start);
            }
        }
    }

    #[test]
    fn test_adapter_matches_generic() {
        let capture = SmallCapture { i: [7] };
        assert_eq!(
            total::<FnPtrAdapter, _>(42, capture),
            total::<Generic, _>(42, capture)
        );

        let mut big = BigCapture::default();
        big.i[0] = -3;
        assert_eq!(
            total::<FnPtrAdapter, _>(42, big),
            total::<Generic, _>(42, big)
        );
    }

    #[test]
    fn test_c_driver_bound_matches() {
        if !C_IMPL_AVAILABLE {
            return;
        }
        assert_eq!(c_impl::iters(), ITERS);
    }

    #[test]
    fn test_verify_all_reports_mismatch() {
        use crate::dispatch::message_handler::code::CaptureSize;
        use crate::registry::BenchmarkCase;
        use crate::utils::timer::Variant;

        fn build() -> Variant<'static> {
            Variant {
                name: "broken/small".to_string(),
                run: Box::new(|| crate::measure!(()).0),
            }
        }
        fn check(_sys: i32) -> i32 {
            -1
        }

        let mut registry = BenchmarkRegistry::new();
        registry.register(BenchmarkCase::new(
            "broken",
            "always wrong",
            CaptureSize::Small,
            build,
            check,
        ));
        let err = verify_all(&registry).unwrap_err();
        assert!(err.contains("broken/small"), "{}", err);
    }
}
