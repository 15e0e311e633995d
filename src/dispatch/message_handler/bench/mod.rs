//! Benchmark cases: every strategy crossed with every capture size.
//!
//! Each case owns one zeroed capture and one accumulator for its whole run.
//! The closure strategies build their callback inside every timed sample,
//! closing over the accumulator by reference and the capture by value. The
//! raw function pointer strategies build their userdata once, when the case
//! is built, and hand the same pointer to every sample. Either way the
//! capture goes through `black_box` after the driver returns so neither the
//! capture nor the loop can be proven dead.

use super::code::c_impl::C_IMPL_AVAILABLE;
use super::code::fn_ptr::RawHandler;
use super::code::{
    adapter, c_impl, fn_ptr, generic, type_erased, BigCapture, Capture, Message, SmallCapture,
    SYS,
};
use crate::registry::{case_id, BenchmarkCase, BenchmarkRegistry};
use crate::utils::timer::Variant;
use libc::c_void;
use std::hint::black_box;

/// A calling convention under test.
pub trait DispatchStrategy: Sized + 'static {
    const NAME: &'static str;
    const DESCRIPTION: &'static str;

    /// Build this strategy's callback over `out` and `capture` and run the
    /// driver once.
    fn invoke<C: Capture>(sys: i32, out: &mut i32, capture: C);

    /// Timed body of the case for capture `C`.
    fn variant<C: Capture>() -> Variant<'static> {
        let mut output = 0i32;
        let capture = C::default();
        timed::<Self, C>(move || {
            Self::invoke(SYS, &mut output, capture);
            black_box(&capture);
        })
    }
}

fn timed<S: DispatchStrategy, C: Capture>(mut body: impl FnMut() + 'static) -> Variant<'static> {
    Variant {
        name: case_id(S::NAME, C::SIZE),
        run: Box::new(move || crate::measure!(body()).0),
    }
}

pub struct BoxedFn;
pub struct BoxedFnInline;
pub struct Generic;
pub struct FnPtr;
pub struct FnPtrAdapter;
pub struct CFnPtr;

impl DispatchStrategy for BoxedFn {
    const NAME: &'static str = "boxed_fn";
    const DESCRIPTION: &'static str = "Box<dyn FnMut> through an out-of-line driver";

    fn invoke<C: Capture>(sys: i32, out: &mut i32, capture: C) {
        type_erased::run(
            sys,
            Box::new(move |msg: &Message| *out = out.wrapping_add(msg.i + capture.head())),
        );
    }
}

impl DispatchStrategy for BoxedFnInline {
    const NAME: &'static str = "boxed_fn_inline";
    const DESCRIPTION: &'static str = "Box<dyn FnMut> through an always-inlined driver";

    fn invoke<C: Capture>(sys: i32, out: &mut i32, capture: C) {
        type_erased::run_inlined(
            sys,
            Box::new(move |msg: &Message| *out = out.wrapping_add(msg.i + capture.head())),
        );
    }
}

impl DispatchStrategy for Generic {
    const NAME: &'static str = "generic";
    const DESCRIPTION: &'static str = "Monomorphized FnMut parameter (direct call)";

    fn invoke<C: Capture>(sys: i32, out: &mut i32, capture: C) {
        generic::run(sys, move |msg: &Message| {
            *out = out.wrapping_add(msg.i + capture.head())
        });
    }
}

/// Userdata for the raw function pointer cases.
#[repr(C)]
struct UserData<C> {
    out: i32,
    cap: C,
}

impl<C: Capture> UserData<C> {
    fn as_raw(&mut self) -> *mut c_void {
        (self as *mut Self).cast()
    }
}

unsafe extern "C" fn accumulate<C: Capture>(msg: *const Message, userdata: *mut c_void) {
    // SAFETY: the cases below always pass a `UserData<C>` for this `C`.
    let data = unsafe { &mut *userdata.cast::<UserData<C>>() };
    let msg = unsafe { &*msg };
    data.out = data.out.wrapping_add(msg.i + data.cap.head());
}

/// Run `driver` once over fresh userdata seeded from `out`, then store the
/// accumulator back into `out`.
fn invoke_raw<C: Capture>(out: &mut i32, capture: C, driver: impl FnOnce(RawHandler, *mut c_void)) {
    let mut data = UserData { out: *out, cap: capture };
    let cb: RawHandler = accumulate::<C>;
    driver(cb, data.as_raw());
    *out = data.out;
}

/// Timed body whose userdata is built here, once, and reused by every sample.
fn raw_variant<S: DispatchStrategy, C: Capture>(
    mut driver: impl FnMut(RawHandler, *mut c_void) + 'static,
) -> Variant<'static> {
    let mut data = UserData {
        out: 0,
        cap: C::default(),
    };
    let cb: RawHandler = accumulate::<C>;
    timed::<S, C>(move || {
        driver(cb, data.as_raw());
        black_box(&data.cap);
    })
}

impl DispatchStrategy for FnPtr {
    const NAME: &'static str = "fn_ptr";
    const DESCRIPTION: &'static str = "extern \"C\" fn + *mut c_void userdata";

    fn invoke<C: Capture>(sys: i32, out: &mut i32, capture: C) {
        // SAFETY: userdata is the `UserData<C>` that `accumulate::<C>` expects.
        invoke_raw(out, capture, |cb, userdata| unsafe { fn_ptr::run(sys, cb, userdata) });
    }

    fn variant<C: Capture>() -> Variant<'static> {
        // SAFETY: as in `invoke`.
        raw_variant::<Self, C>(|cb, userdata| unsafe { fn_ptr::run(SYS, cb, userdata) })
    }
}

impl DispatchStrategy for FnPtrAdapter {
    const NAME: &'static str = "fn_ptr_adapter";
    const DESCRIPTION: &'static str = "Generic closure bridged into fn_ptr via a trampoline";

    fn invoke<C: Capture>(sys: i32, out: &mut i32, capture: C) {
        adapter::run(sys, move |msg: &Message| {
            *out = out.wrapping_add(msg.i + capture.head())
        });
    }
}

impl DispatchStrategy for CFnPtr {
    const NAME: &'static str = "c-fn_ptr";
    const DESCRIPTION: &'static str = "fn_ptr driver compiled from C, Rust callback";

    fn invoke<C: Capture>(sys: i32, out: &mut i32, capture: C) {
        // SAFETY: same userdata contract as `FnPtr`.
        invoke_raw(out, capture, |cb, userdata| unsafe { c_impl::run(sys, cb, userdata) });
    }

    fn variant<C: Capture>() -> Variant<'static> {
        // SAFETY: same userdata contract as `FnPtr`.
        raw_variant::<Self, C>(|cb, userdata| unsafe { c_impl::run(SYS, cb, userdata) })
    }
}

fn check<S: DispatchStrategy, C: Capture>(sys: i32) -> i32 {
    let mut output = 0i32;
    S::invoke(sys, &mut output, C::default());
    output
}

/// The registered case for strategy `S` and capture `C`.
pub fn case<S: DispatchStrategy, C: Capture>() -> BenchmarkCase {
    BenchmarkCase::new(S::NAME, S::DESCRIPTION, C::SIZE, S::variant::<C>, check::<S, C>)
}

/// Add every case, small before big, strategies in a fixed order.
pub fn register_cases(registry: &mut BenchmarkRegistry) {
    registry.register(case::<BoxedFn, SmallCapture>());
    registry.register(case::<BoxedFn, BigCapture>());

    registry.register(case::<BoxedFnInline, SmallCapture>());
    registry.register(case::<BoxedFnInline, BigCapture>());

    registry.register(case::<Generic, SmallCapture>());
    registry.register(case::<Generic, BigCapture>());

    registry.register(case::<FnPtr, SmallCapture>());
    registry.register(case::<FnPtr, BigCapture>());

    registry.register(case::<FnPtrAdapter, SmallCapture>());
    registry.register(case::<FnPtrAdapter, BigCapture>());

    if C_IMPL_AVAILABLE {
        registry.register(case::<CFnPtr, SmallCapture>());
        registry.register(case::<CFnPtr, BigCapture>());
    } else {
        tracing::warn!("C driver not compiled in, skipping {} cases", CFnPtr::NAME);
    }
}
