//! Allocation budget of the drivers.
//!
//! Counts allocations made by the current thread only, so tests running in
//! parallel do not see each other's allocations.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use callback_dispatch_bench::dispatch::message_handler::code::{
    adapter, fn_ptr, generic, type_erased, BigCapture, Capture, Message, SmallCapture,
};
use callback_dispatch_bench::registry::build_registry;
use libc::c_void;

struct CountingAllocator;

thread_local! {
    static ALLOC_COUNT: Cell<usize> = const { Cell::new(0) };
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            let _ = ALLOC_COUNT.try_with(|c| c.set(c.get() + 1));
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
    }
}

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

/// Allocations made on this thread while running `f`.
fn allocations<R>(f: impl FnOnce() -> R) -> (usize, R) {
    let before = ALLOC_COUNT.with(|c| c.get());
    let result = f();
    let after = ALLOC_COUNT.with(|c| c.get());
    (after - before, result)
}

fn boxed_budget<C: Capture>(capture: C) {
    let mut out = 0i32;
    let (count, _) = allocations(|| {
        let out = &mut out;
        let handler: type_erased::MessageHandler<'_> =
            Box::new(move |msg: &Message| *out = out.wrapping_add(msg.i + capture.head()));
        type_erased::run(1337, handler);
    });
    assert!(count <= 1, "boxed_fn allocated {} times", count);

    let (count, _) = allocations(|| {
        let out = &mut out;
        type_erased::run_inlined(
            1337,
            Box::new(move |msg: &Message| *out = out.wrapping_add(msg.i + capture.head())),
        );
    });
    assert!(count <= 1, "boxed_fn_inline allocated {} times", count);
    assert_eq!(out, 2 * 1_836_500);
}

#[test]
fn boxed_fn_allocates_at_most_once_at_construction() {
    boxed_budget(SmallCapture::default());
    boxed_budget(BigCapture::default());
}

#[test]
fn prebuilt_boxed_handler_does_not_allocate_in_loop() {
    let mut out = 0i32;
    let capture = BigCapture::default();
    let handler: type_erased::MessageHandler<'_> =
        Box::new(|msg: &Message| out = out.wrapping_add(msg.i + capture.head()));

    let (count, _) = allocations(|| type_erased::run(1337, handler));
    assert_eq!(count, 0);
    assert_eq!(out, 1_836_500);
}

unsafe extern "C" fn accumulate(msg: *const Message, userdata: *mut c_void) {
    let out = unsafe { &mut *userdata.cast::<i32>() };
    *out += unsafe { (*msg).i };
}

#[test]
fn fn_ptr_does_not_allocate() {
    let mut out = 0i32;
    let (count, _) = allocations(|| unsafe {
        fn_ptr::run(1337, accumulate, (&mut out as *mut i32).cast())
    });
    assert_eq!(count, 0);
    assert_eq!(out, 1_836_500);
}

#[test]
fn generic_and_adapter_do_not_allocate() {
    let capture = BigCapture::default();

    let mut out = 0i32;
    let (count, _) = allocations(|| {
        generic::run(1337, |msg: &Message| out += msg.i + capture.head())
    });
    assert_eq!(count, 0);
    assert_eq!(out, 1_836_500);

    let mut out = 0i32;
    let (count, _) = allocations(|| {
        adapter::run(1337, |msg: &Message| out += msg.i + capture.head())
    });
    assert_eq!(count, 0);
    assert_eq!(out, 1_836_500);
}

#[test]
fn raw_pointer_cases_build_userdata_outside_samples() {
    let registry = build_registry();
    for id in ["fn_ptr/small", "fn_ptr/big", "c-fn_ptr/small", "c-fn_ptr/big"] {
        // The C cases are absent when no C compiler was available.
        let Some(case) = registry.find(id) else {
            continue;
        };
        let mut variant = case.build();
        (variant.run)();

        let (count, _) = allocations(|| {
            for _ in 0..5 {
                (variant.run)();
            }
        });
        assert_eq!(count, 0, "{} allocated while sampling", id);
    }
}
