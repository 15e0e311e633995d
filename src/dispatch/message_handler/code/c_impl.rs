//! FFI bindings for the C driver (`fn_ptr.c`).

use super::fn_ptr::RawHandler;
use libc::c_void;

#[cfg(c_implementation_active)]
mod ffi {
    use super::{c_void, RawHandler};
    use libc::c_int;

    extern "C" {
        pub fn message_handler_c_iters() -> c_int;
        pub fn message_handler_c_fn_ptr(sys: c_int, cb: RawHandler, userdata: *mut c_void);
    }
}

/// Check if the C driver was compiled in
#[cfg(c_implementation_active)]
pub const C_IMPL_AVAILABLE: bool = true;

#[cfg(not(c_implementation_active))]
pub const C_IMPL_AVAILABLE: bool = false;

/// Loop bound compiled into the C driver.
#[cfg(c_implementation_active)]
pub fn iters() -> i32 {
    unsafe { ffi::message_handler_c_iters() }
}

/// C counterpart of [`super::fn_ptr::run`].
///
/// # Safety
///
/// Same contract as [`super::fn_ptr::run`].
#[cfg(c_implementation_active)]
pub unsafe fn run(sys: i32, cb: RawHandler, userdata: *mut c_void) {
    unsafe { ffi::message_handler_c_fn_ptr(sys as libc::c_int, cb, userdata) }
}

// Stub implementations for missing C compiler
#[cfg(not(c_implementation_active))]
pub fn iters() -> i32 {
    panic!("C driver not compiled (requires GCC, Clang or MSVC)")
}

/// # Safety
///
/// Never called: the C cases are only registered when the driver exists.
#[cfg(not(c_implementation_active))]
pub unsafe fn run(_sys: i32, _cb: RawHandler, _userdata: *mut c_void) {
    panic!("C driver not compiled (requires GCC, Clang or MSVC)")
}
