//! Manual type erasure: a plain function pointer plus an opaque userdata
//! pointer, the way a C API takes a callback.
//!
//! The handler signature uses the C ABI so the same callback can be passed
//! to the C driver in [`super::c_impl`].

use super::{Message, ITERS};
use libc::c_void;

/// Raw handler. `msg` is valid for the duration of the call; `userdata` is
/// whatever the caller handed to the driver.
pub type RawHandler = unsafe extern "C" fn(msg: *const Message, userdata: *mut c_void);

/// Invoke `cb` [`ITERS`] times, forwarding `userdata` untouched.
///
/// # Safety
///
/// `cb` must be sound to call with `userdata`: the pointer has to point to
/// the exact type `cb` casts it back to, be valid for the whole call and not
/// be aliased by any other live reference while the driver runs.
#[inline(never)]
pub unsafe fn run(sys: i32, cb: RawHandler, userdata: *mut c_void) {
    for i in 0..ITERS {
        let msg = Message::new(sys + i);
        unsafe { cb(&msg, userdata) };
    }
}
