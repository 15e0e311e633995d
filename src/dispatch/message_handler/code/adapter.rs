//! Generic functor routed through the function-pointer ABI.
//!
//! A trampoline is instantiated per closure type; the closure's address
//! travels as userdata and the trampoline casts it back.

use super::fn_ptr;
use super::Message;
use libc::c_void;

unsafe extern "C" fn trampoline<F>(msg: *const Message, userdata: *mut c_void)
where
    F: FnMut(&Message),
{
    // SAFETY: `run` passes `&mut F` for this exact `F`, and the driver hands
    // out a pointer to a live message.
    let f = unsafe { &mut *userdata.cast::<F>() };
    f(unsafe { &*msg });
}

pub fn run<F>(sys: i32, mut cb: F)
where
    F: FnMut(&Message),
{
    let userdata = (&mut cb as *mut F).cast::<c_void>();
    // SAFETY: `userdata` points to `cb`, which outlives the call and is not
    // touched elsewhere until the driver returns.
    unsafe { fn_ptr::run(sys, trampoline::<F>, userdata) }
}
