//! Type-erased wrapper dispatch.
//!
//! The handler is a boxed trait object: building it allocates once (unless
//! the closure is zero-sized), every invocation goes through the vtable.
//! [`run`] is kept out of line to isolate the wrapper cost, [`run_inlined`]
//! lets the optimizer see through the call site.

use super::{Message, ITERS};

/// Owned, type-erased message handler.
pub type MessageHandler<'a> = Box<dyn FnMut(&Message) + 'a>;

#[inline(never)]
pub fn run(sys: i32, mut cb: MessageHandler<'_>) {
    for i in 0..ITERS {
        let msg = Message::new(sys + i);
        cb(&msg);
    }
}

#[inline(always)]
pub fn run_inlined(sys: i32, mut cb: MessageHandler<'_>) {
    for i in 0..ITERS {
        let msg = Message::new(sys + i);
        cb(&msg);
    }
}
