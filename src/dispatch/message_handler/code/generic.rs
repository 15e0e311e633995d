//! Statically dispatched handler: one instantiation per closure type, so the
//! call is direct and the closure body can be inlined into the loop.

use super::{Message, ITERS};

#[inline]
pub fn run<F>(sys: i32, mut cb: F)
where
    F: FnMut(&Message),
{
    for i in 0..ITERS {
        let msg = Message::new(sys + i);
        cb(&msg);
    }
}
