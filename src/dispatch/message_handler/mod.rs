//! # Message Handler Dispatch
//!
//! How much does it cost to hand a callback to a tight loop? Each driver in
//! [`code`] invokes a message handler a fixed number of times, differing only
//! in how the handler is passed:
//!
//! - **boxed_fn / boxed_fn_inline**: type-erased `Box<dyn FnMut>`, driver kept
//!   out of line or forced inline
//! - **generic**: monomorphized closure parameter, the best case
//! - **fn_ptr**: function pointer plus opaque userdata, cast back by hand
//! - **fn_ptr_adapter**: a generic closure routed through `fn_ptr` by a
//!   per-type trampoline
//! - **c-fn_ptr**: the `fn_ptr` loop compiled from C
//!
//! Every strategy is benchmarked with a 4-byte and a 64-byte capture.

pub mod bench;
pub mod code;
pub mod test;

pub use bench::register_cases;
