//! # Callback Dispatch Bench
//!
//! Measures what it costs to pass a message handler into a tight loop:
//! boxed closures, generic closures, function pointers with userdata, and
//! an adapter between the last two, each with a small and a big capture.

pub mod cli;
pub mod dispatch;
pub mod driver;
pub mod error;
pub mod harness;
pub mod registry;
pub mod utils;
