//! Callback dispatch benchmarks.

pub mod message_handler;
