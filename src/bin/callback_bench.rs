//! Callback dispatch benchmark.
//!
//! Usage:
//!   callback-bench                 # Time every case
//!   callback-bench --list          # List cases
//!   callback-bench fn_ptr          # Only cases whose id contains "fn_ptr"
//!   callback-bench --verify        # Check every case's result
//!   callback-bench --help          # Show help

use callback_dispatch_bench::{driver, harness};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    let code = driver::run(args, harness::main_with_args::<Vec<String>, String>);
    std::process::exit(code);
}
