//! Build script: compiles the C side of the dispatch benchmark and records
//! which toolchain and optimization level the binary was built with.
//!
//! A missing or unusable C compiler is not fatal: the crate then builds
//! without `c_implementation_active` and the C cases are left out.

use std::env;

fn main() {
    println!("cargo:rustc-check-cfg=cfg(c_implementation_active)");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=CC");

    // Cargo hands the profile's opt-level to build scripts.
    let opt_level = env::var("OPT_LEVEL").unwrap_or_else(|_| "0".to_string());
    let opt_name = if opt_level == "0" { "O0" } else { "02" };
    println!("cargo:rustc-env=CALLBACK_BENCH_OPT_LEVEL={}", opt_name);

    let compiler = match cc::Build::new().try_get_compiler() {
        Ok(compiler) => compiler,
        Err(e) => {
            println!("cargo:rustc-env=CALLBACK_BENCH_COMPILER=gcc");
            println!("cargo:warning=No usable C compiler ({}). C driver disabled.", e);
            return;
        }
    };
    let compiler_name = if compiler.is_like_clang() { "clang" } else { "gcc" };
    println!("cargo:rustc-env=CALLBACK_BENCH_COMPILER={}", compiler_name);

    if !(compiler.is_like_gnu() || compiler.is_like_clang() || compiler.is_like_msvc()) {
        println!(
            "cargo:warning=C compiler is not compatible (needs GCC, Clang, or MSVC). \
             C driver disabled."
        );
        return;
    }

    let rustflags = env::var("RUSTFLAGS").unwrap_or_default();
    let encoded_rustflags = env::var("CARGO_ENCODED_RUSTFLAGS").unwrap_or_default();
    let is_rust_native =
        rustflags.contains("target-cpu=native") || encoded_rustflags.contains("target-cpu=native");

    let mut build = cc::Build::new();

    let c_files = match glob::glob("src/**/*.c") {
        Ok(paths) => paths.filter_map(|entry| entry.ok()).collect::<Vec<_>>(),
        Err(e) => {
            println!("cargo:warning=Failed to scan for C sources ({}). C driver disabled.", e);
            return;
        }
    };
    if c_files.is_empty() {
        return;
    }

    for file in c_files {
        println!("cargo:rerun-if-changed={}", file.display());
        build.file(file);
    }

    // Optimization follows the cargo profile so both sides of the comparison
    // are built at the same level.
    if is_rust_native {
        build.flag_if_supported("-march=native");
    }

    if let Err(e) = build.try_compile("message_handler_c") {
        println!("cargo:warning=Failed to compile the C driver ({}). C driver disabled.", e);
        return;
    }

    println!("cargo:rustc-cfg=c_implementation_active");
}
