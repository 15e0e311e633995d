//! Process entry glue: announce the build configuration, then hand over to
//! the harness and pass its exit status through untouched.

use std::fmt;

/// C toolchain family the build script detected
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compiler {
    Gcc,
    Clang,
}

impl Compiler {
    /// Anything not clang-like is reported as gcc.
    pub fn from_build_env(name: &str) -> Self {
        if name.eq_ignore_ascii_case("clang") {
            Compiler::Clang
        } else {
            Compiler::Gcc
        }
    }

    pub fn current() -> Self {
        Self::from_build_env(env!("CALLBACK_BENCH_COMPILER"))
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Compiler::Gcc => "gcc",
            Compiler::Clang => "clang",
        }
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optimization level of the cargo profile the binary was built with
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptLevel {
    Unoptimized,
    Optimized,
}

impl OptLevel {
    /// Anything but `O0` counts as optimized.
    pub fn from_build_env(name: &str) -> Self {
        if name == "O0" {
            OptLevel::Unoptimized
        } else {
            OptLevel::Optimized
        }
    }

    pub fn current() -> Self {
        Self::from_build_env(env!("CALLBACK_BENCH_OPT_LEVEL"))
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            OptLevel::Unoptimized => "O0",
            OptLevel::Optimized => "02",
        }
    }
}

impl fmt::Display for OptLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `<compiler>-<opt-level>`, e.g. `gcc-02` or `clang-O0`.
pub fn build_id() -> String {
    format!("{}-{}", Compiler::current(), OptLevel::current())
}

/// Print the build id, then run `harness` on `args` and return its status.
pub fn run<F>(args: Vec<String>, harness: F) -> i32
where
    F: FnOnce(Vec<String>) -> i32,
{
    println!("{}", build_id());
    harness(args)
}
