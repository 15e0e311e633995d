//! Message handler drivers, one module per calling convention.
//!
//! Every driver performs exactly [`ITERS`] invocations. The i-th invocation
//! receives a fresh [`Message`] whose payload is `sys + i`.

pub mod adapter;
pub mod c_impl;
pub mod fn_ptr;
pub mod generic;
pub mod type_erased;

/// Number of callback invocations per driver call.
///
/// The C driver carries its own copy of this bound; a test keeps them equal.
pub const ITERS: i32 = 1000;

/// `sys` value every benchmark case passes to its driver.
pub const SYS: i32 = 1337;

/// One unit of work handed to a callback.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Message {
    pub i: i32,
}

impl Message {
    #[inline(always)]
    pub const fn new(i: i32) -> Self {
        Self { i }
    }
}

/// Capture size label used in case identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CaptureSize {
    Small,
    Big,
}

impl CaptureSize {
    pub const ALL: [CaptureSize; 2] = [CaptureSize::Small, CaptureSize::Big];

    pub const fn label(self) -> &'static str {
        match self {
            CaptureSize::Small => "small",
            CaptureSize::Big => "big",
        }
    }

    /// Size in bytes of the capture value this label stands for.
    pub const fn bytes(self) -> usize {
        match self {
            CaptureSize::Small => std::mem::size_of::<SmallCapture>(),
            CaptureSize::Big => std::mem::size_of::<BigCapture>(),
        }
    }
}

impl std::fmt::Display for CaptureSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// State closed over by a callback.
///
/// Only the first element takes part in the computation; the rest exists to
/// change how much a closure has to carry around.
pub trait Capture: Copy + Default + 'static {
    const SIZE: CaptureSize;

    fn head(&self) -> i32;
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SmallCapture {
    pub i: [i32; 1],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BigCapture {
    pub i: [i32; 16],
}

impl Capture for SmallCapture {
    const SIZE: CaptureSize = CaptureSize::Small;

    #[inline(always)]
    fn head(&self) -> i32 {
        self.i[0]
    }
}

impl Capture for BigCapture {
    const SIZE: CaptureSize = CaptureSize::Big;

    #[inline(always)]
    fn head(&self) -> i32 {
        self.i[0]
    }
}

/// Accumulator value after one driver call with the given `sys` and capture head.
pub fn expected_total(sys: i32, head: i32) -> i32 {
    (0..ITERS).fold(0i32, |acc, i| acc.wrapping_add(sys + i + head))
}
