//! Benchmark case registry.
//!
//! Cases are added explicitly by [`build_registry`]; there is no global
//! registration. Execution order is registration order.

use crate::dispatch::message_handler::code::CaptureSize;
use crate::utils::timer::Variant;

/// Stable identifier of a case, `"<strategy>/<capture>"`.
pub fn case_id(strategy: &str, capture: CaptureSize) -> String {
    format!("{}/{}", strategy, capture.label())
}

/// One (strategy, capture size) measurement unit.
#[derive(Clone, Copy)]
pub struct BenchmarkCase {
    strategy: &'static str,
    description: &'static str,
    capture: CaptureSize,
    build: fn() -> Variant<'static>,
    check: fn(i32) -> i32,
}

impl BenchmarkCase {
    /// Describe a case from its parts.
    ///
    /// `build` constructs the capture and accumulator and returns the timed
    /// body; `check` runs the strategy once on fresh state and returns the
    /// accumulator.
    pub const fn new(
        strategy: &'static str,
        description: &'static str,
        capture: CaptureSize,
        build: fn() -> Variant<'static>,
        check: fn(i32) -> i32,
    ) -> Self {
        Self {
            strategy,
            description,
            capture,
            build,
            check,
        }
    }

    /// See [`case_id`].
    pub fn id(&self) -> String {
        case_id(self.strategy, self.capture)
    }

    pub fn strategy(&self) -> &'static str {
        self.strategy
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn capture(&self) -> CaptureSize {
        self.capture
    }

    /// Fresh capture, fresh accumulator, ready to be timed.
    pub fn build(&self) -> Variant<'static> {
        (self.build)()
    }

    pub fn check(&self, sys: i32) -> i32 {
        (self.check)(sys)
    }
}

impl std::fmt::Debug for BenchmarkCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BenchmarkCase")
            .field("strategy", &self.strategy)
            .field("capture", &self.capture)
            .finish()
    }
}

/// Ordered collection of benchmark cases
pub struct BenchmarkRegistry {
    cases: Vec<BenchmarkCase>,
}

impl BenchmarkRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self { cases: Vec::new() }
    }

    /// Register a case. Ids are expected to be unique.
    pub fn register(&mut self, case: BenchmarkCase) {
        debug_assert!(
            self.find(&case.id()).is_none(),
            "duplicate benchmark case {}",
            case.id()
        );
        tracing::debug!(case = %case.id(), "registered benchmark case");
        self.cases.push(case);
    }

    /// All cases in registration order
    pub fn all(&self) -> &[BenchmarkCase] {
        &self.cases
    }

    /// Find case by exact id
    pub fn find(&self, id: &str) -> Option<&BenchmarkCase> {
        self.cases.iter().find(|c| c.id() == id)
    }

    /// Cases whose id contains `pattern`, in registration order
    pub fn matching(&self, pattern: &str) -> Vec<&BenchmarkCase> {
        self.cases
            .iter()
            .filter(|c| c.id().contains(pattern))
            .collect()
    }

    /// List case ids
    pub fn list_names(&self) -> Vec<String> {
        self.cases.iter().map(|c| c.id()).collect()
    }

    /// Distinct strategy names, in registration order
    pub fn strategies(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        for case in &self.cases {
            if !names.contains(&case.strategy) {
                names.push(case.strategy);
            }
        }
        names
    }
}

impl Default for BenchmarkRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the default registry with every benchmark case
pub fn build_registry() -> BenchmarkRegistry {
    let mut registry = BenchmarkRegistry::new();

    crate::dispatch::message_handler::register_cases(&mut registry);

    registry
}
