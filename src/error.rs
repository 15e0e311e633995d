use std::path::PathBuf;
use thiserror::Error;

/// Failures the harness reports; the benchmark core itself cannot fail.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("no benchmark case matches '{0}'")]
    NoMatchingCase(String),

    #[error("case '{case}' produced {actual}, expected {expected}")]
    Verification {
        case: String,
        expected: i32,
        actual: i32,
    },

    #[error("failed to write CSV to {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
