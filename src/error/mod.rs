mod recompile;
mod scan;

pub use recompile::{LengthOverflowEntry, RecompileProblem};
pub use scan::ScanProblem;

/// The single error type returned by fallible, top-level crate entry points.
///
/// Per-candidate problems encountered while scanning a file are not routed
/// through this type (see [`ScanProblem`] and `ScanReport`); `Error` is for
/// conditions that abort an entire operation: I/O failures, malformed JSON,
/// or a [`RecompileProblem`] escalated by the CLI driver.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A translation could not be recompiled into its script binary.
    #[error("recompile: {0}")]
    Recompile(#[from] RecompileProblem),

    /// Wrapped `std::io::Error`.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped `serde_json::Error`.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized [`Result`] type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err.into());
        }
    };
}

use std::panic::Location;

pub(crate) use ensure;

/// Helper trait mirroring `picori`'s `ProblemLocation`: lets error
/// constructors ask for the caller's source location without every call
/// site spelling out `std::panic::Location::caller()`.
pub trait ProblemLocation {
    #[track_caller]
    fn current() -> &'static Location<'static> { Location::caller() }
}

impl ProblemLocation for Location<'_> {}
