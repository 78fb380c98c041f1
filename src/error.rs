//! Error types. All errors are local and synchronous: they are reported at
//! the triggering call and never retried internally.

use core::fmt;

/// Construction-time and frozen-table errors.
#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    /// Requested minimum capacity was zero.
    ZeroCapacity,
    /// Load factor outside the open interval (0, 1).
    InvalidLoadFactor(f64),
    /// Bulk construction from parallel arrays of different lengths.
    MismatchedArrays { keys: usize, values: usize },
    /// A mutating operation was attempted on a frozen table.
    Unsupported(&'static str),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::ZeroCapacity => write!(f, "minimum capacity must be at least 1"),
            TableError::InvalidLoadFactor(lf) => {
                write!(f, "load factor {lf} is outside (0, 1)")
            }
            TableError::MismatchedArrays { keys, values } => write!(
                f,
                "parallel arrays differ in length: {keys} keys, {values} values"
            ),
            TableError::Unsupported(op) => {
                write!(f, "`{op}` is not supported on a frozen table")
            }
        }
    }
}

impl std::error::Error for TableError {}

/// The table was structurally changed outside the cursor that observed it.
///
/// Fatal for that cursor only; the table itself remains fully usable.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct StructuralChange;

impl fmt::Display for StructuralChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("table structurally changed outside this cursor")
    }
}

impl std::error::Error for StructuralChange {}
