//! Solver variables.
//!
//! A variable is a named, fixed-width unsigned integer. The name is the
//! identity of the variable: two `Var` values with the same name denote
//! the same node of the constraint graph, regardless of where they were created.
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use num_bigint::BigUint;

/// A bounded-width integer variable.
///
/// The maximal domain of a variable of width `w` is `[0, 2^w - 1]`.
///
/// # Invariants
///
/// - The width is at least 1 bit
/// - Equality, ordering and hashing only look at the name
#[derive(Debug, Clone)]
pub struct Var {
    name: Arc<str>,
    width: u32,
}

impl Var {
    /// Creates a new variable with the given name and bit width.
    ///
    /// # Panics
    ///
    /// Panics if `width == 0`.
    pub fn new(name: impl Into<Arc<str>>, width: u32) -> Self {
        assert_ne!(width, 0, "Variable width must be >= 1");
        Var {
            name: name.into(),
            width,
        }
    }

    /// Returns the name of the variable.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the bit width of the variable.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the largest value representable in the variable's width.
    pub fn max_value(&self) -> BigUint {
        (BigUint::from(1u32) << self.width) - 1u32
    }
}

impl PartialEq for Var {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Var {}

impl Hash for Var {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for Var {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Var {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
