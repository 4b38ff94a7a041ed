//! The pair payload produced by [`Observable::and`](super::Observable::and).

use std::fmt;

use serde::{Deserialize, Serialize};

/// An immutable pair of values that were active at the same time.
///
/// Renders as `"first, second"`. Nested conjunctions nest to the left, so
/// `a.and(&b).and(&c)` carries `Both<Both<A, B>, C>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Both<A, B> {
    first: A,
    second: B,
}

impl<A, B> Both<A, B> {
    /// Pair two values.
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    /// The left-hand value.
    pub fn first(&self) -> &A {
        &self.first
    }

    /// The right-hand value.
    pub fn second(&self) -> &B {
        &self.second
    }

    /// Take both values out of the pair.
    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A, B> From<(A, B)> for Both<A, B> {
    fn from((first, second): (A, B)) -> Self {
        Self::new(first, second)
    }
}

impl<A, B> fmt::Display for Both<A, B>
where
    A: fmt::Display,
    B: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.first, self.second)
    }
}
