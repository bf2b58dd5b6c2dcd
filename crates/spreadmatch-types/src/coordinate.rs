//! Coordinates and signatures of a sum-of-products computation.
//!
//! A [`Signature`] lists, per term, how many factors are multiplied
//! together; the terms are then added. A [`Coordinate`] `(id, kind)` names
//! factor `kind` of term `id`.
//!
//! The spread protocol uses the fixed signature `[2, 1, 1]`:
//!
//! ```text
//! (0,0)·(0,1)  +  (1,0)  +  (2,0)
//!  ask · bid      ask       bid
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{SpreadmatchError, constants};

/// One factor slot of one term: `(id, kind)`.
///
/// Serialized as the string `"id:kind"` so it can key JSON maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Coordinate {
    /// Term (logical wire) index.
    pub id: usize,
    /// Factor index within the term.
    pub kind: usize,
}

impl Coordinate {
    #[must_use]
    pub const fn new(id: usize, kind: usize) -> Self {
        Self { id, kind }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.id, self.kind)
    }
}

impl From<Coordinate> for String {
    fn from(value: Coordinate) -> Self {
        format!("{}:{}", value.id, value.kind)
    }
}

impl FromStr for Coordinate {
    type Err = SpreadmatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || SpreadmatchError::Serialization(format!("invalid coordinate {s:?}"));
        let (id, kind) = s.split_once(':').ok_or_else(bad)?;
        Ok(Self {
            id: id.parse().map_err(|_| bad())?,
            kind: kind.parse().map_err(|_| bad())?,
        })
    }
}

impl TryFrom<String> for Coordinate {
    type Error = SpreadmatchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Number of factors per term of a sum-of-products computation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature(Vec<usize>);

impl Signature {
    #[must_use]
    pub fn new(factors: Vec<usize>) -> Self {
        Self(factors)
    }

    /// The spread protocol's signature `[2, 1, 1]`.
    #[must_use]
    pub fn spread() -> Self {
        Self(constants::SPREAD_SIGNATURE.to_vec())
    }

    /// Number of additive terms.
    #[must_use]
    pub fn terms(&self) -> usize {
        self.0.len()
    }

    /// Number of multiplicative factors in `term`, or 0 if there is no such term.
    #[must_use]
    pub fn factors(&self, term: usize) -> usize {
        self.0.get(term).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        coordinate.kind < self.factors(coordinate.id)
    }

    /// Every coordinate of the signature, term-major.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.0
            .iter()
            .enumerate()
            .flat_map(|(id, &factors)| (0..factors).map(move |kind| Coordinate::new(id, kind)))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
