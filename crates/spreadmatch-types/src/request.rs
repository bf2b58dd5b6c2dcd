//! Order roles and the requests clients send to obtain masks.
//!
//! There are exactly two roles. Each role writes one factor of the shared
//! multiplicative term `0` and owns one additive term:
//!
//! | role | shared coordinate | own coordinate |
//! |------|-------------------|----------------|
//! | ask  | `(0, 0)`          | `(1, 0)`       |
//! | bid  | `(0, 1)`          | `(2, 0)`       |
//!
//! The role's encoding kind is an explicit constant of the role. It is
//! never inferred from the order in which coordinates appear.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Coordinate, Result, SpreadmatchError};

/// Which side of the crossing an order is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Role {
    Ask,
    Bid,
}

impl Role {
    /// Encoding kind: `0` for ask, `1` for bid.
    ///
    /// Doubles as the role's factor index within the shared term.
    #[must_use]
    pub const fn kind(self) -> usize {
        match self {
            Self::Ask => 0,
            Self::Bid => 1,
        }
    }

    /// The role's factor of the shared multiplicative term.
    #[must_use]
    pub const fn shared_coordinate(self) -> Coordinate {
        Coordinate::new(0, self.kind())
    }

    /// The additive term owned by this role alone.
    #[must_use]
    pub const fn own_coordinate(self) -> Coordinate {
        match self {
            Self::Ask => Coordinate::new(1, 0),
            Self::Bid => Coordinate::new(2, 0),
        }
    }

    #[must_use]
    pub const fn coordinates(self) -> [Coordinate; 2] {
        [self.shared_coordinate(), self.own_coordinate()]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ask => write!(f, "ASK"),
            Self::Bid => write!(f, "BID"),
        }
    }
}

/// A request for the masks needed to submit one order.
///
/// Serialized as its coordinate list; deserialization only accepts the
/// ask and bid layouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<Coordinate>", try_from = "Vec<Coordinate>")]
pub struct Request {
    role: Role,
}

impl Request {
    /// `[(0, 0), (1, 0)]`
    #[must_use]
    pub const fn ask() -> Self {
        Self { role: Role::Ask }
    }

    /// `[(0, 1), (2, 0)]`
    #[must_use]
    pub const fn bid() -> Self {
        Self { role: Role::Bid }
    }

    #[must_use]
    pub const fn for_role(role: Role) -> Self {
        Self { role }
    }

    /// Recognise a request from its coordinates.
    ///
    /// The coordinates must be exactly one role's layout (in any order,
    /// without repetition).
    pub fn from_coordinates(coordinates: &[Coordinate]) -> Result<Self> {
        [Role::Ask, Role::Bid]
            .into_iter()
            .find(|role| {
                let expected = role.coordinates();
                coordinates.len() == expected.len()
                    && expected.iter().all(|c| coordinates.contains(c))
            })
            .map(Self::for_role)
            .ok_or_else(|| SpreadmatchError::UnknownRequestShape {
                coordinates: format_coordinates(coordinates),
            })
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub const fn coordinates(&self) -> [Coordinate; 2] {
        self.role.coordinates()
    }
}

impl From<Request> for Vec<Coordinate> {
    fn from(value: Request) -> Self {
        value.coordinates().to_vec()
    }
}

impl TryFrom<Vec<Coordinate>> for Request {
    type Error = SpreadmatchError;

    fn try_from(value: Vec<Coordinate>) -> Result<Self> {
        Self::from_coordinates(&value)
    }
}

fn format_coordinates(coordinates: &[Coordinate]) -> String {
    let parts: Vec<String> = coordinates.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_layouts() {
        assert_eq!(
            Request::ask().coordinates(),
            [Coordinate::new(0, 0), Coordinate::new(1, 0)]
        );
        assert_eq!(
            Request::bid().coordinates(),
            [Coordinate::new(0, 1), Coordinate::new(2, 0)]
        );
    }

    #[test]
    fn kind_is_fixed_per_role() {
        assert_eq!(Role::Ask.kind(), 0);
        assert_eq!(Role::Bid.kind(), 1);
    }

    #[test]
    fn reordered_bid_is_still_bid() {
        let req =
            Request::from_coordinates(&[Coordinate::new(2, 0), Coordinate::new(0, 1)]).unwrap();
        assert_eq!(req.role(), Role::Bid);
        assert_eq!(req.role().kind(), 1);
    }

    #[test]
    fn unknown_shapes_rejected() {
        let shapes: [&[Coordinate]; 4] = [
            &[],
            &[Coordinate::new(0, 0), Coordinate::new(2, 0)],
            &[Coordinate::new(0, 0), Coordinate::new(0, 0)],
            &[
                Coordinate::new(0, 0),
                Coordinate::new(1, 0),
                Coordinate::new(2, 0),
            ],
        ];
        for shape in shapes {
            let err = Request::from_coordinates(shape).unwrap_err();
            assert!(matches!(err, SpreadmatchError::UnknownRequestShape { .. }));
        }
    }

    #[test]
    fn serde_as_coordinate_list() {
        let json = serde_json::to_string(&Request::ask()).unwrap();
        assert_eq!(json, r#"["0:0","1:0"]"#);
        let back: Request = serde_json::from_str(r#"["2:0","0:1"]"#).unwrap();
        assert_eq!(back, Request::bid());
        assert!(serde_json::from_str::<Request>(r#"["1:0"]"#).is_err());
    }
}
