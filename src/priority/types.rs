//! Priority and raw priority types.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::score::Score;
use crate::coercion::CoercionSnapshot;
use crate::error::{PrioraError, Result, SyntaxViolation};
use crate::value::Prioritizable;

/// Sort direction of a single priority.
///
/// `Descending` (the default) puts larger values first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Smaller values first; written `asc`.
    #[cfg_attr(feature = "serde", serde(rename = "asc"))]
    Ascending,
    /// Larger values first; written `desc`.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "desc"))]
    Descending,
}

impl Direction {
    /// Applies the direction to a numeric value.
    ///
    /// Descending keeps the value (`0 + v`); ascending negates it (`0 - v`),
    /// so both compose under a single greatest-first comparison. Integers
    /// stay exact and floats fold `-0.0` into `0.0`.
    pub fn apply(self, value: Score) -> Score {
        match self {
            Direction::Descending => value.normalized(),
            Direction::Ascending => value.negated(),
        }
    }

    /// The direction's token, `asc` or `desc`.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = PrioraError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" => Ok(Direction::Ascending),
            "desc" => Ok(Direction::Descending),
            other => Err(SyntaxViolation::UnknownDirection(other.to_string()).into()),
        }
    }
}

/// A single sort key: an attribute and a direction.
///
/// Built by [`PriorityBuilder`](super::PriorityBuilder) from a
/// [`RawPriority`]; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Priority {
    attribute: String,
    direction: Direction,
}

impl Priority {
    /// Creates a descending priority on `attribute`.
    pub fn new(attribute: impl Into<String>) -> Self {
        Self::with_direction(attribute, Direction::default())
    }

    /// Creates a priority on `attribute` with an explicit direction.
    pub fn with_direction(attribute: impl Into<String>, direction: Direction) -> Self {
        Self {
            attribute: attribute.into(),
            direction,
        }
    }

    /// The attribute this priority reads.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// The direction this priority sorts in.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Computes the directional comparable value of `object`.
    ///
    /// # Errors
    ///
    /// - [`PrioraError::MissingAttribute`] if the object has no such attribute.
    /// - [`PrioraError::NonNumericValue`] if the raw value is not numeric and
    ///   `coercions` holds no conversion for its kind.
    pub fn comparable_value_from<T>(&self, object: &T, coercions: &CoercionSnapshot) -> Result<Score>
    where
        T: Prioritizable + ?Sized,
    {
        let raw = object
            .attribute(&self.attribute)
            .ok_or_else(|| PrioraError::MissingAttribute {
                attribute: self.attribute.clone(),
                type_name: object.type_name(),
            })?;

        let numeric =
            coercions
                .numeric_value(&raw)
                .ok_or_else(|| PrioraError::NonNumericValue {
                    attribute: self.attribute.clone(),
                    kind: raw.kind(),
                })?;

        Ok(self.direction.apply(numeric))
    }
}

/// A single-key-per-entry mapping from attribute to direction.
pub type DirectedMap = BTreeMap<String, Direction>;

/// A raw, unvalidated priority specification.
///
/// | Form | Example (JSON) |
/// |------|----------------|
/// | `Bare` | `"like_count"` |
/// | `Directed` | `{"like_count": "asc"}` |
/// | `Wrapped` | `[{"like_count": "asc"}]` |
///
/// Mappings are only valid with exactly one entry and lists only with
/// exactly one mapping; [`PriorityBuilder`](super::PriorityBuilder) enforces
/// this.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum RawPriority {
    /// An attribute name alone, sorted descending.
    Bare(String),
    /// An attribute-to-direction mapping.
    Directed(DirectedMap),
    /// A list of attribute-to-direction mappings.
    Wrapped(Vec<DirectedMap>),
}

impl RawPriority {
    /// A bare attribute name.
    pub fn bare(attribute: impl Into<String>) -> Self {
        RawPriority::Bare(attribute.into())
    }

    /// A single-entry directed mapping.
    pub fn directed(attribute: impl Into<String>, direction: Direction) -> Self {
        RawPriority::Directed(DirectedMap::from([(attribute.into(), direction)]))
    }

    /// A list wrapping one single-entry directed mapping.
    pub fn wrapped(attribute: impl Into<String>, direction: Direction) -> Self {
        RawPriority::Wrapped(vec![DirectedMap::from([(attribute.into(), direction)])])
    }
}

impl From<&str> for RawPriority {
    fn from(attribute: &str) -> Self {
        RawPriority::bare(attribute)
    }
}

impl From<String> for RawPriority {
    fn from(attribute: String) -> Self {
        RawPriority::Bare(attribute)
    }
}

impl From<(&str, Direction)> for RawPriority {
    fn from((attribute, direction): (&str, Direction)) -> Self {
        RawPriority::directed(attribute, direction)
    }
}

impl From<DirectedMap> for RawPriority {
    fn from(map: DirectedMap) -> Self {
        RawPriority::Directed(map)
    }
}
