//! Raw priority parsing.

use super::types::{DirectedMap, Priority, RawPriority};
use crate::error::{Result, SyntaxViolation};

/// Turns [`RawPriority`] specifications into [`Priority`] values.
///
/// Every failure is reported as
/// [`PrioraError::InvalidPrioritySyntax`](crate::PrioraError::InvalidPrioritySyntax).
///
/// # Examples
///
/// ```
/// use u_priora::{Direction, PriorityBuilder, RawPriority};
///
/// let p = PriorityBuilder::build(&RawPriority::wrapped("like_count", Direction::Ascending)).unwrap();
/// assert_eq!(p.attribute(), "like_count");
/// assert_eq!(p.direction(), Direction::Ascending);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityBuilder;

impl PriorityBuilder {
    /// Builds one priority.
    pub fn build(raw: &RawPriority) -> Result<Priority> {
        match raw {
            RawPriority::Bare(attribute) if attribute.is_empty() => Err(SyntaxViolation::Shape.into()),
            RawPriority::Bare(attribute) => Ok(Priority::new(attribute.as_str())),
            RawPriority::Directed(map) => Self::build_from_map(map),
            RawPriority::Wrapped(list) => match list.as_slice() {
                [] => Err(SyntaxViolation::Shape.into()),
                [map] => Self::build_from_map(map),
                _ => Err(SyntaxViolation::MultipleAttributes.into()),
            },
        }
    }

    /// Builds a priority list, preserving order as precedence.
    pub fn build_all<'a, I>(raws: I) -> Result<Vec<Priority>>
    where
        I: IntoIterator<Item = &'a RawPriority>,
    {
        raws.into_iter().map(Self::build).collect()
    }

    fn build_from_map(map: &DirectedMap) -> Result<Priority> {
        let mut entries = map.iter();
        match (entries.next(), entries.next()) {
            (Some((attribute, _)), None) if attribute.is_empty() => Err(SyntaxViolation::Shape.into()),
            (Some((attribute, &direction)), None) => {
                Ok(Priority::with_direction(attribute.as_str(), direction))
            }
            _ => Err(SyntaxViolation::MultipleAttributes.into()),
        }
    }
}
