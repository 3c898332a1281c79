//! Entry points that resolve priorities and order collections.
//!
//! Priorities come from one of two places:
//!
//! - **Supplied**: raw priorities passed with the call.
//! - **Declared**: a list a type registered once as its default, looked up
//!   by the types of the objects being ordered.
//!
//! The free functions below use the process-wide configuration returned by
//! [`configuration`]. Use a [`Prioritizer`] for isolated registries.

mod config;
mod declared;

use std::sync::Arc;

use once_cell::sync::Lazy;

pub use config::Prioritizer;
pub use declared::DeclaredPriorities;

use crate::coercion::Conversion;
use crate::error::Result;
use crate::priority::{Priority, RawPriority};
use crate::value::{Prioritizable, ValueKind};

static CONFIGURATION: Lazy<Prioritizer> = Lazy::new(Prioritizer::default);

/// The process-wide configuration.
pub fn configuration() -> &'static Prioritizer {
    &CONFIGURATION
}

/// Orders `objects` from highest to lowest priority.
///
/// See [`Prioritizer::prioritize`].
///
/// # Examples
///
/// ```
/// use u_priora::{Direction, Prioritizable, RawPriority, Value};
///
/// struct Post {
///     like_count: u32,
///     is_sponsored: bool,
/// }
///
/// impl Prioritizable for Post {
///     fn attribute(&self, name: &str) -> Option<Value> {
///         match name {
///             "like_count" => Some(self.like_count.into()),
///             "is_sponsored" => Some(self.is_sponsored.into()),
///             _ => None,
///         }
///     }
/// }
///
/// let posts = vec![
///     Post { like_count: 90, is_sponsored: false },
///     Post { like_count: 10, is_sponsored: true },
///     Post { like_count: 90, is_sponsored: true },
/// ];
///
/// let by = [
///     RawPriority::directed("like_count", Direction::Ascending),
///     RawPriority::bare("is_sponsored"),
/// ];
/// let ordered = u_priora::prioritize(&posts, Some(&by)).unwrap();
///
/// let likes: Vec<u32> = ordered.iter().map(|p| p.like_count).collect();
/// assert_eq!(likes, vec![10, 90, 90]);
/// assert!(ordered[1].is_sponsored);
/// ```
pub fn prioritize<'a, T>(objects: &'a [T], priorities: Option<&[RawPriority]>) -> Result<Vec<&'a T>>
where
    T: Prioritizable + 'static,
{
    configuration().prioritize(objects, priorities)
}

/// Registers a conversion in the process-wide coercion registry.
pub fn add_conversion<C>(kind: ValueKind, conversion: C) -> Result<()>
where
    C: Conversion + 'static,
{
    configuration().add_conversion(kind, conversion)
}

/// Removes a conversion from the process-wide coercion registry.
pub fn remove_conversion(kind: &ValueKind) -> bool {
    configuration().remove_conversion(kind)
}

/// Declares the default priorities of `T` process-wide.
pub fn declare_priorities<T: 'static>(raws: &[RawPriority]) -> Result<()> {
    configuration().declare::<T>(raws)
}

/// Returns the process-wide default priorities declared by `T`.
pub fn declared_priorities<T: 'static>() -> Option<Arc<[Priority]>> {
    configuration().declarations().get::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrioraError;
    use crate::value::Value;

    #[derive(Debug, PartialEq)]
    struct Article {
        author: &'static str,
        like_count: i64,
        is_sponsored: bool,
    }

    impl Prioritizable for Article {
        fn attribute(&self, name: &str) -> Option<Value> {
            match name {
                "author" => Some(self.author.into()),
                "like_count" => Some(self.like_count.into()),
                "is_sponsored" => Some(self.is_sponsored.into()),
                _ => None,
            }
        }
    }

    // Never declares priorities.
    struct Draft;

    impl Prioritizable for Draft {
        fn attribute(&self, _name: &str) -> Option<Value> {
            None
        }
    }

    fn articles() -> Vec<Article> {
        vec![
            Article {
                author: "Aaron R.",
                like_count: 90,
                is_sponsored: false,
            },
            Article {
                author: "Jay C.",
                like_count: 10,
                is_sponsored: true,
            },
            Article {
                author: "Don Y.",
                like_count: 90,
                is_sponsored: true,
            },
        ]
    }

    #[test]
    fn test_global_declaration() {
        declare_priorities::<Article>(&["like_count".into(), "is_sponsored".into()]).unwrap();
        assert_eq!(
            declared_priorities::<Article>().map(|list| list.len()),
            Some(2)
        );

        let items = articles();
        let declared = prioritize(&items, None).unwrap();
        let supplied = prioritize(
            &items,
            Some(&[RawPriority::bare("like_count"), RawPriority::bare("is_sponsored")]),
        )
        .unwrap();

        assert_eq!(declared, supplied);
        let authors: Vec<&str> = declared.iter().map(|a| a.author).collect();
        assert_eq!(authors, vec!["Don Y.", "Aaron R.", "Jay C."]);
    }

    #[test]
    fn test_global_unsupplied() {
        let drafts = vec![Draft, Draft];
        assert!(declared_priorities::<Draft>().is_none());
        assert!(matches!(
            prioritize(&drafts, None),
            Err(PrioraError::UnsuppliedPriorities)
        ));
    }

    #[test]
    fn test_global_conversion_lifecycle() {
        let items = articles();
        let by_author = [RawPriority::bare("author")];

        add_conversion(ValueKind::Text, |v: &Value| {
            v.as_text().map_or(0.0, |s| s.len() as f64)
        })
        .unwrap();
        // "Jay C." and "Don Y." tie on length and keep their input order
        let sorted = prioritize(&items, Some(&by_author)).unwrap();
        let authors: Vec<&str> = sorted.iter().map(|a| a.author).collect();
        assert_eq!(authors, vec!["Aaron R.", "Jay C.", "Don Y."]);

        assert!(remove_conversion(&ValueKind::Text));
        assert!(matches!(
            prioritize(&items, Some(&by_author)),
            Err(PrioraError::NonNumericValue { .. })
        ));
    }
}
