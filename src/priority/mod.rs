//! Priorities and their raw specification syntax.
//!
//! A [`Priority`] is one sort key: an attribute name plus a [`Direction`].
//! Callers usually write priorities as [`RawPriority`] values:
//!
//! - **Bare**: `"like_count"`, descending.
//! - **Directed**: `{"like_count": asc}`, exactly one entry.
//! - **Wrapped**: `[{"like_count": asc}]`, a list holding exactly one
//!   directed mapping.
//!
//! [`PriorityBuilder`] validates the shape and produces the `Priority`.

mod builder;
mod score;
mod types;

pub use builder::PriorityBuilder;
pub use score::Score;
pub use types::{DirectedMap, Direction, Priority, RawPriority};
