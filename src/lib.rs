//! Attribute-based multi-key prioritization.
//!
//! Orders arbitrary objects by an ordered list of priorities, each naming
//! an attribute and a direction:
//!
//! - **Priorities**: `"like_count"` (descending), `{"like_count": asc}`, or
//!   `[{"like_count": asc}]`, parsed by [`PriorityBuilder`].
//! - **Coercion**: non-numeric attribute values (booleans, absent values,
//!   text, custom kinds) become numbers through a [`CoercionRegistry`].
//! - **Collection**: lexicographic, greatest-first, stable ordering with one
//!   comparison vector per object.
//! - **Declarations**: types can register default priorities, used when a
//!   call supplies none.
//!
//! # Architecture
//!
//! This crate sits at Layer 2 (Algorithms) in the U-Engine ecosystem. It
//! contains no domain concepts; objects expose their attributes through the
//! [`Prioritizable`] trait.

pub mod coercion;
pub mod collection;
pub mod error;
pub mod facade;
pub mod priority;
pub mod value;

pub use coercion::{CoercionRegistry, CoercionSnapshot, Constant, Conversion};
pub use collection::Collection;
pub use error::{PrioraError, Result, SyntaxViolation};
pub use facade::{
    add_conversion, configuration, declare_priorities, declared_priorities, prioritize,
    remove_conversion, DeclaredPriorities, Prioritizer,
};
pub use priority::{DirectedMap, Direction, Priority, PriorityBuilder, RawPriority, Score};
pub use value::{CustomValue, Prioritizable, Value, ValueKind};
