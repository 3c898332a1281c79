//! Value coercion.
//!
//! Priorities compare numbers. Attribute values that are not numbers
//! (booleans, absent values, text, custom kinds) are turned into numbers by
//! conversions looked up by [`ValueKind`](crate::ValueKind):
//!
//! - **Defaults**: `true → 1`, `false → 0`, `null → 0`.
//! - **Custom**: any `Fn(&Value) -> f64` or [`Conversion`] implementation,
//!   registered per kind and removable again.

mod registry;
mod types;

pub use registry::{CoercionRegistry, CoercionSnapshot};
pub use types::{Constant, Conversion};
