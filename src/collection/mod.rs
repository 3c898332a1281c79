//! Multi-key prioritization of object collections.
//!
//! Each object is reduced to a comparison vector, one directional value per
//! [`Priority`](crate::Priority), and objects are ordered by comparing those
//! vectors lexicographically:
//!
//! - **Precedence**: the first priority decides; later priorities only
//!   break ties left by earlier ones.
//! - **Greatest first**: the largest vector leads. Ascending priorities
//!   negate their values so they compose under the same rule.
//! - **Stable**: objects with equal vectors keep their input order.
//!
//! Vectors are computed once per object per call.

mod engine;

pub use engine::Collection;
