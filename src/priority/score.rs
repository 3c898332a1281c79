//! Comparable numeric values.

use std::cmp::Ordering;
use std::fmt;

/// 2^127, the first float magnitude outside the `i128` range.
const I128_BOUND: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

/// A numeric value as it takes part in a comparison.
///
/// Integers stay exact: they are widened to `i128`, so negating any `i64`
/// cannot overflow and values above 2^53 keep their order. Floats compare
/// with [`f64::total_cmp`]. An integer and a float compare by their exact
/// mathematical values.
#[derive(Debug, Clone, Copy)]
pub enum Score {
    /// An exact integer.
    Integer(i128),
    /// A floating-point number, usually the output of a conversion.
    Float(f64),
}

impl Score {
    /// Returns the score negated, starting from zero.
    ///
    /// `0.0 - x` also folds `-0.0` into `0.0` for floats.
    pub fn negated(self) -> Self {
        match self {
            Score::Integer(i) => Score::Integer(0 - i),
            Score::Float(x) => Score::Float(0.0 - x),
        }
    }

    /// Returns the score unchanged, folding `-0.0` into `0.0`.
    pub fn normalized(self) -> Self {
        match self {
            Score::Integer(i) => Score::Integer(i),
            Score::Float(x) => Score::Float(0.0 + x),
        }
    }
}

/// Exact comparison of an integer with a float.
fn cmp_integer_float(i: i128, x: f64) -> Ordering {
    if x.is_nan() {
        return (i as f64).total_cmp(&x);
    }
    if x >= I128_BOUND {
        return Ordering::Less;
    }
    if x < -I128_BOUND {
        return Ordering::Greater;
    }
    let whole = x.trunc();
    match i.cmp(&(whole as i128)) {
        Ordering::Equal => 0.0f64.partial_cmp(&(x - whole)).unwrap_or(Ordering::Equal),
        ord => ord,
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        match (*self, *other) {
            (Score::Integer(a), Score::Integer(b)) => a.cmp(&b),
            (Score::Float(a), Score::Float(b)) => a.total_cmp(&b),
            (Score::Integer(a), Score::Float(b)) => cmp_integer_float(a, b),
            (Score::Float(a), Score::Integer(b)) => cmp_integer_float(b, a).reverse(),
        }
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Score {}

impl From<i64> for Score {
    fn from(v: i64) -> Self {
        Score::Integer(v.into())
    }
}

impl From<f64> for Score {
    fn from(v: f64) -> Self {
        Score::Float(v)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Integer(i) => write!(f, "{i}"),
            Score::Float(x) => write!(f, "{x}"),
        }
    }
}
