//! Core trait for value conversions.

use crate::value::Value;

/// Converts a raw attribute value into a comparable number.
///
/// A conversion may ignore its input (arity 0, see [`Constant`]) or read it
/// (arity 1). Conversions declaring a larger arity are rejected by
/// [`CoercionRegistry::register`](super::CoercionRegistry::register).
///
/// Any `Fn(&Value) -> f64` closure is a conversion of arity 1.
///
/// # Examples
///
/// ```ignore
/// // Text: longer strings rank higher
/// registry.register(ValueKind::Text, |v: &Value| {
///     v.as_text().map_or(0.0, |s| s.chars().count() as f64)
/// })?;
///
/// // Null: absent values sink below every non-negative number
/// registry.register(ValueKind::Null, Constant(-1.0))?;
/// ```
pub trait Conversion: Send + Sync {
    /// Number of inputs the conversion requires.
    fn arity(&self) -> usize {
        1
    }

    /// Computes the numeric value for `value`.
    fn convert(&self, value: &Value) -> f64;
}

impl<F> Conversion for F
where
    F: Fn(&Value) -> f64 + Send + Sync,
{
    fn convert(&self, value: &Value) -> f64 {
        self(value)
    }
}

/// A conversion that maps every value of a kind to the same number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant(pub f64);

impl Conversion for Constant {
    fn arity(&self) -> usize {
        0
    }

    fn convert(&self, _value: &Value) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_unary() {
        let len = |v: &Value| v.as_text().map_or(0.0, |s| s.len() as f64);
        assert_eq!(len.arity(), 1);
        assert!((len.convert(&Value::from("abcd")) - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_constant_ignores_input() {
        let one = Constant(1.0);
        assert_eq!(one.arity(), 0);
        assert!((one.convert(&Value::Null) - 1.0).abs() < 1e-10);
        assert!((one.convert(&Value::from("x")) - 1.0).abs() < 1e-10);
    }
}
