//! Kind-keyed conversion registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::types::{Constant, Conversion};
use crate::error::{PrioraError, Result};
use crate::priority::Score;
use crate::value::{Value, ValueKind};

type ConversionMap = HashMap<ValueKind, Arc<dyn Conversion>>;

static GLOBAL: Lazy<Arc<CoercionRegistry>> = Lazy::new(|| Arc::new(CoercionRegistry::new()));

/// Maps value kinds to the conversions that make them comparable.
///
/// Seeded with `true → 1`, `false → 0` and `null → 0`. Values of a kind with
/// no registered conversion are used as-is, which only works for integers
/// and floats.
///
/// All operations take `&self`; the map is behind a read-write lock so a
/// registry can be shared between threads through an `Arc`.
///
/// # Examples
///
/// ```
/// use u_priora::{CoercionRegistry, Score, Value, ValueKind};
///
/// let registry = CoercionRegistry::new();
/// registry
///     .register(ValueKind::Text, |v: &Value| v.as_text().map_or(0.0, |s| s.len() as f64))
///     .unwrap();
///
/// assert_eq!(registry.numeric_value(&Value::from("four")), Some(Score::from(4.0)));
/// assert_eq!(registry.numeric_value(&Value::from(true)), Some(Score::from(1.0)));
/// assert_eq!(registry.numeric_value(&Value::from(7)), Some(Score::from(7)));
/// ```
pub struct CoercionRegistry {
    conversions: RwLock<ConversionMap>,
}

impl CoercionRegistry {
    /// Creates a registry holding the default boolean and null conversions.
    pub fn new() -> Self {
        let registry = Self::empty();
        {
            let mut conversions = registry.conversions.write();
            conversions.insert(ValueKind::True, Arc::new(Constant(1.0)));
            conversions.insert(ValueKind::False, Arc::new(Constant(0.0)));
            conversions.insert(ValueKind::Null, Arc::new(Constant(0.0)));
        }
        registry
    }

    /// Creates a registry with no conversions at all.
    pub fn empty() -> Self {
        Self {
            conversions: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide registry used by [`crate::prioritize`].
    pub fn global() -> &'static Arc<CoercionRegistry> {
        &GLOBAL
    }

    /// Returns the conversion registered for `kind`, if any.
    pub fn lookup(&self, kind: &ValueKind) -> Option<Arc<dyn Conversion>> {
        self.conversions.read().get(kind).cloned()
    }

    /// Installs or replaces the conversion for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`PrioraError::InvalidConversionFunction`] when the conversion
    /// declares more than one input.
    pub fn register<C>(&self, kind: ValueKind, conversion: C) -> Result<()>
    where
        C: Conversion + 'static,
    {
        let arity = conversion.arity();
        if arity > 1 {
            return Err(PrioraError::InvalidConversionFunction { arity });
        }
        log::debug!("registering conversion for {kind} values");
        self.conversions.write().insert(kind, Arc::new(conversion));
        Ok(())
    }

    /// Removes the conversion for `kind`. Returns whether one was present.
    pub fn unregister(&self, kind: &ValueKind) -> bool {
        let removed = self.conversions.write().remove(kind).is_some();
        if removed {
            log::debug!("removed conversion for {kind} values");
        }
        removed
    }

    /// Returns `true` if a conversion is registered for `kind`.
    pub fn contains(&self, kind: &ValueKind) -> bool {
        self.conversions.read().contains_key(kind)
    }

    /// Resolves the numeric value of `value`.
    ///
    /// Uses the registered conversion for the value's kind, falling back to
    /// the value itself when it is an integer or float. Returns `None` for
    /// any other unconverted value.
    pub fn numeric_value(&self, value: &Value) -> Option<Score> {
        resolve(self.lookup(&value.kind()).as_deref(), value)
    }

    /// Copies the current conversions into a [`CoercionSnapshot`].
    ///
    /// Registrations made afterwards, including ones made from inside a
    /// conversion while a sort runs, do not affect the snapshot.
    pub fn snapshot(&self) -> CoercionSnapshot {
        CoercionSnapshot {
            conversions: self.conversions.read().clone(),
        }
    }
}

/// A frozen copy of a registry's conversions.
///
/// One snapshot backs every lookup of a single prioritization, so all
/// objects in a call are coerced by the same conversions and no lock is held
/// while user conversions run.
#[derive(Clone)]
pub struct CoercionSnapshot {
    conversions: ConversionMap,
}

impl CoercionSnapshot {
    /// Returns the conversion captured for `kind`, if any.
    pub fn lookup(&self, kind: &ValueKind) -> Option<&Arc<dyn Conversion>> {
        self.conversions.get(kind)
    }

    /// Resolves the numeric value of `value` against the captured conversions.
    ///
    /// Same rules as [`CoercionRegistry::numeric_value`].
    pub fn numeric_value(&self, value: &Value) -> Option<Score> {
        resolve(self.lookup(&value.kind()).map(|c| &**c), value)
    }
}

impl fmt::Debug for CoercionSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoercionSnapshot")
            .field("kinds", &sorted_kinds(&self.conversions))
            .finish()
    }
}

fn resolve(conversion: Option<&dyn Conversion>, value: &Value) -> Option<Score> {
    match (conversion, value) {
        (Some(conversion), _) => Some(Score::Float(conversion.convert(value))),
        (None, Value::Integer(i)) => Some(Score::from(*i)),
        (None, Value::Float(x)) => Some(Score::Float(*x)),
        (None, _) => None,
    }
}

fn sorted_kinds(conversions: &ConversionMap) -> Vec<String> {
    let mut kinds: Vec<String> = conversions.keys().map(ToString::to_string).collect();
    kinds.sort();
    kinds
}

impl Default for CoercionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CoercionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoercionRegistry")
            .field("kinds", &sorted_kinds(&self.conversions.read()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::CustomValue;

    fn text_length(v: &Value) -> f64 {
        v.as_text().map_or(0.0, |s| s.len() as f64)
    }

    // Needs a context value besides the raw value.
    struct Scaled {
        factor: f64,
    }

    impl Conversion for Scaled {
        fn arity(&self) -> usize {
            2
        }
        fn convert(&self, value: &Value) -> f64 {
            value.as_number().unwrap_or(0.0) * self.factor
        }
    }

    #[test]
    fn test_defaults() {
        let registry = CoercionRegistry::new();
        assert_eq!(registry.numeric_value(&Value::from(true)), Some(Score::from(1.0)));
        assert_eq!(registry.numeric_value(&Value::from(false)), Some(Score::from(0.0)));
        assert_eq!(registry.numeric_value(&Value::Null), Some(Score::from(0.0)));
    }

    #[test]
    fn test_empty_has_no_defaults() {
        let registry = CoercionRegistry::empty();
        assert!(!registry.contains(&ValueKind::True));
        assert_eq!(registry.numeric_value(&Value::from(true)), None);
        assert_eq!(registry.numeric_value(&Value::from(3)), Some(Score::from(3)));
    }

    #[test]
    fn test_lookup_absent() {
        let registry = CoercionRegistry::new();
        assert!(registry.lookup(&ValueKind::Text).is_none());
        assert_eq!(registry.numeric_value(&Value::from("abc")), None);
    }

    #[test]
    fn test_register_and_unregister() {
        let registry = CoercionRegistry::new();
        registry.register(ValueKind::Text, text_length).unwrap();
        assert_eq!(registry.numeric_value(&Value::from("abc")), Some(Score::from(3.0)));

        assert!(registry.unregister(&ValueKind::Text));
        assert_eq!(registry.numeric_value(&Value::from("abc")), None);
    }

    #[test]
    fn test_unregister_absent_is_noop() {
        let registry = CoercionRegistry::new();
        assert!(!registry.unregister(&ValueKind::Text));
        assert!(registry.contains(&ValueKind::True));
    }

    #[test]
    fn test_override_default() {
        let registry = CoercionRegistry::new();
        registry.register(ValueKind::Null, Constant(-1.0)).unwrap();
        assert_eq!(registry.numeric_value(&Value::Null), Some(Score::from(-1.0)));
    }

    #[test]
    fn test_register_rejects_binary_conversion() {
        let registry = CoercionRegistry::new();
        let result = registry.register(ValueKind::Integer, Scaled { factor: 2.0 });
        assert_eq!(
            result,
            Err(PrioraError::InvalidConversionFunction { arity: 2 })
        );
        assert!(!registry.contains(&ValueKind::Integer));
    }

    #[test]
    fn test_custom_kind_conversion() {
        let registry = CoercionRegistry::new();
        registry
            .register(ValueKind::Custom("version"), |v: &Value| match v {
                Value::Custom(c) => c
                    .downcast_ref::<(u32, u32)>()
                    .map_or(0.0, |&(major, minor)| f64::from(major) * 1000.0 + f64::from(minor)),
                _ => 0.0,
            })
            .unwrap();

        let value = Value::from(CustomValue::new("version", (2u32, 7u32)));
        assert_eq!(registry.numeric_value(&value), Some(Score::from(2007.0)));
    }

    #[test]
    fn test_integers_stay_exact() {
        let registry = CoercionRegistry::new();
        let big = (1i64 << 53) + 1;
        assert_eq!(
            registry.numeric_value(&Value::from(big)),
            Some(Score::Integer(i128::from(big)))
        );
    }

    #[test]
    fn test_snapshot_ignores_later_registrations() {
        let registry = CoercionRegistry::new();
        let snapshot = registry.snapshot();
        registry.register(ValueKind::Text, text_length).unwrap();
        registry.register(ValueKind::True, Constant(9.0)).unwrap();

        assert_eq!(snapshot.numeric_value(&Value::from("abc")), None);
        assert_eq!(snapshot.numeric_value(&Value::from(true)), Some(Score::from(1.0)));
        assert_eq!(registry.numeric_value(&Value::from(true)), Some(Score::from(9.0)));
    }

    #[test]
    fn test_debug_lists_kinds() {
        let registry = CoercionRegistry::new();
        let debug = format!("{registry:?}");
        assert!(debug.contains("true"));
        assert!(debug.contains("null"));
    }
}
