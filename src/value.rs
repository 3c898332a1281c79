//! Attribute values and the capability trait objects expose them through.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// The runtime kind of a [`Value`], used as the coercion registry key.
///
/// Booleans are split into `True` and `False` so each can carry its own
/// conversion.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// A signed integer.
    Integer,
    /// A floating-point number.
    Float,
    /// The boolean `true`.
    True,
    /// The boolean `false`.
    False,
    /// An absent value.
    Null,
    /// A string.
    Text,
    /// A user-defined kind, named by the [`CustomValue`] that carries it.
    Custom(&'static str),
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Integer => f.write_str("integer"),
            ValueKind::Float => f.write_str("float"),
            ValueKind::True => f.write_str("true"),
            ValueKind::False => f.write_str("false"),
            ValueKind::Null => f.write_str("null"),
            ValueKind::Text => f.write_str("text"),
            ValueKind::Custom(name) => f.write_str(name),
        }
    }
}

/// An opaque attribute value of a user-defined kind.
///
/// Conversions registered for `ValueKind::Custom(kind)` receive the value
/// and can recover the payload with [`CustomValue::downcast_ref`].
#[derive(Clone)]
pub struct CustomValue {
    kind: &'static str,
    payload: Arc<dyn Any + Send + Sync>,
}

impl CustomValue {
    /// Wraps `payload` as a value of the custom `kind`.
    pub fn new<P: Any + Send + Sync>(kind: &'static str, payload: P) -> Self {
        Self {
            kind,
            payload: Arc::new(payload),
        }
    }

    /// The custom kind name.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Returns the payload if it is a `P`.
    pub fn downcast_ref<P: Any>(&self) -> Option<&P> {
        self.payload.downcast_ref::<P>()
    }
}

impl fmt::Debug for CustomValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomValue")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// A raw attribute value read off an object.
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
    Text(String),
    Custom(CustomValue),
}

impl Value {
    /// Returns the kind used to look up a conversion for this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Boolean(true) => ValueKind::True,
            Value::Boolean(false) => ValueKind::False,
            Value::Null => ValueKind::Null,
            Value::Text(_) => ValueKind::Text,
            Value::Custom(custom) => ValueKind::Custom(custom.kind()),
        }
    }

    /// Returns the value as a float if it is natively numeric.
    ///
    /// Integers beyond 2^53 are rounded. Prioritization itself compares
    /// integers exactly, see [`Score`](crate::Score).
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Returns the text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Integer(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v.into())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<CustomValue> for Value {
    fn from(v: CustomValue) -> Self {
        Value::Custom(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// An object whose named attributes can be read for prioritization.
///
/// Returning `None` from [`attribute`](Prioritizable::attribute) means the
/// object has no such attribute; a present-but-empty attribute should be
/// reported as `Some(Value::Null)`.
///
/// Implementors may borrow data. Only declared default priorities need
/// `'static` types, since they are keyed by [`TypeId`].
///
/// # Examples
///
/// ```
/// use u_priora::{Prioritizable, Value};
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
/// ```
pub trait Prioritizable {
    /// Reads the attribute called `name`.
    fn attribute(&self, name: &str) -> Option<Value>;

    /// Key under which this object's type declares default priorities.
    fn priority_key(&self) -> TypeId
    where
        Self: 'static,
    {
        TypeId::of::<Self>()
    }

    /// Type name reported in attribute errors.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<T: Prioritizable + ?Sized> Prioritizable for Box<T> {
    fn attribute(&self, name: &str) -> Option<Value> {
        (**self).attribute(name)
    }

    fn priority_key(&self) -> TypeId
    where
        Self: 'static,
    {
        (**self).priority_key()
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }
}

impl<T: Prioritizable + ?Sized> Prioritizable for Arc<T> {
    fn attribute(&self, name: &str) -> Option<Value> {
        (**self).attribute(name)
    }

    fn priority_key(&self) -> TypeId
    where
        Self: 'static,
    {
        (**self).priority_key()
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }
}
