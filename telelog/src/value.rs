use std::fmt;
use std::sync::Arc;

/// How many nested lazy wrappers [`Value::resolve`] strips before degrading
/// to the opaque marker.
const MAX_LAZY_DEPTH: usize = 32;

/// Rendering used for a lazy chain deeper than `MAX_LAZY_DEPTH`.
const UNRESOLVED_LAZY: &str = "<unresolved lazy chain>";

/// A deferred [`Value`], evaluated only when resolution is required.
///
/// Evaluation may itself yield another lazy value; [`Value::resolve`] strips
/// the wrappers recursively.
#[derive(Clone)]
pub struct LazyValue(Arc<dyn Fn() -> Value + Send + Sync>);

impl LazyValue {
    /// Evaluates a single layer, yielding the inner value.
    pub fn get(&self) -> Value {
        (self.0)()
    }
}

impl fmt::Debug for LazyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LazyValue(..)")
    }
}

/// An arbitrary payload carried by [`Value::Opaque`].
///
/// Backends have no native representation for these; they are forwarded as
/// the payload's [`Display`](fmt::Display) rendering, an explicitly lossy
/// boundary.
#[derive(Clone)]
pub struct OpaqueValue(Arc<dyn fmt::Display + Send + Sync>);

impl OpaqueValue {
    /// Wraps any displayable payload.
    pub fn new(value: impl fmt::Display + Send + Sync + 'static) -> Self {
        OpaqueValue(Arc::new(value))
    }
}

impl fmt::Display for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpaqueValue({})", self.0)
    }
}

/// The closed set of value shapes a [`LogEntry`](crate::LogEntry) can carry.
///
/// The enum is deliberately exhaustive-matched by adapters: adding a variant
/// forces every dispatch site (event mapping, span-attribute mapping, context
/// rendering) to be revisited at compile time.
#[derive(Debug, Clone)]
pub enum Value {
    /// A deferred value; transparent to all consumers after resolution.
    Lazy(LazyValue),
    /// A boolean.
    Bool(bool),
    /// An 8-bit signed integer.
    Byte(i8),
    /// A 16-bit signed integer.
    Short(i16),
    /// A 32-bit signed integer.
    Int(i32),
    /// A 64-bit signed integer.
    Long(i64),
    /// A 32-bit float.
    Float(f32),
    /// A 64-bit float.
    Double(f64),
    /// Anything else, rendered as a string at the backend boundary.
    Opaque(OpaqueValue),
}

impl Value {
    /// Creates a lazy value from a thunk.
    pub fn lazy(f: impl Fn() -> Value + Send + Sync + 'static) -> Value {
        Value::Lazy(LazyValue(Arc::new(f)))
    }

    /// Creates an opaque value from any displayable payload.
    pub fn opaque(value: impl fmt::Display + Send + Sync + 'static) -> Value {
        Value::Opaque(OpaqueValue::new(value))
    }

    /// Strips lazy wrappers until a concrete variant is reached.
    ///
    /// Resolution is bounded: a chain of more than `MAX_LAZY_DEPTH` nested
    /// lazy values degrades to an opaque marker instead of looping.
    pub fn resolve(&self) -> Value {
        let mut current = self.clone();
        for _ in 0..MAX_LAZY_DEPTH {
            match current {
                Value::Lazy(lazy) => current = lazy.get(),
                resolved => return resolved,
            }
        }
        Value::opaque(UNRESOLVED_LAZY)
    }
}

/// Renders the fully resolved underlying value.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.resolve() {
            // resolve() never returns a lazy variant.
            Value::Lazy(_) => f.write_str(UNRESOLVED_LAZY),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Byte(v) => write!(f, "{v}"),
            Value::Short(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Long(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Opaque(v) => v.fmt(f),
        }
    }
}

macro_rules! impl_scalar_from {
    ($t:ty, $variant:path) => {
        impl From<$t> for Value {
            fn from(value: $t) -> Value {
                $variant(value)
            }
        }
    };
}

impl_scalar_from!(bool, Value::Bool);
impl_scalar_from!(i8, Value::Byte);
impl_scalar_from!(i16, Value::Short);
impl_scalar_from!(i32, Value::Int);
impl_scalar_from!(i64, Value::Long);
impl_scalar_from!(f32, Value::Float);
impl_scalar_from!(f64, Value::Double);

impl From<String> for Value {
    fn from(value: String) -> Value {
        Value::opaque(value)
    }
}

impl From<&'static str> for Value {
    fn from(value: &'static str) -> Value {
        Value::opaque(value)
    }
}
