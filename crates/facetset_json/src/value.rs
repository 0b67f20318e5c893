//! Dynamic value type.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// A dynamic value derived from an element.
///
/// `Value` is the type-erased result of an extractor: different extractors
/// on the same element type may produce different result types, so buckets
/// are keyed by this variant wrapper. It is usable as a hash-map key —
/// floats compare and hash by their bit pattern, which keeps the `Eq`/`Hash`
/// contract lawful at the cost of `Int(1) != Float(1.0)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer (full i64 range).
    Int(i64),
    /// Floating-point value (bitwise equality and hashing).
    Float(f64),
    /// Text string (UTF-8).
    Text(String),
    /// Array of values.
    Array(Vec<Value>),
    /// Map of key-value pairs (keys sorted canonically by [`Value::map`]).
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Create a map value with canonically sorted keys.
    ///
    /// Sorting at construction makes structurally equal maps compare equal
    /// regardless of insertion order.
    pub fn map(mut pairs: Vec<(Value, Value)>) -> Self {
        pairs.sort_by(|a, b| a.0.cmp_canonical(&b.0));
        Value::Map(pairs)
    }

    /// Returns true if this value is `Null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Compare two values for canonical ordering.
    ///
    /// The order is total: variants are ranked first (null, bool, int,
    /// float, text, array, map), then contents are compared within the
    /// variant — length-first for texts, arrays and maps, `total_cmp` for
    /// floats. Used for reproducible rendering and snapshot layout.
    pub fn cmp_canonical(&self, other: &Self) -> Ordering {
        let self_rank = self.rank();
        let other_rank = other.rank();

        if self_rank != other_rank {
            return self_rank.cmp(&other_rank);
        }

        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Text(a), Value::Text(b)) => match a.len().cmp(&b.len()) {
                Ordering::Equal => a.cmp(b),
                ord => ord,
            },
            (Value::Array(a), Value::Array(b)) => match a.len().cmp(&b.len()) {
                Ordering::Equal => {
                    for (av, bv) in a.iter().zip(b.iter()) {
                        let ord = av.cmp_canonical(bv);
                        if ord != Ordering::Equal {
                            return ord;
                        }
                    }
                    Ordering::Equal
                }
                ord => ord,
            },
            (Value::Map(a), Value::Map(b)) => match a.len().cmp(&b.len()) {
                Ordering::Equal => {
                    for ((ak, av), (bk, bv)) in a.iter().zip(b.iter()) {
                        let key_ord = ak.cmp_canonical(bk);
                        if key_ord != Ordering::Equal {
                            return key_ord;
                        }
                        let val_ord = av.cmp_canonical(bv);
                        if val_ord != Ordering::Equal {
                            return val_ord;
                        }
                    }
                    Ordering::Equal
                }
                ord => ord,
            },
            _ => Ordering::Equal,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) => 2,
            Value::Float(_) => 3,
            Value::Text(_) => 4,
            Value::Array(_) => 5,
            Value::Map(_) => 6,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(n) => n.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Text(s) => s.hash(state),
            Value::Array(items) => items.hash(state),
            Value::Map(pairs) => pairs.hash(state),
        }
    }
}

/// Conversion of an ordinary Rust value into a [`Value`].
///
/// Implemented for the scalar types extractors commonly derive, plus
/// `Option` (absent maps to `Null`) and `Vec`. Element types implement this
/// to participate in JSON rendering.
pub trait ToValue {
    /// Returns the [`Value`] representation of `self`.
    fn to_value(&self) -> Value;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

macro_rules! to_value_int {
    ($($t:ty),*) => {
        $(impl ToValue for $t {
            fn to_value(&self) -> Value {
                Value::Int(i64::from(*self))
            }
        })*
    };
}

to_value_int!(i8, i16, i32, i64, u8, u16, u32);

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl ToValue for char {
    fn to_value(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::Int(i64::from(n))
            }
        })*
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Text(c.to_string())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn map_sorts_keys() {
        let m = Value::map(vec![
            (Value::Text("bb".into()), Value::Int(2)),
            (Value::Text("a".into()), Value::Int(1)),
        ]);
        match m {
            Value::Map(pairs) => {
                assert_eq!(pairs[0].0, Value::Text("a".into()));
                assert_eq!(pairs[1].0, Value::Text("bb".into()));
            }
            _ => panic!("expected map"),
        }
    }

    #[test]
    fn map_equality_ignores_insertion_order() {
        let a = Value::map(vec![
            (Value::Int(1), Value::Bool(true)),
            (Value::Int(2), Value::Bool(false)),
        ]);
        let b = Value::map(vec![
            (Value::Int(2), Value::Bool(false)),
            (Value::Int(1), Value::Bool(true)),
        ]);
        assert_eq!(a, b);
    }

    #[test]
    fn float_is_a_usable_map_key() {
        let mut buckets: HashMap<Value, &str> = HashMap::new();
        buckets.insert(Value::Float(2.718), "e");
        buckets.insert(Value::Float(3.14), "pi");

        assert_eq!(buckets.get(&Value::Float(2.718)), Some(&"e"));
        assert_eq!(buckets.get(&Value::Float(2.719)), None);
    }

    #[test]
    fn float_nan_equals_itself_bitwise() {
        let nan = Value::Float(f64::NAN);
        assert_eq!(nan, nan.clone());
    }

    #[test]
    fn int_and_float_are_distinct() {
        assert_ne!(Value::Int(1), Value::Float(1.0));
    }

    #[test]
    fn canonical_order_ranks_variants() {
        let mut values = vec![
            Value::Text("a".into()),
            Value::Int(0),
            Value::Null,
            Value::Bool(true),
        ];
        values.sort_by(Value::cmp_canonical);
        assert_eq!(
            values,
            vec![
                Value::Null,
                Value::Bool(true),
                Value::Int(0),
                Value::Text("a".into()),
            ]
        );
    }

    #[test]
    fn canonical_order_text_length_first() {
        let a = Value::Text("zz".into());
        let b = Value::Text("aaa".into());
        assert_eq!(a.cmp_canonical(&b), Ordering::Less);
    }

    #[test]
    fn conversions() {
        assert_eq!(Value::from(42i32), Value::Int(42));
        assert_eq!(Value::from("hi"), Value::Text("hi".into()));
        assert_eq!(Value::from('x'), Value::Text("x".into()));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(5i64)), Value::Int(5));
        assert_eq!(3u16.to_value(), Value::Int(3));
        assert_eq!(
            vec!["a".to_string(), "b".to_string()].to_value(),
            Value::Array(vec![Value::Text("a".into()), Value::Text("b".into())])
        );
    }

    #[test]
    fn serde_roundtrip() {
        let value = Value::map(vec![
            (Value::Text("n".into()), Value::Int(-7)),
            (Value::Null, Value::Array(vec![Value::Float(1.5)])),
        ]);
        let json = serde_json::to_string(&value).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, back);
    }
}
