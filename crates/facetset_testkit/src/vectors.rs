//! Rendering test vectors for facetset.
//!
//! These vectors pin the canonical JSON text produced for each value shape,
//! so the rendering rules stay stable across releases.

use facetset_json::Value;

/// A test vector pairing a value with its expected canonical text.
#[derive(Debug, Clone)]
pub struct RenderVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// The value to render.
    pub value: Value,
    /// Expected compact JSON text.
    pub expected: String,
}

/// Returns the standard rendering vectors.
#[must_use]
pub fn rendering_vectors() -> Vec<RenderVector> {
    vec![
        RenderVector {
            id: "null".into(),
            description: "Null value".into(),
            value: Value::Null,
            expected: "null".into(),
        },
        RenderVector {
            id: "bool_true".into(),
            description: "Boolean true".into(),
            value: Value::Bool(true),
            expected: "true".into(),
        },
        RenderVector {
            id: "bool_false".into(),
            description: "Boolean false".into(),
            value: Value::Bool(false),
            expected: "false".into(),
        },
        RenderVector {
            id: "int_0".into(),
            description: "Integer 0".into(),
            value: Value::Int(0),
            expected: "0".into(),
        },
        RenderVector {
            id: "int_negative".into(),
            description: "Negative integer".into(),
            value: Value::Int(-42),
            expected: "-42".into(),
        },
        RenderVector {
            id: "int_i64_max".into(),
            description: "Largest i64, plain decimal".into(),
            value: Value::Int(i64::MAX),
            expected: "9223372036854775807".into(),
        },
        RenderVector {
            id: "float_fractional".into(),
            description: "Fractional float".into(),
            value: Value::Float(0.5),
            expected: "0.5".into(),
        },
        RenderVector {
            id: "float_integral".into(),
            description: "Integral float keeps a fractional digit".into(),
            value: Value::Float(3.0),
            expected: "3.0".into(),
        },
        RenderVector {
            id: "float_large".into(),
            description: "Large float, no scientific notation".into(),
            value: Value::Float(1e20),
            expected: "100000000000000000000".into(),
        },
        RenderVector {
            id: "float_nan".into(),
            description: "NaN has no JSON form".into(),
            value: Value::Float(f64::NAN),
            expected: "null".into(),
        },
        RenderVector {
            id: "text_plain".into(),
            description: "Plain text".into(),
            value: Value::Text("Hello World".into()),
            expected: "\"Hello World\"".into(),
        },
        RenderVector {
            id: "text_escapes".into(),
            description: "Quotes, backslashes and newlines escape".into(),
            value: Value::Text("a\"b\\c\nd".into()),
            expected: "\"a\\\"b\\\\c\\nd\"".into(),
        },
        RenderVector {
            id: "array_empty".into(),
            description: "Empty array".into(),
            value: Value::Array(vec![]),
            expected: "[]".into(),
        },
        RenderVector {
            id: "array_mixed".into(),
            description: "Array preserves iteration order".into(),
            value: Value::Array(vec![
                Value::Int(1),
                Value::Text("two".into()),
                Value::Null,
            ]),
            expected: "[1,\"two\",null]".into(),
        },
        RenderVector {
            id: "map_empty".into(),
            description: "Empty map".into(),
            value: Value::Map(vec![]),
            expected: "{}".into(),
        },
        RenderVector {
            id: "map_null_key".into(),
            description: "Null key renders as the literal string null".into(),
            value: Value::map(vec![(Value::Null, Value::Bool(false))]),
            expected: "{\"null\":false}".into(),
        },
        RenderVector {
            id: "map_scalar_keys".into(),
            description: "Scalar keys use their textual representation".into(),
            value: Value::map(vec![
                (Value::Int(2), Value::Text("b".into())),
                (Value::Int(1), Value::Text("a".into())),
            ]),
            expected: "{\"1\":\"a\",\"2\":\"b\"}".into(),
        },
        RenderVector {
            id: "nested".into(),
            description: "Map of arrays".into(),
            value: Value::map(vec![
                (Value::Text("xs".into()), Value::Array(vec![Value::Int(1), Value::Int(2)])),
                (Value::Text("ys".into()), Value::Array(vec![])),
            ]),
            expected: "{\"xs\":[1,2],\"ys\":[]}".into(),
        },
    ]
}
