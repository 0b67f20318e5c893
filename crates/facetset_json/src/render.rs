//! JSON text rendering.

use crate::value::Value;

/// Render a value as compact JSON.
///
/// The output is deterministic: a given value always renders to the same
/// text. See the crate-level documentation for the rendering rules.
#[must_use]
pub fn to_json_string(value: &Value) -> String {
    let mut renderer = Renderer::new(false);
    renderer.render(value);
    renderer.into_string()
}

/// Render a value as pretty-printed JSON (2-space indentation).
#[must_use]
pub fn to_json_string_pretty(value: &Value) -> String {
    let mut renderer = Renderer::new(true);
    renderer.render(value);
    renderer.into_string()
}

/// A JSON text renderer.
///
/// Walks a [`Value`] tree and appends JSON text to an internal buffer.
struct Renderer {
    out: String,
    pretty: bool,
    depth: usize,
}

impl Renderer {
    fn new(pretty: bool) -> Self {
        Self {
            out: String::new(),
            pretty,
            depth: 0,
        }
    }

    fn into_string(self) -> String {
        self.out
    }

    fn render(&mut self, value: &Value) {
        match value {
            Value::Null => self.out.push_str("null"),
            Value::Bool(b) => self.out.push_str(if *b { "true" } else { "false" }),
            Value::Int(n) => self.out.push_str(&n.to_string()),
            Value::Float(f) => {
                let text = float_text(*f);
                self.out.push_str(&text);
            }
            Value::Text(s) => self.render_string(s),
            Value::Array(items) => self.render_array(items),
            Value::Map(pairs) => self.render_map(pairs),
        }
    }

    fn render_array(&mut self, items: &[Value]) {
        if items.is_empty() {
            self.out.push_str("[]");
            return;
        }
        self.out.push('[');
        self.depth += 1;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.newline_indent();
            self.render(item);
        }
        self.depth -= 1;
        self.newline_indent();
        self.out.push(']');
    }

    fn render_map(&mut self, pairs: &[(Value, Value)]) {
        if pairs.is_empty() {
            self.out.push_str("{}");
            return;
        }
        self.out.push('{');
        self.depth += 1;
        for (i, (key, value)) in pairs.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.newline_indent();
            self.render_string(&key_text(key));
            self.out.push(':');
            if self.pretty {
                self.out.push(' ');
            }
            self.render(value);
        }
        self.depth -= 1;
        self.newline_indent();
        self.out.push('}');
    }

    fn render_string(&mut self, s: &str) {
        self.out.push('"');
        for c in s.chars() {
            match c {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                '\n' => self.out.push_str("\\n"),
                '\r' => self.out.push_str("\\r"),
                '\t' => self.out.push_str("\\t"),
                c if (c as u32) < 0x20 => {
                    self.out.push_str(&format!("\\u{:04x}", c as u32));
                }
                c => self.out.push(c),
            }
        }
        self.out.push('"');
    }

    fn newline_indent(&mut self) {
        if self.pretty {
            self.out.push('\n');
            for _ in 0..self.depth {
                self.out.push_str("  ");
            }
        }
    }
}

/// Textual form of a map key.
///
/// A null key becomes the literal text `null`; scalar keys use their plain
/// textual representation; container keys use their compact JSON text.
fn key_text(key: &Value) -> String {
    match key {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(n) => n.to_string(),
        Value::Float(f) => float_text(*f),
        Value::Text(s) => s.clone(),
        Value::Array(_) | Value::Map(_) => to_json_string(key),
    }
}

/// Textual form of a float.
///
/// Non-finite floats have no JSON representation and render as `null`.
/// Finite integral floats keep one fractional digit so they stay
/// distinguishable from integers; everything else uses the shortest
/// round-tripping decimal form, never scientific notation.
fn float_text(f: f64) -> String {
    if !f.is_finite() {
        return "null".to_string();
    }
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{f:.1}")
    } else {
        format!("{f}")
    }
}
