//! Typed setting values.
//!
//! Every setting holds exactly one [`Value`].  The set of variants is closed:
//! serialization, presentation, and CLI parsing all match exhaustively on it,
//! so adding a variant is a compile error everywhere it needs handling.
//!
//! `Value::Nil` is the "no value" sentinel.  It is never stored; writing it
//! through [`crate::PropertyStore::set`] removes the key instead.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when an HTML color literal cannot be parsed.
#[derive(Debug, Error, PartialEq)]
pub enum ColorParseError {
    /// The literal is not 6 (`RRGGBB`) or 8 (`AARRGGBB`) hex digits long.
    #[error("invalid color length {0}: expected 6 or 8 hex digits")]
    InvalidLength(usize),

    /// The literal contains a character outside `[0-9a-fA-F]`.
    #[error("invalid hex digit in color literal: {0:?}")]
    InvalidDigit(String),
}

/// RGBA color with `f32` channels in the `0.0..=1.0` range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Converts from a hex `u32` laid out as `0xRRGGBB` (opaque).
    pub fn from_hex_rgb(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self { r, g, b, a: 1.0 }
    }

    /// Converts from a hex `u32` laid out as `0xAARRGGBB`.
    pub fn from_hex_argb(hex: u32) -> Self {
        let a = ((hex >> 24) & 0xFF) as f32 / 255.0;
        Self {
            a,
            ..Self::from_hex_rgb(hex & 0x00FF_FFFF)
        }
    }

    /// Parses an HTML color literal: `RRGGBB` or `AARRGGBB`, with an optional
    /// leading `#`.  Alpha comes first in the 8-digit form.
    ///
    /// # Errors
    ///
    /// Returns [`ColorParseError`] if the length or any digit is invalid.
    pub fn from_html(literal: &str) -> Result<Self, ColorParseError> {
        let digits = literal.strip_prefix('#').unwrap_or(literal);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(literal.to_string()));
        }
        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorParseError::InvalidLength(digits.len()));
        }
        let hex = u32::from_str_radix(digits, 16)
            .map_err(|_| ColorParseError::InvalidDigit(literal.to_string()))?;
        if digits.len() == 6 {
            Ok(Self::from_hex_rgb(hex))
        } else {
            Ok(Self::from_hex_argb(hex))
        }
    }

    /// Formats as an 8-digit `AARRGGBB` literal (no `#`).
    pub fn to_html(&self) -> String {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "{:02x}{:02x}{:02x}{:02x}",
            channel(self.a),
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

/// Two-dimensional vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Discriminant of a [`Value`], used by presentation layers and hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Nil,
    Bool,
    Int,
    Float,
    String,
    Color,
    Vector2,
    StringArray,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Nil => "nil",
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::String => "string",
            ValueType::Color => "color",
            ValueType::Vector2 => "vector2",
            ValueType::StringArray => "string_array",
        };
        f.write_str(name)
    }
}

/// A setting value.
///
/// Serialized adjacently tagged so the settings file stays readable:
///
/// ```toml
/// [setting.value]
/// type = "int"
/// value = 4
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Color(Color),
    Vector2(Vector2),
    StringArray(Vec<String>),
}

impl Value {
    /// Returns the discriminant of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Nil => ValueType::Nil,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::String(_) => ValueType::String,
            Value::Color(_) => ValueType::Color,
            Value::Vector2(_) => ValueType::Vector2,
            Value::StringArray(_) => ValueType::StringArray,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Converts a TOML value into a setting value.
    ///
    /// Inline tables with `r`, `g`, `b` (and optional `a`) keys become
    /// [`Value::Color`]; tables with `x` and `y` become [`Value::Vector2`].
    /// Returns `None` for shapes that have no setting counterpart (mixed
    /// arrays, datetimes, arbitrary tables).
    pub fn from_toml(value: &toml::Value) -> Option<Value> {
        match value {
            toml::Value::Boolean(b) => Some(Value::Bool(*b)),
            toml::Value::Integer(i) => Some(Value::Int(*i)),
            toml::Value::Float(f) => Some(Value::Float(*f)),
            toml::Value::String(s) => Some(Value::String(s.clone())),
            toml::Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(Value::StringArray),
            toml::Value::Table(table) => {
                let number = |key: &str| -> Option<f32> {
                    match table.get(key)? {
                        toml::Value::Float(f) => Some(*f as f32),
                        toml::Value::Integer(i) => Some(*i as f32),
                        _ => None,
                    }
                };
                if let (Some(r), Some(g), Some(b)) = (number("r"), number("g"), number("b")) {
                    let a = if table.contains_key("a") { number("a")? } else { 1.0 };
                    return Some(Value::Color(Color::rgba(r, g, b, a)));
                }
                match (number("x"), number("y")) {
                    (Some(x), Some(y)) if table.len() == 2 => {
                        Some(Value::Vector2(Vector2::new(x, y)))
                    }
                    _ => None,
                }
            }
            toml::Value::Datetime(_) => None,
        }
    }

    /// Parses a value literal typed by a user, e.g. on the command line.
    ///
    /// The text is interpreted as a TOML value (`true`, `4`, `0.5`,
    /// `"text"`, `["a", "b"]`, `{ x = 1, y = 2 }`).  A leading `#` followed
    /// by hex digits is read as an HTML color.  Anything else is taken
    /// verbatim as a string, so `set help/doc_path /usr/share/doc` works
    /// without quoting.
    pub fn parse_literal(text: &str) -> Value {
        let trimmed = text.trim();
        if trimmed.starts_with('#') {
            if let Ok(color) = Color::from_html(trimmed) {
                return Value::Color(color);
            }
        }
        toml::from_str::<toml::Table>(&format!("v = {trimmed}"))
            .ok()
            .and_then(|table| table.get("v").and_then(Value::from_toml))
            .unwrap_or_else(|| Value::String(text.to_string()))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => f.write_str(s),
            Value::Color(c) => write!(f, "#{}", c.to_html()),
            Value::Vector2(v) => write!(f, "({}, {})", v.x, v.y),
            Value::StringArray(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Value::Color(c)
    }
}

impl From<Vector2> for Value {
    fn from(v: Vector2) -> Self {
        Value::Vector2(v)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::StringArray(items)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
