use crate::error::{ArrError, Result};
use crate::ordered_map::{ArrReadable, OrderedMap};
use crate::types::ArrKey;
use serde::ser::{Serialize, Serializer};
use smol_str::SmolStr;
use std::convert::TryFrom;

// ─── ArrNumber ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq)]
pub enum ArrNumber {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl std::fmt::Debug for ArrNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArrNumber::I64(i) => write!(f, "I64({})", i),
            ArrNumber::U64(u) => write!(f, "U64({})", u),
            ArrNumber::F64(v) => write!(f, "F64({})", v),
        }
    }
}

impl std::fmt::Display for ArrNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArrNumber::I64(i) => write!(f, "{}", i),
            ArrNumber::U64(u) => write!(f, "{}", u),
            ArrNumber::F64(v) => write!(f, "{}", v),
        }
    }
}

impl ArrNumber {
    pub fn as_f64(self) -> f64 {
        match self {
            ArrNumber::I64(i) => i as f64,
            ArrNumber::U64(u) => u as f64,
            ArrNumber::F64(f) => f,
        }
    }

    pub fn as_i64(self) -> Option<i64> {
        match self {
            ArrNumber::I64(i) => Some(i),
            ArrNumber::U64(u) => i64::try_from(u).ok(),
            ArrNumber::F64(f) => {
                if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
                    Some(f as i64)
                } else {
                    None
                }
            }
        }
    }

    pub fn as_u64(self) -> Option<u64> {
        match self {
            ArrNumber::U64(u) => Some(u),
            ArrNumber::I64(i) => u64::try_from(i).ok(),
            ArrNumber::F64(f) => {
                if f.fract() == 0.0 && f >= 0.0 && f <= u64::MAX as f64 {
                    Some(f as u64)
                } else {
                    None
                }
            }
        }
    }

    #[inline]
    pub fn is_integer(self) -> bool {
        !matches!(self, ArrNumber::F64(_))
    }

    #[inline]
    fn as_i128(self) -> Option<i128> {
        match self {
            ArrNumber::I64(i) => Some(i128::from(i)),
            ArrNumber::U64(u) => Some(i128::from(u)),
            ArrNumber::F64(_) => None,
        }
    }

    /// Numeric equality across representations (`1 == 1.0`).
    pub fn num_eq(self, other: ArrNumber) -> bool {
        match (self.as_i128(), other.as_i128()) {
            (Some(a), Some(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }

    /// Equality that also requires the same kind: integers only match
    /// integers, floats only match floats.
    pub fn strict_eq(self, other: ArrNumber) -> bool {
        match (self, other) {
            (ArrNumber::F64(a), ArrNumber::F64(b)) => a == b,
            _ => match (self.as_i128(), other.as_i128()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

// ─── ArrValue ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ArrValue {
    #[default]
    Null,
    Bool(bool),
    Number(ArrNumber),
    Str(SmolStr),
    Map(OrderedMap),
}

impl ArrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArrValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ArrValue::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ArrValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            ArrValue::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArrValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&OrderedMap> {
        match self {
            ArrValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn get(&self, key: impl Into<ArrKey>) -> Option<&ArrValue> {
        self.as_map()?.get_by_key(key)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ArrValue::Null)
    }

    pub fn is_map(&self) -> bool {
        matches!(self, ArrValue::Map(_))
    }

    /// Bool, number or string. `Null` is not a scalar here.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            ArrValue::Bool(_) | ArrValue::Number(_) | ArrValue::Str(_)
        )
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ArrValue::Null => "null",
            ArrValue::Bool(_) => "bool",
            ArrValue::Number(n) if n.is_integer() => "int",
            ArrValue::Number(_) => "float",
            ArrValue::Str(_) => "string",
            ArrValue::Map(_) => "map",
        }
    }

    /// Boolean conversion: `null`, `false`, `0`, `0.0`, `""`, `"0"` and the
    /// empty map are false, everything else is true.
    pub fn truthy(&self) -> bool {
        match self {
            ArrValue::Null => false,
            ArrValue::Bool(b) => *b,
            ArrValue::Number(n) => n.as_f64() != 0.0,
            ArrValue::Str(s) => !(s.is_empty() || s == "0"),
            ArrValue::Map(m) => !m.is_empty(),
        }
    }

    // ─── Comparison ─────────────────────────────────────────────────────────

    /// Loose equality (`==`): numeric strings compare as numbers, booleans
    /// compare by truthiness and maps compare by key/value pairs regardless
    /// of order.
    pub fn loose_eq(&self, other: &ArrValue) -> bool {
        match (self, other) {
            (ArrValue::Null, ArrValue::Null) => true,
            (ArrValue::Bool(b), v) | (v, ArrValue::Bool(b)) => *b == v.truthy(),
            (ArrValue::Null, ArrValue::Str(s)) | (ArrValue::Str(s), ArrValue::Null) => s.is_empty(),
            (ArrValue::Null, v) | (v, ArrValue::Null) => !v.truthy(),
            (ArrValue::Number(a), ArrValue::Number(b)) => a.num_eq(*b),
            (ArrValue::Number(n), ArrValue::Str(s)) | (ArrValue::Str(s), ArrValue::Number(n)) => {
                match parse_numeric(s) {
                    Some(parsed) => n.num_eq(parsed),
                    None => n.to_string() == s.as_str(),
                }
            }
            (ArrValue::Str(a), ArrValue::Str(b)) => match (parse_numeric(a), parse_numeric(b)) {
                (Some(x), Some(y)) => x.num_eq(y),
                _ => a == b,
            },
            (ArrValue::Map(a), ArrValue::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| b.get_by_key(k).is_some_and(|w| v.loose_eq(w)))
            }
            _ => false,
        }
    }

    /// Strict equality (`===`): same kind, same value, and for maps the
    /// same pairs in the same order.
    pub fn strict_eq(&self, other: &ArrValue) -> bool {
        match (self, other) {
            (ArrValue::Null, ArrValue::Null) => true,
            (ArrValue::Bool(a), ArrValue::Bool(b)) => a == b,
            (ArrValue::Number(a), ArrValue::Number(b)) => a.strict_eq(*b),
            (ArrValue::Str(a), ArrValue::Str(b)) => a == b,
            (ArrValue::Map(a), ArrValue::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|((ka, va), (kb, vb))| ka == kb && va.strict_eq(vb))
            }
            _ => false,
        }
    }

    // ─── Argument coercion ──────────────────────────────────────────────────

    fn integral(&self) -> Option<i64> {
        match self {
            ArrValue::Number(n) => n.as_i64(),
            ArrValue::Str(s) => parse_integer(s),
            _ => None,
        }
    }

    /// Coerce a dynamic positional index. Integers, integer-valued floats
    /// and integer strings are accepted.
    pub fn to_index(&self) -> Result<i64> {
        self.integral().ok_or_else(|| {
            tracing::debug!(kind = self.type_name(), "rejected index argument");
            ArrError::InvalidArgument(format!(
                "index must be an integer, got {}",
                self.type_name()
            ))
        })
    }

    /// Coerce a dynamic slice length. `Null` means "through the end".
    pub fn to_length(&self) -> Result<Option<usize>> {
        if self.is_null() {
            return Ok(None);
        }
        match self.integral().and_then(|i| usize::try_from(i).ok()) {
            Some(len) => Ok(Some(len)),
            None => {
                tracing::debug!(kind = self.type_name(), "rejected length argument");
                Err(ArrError::InvalidArgument(format!(
                    "length must be a non-negative integer or null, got {}",
                    self.type_name()
                )))
            }
        }
    }

    /// Coerce a dynamic chunk size or column count; must be positive.
    pub fn to_count(&self) -> Result<usize> {
        match self.integral().and_then(|i| usize::try_from(i).ok()) {
            Some(n) if n > 0 => Ok(n),
            _ => {
                tracing::debug!(kind = self.type_name(), "rejected count argument");
                Err(ArrError::InvalidArgument(format!(
                    "count must be a positive integer, got {}",
                    self.type_name()
                )))
            }
        }
    }
}

const NUMERIC_WHITESPACE: [char; 6] = [' ', '\t', '\n', '\r', '\x0b', '\x0c'];

/// Integer string: optional sign, ASCII digits, surrounding ASCII whitespace.
fn parse_integer(s: &str) -> Option<i64> {
    let trimmed = s.trim_matches(NUMERIC_WHITESPACE);
    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// Numeric string (integer, decimal or exponent form). `inf`/`nan` spellings
/// that `f64::from_str` would accept are not numeric.
fn parse_numeric(s: &str) -> Option<ArrNumber> {
    if let Some(i) = parse_integer(s) {
        return Some(ArrNumber::I64(i));
    }
    let trimmed = s.trim_matches(NUMERIC_WHITESPACE);
    let body = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if !body.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }
    trimmed.parse::<f64>().ok().map(ArrNumber::F64)
}

// ─── Serialize ──────────────────────────────────────────────────────────────

impl Serialize for ArrValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ArrValue::Null => serializer.serialize_none(),
            ArrValue::Bool(b) => serializer.serialize_bool(*b),
            ArrValue::Number(n) => match n {
                ArrNumber::I64(i) => serializer.serialize_i64(*i),
                ArrNumber::U64(u) => serializer.serialize_u64(*u),
                ArrNumber::F64(f) => serializer.serialize_f64(*f),
            },
            ArrValue::Str(s) => serializer.serialize_str(s.as_str()),
            ArrValue::Map(map) => map.serialize(serializer),
        }
    }
}

// ─── From impls ─────────────────────────────────────────────────────────────

impl From<f64> for ArrValue {
    fn from(n: f64) -> Self {
        ArrValue::Number(ArrNumber::F64(n))
    }
}

impl From<i64> for ArrValue {
    fn from(n: i64) -> Self {
        ArrValue::Number(ArrNumber::I64(n))
    }
}

impl From<i32> for ArrValue {
    fn from(n: i32) -> Self {
        ArrValue::Number(ArrNumber::I64(i64::from(n)))
    }
}

impl From<u32> for ArrValue {
    fn from(n: u32) -> Self {
        ArrValue::Number(ArrNumber::I64(i64::from(n)))
    }
}

/// `I64` whenever the value fits; `U64` only above `i64::MAX`.
impl From<u64> for ArrValue {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(i) => ArrValue::Number(ArrNumber::I64(i)),
            Err(_) => ArrValue::Number(ArrNumber::U64(n)),
        }
    }
}

impl From<usize> for ArrValue {
    fn from(n: usize) -> Self {
        match i64::try_from(n) {
            Ok(i) => ArrValue::Number(ArrNumber::I64(i)),
            Err(_) => ArrValue::Number(ArrNumber::U64(n as u64)),
        }
    }
}

impl From<bool> for ArrValue {
    fn from(b: bool) -> Self {
        ArrValue::Bool(b)
    }
}

impl From<&str> for ArrValue {
    fn from(s: &str) -> Self {
        ArrValue::Str(SmolStr::from(s))
    }
}

impl From<String> for ArrValue {
    fn from(s: String) -> Self {
        ArrValue::Str(SmolStr::from(s))
    }
}

impl From<SmolStr> for ArrValue {
    fn from(s: SmolStr) -> Self {
        ArrValue::Str(s)
    }
}

impl From<OrderedMap> for ArrValue {
    fn from(map: OrderedMap) -> Self {
        ArrValue::Map(map)
    }
}

impl From<ArrKey> for ArrValue {
    fn from(key: ArrKey) -> Self {
        match key {
            ArrKey::Int(i) => ArrValue::Number(ArrNumber::I64(i)),
            ArrKey::Str(s) => ArrValue::Str(s),
        }
    }
}

impl<T: Into<ArrValue>> From<Option<T>> for ArrValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(ArrValue::Null, Into::into)
    }
}

// ─── From/Into serde_json::Value ────────────────────────────────────────────

impl From<serde_json::Value> for ArrValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => ArrValue::Null,
            serde_json::Value::Bool(b) => ArrValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ArrValue::Number(ArrNumber::I64(i))
                } else if let Some(u) = n.as_u64() {
                    ArrValue::Number(ArrNumber::U64(u))
                } else {
                    ArrValue::Number(ArrNumber::F64(n.as_f64().unwrap_or(0.0)))
                }
            }
            serde_json::Value::String(s) => ArrValue::Str(SmolStr::from(s)),
            serde_json::Value::Array(arr) => {
                ArrValue::Map(arr.into_iter().map(ArrValue::from).collect())
            }
            serde_json::Value::Object(obj) => ArrValue::Map(
                obj.into_iter()
                    .map(|(k, v)| (ArrKey::canonical(&k), ArrValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&ArrValue> for serde_json::Value {
    fn from(val: &ArrValue) -> Self {
        match val {
            ArrValue::Null => serde_json::Value::Null,
            ArrValue::Bool(b) => serde_json::Value::Bool(*b),
            ArrValue::Number(n) => match n {
                ArrNumber::I64(i) => serde_json::json!(i),
                ArrNumber::U64(u) => serde_json::json!(u),
                ArrNumber::F64(f) => serde_json::json!(f),
            },
            ArrValue::Str(s) => serde_json::Value::String(s.to_string()),
            ArrValue::Map(map) => serde_json::Value::from(map),
        }
    }
}

impl From<ArrValue> for serde_json::Value {
    fn from(val: ArrValue) -> Self {
        serde_json::Value::from(&val)
    }
}
