use crate::arr_value::ArrValue;
use smol_str::SmolStr;
use std::fmt;

// ─── ArrKey ─────────────────────────────────────────────────────────────────

/// Key of an [`OrderedMap`](crate::OrderedMap) entry.
///
/// Comparison is exact: `Int(1)` and `Str("1")` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArrKey {
    Int(i64),
    Str(SmolStr),
}

impl ArrKey {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ArrKey::Int(i) => Some(*i),
            ArrKey::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArrKey::Str(s) => Some(s.as_str()),
            ArrKey::Int(_) => None,
        }
    }

    #[inline]
    pub fn is_int(&self) -> bool {
        matches!(self, ArrKey::Int(_))
    }

    /// Key casting for string keys coming from text formats (JSON objects).
    ///
    /// A canonical decimal integer (`"0"`, `"42"`, `"-7"`) becomes `Int`;
    /// anything else, including `"07"`, `"+1"` and `"-0"`, stays `Str`.
    pub fn canonical(s: &str) -> Self {
        let digits = s.strip_prefix('-').unwrap_or(s);
        let is_canonical = !digits.is_empty()
            && digits.bytes().all(|b| b.is_ascii_digit())
            && (digits == "0" || !digits.starts_with('0'))
            && s != "-0";
        if is_canonical {
            if let Ok(i) = s.parse::<i64>() {
                return ArrKey::Int(i);
            }
        }
        ArrKey::Str(SmolStr::from(s))
    }
}

impl fmt::Display for ArrKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrKey::Int(i) => write!(f, "{i}"),
            ArrKey::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ArrKey {
    fn from(i: i64) -> Self {
        ArrKey::Int(i)
    }
}

impl From<i32> for ArrKey {
    fn from(i: i32) -> Self {
        ArrKey::Int(i64::from(i))
    }
}

impl From<u32> for ArrKey {
    fn from(i: u32) -> Self {
        ArrKey::Int(i64::from(i))
    }
}

impl From<usize> for ArrKey {
    fn from(i: usize) -> Self {
        ArrKey::Int(i as i64)
    }
}

impl From<&str> for ArrKey {
    fn from(s: &str) -> Self {
        ArrKey::Str(SmolStr::from(s))
    }
}

impl From<String> for ArrKey {
    fn from(s: String) -> Self {
        ArrKey::Str(SmolStr::from(s))
    }
}

impl From<&ArrKey> for ArrKey {
    fn from(key: &ArrKey) -> Self {
        key.clone()
    }
}

impl From<SmolStr> for ArrKey {
    fn from(s: SmolStr) -> Self {
        ArrKey::Str(s)
    }
}

// ─── Iterators ──────────────────────────────────────────────────────────────

/// Entries in insertion order.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    pub(crate) inner: std::slice::Iter<'a, (ArrKey, ArrValue)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a ArrKey, &'a ArrValue);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (k, v))
    }
}

impl<'a> ExactSizeIterator for Iter<'a> {}

#[derive(Debug, Clone)]
pub struct Keys<'a> {
    pub(crate) inner: std::slice::Iter<'a, (ArrKey, ArrValue)>,
}

impl<'a> Iterator for Keys<'a> {
    type Item = &'a ArrKey;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> ExactSizeIterator for Keys<'a> {}

#[derive(Debug, Clone)]
pub struct Values<'a> {
    pub(crate) inner: std::slice::Iter<'a, (ArrKey, ArrValue)>,
}

impl<'a> Iterator for Values<'a> {
    type Item = &'a ArrValue;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> ExactSizeIterator for Values<'a> {}
