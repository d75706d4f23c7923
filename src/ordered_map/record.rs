use super::read_op::ArrReadable;
use crate::arr_value::ArrValue;
use crate::error::{ArrError, Result};
use crate::types::{ArrKey, Iter, Keys, Values};
use rustc_hash::FxHashMap;

// ─── OrderedMap ─────────────────────────────────────────────────────────────

/// Ordered key/value collection.
///
/// Entries keep insertion order; that order defines the positional offset
/// used by every index-based operation. `positions` maps each key to its
/// offset so key lookups do not scan.
#[derive(Clone, Default)]
pub struct OrderedMap {
    entries: Vec<(ArrKey, ArrValue)>,
    positions: FxHashMap<ArrKey, usize>,
}

impl OrderedMap {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            positions: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Build from `(key, value)` pairs. A repeated key overwrites the
    /// earlier value but keeps the earlier position.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<ArrKey>,
        V: Into<ArrValue>,
    {
        let pairs = pairs.into_iter();
        let mut map = Self::with_capacity(pairs.size_hint().0);
        for (k, v) in pairs {
            map.insert_entry(k.into(), v.into());
        }
        map
    }

    /// Build a list: keys `0..n` in iteration order.
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ArrValue>,
    {
        let values = values.into_iter();
        let mut map = Self::with_capacity(values.size_hint().0);
        for (i, v) in values.enumerate() {
            map.insert_entry(ArrKey::from(i), v.into());
        }
        map
    }

    /// Copy the pairs of another map.
    #[inline]
    pub fn factory(source: &impl ArrReadable) -> Self {
        source.store().clone()
    }

    /// Rebuild from entries that are already known to have unique keys.
    /// With `preserve_keys == false` the keys are renumbered from 0.
    pub(crate) fn from_entries<'a, I>(entries: I, preserve_keys: bool) -> Self
    where
        I: IntoIterator<Item = &'a (ArrKey, ArrValue)>,
    {
        let entries = entries.into_iter();
        let mut map = Self::with_capacity(entries.size_hint().0);
        for (i, (k, v)) in entries.enumerate() {
            let key = if preserve_keys {
                k.clone()
            } else {
                ArrKey::from(i)
            };
            map.insert_entry(key, v.clone());
        }
        map
    }

    fn insert_entry(&mut self, key: ArrKey, value: ArrValue) {
        match self.positions.get(&key) {
            Some(&pos) => self.entries[pos].1 = value,
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn entries(&self) -> &[(ArrKey, ArrValue)] {
        &self.entries
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    #[inline]
    pub fn keys(&self) -> Keys<'_> {
        Keys {
            inner: self.entries.iter(),
        }
    }

    #[inline]
    pub fn values(&self) -> Values<'_> {
        Values {
            inner: self.entries.iter(),
        }
    }

    pub fn into_entries(self) -> Vec<(ArrKey, ArrValue)> {
        self.entries
    }

    #[inline]
    pub(crate) fn position_of(&self, key: &ArrKey) -> Option<usize> {
        self.positions.get(key).copied()
    }

    /// Offset of `index`, counting from the end when negative.
    /// `None` when the collection is empty or the index is out of range.
    #[inline]
    pub(crate) fn resolve_offset(&self, index: i64) -> Option<usize> {
        let len = self.entries.len() as i64;
        let offset = if index < 0 { len + index } else { index };
        (0..len).contains(&offset).then_some(offset as usize)
    }
}

impl PartialEq for OrderedMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl std::fmt::Debug for OrderedMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl ArrReadable for OrderedMap {
    #[inline]
    fn store(&self) -> &OrderedMap {
        self
    }
}

// ─── Conversions ────────────────────────────────────────────────────────────

impl<K: Into<ArrKey>, V: Into<ArrValue>> FromIterator<(K, V)> for OrderedMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl FromIterator<ArrValue> for OrderedMap {
    fn from_iter<I: IntoIterator<Item = ArrValue>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl<V: Into<ArrValue>> From<Vec<V>> for OrderedMap {
    fn from(values: Vec<V>) -> Self {
        Self::from_values(values)
    }
}

impl TryFrom<ArrValue> for OrderedMap {
    type Error = ArrError;

    fn try_from(value: ArrValue) -> Result<Self> {
        match value {
            ArrValue::Map(map) => Ok(map),
            other => {
                tracing::debug!(kind = other.type_name(), "rejected collection source");
                Err(ArrError::InvalidArgument(format!(
                    "expected a map, got {}",
                    other.type_name()
                )))
            }
        }
    }
}

impl TryFrom<serde_json::Value> for OrderedMap {
    type Error = ArrError;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                OrderedMap::try_from(ArrValue::from(value))
            }
            other => {
                tracing::debug!(json = %other, "rejected collection source");
                Err(ArrError::InvalidArgument(
                    "expected a JSON array or object".to_string(),
                ))
            }
        }
    }
}

impl<'a> IntoIterator for &'a OrderedMap {
    type Item = (&'a ArrKey, &'a ArrValue);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for OrderedMap {
    type Item = (ArrKey, ArrValue);
    type IntoIter = std::vec::IntoIter<(ArrKey, ArrValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_entries().into_iter()
    }
}
