use super::record::OrderedMap;
use crate::arr_value::ArrValue;
use crate::error::Result;
use crate::types::ArrKey;

/// Read access shared by [`OrderedMap`] and any type wrapping one.
///
/// Implementors only provide `store`; every query is resolved against the
/// entries of that map and never mutates it.
pub trait ArrReadable {
    fn store(&self) -> &OrderedMap;

    // ════════════════════════════════════════════════════════════════════════
    // Size
    // ════════════════════════════════════════════════════════════════════════

    #[inline]
    fn count(&self) -> usize {
        self.store().len()
    }

    /// Alias of `count`.
    #[inline]
    fn length(&self) -> usize {
        self.count()
    }

    /// Alias of `count`.
    #[inline]
    fn sizeof(&self) -> usize {
        self.count()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// The live entries. Read-only.
    #[inline]
    fn to_array(&self) -> &[(ArrKey, ArrValue)] {
        self.store().entries()
    }

    // ════════════════════════════════════════════════════════════════════════
    // Shape
    // ════════════════════════════════════════════════════════════════════════

    /// True if any value is itself a map.
    fn is_multi_dimensional(&self) -> bool {
        self.store().values().any(ArrValue::is_map)
    }

    /// True if every value is a bool, number or string. `Null` passes only
    /// when `allow_null` is set.
    fn is_scalar(&self, allow_null: bool) -> bool {
        self.store()
            .values()
            .all(|v| v.is_scalar() || (allow_null && v.is_null()))
    }

    /// True if every key is a non-negative integer. With `sequential_keys`
    /// the key at offset `i` must also be exactly `i`.
    fn is_indexed(&self, sequential_keys: bool) -> bool {
        self.store()
            .keys()
            .enumerate()
            .all(|(offset, key)| match key.as_int() {
                Some(i) if i >= 0 => !sequential_keys || i as u64 == offset as u64,
                _ => false,
            })
    }

    // ════════════════════════════════════════════════════════════════════════
    // Index queries
    // ════════════════════════════════════════════════════════════════════════

    /// True if `index` addresses an entry, counting from the end when
    /// negative: valid indexes are `-len..=len-1`.
    #[inline]
    fn has_index(&self, index: i64) -> bool {
        self.store().resolve_offset(index).is_some()
    }

    fn try_has_index(&self, index: &ArrValue) -> Result<bool> {
        Ok(self.has_index(index.to_index()?))
    }

    fn get_by_index(&self, index: i64) -> Option<&ArrValue> {
        let map = self.store();
        let offset = map.resolve_offset(index)?;
        map.entries().get(offset).map(|(_, v)| v)
    }

    fn try_get_by_index(&self, index: &ArrValue) -> Result<Option<&ArrValue>> {
        Ok(self.get_by_index(index.to_index()?))
    }

    #[inline]
    fn first(&self) -> Option<&ArrValue> {
        self.get_by_index(0)
    }

    #[inline]
    fn last(&self) -> Option<&ArrValue> {
        self.get_by_index(-1)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Key / value queries
    // ════════════════════════════════════════════════════════════════════════

    fn has_key(&self, key: impl Into<ArrKey>) -> bool {
        self.store().position_of(&key.into()).is_some()
    }

    fn get_by_key(&self, key: impl Into<ArrKey>) -> Option<&ArrValue> {
        let map = self.store();
        let pos = map.position_of(&key.into())?;
        map.entries().get(pos).map(|(_, v)| v)
    }

    fn has_value(&self, value: &ArrValue, strict: bool) -> bool {
        self.get_index_from_value(value, strict).is_some()
    }

    /// Key of the first entry whose value matches, or `None`.
    fn get_key_from_value(&self, value: &ArrValue, strict: bool) -> Option<&ArrKey> {
        let map = self.store();
        let offset = map_position(map, value, strict)?;
        map.entries().get(offset).map(|(k, _)| k)
    }

    /// Offset of the first entry whose value matches, or `None`.
    fn get_index_from_value(&self, value: &ArrValue, strict: bool) -> Option<usize> {
        map_position(self.store(), value, strict)
    }
}

fn map_position(map: &OrderedMap, value: &ArrValue, strict: bool) -> Option<usize> {
    if strict {
        map.values().position(|v| v.strict_eq(value))
    } else {
        map.values().position(|v| v.loose_eq(value))
    }
}
