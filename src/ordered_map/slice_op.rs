use super::read_op::ArrReadable;
use super::record::OrderedMap;
use crate::arr_value::ArrValue;
use crate::error::{ArrError, Result};

// ─── Constructible ──────────────────────────────────────────────────────────

/// Creation hook for derived collections.
///
/// Every operation in [`ArrTransform`] builds its result through `create`,
/// so a wrapper type gets slices and chunks of its own type back.
pub trait Constructible: ArrReadable + Sized {
    fn create(map: OrderedMap) -> Self;
}

impl Constructible for OrderedMap {
    #[inline]
    fn create(map: OrderedMap) -> Self {
        map
    }
}

// ─── ArrTransform ───────────────────────────────────────────────────────────

/// Operations that produce a new collection. The source is never touched.
pub trait ArrTransform: Constructible {
    // ════════════════════════════════════════════════════════════════════════
    // Slicing
    // ════════════════════════════════════════════════════════════════════════

    /// Contiguous run of at most `length` entries (all remaining entries
    /// when `None`) starting at `index`. A negative `index` counts from the
    /// end. An out-of-range start yields an empty collection.
    fn slice(&self, index: i64, length: Option<usize>, preserve_keys: bool) -> Self {
        let map = self.store();
        let Some(start) = map.resolve_offset(index) else {
            return Self::create(OrderedMap::new());
        };
        let entries = &map.entries()[start..];
        let take = length.map_or(entries.len(), |len| len.min(entries.len()));
        Self::create(OrderedMap::from_entries(&entries[..take], preserve_keys))
    }

    /// `slice` with dynamic arguments; a `Null` length means "to the end".
    fn try_slice(&self, index: &ArrValue, length: &ArrValue, preserve_keys: bool) -> Result<Self> {
        let index = index.to_index()?;
        let length = length.to_length()?;
        Ok(self.slice(index, length, preserve_keys))
    }

    #[inline]
    fn slice_first(&self, preserve_keys: bool) -> Self {
        self.slice(0, Some(1), preserve_keys)
    }

    #[inline]
    fn slice_last(&self, preserve_keys: bool) -> Self {
        self.slice(-1, Some(1), preserve_keys)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Chunking
    // ════════════════════════════════════════════════════════════════════════

    /// Consecutive groups of `length` entries; the last one may be shorter.
    ///
    /// Returns `Ok(None)` for an empty collection, so "no chunks" is never
    /// confused with "one empty chunk".
    fn chunk(&self, length: usize, preserve_keys: bool) -> Result<Option<Vec<Self>>> {
        if length == 0 {
            tracing::debug!("rejected chunk length 0");
            return Err(ArrError::InvalidArgument(
                "chunk length must be a positive integer".to_string(),
            ));
        }
        let map = self.store();
        if map.is_empty() {
            return Ok(None);
        }
        let chunks = map
            .entries()
            .chunks(length)
            .map(|group| Self::create(OrderedMap::from_entries(group, preserve_keys)))
            .collect();
        Ok(Some(chunks))
    }

    fn try_chunk(&self, length: &ArrValue, preserve_keys: bool) -> Result<Option<Vec<Self>>> {
        self.chunk(length.to_count()?, preserve_keys)
    }

    /// Exactly `column_count` groups whose sizes differ by at most one.
    ///
    /// With `N` entries the first `N % column_count` groups hold one extra
    /// entry. When `N < column_count` the trailing groups are empty.
    fn chunk_columns(&self, column_count: usize, preserve_keys: bool) -> Result<Option<Vec<Self>>> {
        if column_count == 0 {
            tracing::debug!("rejected column count 0");
            return Err(ArrError::InvalidArgument(
                "column count must be a positive integer".to_string(),
            ));
        }
        let map = self.store();
        if map.is_empty() {
            return Ok(None);
        }
        let entries = map.entries();
        let base = entries.len() / column_count;
        let remainder = entries.len() % column_count;

        let mut start = 0;
        let columns = (0..column_count)
            .map(|column| {
                let size = base + usize::from(column < remainder);
                let group = &entries[start..start + size];
                start += size;
                Self::create(OrderedMap::from_entries(group, preserve_keys))
            })
            .collect();
        Ok(Some(columns))
    }

    fn try_chunk_columns(
        &self,
        column_count: &ArrValue,
        preserve_keys: bool,
    ) -> Result<Option<Vec<Self>>> {
        self.chunk_columns(column_count.to_count()?, preserve_keys)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Views
    // ════════════════════════════════════════════════════════════════════════

    /// Offsets `0..len` as values.
    fn get_indexes(&self) -> Self {
        Self::create(OrderedMap::from_values(0..self.count()))
    }

    /// Keys as values, keyed `0..len`.
    fn get_keys(&self) -> Self {
        Self::create(OrderedMap::from_values(self.store().keys().cloned()))
    }

    /// Values keyed `0..len`.
    fn get_values(&self) -> Self {
        Self::create(OrderedMap::from_values(self.store().values().cloned()))
    }
}

impl<T: Constructible> ArrTransform for T {}
