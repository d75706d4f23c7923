//! Ordered key/value collections with positional slicing and chunking.
//!
//! [`OrderedMap`] keeps entries in insertion order under integer or string
//! keys. Shape and lookup queries live in [`ArrReadable`]; operations that
//! derive a new collection live in [`ArrTransform`] and go through the
//! [`Constructible`] hook, so wrapper types get their own type back.

pub mod arr_value;
pub mod encoding;
pub mod error;
pub mod ordered_map;
pub mod serialization;
pub mod types;

pub use arr_value::{ArrNumber, ArrValue};
pub use encoding::{QueryStringConfig, QueryStringEncodable};
pub use error::{ArrError, Result};
pub use ordered_map::{ArrReadable, ArrTransform, Constructible, OrderedMap};
pub use types::ArrKey;

/// Collection literal.
///
/// `arr![]` is empty, `arr![a, b]` is a list keyed from 0 and
/// `arr![k => v, ...]` takes explicit keys.
#[macro_export]
macro_rules! arr {
    () => {
        $crate::OrderedMap::new()
    };
    ($($key:expr => $val:expr),+ $(,)?) => {
        $crate::OrderedMap::from_pairs([
            $(($crate::ArrKey::from($key), $crate::ArrValue::from($val))),+
        ])
    };
    ($($val:expr),+ $(,)?) => {
        $crate::OrderedMap::from_values([$($crate::ArrValue::from($val)),+])
    };
}
