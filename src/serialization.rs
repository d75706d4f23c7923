use crate::arr_value::{ArrNumber, ArrValue};
use crate::error::{ArrError, Result};
use crate::ordered_map::OrderedMap;
use crate::types::ArrKey;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use smol_str::SmolStr;
use std::fmt;

// ─── Serialize ──────────────────────────────────────────────────────────────

impl Serialize for ArrKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ArrKey::Int(i) => serializer.serialize_i64(*i),
            ArrKey::Str(s) => serializer.serialize_str(s.as_str()),
        }
    }
}

/// Always a map, in insertion order. Integer keys stay integers, so a
/// format with typed map keys (CBOR) round-trips `Int(1)` and `Str("1")`.
impl Serialize for OrderedMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut m = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            m.serialize_entry(k, v)?;
        }
        m.end()
    }
}

// ─── Deserialize ────────────────────────────────────────────────────────────

struct KeyVisitor;

impl<'de> Visitor<'de> for KeyVisitor {
    type Value = ArrKey;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer or string key")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<ArrKey, E> {
        Ok(ArrKey::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<ArrKey, E> {
        i64::try_from(v)
            .map(ArrKey::Int)
            .map_err(|_| E::custom(format!("integer key {v} out of range")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<ArrKey, E> {
        Ok(ArrKey::Str(SmolStr::from(v)))
    }
}

impl<'de> Deserialize<'de> for ArrKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(KeyVisitor)
    }
}

/// Size hints come from the input; never trust them for more than a page.
fn cautious(hint: Option<usize>) -> usize {
    hint.unwrap_or(0).min(4096)
}

struct MapVisitor;

impl<'de> Visitor<'de> for MapVisitor {
    type Value = OrderedMap;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map or a sequence")
    }

    fn visit_map<A: MapAccess<'de>>(
        self,
        mut access: A,
    ) -> std::result::Result<OrderedMap, A::Error> {
        let mut pairs = Vec::with_capacity(cautious(access.size_hint()));
        while let Some((k, v)) = access.next_entry::<ArrKey, ArrValue>()? {
            pairs.push((k, v));
        }
        Ok(OrderedMap::from_pairs(pairs))
    }

    fn visit_seq<A: SeqAccess<'de>>(
        self,
        mut access: A,
    ) -> std::result::Result<OrderedMap, A::Error> {
        let mut values = Vec::with_capacity(cautious(access.size_hint()));
        while let Some(v) = access.next_element::<ArrValue>()? {
            values.push(v);
        }
        Ok(OrderedMap::from_values(values))
    }
}

impl<'de> Deserialize<'de> for OrderedMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(MapVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = ArrValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a scalar, a map or a sequence")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<ArrValue, E> {
        Ok(ArrValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<ArrValue, E> {
        Ok(ArrValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> std::result::Result<ArrValue, D::Error> {
        ArrValue::deserialize(d)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<ArrValue, E> {
        Ok(ArrValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<ArrValue, E> {
        Ok(ArrValue::Number(ArrNumber::I64(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<ArrValue, E> {
        Ok(match i64::try_from(v) {
            Ok(i) => ArrValue::Number(ArrNumber::I64(i)),
            Err(_) => ArrValue::Number(ArrNumber::U64(v)),
        })
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<ArrValue, E> {
        Ok(ArrValue::Number(ArrNumber::F64(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<ArrValue, E> {
        Ok(ArrValue::Str(SmolStr::from(v)))
    }

    fn visit_map<A: MapAccess<'de>>(self, access: A) -> std::result::Result<ArrValue, A::Error> {
        MapVisitor.visit_map(access).map(ArrValue::Map)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, access: A) -> std::result::Result<ArrValue, A::Error> {
        MapVisitor.visit_seq(access).map(ArrValue::Map)
    }
}

impl<'de> Deserialize<'de> for ArrValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

// ─── Byte round-trip ────────────────────────────────────────────────────────

impl OrderedMap {
    /// Encode the whole map as CBOR.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        cbor4ii::serde::to_writer(&mut buf, self)
            .map_err(|e| ArrError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Decode a map produced by [`OrderedMap::to_bytes`].
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        tracing::trace!(len = data.len(), "decoding map");
        cbor4ii::serde::from_slice(data).map_err(|e| ArrError::Deserialization(e.to_string()))
    }

    /// Replace the whole content with a decoded map. On error `self` is
    /// left untouched.
    pub fn unserialize(&mut self, data: &[u8]) -> Result<()> {
        let decoded = Self::from_bytes(data)?;
        tracing::trace!(old = self.len(), new = decoded.len(), "replacing map content");
        *self = decoded;
        Ok(())
    }
}
