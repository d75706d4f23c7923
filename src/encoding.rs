use crate::arr_value::ArrValue;
use crate::error::{ArrError, Result};
use crate::ordered_map::{ArrReadable, OrderedMap};
use crate::types::ArrKey;
use serde::{Deserialize, Serialize};

// ─── JSON ───────────────────────────────────────────────────────────────────

/// Lists (sequential integer keys from 0) become JSON arrays, anything else
/// becomes an object with stringified keys.
impl From<&OrderedMap> for serde_json::Value {
    fn from(map: &OrderedMap) -> Self {
        if map.is_indexed(true) {
            serde_json::Value::Array(map.values().map(serde_json::Value::from).collect())
        } else {
            serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.to_string(), serde_json::Value::from(v)))
                    .collect(),
            )
        }
    }
}

impl From<OrderedMap> for serde_json::Value {
    fn from(map: OrderedMap) -> Self {
        serde_json::Value::from(&map)
    }
}

fn force_object(map: &OrderedMap) -> serde_json::Value {
    serde_json::Value::Object(
        map.iter()
            .map(|(k, v)| {
                let value = match v {
                    ArrValue::Map(inner) => force_object(inner),
                    scalar => serde_json::Value::from(scalar),
                };
                (k.to_string(), value)
            })
            .collect(),
    )
}

impl OrderedMap {
    /// JSON object at every level, lists included.
    pub fn to_json_object(&self) -> serde_json::Value {
        force_object(self)
    }

    /// JSON array of the values in order; keys are dropped.
    pub fn to_json_array(&self) -> serde_json::Value {
        serde_json::Value::Array(self.values().map(serde_json::Value::from).collect())
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string(&serde_json::Value::from(self))
            .map_err(|e| ArrError::Serialization(e.to_string()))
    }

    /// Parse JSON text. Only arrays and objects are collections.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let json: serde_json::Value =
            serde_json::from_str(text).map_err(|e| ArrError::Deserialization(e.to_string()))?;
        OrderedMap::try_from(json)
    }
}

// ─── Query string ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryStringConfig {
    /// Prepended to top-level integer keys (`0=a` becomes `item_0=a`).
    pub numeric_prefix: String,
    pub arg_separator: String,
}

impl Default for QueryStringConfig {
    fn default() -> Self {
        Self {
            numeric_prefix: String::new(),
            arg_separator: "&".to_string(),
        }
    }
}

/// Values that can flatten themselves into `name=value` pairs.
pub trait QueryStringEncodable {
    /// Push unencoded pairs. `prefix` is the name this value is bound to,
    /// `None` at the top level.
    fn append_query_pairs(
        &self,
        prefix: Option<&str>,
        config: &QueryStringConfig,
        out: &mut Vec<(String, String)>,
    );

    fn to_query_string(&self, config: &QueryStringConfig) -> String {
        let mut pairs = Vec::new();
        self.append_query_pairs(None, config, &mut pairs);
        pairs
            .iter()
            .map(|(name, value)| format!("{}={}", form_encode(name), form_encode(value)))
            .collect::<Vec<_>>()
            .join(&config.arg_separator)
    }
}

fn form_encode(s: &str) -> String {
    url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
}

fn pair_name(prefix: Option<&str>, key: &ArrKey, config: &QueryStringConfig) -> String {
    match (prefix, key) {
        (Some(p), k) => format!("{p}[{k}]"),
        (None, ArrKey::Int(i)) => format!("{}{i}", config.numeric_prefix),
        (None, ArrKey::Str(s)) => s.to_string(),
    }
}

impl QueryStringEncodable for OrderedMap {
    fn append_query_pairs(
        &self,
        prefix: Option<&str>,
        config: &QueryStringConfig,
        out: &mut Vec<(String, String)>,
    ) {
        for (k, v) in self.iter() {
            let name = pair_name(prefix, k, config);
            v.append_query_pairs(Some(&name), config, out);
        }
    }
}

impl QueryStringEncodable for ArrValue {
    fn append_query_pairs(
        &self,
        prefix: Option<&str>,
        config: &QueryStringConfig,
        out: &mut Vec<(String, String)>,
    ) {
        let rendered = match self {
            ArrValue::Map(map) => return map.append_query_pairs(prefix, config, out),
            ArrValue::Null => return,
            ArrValue::Bool(b) => String::from(if *b { "1" } else { "0" }),
            ArrValue::Number(n) => n.to_string(),
            ArrValue::Str(s) => s.to_string(),
        };
        // a bare scalar has no name to bind to
        if let Some(name) = prefix {
            out.push((name.to_string(), rendered));
        }
    }
}
