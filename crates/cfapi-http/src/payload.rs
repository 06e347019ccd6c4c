//! Request payload types.
//!
//! A [`Payload`] is an ordered mapping of string keys to [`PayloadValue`]s.
//! The same value is encoded as a JSON document for body-carrying verbs and
//! as a form-encoded query string for `GET`.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// A single payload value.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<PayloadValue>),
    Map(Payload),
}

/// Ordered key/value payload. Keys keep insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    entries: Vec<(String, PayloadValue)>,
}

impl Payload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`. An existing key keeps its position and gets the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PayloadValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PayloadValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&PayloadValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PayloadValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Encode as a compact JSON document.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Encode as an `application/x-www-form-urlencoded` query string.
    ///
    /// Nested lists and maps use bracket keys (`tags[0]=a`, `meta[k]=v`),
    /// booleans become `1`/`0` and nulls are dropped.
    pub fn to_query(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.entries {
            append_query(&mut serializer, key, value);
        }
        serializer.finish()
    }
}

fn append_query(
    serializer: &mut url::form_urlencoded::Serializer<'_, String>,
    key: &str,
    value: &PayloadValue,
) {
    match value {
        PayloadValue::Null => {}
        PayloadValue::Bool(b) => {
            serializer.append_pair(key, if *b { "1" } else { "0" });
        }
        PayloadValue::Int(i) => {
            serializer.append_pair(key, &i.to_string());
        }
        PayloadValue::Float(f) => {
            serializer.append_pair(key, &f.to_string());
        }
        PayloadValue::String(s) => {
            serializer.append_pair(key, s);
        }
        PayloadValue::List(items) => {
            for (index, item) in items.iter().enumerate() {
                append_query(serializer, &format!("{key}[{index}]"), item);
            }
        }
        PayloadValue::Map(map) => {
            for (sub, item) in &map.entries {
                append_query(serializer, &format!("{key}[{sub}]"), item);
            }
        }
    }
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for PayloadValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PayloadValue::Null => serializer.serialize_unit(),
            PayloadValue::Bool(b) => serializer.serialize_bool(*b),
            PayloadValue::Int(i) => serializer.serialize_i64(*i),
            PayloadValue::Float(f) => serializer.serialize_f64(*f),
            PayloadValue::String(s) => serializer.serialize_str(s),
            PayloadValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            PayloadValue::Map(map) => map.serialize(serializer),
        }
    }
}

impl From<bool> for PayloadValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for PayloadValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for PayloadValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u32> for PayloadValue {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for PayloadValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for PayloadValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for PayloadValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Payload> for PayloadValue {
    fn from(value: Payload) -> Self {
        Self::Map(value)
    }
}

impl<T: Into<PayloadValue>> From<Vec<T>> for PayloadValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<PayloadValue>> From<Option<T>> for PayloadValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<serde_json::Value> for PayloadValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => Self::Map(map.into_iter().collect()),
        }
    }
}

impl<K: Into<String>, V: Into<PayloadValue>> FromIterator<(K, V)> for Payload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut payload = Payload::new();
        for (key, value) in iter {
            payload.insert(key, value);
        }
        payload
    }
}

impl<K: Into<String>, V: Into<PayloadValue>, const N: usize> From<[(K, V); N]> for Payload {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
