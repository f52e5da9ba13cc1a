//! Request parameters and their query-string encoding.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Parameters sent with a request: an ordered JSON object.
///
/// For GET they are flattened with [`Payload::to_query_pairs`]; for other
/// methods they form the JSON body.
///
/// # Example
///
/// ```rust
/// use assembla_api::rest::Payload;
/// use serde_json::json;
///
/// let params = Payload::try_from(json!({"page": 2, "filter": {"status": "open"}})).unwrap();
/// assert_eq!(params.to_query_string(), "?page=2&filter%5Bstatus%5D=open");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

impl Payload {
    /// Creates an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of top-level parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the value of a top-level parameter.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Sets a top-level parameter, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns the parameters as a JSON map.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Overlays `overlay` on top of `self`; keys of `overlay` win.
    #[must_use]
    pub fn merged(mut self, overlay: Self) -> Self {
        self.0.extend(overlay.0);
        self
    }

    /// Flattens the parameters into `(key, value)` pairs, not yet encoded.
    ///
    /// Nested objects become `parent[child]` keys and arrays become
    /// `parent[index]` keys. `null` values are left out. Whole-valued floats
    /// are written without a fraction, so `10.0` is sent as `10`.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (name, value) in &self.0 {
            flatten(&mut pairs, name.clone(), value);
        }
        pairs
    }

    /// Encodes the parameters as a query string, including the leading `?`.
    ///
    /// Keys and values of [`to_query_pairs`](Self::to_query_pairs) are
    /// percent-encoded. Returns an empty string when nothing is left to encode.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let pairs: Vec<String> = self
            .to_query_pairs()
            .iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect();

        if pairs.is_empty() {
            String::new()
        } else {
            format!("?{}", pairs.join("&"))
        }
    }
}

fn flatten(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Object(map) => {
            for (name, value) in map {
                flatten(pairs, format!("{key}[{name}]"), value);
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                flatten(pairs, format!("{key}[{index}]"), value);
            }
        }
        Value::String(text) => pairs.push((key, text.clone())),
        Value::Bool(flag) => pairs.push((key, flag.to_string())),
        Value::Number(number) => pairs.push((key, number_text(number))),
    }
}

// f64 Display drops a zero fraction, Number's Display keeps it.
fn number_text(number: &Number) -> String {
    match number.as_f64() {
        Some(float) if number.is_f64() => float.to_string(),
        _ => number.to_string(),
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Payload {
    type Error = Value;

    /// Takes the entries of a JSON object; `null` gives an empty payload.
    ///
    /// # Errors
    ///
    /// Any other value is handed back unchanged.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::default()),
            other => Err(other),
        }
    }
}

impl From<Payload> for Value {
    fn from(payload: Payload) -> Self {
        Self::Object(payload.0)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Payload {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
