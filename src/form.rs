//! Form-encoded query strings with bracketed nested keys.
//!
//! The codec follows the conventional `application/x-www-form-urlencoded`
//! dialect with bracket syntax for nesting:
//!
//! ```text
//! a=1&b[x]=2&b[y]=3&list[]=p&list[]=q
//! ```
//!
//! decodes to `{a: "1", b: {x: "2", y: "3"}, list: {"0": "p", "1": "q"}}`.
//! Lists are mappings keyed by consecutive integers. On output, brackets are
//! percent-encoded (`b%5Bx%5D=2`) and spaces become `+`.

use indexmap::IndexMap;
use percent_encoding::{percent_decode_str, utf8_percent_encode};

use crate::constants::FORM;
use crate::error::QueryError;

/// Deepest bracket nesting [`decode`] accepts; pairs nested deeper are
/// dropped.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Ordered mapping from query keys to values.
pub type QueryMap = IndexMap<String, QueryValue>;

/// A value in a structured query.
///
/// `Null` cannot be encoded. It exists so callers can build mappings from
/// sources with missing values and then clean them with [`nulls_to_empty`]
/// or [`without_nulls`] before handing them to a URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// A missing value
    Null,
    /// A scalar value
    Text(String),
    /// A nested mapping or list
    Map(QueryMap),
}

impl QueryValue {
    /// Builds a list value keyed `"0"`, `"1"`, ...
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_trail::{QueryMap, QueryValue, form};
    ///
    /// let mut map = QueryMap::new();
    /// map.insert("foo".into(), QueryValue::list(["bar", "baz"]));
    /// assert_eq!(form::encode(&map).unwrap(), "foo%5B0%5D=bar&foo%5B1%5D=baz");
    /// ```
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Self>,
    {
        Self::Map(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| (i.to_string(), item.into()))
                .collect(),
        )
    }

    /// Returns the scalar text, if this is a scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the nested mapping, if this is one.
    #[must_use]
    pub const fn as_map(&self) -> Option<&QueryMap> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Returns true for `Null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<&str> for QueryValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<QueryMap> for QueryValue {
    fn from(m: QueryMap) -> Self {
        Self::Map(m)
    }
}

impl<T: Into<Self>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Encodes a mapping as a query string without the leading `?`.
///
/// # Errors
///
/// Returns `QueryError::NullValue` if any value, at any depth, is `Null`.
pub fn encode(map: &QueryMap) -> Result<String, QueryError> {
    if let Some(key) = find_null(map) {
        return Err(QueryError::NullValue { key });
    }
    Ok(render(map))
}

/// Encodes a mapping, skipping `Null` values.
pub(crate) fn render(map: &QueryMap) -> String {
    let mut pairs = Vec::new();
    render_into(&mut pairs, None, map);
    pairs.join("&")
}

fn render_into(pairs: &mut Vec<String>, prefix: Option<&str>, map: &QueryMap) {
    for (key, value) in map {
        let name = match prefix {
            None => encode_component(key),
            Some(prefix) => format!("{prefix}%5B{}%5D", encode_component(key)),
        };
        match value {
            QueryValue::Null => {}
            QueryValue::Text(text) => pairs.push(format!("{name}={}", encode_component(text))),
            QueryValue::Map(inner) => render_into(pairs, Some(&name), inner),
        }
    }
}

fn encode_component(input: &str) -> String {
    input
        .split(' ')
        .map(|part| utf8_percent_encode(part, FORM).to_string())
        .collect::<Vec<_>>()
        .join("+")
}

fn decode_component(input: &str) -> String {
    percent_decode_str(&input.replace('+', " "))
        .decode_utf8_lossy()
        .into_owned()
}

/// Decodes a query string (without the leading `?`) into a mapping.
///
/// Decoding never fails. Pairs with an empty key are dropped, a key without
/// `=` gets the empty value, and later keys overwrite earlier ones. A pair
/// nested deeper than [`MAX_NESTING_DEPTH`], or appending with `[]` after an
/// index of `u64::MAX`, is dropped.
///
/// # Examples
///
/// ```
/// use uri_trail::form;
///
/// let map = form::decode("a=1&b[x]=2&b[]=3");
/// assert_eq!(map["a"].as_str(), Some("1"));
/// let b = map["b"].as_map().unwrap();
/// assert_eq!(b["x"].as_str(), Some("2"));
/// assert_eq!(b["0"].as_str(), Some("3"));
/// ```
#[must_use]
pub fn decode(input: &str) -> QueryMap {
    let mut map = QueryMap::new();
    for pair in input.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode_component(raw_key);
        let Some((base, path)) = split_key(&key) else {
            continue;
        };
        insert(&mut map, base, &path, decode_component(raw_value));
    }
    map
}

/// Splits `a[b][]` into `a` and `[Some(b), None]`.
///
/// Returns `None` for an empty base name or for more than
/// [`MAX_NESTING_DEPTH`] bracket groups. Text after the last well-formed
/// bracket group is ignored, and a key whose first bracket never closes is
/// taken literally.
fn split_key(key: &str) -> Option<(String, Vec<Option<String>>)> {
    let Some(open) = key.find('[') else {
        return (!key.is_empty()).then(|| (key.to_string(), Vec::new()));
    };
    if key[open..].find(']').is_none() {
        return (!key.is_empty()).then(|| (key.to_string(), Vec::new()));
    }
    let base = &key[..open];
    if base.is_empty() {
        return None;
    }

    let mut path = Vec::new();
    let mut rest = &key[open..];
    while let Some(inner) = rest.strip_prefix('[') {
        let Some(close) = inner.find(']') else {
            break;
        };
        if path.len() == MAX_NESTING_DEPTH {
            return None;
        }
        let name = &inner[..close];
        path.push((!name.is_empty()).then(|| name.to_string()));
        rest = &inner[close + 1..];
    }
    Some((base.to_string(), path))
}

fn insert(map: &mut QueryMap, base: String, path: &[Option<String>], value: String) {
    let mut current = map;
    let mut key = base;
    for segment in path {
        let entry = current
            .entry(key)
            .or_insert_with(|| QueryValue::Map(QueryMap::new()));
        if !matches!(entry, QueryValue::Map(_)) {
            *entry = QueryValue::Map(QueryMap::new());
        }
        let QueryValue::Map(inner) = entry else {
            return;
        };
        key = match segment {
            Some(name) => name.clone(),
            None => match next_index(inner) {
                Some(index) => index,
                None => return,
            },
        };
        current = inner;
    }
    current.insert(key, QueryValue::Text(value));
}

/// Returns the key `[]` appends under: one past the largest integer key.
/// `None` once that key would not fit in a `u64`.
fn next_index(map: &QueryMap) -> Option<String> {
    map.keys()
        .filter_map(|k| k.parse::<u64>().ok())
        .max()
        .map_or(Some(0), |max| max.checked_add(1))
        .map(|index| index.to_string())
}

/// Returns the bracketed key path of the first `Null`, e.g. `b[y]`.
#[must_use]
pub fn find_null(map: &QueryMap) -> Option<String> {
    map.iter().find_map(|(key, value)| null_path(key, value))
}

/// Returns the key path of the first `Null` in `value` stored under `key`.
pub(crate) fn null_path(key: &str, value: &QueryValue) -> Option<String> {
    match value {
        QueryValue::Null => Some(key.to_string()),
        QueryValue::Text(_) => None,
        QueryValue::Map(inner) => find_null(inner).map(|path| nest_key(key, &path)),
    }
}

fn nest_key(key: &str, path: &str) -> String {
    match path.split_once('[') {
        Some((head, tail)) => format!("{key}[{head}][{tail}"),
        None => format!("{key}[{path}]"),
    }
}

/// Returns a copy of `map` with every `Null` replaced by the empty string.
#[must_use]
pub fn nulls_to_empty(map: &QueryMap) -> QueryMap {
    map.iter()
        .map(|(key, value)| {
            let value = match value {
                QueryValue::Null => QueryValue::Text(String::new()),
                QueryValue::Text(text) => QueryValue::Text(text.clone()),
                QueryValue::Map(inner) => QueryValue::Map(nulls_to_empty(inner)),
            };
            (key.clone(), value)
        })
        .collect()
}

/// Returns a copy of `map` with every `Null` entry removed.
#[must_use]
pub fn without_nulls(map: &QueryMap) -> QueryMap {
    map.iter()
        .filter_map(|(key, value)| {
            let value = match value {
                QueryValue::Null => return None,
                QueryValue::Text(text) => QueryValue::Text(text.clone()),
                QueryValue::Map(inner) => QueryValue::Map(without_nulls(inner)),
            };
            Some((key.clone(), value))
        })
        .collect()
}
