//! Query models: how a URI variant stores its query component.

use std::borrow::Cow;
use std::fmt;

use crate::error::QueryError;
use crate::form::{self, QueryMap};

/// Storage for the query component of a URI.
///
/// A model must keep "no query" (`None`) distinct from "empty query"
/// (`Some("")`), since composition and relativization depend on it.
pub trait QueryModel: Clone + Default + PartialEq + fmt::Debug {
    /// Returns the encoded query string without the leading `?`.
    fn query_string(&self) -> Option<Cow<'_, str>>;

    /// Replaces the query from an encoded string.
    fn set_query_string(&mut self, query: Option<&str>);

    /// Returns true if a query is present, even an empty one.
    fn is_present(&self) -> bool {
        self.query_string().is_some()
    }
}

/// A query kept as the raw string it was given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct OpaqueQuery(Option<String>);

impl OpaqueQuery {
    /// Returns the raw query.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl QueryModel for OpaqueQuery {
    fn query_string(&self) -> Option<Cow<'_, str>> {
        self.0.as_deref().map(Cow::Borrowed)
    }

    fn set_query_string(&mut self, query: Option<&str>) {
        self.0 = query.map(str::to_string);
    }

    fn is_present(&self) -> bool {
        self.0.is_some()
    }
}

/// A query decoded into a nested key/value mapping.
///
/// `Some(empty map)` is a present but empty query and renders as `?`.
/// Stored mappings never contain `Null` values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormQuery(Option<QueryMap>);

impl FormQuery {
    /// Returns the decoded mapping, if a query is present.
    #[must_use]
    pub const fn map(&self) -> Option<&QueryMap> {
        self.0.as_ref()
    }

    /// Replaces the mapping.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::NullValue` if the mapping contains a `Null`
    /// anywhere. The stored mapping is left unchanged on failure.
    pub fn set_map(&mut self, map: Option<QueryMap>) -> Result<(), QueryError> {
        if let Some(key) = map.as_ref().and_then(form::find_null) {
            return Err(QueryError::NullValue { key });
        }
        self.0 = map;
        Ok(())
    }

    /// Returns the mapping for in-place edits, creating an empty one if absent.
    pub(crate) fn map_mut(&mut self) -> &mut QueryMap {
        self.0.get_or_insert_with(QueryMap::new)
    }
}

impl QueryModel for FormQuery {
    fn query_string(&self) -> Option<Cow<'_, str>> {
        self.0.as_ref().map(|map| Cow::Owned(form::render(map)))
    }

    fn set_query_string(&mut self, query: Option<&str>) {
        self.0 = query.map(form::decode);
    }

    fn is_present(&self) -> bool {
        self.0.is_some()
    }
}
