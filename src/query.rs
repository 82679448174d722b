//! Query construction for hydration and candidate fetches.
//!
//! Both request kinds share the same shape: a fixed `fields` selector, an
//! optional filter clause, then the caller's parameters layered on top.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::model::Identifier;

/// Path prefix of named filter resources.
pub const FILTER_RESOURCE_PREFIX: &str = "v1/statistic-light-filters";

/// Fields requested from the remote source.
pub const FIELDS: &str = "id,name";

/// Prefix marking a search term as an exact id lookup.
pub const ID_PREFIX: char = '#';

/// One element of a list parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    pub fn to_query_value(&self) -> String {
        match self {
            Scalar::Text(value) => value.clone(),
            Scalar::Int(value) => value.to_string(),
            Scalar::Float(value) => value.to_string(),
            Scalar::Bool(value) => value.to_string(),
        }
    }
}

/// A single caller-supplied query parameter value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    List(Vec<Scalar>),
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl ParamValue {
    /// Serialize for the query string; lists are comma-joined.
    pub fn to_query_value(&self) -> String {
        match self {
            ParamValue::List(values) => values
                .iter()
                .map(Scalar::to_query_value)
                .collect::<Vec<_>>()
                .join(","),
            ParamValue::Text(value) => value.clone(),
            ParamValue::Int(value) => value.to_string(),
            ParamValue::Float(value) => value.to_string(),
            ParamValue::Bool(value) => value.to_string(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(values: Vec<&str>) -> Self {
        ParamValue::List(values.into_iter().map(|v| Scalar::Text(v.to_string())).collect())
    }
}

impl From<Vec<i64>> for ParamValue {
    fn from(values: Vec<i64>) -> Self {
        ParamValue::List(values.into_iter().map(Scalar::Int).collect())
    }
}

/// Caller-supplied filter parameters. Compared structurally.
pub type Params = BTreeMap<String, ParamValue>;

/// Ordered query pairs, as sent on the wire.
///
/// Setting a key that already exists overwrites the value in place, the
/// way a later assignment to an object key would.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Layer the caller's parameters over the current pairs.
    fn merge(&mut self, params: Option<&Params>) {
        if let Some(params) = params {
            for (key, value) in params {
                self.set(key.clone(), value.to_query_value());
            }
        }
    }

    /// Query resolving a known set of identifiers into items.
    pub fn for_hydrate(ids: &[Identifier], params: Option<&Params>) -> Self {
        let csv = ids
            .iter()
            .map(Identifier::as_str)
            .collect::<Vec<_>>()
            .join(",");

        let mut query = Self::new();
        query.set("q[id][in]", csv);
        query.set("fields", FIELDS);
        query.merge(params);
        query
    }

    /// Query populating the candidate list, optionally narrowed by a term.
    pub fn for_search(term: Option<&SearchTerm>, params: Option<&Params>) -> Self {
        let mut query = Self::new();
        query.set("fields", FIELDS);

        match term {
            Some(SearchTerm::IdEqual(id)) => query.set("q[id][equal]", id.clone()),
            Some(SearchTerm::NameLike(name)) => query.set("q[name][like]", name.clone()),
            None => {}
        }

        query.merge(params);
        query
    }
}

/// Interpreted search input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTerm {
    /// Exact identifier match (`#42`).
    IdEqual(String),
    /// Substring match against the item name.
    NameLike(String),
}

impl SearchTerm {
    /// Parse raw input. Returns `None` when the trimmed input is empty.
    pub fn parse(raw: &str) -> Option<Self> {
        let term = raw.trim();
        if term.is_empty() {
            return None;
        }

        Some(match term.strip_prefix(ID_PREFIX) {
            Some(id) => SearchTerm::IdEqual(id.to_string()),
            None => SearchTerm::NameLike(term.to_string()),
        })
    }
}

/// Resolve the resource path: a named filter wins over a direct target.
pub fn resolve_endpoint(filter: Option<&str>, target: Option<&str>) -> Option<String> {
    match filter.filter(|f| !f.is_empty()) {
        Some(name) => Some(format!("{}/{}", FILTER_RESOURCE_PREFIX, name)),
        None => target.filter(|t| !t.is_empty()).map(str::to_string),
    }
}
