//! Wire and domain types: identifiers, items, and candidate ordering.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Reserved identifier of the "no value" pseudo-item.
pub const EMPTY_VALUE: &str = "{%empty%}";

/// Opaque key of a selectable entity.
///
/// Remote sources hand out ids either as JSON numbers or as strings. Both
/// are normalized to their string form so that `3` and `"3"` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the reserved empty sentinel.
    pub fn is_empty_value(&self) -> bool {
        self.0 == EMPTY_VALUE
    }

    /// Numeric value of the id, if it looks like a number.
    pub fn numeric(&self) -> Option<f64> {
        self.0.trim().parse::<f64>().ok().filter(|n| !n.is_nan())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i64> for Identifier {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Float(f64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => Identifier::from(n),
            Raw::Float(n) => Identifier(n.to_string()),
            Raw::Text(s) => Identifier(s),
        })
    }
}

/// A selectable entity as returned by the remote source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Identifier,
    #[serde(default)]
    pub name: String,
}

impl Item {
    pub fn new(id: impl Into<Identifier>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Order two ids: numeric ascending when both parse as numbers, numbers
/// before non-numbers, otherwise lexicographic.
fn compare_ids(a: &Identifier, b: &Identifier) -> Ordering {
    match (a.numeric(), b.numeric()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.as_str().cmp(b.as_str()),
    }
}

/// Put a fetched result set into display order.
///
/// Items are sorted ascending by id (stable), then the empty sentinel, if
/// present, is moved to the front.
pub fn order_candidates(mut items: Vec<Item>) -> Vec<Item> {
    items.sort_by(|a, b| compare_ids(&a.id, &b.id));

    if let Some(pos) = items.iter().position(|item| item.id.is_empty_value()) {
        let empty = items.remove(pos);
        items.insert(0, empty);
    }

    items
}
