//! Query filters.

use serde_json::Value;

use super::document::{field, Document};

/// A single query predicate. A query matches documents satisfying all of its
/// filters.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Field equals the value.
    Equal(String, Value),
    /// Field is an array containing the value.
    ArrayContains(String, Value),
}

impl Filter {
    pub fn equal(field: &str, value: impl Into<Value>) -> Self {
        Filter::Equal(field.to_string(), value.into())
    }

    pub fn array_contains(field: &str, value: impl Into<Value>) -> Self {
        Filter::ArrayContains(field.to_string(), value.into())
    }

    /// Returns true if the document satisfies this filter.
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Filter::Equal(name, expected) => field(doc, name) == Some(expected),
            Filter::ArrayContains(name, expected) => field(doc, name)
                .and_then(Value::as_array)
                .is_some_and(|values| values.contains(expected)),
        }
    }
}

/// Returns true if the document satisfies every filter.
pub fn matches_all(filters: &[Filter], doc: &Document) -> bool {
    filters.iter().all(|f| f.matches(doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_equal_and_array_contains() {
        let doc = json!({"status": "accepted", "sharedWith": ["bob", "carol"]})
            .as_object()
            .cloned()
            .unwrap();

        assert!(Filter::equal("status", "accepted").matches(&doc));
        assert!(!Filter::equal("status", "pending").matches(&doc));
        assert!(Filter::array_contains("sharedWith", "bob").matches(&doc));
        assert!(!Filter::array_contains("sharedWith", "dave").matches(&doc));
        assert!(!Filter::array_contains("status", "accepted").matches(&doc));
        assert!(matches_all(&[], &doc));
    }
}
