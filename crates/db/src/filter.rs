//! Query predicates evaluated against stored JSON documents.

use serde_json::Value;

/// A predicate over the top-level fields of a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Matches every document.
    All,
    /// Field equals the value.
    Eq(&'static str, Value),
    /// Field is a string equal to the value, ignoring case.
    EqIgnoreCase(&'static str, String),
    /// Field is an array containing the value.
    Contains(&'static str, Value),
    /// Field equals one of the values.
    In(&'static str, Vec<Value>),
}

impl Filter {
    pub fn eq(field: &'static str, value: impl Into<Value>) -> Self {
        Self::Eq(field, value.into())
    }

    pub fn contains(field: &'static str, value: impl Into<Value>) -> Self {
        Self::Contains(field, value.into())
    }

    pub fn any_of<V: Into<Value>>(field: &'static str, values: impl IntoIterator<Item = V>) -> Self {
        Self::In(field, values.into_iter().map(Into::into).collect())
    }

    /// Evaluate the filter against a document.
    pub fn matches(&self, doc: &Value) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq(field, value) => doc.get(field) == Some(value),
            Filter::EqIgnoreCase(field, value) => doc
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|stored| stored.to_lowercase() == value.to_lowercase()),
            Filter::Contains(field, value) => doc
                .get(field)
                .and_then(Value::as_array)
                .is_some_and(|items| items.contains(value)),
            Filter::In(field, values) => doc
                .get(field)
                .is_some_and(|stored| values.contains(stored)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn eq_and_in_compare_whole_values() {
        let doc = json!({"status": "Available", "imprint": "Penguin"});
        assert!(Filter::eq("status", "Available").matches(&doc));
        assert!(!Filter::eq("status", "Loaned").matches(&doc));
        assert!(Filter::any_of("imprint", ["Vintage", "Penguin"]).matches(&doc));
        assert!(!Filter::eq("missing", "x").matches(&doc));
    }

    #[test]
    fn contains_looks_inside_arrays_only() {
        let doc = json!({"genre": ["a", "b"], "title": "a"});
        assert!(Filter::contains("genre", "b").matches(&doc));
        assert!(!Filter::contains("genre", "c").matches(&doc));
        assert!(!Filter::contains("title", "a").matches(&doc));
    }

    #[test]
    fn eq_ignore_case_compares_strings_only() {
        let doc = json!({"name": "Science Fiction", "rank": 3});
        assert!(Filter::EqIgnoreCase("name", "science fiction".to_string()).matches(&doc));
        assert!(!Filter::EqIgnoreCase("name", "fantasy".to_string()).matches(&doc));
        assert!(!Filter::EqIgnoreCase("rank", "3".to_string()).matches(&doc));
    }
}
