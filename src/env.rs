//! Property lookup for selector evaluation.

use crate::value::Value;
use std::collections::{BTreeMap, HashMap};

/// Resolves identifiers to property values.
///
/// Lookups never fail: an identifier with no property resolves to
/// [`Value::Unknown`].
pub trait Env {
    fn value(&self, identifier: &str) -> Value;
}

impl Env for HashMap<String, Value> {
    fn value(&self, identifier: &str) -> Value {
        self.get(identifier).cloned().unwrap_or(Value::Unknown)
    }
}

impl Env for BTreeMap<String, Value> {
    fn value(&self, identifier: &str) -> Value {
        self.get(identifier).cloned().unwrap_or(Value::Unknown)
    }
}

impl<E: Env + ?Sized> Env for &E {
    fn value(&self, identifier: &str) -> Value {
        (**self).value(identifier)
    }
}

impl<E: Env + ?Sized> Env for Box<E> {
    fn value(&self, identifier: &str) -> Value {
        (**self).value(identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_lookup() {
        let mut props = HashMap::new();
        props.insert("colour".to_string(), Value::from("red"));
        assert_eq!(props.value("colour"), Value::from("red"));
        assert_eq!(props.value("size"), Value::Unknown);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let mut props = BTreeMap::new();
        props.insert("Size".to_string(), Value::Exact(3));
        assert_eq!(props.value("Size"), Value::Exact(3));
        assert_eq!(props.value("size"), Value::Unknown);
    }

    #[test]
    fn test_boxed_env() {
        let mut props = HashMap::new();
        props.insert("a".to_string(), Value::Boolean(true));
        let boxed: Box<dyn Env> = Box::new(props);
        assert_eq!(boxed.value("a"), Value::Boolean(true));
    }
}
