use std::collections::HashMap;

use tracing::trace;

use crate::value::Value;

/// Identifier to value mapping that lives for a whole session.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct VariableStore {
    store: HashMap<String, Value>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A name that was never assigned reads as [`Value::Undefined`].
    pub fn get(&self, name: &str) -> Value {
        self.store.get(name).copied().unwrap_or(Value::Undefined)
    }

    pub fn set(&mut self, name: &str, value: Value) -> Value {
        trace!(variable = name, %value, "store");
        self.store.insert(name.to_string(), value);
        value
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.store.iter().map(|(name, value)| (name.as_str(), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_set() {
        let mut store = VariableStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("a"), Value::Undefined);

        assert_eq!(store.set("a", Value::Integer(4)), Value::Integer(4));
        assert_eq!(store.get("a"), Value::Integer(4));
        assert_eq!(store.get("a"), Value::Integer(4));

        store.set("a", Value::Float(0.5));
        store.set("b", Value::Bool(false));
        assert_eq!(store.get("a"), Value::Float(0.5));
        assert_eq!(store.len(), 2);

        let mut names: Vec<&str> = store.iter().map(|(name, _)| name).collect();
        names.sort();
        assert_eq!(names, vec!["a", "b"]);
    }
}
