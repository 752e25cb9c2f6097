//! Dynamic property bag for carrying option values between phases.
//!
//! The bag is an ordered map from attribute name to a dynamically typed
//! value, used as the transient carrier for parsed configuration.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// An ordered collection of named, dynamically typed attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttrBag {
    entries: BTreeMap<String, Value>,
}

impl AttrBag {
    /// Create a fresh bag with no attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attributes held by the bag.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the bag holds no attributes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when the bag holds an attribute with the given name.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Set an attribute, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.entries.insert(name.into(), value);
    }

    /// Look up an attribute by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Look up an attribute and view it as a string.
    pub fn str_value(&self, name: &str) -> Option<&str> {
        self.entries.get(name).and_then(Value::as_str)
    }

    /// Look up an attribute and view it as a boolean.
    pub fn bool_value(&self, name: &str) -> Option<bool> {
        self.entries.get(name).and_then(Value::as_bool)
    }

    /// Copy the named attributes from `source` when present there.
    ///
    /// Names absent from `source` are silently skipped; attributes of `self`
    /// outside `names` are left untouched.
    pub fn copy_from<I, S>(&mut self, source: &AttrBag, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref();
            if let Some(value) = source.entries.get(name) {
                self.entries.insert(name.to_string(), value.clone());
            }
        }
    }

    /// Copy every key/value pair of a JSON object map into the bag.
    pub fn assign_from_map(&mut self, map: &serde_json::Map<String, Value>) {
        for (name, value) in map {
            self.entries.insert(name.clone(), value.clone());
        }
    }

    /// Set each `(name, value)` pair only when the name is still unassigned.
    ///
    /// Existing attributes keep their value; the supplied one is ignored.
    pub fn set_if_unset<I, S>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        for (name, value) in pairs {
            self.entries.entry(name.into()).or_insert(value);
        }
    }

    /// Iterate attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl fmt::Display for AttrBag {
    /// Render the bag as a JSON object, attributes in name order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let map: serde_json::Map<String, Value> = self
            .entries
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        write!(f, "{}", Value::Object(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    /// Verify copy semantics: present names copied, absent names skipped,
    /// attributes outside the name set untouched.
    #[test]
    fn copy_from_copies_only_present_names() {
        let mut source = AttrBag::new();
        source.insert("prop1", json!("value 1"));
        source.insert("prop2", json!("value 2"));
        source.insert("prop3", json!("value 3"));
        source.insert("prop4", json!("value 4"));

        let mut target = AttrBag::new();
        target.insert("prop2", json!("another 2"));
        target.insert("prop3", json!("another 3"));

        target.copy_from(&source, ["prop1", "prop3", "exist_not_prop"]);

        assert_eq!(target.str_value("prop1"), Some("value 1"));
        assert_eq!(target.str_value("prop2"), Some("another 2"));
        assert_eq!(target.str_value("prop3"), Some("value 3"));
        assert!(!target.contains("prop4"));
        assert!(!target.contains("exist_not_prop"));
    }

    #[test]
    fn assign_from_map_sets_every_pair() {
        let mut map = serde_json::Map::new();
        map.insert("prop1".to_string(), json!("val1"));
        map.insert("prop2".to_string(), json!(2));

        let mut bag = AttrBag::new();
        bag.assign_from_map(&map);

        assert_eq!(bag.str_value("prop1"), Some("val1"));
        assert_eq!(bag.get("prop2"), Some(&json!(2)));
    }

    /// Verify first-write-wins: pre-existing attributes are never overwritten.
    #[test]
    fn set_if_unset_keeps_existing_values() {
        let mut bag = AttrBag::new();
        bag.insert("x", json!(1));

        bag.set_if_unset([("x", json!(2)), ("y", json!(3))]);

        assert_eq!(bag.get("x"), Some(&json!(1)));
        assert_eq!(bag.get("y"), Some(&json!(3)));
    }

    #[test]
    fn fresh_bag_is_empty() {
        let bag = AttrBag::new();
        assert!(bag.is_empty());
        assert_eq!(bag.len(), 0);
        assert!(!bag.contains("anything"));
    }

    #[test]
    fn display_renders_json_in_name_order() {
        let mut bag = AttrBag::new();
        bag.insert("b", json!(true));
        bag.insert("a", json!("first"));

        let names: Vec<&str> = bag.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(bag.to_string(), r#"{"a":"first","b":true}"#);
    }
}
