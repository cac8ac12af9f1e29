//! Store instance context
//!
//! The receiver every `init`, public and private handler runs against. It
//! owns the instance's named fields and the action bindings set up during
//! `init`. Bindings are bookkeeping, not fields, so they never show up in
//! [`StoreContext::keys`].

use crate::value::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct StoreContext {
    display_name: String,
    fields: BTreeMap<String, Value>,
    bindings: BTreeMap<String, String>,
}

impl StoreContext {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            fields: BTreeMap::new(),
            bindings: BTreeMap::new(),
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Get a field, if present
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Get a field, or `undefined` when it is absent
    pub fn value(&self, key: &str) -> Value {
        self.fields.get(key).cloned().unwrap_or_default()
    }

    /// Set a field, returning the previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Field names in key order
    pub fn keys(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Route actions of `action_type` to the private method `method`
    ///
    /// Meant to be called from `init`. A second binding for the same type
    /// replaces the first.
    pub fn bind_actions(&mut self, action_type: impl Into<String>, method: impl Into<String>) {
        let action_type = action_type.into();
        let method = method.into();
        if let Some(previous) = self.bindings.insert(action_type.clone(), method.clone()) {
            log::warn!(
                "{}: rebinding action `{}` from `{}` to `{}`",
                self.display_name,
                action_type,
                previous,
                method
            );
        }
    }

    /// The private method bound to `action_type`
    pub fn binding(&self, action_type: &str) -> Option<&str> {
        self.bindings.get(action_type).map(String::as_str)
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&String, &String)> {
        self.bindings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings_are_not_fields() {
        let mut ctx = StoreContext::new("s");
        ctx.bind_actions("set_thing", "setThing");
        assert!(ctx.is_empty());
        assert_eq!(ctx.binding("set_thing"), Some("setThing"));
        assert_eq!(ctx.binding("other"), None);
    }

    #[test]
    fn test_fields_in_key_order() {
        let mut ctx = StoreContext::new("s");
        ctx.set("zeta", 1);
        ctx.set("alpha", 2);
        assert_eq!(ctx.keys(), vec!["alpha".to_string(), "zeta".to_string()]);
        assert_eq!(ctx.value("missing"), Value::Undefined);
        assert_eq!(ctx.remove("zeta"), Some(Value::from(1)));
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn test_rebinding_replaces() {
        let mut ctx = StoreContext::new("s");
        ctx.bind_actions("a", "first");
        ctx.bind_actions("a", "second");
        assert_eq!(ctx.binding("a"), Some("second"));
        assert_eq!(ctx.bindings().count(), 1);
    }
}
