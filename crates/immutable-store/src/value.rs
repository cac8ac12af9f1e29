//! Store values
//!
//! A store field, accessor result, reducer argument or action payload is a
//! [`Value`]. Values are either primitives, persistent collections from the
//! `im` crate, or plain mutable containers. Only the first two may ever be
//! exposed or held by the guarded stores.
//!
//! ```text
//! Value
//!  ├─ primitives ........ Undefined, Null, Bool, Number, String
//!  ├─ persistent ........ Map (im::OrdMap), List (im::Vector)
//!  └─ plain (mutable) ... Object, Array
//! ```
//!
//! Collections are held behind `Rc`, so cloning a `Value` keeps its identity.
//! [`Value::same`] compares identity, never structure.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Persistent map used for immutable store state
pub type ImmutableMap = im::OrdMap<String, Value>;

/// Persistent list used for immutable store state
pub type ImmutableList = im::Vector<Value>;

/// Shared, mutable key/value container
pub type PlainObject = Rc<RefCell<BTreeMap<String, Value>>>;

/// Shared, mutable sequence
pub type PlainArray = Rc<RefCell<Vec<Value>>>;

/// A dynamically typed store value
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// Persistent map
    Map(Rc<ImmutableMap>),
    /// Persistent list
    List(Rc<ImmutableList>),
    /// Plain mutable object
    Object(PlainObject),
    /// Plain mutable array
    Array(PlainArray),
}

impl Value {
    /// Build a persistent map from key/value pairs
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let map: ImmutableMap = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Value::Map(Rc::new(map))
    }

    /// An empty persistent map
    pub fn empty_map() -> Self {
        Value::Map(Rc::new(ImmutableMap::new()))
    }

    /// Build a persistent list
    pub fn list<V, I>(items: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        let list: ImmutableList = items.into_iter().map(Into::into).collect();
        Value::List(Rc::new(list))
    }

    /// Build a plain, mutable object
    pub fn object<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let object: BTreeMap<String, Value> = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Value::Object(Rc::new(RefCell::new(object)))
    }

    /// Build a plain, mutable array
    pub fn array<V, I>(items: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        let array: Vec<Value> = items.into_iter().map(Into::into).collect();
        Value::Array(Rc::new(RefCell::new(array)))
    }

    /// Primitives are everything that is not a container
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Value::Undefined | Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)
        )
    }

    pub fn is_immutable_collection(&self) -> bool {
        matches!(self, Value::Map(_) | Value::List(_))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Short type name used in log output
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Map(_) => "Map",
            Value::List(_) => "List",
            Value::Object(_) => "object",
            Value::Array(_) => "array",
        }
    }

    /// Strict identity
    ///
    /// Primitives compare by value (`NaN` is never the same as itself),
    /// containers compare by reference. Two structurally equal maps built
    /// separately are not the same value.
    pub fn same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => Rc::ptr_eq(a, b),
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ImmutableMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ImmutableList> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// Look up a key in a persistent map or plain object
    pub fn get(&self, key: &str) -> Option<Value> {
        match self {
            Value::Map(map) => map.get(key).cloned(),
            Value::Object(object) => object.borrow().get(key).cloned(),
            _ => None,
        }
    }

    /// New persistent map with `key` set, leaving `self` untouched
    ///
    /// Returns `None` when `self` is not a persistent map.
    pub fn with(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.as_map()
            .map(|map| Value::Map(Rc::new(map.update(key.into(), value.into()))))
    }

    /// New persistent map without `key`
    pub fn without(&self, key: &str) -> Option<Value> {
        self.as_map()
            .map(|map| Value::Map(Rc::new(map.without(key))))
    }

    /// New persistent list with `value` appended
    pub fn pushed(&self, value: impl Into<Value>) -> Option<Value> {
        self.as_list().map(|list| {
            let mut next = list.clone();
            next.push_back(value.into());
            Value::List(Rc::new(next))
        })
    }

    /// Deep-convert plain containers into persistent collections
    ///
    /// Values that already pass the immutability check are returned as is,
    /// so identity is kept wherever nothing had to change.
    pub fn freeze(&self) -> Value {
        match self {
            Value::Object(object) => {
                let map: ImmutableMap = object
                    .borrow()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.freeze()))
                    .collect();
                Value::Map(Rc::new(map))
            }
            Value::Array(array) => {
                let list: ImmutableList = array.borrow().iter().map(Value::freeze).collect();
                Value::List(Rc::new(list))
            }
            other => other.clone(),
        }
    }

    /// Convert JSON into a value; objects and arrays become plain containers
    pub fn from_json(json: &serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => Value::array(items.iter().map(Value::from_json)),
            serde_json::Value::Object(entries) => {
                Value::object(entries.iter().map(|(k, v)| (k.clone(), Value::from_json(v))))
            }
        }
    }

    /// Convert into JSON; `undefined` and non-finite numbers become `null`
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            Value::Undefined | Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => Json::from(*n as i64),
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::String(s) => Json::String(s.clone()),
            Value::Map(map) => Json::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Value::List(list) => Json::Array(list.iter().map(Value::to_json).collect()),
            Value::Object(object) => Json::Object(
                object
                    .borrow()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Value::Array(array) => Json::Array(array.borrow().iter().map(Value::to_json).collect()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Map(map) => {
                write!(f, "Map {{")?;
                write_entries(f, map.iter())?;
                write!(f, "}}")
            }
            Value::List(list) => {
                write!(f, "List [")?;
                write_items(f, list.iter())?;
                write!(f, "]")
            }
            Value::Object(object) => {
                write!(f, "{{")?;
                write_entries(f, object.borrow().iter())?;
                write!(f, "}}")
            }
            Value::Array(array) => {
                write!(f, "[")?;
                write_items(f, array.borrow().iter())?;
                write!(f, "]")
            }
        }
    }
}

fn write_entries<'a>(
    f: &mut fmt::Formatter<'_>,
    entries: impl Iterator<Item = (&'a String, &'a Value)>,
) -> fmt::Result {
    for (i, (key, value)) in entries.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{:?}: {}", key, value)?;
    }
    Ok(())
}

fn write_items<'a>(f: &mut fmt::Formatter<'_>, items: impl Iterator<Item = &'a Value>) -> fmt::Result {
    for (i, value) in items.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", value)?;
    }
    Ok(())
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<ImmutableMap> for Value {
    fn from(map: ImmutableMap) -> Self {
        Value::Map(Rc::new(map))
    }
}

impl From<ImmutableList> for Value {
    fn from(list: ImmutableList) -> Self {
        Value::List(Rc::new(list))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_same_is_identity_for_collections() {
        let a = Value::map([("a", 0)]);
        let b = Value::map([("a", 0)]);
        assert_eq!(a, b);
        assert!(!a.same(&b));
        assert!(a.same(&a.clone()));
    }

    #[test]
    fn test_same_is_value_for_primitives() {
        assert!(Value::from("ok").same(&Value::from("ok")));
        assert!(Value::from(1).same(&Value::from(1.0)));
        assert!(Value::Undefined.same(&Value::Undefined));
        assert!(!Value::Null.same(&Value::Undefined));
        assert!(!Value::Number(f64::NAN).same(&Value::Number(f64::NAN)));
    }

    #[test]
    fn test_persistent_update_leaves_original() {
        let original = Value::map([("count", 1)]);
        let updated = original.with("count", 2).unwrap();
        assert_eq!(original.get("count"), Some(Value::from(1)));
        assert_eq!(updated.get("count"), Some(Value::from(2)));
        assert!(!original.same(&updated));

        let removed = updated.without("count").unwrap();
        assert_eq!(removed.get("count"), None);

        let list = Value::list([1, 2]);
        let longer = list.pushed(3).unwrap();
        assert_eq!(list.as_list().map(|l| l.len()), Some(2));
        assert_eq!(longer.as_list().map(|l| l.len()), Some(3));
        assert_eq!(Value::from(1).with("a", 1), None);
    }

    #[test]
    fn test_freeze_converts_nested_plain_containers() {
        let plain = Value::object([
            ("name", Value::from("todo")),
            ("tags", Value::array(["a", "b"])),
        ]);
        let frozen = plain.freeze();
        assert!(frozen.is_immutable_collection());
        let tags = frozen.get("tags").unwrap();
        assert!(tags.is_immutable_collection());
        assert_eq!(tags, Value::list(["a", "b"]));

        let already = Value::empty_map();
        assert!(already.freeze().same(&already));
    }

    #[test]
    fn test_json_round_trip_shapes() {
        let json = serde_json::json!({"a": [1, true, null], "b": "x"});
        let value = Value::from_json(&json);
        assert!(matches!(value, Value::Object(_)));
        assert!(matches!(value.get("a"), Some(Value::Array(_))));
        assert_eq!(value.freeze().to_json(), json);
        assert_eq!(Value::Undefined.to_json(), serde_json::Value::Null);
        assert_eq!(Value::Number(f64::INFINITY).to_json(), serde_json::Value::Null);
    }

    #[test]
    fn test_display() {
        let value = Value::map([("a", Value::list([1, 2]))]);
        assert_eq!(value.to_string(), r#"Map {"a": List [1, 2]}"#);
        assert_eq!(Value::object([("k", "v")]).to_string(), r#"{"k": "v"}"#);
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
    }
}
