//! TOML to store value conversion
//!
//! Tables become plain objects and arrays plain arrays, the same shape
//! parsed JSON has. Callers freeze them when they need immutable values.

use immutable_store::Value;

pub fn to_store_value(value: &toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s.clone()),
        toml::Value::Integer(i) => Value::from(*i),
        toml::Value::Float(f) => Value::Number(*f),
        toml::Value::Boolean(b) => Value::Bool(*b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::array(items.iter().map(to_store_value)),
        toml::Value::Table(table) => {
            Value::object(table.iter().map(|(k, v)| (k.clone(), to_store_value(v))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use immutable_store::check_immutable;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tables_are_plain() {
        let table: toml::Table = toml::from_str("items = [1, 2]\nname = \"x\"").unwrap();
        let value = to_store_value(&toml::Value::Table(table));
        assert!(!check_immutable(&value));
        assert!(matches!(value.get("items"), Some(Value::Array(_))));

        let frozen = value.freeze();
        assert!(check_immutable(&frozen));
        assert_eq!(frozen.get("name"), Some(Value::from("x")));
        assert_eq!(frozen.get("items"), Some(Value::list([1, 2])));
    }

    #[test]
    fn test_scalars() {
        assert_eq!(to_store_value(&toml::Value::Integer(3)), Value::from(3));
        assert_eq!(to_store_value(&toml::Value::Boolean(true)), Value::from(true));
        assert_eq!(to_store_value(&toml::Value::Float(0.5)), Value::from(0.5));
    }
}
