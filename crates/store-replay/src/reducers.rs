//! Built-in reducers
//!
//! Each reducer is pure: it only sees the previous state and the payload. A
//! reducer with a `key` works on one entry of a map state and writes the
//! entry back into a new map.

use immutable_store::{ReducerFn, Result, StoreError, Value};
use store_replay_config::ReducerKind;

/// Build the reducer for `kind`, optionally scoped to the map entry `key`
pub fn build(kind: ReducerKind, key: Option<String>, default_state: Value) -> ReducerFn {
    Box::new(move |state: &Value, args: &[Value]| -> Result<Value> {
        let payload = args.first().cloned().unwrap_or_default();

        let Some(key) = &key else {
            return apply(kind, state, payload, &default_state);
        };

        let entry = state
            .get(key)
            .ok_or_else(|| StoreError::handler(format!("state has no entry `{}`", key)))?;
        let entry_default = default_state.get(key).unwrap_or_default();
        let next = apply(kind, &entry, payload, &entry_default)?;
        state
            .with(key.clone(), next)
            .ok_or_else(|| StoreError::handler(format!("`{}` needs a map state, got {}", key, state.type_name())))
    })
}

fn apply(kind: ReducerKind, state: &Value, payload: Value, default_state: &Value) -> Result<Value> {
    match kind {
        ReducerKind::Replace => Ok(payload),
        ReducerKind::Merge => merge(state, &payload),
        ReducerKind::Append => state.pushed(payload).ok_or_else(|| {
            StoreError::handler(format!("append needs a list, got {}", state.type_name()))
        }),
        ReducerKind::Remove => {
            let name = payload.as_str().ok_or_else(|| {
                StoreError::handler(format!("remove needs a string key, got {}", payload.type_name()))
            })?;
            state.without(name).ok_or_else(|| {
                StoreError::handler(format!("remove needs a map, got {}", state.type_name()))
            })
        }
        ReducerKind::Increment => {
            let current = state.as_f64().ok_or_else(|| {
                StoreError::handler(format!("increment needs a number, got {}", state.type_name()))
            })?;
            let by = if payload.is_undefined() {
                1.0
            } else {
                payload.as_f64().ok_or_else(|| {
                    StoreError::handler(format!("increment by {} is not a number", payload))
                })?
            };
            Ok(Value::from(current + by))
        }
        ReducerKind::Reset => Ok(default_state.clone()),
    }
}

/// Merge the entries of `payload` into the map `state`
///
/// Payload entries are taken as they are. A plain value nested in the
/// payload stays plain inside the merged map; the immutability check is
/// shallow.
fn merge(state: &Value, payload: &Value) -> Result<Value> {
    let mut merged = state
        .as_map()
        .cloned()
        .ok_or_else(|| StoreError::handler(format!("merge needs a map, got {}", state.type_name())))?;

    let entries: Vec<(String, Value)> = match payload {
        Value::Map(map) => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        Value::Object(object) => object
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        other => {
            return Err(StoreError::handler(format!(
                "merge needs a table payload, got {}",
                other.type_name()
            )))
        }
    };

    for (k, v) in entries {
        merged.insert(k, v);
    }
    Ok(Value::from(merged))
}
