//! Replay scenario
//!
//! A scenario describes one reducer store and the actions to push through it:
//!
//! ```toml
//! freeze_payloads = false
//!
//! [store]
//! display_name = "todos"
//! default_state = { items = [], filter = "all" }
//!
//! [[bindings]]
//! action = "add_todo"
//! reducer = "append"
//! key = "items"
//!
//! [[actions]]
//! type = "add_todo"
//! payload = "write docs"
//! ```

use crate::config_file::load_config_file;
use crate::toml_value::to_store_value;
use anyhow::{Context, Result};
use immutable_store::Value;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Freeze plain table/array payloads before dispatching them
    #[serde(default)]
    pub freeze_payloads: bool,

    /// The store under test; a scenario without it cannot build a store
    #[serde(default)]
    pub store: Option<StoreSection>,

    #[serde(default)]
    pub bindings: Vec<Binding>,

    #[serde(default)]
    pub actions: Vec<ActionEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSection {
    pub display_name: String,

    /// Initial state; always frozen
    #[serde(default = "default_state")]
    pub default_state: toml::Value,
}

fn default_state() -> toml::Value {
    toml::Value::Table(toml::Table::new())
}

/// Binds an action type to a built-in reducer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Binding {
    pub action: String,
    pub reducer: ReducerKind,
    /// Apply the reducer to this entry of a map state instead of the whole state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Binding {
    /// Name of the private method the binding is registered under
    pub fn method_name(&self) -> String {
        match &self.key {
            Some(key) => format!("{}_{}", self.reducer.as_str(), key),
            None => self.reducer.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionEntry {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<toml::Value>,
}

impl ActionEntry {
    /// Payload as a store value, `undefined` when absent
    pub fn payload_value(&self, freeze: bool) -> Value {
        let value = self
            .payload
            .as_ref()
            .map(to_store_value)
            .unwrap_or_default();
        if freeze {
            value.freeze()
        } else {
            value
        }
    }
}

/// Built-in reducers available to scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReducerKind {
    /// New state is the payload
    Replace,
    /// Merge a table payload into a map state
    Merge,
    /// Append the payload to a list state
    Append,
    /// Remove the key named by the payload from a map state
    Remove,
    /// Add the payload (default 1) to a number state
    Increment,
    /// Back to the default state
    Reset,
}

impl ReducerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReducerKind::Replace => "replace",
            ReducerKind::Merge => "merge",
            ReducerKind::Append => "append",
            ReducerKind::Remove => "remove",
            ReducerKind::Increment => "increment",
            ReducerKind::Reset => "reset",
        }
    }
}

impl ReplayConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse scenario")
    }

    /// Load from an explicit path or the default locations
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (found, content) = load_config_file(path)?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid scenario {}", found.display()))?;
        log::info!(
            "Loaded scenario with {} bindings and {} actions from {}",
            config.bindings.len(),
            config.actions.len(),
            found.display()
        );
        Ok(config)
    }

    /// Initial state as an immutable value
    pub fn default_state(&self) -> Option<Value> {
        self.store
            .as_ref()
            .map(|store| to_store_value(&store.default_state).freeze())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use immutable_store::check_immutable;
    use pretty_assertions::assert_eq;

    const SCENARIO: &str = r#"
        freeze_payloads = true

        [store]
        display_name = "todos"
        default_state = { items = [], filter = "all" }

        [[bindings]]
        action = "add_todo"
        reducer = "append"
        key = "items"

        [[bindings]]
        action = "clear"
        reducer = "reset"

        [[actions]]
        type = "add_todo"
        payload = "write docs"

        [[actions]]
        type = "clear"
    "#;

    #[test]
    fn test_parse_scenario() {
        let config = ReplayConfig::from_toml_str(SCENARIO).unwrap();
        assert!(config.freeze_payloads);
        assert_eq!(config.store.as_ref().unwrap().display_name, "todos");
        assert_eq!(config.bindings.len(), 2);
        assert_eq!(config.bindings[0].reducer, ReducerKind::Append);
        assert_eq!(config.bindings[0].method_name(), "append_items");
        assert_eq!(config.bindings[1].method_name(), "reset");
        assert_eq!(config.actions[1].payload_value(true), Value::Undefined);
    }

    #[test]
    fn test_default_state_is_frozen() {
        let config = ReplayConfig::from_toml_str(SCENARIO).unwrap();
        let state = config.default_state().unwrap();
        assert!(check_immutable(&state));
        assert_eq!(state.get("filter"), Some(Value::from("all")));
        assert_eq!(state.get("items"), Some(Value::list(Vec::<Value>::new())));
    }

    #[test]
    fn test_missing_store_section() {
        let config = ReplayConfig::from_toml_str("[[actions]]\ntype = \"noop\"\n").unwrap();
        assert!(config.store.is_none());
        assert!(config.default_state().is_none());
        assert!(!config.freeze_payloads);
    }

    #[test]
    fn test_unknown_reducer_kind_is_rejected() {
        let err = ReplayConfig::from_toml_str(
            "[[bindings]]\naction = \"a\"\nreducer = \"explode\"\n",
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("explode"));
    }
}
