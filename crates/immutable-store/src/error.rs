//! Store error types
//!
//! Every invariant violation is a programmer error surfaced at construction,
//! accessor call, or dispatch time. Nothing here is retried or recovered;
//! the failure goes straight back to the caller of the triggering operation.

use thiserror::Error;

/// Result alias used throughout the store layers
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised by the store layers
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// No configuration was supplied at construction
    #[error("cannot create stores without a configuration")]
    MissingConfiguration,

    /// `init` left a field on an ImmutableStore that is not immutable or primitive
    #[error(
        "non-immutable, non-primitive `{key}` was added to ImmutableStore `{display_name}` during `init`"
    )]
    NonImmutableInitField { display_name: String, key: String },

    /// `init` of a reducer store did not produce exactly one immutable `defaultState`
    #[error(
        "ImmutableReducerStore `{display_name}` must provide only an Immutable `defaultState` property during `init`. Instead found the keys `{}`",
        .keys.join(",")
    )]
    InvalidReducerDefaultState {
        display_name: String,
        keys: Vec<String>,
    },

    /// A public accessor returned a plain object or array
    #[error(
        "public method `{method}` of `{display_name}` attempted to return a non-immutable, non-primitive value. All accessors must return immutable or primitive values"
    )]
    NonImmutablePublicReturn {
        display_name: String,
        method: String,
    },

    /// A reducer returned a plain object or array
    #[error(
        "non-immutable, non-primitive state was returned from ImmutableReducerStore `{display_name}` private method `{method}`"
    )]
    NonImmutableReducerReturn {
        display_name: String,
        method: String,
    },

    /// The instance held something other than the single `state` field after a reducer ran
    #[error(
        "ImmutableReducerStore `{display_name}` private method `{method}` attempted to assign additional state properties `{}`. Instead a reducer should always return the new state",
        .keys.join(",")
    )]
    ReducerFieldLeak {
        display_name: String,
        method: String,
        keys: Vec<String>,
    },

    /// `state` changed underneath a reducer before its result was committed
    #[error(
        "ImmutableReducerStore `{display_name}` private method `{method}` attempted to directly manipulate the store state. Instead return the new state"
    )]
    DirectStateMutation {
        display_name: String,
        method: String,
    },

    /// `call` named a public method the store does not have
    #[error("store `{display_name}` has no public method `{method}`")]
    UnknownPublicMethod {
        display_name: String,
        method: String,
    },

    /// An action was bound to a private method the store does not have
    #[error("store `{display_name}` bound action `{action_type}` to unknown private method `{method}`")]
    UnknownPrivateMethod {
        display_name: String,
        action_type: String,
        method: String,
    },

    /// A user supplied handler failed on its own terms
    #[error("handler failed: {0}")]
    Handler(String),
}

impl StoreError {
    /// Convenience for handlers that want to fail with a message
    pub fn handler(message: impl Into<String>) -> Self {
        Self::Handler(message.into())
    }

    /// Whether this error is one of the immutability / reducer discipline violations
    pub fn is_invariant_violation(&self) -> bool {
        !matches!(
            self,
            StoreError::UnknownPublicMethod { .. }
                | StoreError::UnknownPrivateMethod { .. }
                | StoreError::Handler(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_message_lists_keys() {
        let err = StoreError::InvalidReducerDefaultState {
            display_name: "todos".to_string(),
            keys: vec!["a".to_string(), "b".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("must provide only an Immutable `defaultState`"));
        assert!(message.contains("`a,b`"));
        assert!(message.contains("todos"));
    }

    #[test]
    fn test_invariant_classification() {
        assert!(StoreError::MissingConfiguration.is_invariant_violation());
        assert!(StoreError::DirectStateMutation {
            display_name: "s".into(),
            method: "m".into(),
        }
        .is_invariant_violation());
        assert!(!StoreError::handler("boom").is_invariant_violation());
    }
}
