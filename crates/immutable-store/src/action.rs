use crate::value::Value;

/// A tagged message routed to whichever private method is bound to its type
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub action_type: String,
    pub payload: Value,
}

impl Action {
    pub fn new(action_type: impl Into<String>, payload: impl Into<Value>) -> Self {
        Self {
            action_type: action_type.into(),
            payload: payload.into(),
        }
    }

    /// An action that carries no payload (`undefined`)
    pub fn empty(action_type: impl Into<String>) -> Self {
        Self::new(action_type, Value::Undefined)
    }
}
