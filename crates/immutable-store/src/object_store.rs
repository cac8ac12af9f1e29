//! Object oriented store
//!
//! The base store the immutability layers are built on. It turns a
//! configuration of `init`, public accessors and private mutators into a live
//! instance, wires action bindings made during `init`, and delivers dispatched
//! actions to the bound private method.
//!
//! ```text
//! StoreOptions ──new()──► init(ctx) ──► bindings validated ──► ObjectOrientedStore
//!                                                                 │
//!           call(name, args) ──► public(&ctx, args) ──────────────┤
//!           dispatch(action) ──► private(&mut ctx, [payload]) ────┘
//! ```
//!
//! Dispatch takes `&mut self`, so deliveries to one instance are strictly
//! sequential.

use crate::action::Action;
use crate::context::StoreContext;
use crate::error::{Result, StoreError};
use crate::value::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Lifecycle hook run once at construction
pub type InitFn = Box<dyn Fn(&mut StoreContext) -> Result<()>>;

/// Accessor with a read-only receiver
pub type PublicFn = Box<dyn Fn(&StoreContext, &[Value]) -> Result<Value>>;

/// Mutator invoked through dispatch
pub type PrivateFn = Box<dyn Fn(&mut StoreContext, &[Value]) -> Result<Value>>;

/// Store configuration
pub struct StoreOptions {
    /// Human readable name, used in errors and logs
    pub display_name: String,
    /// Sets up initial fields and calls `bind_actions`
    pub init: Option<InitFn>,
    /// Accessors
    pub public: BTreeMap<String, PublicFn>,
    /// Mutators, reachable only through dispatch
    pub private: BTreeMap<String, PrivateFn>,
}

impl StoreOptions {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            init: None,
            public: BTreeMap::new(),
            private: BTreeMap::new(),
        }
    }

    pub fn init<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut StoreContext) -> Result<()> + 'static,
    {
        self.init = Some(Box::new(f));
        self
    }

    pub fn public<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&StoreContext, &[Value]) -> Result<Value> + 'static,
    {
        self.public.insert(name.into(), Box::new(f));
        self
    }

    pub fn private<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut StoreContext, &[Value]) -> Result<Value> + 'static,
    {
        self.private.insert(name.into(), Box::new(f));
        self
    }
}

impl fmt::Debug for StoreOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreOptions")
            .field("display_name", &self.display_name)
            .field("init", &self.init.is_some())
            .field("public", &self.public.keys().collect::<Vec<_>>())
            .field("private", &self.private.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Common surface of every store layer
pub trait Store {
    fn display_name(&self) -> &str;

    /// The instance's fields and bindings
    fn context(&self) -> &StoreContext;

    /// Invoke a public accessor
    fn call(&self, method: &str, args: &[Value]) -> Result<Value>;

    /// Deliver an action to its bound private method
    ///
    /// Returns `Ok(None)` when nothing is bound to the action type.
    fn dispatch(&mut self, action: &Action) -> Result<Option<Value>>;

    /// Whether an action type is bound on this store
    fn handles(&self, action_type: &str) -> bool {
        self.context().binding(action_type).is_some()
    }

    /// Test helpers for delivering actions without a dispatcher
    fn test_utils(&mut self) -> TestUtils<'_, Self>
    where
        Self: Sized,
    {
        TestUtils { store: self }
    }
}

/// Synthetic action delivery for tests
pub struct TestUtils<'a, S: Store> {
    store: &'a mut S,
}

impl<S: Store> TestUtils<'_, S> {
    /// Deliver `action` as if a dispatcher had sent it
    pub fn mock_dispatch(&mut self, action: Action) -> Result<Option<Value>> {
        log::trace!("{}: mock dispatch {:?}", self.store.display_name(), action);
        self.store.dispatch(&action)
    }

    /// Shorthand for `mock_dispatch(Action::new(action_type, payload))`
    pub fn mock_dispatch_type(
        &mut self,
        action_type: &str,
        payload: impl Into<Value>,
    ) -> Result<Option<Value>> {
        self.mock_dispatch(Action::new(action_type, payload))
    }
}

/// The base store
pub struct ObjectOrientedStore {
    context: StoreContext,
    public: BTreeMap<String, PublicFn>,
    private: BTreeMap<String, PrivateFn>,
}

impl ObjectOrientedStore {
    /// Build the instance and run `init` exactly once
    ///
    /// Every binding made during `init` must name an existing private method.
    pub fn new(options: StoreOptions) -> Result<Self> {
        let StoreOptions {
            display_name,
            init,
            public,
            private,
        } = options;

        log::debug!("Creating store `{}`", display_name);

        let mut context = StoreContext::new(display_name);
        if let Some(init) = init {
            init(&mut context)?;
        }

        for (action_type, method) in context.bindings() {
            if !private.contains_key(method) {
                return Err(StoreError::UnknownPrivateMethod {
                    display_name: context.display_name().to_string(),
                    action_type: action_type.clone(),
                    method: method.clone(),
                });
            }
        }

        Ok(Self {
            context,
            public,
            private,
        })
    }
}

impl Store for ObjectOrientedStore {
    fn display_name(&self) -> &str {
        self.context.display_name()
    }

    fn context(&self) -> &StoreContext {
        &self.context
    }

    fn call(&self, method: &str, args: &[Value]) -> Result<Value> {
        let accessor = self
            .public
            .get(method)
            .ok_or_else(|| StoreError::UnknownPublicMethod {
                display_name: self.context.display_name().to_string(),
                method: method.to_string(),
            })?;
        accessor(&self.context, args)
    }

    fn dispatch(&mut self, action: &Action) -> Result<Option<Value>> {
        let Some(method) = self.context.binding(&action.action_type).map(str::to_string) else {
            log::trace!(
                "{}: no binding for action `{}`",
                self.context.display_name(),
                action.action_type
            );
            return Ok(None);
        };

        let handler = self
            .private
            .get(&method)
            .ok_or_else(|| StoreError::UnknownPrivateMethod {
                display_name: self.context.display_name().to_string(),
                action_type: action.action_type.clone(),
                method: method.clone(),
            })?;

        log::debug!(
            "{}: Action: {:?} -> `{}`",
            self.context.display_name(),
            action,
            method
        );

        let result = handler(&mut self.context, std::slice::from_ref(&action.payload))?;
        Ok(Some(result))
    }
}

impl fmt::Display for ObjectOrientedStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ObjectOrientedStore {}]", self.display_name())
    }
}
