//! ImmutableReducerStore - an ImmutableStore with a single reducer driven `state`
//!
//! A reducer is a pure function `(previous_state, args) -> new_state`. It
//! never sees the store instance, so the only way it can change state is by
//! returning the new value. The wrapper commits that value.
//!
//! Reducer invocation:
//!
//! ```text
//! Idle ─► Invoking (capture previous) ─► Validating ─► Committing ─► Idle
//!                                            │
//!                                            └─ any failure: abort, state stays at previous
//! ```

use crate::action::Action;
use crate::context::StoreContext;
use crate::error::{Result, StoreError};
use crate::immutable_store::{check_immutable, ImmutableStore};
use crate::object_store::{InitFn, PrivateFn, PublicFn, Store, StoreOptions};
use crate::value::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Field `init` must set on a reducer store
pub const DEFAULT_STATE_KEY: &str = "defaultState";

/// The only field a reducer store holds after `init`
pub const STATE_KEY: &str = "state";

/// Pure reducer: previous state plus call arguments in, next state out
pub type ReducerFn = Box<dyn Fn(&Value, &[Value]) -> Result<Value>>;

/// Reducer store configuration
pub struct ReducerStoreOptions {
    pub display_name: String,
    /// Must set exactly one field, `defaultState`
    pub init: Option<InitFn>,
    pub public: BTreeMap<String, PublicFn>,
    /// Private methods, understood as reducers
    pub reducers: BTreeMap<String, ReducerFn>,
}

impl ReducerStoreOptions {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            init: None,
            public: BTreeMap::new(),
            reducers: BTreeMap::new(),
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

    pub fn reducer<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value> + 'static,
    {
        self.reducers.insert(name.into(), Box::new(f));
        self
    }
}

impl fmt::Debug for ReducerStoreOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReducerStoreOptions")
            .field("display_name", &self.display_name)
            .field("init", &self.init.is_some())
            .field("public", &self.public.keys().collect::<Vec<_>>())
            .field("reducers", &self.reducers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A store whose whole mutable surface is one immutable `state` field
pub struct ImmutableReducerStore {
    inner: ImmutableStore,
}

impl ImmutableReducerStore {
    pub fn new(options: ReducerStoreOptions) -> Result<Self> {
        Self::from_options(Some(options))
    }

    /// Build from an optional configuration
    ///
    /// Fails with [`StoreError::MissingConfiguration`] when no configuration
    /// is given.
    pub fn from_options(options: Option<ReducerStoreOptions>) -> Result<Self> {
        let options = options.ok_or(StoreError::MissingConfiguration)?;
        let ReducerStoreOptions {
            display_name,
            init,
            public,
            reducers,
        } = options;

        let mut parent_options = StoreOptions::new(display_name.clone());
        parent_options.public = public;

        if let Some(init) = init {
            parent_options.init = Some(reducer_init_override(&display_name, init));
        }

        for (key, reducer) in reducers {
            let guarded = reducer_override(&display_name, &key, reducer);
            parent_options.private.insert(key, guarded);
        }

        Ok(Self {
            inner: ImmutableStore::new(parent_options)?,
        })
    }

    /// Current state, `undefined` if the store never ran an `init`
    pub fn state(&self) -> Value {
        self.context().value(STATE_KEY)
    }
}

/// Wrap `init` so that it must produce exactly one immutable `defaultState`,
/// which is then renamed to `state`
pub fn reducer_init_override(display_name: &str, init: InitFn) -> InitFn {
    let display_name = display_name.to_string();
    Box::new(move |ctx: &mut StoreContext| -> Result<()> {
        init(ctx)?;

        let has_one_immutable_default_state =
            ctx.get(DEFAULT_STATE_KEY).is_some_and(check_immutable) && ctx.len() == 1;

        if !has_one_immutable_default_state {
            return Err(StoreError::InvalidReducerDefaultState {
                display_name: display_name.clone(),
                keys: ctx.keys(),
            });
        }

        let default_state = ctx.remove(DEFAULT_STATE_KEY).unwrap_or_default();
        ctx.set(STATE_KEY, default_state);
        Ok(())
    })
}

/// Turn a pure reducer into a private method that commits its result to `state`
pub fn reducer_override(display_name: &str, key: &str, reducer: ReducerFn) -> PrivateFn {
    let display_name = display_name.to_string();
    let key = key.to_string();
    Box::new(move |ctx: &mut StoreContext, args: &[Value]| -> Result<Value> {
        let previous_state = ctx.value(STATE_KEY);
        let result = reducer(&previous_state, args)?;

        if !check_immutable(&result) {
            return Err(StoreError::NonImmutableReducerReturn {
                display_name: display_name.clone(),
                method: key.clone(),
            });
        }

        verify_state_untouched(&display_name, &key, ctx, &previous_state)?;

        log::trace!("{}: `{}` committed {}", display_name, key, result);
        ctx.set(STATE_KEY, result.clone());
        Ok(result)
    })
}

/// Post-conditions checked before a reducer result is committed
///
/// The instance must hold exactly the `state` field, and that field must
/// still be the very value the reducer was given.
fn verify_state_untouched(
    display_name: &str,
    key: &str,
    ctx: &StoreContext,
    previous_state: &Value,
) -> Result<()> {
    if !(ctx.contains(STATE_KEY) && ctx.len() == 1) {
        return Err(StoreError::ReducerFieldLeak {
            display_name: display_name.to_string(),
            method: key.to_string(),
            keys: ctx.keys(),
        });
    }

    if !previous_state.same(&ctx.value(STATE_KEY)) {
        return Err(StoreError::DirectStateMutation {
            display_name: display_name.to_string(),
            method: key.to_string(),
        });
    }

    Ok(())
}

impl Store for ImmutableReducerStore {
    fn display_name(&self) -> &str {
        self.inner.display_name()
    }

    fn context(&self) -> &StoreContext {
        self.inner.context()
    }

    fn call(&self, method: &str, args: &[Value]) -> Result<Value> {
        self.inner.call(method, args)
    }

    fn dispatch(&mut self, action: &Action) -> Result<Option<Value>> {
        self.inner.dispatch(action)
    }
}

impl fmt::Display for ImmutableReducerStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ImmutableReducerStore {}]", self.display_name())
    }
}
