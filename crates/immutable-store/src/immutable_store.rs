//! ImmutableStore - a store that is strict on immutability
//!
//! Wraps [`ObjectOrientedStore`] using the decorator pattern: before the base
//! store is built, `init` and every public accessor are replaced with guarded
//! versions of the same signature.
//!
//! ```text
//! StoreOptions
//!   init    ──► init_override      (every field checked after init)
//!   public  ──► public_override    (every return value checked)
//!   private ──► unchanged
//!        │
//!        ▼
//! ObjectOrientedStore
//! ```

use crate::action::Action;
use crate::context::StoreContext;
use crate::error::{Result, StoreError};
use crate::object_store::{InitFn, ObjectOrientedStore, PublicFn, Store, StoreOptions};
use crate::value::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Returns true if `value` is a persistent collection or a primitive
///
/// Plain objects and arrays are rejected. Pure and total.
pub fn check_immutable(value: &Value) -> bool {
    value.is_immutable_collection() || value.is_primitive()
}

/// A store whose fields and accessor results are always immutable or primitive
pub struct ImmutableStore {
    inner: ObjectOrientedStore,
}

impl ImmutableStore {
    /// Same as [`check_immutable`]
    pub fn check_immutable(value: &Value) -> bool {
        check_immutable(value)
    }

    pub fn new(options: StoreOptions) -> Result<Self> {
        Self::from_options(Some(options))
    }

    /// Build from an optional configuration
    ///
    /// Fails with [`StoreError::MissingConfiguration`] before anything else
    /// when no configuration is given.
    pub fn from_options(options: Option<StoreOptions>) -> Result<Self> {
        let options = options.ok_or(StoreError::MissingConfiguration)?;
        let StoreOptions {
            display_name,
            init,
            public,
            private,
        } = options;

        // Wrap methods with immutability checkers before creating the base store
        let mut parent_options = StoreOptions {
            display_name: display_name.clone(),
            init: None,
            public: BTreeMap::new(),
            private,
        };

        if let Some(init) = init {
            parent_options.init = Some(init_override(&display_name, init));
        }

        for (key, accessor) in public {
            let guarded = public_override(&display_name, &key, accessor);
            parent_options.public.insert(key, guarded);
        }

        Ok(Self {
            inner: ObjectOrientedStore::new(parent_options)?,
        })
    }
}

/// Wrap `init` so that every field it leaves behind must be immutable
pub fn init_override(display_name: &str, init: InitFn) -> InitFn {
    let display_name = display_name.to_string();
    Box::new(move |ctx: &mut StoreContext| -> Result<()> {
        init(ctx)?;

        for (key, member) in ctx.fields() {
            if !check_immutable(member) {
                return Err(StoreError::NonImmutableInitField {
                    display_name: display_name.clone(),
                    key: key.clone(),
                });
            }
        }
        Ok(())
    })
}

/// Wrap a public accessor so that it may only return immutable values
///
/// The result is passed through unchanged; nothing is cached.
pub fn public_override(display_name: &str, key: &str, accessor: PublicFn) -> PublicFn {
    let display_name = display_name.to_string();
    let key = key.to_string();
    Box::new(move |ctx: &StoreContext, args: &[Value]| -> Result<Value> {
        let result = accessor(ctx, args)?;

        if !check_immutable(&result) {
            return Err(StoreError::NonImmutablePublicReturn {
                display_name: display_name.clone(),
                method: key.clone(),
            });
        }

        Ok(result)
    })
}

impl Store for ImmutableStore {
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

impl fmt::Display for ImmutableStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ImmutableStore {}]", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_check_immutable_classification() {
        assert!(check_immutable(&Value::Undefined));
        assert!(check_immutable(&Value::Null));
        assert!(check_immutable(&Value::from(0)));
        assert!(check_immutable(&Value::from("")));
        assert!(check_immutable(&Value::from(false)));
        assert!(check_immutable(&Value::empty_map()));
        assert!(check_immutable(&Value::list([1, 2, 3])));
        assert!(!check_immutable(&Value::object([("a", 1)])));
        assert!(!check_immutable(&Value::array(Vec::<Value>::new())));
    }

    #[test]
    fn test_missing_configuration() {
        let err = ImmutableStore::from_options(None).err().unwrap();
        assert_eq!(err, StoreError::MissingConfiguration);
    }

    #[test]
    fn test_init_rejects_plain_object_field() {
        let options = StoreOptions::new("todos").init(|ctx| {
            ctx.set("list", Value::list(["a"]));
            ctx.set("meta", Value::object([("count", 1)]));
            Ok(())
        });
        let err = ImmutableStore::new(options).err().unwrap();
        assert_eq!(
            err,
            StoreError::NonImmutableInitField {
                display_name: "todos".to_string(),
                key: "meta".to_string(),
            }
        );
    }

    #[test]
    fn test_init_accepts_immutable_and_primitive_fields() {
        let options = StoreOptions::new("todos").init(|ctx| {
            ctx.set("list", Value::list(["a"]));
            ctx.set("count", 1);
            ctx.set("title", "Todos");
            Ok(())
        });
        let store = ImmutableStore::new(options).unwrap();
        assert_eq!(store.context().len(), 3);
        assert_eq!(store.to_string(), "[ImmutableStore todos]");
    }

    #[test]
    fn test_public_override_rejects_plain_result() {
        let options = StoreOptions::new("s")
            .public("getBadThing", |_ctx, _args| Ok(Value::object(Vec::<(String, Value)>::new())));
        let store = ImmutableStore::new(options).unwrap();
        let err = store.call("getBadThing", &[]).unwrap_err();
        assert_eq!(
            err,
            StoreError::NonImmutablePublicReturn {
                display_name: "s".to_string(),
                method: "getBadThing".to_string(),
            }
        );
    }

    #[test]
    fn test_public_override_passes_value_through() {
        let options = StoreOptions::new("s")
            .init(|ctx| {
                ctx.set("thing", Value::map([("a", 0)]));
                Ok(())
            })
            .public("getThing", |ctx, _args| Ok(ctx.value("thing")));
        let store = ImmutableStore::new(options).unwrap();

        let first = store.call("getThing", &[]).unwrap();
        let second = store.call("getThing", &[]).unwrap();
        assert!(first.same(store.context().get("thing").unwrap()));
        assert!(first.same(&second));
    }

    #[test]
    fn test_private_methods_are_not_guarded() {
        let options = StoreOptions::new("s")
            .init(|ctx| {
                ctx.bind_actions("stash", "stash");
                Ok(())
            })
            .private("stash", |ctx, args| {
                ctx.set("stash", args.first().cloned().unwrap_or_default());
                Ok(Value::Undefined)
            });
        let mut store = ImmutableStore::new(options).unwrap();
        store
            .test_utils()
            .mock_dispatch_type("stash", Value::object([("k", 1)]))
            .unwrap();
        assert!(matches!(store.context().get("stash"), Some(Value::Object(_))));
    }
}
