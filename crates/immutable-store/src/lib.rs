//! Flux stores that only ever hold immutable values
//!
//! This crate layers two guards over a plain object oriented store:
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │ ImmutableReducerStore                          │
//! │  - init must set exactly one `defaultState`    │
//! │  - private methods are pure reducers           │
//! └───────────────────────────────────────────────┘
//!                        │
//!                        ▼
//! ┌───────────────────────────────────────────────┐
//! │ ImmutableStore                                 │
//! │  - every field after init is immutable         │
//! │  - every accessor result is immutable          │
//! └───────────────────────────────────────────────┘
//!                        │
//!                        ▼
//! ┌───────────────────────────────────────────────┐
//! │ ObjectOrientedStore                            │
//! │  - init, bind_actions, dispatch, mock_dispatch │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! "Immutable" means a persistent collection from [`im`] or a primitive; see
//! [`check_immutable`].
//!
//! # Example
//!
//! ```rust
//! use immutable_store::{Action, ImmutableReducerStore, ReducerStoreOptions, Store, Value};
//!
//! # fn main() -> immutable_store::Result<()> {
//! let options = ReducerStoreOptions::new("things")
//!     .init(|ctx| {
//!         ctx.set("defaultState", Value::map([("a", 0)]));
//!         ctx.bind_actions("set_thing", "setThing");
//!         Ok(())
//!     })
//!     .reducer("setThing", |_state, args| Ok(args[0].clone()))
//!     .public("getThing", |ctx, _args| Ok(ctx.value("state")));
//!
//! let mut store = ImmutableReducerStore::new(options)?;
//! store.dispatch(&Action::new("set_thing", "ok"))?;
//! assert_eq!(store.call("getThing", &[])?, Value::from("ok"));
//! # Ok(())
//! # }
//! ```

mod action;
mod context;
mod error;
mod immutable_store;
mod object_store;
mod reducer_store;
mod value;

pub use action::Action;
pub use context::StoreContext;
pub use error::{Result, StoreError};
pub use immutable_store::{check_immutable, init_override, public_override, ImmutableStore};
pub use object_store::{
    InitFn, ObjectOrientedStore, PrivateFn, PublicFn, Store, StoreOptions, TestUtils,
};
pub use reducer_store::{
    reducer_init_override, reducer_override, ImmutableReducerStore, ReducerFn,
    ReducerStoreOptions, DEFAULT_STATE_KEY, STATE_KEY,
};
pub use value::{ImmutableList, ImmutableMap, PlainArray, PlainObject, Value};

// Re-export the persistent collection library so dependents build values
// with the same types the guards accept
pub use im;
