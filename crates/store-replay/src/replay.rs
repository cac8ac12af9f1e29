//! Build a reducer store from a scenario and push its actions through it

use crate::reducers;
use immutable_store::{
    Action, ImmutableReducerStore, ReducerStoreOptions, Store, StoreError, Value,
    DEFAULT_STATE_KEY, STATE_KEY,
};
use store_replay_config::ReplayConfig;

/// What happened to the scenario's actions
#[derive(Debug, Default)]
pub struct ReplayOutcome {
    pub applied: usize,
    pub ignored: usize,
    /// Actions a guard or reducer refused, in dispatch order
    pub rejected: Vec<(String, StoreError)>,
}

impl ReplayOutcome {
    /// Rejections caused by an immutability or reducer discipline violation,
    /// as opposed to a reducer failing on its own terms
    pub fn violations(&self) -> usize {
        self.rejected
            .iter()
            .filter(|(_, err)| err.is_invariant_violation())
            .count()
    }
}

/// Build the store described by `config`
///
/// A scenario without a `[store]` table fails with
/// [`StoreError::MissingConfiguration`].
pub fn build_store(config: &ReplayConfig) -> immutable_store::Result<ImmutableReducerStore> {
    let section = config.store.as_ref().zip(config.default_state());
    let options = section.map(|(section, default_state)| {
        let bindings: Vec<(String, String)> = config
            .bindings
            .iter()
            .map(|binding| (binding.action.clone(), binding.method_name()))
            .collect();

        let initial = default_state.clone();
        let mut options = ReducerStoreOptions::new(section.display_name.clone())
            .init(move |ctx| {
                ctx.set(DEFAULT_STATE_KEY, initial.clone());
                for (action, method) in &bindings {
                    ctx.bind_actions(action.clone(), method.clone());
                }
                Ok(())
            })
            .public("getState", |ctx, _args| Ok(ctx.value(STATE_KEY)));

        for binding in &config.bindings {
            options.reducers.insert(
                binding.method_name(),
                reducers::build(binding.reducer, binding.key.clone(), default_state.clone()),
            );
        }
        options
    });

    ImmutableReducerStore::from_options(options)
}

/// Dispatch every action of the scenario, in order
///
/// A rejected action is recorded and the replay continues with the state the
/// store held before it.
pub fn replay(store: &mut ImmutableReducerStore, config: &ReplayConfig) -> ReplayOutcome {
    let mut outcome = ReplayOutcome::default();

    for entry in &config.actions {
        let action = Action::new(
            entry.action_type.clone(),
            entry.payload_value(config.freeze_payloads),
        );

        match store.dispatch(&action) {
            Ok(Some(state)) => {
                log::info!("{} -> {}", action.action_type, state);
                outcome.applied += 1;
            }
            Ok(None) => {
                log::warn!("No binding for action `{}`", action.action_type);
                outcome.ignored += 1;
            }
            Err(err) if err.is_invariant_violation() => {
                log::warn!("Rejected `{}`: {}", action.action_type, err);
                outcome.rejected.push((action.action_type.clone(), err));
            }
            Err(err) => {
                log::info!("Reducer for `{}` failed: {}", action.action_type, err);
                outcome.rejected.push((action.action_type.clone(), err));
            }
        }
    }

    outcome
}

/// Final state through the store's public accessor
pub fn final_state(store: &ImmutableReducerStore) -> immutable_store::Result<Value> {
    store.call("getState", &[])
}
