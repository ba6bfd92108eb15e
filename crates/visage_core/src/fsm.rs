//! Finite state machines
//!
//! Flat machines over caller-defined state and event enums. A transition may
//! carry a guard and actions; states may carry entry and exit hooks. Every
//! fired transition is recorded.
//!
//! The session lifecycle in [`crate::session`] is built on this runtime.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt::Debug;
use std::hash::Hash;

/// Bound for anything usable as a state or event identifier
pub trait StateKey: Copy + Eq + Hash + Debug + Send + 'static {}

impl<T: Copy + Eq + Hash + Debug + Send + 'static> StateKey for T {}

/// Predicate checked before a transition fires
pub type Guard = Box<dyn Fn() -> bool + Send>;

/// Hook run while a transition fires
pub type Action = Box<dyn FnMut() + Send>;

/// `from_state --event--> to_state`
pub struct Transition<S, E> {
    pub from_state: S,
    pub event: E,
    pub to_state: S,
    pub guard: Option<Guard>,
    pub actions: SmallVec<[Action; 2]>,
}

impl<S: StateKey, E: StateKey> Transition<S, E> {
    /// Unconditional transition
    pub fn new(from: S, event: E, to: S) -> Self {
        Self {
            from_state: from,
            event,
            to_state: to,
            guard: None,
            actions: SmallVec::new(),
        }
    }

    pub fn with_guard<F: Fn() -> bool + Send + 'static>(mut self, guard: F) -> Self {
        self.guard = Some(Box::new(guard));
        self
    }

    /// Runs after exit hooks and before entry hooks
    pub fn with_action<F: FnMut() + Send + 'static>(mut self, action: F) -> Self {
        self.actions.push(Box::new(action));
        self
    }

    fn matches(&self, current: S, event: E) -> bool {
        self.from_state == current
            && self.event == event
            && match &self.guard {
                Some(guard) => guard(),
                None => true,
            }
    }
}

/// Assembles a [`StateMachine`] from its table and hooks
pub struct StateMachineBuilder<S, E> {
    initial_state: S,
    transitions: Vec<Transition<S, E>>,
    entry_hooks: FxHashMap<S, Vec<Action>>,
    exit_hooks: FxHashMap<S, Vec<Action>>,
}

impl<S: StateKey, E: StateKey> StateMachineBuilder<S, E> {
    pub fn new(initial_state: S) -> Self {
        Self {
            initial_state,
            transitions: Vec::new(),
            entry_hooks: FxHashMap::default(),
            exit_hooks: FxHashMap::default(),
        }
    }

    pub fn transition(mut self, transition: Transition<S, E>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Shorthand for [`Transition::new`]
    pub fn on(mut self, from: S, event: E, to: S) -> Self {
        self.transitions.push(Transition::new(from, event, to));
        self
    }

    /// Hook run each time `state` is entered
    pub fn on_enter<F: FnMut() + Send + 'static>(mut self, state: S, action: F) -> Self {
        self.entry_hooks
            .entry(state)
            .or_default()
            .push(Box::new(action));
        self
    }

    /// Hook run each time `state` is left
    pub fn on_exit<F: FnMut() + Send + 'static>(mut self, state: S, action: F) -> Self {
        self.exit_hooks
            .entry(state)
            .or_default()
            .push(Box::new(action));
        self
    }

    pub fn build(self) -> StateMachine<S, E> {
        StateMachine {
            current_state: self.initial_state,
            transitions: self.transitions,
            entry_hooks: self.entry_hooks,
            exit_hooks: self.exit_hooks,
            history: Vec::new(),
        }
    }
}

/// A running machine
pub struct StateMachine<S, E> {
    current_state: S,
    transitions: Vec<Transition<S, E>>,
    entry_hooks: FxHashMap<S, Vec<Action>>,
    exit_hooks: FxHashMap<S, Vec<Action>>,
    /// Fired transitions, oldest first
    history: Vec<(S, E, S)>,
}

impl<S: StateKey, E: StateKey> StateMachine<S, E> {
    /// Machine without hooks
    pub fn new(initial_state: S, transitions: Vec<Transition<S, E>>) -> Self {
        Self {
            current_state: initial_state,
            transitions,
            entry_hooks: FxHashMap::default(),
            exit_hooks: FxHashMap::default(),
            history: Vec::new(),
        }
    }

    pub fn builder(initial_state: S) -> StateMachineBuilder<S, E> {
        StateMachineBuilder::new(initial_state)
    }

    pub fn current_state(&self) -> S {
        self.current_state
    }

    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    pub fn history(&self) -> &[(S, E, S)] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Whether `event` would fire a transition right now
    pub fn can_send(&self, event: E) -> bool {
        let current = self.current_state;
        self.transitions.iter().any(|t| t.matches(current, event))
    }

    /// Send an event, returning the new state if a transition fired
    pub fn try_send(&mut self, event: E) -> Option<S> {
        let current = self.current_state;

        let idx = self
            .transitions
            .iter()
            .position(|t| t.matches(current, event))?;

        let to_state = self.transitions[idx].to_state;

        for hook in self.exit_hooks.get_mut(&current).into_iter().flatten() {
            hook();
        }

        for action in self.transitions[idx].actions.iter_mut() {
            action();
        }

        self.current_state = to_state;
        self.history.push((current, event, to_state));

        for hook in self.entry_hooks.get_mut(&to_state).into_iter().flatten() {
            hook();
        }

        Some(to_state)
    }

    /// Like [`StateMachine::try_send`], returning the resulting state
    pub fn send(&mut self, event: E) -> S {
        self.try_send(event).unwrap_or(self.current_state)
    }
}
