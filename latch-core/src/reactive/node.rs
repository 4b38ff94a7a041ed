//! Observable Nodes
//!
//! A node is the single piece of state behind every observable: the current
//! activation value (if any) and the ordered table of watchers. Controllers
//! and combinators are thin handles over a node.
//!
//! # Transitions
//!
//! A node changes state only through two transitions:
//!
//! - `Activate(value)`: if already active, deactivate first. Then store the
//!   value and enter every watcher in registration order.
//! - `Deactivate`: if inactive, nothing happens. Otherwise clear the value
//!   and exit every watcher in reverse registration order.
//!
//! Exiting a watcher deactivates its relay node (the observable returned by
//! `watch`) before the watcher's own scope is closed, so chained watchers
//! unwind last-in first-out.
//!
//! # Reentrancy
//!
//! Watcher callbacks run while the node is mid-transition and may request
//! another transition on the same node. Such requests are queued and run,
//! in order, as soon as the in-flight transition completes, before the
//! outermost call returns. No borrow of the node state is held while user
//! code runs.
//!
//! Attaching a watcher to an active node is itself a queued transition, so
//! a factory that sets or resets the node during `watch` is serialized like
//! any other handler. A reset requested from an exit handler while the node
//! is already inactive, with nothing queued behind it, is dropped: it would
//! otherwise undo the activation that follows.
//!
//! A relay is only ever driven from its parent's transitions, and a parent
//! queues its own reentrant requests until the relay's transition returns.
//! The relay is therefore idle whenever its parent exits the watcher, and
//! its deactivation runs to completion before the parent scope closes.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::{debug, error, trace};

use super::scope::{BoxedScope, ScopeFactory};
use super::subscriber::{NodeId, WatcherId};
use crate::config::ReactiveConfig;
use crate::error::{ReactiveError, Result};

/// A state change requested on a node.
pub(crate) enum Transition<T> {
    Activate(T),
    Deactivate,
    /// Enter one newly registered watcher if the node is still active.
    Enter(WatcherId),
}

impl<T> Transition<T> {
    fn kind(&self) -> &'static str {
        match self {
            Transition::Activate(_) => "activate",
            Transition::Deactivate => "deactivate",
            Transition::Enter(_) => "enter",
        }
    }
}

/// A registered factory and the scope it currently has open.
struct Watcher<T> {
    factory: Rc<dyn ScopeFactory<T>>,

    /// Present exactly while this watcher is entered.
    scope: Option<BoxedScope>,

    /// Active while this watcher is entered; handed out by `watch`.
    relay: Rc<Node<T>>,
}

struct NodeState<T> {
    value: Option<T>,

    /// Watchers in registration order.
    watchers: IndexMap<WatcherId, Watcher<T>>,

    /// Set while a transition is being applied.
    transitioning: bool,

    /// Reentrant requests waiting for the in-flight transition.
    pending: SmallVec<[Transition<T>; 1]>,
}

/// Shared state behind an observable.
pub(crate) struct Node<T> {
    id: NodeId,
    config: ReactiveConfig,
    state: RefCell<NodeState<T>>,
}

impl<T> Node<T>
where
    T: Clone + 'static,
{
    pub(crate) fn new(config: ReactiveConfig) -> Rc<Self> {
        Rc::new(Self {
            id: NodeId::new(),
            config,
            state: RefCell::new(NodeState {
                value: None,
                watchers: IndexMap::new(),
                transitioning: false,
                pending: SmallVec::new(),
            }),
        })
    }

    pub(crate) fn id(&self) -> NodeId {
        self.id
    }

    pub(crate) fn config(&self) -> ReactiveConfig {
        self.config
    }

    pub(crate) fn is_active(&self) -> bool {
        self.state.borrow().value.is_some()
    }

    pub(crate) fn value(&self) -> Option<T> {
        self.state.borrow().value.clone()
    }

    pub(crate) fn watcher_count(&self) -> usize {
        self.state.borrow().watchers.len()
    }

    /// Apply a transition, or queue it if one is already in flight.
    ///
    /// Returns an error only when this call drained the queue and the queue
    /// outgrew `max_chained_transitions`.
    pub(crate) fn submit(&self, transition: Transition<T>) -> Result<()> {
        {
            let mut state = self.state.borrow_mut();
            if state.transitioning {
                if matches!(transition, Transition::Deactivate)
                    && state.value.is_none()
                    && state.pending.is_empty()
                {
                    trace!(node = %self.id, "dropping reentrant deactivate on inactive node");
                    return Ok(());
                }
                trace!(node = %self.id, kind = transition.kind(), "queueing reentrant transition");
                state.pending.push(transition);
                return Ok(());
            }
            state.transitioning = true;
        }

        let _guard = TransitionGuard { node: self };
        let limit = self.config.max_chained_transitions;
        let mut drained = 0usize;
        let mut next = transition;

        loop {
            match next {
                Transition::Activate(value) => self.run_activate(value),
                Transition::Deactivate => self.run_deactivate(),
                Transition::Enter(id) => self.run_enter(id),
            }

            let mut state = self.state.borrow_mut();
            if state.pending.is_empty() {
                return Ok(());
            }

            drained += 1;
            if drained > limit {
                let discarded = state.pending.len();
                state.pending.clear();
                error!(
                    node = %self.id,
                    limit,
                    discarded,
                    "transition limit exceeded, discarding pending transitions"
                );
                return Err(ReactiveError::TransitionLimit {
                    node: self.id,
                    limit,
                });
            }
            next = state.pending.remove(0);
        }
    }

    /// Submit a transition on behalf of an upstream watcher.
    ///
    /// Watcher callbacks cannot propagate errors; `submit` has already
    /// logged any failure.
    pub(crate) fn forward(&self, transition: Transition<T>) {
        let _ = self.submit(transition);
    }

    /// Register a watcher, entering it at once if the node is active.
    ///
    /// When called from a handler of this node, the entry waits for the
    /// in-flight transition. Returns the watcher's relay node.
    pub(crate) fn watch(&self, factory: Rc<dyn ScopeFactory<T>>) -> Rc<Node<T>> {
        let relay = Node::new(self.config);
        let id = WatcherId::new();

        let current = {
            let mut state = self.state.borrow_mut();
            state.watchers.insert(
                id,
                Watcher {
                    factory,
                    scope: None,
                    relay: Rc::clone(&relay),
                },
            );
            state.value.clone()
        };
        trace!(node = %self.id, watcher = ?id, active = current.is_some(), "watcher registered");

        if current.is_some() {
            self.forward(Transition::Enter(id));
        }
        relay
    }

    fn run_enter(&self, id: WatcherId) {
        let Some(value) = self.value() else {
            return;
        };
        self.enter_watcher(id, &value);
    }

    fn run_activate(&self, value: T) {
        self.run_deactivate();

        let ids: SmallVec<[WatcherId; 8]> = {
            let mut state = self.state.borrow_mut();
            state.value = Some(value.clone());
            state.watchers.keys().copied().collect()
        };
        debug!(node = %self.id, watchers = ids.len(), "activating");

        for id in ids {
            self.enter_watcher(id, &value);
        }
    }

    fn run_deactivate(&self) {
        let ids: SmallVec<[WatcherId; 8]> = {
            let mut state = self.state.borrow_mut();
            if state.value.take().is_none() {
                return;
            }
            state.watchers.keys().rev().copied().collect()
        };
        debug!(node = %self.id, watchers = ids.len(), "deactivating");

        for id in ids {
            self.exit_watcher(id);
        }
    }

    fn enter_watcher(&self, id: WatcherId, value: &T) {
        let (factory, relay) = {
            let state = self.state.borrow();
            match state.watchers.get(&id) {
                Some(watcher) if watcher.scope.is_none() => {
                    (Rc::clone(&watcher.factory), Rc::clone(&watcher.relay))
                }
                _ => return,
            }
        };

        trace!(node = %self.id, watcher = ?id, "entering watcher");
        let scope = factory.create(value);
        if let Some(watcher) = self.state.borrow_mut().watchers.get_mut(&id) {
            watcher.scope = Some(scope);
        }

        relay.forward(Transition::Activate(value.clone()));
    }

    /// Deactivate the watcher's relay, then close its scope.
    ///
    /// The relay is idle here (see the module docs), so its watchers have
    /// all exited by the time `scope` closes.
    fn exit_watcher(&self, id: WatcherId) {
        let (scope, relay) = {
            let mut state = self.state.borrow_mut();
            let Some(watcher) = state.watchers.get_mut(&id) else {
                return;
            };
            let Some(scope) = watcher.scope.take() else {
                return;
            };
            (scope, Rc::clone(&watcher.relay))
        };

        relay.forward(Transition::Deactivate);

        trace!(node = %self.id, watcher = ?id, "exiting watcher");
        scope.close();
    }
}

/// Clears the transitioning flag when a drain finishes, including by panic.
struct TransitionGuard<'a, T> {
    node: &'a Node<T>,
}

impl<T> Drop for TransitionGuard<'_, T> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.node.state.try_borrow_mut() {
            state.transitioning = false;
            state.pending.clear();
        } else {
            error!(node = %self.node.id, "node state still borrowed, transitioning flag left set");
        }
    }
}
