//! Observable Implementation
//!
//! An [`Observable`] is a read-only handle to an activation state. Interested
//! parties attach scope factories with [`Observable::watch`]; each factory is
//! invoked once per activation and its scope is closed on deactivation.
//!
//! # Watching
//!
//! - If the observable is already active, `watch` runs the factory before
//!   returning. Called from one of this observable's own handlers, the
//!   entry waits until the in-flight transition completes.
//! - Otherwise the watcher stays dormant until the next activation.
//! - `watch` returns another observable that is active exactly while this
//!   watcher's scope is open, so watchers can themselves be watched.
//!
//! Handles are cheap to clone and all clones share the same state. There is
//! no unwatch operation: a watcher lives as long as the node it watches.

use std::fmt;
use std::rc::Rc;

use super::node::Node;
use super::scope::{Scope, ScopeFactory};
use super::subscriber::NodeId;
use crate::config::ReactiveConfig;

/// A source of activations carrying values of type `T`.
///
/// # Example
///
/// ```rust
/// use latch_core::{scope, Controller};
///
/// let status: Controller<&'static str> = Controller::new();
/// status.set("ready");
///
/// // Already active: the factory runs immediately.
/// status.watch(|value: &&'static str| {
///     println!("status is {value}");
///     scope::on_close(|| println!("status cleared"))
/// });
/// ```
pub struct Observable<T> {
    pub(crate) node: Rc<Node<T>>,
}

impl<T> Observable<T>
where
    T: Clone + 'static,
{
    pub(crate) fn from_node(node: Rc<Node<T>>) -> Self {
        Self { node }
    }

    /// Register a closure as a scope factory.
    ///
    /// The closure is called with each activation value and returns the
    /// scope to close when that activation ends.
    pub fn watch<F, S>(&self, factory: F) -> Observable<T>
    where
        F: Fn(&T) -> S + 'static,
        S: Scope + 'static,
    {
        self.watch_factory(factory)
    }

    /// Register any [`ScopeFactory`] implementation.
    pub fn watch_factory<F>(&self, factory: F) -> Observable<T>
    where
        F: ScopeFactory<T> + 'static,
    {
        Observable::from_node(self.node.watch(Rc::new(factory)))
    }

    /// Whether the observable currently holds an activation value.
    pub fn is_active(&self) -> bool {
        self.node.is_active()
    }

    /// The current activation value, if active.
    pub fn current(&self) -> Option<T> {
        self.node.value()
    }

    /// The identifier used for this observable in log fields and errors.
    pub fn id(&self) -> NodeId {
        self.node.id()
    }

    /// Configuration inherited by observables derived from this one.
    pub fn config(&self) -> ReactiveConfig {
        self.node.config()
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            node: Rc::clone(&self.node),
        }
    }
}

impl<T> fmt::Debug for Observable<T>
where
    T: Clone + fmt::Debug + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("id", &self.node.id())
            .field("value", &self.node.value())
            .field("watcher_count", &self.node.watcher_count())
            .finish()
    }
}
