//! Controller Implementation
//!
//! A [`Controller`] is the only way to inject activations into a graph. It
//! owns an observable and exposes `set` and `reset`.
//!
//! # Semantics
//!
//! - `set(value)` on an inactive controller activates it, entering every
//!   watcher in registration order.
//! - `set(value)` on an active controller first runs a full reset and then
//!   activates with `value`, even when `value` equals the current value.
//! - `reset()` on an active controller exits every watcher in reverse
//!   registration order. On an inactive controller it does nothing.
//!
//! Calls made from inside a watcher while the controller is transitioning
//! are queued and applied right after the current transition completes.

use std::fmt;
use std::ops::Deref;

use tracing::error;

use super::node::{Node, Transition};
use super::observable::Observable;
use crate::config::ReactiveConfig;
use crate::error::Result;

/// A mutable activation source.
///
/// Dereferences to [`Observable`], so `watch` and the combinators can be
/// called on a controller directly.
///
/// # Example
///
/// ```rust
/// use latch_core::{scope, Controller};
///
/// let page: Controller<String> = Controller::new();
/// page.watch(|url: &String| {
///     println!("loading {url}");
///     scope::on_close(|| println!("unloading"))
/// });
///
/// page.set("https://example.com".to_string()); // loading ...
/// page.set("https://example.org".to_string()); // unloading, loading ...
/// page.reset();                                 // unloading
/// ```
pub struct Controller<T> {
    observable: Observable<T>,
}

impl<T> Controller<T>
where
    T: Clone + 'static,
{
    /// Create an inactive controller with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ReactiveConfig::default())
    }

    /// Create an inactive controller with the given configuration.
    pub fn with_config(config: ReactiveConfig) -> Self {
        Self {
            observable: Observable::from_node(Node::new(config)),
        }
    }

    /// Activate with `value`, replacing any current activation.
    ///
    /// A runaway reentrancy loop is logged and otherwise ignored; use
    /// [`try_set`](Self::try_set) to observe it.
    pub fn set(&self, value: T) {
        if let Err(err) = self.try_set(value) {
            error!(node = %self.observable.id(), %err, "set failed");
        }
    }

    /// Activate with `value`, reporting a runaway reentrancy loop.
    pub fn try_set(&self, value: T) -> Result<()> {
        self.observable.node.submit(Transition::Activate(value))
    }

    /// `Some(value)` behaves as [`set`](Self::set), `None` as
    /// [`reset`](Self::reset).
    pub fn set_or_reset(&self, value: Option<T>) {
        match value {
            Some(value) => self.set(value),
            None => self.reset(),
        }
    }

    /// Deactivate, closing every open watcher scope.
    pub fn reset(&self) {
        if let Err(err) = self.try_reset() {
            error!(node = %self.observable.id(), %err, "reset failed");
        }
    }

    /// Deactivate, reporting a runaway reentrancy loop.
    pub fn try_reset(&self) -> Result<()> {
        self.observable.node.submit(Transition::Deactivate)
    }

    /// A read-only handle to this controller's activation state.
    pub fn observable(&self) -> Observable<T> {
        self.observable.clone()
    }
}

impl<T> Default for Controller<T>
where
    T: Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for Controller<T> {
    type Target = Observable<T>;

    fn deref(&self) -> &Observable<T> {
        &self.observable
    }
}

impl<T> fmt::Debug for Controller<T>
where
    T: Clone + fmt::Debug + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Controller").field(&self.observable).finish()
    }
}
