//! Activation Primitives
//!
//! This module implements the propagation engine: controllers, observables,
//! scopes and the combinators that compose them.
//!
//! # Concepts
//!
//! ## Activations
//!
//! An observable is either inactive or active with exactly one value. An
//! activation ends before the next one begins; there is never an in-place
//! update.
//!
//! ## Scopes
//!
//! A watcher attaches a scope factory to an observable. On each activation
//! the factory opens a scope; on deactivation the scope is closed. Entry
//! follows registration order and exit runs in reverse.
//!
//! ## Controllers
//!
//! A controller is the mutable source of a graph. `set` and `reset` on a
//! controller synchronously run every affected entry and exit before
//! returning.
//!
//! ## Combinators
//!
//! `and`, `not`, `transform` and `filter` derive new observables by
//! watching existing ones. Composition is watcher-of-watcher, so the
//! ordering rules above hold across the whole graph.
//!
//! # Implementation Notes
//!
//! Everything is single-threaded: nodes are shared with `Rc` and guarded by
//! `RefCell`, so none of these types are `Send`. Reentrant `set`/`reset`
//! calls made from inside a watcher are queued on the node and applied once
//! the in-flight transition completes.

mod both;
mod combinators;
mod controller;
mod node;
mod observable;
pub mod pair;
pub mod scope;
mod subscriber;

pub use both::Both;
pub use controller::Controller;
pub use observable::Observable;
pub use scope::{BoxedScope, OnClose, Scope, ScopeFactory};
pub use subscriber::{NodeId, WatcherId};
