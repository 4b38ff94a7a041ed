//! Latch Core
//!
//! A small, synchronous activation/deactivation propagation engine.
//!
//! Values *activate* with data and later *deactivate*. Consumers attach
//! scoped side effects to those transitions, and combinators compose several
//! sources with well-defined ordering:
//!
//! - Watchers enter in registration order and exit in reverse order.
//! - Setting an active controller exits the old value before entering the
//!   new one.
//! - Watching an active observable enters immediately.
//! - Reentrant `set`/`reset` calls from inside a watcher are queued and run
//!   as soon as the current transition completes.
//!
//! # Architecture
//!
//! - `reactive`: controllers, observables, scopes, combinators
//! - `config`: engine tunables
//! - `error`: the error type for the rare failure path
//!
//! # Example
//!
//! ```rust
//! use latch_core::{scope, Controller};
//!
//! let a: Controller<String> = Controller::new();
//! let b: Controller<String> = Controller::new();
//!
//! a.and(&b).watch(|pair: &latch_core::Both<String, String>| {
//!     println!("enter both: {pair}");
//!     scope::on_close(|| println!("exit both"))
//! });
//!
//! a.set("A".to_string());
//! b.set("B".to_string()); // enter both: A, B
//! a.reset();              // exit both
//! ```

pub mod config;
pub mod error;
pub mod reactive;

pub use config::ReactiveConfig;
pub use error::{ReactiveError, Result};
pub use reactive::{
    pair, scope, BoxedScope, Both, Controller, NodeId, Observable, OnClose, Scope, ScopeFactory,
    WatcherId,
};
