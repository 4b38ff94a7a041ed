//! Scopes and Scope Factories
//!
//! A [`Scope`] stands for side effects that are live while an observable is
//! active. It is released exactly once, when the observable deactivates.
//! Ownership enforces the "exactly once" part: `close` consumes the boxed
//! scope.
//!
//! A [`ScopeFactory`] turns an activation value into a scope. Any closure
//! `Fn(&T) -> S` where `S: Scope` is a factory, so most callers never name
//! the trait:
//!
//! ```rust
//! use latch_core::{scope, Controller};
//!
//! let name: Controller<String> = Controller::new();
//! name.watch(|value: &String| {
//!     println!("hello {value}");
//!     scope::on_close(|| println!("goodbye"))
//! });
//! name.set("world".to_string());
//! name.reset();
//! ```

use std::fmt;

/// Live side effects of one activation.
pub trait Scope {
    /// Release the side effects. Called exactly once.
    fn close(self: Box<Self>);
}

/// A boxed, type-erased scope as stored by watchers.
pub type BoxedScope = Box<dyn Scope>;

/// The empty scope: nothing to release.
impl Scope for () {
    fn close(self: Box<Self>) {}
}

impl<S: Scope + ?Sized> Scope for Box<S> {
    fn close(self: Box<Self>) {
        S::close(*self);
    }
}

/// Optional scopes close their contents, if any.
impl<S: Scope> Scope for Option<S> {
    fn close(self: Box<Self>) {
        if let Some(scope) = *self {
            S::close(Box::new(scope));
        }
    }
}

/// A scope that runs a closure when released.
///
/// Created by [`on_close`].
pub struct OnClose<F: FnOnce()> {
    release: F,
}

impl<F: FnOnce()> Scope for OnClose<F> {
    fn close(self: Box<Self>) {
        (self.release)();
    }
}

impl<F: FnOnce()> fmt::Debug for OnClose<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OnClose")
    }
}

/// Build a scope that runs `release` when it is closed.
pub fn on_close<F>(release: F) -> OnClose<F>
where
    F: FnOnce(),
{
    OnClose { release }
}

/// Produces a scope for each activation value.
pub trait ScopeFactory<T: ?Sized> {
    /// Open a scope for `value`. Called once per activation.
    fn create(&self, value: &T) -> BoxedScope;
}

impl<T, F, S> ScopeFactory<T> for F
where
    T: ?Sized,
    F: Fn(&T) -> S,
    S: Scope + 'static,
{
    fn create(&self, value: &T) -> BoxedScope {
        Box::new(self(value))
    }
}

/// A factory that runs `enter` on each activation and releases nothing.
pub fn on_enter<T, F>(enter: F) -> impl Fn(&T) + 'static
where
    T: ?Sized + 'static,
    F: Fn(&T) + 'static,
{
    move |value: &T| enter(value)
}

/// A factory that does nothing on activation and runs `exit` when the
/// activation ends.
pub fn on_exit<T, F>(exit: F) -> impl Fn(&T) -> BoxedScope + 'static
where
    T: ?Sized + 'static,
    F: Fn() + Clone + 'static,
{
    move |_: &T| -> BoxedScope {
        let exit = exit.clone();
        Box::new(on_close(move || exit()))
    }
}
