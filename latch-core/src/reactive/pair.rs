//! Two-argument scope factories over [`Both`].
//!
//! Conjunctions deliver a `Both<A, B>`; these helpers let callers write
//! `|a, b| ...` instead of unpacking the pair by hand.

use super::both::Both;
use super::observable::Observable;
use super::scope::Scope;

/// Adapt a two-argument factory into a factory over `Both<A, B>`.
///
/// ```rust
/// use latch_core::{pair, Controller};
///
/// let width: Controller<u32> = Controller::new();
/// let height: Controller<u32> = Controller::new();
/// width.and(&height).watch(pair::both(|w: &u32, h: &u32| {
///     println!("area {}", w * h);
/// }));
/// ```
pub fn both<A, B, F, S>(factory: F) -> impl Fn(&Both<A, B>) -> S + 'static
where
    A: 'static,
    B: 'static,
    F: Fn(&A, &B) -> S + 'static,
    S: Scope + 'static,
{
    move |pair: &Both<A, B>| factory(pair.first(), pair.second())
}

impl<A, B> Observable<Both<A, B>>
where
    A: Clone + 'static,
    B: Clone + 'static,
{
    /// Watch with a two-argument factory; see [`both`].
    pub fn watch_both<F, S>(&self, factory: F) -> Observable<Both<A, B>>
    where
        F: Fn(&A, &B) -> S + 'static,
        S: Scope + 'static,
    {
        self.watch(both(factory))
    }
}
