//! Combinators
//!
//! Derived observables built purely on [`Observable::watch`]. Each
//! combinator creates a fresh node and registers watchers on its upstream
//! observable(s) that forward activations to it. There is no separate
//! evaluation pass: ordering and reentrancy behave exactly as for direct
//! watchers.
//!
//! Derived nodes inherit the configuration of their (first) upstream.

use std::cell::RefCell;
use std::ops::Not;
use std::rc::Rc;

use super::both::Both;
use super::node::{Node, Transition};
use super::observable::Observable;
use super::scope::on_close;

/// Last-known values of the two sides of a conjunction.
struct Slots<A, B> {
    first: Option<A>,
    second: Option<B>,
}

impl<T> Observable<T>
where
    T: Clone + 'static,
{
    /// Active exactly while both `self` and `other` are active.
    ///
    /// A new activation of either side while both are active exits the old
    /// pair and enters the new one.
    ///
    /// ```rust
    /// use latch_core::Controller;
    ///
    /// let user: Controller<String> = Controller::new();
    /// let room: Controller<u32> = Controller::new();
    /// let joined = user.and(&room);
    ///
    /// user.set("ada".to_string());
    /// assert!(!joined.is_active());
    /// room.set(7);
    /// assert_eq!(joined.current().map(|pair| pair.to_string()), Some("ada, 7".to_string()));
    /// ```
    pub fn and<U>(&self, other: &Observable<U>) -> Observable<Both<T, U>>
    where
        U: Clone + 'static,
    {
        let node = Node::new(self.config());
        let slots = Rc::new(RefCell::new(Slots::<T, U> {
            first: None,
            second: None,
        }));

        {
            let node = Rc::clone(&node);
            let slots = Rc::clone(&slots);
            self.watch(move |first: &T| {
                let pair = {
                    let mut slots = slots.borrow_mut();
                    slots.first = Some(first.clone());
                    slots
                        .second
                        .clone()
                        .map(|second| Both::new(first.clone(), second))
                };
                if let Some(pair) = pair {
                    node.forward(Transition::Activate(pair));
                }

                let node = Rc::clone(&node);
                let slots = Rc::clone(&slots);
                on_close(move || {
                    slots.borrow_mut().first = None;
                    node.forward(Transition::Deactivate);
                })
            });
        }

        {
            let node = Rc::clone(&node);
            let slots = Rc::clone(&slots);
            other.watch(move |second: &U| {
                let pair = {
                    let mut slots = slots.borrow_mut();
                    slots.second = Some(second.clone());
                    slots
                        .first
                        .clone()
                        .map(|first| Both::new(first, second.clone()))
                };
                if let Some(pair) = pair {
                    node.forward(Transition::Activate(pair));
                }

                let node = Rc::clone(&node);
                let slots = Rc::clone(&slots);
                on_close(move || {
                    slots.borrow_mut().second = None;
                    node.forward(Transition::Deactivate);
                })
            });
        }

        Observable::from_node(node)
    }

    /// Active exactly while `self` is inactive.
    ///
    /// The inversion of an inactive observable starts active, so watching it
    /// enters immediately.
    pub fn not(&self) -> Observable<()> {
        let node = Node::new(self.config());
        node.forward(Transition::Activate(()));

        let inverse = Rc::clone(&node);
        self.watch(move |_: &T| {
            inverse.forward(Transition::Deactivate);

            let inverse = Rc::clone(&inverse);
            on_close(move || inverse.forward(Transition::Activate(())))
        });

        Observable::from_node(node)
    }

    /// Republish every activation as `f(value)`, with the same timing.
    pub fn transform<U, F>(&self, f: F) -> Observable<U>
    where
        U: Clone + 'static,
        F: Fn(&T) -> U + 'static,
    {
        let node = Node::new(self.config());

        let target = Rc::clone(&node);
        self.watch(move |value: &T| {
            target.forward(Transition::Activate(f(value)));

            let target = Rc::clone(&target);
            on_close(move || target.forward(Transition::Deactivate))
        });

        Observable::from_node(node)
    }

    /// Active while `self` is active with a value satisfying `predicate`.
    pub fn filter<P>(&self, predicate: P) -> Observable<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        let node = Node::new(self.config());

        let target = Rc::clone(&node);
        self.watch(move |value: &T| {
            let passed = predicate(value);
            if passed {
                target.forward(Transition::Activate(value.clone()));
            }

            let target = Rc::clone(&target);
            on_close(move || {
                if passed {
                    target.forward(Transition::Deactivate);
                }
            })
        });

        Observable::from_node(node)
    }
}

impl<T> Not for &Observable<T>
where
    T: Clone + 'static,
{
    type Output = Observable<()>;

    fn not(self) -> Observable<()> {
        Observable::not(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::reactive::Controller;
    use crate::reactive::scope::on_close;
    use std::cell::RefCell;
    use std::fmt::Display;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    fn report<T: Display + 'static>(
        log: &Log,
        label: &'static str,
    ) -> impl Fn(&T) -> crate::BoxedScope {
        let log = Rc::clone(log);
        move |value: &T| -> crate::BoxedScope {
            log.borrow_mut().push(format!("enter {label}: {value}"));
            let log = Rc::clone(&log);
            Box::new(on_close(move || log.borrow_mut().push(format!("exit {label}"))))
        }
    }

    fn report_unit(log: &Log, label: &'static str) -> impl Fn(&()) -> crate::BoxedScope {
        let log = Rc::clone(log);
        move |_: &()| -> crate::BoxedScope {
            log.borrow_mut().push(format!("enter {label}"));
            let log = Rc::clone(&log);
            Box::new(on_close(move || log.borrow_mut().push(format!("exit {label}"))))
        }
    }

    #[test]
    fn and_waits_for_both_sides() {
        let log = Log::default();
        let a = Controller::<String>::new();
        let b = Controller::<String>::new();
        a.and(&b).watch(report(&log, "both"));

        a.set("A".to_string());
        assert!(log.borrow().is_empty());

        b.set("B".to_string());
        assert_eq!(*log.borrow(), vec!["enter both: A, B"]);

        a.reset();
        assert_eq!(*log.borrow(), vec!["enter both: A, B", "exit both"]);
    }

    #[test]
    fn and_is_suppressed_when_a_side_resets_first() {
        let log = Log::default();
        let a = Controller::<String>::new();
        let b = Controller::<String>::new();
        a.and(&b).watch(report(&log, "both"));

        a.set("A".to_string());
        a.reset();
        b.set("B".to_string());

        assert!(log.borrow().is_empty());
    }

    #[test]
    fn and_cycles_when_either_side_changes() {
        let log = Log::default();
        let a = Controller::<String>::new();
        let b = Controller::<String>::new();
        a.and(&b).watch(report(&log, "both"));

        a.set("A".to_string());
        b.set("B".to_string());
        a.set("A2".to_string());
        b.set("B2".to_string());

        assert_eq!(
            *log.borrow(),
            vec![
                "enter both: A, B",
                "exit both",
                "enter both: A2, B",
                "exit both",
                "enter both: A2, B2",
            ]
        );
    }

    #[test]
    fn and_enters_immediately_when_both_already_active() {
        let log = Log::default();
        let a = Controller::<i32>::new();
        let b = Controller::<i32>::new();
        a.set(1);
        b.set(2);

        a.and(&b).watch(report(&log, "both"));
        assert_eq!(*log.borrow(), vec!["enter both: 1, 2"]);
    }

    #[test]
    fn and_chains_to_the_left() {
        let a = Controller::<i32>::new();
        let b = Controller::<char>::new();
        let c = Controller::<&'static str>::new();
        let all = a.and(&b).and(&c);

        a.set(1);
        b.set('x');
        c.set("z");

        let value = all.current().unwrap();
        assert_eq!(*value.first().first(), 1);
        assert_eq!(*value.first().second(), 'x');
        assert_eq!(*value.second(), "z");
    }

    #[test]
    fn not_starts_active_for_inactive_source() {
        let log = Log::default();
        let source = Controller::<String>::new();
        source.not().watch(report_unit(&log, "not"));
        assert_eq!(*log.borrow(), vec!["enter not"]);

        source.set("x".to_string());
        assert_eq!(*log.borrow(), vec!["enter not", "exit not"]);

        source.reset();
        assert_eq!(*log.borrow(), vec!["enter not", "exit not", "enter not"]);
    }

    #[test]
    fn not_starts_inactive_for_active_source() {
        let log = Log::default();
        let source = Controller::<i32>::new();
        source.set(1);

        let inverted = !&*source;
        inverted.watch(report_unit(&log, "not"));
        assert!(log.borrow().is_empty());

        // Replacing the value passes through a reset, which the inversion
        // observes as a brief activation.
        source.set(2);
        assert_eq!(*log.borrow(), vec!["enter not", "exit not"]);

        source.reset();
        assert_eq!(*log.borrow(), vec!["enter not", "exit not", "enter not"]);
    }

    #[test]
    fn double_negation_tracks_source_activity() {
        let source = Controller::<i32>::new();
        let twice = source.not().not();

        assert!(!twice.is_active());
        source.set(1);
        assert!(twice.is_active());
        source.reset();
        assert!(!twice.is_active());
    }

    #[test]
    fn transform_maps_values_with_same_timing() {
        let log = Log::default();
        let source = Controller::<i32>::new();
        source
            .transform(|value: &i32| value * 10)
            .watch(report(&log, "x10"));

        source.set(1);
        source.set(2);
        source.reset();

        assert_eq!(
            *log.borrow(),
            vec!["enter x10: 10", "exit x10", "enter x10: 20", "exit x10"]
        );
    }

    #[test]
    fn filter_passes_matching_values_only() {
        let log = Log::default();
        let source = Controller::<i32>::new();
        source
            .filter(|value: &i32| value % 2 == 0)
            .watch(report(&log, "even"));

        source.set(1);
        source.set(2);
        source.set(3);
        source.set(4);
        source.reset();

        assert_eq!(
            *log.borrow(),
            vec!["enter even: 2", "exit even", "enter even: 4", "exit even"]
        );
    }
}
