// File: crates/dashplot-core/tests/events.rs
// Purpose: Subscription lifetime and notification semantics.

use std::cell::Cell;
use std::rc::Rc;

use dashplot_core::{Subscribers, Subscription};

fn counter() -> (Rc<Cell<u32>>, Rc<dyn Fn()>) {
    let hits = Rc::new(Cell::new(0));
    let h = hits.clone();
    (hits, Rc::new(move || h.set(h.get() + 1)))
}

#[test]
fn dropping_subscription_unsubscribes() {
    let subs = Subscribers::new();
    let (hits, cb) = counter();
    let sub = subs.subscribe(cb);
    subs.notify();
    assert_eq!(hits.get(), 1);
    drop(sub);
    assert!(subs.is_empty());
    subs.notify();
    assert_eq!(hits.get(), 1);
}

#[test]
fn explicit_unsubscribe_and_detached_handles() {
    let subs = Subscribers::new();
    let (_, cb) = counter();
    let sub = subs.subscribe(cb);
    assert_eq!(subs.len(), 1);
    sub.unsubscribe();
    assert_eq!(subs.len(), 0);
    drop(Subscription::detached());
}

#[test]
fn subscription_outliving_the_list_is_harmless() {
    let subs = Subscribers::new();
    let (_, cb) = counter();
    let sub = subs.subscribe(cb);
    drop(subs);
    drop(sub);
}

#[test]
fn callbacks_may_subscribe_during_notify() {
    let subs = Subscribers::new();
    let late: Rc<Cell<Option<Subscription>>> = Rc::new(Cell::new(None));
    let (late_hits, late_cb) = counter();
    let _first = {
        let subs2 = subs.clone();
        let late = late.clone();
        subs.subscribe(Rc::new(move || {
            if let Some(old) = late.replace(Some(subs2.subscribe(late_cb.clone()))) {
                drop(old);
            }
        }))
    };
    subs.notify();
    // Added during the first notify; only runs from the next one.
    assert_eq!(late_hits.get(), 0);
    subs.notify();
    assert_eq!(late_hits.get(), 1);
}
