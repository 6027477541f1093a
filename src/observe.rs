//! Telling interested parties that something is about to change.

use std::fmt;

use crate::instant::Instant;
use crate::interval::ClosedInterval;


/// A notice that one of a `DayAndTime`’s fields is about to change. It is
/// sent *before* the new value is stored, so `from` is still the current
/// value when handlers see it.
#[derive(PartialEq, Debug, Copy, Clone)]
pub enum WillChange {
    Time { from: Instant, to: Instant },
    Term { from: ClosedInterval<Instant>, to: ClosedInterval<Instant> },
    ShowingTime { from: bool, to: bool },
}


/// A handle for a registered handler, used to remove it again.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub struct Subscription(u64);


/// A list of handlers, each of which gets called synchronously, in the
/// order they subscribed, for every event that’s sent.
pub struct Publisher<E> {
    next_id: u64,
    handlers: Vec<(Subscription, Box<dyn FnMut(&E)>)>,
}

impl<E> Publisher<E> {

    /// Creates a publisher with nobody listening.
    pub fn new() -> Self {
        Self { next_id: 0, handlers: Vec::new() }
    }

    /// Registers a handler to be called with every event from now on.
    pub fn subscribe<F>(&mut self, handler: F) -> Subscription
    where F: FnMut(&E) + 'static
    {
        let subscription = Subscription(self.next_id);
        self.next_id += 1;
        self.handlers.push((subscription, Box::new(handler)));
        subscription
    }

    /// Removes a handler, returning whether it was still registered.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(s, _)| *s != subscription);
        self.handlers.len() != before
    }

    /// Calls every handler with the given event.
    pub fn send(&mut self, event: &E) {
        for (_, handler) in &mut self.handlers {
            handler(event);
        }
    }

    /// The number of handlers currently registered.
    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }
}

impl<E> Default for Publisher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Publisher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Publisher({} subscribers)", self.subscriber_count())
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn handlers_called_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut publisher = Publisher::new();

        let first = Rc::clone(&seen);
        let _ = publisher.subscribe(move |n: &i32| first.borrow_mut().push(("first", *n)));
        let second = Rc::clone(&seen);
        let _ = publisher.subscribe(move |n: &i32| second.borrow_mut().push(("second", *n)));

        publisher.send(&7);
        assert_eq!(*seen.borrow(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn unsubscribing() {
        let count = Rc::new(RefCell::new(0));
        let mut publisher = Publisher::new();

        let counter = Rc::clone(&count);
        let subscription = publisher.subscribe(move |_: &()| *counter.borrow_mut() += 1);
        publisher.send(&());
        assert!(publisher.unsubscribe(subscription));
        assert!(!publisher.unsubscribe(subscription));
        publisher.send(&());

        assert_eq!(*count.borrow(), 1);
        assert_eq!(publisher.subscriber_count(), 0);
        assert_eq!(format!("{:?}", publisher), "Publisher(0 subscribers)");
    }
}
