use std::rc::Rc;
use std::cell::{Cell, RefCell};

use tracing::debug;

use crate::rx::observable::Observable;
use crate::rx::observer::Observer;
use crate::rx::subscription::Subscription;


struct SubjectInner<V> {
  observers: RefCell<Vec<(u64, Observer<V>)>>,
  next_id  : Cell<u64>,
  completed: Cell<bool>
}


/// A hot source: values pushed with `next` go to every observer subscribed at that moment,
/// synchronously and in subscription order.
///
/// Cloning a `Subject` creates a new handle to the same subject.
pub struct Subject<V> {
  inner: Rc<SubjectInner<V>>
}


impl<V> Clone for Subject<V> {
  fn clone(&self) -> Self {
    Subject { inner: self.inner.clone() }
  }
}


impl<V: Clone + 'static> Default for Subject<V> {
  fn default() -> Self {
    Self::new()
  }
}


impl<V: Clone + 'static> Subject<V> {
  pub fn new() -> Self {
    let inner = SubjectInner {
      observers: RefCell::new(Vec::new()),
      next_id  : Cell::new(0),
      completed: Cell::new(false)
    };

    Subject { inner: Rc::new(inner) }
  }

  /// Pushes `value` to current observers. Does nothing once completed.
  pub fn next(&self, value: V) {
    if self.inner.completed.get() {
      return;
    }

    let observers = self.inner.observers.borrow().clone();
    debug!(observers = observers.len(), "subject next");

    for (_, observer) in observers {
      observer.next(value.clone());
    }
  }

  /// Completes current observers and releases them.
  pub fn complete(&self) {
    if self.inner.completed.replace(true) {
      return;
    }

    let observers: Vec<_> = self.inner.observers.borrow_mut().drain(..).collect();
    for (_, observer) in observers {
      observer.completed();
    }
  }

  pub fn is_completed(&self) -> bool {
    self.inner.completed.get()
  }

  pub fn observer_count(&self) -> usize {
    self.inner.observers.borrow().len()
  }

  /// Adds `observer`. A subject which already completed completes it right away.
  pub fn subscribe(&self, observer: Observer<V>) -> Subscription {
    if self.inner.completed.get() {
      observer.completed();
      return Subscription::empty();
    }

    let id = self.inner.next_id.get();
    self.inner.next_id.set(id + 1);
    self.inner.observers.borrow_mut().push((id, observer));

    let inner = Rc::downgrade(&self.inner);
    Subscription::new(move || {
      if let Some(inner) = inner.upgrade() {
        inner.observers.borrow_mut().retain(|(observer_id, _)| *observer_id != id);
      }
    })
  }

  /// Returns the subject seen as an observable, to chain operators on it.
  pub fn observable(&self) -> Observable<V> {
    let subject = self.clone();

    Observable::create(move |observer: Observer<V>| subject.subscribe(observer))
  }
}


///////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
///////////////////////////////////////////////////////////////////////////////////////////////////
