use std::rc::Rc;
use std::cell::{Cell, RefCell};

use crate::rx::observer::Observer;
use crate::rx::subscription::Subscription;


type SubscribeFn<V> = Rc<dyn Fn(Observer<V>) -> Subscription>;


///////////////////////////////////////////////////////////////////////////////////////////////////
// OBSERVABLE
///////////////////////////////////////////////////////////////////////////////////////////////////

/// A cold, push-based sequence of values.
///
/// An observable does nothing by itself: each `subscribe` wires a new chain up to the source,
/// and values flow through it synchronously when the source emits.
pub struct Observable<V> {
  subscribe_fn: SubscribeFn<V>
}


impl<V> Clone for Observable<V> {
  fn clone(&self) -> Self {
    Observable { subscribe_fn: self.subscribe_fn.clone() }
  }
}


impl<V> Observable<V>
where
  V: Clone + 'static
{
  /// Creates an observable from its subscribe function.
  pub fn create<F>(subscribe: F) -> Self
  where
    F: Fn(Observer<V>) -> Subscription + 'static
  {
    Observable { subscribe_fn: Rc::new(subscribe) }
  }

  pub fn subscribe(&self, observer: Observer<V>) -> Subscription {
    (self.subscribe_fn)(observer)
  }

  /// Subscribes a callback to values only.
  ///
  /// The callback may push back into the source it observes: the nested value is delivered
  /// before the outer call returns.
  pub fn subscribe_next<F>(&self, next: F) -> Subscription
  where
    F: Fn(V) + 'static
  {
    self.subscribe(Observer::from_next(next))
  }

  /// Returns an observable applying `selector` to every value.
  ///
  /// The selector, and whatever state it closes over, is shared by all subscriptions.
  pub fn map<O, F>(&self, selector: F) -> Observable<O>
  where
    O: Clone + 'static,
    F: Fn(V) -> O + 'static
  {
    let source   = self.clone();
    let selector = Rc::new(selector);

    Observable::create(move |observer: Observer<O>| {
      let selector   = selector.clone();
      let downstream = observer.clone();

      source.subscribe(Observer::new(
        move |v| {
          let mapped = selector(v);
          downstream.next(mapped);
        },
        move || observer.completed()
      ))
    })
  }

  /// Returns an observable keeping only the values satisfying `predicate`.
  pub fn filter<F>(&self, predicate: F) -> Observable<V>
  where
    F: Fn(&V) -> bool + 'static
  {
    let source    = self.clone();
    let predicate = Rc::new(predicate);

    Observable::create(move |observer: Observer<V>| {
      let predicate  = predicate.clone();
      let downstream = observer.clone();

      source.subscribe(Observer::new(
        move |v| {
          if predicate(&v) {
            downstream.next(v);
          }
        },
        move || observer.completed()
      ))
    })
  }

  /// Returns an observable dropping every value equal to the previous one.
  /// Each subscription remembers its own previous value.
  pub fn distinct_until_changed(&self) -> Observable<V>
  where
    V: PartialEq
  {
    let source = self.clone();

    Observable::create(move |observer: Observer<V>| {
      let last: RefCell<Option<V>> = RefCell::new(None);
      let downstream = observer.clone();

      source.subscribe(Observer::new(
        move |v: V| {
          if last.borrow().as_ref() == Some(&v) {
            return;
          }

          *last.borrow_mut() = Some(v.clone());
          downstream.next(v);
        },
        move || observer.completed()
      ))
    })
  }

  /// Returns an observable of `combiner(latest(self), latest(other))`, emitted on every value of
  /// either side once both sides emitted at least once.
  ///
  /// `self` is subscribed before `other`: when both derive from the same source, the order of
  /// the arguments decides which side is seen updated first.
  pub fn combine_latest<B, O, F>(&self, other: &Observable<B>, combiner: F) -> Observable<O>
  where
    B: Clone + 'static,
    O: Clone + 'static,
    F: Fn(&V, &B) -> O + 'static
  {
    let left     = self.clone();
    let right    = other.clone();
    let combiner = Rc::new(combiner);

    Observable::create(move |observer: Observer<O>| {
      let latest = Rc::new(RefCell::new((None::<V>, None::<B>)));
      let done   = Rc::new((Cell::new(false), Cell::new(false)));

      let left_subscription = {
        let (latest, combiner, downstream) = (latest.clone(), combiner.clone(), observer.clone());
        let (done, observer) = (done.clone(), observer.clone());

        left.subscribe(Observer::new(
          move |v: V| {
            let output = {
              let mut latest = latest.borrow_mut();
              latest.0 = Some(v);
              match &*latest {
                (Some(a), Some(b)) => Some(combiner(a, b)),
                _                  => None
              }
            };

            if let Some(output) = output {
              downstream.next(output);
            }
          },
          move || {
            done.0.set(true);
            if done.1.get() {
              observer.completed();
            }
          }
        ))
      };

      let right_subscription = {
        let (latest, combiner, downstream) = (latest.clone(), combiner.clone(), observer.clone());

        right.subscribe(Observer::new(
          move |v: B| {
            let output = {
              let mut latest = latest.borrow_mut();
              latest.1 = Some(v);
              match &*latest {
                (Some(a), Some(b)) => Some(combiner(a, b)),
                _                  => None
              }
            };

            if let Some(output) = output {
              downstream.next(output);
            }
          },
          move || {
            done.1.set(true);
            if done.0.get() {
              observer.completed();
            }
          }
        ))
      };

      left_subscription.merge(right_subscription)
    })
  }
}


///////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
///////////////////////////////////////////////////////////////////////////////////////////////////
