use std::rc::Rc;
use std::cell::RefCell;

use crate::frp::event_stream::EventStream;
use crate::runtime::Runtime;


///////////////////////////////////////////////////////////////////////////////////////////////////
// BEHAVIOR
///////////////////////////////////////////////////////////////////////////////////////////////////

/// A value changing over time, always defined.
///
/// Cloning a `Behavior` creates a new handle to the same value.
pub struct Behavior<V> {
  value  : Rc<RefCell<V>>,
  changes: EventStream<V>
}


impl<V> Clone for Behavior<V> {
  fn clone(&self) -> Self {
    Behavior { value: self.value.clone(), changes: self.changes.clone() }
  }
}


impl<V> Behavior<V>
where
  V: Clone + 'static
{
  /// Creates a behavior updated by every event of `source`, holding `initial` until then.
  pub(crate) fn hold(source: &EventStream<V>, initial: V) -> Self {
    let value   = Rc::new(RefCell::new(initial));
    let changes = EventStream::with_rank(source.rank() + 1);

    let cell   = value.clone();
    let target = changes.clone();
    source.attach(changes.rank(), move |r: &mut Runtime, v: V| {
      *cell.borrow_mut() = v.clone();
      target.fire(r, v);
    });

    Behavior { value, changes }
  }

  /// Returns the current value.
  pub fn value_now(&self) -> V {
    self.value.borrow().clone()
  }

  /// Returns the stream of every new value of the behavior.
  pub fn changes(&self) -> EventStream<V> {
    self.changes.clone()
  }
}


///////////////////////////////////////////////////////////////////////////////////////////////////
// LIFT
///////////////////////////////////////////////////////////////////////////////////////////////////

/// Returns a behavior equal to `function(a, b)` at all times.
///
/// The result is time-synchronized: it is recomputed once per instant in which `a` or `b`
/// changed, after both settled, so it never observes one input updated and the other stale.
pub fn lift2<A, B, O, F>(function: F, a: &Behavior<A>, b: &Behavior<B>) -> Behavior<O>
where
  A: Clone + 'static,
  B: Clone + 'static,
  O: Clone + 'static,
  F: Fn(&A, &B) -> O + 'static
{
  let a_value = a.value.clone();
  let b_value = b.value.clone();
  let compute = move || function(&*a_value.borrow(), &*b_value.borrow());

  let value   = Rc::new(RefCell::new(compute()));
  let changes = EventStream::with_rank(a.changes.rank().max(b.changes.rank()) + 1);
  let rank    = changes.rank();

  let cell   = value.clone();
  let target = changes.clone();
  let recompute = Rc::new(move |r: &mut Runtime| {
    if !r.claim(target.id()) {
      return;
    }

    let v = compute();
    *cell.borrow_mut() = v.clone();
    target.fire(r, v);
  });

  let recompute_a = recompute.clone();
  a.changes.attach(rank, move |r: &mut Runtime, _: A| recompute_a(r));
  b.changes.attach(rank, move |r: &mut Runtime, _: B| recompute(r));

  Behavior { value, changes }
}


///////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
///////////////////////////////////////////////////////////////////////////////////////////////////
