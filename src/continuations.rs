use crate::runtime::{Runtime, Schedule};


///////////////////////////////////////////////////////////////////////////////////////////////////
// CONTINUATION
///////////////////////////////////////////////////////////////////////////////////////////////////

/// A one-shot piece of propagation work awaiting a value of type `V`.
pub trait Continuation<V>: 'static {
  fn call(self, runtime: &mut Runtime, value: V);

  /// Same as `call`, for boxed continuations.
  fn call_box(self: Box<Self>, runtime: &mut Runtime, value: V);

  /// Creates a continuation that, once called, runs `Self` with the same value at `rank` of the
  /// current instant, after every lower ranked task.
  fn at(self, rank: usize) -> Scheduled<Self>
  where
    Self: Sized
  {
    Scheduled {
      continuation: self,
      when        : Schedule::at(rank)
    }
  }
}


impl<V, F> Continuation<V> for F
where
  F: FnOnce(&mut Runtime, V) + 'static
{
  fn call(self, runtime: &mut Runtime, value: V) {
    self(runtime, value);
  }

  fn call_box(self: Box<Self>, runtime: &mut Runtime, value: V) {
    (*self).call(runtime, value);
  }
}


///////////////////////////////////////////////////////////////////////////////////////////////////
// SCHEDULED
///////////////////////////////////////////////////////////////////////////////////////////////////

/// A continuation whose value is handed to the runtime, to be delivered at a given rank and
/// instant rather than right away.
pub struct Scheduled<C> {
  continuation: C,
  when        : Schedule
}

impl<C> Scheduled<C> {
  /// Postpones delivery by one instant. The rank is kept.
  pub fn pause(self) -> Self {
    Scheduled {
      continuation: self.continuation,
      when        : self.when.later()
    }
  }

  pub fn when(&self) -> Schedule {
    self.when
  }
}

impl<C, V> Continuation<V> for Scheduled<C>
where
  C: Continuation<V>,
  V: 'static
{
  fn call(self, runtime: &mut Runtime, value: V) {
    let continuation = self.continuation;

    runtime.schedule(self.when, Box::new(move |r: &mut Runtime, ()| {
      continuation.call(r, value);
    }));
  }

  fn call_box(self: Box<Self>, runtime: &mut Runtime, value: V) {
    (*self).call(runtime, value);
  }
}


///////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
///////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
  use std::rc::Rc;
  use std::cell::RefCell;

  use super::*;


  fn recorder(seen: &Rc<RefCell<Vec<(u64, i32)>>>) -> impl Continuation<i32> {
    let seen = seen.clone();

    move |r: &mut Runtime, v: i32| seen.borrow_mut().push((r.instants(), v))
  }

  #[test]
  fn value_is_delivered_at_rank() {
    let mut runtime = Runtime::new();
    let seen = Rc::new(RefCell::new(Vec::new()));

    recorder(&seen).at(3).call(&mut runtime, 30);
    recorder(&seen).at(1).call(&mut runtime, 10);
    assert!(seen.borrow().is_empty());

    runtime.execute();
    assert_eq!(*seen.borrow(), vec![(0, 10), (0, 30)]);
  }

  #[test]
  fn pause_waits_one_instant_per_call() {
    let mut runtime = Runtime::new();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let twice = recorder(&seen).at(2).pause().pause();
    assert_eq!(twice.when(), Schedule { rank: 2, delay: 2 });

    twice.call(&mut runtime, 2);
    recorder(&seen).at(5).pause().call(&mut runtime, 1);
    recorder(&seen).at(9).call(&mut runtime, 0);

    assert!(runtime.instant());
    assert_eq!(*seen.borrow(), vec![(0, 0)]);

    runtime.execute();
    assert_eq!(*seen.borrow(), vec![(0, 0), (1, 1), (2, 2)]);
  }
}
