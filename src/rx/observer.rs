use std::rc::Rc;


/// Receiver of the notifications of an observable: values, then possibly completion.
///
/// Cloning an `Observer` creates a new handle to the same callbacks.
pub struct Observer<V> {
  next     : Rc<dyn Fn(V)>,
  completed: Rc<dyn Fn()>
}


impl<V> Clone for Observer<V> {
  fn clone(&self) -> Self {
    Observer { next: self.next.clone(), completed: self.completed.clone() }
  }
}


impl<V: 'static> Observer<V> {
  pub fn new<N, C>(next: N, completed: C) -> Self
  where
    N: Fn(V) + 'static,
    C: Fn() + 'static
  {
    Observer { next: Rc::new(next), completed: Rc::new(completed) }
  }

  /// Creates an observer ignoring completion.
  pub fn from_next<N>(next: N) -> Self
  where
    N: Fn(V) + 'static
  {
    Self::new(next, || {})
  }

  pub fn next(&self, value: V) {
    (self.next)(value);
  }

  pub fn completed(&self) {
    (self.completed)();
  }
}
