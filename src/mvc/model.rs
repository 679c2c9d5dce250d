use std::rc::Rc;
use std::cell::RefCell;

use tracing::debug;


///////////////////////////////////////////////////////////////////////////////////////////////////
// MODEL VALUE
///////////////////////////////////////////////////////////////////////////////////////////////////

/// A value a `Model` can hold, with the equality deciding whether a `set` is a change.
pub trait ModelValue: Clone + 'static {
  fn same(&self, other: &Self) -> bool;
}

/// NaN is the same as NaN: setting NaN over NaN is not a change.
impl ModelValue for f64 {
  fn same(&self, other: &Self) -> bool {
    self == other || (self.is_nan() && other.is_nan())
  }
}

macro_rules! model_value_by_eq {
  ($($t:ty),*) => {
    $(
      impl ModelValue for $t {
        fn same(&self, other: &Self) -> bool {
          self == other
        }
      }
    )*
  };
}

model_value_by_eq!(bool, i32, i64, u32, u64, String);


///////////////////////////////////////////////////////////////////////////////////////////////////
// MODEL
///////////////////////////////////////////////////////////////////////////////////////////////////

type ChangeHandler<V> = Rc<dyn Fn(&Model<V>)>;

struct ModelInner<V> {
  value   : RefCell<Option<V>>,
  handlers: RefCell<Vec<ChangeHandler<V>>>
}


/// An observable holder of a single value.
///
/// Change handlers run synchronously inside `set`, in registration order, and only when the new
/// value differs from the current one. Handlers may set other models, or this one.
///
/// Cloning a `Model` creates a new handle to the same value.
pub struct Model<V> {
  inner: Rc<ModelInner<V>>
}


impl<V> Clone for Model<V> {
  fn clone(&self) -> Self {
    Model { inner: self.inner.clone() }
  }
}


impl<V> Model<V>
where
  V: ModelValue
{
  /// Creates a model holding `value`.
  pub fn new(value: V) -> Self {
    Self::with_value(Some(value))
  }

  /// Creates a model holding no value yet. Any first `set` is a change.
  pub fn empty() -> Self {
    Self::with_value(None)
  }

  fn with_value(value: Option<V>) -> Self {
    let inner = ModelInner {
      value   : RefCell::new(value),
      handlers: RefCell::new(Vec::new())
    };

    Model { inner: Rc::new(inner) }
  }

  pub fn get(&self) -> Option<V> {
    self.inner.value.borrow().clone()
  }

  /// Stores `value` and notifies change handlers. Returns whether the value changed.
  pub fn set(&self, value: V) -> bool {
    let changed = match &*self.inner.value.borrow() {
      Some(current) => !current.same(&value),
      None          => true
    };

    if !changed {
      return false;
    }

    *self.inner.value.borrow_mut() = Some(value);

    let handlers = self.inner.handlers.borrow().clone();
    debug!(handlers = handlers.len(), "model changed");

    for handler in handlers {
      handler(self);
    }

    true
  }

  /// Registers `handler`, called with the model after each change.
  pub fn on_change<F>(&self, handler: F)
  where
    F: Fn(&Model<V>) + 'static
  {
    let handler: ChangeHandler<V> = Rc::new(handler);
    self.inner.handlers.borrow_mut().push(handler);
  }
}


///////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
///////////////////////////////////////////////////////////////////////////////////////////////////
