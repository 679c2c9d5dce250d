use std::rc::Rc;
use std::cell::RefCell;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::continuations::Continuation;
use crate::frp::behavior::Behavior;
use crate::runtime::{NodeId, Runtime, Schedule};


static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(0);

/// Handler delivering a pulse to a child node.
type Pulse<V> = Rc<dyn Fn(&mut Runtime, V)>;


///////////////////////////////////////////////////////////////////////////////////////////////////
// NODE
///////////////////////////////////////////////////////////////////////////////////////////////////

/// Core of an event stream: its place in the graph, and the nodes it sends to.
struct Node<V> {
  id      : NodeId,
  rank    : usize,
  sends_to: RefCell<Vec<(usize, Pulse<V>)>>
}


///////////////////////////////////////////////////////////////////////////////////////////////////
// EVENT STREAM
///////////////////////////////////////////////////////////////////////////////////////////////////

/// A discrete stream of events, propagated by a `Runtime`.
///
/// Cloning an `EventStream` creates a new handle to the same node.
pub struct EventStream<V> {
  node: Rc<Node<V>>
}


impl<V> Clone for EventStream<V> {
  fn clone(&self) -> Self {
    EventStream { node: self.node.clone() }
  }
}


/// Creates a source stream, meant to receive values from outside the graph.
pub fn receiver<V: Clone + 'static>() -> EventStream<V> {
  EventStream::with_rank(0)
}


impl<V> EventStream<V>
where
  V: Clone + 'static
{
  pub(crate) fn with_rank(rank: usize) -> Self {
    let node = Node {
      id      : NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed),
      rank,
      sends_to: RefCell::new(Vec::new())
    };

    EventStream { node: Rc::new(node) }
  }

  pub fn id(&self) -> NodeId {
    self.node.id
  }

  /// Topological height of the stream: greater than the rank of any of its inputs.
  pub fn rank(&self) -> usize {
    self.node.rank
  }

  /// Registers a handler run at `rank` each time the stream fires.
  pub(crate) fn attach<F>(&self, rank: usize, pulse: F)
  where
    F: Fn(&mut Runtime, V) + 'static
  {
    debug_assert!(rank > self.rank());

    let pulse: Pulse<V> = Rc::new(pulse);
    self.node.sends_to.borrow_mut().push((rank, pulse));
  }

  /// Schedules the delivery of `value` to every dependent node, each at its own rank.
  pub(crate) fn fire(&self, runtime: &mut Runtime, value: V) {
    let targets = self.node.sends_to.borrow().clone();

    for (rank, pulse) in targets {
      let value = value.clone();
      runtime.schedule(Schedule::at(rank), Box::new(move |r: &mut Runtime, ()| {
        pulse(r, value);
      }));
    }
  }

  /// Returns a continuation firing the stream with the value it receives.
  fn deliver(&self) -> impl Continuation<V> {
    let stream = self.clone();

    move |r: &mut Runtime, value: V| {
      stream.fire(r, value);
    }
  }

  /// Fires the stream with `value`, then runs the runtime until the update fully propagated.
  pub fn send(&self, runtime: &mut Runtime, value: V) {
    debug!(node = self.id(), "send");

    self.deliver().at(self.rank()).call(runtime, value);
    runtime.execute();
  }

  /// Fires the stream with `value` during the next instant. Nothing is propagated until the
  /// runtime executes again, so values sent later may be observed after values sent afterwards.
  pub fn send_later(&self, runtime: &mut Runtime, value: V) {
    debug!(node = self.id(), "send later");

    self.deliver().at(self.rank()).pause().call(runtime, value);
  }

  /// Returns a stream applying `function` to every event.
  pub fn map<O, F>(&self, function: F) -> EventStream<O>
  where
    O: Clone + 'static,
    F: FnMut(V) -> O + 'static
  {
    let output   = EventStream::with_rank(self.rank() + 1);
    let target   = output.clone();
    let function = RefCell::new(function);

    self.attach(output.rank(), move |r: &mut Runtime, value: V| {
      let mapped = (&mut *function.borrow_mut())(value);
      target.fire(r, mapped);
    });

    output
  }

  /// Returns a stream keeping only the events satisfying `predicate`.
  pub fn filter<F>(&self, predicate: F) -> EventStream<V>
  where
    F: FnMut(&V) -> bool + 'static
  {
    let output    = EventStream::with_rank(self.rank() + 1);
    let target    = output.clone();
    let predicate = RefCell::new(predicate);

    self.attach(output.rank(), move |r: &mut Runtime, value: V| {
      if (&mut *predicate.borrow_mut())(&value) {
        target.fire(r, value);
      }
    });

    output
  }

  /// Returns a stream dropping every event equal to the previous one.
  pub fn filter_repeats(&self) -> EventStream<V>
  where
    V: PartialEq
  {
    let mut last: Option<V> = None;

    self.filter(move |value: &V| {
      if last.as_ref() == Some(value) {
        return false;
      }

      last = Some(value.clone());
      true
    })
  }

  /// Calls `callback` for every event. This is where a graph reaches the outside world.
  pub fn subscribe<F>(&self, callback: F)
  where
    F: FnMut(V) + 'static
  {
    let callback = RefCell::new(callback);

    self.attach(self.rank() + 1, move |_r: &mut Runtime, value: V| {
      (&mut *callback.borrow_mut())(value);
    });
  }

  /// Returns a behavior holding the latest event of the stream, `initial` until the first one.
  pub fn starts_with(&self, initial: V) -> Behavior<V> {
    Behavior::hold(self, initial)
  }
}


///////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
///////////////////////////////////////////////////////////////////////////////////////////////////
