use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use tracing::trace;

use crate::continuations::Continuation;


/// Identifier of a node of the propagation graph.
pub type NodeId = u64;


///////////////////////////////////////////////////////////////////////////////////////////////////
// SCHEDULE
///////////////////////////////////////////////////////////////////////////////////////////////////

/// When a task runs: at some rank, some instants from now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Schedule {
  pub rank : usize,
  pub delay: u32
}

impl Schedule {
  /// At `rank` in the current instant.
  pub fn at(rank: usize) -> Self {
    Schedule { rank, delay: 0 }
  }

  /// Same rank, one instant later.
  pub fn later(self) -> Self {
    Schedule { rank: self.rank, delay: self.delay + 1 }
  }
}


///////////////////////////////////////////////////////////////////////////////////////////////////
// TASK
///////////////////////////////////////////////////////////////////////////////////////////////////

/// A continuation waiting in the current instant, ordered by rank then by arrival.
struct Task {
  rank        : usize,
  seq         : u64,
  continuation: Box<dyn Continuation<()>>
}

impl PartialEq for Task {
  fn eq(&self, other: &Self) -> bool {
    self.rank == other.rank && self.seq == other.seq
  }
}

impl Eq for Task {}

impl PartialOrd for Task {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

// `BinaryHeap` is a max-heap: lowest (rank, seq) must compare as greatest.
impl Ord for Task {
  fn cmp(&self, other: &Self) -> Ordering {
    (other.rank, other.seq).cmp(&(self.rank, self.seq))
  }
}


///////////////////////////////////////////////////////////////////////////////////////////////////
// RUNTIME
///////////////////////////////////////////////////////////////////////////////////////////////////

/// Runtime propagating updates through a reactive graph, one instant at a time.
///
/// Within an instant, tasks run by increasing rank. Since a derived node always has a greater rank
/// than all of its inputs, it only runs once every input has settled for the instant.
pub struct Runtime {
  // Pools of continuations to execute at different points in time
  current_instant_tasks: BinaryHeap<Task>,
  next_instant_tasks   : Vec<(Schedule, Box<dyn Continuation<()>>)>,

  // Time-synchronized nodes which already ran during the current instant
  synced_nodes: HashSet<NodeId>,

  next_seq: u64,
  instants: u64
}


impl Default for Runtime {
  fn default() -> Self {
    Self::new()
  }
}


impl Runtime {
  /// Creates a new `Runtime`.
  pub fn new() -> Self {
    Self {
      current_instant_tasks: BinaryHeap::new(),
      next_instant_tasks   : Vec::new(),
      synced_nodes         : HashSet::new(),
      next_seq             : 0,
      instants             : 0
    }
  }

  /// Executes instants until all work is completed.
  pub fn execute(&mut self) {
    let mut remaining_work = true;

    while remaining_work {
      remaining_work = self.instant();
    }
  }

  /// Executes a single instant to completion. Indicates if more work remains to be done.
  pub fn instant(&mut self) -> bool {
    trace!(
      instant = self.instants,
      current = self.current_instant_tasks.len(),
      next    = self.next_instant_tasks.len(),
      "running instant"
    );

    while self.current_instant() {}

    self.move_to_next_instant()
  }

  /// Number of instants completed so far.
  pub fn instants(&self) -> u64 {
    self.instants
  }

  /// Prepares the runtime for the next instant.
  /// Returns whether there are next instant tasks to run or not.
  fn move_to_next_instant(&mut self) -> bool {
    self.instants += 1;
    self.synced_nodes.clear();

    let next_tasks: Vec<_> = self.next_instant_tasks.drain(..).collect();
    for (when, continuation) in next_tasks {
      self.schedule(when, continuation);
    }

    !self.current_instant_tasks.is_empty()
  }

  /// Executes the lowest ranked task of the current instant.
  fn current_instant(&mut self) -> bool {
    let task = match self.current_instant_tasks.pop() {
      Some(task) => task,
      None       => return false
    };

    trace!(rank = task.rank, seq = task.seq, "running task");
    task.continuation.call_box(self, ());

    !self.current_instant_tasks.is_empty()
  }

  /// Registers a continuation to execute as described by `when`.
  ///
  /// Delayed tasks wait in the next instant pool, and keep their rank once their instant comes.
  pub fn schedule(&mut self, when: Schedule, c: Box<dyn Continuation<()>>) {
    if when.delay > 0 {
      let when = Schedule { rank: when.rank, delay: when.delay - 1 };
      self.next_instant_tasks.push((when, c));
      return;
    }

    let seq = self.next_seq;
    self.next_seq += 1;

    self.current_instant_tasks.push(Task { rank: when.rank, seq, continuation: c });
  }

  /// Registers a continuation to execute on the current instant, before any ranked node.
  pub fn on_current_instant(&mut self, c: Box<dyn Continuation<()>>) {
    self.schedule(Schedule::at(0), c);
  }

  /// Registers a continuation to execute at the next instant, before any ranked node.
  pub fn on_next_instant(&mut self, c: Box<dyn Continuation<()>>) {
    self.schedule(Schedule::at(0).later(), c);
  }

  /// Marks a time-synchronized node as updated for the current instant.
  /// Returns `false` if it already was.
  pub fn claim(&mut self, node: NodeId) -> bool {
    self.synced_nodes.insert(node)
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


  #[test]
  fn wait_two_instants() {
    let mut runtime = Runtime::new();

    let flag_ref      = Rc::new(RefCell::new(0));
    let flag_ref_copy = flag_ref.clone();

    runtime.on_current_instant(Box::new(move |r: &mut Runtime, ()| {
      r.on_next_instant(Box::new(move |r: &mut Runtime, ()| {
        r.on_next_instant(Box::new(move |_r: &mut Runtime, ()| {
          *flag_ref_copy.borrow_mut() = 42;
        }));
      }));
    }));

    let mut work_remains = runtime.instant();
    assert_eq!(*flag_ref.borrow(), 0);
    assert!(work_remains);

    work_remains = runtime.instant();
    assert_eq!(*flag_ref.borrow(), 0);
    assert!(work_remains);

    work_remains = runtime.instant();
    assert_eq!(*flag_ref.borrow(), 42);
    assert!(!work_remains);

    // There should not be any task left
    work_remains = runtime.instant();
    assert!(!work_remains);
    assert_eq!(runtime.instants(), 4);
  }

  #[test]
  fn tasks_run_by_rank_then_arrival() {
    let mut runtime = Runtime::new();
    let order = Rc::new(RefCell::new(Vec::new()));

    for (rank, label) in [(2, "c"), (0, "a"), (1, "b1"), (1, "b2")] {
      let order = order.clone();
      runtime.schedule(Schedule::at(rank), Box::new(move |_r: &mut Runtime, ()| {
        order.borrow_mut().push(label);
      }));
    }
    runtime.execute();

    assert_eq!(*order.borrow(), vec!["a", "b1", "b2", "c"]);
  }

  #[test]
  fn lower_rank_scheduled_late_still_runs_first() {
    let mut runtime = Runtime::new();
    let order = Rc::new(RefCell::new(Vec::new()));
    let order_1 = order.clone();
    let order_2 = order.clone();

    runtime.schedule(Schedule::at(5), Box::new(move |_r: &mut Runtime, ()| {
      order_1.borrow_mut().push(5);
    }));
    runtime.on_current_instant(Box::new(move |r: &mut Runtime, ()| {
      r.schedule(Schedule::at(3), Box::new(move |_r: &mut Runtime, ()| {
        order_2.borrow_mut().push(3);
      }));
    }));
    runtime.execute();

    assert_eq!(*order.borrow(), vec![3, 5]);
  }

  #[test]
  fn delayed_tasks_keep_their_rank() {
    let mut runtime = Runtime::new();
    let order = Rc::new(RefCell::new(Vec::new()));

    for (when, label) in [
      (Schedule::at(4).later(),         "late 4"),
      (Schedule::at(1).later(),         "late 1"),
      (Schedule::at(0).later().later(), "later 0"),
      (Schedule::at(2),                 "now 2")
    ] {
      let order = order.clone();
      runtime.schedule(when, Box::new(move |r: &mut Runtime, ()| {
        order.borrow_mut().push((r.instants(), label));
      }));
    }
    runtime.execute();

    assert_eq!(*order.borrow(), vec![(0, "now 2"), (1, "late 1"), (1, "late 4"), (2, "later 0")]);
    assert_eq!(runtime.instants(), 3);
  }

  #[test]
  fn claim_once_per_instant() {
    let mut runtime = Runtime::new();

    assert!(runtime.claim(7));
    assert!(!runtime.claim(7));
    assert!(runtime.claim(8));

    runtime.instant();
    assert!(runtime.claim(7));
  }
}
