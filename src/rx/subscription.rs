/// Handle on an active subscription.
///
/// Dropping a `Subscription` does *not* detach the observer: the chain stays alive as long as
/// its source does. Call `unsubscribe` to detach.
#[must_use = "dropping a subscription keeps it active; bind it to detach it later"]
pub struct Subscription {
  teardown: Vec<Box<dyn FnOnce()>>
}


impl Subscription {
  /// Creates a subscription running `teardown` when unsubscribed.
  pub fn new<F>(teardown: F) -> Self
  where
    F: FnOnce() + 'static
  {
    Subscription { teardown: vec![Box::new(teardown)] }
  }

  /// Creates a subscription with nothing to detach.
  pub fn empty() -> Self {
    Subscription { teardown: Vec::new() }
  }

  /// Combines two subscriptions into one detaching both, in order.
  pub fn merge(mut self, mut other: Subscription) -> Subscription {
    self.teardown.append(&mut other.teardown);
    self
  }

  pub fn unsubscribe(self) {
    for teardown in self.teardown {
      teardown();
    }
  }
}
