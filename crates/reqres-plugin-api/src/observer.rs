//! Observer traits and registrations.

use crate::UserListEvent;
use std::sync::Arc;

/// Outcome of an observer run. An `Err` aborts the listing request.
pub type ObserverResult = Result<(), String>;

/// An observer of the user list extension point.
pub trait UserListObserver: Send + Sync {
    /// Name used in logs and error reports.
    fn name(&self) -> &str;

    /// Inspects and optionally mutates the user list.
    fn on_user_list(&self, event: &mut UserListEvent) -> ObserverResult;
}

/// Adapts a closure into a named observer.
pub struct FnObserver<F> {
    name: String,
    action: F,
}

impl<F> FnObserver<F>
where
    F: Fn(&mut UserListEvent) -> ObserverResult + Send + Sync,
{
    /// Creates a named observer from a closure.
    pub fn new(name: impl Into<String>, action: F) -> Self {
        Self {
            name: name.into(),
            action,
        }
    }
}

impl<F> UserListObserver for FnObserver<F>
where
    F: Fn(&mut UserListEvent) -> ObserverResult + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn on_user_list(&self, event: &mut UserListEvent) -> ObserverResult {
        (self.action)(event)
    }
}

impl<F> std::fmt::Debug for FnObserver<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnObserver").field("name", &self.name).finish()
    }
}

/// One prioritised observer contributed by a subscriber.
#[derive(Clone)]
pub struct ObserverSubscription {
    /// Higher values run earlier.
    pub priority: i32,
    pub observer: Arc<dyn UserListObserver>,
}

impl ObserverSubscription {
    /// Creates a subscription.
    pub fn new(priority: i32, observer: Arc<dyn UserListObserver>) -> Self {
        Self { priority, observer }
    }
}

impl std::fmt::Debug for ObserverSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverSubscription")
            .field("priority", &self.priority)
            .field("observer", &self.observer.name())
            .finish()
    }
}

/// A component contributing several prioritised observers at once.
///
/// Subscriptions are registered in the order they are returned, which
/// decides the run order among equal priorities.
pub trait UserListSubscriber: Send + Sync {
    fn subscriptions(&self) -> Vec<ObserverSubscription>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BlockConfig, PipelineContext};
    use reqres_core::User;

    #[test]
    fn test_fn_observer_runs_closure() {
        let observer = FnObserver::new("drop_first", |event: &mut UserListEvent| {
            event.remove_user_by_id(1);
            Ok(())
        });
        assert_eq!(observer.name(), "drop_first");

        let context = PipelineContext::new(1, 6, 2, 1, 0, BlockConfig::new());
        let mut event = UserListEvent::new(
            vec![
                User::new(1, "a@reqres.in", "A", "A", "a.jpg"),
                User::new(2, "b@reqres.in", "B", "B", "b.jpg"),
            ],
            context,
        );
        observer.on_user_list(&mut event).unwrap();
        assert_eq!(event.user_count(), 1);
    }

    #[test]
    fn test_subscription_debug_shows_name() {
        let observer: Arc<dyn UserListObserver> =
            Arc::new(FnObserver::new("noop", |_: &mut UserListEvent| Ok(())));
        let sub = ObserverSubscription::new(10, observer);
        let text = format!("{:?}", sub);
        assert!(text.contains("noop"));
        assert!(text.contains("10"));
    }
}
