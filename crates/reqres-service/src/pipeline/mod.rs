//! Priority-ordered observer pipeline over a page of users.

use reqres_core::{Page, ReqResError, ReqResResult, User};
use reqres_plugin_api::{
    FnObserver, ObserverResult, PipelineContext, UserListEvent, UserListObserver,
    UserListSubscriber, USER_LIST_EVENT,
};
use std::sync::Arc;
use tracing::{debug, error};

struct Registration {
    priority: i32,
    observer: Arc<dyn UserListObserver>,
}

/// Ordered set of user list observers.
///
/// Observers are kept sorted by priority (higher first); equal priorities
/// keep registration order. Registration needs `&mut self`, so the pipeline
/// is populated during start-up and then shared behind an `Arc`.
#[derive(Default)]
pub struct FilterPipeline {
    registrations: Vec<Registration>,
}

impl FilterPipeline {
    /// Creates an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a closure as a named observer.
    pub fn register<F>(&mut self, name: impl Into<String>, priority: i32, action: F) -> &mut Self
    where
        F: Fn(&mut UserListEvent) -> ObserverResult + Send + Sync + 'static,
    {
        self.register_observer(priority, Arc::new(FnObserver::new(name, action)))
    }

    /// Registers an observer at the given priority.
    pub fn register_observer(
        &mut self,
        priority: i32,
        observer: Arc<dyn UserListObserver>,
    ) -> &mut Self {
        let index = self
            .registrations
            .partition_point(|registration| registration.priority >= priority);

        debug!(
            "Registering observer '{}' on '{}' with priority {}",
            observer.name(),
            USER_LIST_EVENT,
            priority
        );
        self.registrations
            .insert(index, Registration { priority, observer });
        self
    }

    /// Registers every observer a subscriber contributes, in the order given.
    pub fn subscribe(&mut self, subscriber: &dyn UserListSubscriber) -> &mut Self {
        for subscription in subscriber.subscriptions() {
            self.register_observer(subscription.priority, subscription.observer);
        }
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Observer names in run order.
    #[must_use]
    pub fn observer_names(&self) -> Vec<String> {
        self.registrations
            .iter()
            .map(|registration| registration.observer.name().to_string())
            .collect()
    }

    /// Runs every observer in order over the page's users.
    ///
    /// The returned page carries the input page's pagination numbers and the
    /// final user list. The first observer error stops the run and is
    /// returned as [`ReqResError::Observer`].
    pub fn run(&self, page: Page<User>, context: PipelineContext) -> ReqResResult<Page<User>> {
        if self.registrations.is_empty() {
            return Ok(page);
        }

        let before = page.len();
        let revised: Page<User> = page.with_records(Vec::new());
        let mut event = UserListEvent::new(page.records, context);

        for registration in &self.registrations {
            let name = registration.observer.name();
            registration.observer.on_user_list(&mut event).map_err(|message| {
                error!("Observer '{}' failed: {}", name, message);
                ReqResError::observer(name, message)
            })?;
        }

        let users = event.into_users();
        debug!(
            "Pipeline ran {} observers: {} users in, {} out",
            self.registrations.len(),
            before,
            users.len()
        );

        Ok(revised.with_records(users))
    }
}

impl std::fmt::Debug for FilterPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterPipeline")
            .field("observers", &self.observer_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use reqres_plugin_api::{BlockConfig, ObserverSubscription};
    use serde_json::json;

    fn user(id: i64, email: &str) -> User {
        User::new(id, email, format!("First{id}"), format!("Last{id}"), format!("{id}.jpg"))
    }

    fn context_for(page: &Page<User>, options: BlockConfig) -> PipelineContext {
        PipelineContext::new(page.page, page.per_page, page.total, page.total_pages, 300, options)
    }

    fn recording(log: &Arc<Mutex<Vec<&'static str>>>, name: &'static str)
        -> impl Fn(&mut UserListEvent) -> ObserverResult + Send + Sync + 'static
    {
        let log = Arc::clone(log);
        move |_event: &mut UserListEvent| {
            log.lock().push(name);
            Ok(())
        }
    }

    #[test]
    fn test_priority_then_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut pipeline = FilterPipeline::new();
        pipeline
            .register("A", 100, recording(&log, "A"))
            .register("B", 50, recording(&log, "B"))
            .register("C", 100, recording(&log, "C"));

        assert_eq!(pipeline.observer_names(), vec!["A", "C", "B"]);

        let page = Page::new(1, 6, 0, 0, vec![]);
        let context = context_for(&page, BlockConfig::new());
        pipeline.run(page, context).unwrap();
        assert_eq!(*log.lock(), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_negative_priorities_run_last() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut pipeline = FilterPipeline::new();
        pipeline
            .register("late", -100, recording(&log, "late"))
            .register("default", 0, recording(&log, "default"))
            .register("early", 10, recording(&log, "early"));

        assert_eq!(pipeline.observer_names(), vec!["early", "default", "late"]);
    }

    #[test]
    fn test_blocked_suffix_then_limit() {
        let mut pipeline = FilterPipeline::new();
        pipeline
            .register("filter_blocked", 100, |event: &mut UserListEvent| {
                event.filter_users(|u| !u.email().ends_with("@exclude.com"));
                Ok(())
            })
            .register("limit", -100, |event: &mut UserListEvent| {
                if let Some(max) = event.context().option_u64("max_users") {
                    event.truncate_users(usize::try_from(max).unwrap_or(usize::MAX));
                }
                Ok(())
            });

        let page = Page::new(
            1,
            6,
            12,
            2,
            vec![
                user(1, "a@reqres.in"),
                user(2, "b@exclude.com"),
                user(3, "c@reqres.in"),
                user(4, "d@exclude.com"),
                user(5, "e@reqres.in"),
            ],
        );
        let mut options = BlockConfig::new();
        options.insert("max_users".to_string(), json!(2));
        let context = context_for(&page, options);

        let result = pipeline.run(page, context).unwrap();
        assert_eq!(result.len(), 2);
        assert!(result.records.iter().all(|u| !u.email().ends_with("@exclude.com")));
        let ids: Vec<i64> = result.records.iter().map(User::id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_mutations_are_visible_to_later_observers() {
        let seen = Arc::new(Mutex::new(0usize));
        let seen_by_second = Arc::clone(&seen);

        let mut pipeline = FilterPipeline::new();
        pipeline
            .register("append", 10, |event: &mut UserListEvent| {
                event.add_user(user(99, "extra@reqres.in"));
                Ok(())
            })
            .register("count", 0, move |event: &mut UserListEvent| {
                *seen_by_second.lock() = event.user_count();
                Ok(())
            });

        let page = Page::new(1, 6, 1, 1, vec![user(1, "a@reqres.in")]);
        let context = context_for(&page, BlockConfig::new());
        let result = pipeline.run(page, context).unwrap();

        assert_eq!(*seen.lock(), 2);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_totals_are_unchanged() {
        let mut pipeline = FilterPipeline::new();
        pipeline
            .register("replace", 0, |event: &mut UserListEvent| {
                event.set_users(vec![user(7, "seven@reqres.in")]);
                Ok(())
            })
            .register("remove", -1, |event: &mut UserListEvent| {
                event.remove_user_by_id(7);
                Ok(())
            });

        let page = Page::new(2, 3, 9, 3, vec![user(4, "d@reqres.in"), user(5, "e@reqres.in")]);
        let context = context_for(&page, BlockConfig::new());
        let result = pipeline.run(page, context).unwrap();

        assert!(result.is_empty());
        assert_eq!((result.page, result.per_page, result.total, result.total_pages), (2, 3, 9, 3));
    }

    #[test]
    fn test_observer_error_propagates_and_stops() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut pipeline = FilterPipeline::new();
        pipeline
            .register("broken", 10, |_: &mut UserListEvent| Err("boom".to_string()))
            .register("after", 0, recording(&log, "after"));

        let page = Page::new(1, 6, 0, 0, vec![]);
        let context = context_for(&page, BlockConfig::new());
        let err = pipeline.run(page, context).unwrap_err();

        match err {
            ReqResError::Observer { observer, message } => {
                assert_eq!(observer, "broken");
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_empty_pipeline_returns_page_unchanged() {
        let pipeline = FilterPipeline::new();
        assert!(pipeline.is_empty());

        let page = Page::new(1, 6, 12, 2, vec![user(1, "a@reqres.in")]);
        let context = context_for(&page, BlockConfig::new());
        assert_eq!(pipeline.run(page.clone(), context).unwrap(), page);
    }

    struct TwoStep;

    impl UserListSubscriber for TwoStep {
        fn subscriptions(&self) -> Vec<ObserverSubscription> {
            vec![
                ObserverSubscription::new(
                    5,
                    Arc::new(FnObserver::new("second", |_: &mut UserListEvent| Ok(()))),
                ),
                ObserverSubscription::new(
                    20,
                    Arc::new(FnObserver::new("first", |_: &mut UserListEvent| Ok(()))),
                ),
            ]
        }
    }

    #[test]
    fn test_subscribe_registers_all() {
        let mut pipeline = FilterPipeline::new();
        pipeline.register("middle", 10, |_: &mut UserListEvent| Ok(()));
        pipeline.subscribe(&TwoStep);

        assert_eq!(pipeline.len(), 3);
        assert_eq!(pipeline.observer_names(), vec!["first", "middle", "second"]);
    }
}
