//! # ReqRes User Filter Plugin
//!
//! Sample plugin demonstrating the user list observer API.
//! Drops users by e-mail domain and by full name, then caps the list at the
//! caller's `max_users` option.

use reqres_core::User;
use reqres_plugin_api::{
    FnObserver, ObserverSubscription, Plugin, PluginDescriptor, UserListEvent,
    UserListSubscriber,
};
use std::sync::Arc;
use tracing::debug;

/// Priority of the e-mail domain filter.
pub const EMAIL_FILTER_PRIORITY: i32 = 100;
/// Priority of the full-name filter.
pub const NAME_FILTER_PRIORITY: i32 = 50;
/// Priority of the list limit; runs after every filter.
pub const LIMIT_PRIORITY: i32 = -100;

/// Caller option holding the maximum number of users shown.
pub const MAX_USERS_OPTION: &str = "max_users";

/// User filter plugin implementation.
pub struct UserFilterPlugin {
    descriptor: PluginDescriptor,
    blocked_domains: Arc<Vec<String>>,
    blocked_names: Arc<Vec<String>>,
    default_max_users: Option<u64>,
}

impl UserFilterPlugin {
    /// Creates the plugin with the stock block lists.
    pub fn new() -> Self {
        Self::with_rules(
            vec!["@exclude.com".to_string(), "@spam.net".to_string()],
            vec!["Admin".to_string(), "Test User".to_string()],
        )
    }

    /// Creates the plugin with custom block lists.
    pub fn with_rules(blocked_domains: Vec<String>, blocked_names: Vec<String>) -> Self {
        Self {
            descriptor: PluginDescriptor {
                key: "reqres-user-filter-plugin".to_string(),
                name: "User Filter Plugin".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: "Filters listed users by e-mail domain and name, and limits list size"
                    .to_string(),
                author: "ReqRes Users Team".to_string(),
            },
            blocked_domains: Arc::new(blocked_domains),
            blocked_names: Arc::new(blocked_names),
            default_max_users: None,
        }
    }

    /// Sets the limit applied when the caller supplies no `max_users`.
    #[must_use]
    pub fn with_default_max_users(mut self, max_users: Option<u64>) -> Self {
        self.default_max_users = max_users;
        self
    }
}

impl Default for UserFilterPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for UserFilterPlugin {
    fn descriptor(&self) -> &PluginDescriptor {
        &self.descriptor
    }
}

impl UserListSubscriber for UserFilterPlugin {
    fn subscriptions(&self) -> Vec<ObserverSubscription> {
        let domains = Arc::clone(&self.blocked_domains);
        let names = Arc::clone(&self.blocked_names);
        let default_max = self.default_max_users;

        vec![
            ObserverSubscription::new(
                EMAIL_FILTER_PRIORITY,
                Arc::new(FnObserver::new("filter_by_email", move |event: &mut UserListEvent| {
                    filter_by_email(event, &domains);
                    Ok(())
                })),
            ),
            ObserverSubscription::new(
                NAME_FILTER_PRIORITY,
                Arc::new(FnObserver::new("filter_by_name", move |event: &mut UserListEvent| {
                    filter_by_name(event, &names);
                    Ok(())
                })),
            ),
            ObserverSubscription::new(
                LIMIT_PRIORITY,
                Arc::new(FnObserver::new("limit_users", move |event: &mut UserListEvent| {
                    limit_users(event, default_max);
                    Ok(())
                })),
            ),
        ]
    }
}

/// Drops users whose e-mail ends with a blocked domain.
pub fn filter_by_email(event: &mut UserListEvent, blocked_domains: &[String]) {
    let before = event.user_count();
    event.filter_users(|user| !has_blocked_domain(user, blocked_domains));
    debug!("filter_by_email removed {} users", before - event.user_count());
}

/// Drops users whose full name is blocked. Matching is exact.
pub fn filter_by_name(event: &mut UserListEvent, blocked_names: &[String]) {
    let before = event.user_count();
    event.filter_users(|user| {
        let full_name = user.full_name();
        !blocked_names.iter().any(|name| *name == full_name)
    });
    debug!("filter_by_name removed {} users", before - event.user_count());
}

/// Truncates the list to the caller's `max_users`, or `default_max`.
///
/// A `max_users` that is not a non-negative integer is ignored.
pub fn limit_users(event: &mut UserListEvent, default_max: Option<u64>) {
    let Some(max) = event.context().option_u64(MAX_USERS_OPTION).or(default_max) else {
        return;
    };
    event.truncate_users(usize::try_from(max).unwrap_or(usize::MAX));
}

fn has_blocked_domain(user: &User, blocked_domains: &[String]) -> bool {
    blocked_domains
        .iter()
        .any(|domain| user.email().ends_with(domain.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqres_plugin_api::{BlockConfig, PipelineContext, UserListObserver};
    use serde_json::json;

    fn users() -> Vec<User> {
        vec![
            User::new(1, "john@example.com", "John", "Doe", "1.jpg"),
            User::new(2, "jane@exclude.com", "Jane", "Smith", "2.jpg"),
            User::new(3, "admin@example.com", "Admin", "", "3.jpg"),
            User::new(4, "test@example.com", "Test", "User", "4.jpg"),
            User::new(5, "spam@spam.net", "Spam", "Bot", "5.jpg"),
        ]
    }

    fn event_with(options: BlockConfig) -> UserListEvent {
        let context = PipelineContext::new(1, 6, 12, 2, 300, options);
        UserListEvent::new(users(), context)
    }

    fn max_users(value: serde_json::Value) -> BlockConfig {
        let mut options = BlockConfig::new();
        options.insert(MAX_USERS_OPTION.to_string(), value);
        options
    }

    fn run_all(plugin: &UserFilterPlugin, event: &mut UserListEvent) {
        let mut subscriptions = plugin.subscriptions();
        subscriptions.sort_by(|a, b| b.priority.cmp(&a.priority));
        for subscription in subscriptions {
            subscription.observer.on_user_list(event).unwrap();
        }
    }

    #[test]
    fn test_descriptor() {
        let plugin = UserFilterPlugin::new();
        assert_eq!(plugin.descriptor().key, "reqres-user-filter-plugin");
    }

    #[test]
    fn test_subscriptions() {
        let plugin = UserFilterPlugin::new();
        let subscriptions: Vec<(i32, String)> = plugin
            .subscriptions()
            .iter()
            .map(|s| (s.priority, s.observer.name().to_string()))
            .collect();
        assert_eq!(
            subscriptions,
            vec![
                (100, "filter_by_email".to_string()),
                (50, "filter_by_name".to_string()),
                (-100, "limit_users".to_string()),
            ]
        );
    }

    #[test]
    fn test_filter_by_email() {
        let mut event = event_with(BlockConfig::new());
        filter_by_email(&mut event, &UserFilterPlugin::new().blocked_domains);
        let ids: Vec<i64> = event.users().iter().map(User::id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn test_filter_by_name_is_exact() {
        let mut event = event_with(BlockConfig::new());
        filter_by_name(&mut event, &["Test User".to_string(), "Jane".to_string()]);
        let ids: Vec<i64> = event.users().iter().map(User::id).collect();
        // "Admin " (with trailing space) and "Jane Smith" are not exact matches.
        assert_eq!(ids, vec![1, 2, 3, 5]);
    }

    #[test]
    fn test_limit_users() {
        let mut event = event_with(max_users(json!(3)));
        limit_users(&mut event, None);
        assert_eq!(event.user_count(), 3);
    }

    #[test]
    fn test_limit_users_without_option() {
        let mut event = event_with(BlockConfig::new());
        limit_users(&mut event, None);
        assert_eq!(event.user_count(), 5);
    }

    #[test]
    fn test_limit_users_higher_than_count() {
        let mut event = event_with(max_users(json!(10)));
        limit_users(&mut event, None);
        assert_eq!(event.user_count(), 5);
    }

    #[test]
    fn test_limit_users_zero() {
        let mut event = event_with(max_users(json!(0)));
        limit_users(&mut event, None);
        assert!(event.is_empty());
    }

    #[test]
    fn test_limit_users_string_and_default() {
        let mut event = event_with(max_users(json!("2")));
        limit_users(&mut event, Some(4));
        assert_eq!(event.user_count(), 2);

        let mut event = event_with(BlockConfig::new());
        limit_users(&mut event, Some(4));
        assert_eq!(event.user_count(), 4);
    }

    #[test]
    fn test_chained_filtering() {
        let plugin = UserFilterPlugin::new();
        let mut event = event_with(max_users(json!(1)));
        run_all(&plugin, &mut event);

        let ids: Vec<i64> = event.users().iter().map(User::id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_chained_filtering_drops_blocked_names() {
        let plugin = UserFilterPlugin::with_rules(vec!["@exclude.com".to_string()], vec!["Test User".to_string()]);
        let mut event = event_with(BlockConfig::new());
        run_all(&plugin, &mut event);

        let ids: Vec<i64> = event.users().iter().map(User::id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }
}
