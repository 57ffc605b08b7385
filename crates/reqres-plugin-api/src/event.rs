//! The mutable view of the user list handed to observers.

use crate::PipelineContext;
use reqres_core::User;

/// Name of the extension point fired before a user list is finalized.
pub const USER_LIST_EVENT: &str = "reqres.users.pre_render";

/// Event dispatched while a user list is being prepared.
///
/// Observers may filter, add, remove, or replace users. Changes made by one
/// observer are visible to the next. The context is read-only.
#[derive(Debug, Clone)]
pub struct UserListEvent {
    users: Vec<User>,
    context: PipelineContext,
}

impl UserListEvent {
    /// Creates a new event.
    #[must_use]
    pub fn new(users: Vec<User>, context: PipelineContext) -> Self {
        Self { users, context }
    }

    /// The current list of users.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Replaces the whole list.
    pub fn set_users(&mut self, users: Vec<User>) {
        self.users = users;
    }

    /// Appends a user.
    pub fn add_user(&mut self, user: User) {
        self.users.push(user);
    }

    /// Removes every user with the given id.
    pub fn remove_user_by_id(&mut self, id: i64) {
        self.users.retain(|user| user.id() != id);
    }

    /// Keeps only the users for which `keep` returns true, preserving order.
    pub fn filter_users<F>(&mut self, keep: F)
    where
        F: FnMut(&User) -> bool,
    {
        let mut keep = keep;
        self.users.retain(|user| keep(user));
    }

    /// Keeps at most `max` users from the front of the list.
    pub fn truncate_users(&mut self, max: usize) {
        self.users.truncate(max);
    }

    /// The read-only pipeline context.
    #[must_use]
    pub fn context(&self) -> &PipelineContext {
        &self.context
    }

    /// Number of users currently in the list.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Consumes the event and returns the final list.
    #[must_use]
    pub fn into_users(self) -> Vec<User> {
        self.users
    }
}
