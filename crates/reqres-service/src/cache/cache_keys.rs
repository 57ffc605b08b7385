//! Cache key generators for consistent key naming.

use reqres_core::PageRequest;

/// Tag attached to every user list entry; also the key prefix.
pub const USER_LIST_TAG: &str = "reqres_api_users";

/// Prefix for the Redis sets that index keys by tag.
const TAG_PREFIX: &str = "reqres:cache:tag";

/// Generate the cache key for one page of the user list.
///
/// Depends on page number and size only. Caller options that influence the
/// observer pipeline are deliberately not part of the key, so a cached page
/// reflects the options of whichever request stored it until it expires.
#[must_use]
pub fn user_list_page(request: PageRequest) -> String {
    format!(
        "{}:page_{}:per_page_{}",
        USER_LIST_TAG, request.page, request.per_page
    )
}

/// Tags attached to user list entries.
#[must_use]
pub fn user_list_tags() -> Vec<String> {
    vec![USER_LIST_TAG.to_string()]
}

/// Generate the key of the set indexing all keys carrying `tag`.
#[must_use]
pub fn tag_index(tag: &str) -> String {
    format!("{}:{}", TAG_PREFIX, tag)
}
