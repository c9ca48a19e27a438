// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Hierarchical document and collection paths.
//!
//! A path is a `/`-separated list of non-empty segments. Collections sit at
//! odd depths (`users`, `users/u1/contacts`), documents at even depths
//! (`users/u1`, `users/u1/contacts/c1`).

use std::fmt;

use super::error::StoreError;

fn split_segments(raw: &str) -> Result<Vec<&str>, StoreError> {
    let trimmed = raw.trim_matches('/');
    if trimmed.is_empty() {
        return Err(StoreError::InvalidPath("empty path".into()));
    }
    let segments: Vec<&str> = trimmed.split('/').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(StoreError::InvalidPath(format!("empty segment in '{}'", raw)));
    }
    Ok(segments)
}

/// Path to a single document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocPath(String);

impl DocPath {
    /// Parses a document path, rejecting collection-depth paths.
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        let segments = split_segments(raw)?;
        if segments.len() % 2 != 0 {
            return Err(StoreError::InvalidPath(format!(
                "'{}' points at a collection, not a document",
                raw
            )));
        }
        Ok(DocPath(segments.join("/")))
    }

    /// The path as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The document id (last segment).
    pub fn id(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// The collection this document lives in.
    pub fn parent(&self) -> CollectionPath {
        let (parent, _) = self.0.rsplit_once('/').unwrap_or(("", &self.0));
        CollectionPath(parent.to_string())
    }

    /// A subcollection under this document.
    pub fn collection(&self, name: &str) -> CollectionPath {
        CollectionPath(format!("{}/{}", self.0, name))
    }

    /// Path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Path to a collection of documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionPath(String);

impl CollectionPath {
    /// Parses a collection path, rejecting document-depth paths.
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        let segments = split_segments(raw)?;
        if segments.len() % 2 != 1 {
            return Err(StoreError::InvalidPath(format!(
                "'{}' points at a document, not a collection",
                raw
            )));
        }
        Ok(CollectionPath(segments.join("/")))
    }

    /// The path as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A document in this collection.
    pub fn doc(&self, id: &str) -> DocPath {
        DocPath(format!("{}/{}", self.0, id))
    }

    /// Returns true if `path` is a direct child of this collection.
    pub fn contains(&self, path: &DocPath) -> bool {
        path.parent() == *self
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Checks that `id` can stand as a single path segment.
///
/// Ids read from document fields must pass this before they are handed to
/// [`paths`]; an id containing `/` would address a different document.
pub fn check_id(id: &str) -> Result<&str, StoreError> {
    if id.is_empty() || id.contains('/') {
        return Err(StoreError::InvalidPath(format!(
            "'{}' is not a valid document id",
            id
        )));
    }
    Ok(id)
}

/// Builders for every path the application reads or writes.
///
/// Builders join their ids verbatim. Path params are single segments by
/// construction; ids taken from document data go through [`check_id`] first.
pub mod paths {
    use super::{CollectionPath, DocPath};

    /// Flat collection holding one flattened copy of every wishlist item.
    pub const GLOBAL_ITEMS: &str = "all_wishes_global";

    pub fn users() -> CollectionPath {
        CollectionPath("users".to_string())
    }

    pub fn user(user_id: &str) -> DocPath {
        users().doc(user_id)
    }

    pub fn contacts(user_id: &str) -> CollectionPath {
        user(user_id).collection("contacts")
    }

    pub fn contact(user_id: &str, contact_id: &str) -> DocPath {
        contacts(user_id).doc(contact_id)
    }

    pub fn contact_requests(user_id: &str) -> CollectionPath {
        user(user_id).collection("contactRequests")
    }

    pub fn contact_request(sender_id: &str, recipient_id: &str) -> DocPath {
        contact_requests(sender_id).doc(recipient_id)
    }

    pub fn notifications(user_id: &str) -> CollectionPath {
        user(user_id).collection("notifications")
    }

    pub fn notification(user_id: &str, notification_id: &str) -> DocPath {
        notifications(user_id).doc(notification_id)
    }

    pub fn wishlists(user_id: &str) -> CollectionPath {
        user(user_id).collection("wishlists")
    }

    pub fn wishlist(user_id: &str, wishlist_id: &str) -> DocPath {
        wishlists(user_id).doc(wishlist_id)
    }

    pub fn wishlist_items(user_id: &str, wishlist_id: &str) -> CollectionPath {
        wishlist(user_id, wishlist_id).collection("items")
    }

    pub fn wishlist_item(user_id: &str, wishlist_id: &str, item_id: &str) -> DocPath {
        wishlist_items(user_id, wishlist_id).doc(item_id)
    }

    pub fn shared_with_me(user_id: &str) -> CollectionPath {
        user(user_id).collection("sharedWithMe")
    }

    pub fn shared_with_me_entry(user_id: &str, wishlist_id: &str) -> DocPath {
        shared_with_me(user_id).doc(wishlist_id)
    }

    pub fn global_items() -> CollectionPath {
        CollectionPath(GLOBAL_ITEMS.to_string())
    }

    pub fn global_item(item_id: &str) -> DocPath {
        global_items().doc(item_id)
    }
}
