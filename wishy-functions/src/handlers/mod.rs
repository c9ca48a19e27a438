// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Trigger Handlers
//!
//! The functions bound to store paths by [`crate::runtime::Functions::standard`].
//! Handlers never call each other; they only react to the writes they see.

pub mod contact_request;
pub mod contact_status;
pub mod item_flattener;
pub mod shared_with_me;

pub use contact_request::ContactRequestHandler;
pub use contact_status::ContactStatusHandler;
pub use item_flattener::ItemFlattener;
pub use shared_with_me::{
    recompute_shared_with_me, ContactsChanged, RecomputeOutcome, WishlistSharingChanged,
};

/// Contact requests, keyed by sender then recipient.
pub const CONTACT_REQUEST_PATTERN: &str = "users/{userId}/contactRequests/{otherId}";

/// Notifications in a user's inbox.
pub const NOTIFICATION_PATTERN: &str = "users/{userId}/notifications/{notificationId}";

/// Items nested under a wishlist.
pub const WISHLIST_ITEM_PATTERN: &str = "users/{userId}/wishlists/{wishlistId}/items/{itemId}";

/// A user's contacts.
pub const CONTACT_PATTERN: &str = "users/{userId}/contacts/{contactId}";

/// A user's wishlists.
pub const WISHLIST_PATTERN: &str = "users/{userId}/wishlists/{wishlistId}";
