// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Wishy Core Library
//!
//! Document model and store abstraction shared by the trigger handlers,
//! plus the pure share-intent extraction used by the mobile shim.

pub mod model;
pub mod share;
pub mod store;

pub use model::{
    Contact, ContactRequest, ContactStatus, GlobalItemProvenance, Notification, NotificationKind,
    NotificationStatus, Party, SharedWithMeEntry, Wishlist,
};
pub use share::{
    ChannelMessage, IntentAction, ShareDispatcher, ShareError, SharedContact, SharedIntent,
    SharedLink, CHANNEL_NAME, METHOD_SHARED_CONTACT, METHOD_SHARED_TEXT,
};
pub use store::{
    check_id, paths, Clock, CollectionPath, DocPath, Document, DocumentStore, Filter, ManualClock,
    MemoryStore, SetMode, Snapshot, SqliteStore, StoreError, StoreResult, SystemClock,
};
