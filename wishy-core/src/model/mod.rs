// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Document Model
//!
//! Typed views over the documents the handlers read and write. Field names
//! follow the app's camelCase document schema; timestamps are Unix seconds
//! assigned from the store's clock.

mod contact;
mod notification;
mod wishlist;

pub use contact::{Contact, ContactRequest, ContactStatus, Party};
pub use notification::{Notification, NotificationKind, NotificationStatus};
pub use wishlist::{GlobalItemProvenance, SharedWithMeEntry, Wishlist};
