// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Wishy Functions
//!
//! Store-triggered backend logic for Wishy:
//! - notifying recipients of new contact requests
//! - reconciling contacts when a request is accepted or rejected
//! - flattening wishlist items into a global collection
//! - materializing the wishlists shared with each user
//!
//! Handlers run inside a [`runtime::Runtime`] that records writes made
//! through its store and delivers them to the bound functions.

pub mod config;
pub mod emulator;
pub mod error;
pub mod handlers;
pub mod runtime;
pub mod trigger;

pub use config::{FunctionsConfig, StoreBackend};
pub use error::{FunctionError, FunctionResult};
pub use handlers::{
    recompute_shared_with_me, ContactRequestHandler, ContactStatusHandler, ContactsChanged,
    ItemFlattener, RecomputeOutcome, WishlistSharingChanged,
};
pub use runtime::{DrainReport, Functions, Runtime, RuntimeConfig, TriggeredStore};
pub use trigger::{DocumentChange, Params, PathPattern, TriggerContext, TriggerHandler, TriggerKind};
