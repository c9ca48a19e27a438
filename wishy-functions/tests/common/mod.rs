// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Common Test Utilities
//!
//! Runtime fixture over an in-memory store with a manual clock, plus seed
//! helpers that write directly to the inner store so no triggers fire.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Value};
use wishy_core::store::encode;
use wishy_core::{
    paths, Contact, ContactStatus, Document, DocumentStore, ManualClock, MemoryStore, Party,
    SetMode,
};
use wishy_functions::{Functions, Runtime, RuntimeConfig};

/// Clock start used by every fixture.
pub const T0: u64 = 1_700_000_000;

pub struct Harness {
    pub clock: Arc<ManualClock>,
    pub runtime: Runtime<MemoryStore>,
}

/// Runtime with the standard functions.
pub fn harness() -> Harness {
    let functions = Functions::standard().expect("standard functions");
    harness_with(functions, RuntimeConfig::default())
}

pub fn harness_with(functions: Functions, config: RuntimeConfig) -> Harness {
    let clock = Arc::new(ManualClock::new(T0));
    let store = MemoryStore::with_clock(clock.clone());
    Harness {
        clock,
        runtime: Runtime::new(store, functions, config),
    }
}

pub fn doc(value: Value) -> Document {
    value.as_object().cloned().expect("object literal")
}

pub fn party(uid: &str, name: &str) -> Party {
    Party {
        uid: uid.to_string(),
        name: name.to_string(),
        email: format!("{}@example.com", uid),
    }
}

/// Request document as the app writes it.
pub fn request_doc(sender: &Party, receiver: &Party, message: &str) -> Document {
    doc(json!({
        "sender": sender,
        "receiver": receiver,
        "message": message,
    }))
}

/// Writes `users/{owner}/contacts/{contact_id}` without firing triggers.
pub async fn seed_contact(
    store: &dyn DocumentStore,
    owner: &str,
    contact_id: &str,
    name: &str,
    status: ContactStatus,
) {
    let contact = Contact {
        name: name.to_string(),
        email: format!("{}@example.com", contact_id),
        created_at: T0,
        status,
    };
    store
        .set(
            &paths::contact(owner, contact_id),
            encode(&contact).expect("encode contact"),
            SetMode::Overwrite,
        )
        .await
        .expect("seed contact");
}

/// Writes `users/{owner}/wishlists/{id}` without firing triggers.
pub async fn seed_wishlist(
    store: &dyn DocumentStore,
    owner: &str,
    id: &str,
    name: &str,
    shared_with: &[&str],
) {
    store
        .set(
            &paths::wishlist(owner, id),
            wishlist_doc(name, "shared", shared_with),
            SetMode::Overwrite,
        )
        .await
        .expect("seed wishlist");
}

pub fn wishlist_doc(name: &str, privacy: &str, shared_with: &[&str]) -> Document {
    doc(json!({
        "name": name,
        "privacy": privacy,
        "sharedWith": shared_with,
    }))
}

/// Ids of the entries in a user's shared-with-me collection.
pub async fn shared_ids(store: &dyn DocumentStore, user: &str) -> Vec<String> {
    store
        .list(&paths::shared_with_me(user))
        .await
        .expect("list sharedWithMe")
        .iter()
        .map(|s| s.id().to_string())
        .collect()
}
