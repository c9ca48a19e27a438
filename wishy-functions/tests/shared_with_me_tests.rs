// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for the shared-with-me view.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use common::{doc, harness, seed_contact, seed_wishlist, shared_ids, wishlist_doc, T0};
use serde_json::json;
use wishy_core::{
    paths, CollectionPath, ContactStatus, DocPath, Document, DocumentStore, Filter, ManualClock,
    MemoryStore, SetMode, SharedWithMeEntry, Snapshot, StoreResult,
};
use wishy_functions::handlers::shared_with_me::{SUMMARY_FIELD, UPDATED_AT_FIELD};
use wishy_functions::recompute_shared_with_me;

/// Store that ignores array-contains filters, returning every candidate.
struct LooseArrayFilters(MemoryStore);

#[async_trait]
impl DocumentStore for LooseArrayFilters {
    async fn get(&self, path: &DocPath) -> StoreResult<Option<Document>> {
        self.0.get(path).await
    }

    async fn set(&self, path: &DocPath, data: Document, mode: SetMode) -> StoreResult<()> {
        self.0.set(path, data, mode).await
    }

    async fn delete(&self, path: &DocPath) -> StoreResult<()> {
        self.0.delete(path).await
    }

    async fn query(
        &self,
        collection: &CollectionPath,
        filters: &[Filter],
    ) -> StoreResult<Vec<Snapshot>> {
        let kept: Vec<Filter> = filters
            .iter()
            .filter(|f| !matches!(f, Filter::ArrayContains(..)))
            .cloned()
            .collect();
        self.0.query(collection, &kept).await
    }

    fn server_time(&self) -> u64 {
        self.0.server_time()
    }
}

#[tokio::test]
async fn test_recompute_includes_shared_wishlists_of_accepted_contacts() {
    let h = harness();
    let store = h.runtime.store().inner();
    seed_contact(store, "bob", "alice", "Alice", ContactStatus::Accepted).await;
    seed_contact(store, "bob", "carol", "Carol", ContactStatus::Pending).await;
    seed_wishlist(store, "alice", "w1", "Birthday", &["bob"]).await;
    seed_wishlist(store, "alice", "w2", "Private", &["dave"]).await;
    seed_wishlist(store, "carol", "w3", "Wedding", &["bob"]).await;

    let outcome = recompute_shared_with_me(store, "bob").await.unwrap();

    assert_eq!(outcome.included.into_iter().collect::<Vec<_>>(), vec!["w1"]);
    assert!(outcome.removed.is_empty());

    let entry: SharedWithMeEntry = wishy_core::store::decode(
        &store
            .get(&paths::shared_with_me_entry("bob", "w1"))
            .await
            .unwrap()
            .unwrap(),
    )
    .unwrap();
    assert_eq!(entry.name, "Birthday");
    assert_eq!(entry.owner_id, "alice");
    assert_eq!(entry.owner_name, "Alice");
    assert_eq!(entry.privacy, "shared");
    assert_eq!(entry.path, "users/alice/wishlists/w1");

    let user = store.get(&paths::user("bob")).await.unwrap().unwrap();
    assert_eq!(user[SUMMARY_FIELD].as_array().unwrap().len(), 1);
    assert_eq!(user[SUMMARY_FIELD][0]["ownerId"], json!("alice"));
    assert_eq!(user[UPDATED_AT_FIELD], json!(T0));
}

#[tokio::test]
async fn test_recompute_is_idempotent() {
    let h = harness();
    let store = h.runtime.store().inner();
    seed_contact(store, "bob", "alice", "Alice", ContactStatus::Accepted).await;
    seed_wishlist(store, "alice", "w1", "Birthday", &["bob"]).await;
    seed_wishlist(store, "alice", "w2", "Holidays", &["bob", "carol"]).await;

    let first = recompute_shared_with_me(store, "bob").await.unwrap();
    let entries_first = store.list(&paths::shared_with_me("bob")).await.unwrap();
    let second = recompute_shared_with_me(store, "bob").await.unwrap();
    let entries_second = store.list(&paths::shared_with_me("bob")).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(entries_first, entries_second);
    assert!(second.removed.is_empty());
}

#[tokio::test]
async fn test_stale_entries_are_pruned() {
    let h = harness();
    let store = h.runtime.store().inner();
    seed_contact(store, "bob", "alice", "Alice", ContactStatus::Accepted).await;
    seed_wishlist(store, "alice", "w1", "Birthday", &["bob"]).await;
    store
        .set(
            &paths::shared_with_me_entry("bob", "gone"),
            doc(json!({"id": "gone", "name": "Old"})),
            SetMode::Overwrite,
        )
        .await
        .unwrap();

    let outcome = recompute_shared_with_me(store, "bob").await.unwrap();

    assert_eq!(outcome.removed.into_iter().collect::<Vec<_>>(), vec!["gone"]);
    assert_eq!(shared_ids(store, "bob").await, vec!["w1"]);
}

#[tokio::test]
async fn test_no_contacts_clears_view() {
    let h = harness();
    let store = h.runtime.store().inner();
    store
        .set(
            &paths::shared_with_me_entry("bob", "w1"),
            doc(json!({"id": "w1"})),
            SetMode::Overwrite,
        )
        .await
        .unwrap();

    let outcome = recompute_shared_with_me(store, "bob").await.unwrap();

    assert!(outcome.included.is_empty());
    assert!(shared_ids(store, "bob").await.is_empty());
    let user = store.get(&paths::user("bob")).await.unwrap().unwrap();
    assert_eq!(user[SUMMARY_FIELD], json!([]));
}

#[tokio::test]
async fn test_entries_from_several_contacts() {
    let h = harness();
    let store = h.runtime.store().inner();
    seed_contact(store, "bob", "alice", "Alice", ContactStatus::Accepted).await;
    seed_contact(store, "bob", "carol", "Carol", ContactStatus::Accepted).await;
    seed_wishlist(store, "alice", "a1", "Alice's list", &["bob"]).await;
    seed_wishlist(store, "carol", "c1", "Carol's list", &["bob"]).await;

    recompute_shared_with_me(store, "bob").await.unwrap();

    assert_eq!(shared_ids(store, "bob").await, vec!["a1", "c1"]);
}

#[tokio::test]
async fn test_wishlist_sharing_change_updates_viewers() {
    let mut h = harness();
    {
        let inner = h.runtime.store().inner();
        seed_contact(inner, "bob", "alice", "Alice", ContactStatus::Accepted).await;
        seed_contact(inner, "carol", "alice", "Alice", ContactStatus::Accepted).await;
    }
    let wishlist = paths::wishlist("alice", "w1");

    h.runtime
        .store()
        .set(&wishlist, wishlist_doc("Birthday", "shared", &["bob"]), SetMode::Overwrite)
        .await
        .unwrap();
    h.runtime.drain().await;
    assert_eq!(shared_ids(h.runtime.store(), "bob").await, vec!["w1"]);
    assert!(shared_ids(h.runtime.store(), "carol").await.is_empty());

    h.runtime
        .store()
        .update(&wishlist, doc(json!({"sharedWith": ["carol"]})))
        .await
        .unwrap();
    h.runtime.drain().await;
    assert!(shared_ids(h.runtime.store(), "bob").await.is_empty());
    assert_eq!(shared_ids(h.runtime.store(), "carol").await, vec!["w1"]);

    h.runtime.store().delete(&wishlist).await.unwrap();
    h.runtime.drain().await;
    assert!(shared_ids(h.runtime.store(), "carol").await.is_empty());
}

#[tokio::test]
async fn test_wishlist_rename_refreshes_entry() {
    let mut h = harness();
    seed_contact(
        h.runtime.store().inner(),
        "bob",
        "alice",
        "Alice",
        ContactStatus::Accepted,
    )
    .await;
    let wishlist = paths::wishlist("alice", "w1");
    h.runtime
        .store()
        .set(&wishlist, wishlist_doc("Birthday", "shared", &["bob"]), SetMode::Overwrite)
        .await
        .unwrap();
    h.runtime.drain().await;

    h.runtime
        .store()
        .update(&wishlist, doc(json!({"name": "30th birthday"})))
        .await
        .unwrap();
    h.runtime.drain().await;

    let entry = h
        .runtime
        .store()
        .get(&paths::shared_with_me_entry("bob", "w1"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(entry["name"], json!("30th birthday"));
}

#[tokio::test]
async fn test_contact_removal_drops_their_wishlists() {
    let mut h = harness();
    seed_wishlist(h.runtime.store().inner(), "alice", "w1", "Birthday", &["bob"]).await;

    let contact = paths::contact("bob", "alice");
    h.runtime
        .store()
        .set(
            &contact,
            doc(json!({"name": "Alice", "status": "accepted", "createdAt": T0})),
            SetMode::Overwrite,
        )
        .await
        .unwrap();
    h.runtime.drain().await;
    assert_eq!(shared_ids(h.runtime.store(), "bob").await, vec!["w1"]);

    h.runtime.store().delete(&contact).await.unwrap();
    h.runtime.drain().await;
    assert!(shared_ids(h.runtime.store(), "bob").await.is_empty());
}

#[tokio::test]
async fn test_recompute_keeps_entries_from_every_contact() {
    let h = harness();
    let store = h.runtime.store().inner();
    seed_contact(store, "bob", "alice", "Alice", ContactStatus::Accepted).await;
    seed_contact(store, "bob", "carol", "Carol", ContactStatus::Accepted).await;
    seed_wishlist(store, "alice", "a1", "Alice's list", &["bob"]).await;
    seed_wishlist(store, "carol", "c1", "Carol's list", &["bob"]).await;
    recompute_shared_with_me(store, "bob").await.unwrap();

    let outcome = recompute_shared_with_me(store, "bob").await.unwrap();

    assert_eq!(
        outcome.included.into_iter().collect::<Vec<_>>(),
        vec!["a1", "c1"]
    );
    assert!(outcome.removed.is_empty());
    assert_eq!(shared_ids(store, "bob").await, vec!["a1", "c1"]);
}

#[tokio::test]
async fn test_recompute_rejects_multi_segment_user_id() {
    let h = harness();
    let store = h.runtime.store().inner();
    seed_contact(store, "a", "b", "B", ContactStatus::Accepted).await;

    assert!(recompute_shared_with_me(store, "a/contacts/b").await.is_err());

    let contact = store.get(&paths::contact("a", "b")).await.unwrap().unwrap();
    assert!(!contact.contains_key(SUMMARY_FIELD));
    assert!(!contact.contains_key(UPDATED_AT_FIELD));
}

#[tokio::test]
async fn test_path_like_shared_with_entry_leaves_other_users_alone() {
    let mut h = harness();
    seed_contact(
        h.runtime.store().inner(),
        "bob",
        "alice",
        "Alice",
        ContactStatus::Accepted,
    )
    .await;
    let before = h
        .runtime
        .store()
        .get(&paths::contact("bob", "alice"))
        .await
        .unwrap();

    h.runtime
        .store()
        .set(
            &paths::wishlist("mallory", "w1"),
            wishlist_doc("Bait", "shared", &["bob/contacts/alice"]),
            SetMode::Overwrite,
        )
        .await
        .unwrap();
    let report = h.runtime.drain().await;

    assert_eq!(report.failed, 0);
    let store = h.runtime.store();
    assert_eq!(
        store.get(&paths::contact("bob", "alice")).await.unwrap(),
        before
    );
    assert!(store
        .list(&paths::contact("bob", "alice").collection("sharedWithMe"))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_recompute_skips_wishlists_not_shared_with_user() {
    let store = LooseArrayFilters(MemoryStore::with_clock(Arc::new(ManualClock::new(T0))));
    seed_contact(&store, "bob", "alice", "Alice", ContactStatus::Accepted).await;
    seed_wishlist(&store, "alice", "w1", "Birthday", &["bob"]).await;
    seed_wishlist(&store, "alice", "w2", "Private", &["dave"]).await;

    let outcome = recompute_shared_with_me(&store, "bob").await.unwrap();

    assert_eq!(outcome.included.into_iter().collect::<Vec<_>>(), vec!["w1"]);
    assert_eq!(shared_ids(&store, "bob").await, vec!["w1"]);
}
