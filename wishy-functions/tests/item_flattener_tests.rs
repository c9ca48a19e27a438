// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for the global item collection.

mod common;

use common::{doc, harness, T0};
use serde_json::json;
use wishy_core::{paths, DocumentStore, SetMode};

#[tokio::test]
async fn test_item_create_is_flattened_with_provenance() {
    let mut h = harness();
    let item = paths::wishlist_item("alice", "w1", "i1");
    h.runtime
        .store()
        .set(&item, doc(json!({"title": "Bike", "price": 250})), SetMode::Overwrite)
        .await
        .unwrap();
    h.runtime.drain().await;

    let global = h
        .runtime
        .store()
        .get(&paths::global_item("i1"))
        .await
        .unwrap()
        .expect("global item");
    assert_eq!(global["title"], json!("Bike"));
    assert_eq!(global["price"], json!(250));
    assert_eq!(global["itemId"], json!("i1"));
    assert_eq!(global["wishlistId"], json!("w1"));
    assert_eq!(global["ownerId"], json!("alice"));
    assert_eq!(global["flattenedAt"], json!(T0));
}

#[tokio::test]
async fn test_item_update_refreshes_global_copy() {
    let mut h = harness();
    let item = paths::wishlist_item("alice", "w1", "i1");
    let store = h.runtime.store();
    store
        .set(&item, doc(json!({"title": "Bike"})), SetMode::Overwrite)
        .await
        .unwrap();
    h.runtime.drain().await;

    h.clock.advance(10);
    h.runtime
        .store()
        .update(&item, doc(json!({"title": "Road bike", "url": "https://shop.example/bike"})))
        .await
        .unwrap();
    h.runtime.drain().await;

    let global = h
        .runtime
        .store()
        .get(&paths::global_item("i1"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(global["title"], json!("Road bike"));
    assert_eq!(global["url"], json!("https://shop.example/bike"));
    assert_eq!(global["flattenedAt"], json!(T0 + 10));
}

#[tokio::test]
async fn test_item_delete_removes_global_copy() {
    let mut h = harness();
    let item = paths::wishlist_item("alice", "w1", "i1");
    h.runtime
        .store()
        .set(&item, doc(json!({"title": "Bike"})), SetMode::Overwrite)
        .await
        .unwrap();
    h.runtime.drain().await;

    h.runtime.store().delete(&item).await.unwrap();
    let report = h.runtime.drain().await;
    assert_eq!(report.failed, 0);

    assert!(h
        .runtime
        .store()
        .get(&paths::global_item("i1"))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_deleting_unflattened_item_succeeds() {
    let mut h = harness();
    let item = paths::wishlist_item("alice", "w1", "i1");
    h.runtime
        .store()
        .inner()
        .set(&item, doc(json!({"title": "Bike"})), SetMode::Overwrite)
        .await
        .unwrap();

    h.runtime.store().delete(&item).await.unwrap();
    let report = h.runtime.drain().await;
    assert_eq!(report.delivered, 1);
    assert_eq!(report.failed, 0);
}
