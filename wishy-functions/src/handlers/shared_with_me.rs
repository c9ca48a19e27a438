// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared-With-Me Reconciler
//!
//! Materializes, per user, the wishlists their accepted contacts share with
//! them. The entry set under `users/{userId}/sharedWithMe` must equal the
//! union, over accepted contacts C, of C's wishlists whose `sharedWith`
//! contains the user. Recomputation re-reads everything it needs, so running
//! it again on unchanged data converges to the same set.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use wishy_core::store::{decode, encode};
use wishy_core::{
    check_id, paths, Contact, ContactStatus, Document, DocumentStore, Filter, SetMode,
    SharedWithMeEntry, Snapshot, StoreError, Wishlist,
};

use crate::error::FunctionResult;
use crate::trigger::{TriggerContext, TriggerHandler};

/// Field on the user document holding the entry summaries.
pub const SUMMARY_FIELD: &str = "sharedWithMe";

/// Field on the user document stamped on every recompute.
pub const UPDATED_AT_FIELD: &str = "sharedWithMeUpdatedAt";

/// What a recompute did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecomputeOutcome {
    /// Wishlist ids now present for the user.
    pub included: BTreeSet<String>,
    /// Stale wishlist ids that were removed.
    pub removed: BTreeSet<String>,
}

/// Builds the entry for wishlist `wishlist` owned by contact `owner_id`.
pub fn shared_entry(
    owner_id: &str,
    owner: &Contact,
    wishlist: &Snapshot,
    data: &Wishlist,
) -> SharedWithMeEntry {
    SharedWithMeEntry {
        id: wishlist.id().to_string(),
        name: data.name.clone(),
        owner_id: owner_id.to_string(),
        owner_name: owner.name.clone(),
        privacy: data.privacy.clone(),
        path: wishlist.path.to_string(),
    }
}

/// Recomputes the shared-with-me view of `user_id`.
///
/// Fails without touching the store if `user_id` is not a single path
/// segment.
pub async fn recompute_shared_with_me(
    store: &dyn DocumentStore,
    user_id: &str,
) -> FunctionResult<RecomputeOutcome> {
    check_id(user_id)?;

    let existing: BTreeSet<String> = store
        .list(&paths::shared_with_me(user_id))
        .await?
        .iter()
        .map(|s| s.id().to_string())
        .collect();

    let contacts = store
        .query(
            &paths::contacts(user_id),
            &[Filter::equal("status", ContactStatus::Accepted.as_str())],
        )
        .await?;

    // Entries keyed by wishlist id; a wishlist is owned by exactly one
    // contact, so keys never collide across contacts.
    let mut entries: BTreeMap<String, SharedWithMeEntry> = BTreeMap::new();

    for contact_snapshot in &contacts {
        let owner_id = contact_snapshot.id();
        let owner: Contact = match contact_snapshot.decode() {
            Ok(contact) => contact,
            Err(e) => {
                warn!(path = %contact_snapshot.path, error = %e, "skipping unreadable contact");
                continue;
            }
        };

        let shared = store
            .query(
                &paths::wishlists(owner_id),
                &[Filter::array_contains("sharedWith", user_id)],
            )
            .await?;

        for wishlist in &shared {
            let data: Wishlist = match wishlist.decode() {
                Ok(data) => data,
                Err(e) => {
                    warn!(path = %wishlist.path, error = %e, "skipping unreadable wishlist");
                    continue;
                }
            };
            if !data.is_shared_with(user_id) {
                debug!(path = %wishlist.path, user = user_id, "wishlist no longer shared");
                continue;
            }
            let entry = shared_entry(owner_id, &owner, wishlist, &data);
            store
                .set(
                    &paths::shared_with_me_entry(user_id, &entry.id),
                    encode(&entry)?,
                    SetMode::Merge,
                )
                .await?;
            entries.insert(entry.id.clone(), entry);
        }
    }

    // Prune once, against the complete included set.
    let included: BTreeSet<String> = entries.keys().cloned().collect();
    let removed: BTreeSet<String> = existing.difference(&included).cloned().collect();
    for stale in &removed {
        store
            .delete(&paths::shared_with_me_entry(user_id, stale))
            .await?;
    }

    let summary: Vec<Value> = entries
        .values()
        .map(serde_json::to_value)
        .collect::<Result<_, _>>()
        .map_err(StoreError::from)?;
    let mut user_update = Document::new();
    user_update.insert(SUMMARY_FIELD.to_string(), Value::Array(summary));
    user_update.insert(UPDATED_AT_FIELD.to_string(), json!(store.server_time()));
    store
        .set(&paths::user(user_id), user_update, SetMode::Merge)
        .await?;

    info!(
        user = user_id,
        contacts = contacts.len(),
        included = included.len(),
        removed = removed.len(),
        "shared-with-me recomputed"
    );
    Ok(RecomputeOutcome { included, removed })
}

/// Recomputes the view of the user whose contacts changed.
pub struct ContactsChanged;

#[async_trait]
impl TriggerHandler for ContactsChanged {
    fn name(&self) -> &'static str {
        "shared_with_me_on_contacts"
    }

    async fn handle(&self, ctx: TriggerContext<'_>) -> FunctionResult<()> {
        let user_id = ctx.params.require("userId")?;
        recompute_shared_with_me(ctx.store, user_id).await?;
        Ok(())
    }
}

/// Users whose view depends on a wishlist change.
///
/// A change to the `sharedWith` list affects everyone on either side of it;
/// a change to the summarized fields (name, privacy) affects everyone it is
/// currently shared with. Returns an empty set when neither changed.
/// Entries that are not usable as user ids are left out.
pub fn affected_viewers(before: Option<&Document>, after: Option<&Document>) -> BTreeSet<String> {
    let read = |doc: Option<&Document>| doc.and_then(|d| decode::<Wishlist>(d).ok());
    let (before, after) = (read(before), read(after));

    let shared = |w: &Option<Wishlist>| -> BTreeSet<String> {
        let Some(w) = w else {
            return BTreeSet::new();
        };
        w.shared_with
            .iter()
            .filter(|id| match check_id(id) {
                Ok(_) => true,
                Err(e) => {
                    warn!(error = %e, "ignoring sharedWith entry");
                    false
                }
            })
            .cloned()
            .collect()
    };
    let (before_ids, after_ids) = (shared(&before), shared(&after));

    if before_ids != after_ids {
        return before_ids.union(&after_ids).cloned().collect();
    }

    let summary_changed = match (&before, &after) {
        (Some(b), Some(a)) => b.name != a.name || b.privacy != a.privacy,
        _ => false,
    };
    if summary_changed {
        after_ids
    } else {
        BTreeSet::new()
    }
}

/// Fans a wishlist change out to every affected viewer.
pub struct WishlistSharingChanged;

#[async_trait]
impl TriggerHandler for WishlistSharingChanged {
    fn name(&self) -> &'static str {
        "shared_with_me_on_wishlist"
    }

    async fn handle(&self, ctx: TriggerContext<'_>) -> FunctionResult<()> {
        let viewers = affected_viewers(ctx.change.before.as_ref(), ctx.change.after.as_ref());
        if viewers.is_empty() {
            debug!(path = %ctx.change.path, "sharing unchanged");
            return Ok(());
        }

        for viewer in &viewers {
            recompute_shared_with_me(ctx.store, viewer).await?;
        }
        Ok(())
    }
}
