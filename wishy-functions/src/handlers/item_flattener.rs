//! Wishlist item flattening.
//!
//! Keeps `all_wishes_global/{itemId}` in step with every
//! `users/{ownerId}/wishlists/{wishlistId}/items/{itemId}`. Item ids are
//! assumed unique across all users; two owners reusing an id would share
//! one global record.

use async_trait::async_trait;
use tracing::debug;

use wishy_core::store::{encode, merge_into};
use wishy_core::{paths, Document, GlobalItemProvenance, SetMode};

use crate::error::FunctionResult;
use crate::trigger::{TriggerContext, TriggerHandler};

/// The global record for an item: its fields plus provenance.
pub fn flattened_item(item: &Document, provenance: &GlobalItemProvenance) -> FunctionResult<Document> {
    let mut flat = item.clone();
    merge_into(&mut flat, encode(provenance)?);
    Ok(flat)
}

/// Fires on any write to a wishlist item.
pub struct ItemFlattener;

#[async_trait]
impl TriggerHandler for ItemFlattener {
    fn name(&self) -> &'static str {
        "item_flattener"
    }

    async fn handle(&self, ctx: TriggerContext<'_>) -> FunctionResult<()> {
        let owner_id = ctx.params.require("userId")?;
        let wishlist_id = ctx.params.require("wishlistId")?;
        let item_id = ctx.params.require("itemId")?;
        let global = paths::global_item(item_id);

        let Some(item) = ctx.change.after.as_ref() else {
            ctx.store.delete(&global).await?;
            debug!(item = item_id, "global item removed");
            return Ok(());
        };

        let provenance = GlobalItemProvenance {
            item_id: item_id.to_string(),
            wishlist_id: wishlist_id.to_string(),
            owner_id: owner_id.to_string(),
            flattened_at: ctx.store.server_time(),
        };
        ctx.store
            .set(&global, flattened_item(item, &provenance)?, SetMode::Merge)
            .await?;
        debug!(item = item_id, owner = owner_id, "global item upserted");
        Ok(())
    }
}
