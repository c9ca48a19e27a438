// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contact status reconciliation.
//!
//! When the recipient accepts or rejects a `contactRequest` notification,
//! mirror the contact on both sides (accept) or drop the request (reject),
//! then clear the transient documents.

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use wishy_core::store::{decode, encode};
use wishy_core::{
    check_id, paths, Contact, DocPath, DocumentStore, Notification, NotificationKind,
    NotificationStatus, SetMode,
};

use crate::error::FunctionResult;
use crate::trigger::{TriggerContext, TriggerHandler};

/// Title of the notification sent back to the requester.
pub const ACCEPTED_TITLE: &str = "Contact request accepted";

/// Fires on updates to notifications.
pub struct ContactStatusHandler;

#[async_trait]
impl TriggerHandler for ContactStatusHandler {
    fn name(&self) -> &'static str {
        "contact_status_reconciler"
    }

    async fn handle(&self, ctx: TriggerContext<'_>) -> FunctionResult<()> {
        let recipient_id = ctx.params.require("userId")?;
        let (Some(before), Some(after)) = (&ctx.change.before, &ctx.change.after) else {
            return Ok(());
        };

        let (before, after): (Notification, Notification) = match (decode(before), decode(after))
        {
            (Ok(before), Ok(after)) => (before, after),
            (Err(e), _) | (_, Err(e)) => {
                debug!(path = %ctx.change.path, error = %e, "not a typed notification, skipping");
                return Ok(());
            }
        };

        if after.kind != NotificationKind::ContactRequest
            || before.status == after.status
            || !after.status.is_terminal()
        {
            return Ok(());
        }

        let Some(sender_id) = after.related_party() else {
            error!(path = %ctx.change.path, "contact request notification has no sender uid");
            return Ok(());
        };
        if let Err(e) = check_id(sender_id) {
            error!(
                path = %ctx.change.path,
                error = %e,
                "contact request notification has a malformed sender uid"
            );
            return Ok(());
        }

        match after.status {
            NotificationStatus::Accepted => {
                accept(ctx.store, &after, sender_id, recipient_id).await?;
            }
            NotificationStatus::Rejected => {
                info!(sender = sender_id, recipient = recipient_id, "contact request rejected");
            }
            NotificationStatus::Pending => {}
        }

        ctx.store.delete(&ctx.change.path).await?;

        delete_best_effort(ctx.store, &paths::contact_request(sender_id, recipient_id)).await;
        // Older clients wrote the request in the opposite direction as well.
        delete_best_effort(ctx.store, &paths::contact_request(recipient_id, sender_id)).await;

        Ok(())
    }
}

/// Writes the contact on both sides and tells the sender.
///
/// The two contact writes are awaited together; either failing fails the
/// whole operation and nothing is rolled back.
async fn accept(
    store: &dyn DocumentStore,
    notification: &Notification,
    sender_id: &str,
    recipient_id: &str,
) -> FunctionResult<()> {
    let created_at = store.server_time();
    let on_recipient_side = Contact::accepted(&notification.sender, created_at);
    let on_sender_side = Contact::accepted(&notification.receiver, created_at);

    let recipient_path = paths::contact(recipient_id, sender_id);
    let sender_path = paths::contact(sender_id, recipient_id);
    tokio::try_join!(
        store.set(&recipient_path, encode(&on_recipient_side)?, SetMode::Merge),
        store.set(&sender_path, encode(&on_sender_side)?, SetMode::Merge),
    )?;

    let receiver_name = if notification.receiver.name.is_empty() {
        recipient_id
    } else {
        notification.receiver.name.as_str()
    };
    let accepted = Notification {
        kind: NotificationKind::ContactAccepted,
        title: ACCEPTED_TITLE.to_string(),
        message: format!("{} accepted your contact request", receiver_name),
        sender: notification.receiver.clone(),
        receiver: notification.sender.clone(),
        status: NotificationStatus::Accepted,
        read: false,
        timestamp: created_at,
        reference: notification.reference.clone(),
    };
    store
        .add(&paths::notifications(sender_id), encode(&accepted)?)
        .await?;

    info!(sender = sender_id, recipient = recipient_id, "contact request accepted");
    Ok(())
}

async fn delete_best_effort(store: &dyn DocumentStore, path: &DocPath) {
    if let Err(e) = store.delete(path).await {
        warn!(path = %path, error = %e, "cleanup delete failed, ignoring");
    }
}
