// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contact request notifications.
//!
//! A new `users/{senderId}/contactRequests/{recipientId}` document raises a
//! pending `contactRequest` notification in the recipient's inbox.

use async_trait::async_trait;
use tracing::{error, info};

use wishy_core::store::{decode, encode};
use wishy_core::{
    paths, ContactRequest, Notification, NotificationKind, NotificationStatus, Party,
};

use crate::error::FunctionResult;
use crate::trigger::{TriggerContext, TriggerHandler};

/// Title shown for incoming requests.
pub const REQUEST_TITLE: &str = "New contact request";

/// Builds the notification delivered to the recipient of `request`.
///
/// Missing uids fall back to the ids in the request's path.
pub fn request_notification(
    request: &ContactRequest,
    sender_id: &str,
    recipient_id: &str,
    request_path: &str,
    timestamp: u64,
) -> Notification {
    let with_uid = |party: &Party, fallback: &str| Party {
        uid: if party.uid.is_empty() {
            fallback.to_string()
        } else {
            party.uid.clone()
        },
        ..party.clone()
    };

    Notification {
        kind: NotificationKind::ContactRequest,
        title: REQUEST_TITLE.to_string(),
        message: request.message.clone().unwrap_or_default(),
        sender: with_uid(&request.sender, sender_id),
        receiver: with_uid(&request.receiver, recipient_id),
        status: NotificationStatus::Pending,
        read: false,
        timestamp,
        reference: Some(request_path.to_string()),
    }
}

/// Fires on creation of a contact request.
pub struct ContactRequestHandler;

#[async_trait]
impl TriggerHandler for ContactRequestHandler {
    fn name(&self) -> &'static str {
        "contact_request_notification"
    }

    async fn handle(&self, ctx: TriggerContext<'_>) -> FunctionResult<()> {
        let sender_id = ctx.params.require("userId")?;
        let recipient_id = ctx.params.require("otherId")?;

        let Some(data) = ctx.change.after.as_ref() else {
            return Ok(());
        };
        let request: ContactRequest = match decode(data) {
            Ok(request) => request,
            Err(e) => {
                error!(path = %ctx.change.path, error = %e, "unreadable contact request");
                return Ok(());
            }
        };

        let notification = request_notification(
            &request,
            sender_id,
            recipient_id,
            ctx.change.path.as_str(),
            ctx.store.server_time(),
        );
        let created = ctx
            .store
            .add(&paths::notifications(recipient_id), encode(&notification)?)
            .await?;

        info!(
            sender = sender_id,
            recipient = recipient_id,
            notification = %created,
            "contact request notification created"
        );
        Ok(())
    }
}
