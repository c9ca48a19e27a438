//! User notifications.

use serde::{Deserialize, Serialize};

use super::contact::Party;

/// Notification type tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationKind {
    ContactRequest,
    ContactAccepted,
    /// Any tag this backend does not act on.
    #[serde(other)]
    Other,
}

/// Notification status. Moving a contact request away from `Pending`
/// triggers reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl NotificationStatus {
    /// Returns true for statuses that resolve a request.
    pub fn is_terminal(&self) -> bool {
        matches!(self, NotificationStatus::Accepted | NotificationStatus::Rejected)
    }
}

/// A notification stored under `users/{userId}/notifications/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub sender: Party,
    #[serde(default)]
    pub receiver: Party,
    #[serde(default)]
    pub status: NotificationStatus,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub timestamp: u64,
    /// Path of the request this notification was raised for.
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Notification {
    /// The id of the other party: the sender, who raised the notification.
    pub fn related_party(&self) -> Option<&str> {
        Some(self.sender.uid.as_str()).filter(|uid| !uid.is_empty())
    }
}
