//! Contacts and contact requests.

use serde::{Deserialize, Serialize};

/// Contact relationship status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl ContactStatus {
    /// Wire value, as used in store filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::Pending => "pending",
            ContactStatus::Accepted => "accepted",
            ContactStatus::Rejected => "rejected",
        }
    }
}

/// Display metadata for one side of a contact request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Party {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// A contact record stored under `users/{userId}/contacts/{contactId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub created_at: u64,
    #[serde(default)]
    pub status: ContactStatus,
}

impl Contact {
    /// An accepted contact mirroring the counterpart's display metadata.
    pub fn accepted(counterpart: &Party, created_at: u64) -> Self {
        Contact {
            name: counterpart.name.clone(),
            email: counterpart.email.clone(),
            created_at,
            status: ContactStatus::Accepted,
        }
    }
}

/// A transient request stored under
/// `users/{senderId}/contactRequests/{recipientId}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[serde(default)]
    pub sender: Party,
    #[serde(default)]
    pub receiver: Party,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<u64>,
}
