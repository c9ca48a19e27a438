//! Mobile-friendly data types.
//!
//! These types are wrappers around wishy-core share types that are
//! compatible with UniFFI for cross-language bindings.

use std::collections::HashMap;

use wishy_core::share::{IntentHandler, VCardHandler, EXTRA_TEXT};
use wishy_core::{IntentAction, SharedContact, SharedIntent, SharedLink};

/// An incoming platform intent, flattened by the native layer.
#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct MobileIntent {
    /// Platform action string, e.g. `android.intent.action.SEND`.
    pub action: String,
    pub mime_type: Option<String>,
    /// Extras, stringified.
    pub extras: HashMap<String, String>,
    /// Text of the first clip item, if any.
    pub clip_text: Option<String>,
}

impl From<MobileIntent> for SharedIntent {
    fn from(intent: MobileIntent) -> Self {
        SharedIntent {
            action: IntentAction::from_platform(&intent.action),
            mime_type: intent.mime_type,
            extras: intent.extras.into_iter().collect(),
            clip_text: intent.clip_text,
        }
    }
}

/// What an intent would be forwarded as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum MobileShareKind {
    /// Not a share intent; nothing is forwarded.
    Ignored,
    /// A shared contact file.
    Contact,
    /// Text with a link.
    Link,
    /// Anything else; the normalized extras are forwarded.
    Extras,
}

impl MobileShareKind {
    /// Classifies a core intent.
    pub fn of(intent: &SharedIntent) -> Self {
        match intent.share_mime() {
            None => MobileShareKind::Ignored,
            Some(mime) if VCardHandler.accepts(mime) => MobileShareKind::Contact,
            Some(_) if intent.extras.contains_key(EXTRA_TEXT) => MobileShareKind::Link,
            Some(_) => MobileShareKind::Extras,
        }
    }
}

/// Mobile-friendly shared link.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct MobileSharedLink {
    pub link: String,
    pub title: String,
    pub subject: String,
}

impl From<SharedLink> for MobileSharedLink {
    fn from(link: SharedLink) -> Self {
        MobileSharedLink {
            link: link.link,
            title: link.title,
            subject: link.subject,
        }
    }
}

/// Mobile-friendly shared contact.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct MobileSharedContact {
    pub name: String,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub organization: Option<String>,
    pub urls: Vec<String>,
    pub note: Option<String>,
}

impl From<SharedContact> for MobileSharedContact {
    fn from(contact: SharedContact) -> Self {
        MobileSharedContact {
            name: contact.name,
            emails: contact.emails,
            phones: contact.phones,
            organization: contact.organization,
            urls: contact.urls,
            note: contact.note,
        }
    }
}
