// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Share Intent Module
//!
//! Turns an incoming system share intent into a message for the application
//! layer. Intents are dispatched on MIME type to one of the registered
//! [`IntentHandler`]s; extraction itself is done by pure functions in
//! [`link`] and [`vcard`].

pub mod link;
pub mod vcard;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use link::{extract_link, LinkHandler, SharedLink};
pub use vcard::{parse_vcard, SharedContact, VCardError, VCardHandler};

/// Name of the platform channel between the native layer and the app.
pub const CHANNEL_NAME: &str = "com.wishysa.wishy/channel";

/// Channel method carrying shared text and links.
pub const METHOD_SHARED_TEXT: &str = "onSharedText";

/// Channel method carrying shared contacts.
pub const METHOD_SHARED_CONTACT: &str = "onSharedContact";

/// Standard extra keys.
pub const EXTRA_TEXT: &str = "android.intent.extra.TEXT";
pub const EXTRA_TITLE: &str = "android.intent.extra.TITLE";
pub const EXTRA_SUBJECT: &str = "android.intent.extra.SUBJECT";

/// Share extraction errors.
#[derive(Debug, Error)]
pub enum ShareError {
    #[error("intent is not a share intent")]
    NotShareIntent,

    #[error("no handler accepts MIME type {0}")]
    Unsupported(String),

    #[error("intent carries no vCard content")]
    MissingContent,

    #[error(transparent)]
    VCard(#[from] VCardError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Intent action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentAction {
    View,
    Send,
    Other(String),
}

impl IntentAction {
    /// Maps a platform action string.
    pub fn from_platform(action: &str) -> Self {
        match action {
            "android.intent.action.VIEW" | "VIEW" => IntentAction::View,
            "android.intent.action.SEND" | "SEND" => IntentAction::Send,
            other => IntentAction::Other(other.to_string()),
        }
    }
}

/// The parts of a platform intent this module looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedIntent {
    pub action: IntentAction,
    pub mime_type: Option<String>,
    /// Extras stringified by the platform layer.
    pub extras: BTreeMap<String, String>,
    /// Text content of the first clip item, read by the platform layer.
    pub clip_text: Option<String>,
}

impl SharedIntent {
    /// MIME type of an intent this module should handle, if any.
    pub fn share_mime(&self) -> Option<&str> {
        match self.action {
            IntentAction::View | IntentAction::Send => self.mime_type.as_deref(),
            IntentAction::Other(_) => None,
        }
    }
}

/// A message for the application layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMessage {
    pub method: String,
    /// JSON-encoded arguments.
    pub arguments: String,
}

impl ChannelMessage {
    /// Builds a message with JSON-encoded arguments.
    pub fn json<T: Serialize>(method: &str, arguments: &T) -> Result<Self, ShareError> {
        Ok(ChannelMessage {
            method: method.to_string(),
            arguments: serde_json::to_string(arguments)?,
        })
    }
}

/// Extracts an application message from one family of share intents.
pub trait IntentHandler: Send + Sync {
    /// Returns true if this handler takes intents of `mime_type`.
    fn accepts(&self, mime_type: &str) -> bool;

    /// Extracts the message to forward.
    fn extract(&self, intent: &SharedIntent) -> Result<ChannelMessage, ShareError>;
}

/// Routes share intents to the first handler accepting their MIME type.
pub struct ShareDispatcher {
    handlers: Vec<Box<dyn IntentHandler>>,
}

impl ShareDispatcher {
    /// Creates a dispatcher with no handlers.
    pub fn empty() -> Self {
        ShareDispatcher {
            handlers: Vec::new(),
        }
    }

    /// Adds a handler; earlier handlers take precedence.
    pub fn with_handler(mut self, handler: Box<dyn IntentHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Dispatches an intent.
    pub fn dispatch(&self, intent: &SharedIntent) -> Result<ChannelMessage, ShareError> {
        let mime = intent.share_mime().ok_or(ShareError::NotShareIntent)?;
        let handler = self
            .handlers
            .iter()
            .find(|h| h.accepts(mime))
            .ok_or_else(|| ShareError::Unsupported(mime.to_string()))?;
        handler.extract(intent)
    }
}

impl Default for ShareDispatcher {
    /// vCards first, everything else as a link.
    fn default() -> Self {
        ShareDispatcher::empty()
            .with_handler(Box::new(VCardHandler))
            .with_handler(Box::new(LinkHandler))
    }
}

/// Collapses newlines to spaces and trims every value.
pub fn normalize_extras(extras: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    extras
        .iter()
        .map(|(k, v)| (k.clone(), normalize_value(v)))
        .collect()
}

pub(crate) fn normalize_value(value: &str) -> String {
    value.replace("\r\n", " ").replace('\n', " ").trim().to_string()
}
