// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Wishy Mobile Bindings
//!
//! UniFFI bindings for Android and iOS platforms.
//! Receives share intents from the native layer, extracts links and
//! contacts with wishy-core, and forwards them to the app over a
//! platform-implemented message channel.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::{debug, info, warn};

use wishy_core::share::extract_link;
use wishy_core::{ShareDispatcher, ShareError, SharedIntent, CHANNEL_NAME};

// === Modules ===

mod error;
mod lifecycle;
mod types;

// Re-export public types
pub use error::MobileError;
pub use lifecycle::ActivitySlot;
pub use types::{MobileIntent, MobileShareKind, MobileSharedContact, MobileSharedLink};

uniffi::setup_scaffolding!();

static DISPATCHER: Lazy<ShareDispatcher> = Lazy::new(ShareDispatcher::default);

// === Platform Channel ===

/// Message channel into the app, implemented by the platform.
#[uniffi::export(callback_interface)]
pub trait PlatformChannel: Send + Sync {
    /// Invokes `method` on the app side with JSON-encoded `arguments`.
    fn invoke_method(&self, method: String, arguments: String);
}

// === Standalone Functions ===

/// Name of the channel the app listens on.
#[uniffi::export]
pub fn channel_name() -> String {
    CHANNEL_NAME.to_string()
}

/// Reports how an intent would be forwarded, without forwarding it.
#[uniffi::export]
pub fn classify_intent(intent: MobileIntent) -> MobileShareKind {
    MobileShareKind::of(&SharedIntent::from(intent))
}

/// Extracts `{link, title, subject}` from intent extras.
///
/// Returns None if there is no text extra.
#[uniffi::export]
pub fn extract_shared_link(extras: HashMap<String, String>) -> Option<MobileSharedLink> {
    let extras: BTreeMap<String, String> = extras.into_iter().collect();
    extract_link(&extras).map(MobileSharedLink::from)
}

/// Parses vCard text into a contact.
#[uniffi::export]
pub fn parse_shared_vcard(vcard: String) -> Result<MobileSharedContact, MobileError> {
    let contact = wishy_core::share::parse_vcard(&vcard)?;
    Ok(contact.into())
}

// === Share Bridge ===

/// Forwards share intents to the app and tracks the live share activity.
#[derive(uniffi::Object)]
pub struct ShareBridge {
    channel: Box<dyn PlatformChannel>,
    activity: ActivitySlot,
}

#[uniffi::export]
impl ShareBridge {
    /// Creates a bridge sending on `channel`.
    #[uniffi::constructor]
    pub fn new(channel: Box<dyn PlatformChannel>) -> Arc<Self> {
        Arc::new(ShareBridge {
            channel,
            activity: ActivitySlot::new(),
        })
    }

    /// Registers a newly created share activity.
    ///
    /// Returns the id of the previous activity, which the caller must finish.
    pub fn on_create(&self, activity_id: u64) -> Option<u64> {
        self.activity.on_create(activity_id)
    }

    /// Unregisters a destroyed share activity.
    pub fn on_destroy(&self, activity_id: u64) {
        self.activity.on_destroy(activity_id);
    }

    /// The live share activity, if any.
    pub fn active_activity(&self) -> Option<u64> {
        self.activity.current()
    }

    /// Extracts and forwards an intent.
    ///
    /// Returns false for intents that are not shares. Extraction failures
    /// are returned and nothing is sent.
    pub fn handle_intent(&self, intent: MobileIntent) -> Result<bool, MobileError> {
        let intent = SharedIntent::from(intent);
        let message = match DISPATCHER.dispatch(&intent) {
            Ok(message) => message,
            Err(ShareError::NotShareIntent) => {
                debug!(action = ?intent.action, "ignoring non-share intent");
                return Ok(false);
            }
            Err(e) => {
                warn!(mime = ?intent.mime_type, error = %e, "share extraction failed");
                return Err(e.into());
            }
        };

        info!(method = %message.method, "forwarding shared content");
        self.channel.invoke_method(message.method, message.arguments);
        Ok(true)
    }
}
