//! Shared text and link extraction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

use super::{
    normalize_extras, normalize_value, ChannelMessage, IntentHandler, ShareError, SharedIntent,
    EXTRA_SUBJECT, EXTRA_TEXT, EXTRA_TITLE, METHOD_SHARED_TEXT,
};

/// A link shared into the app.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SharedLink {
    pub link: String,
    pub title: String,
    pub subject: String,
}

/// Extracts `{link, title, subject}` from intent extras.
///
/// Returns `None` when there is no text extra. The link is the first http(s)
/// URL in the text, or the whole normalized text if it contains none.
pub fn extract_link(extras: &BTreeMap<String, String>) -> Option<SharedLink> {
    let text = normalize_value(extras.get(EXTRA_TEXT)?);
    let pick = |key: &str| extras.get(key).map(|v| normalize_value(v)).unwrap_or_default();

    Some(SharedLink {
        link: first_web_url(&text).unwrap_or(text),
        title: pick(EXTRA_TITLE),
        subject: pick(EXTRA_SUBJECT),
    })
}

/// Finds the first http or https URL in free text.
pub fn first_web_url(text: &str) -> Option<String> {
    text.split_whitespace()
        .map(|token| token.trim_end_matches([',', '.', ')', ']', '>', '"', '\'']))
        .map(|token| token.trim_start_matches(['(', '[', '<', '"', '\'']))
        .find(|token| {
            Url::parse(token)
                .map(|url| matches!(url.scheme(), "http" | "https") && url.host().is_some())
                .unwrap_or(false)
        })
        .map(str::to_string)
}

/// Handles every share intent that is not claimed by a more specific handler.
pub struct LinkHandler;

impl IntentHandler for LinkHandler {
    fn accepts(&self, _mime_type: &str) -> bool {
        true
    }

    fn extract(&self, intent: &SharedIntent) -> Result<ChannelMessage, ShareError> {
        match extract_link(&intent.extras) {
            Some(link) => ChannelMessage::json(METHOD_SHARED_TEXT, &link),
            None => ChannelMessage::json(METHOD_SHARED_TEXT, &normalize_extras(&intent.extras)),
        }
    }
}
