// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for share intent dispatch and link extraction.

use std::collections::BTreeMap;

use serde_json::{json, Value};
use wishy_core::share::{extract_link, EXTRA_SUBJECT, EXTRA_TEXT, EXTRA_TITLE};
use wishy_core::{
    IntentAction, ShareDispatcher, ShareError, SharedIntent, METHOD_SHARED_CONTACT,
    METHOD_SHARED_TEXT,
};

fn extras(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn intent(action: IntentAction, mime: Option<&str>, pairs: &[(&str, &str)]) -> SharedIntent {
    SharedIntent {
        action,
        mime_type: mime.map(str::to_string),
        extras: extras(pairs),
        clip_text: None,
    }
}

const VCARD: &str = "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Ana Ruiz\r\nEMAIL;TYPE=home:ana@example.com\r\nEND:VCARD\r\n";

#[test]
fn test_link_extraction_picks_url_out_of_text() {
    let found = extract_link(&extras(&[
        (EXTRA_TEXT, "Mira esto\nhttps://shop.example/p/42 "),
        (EXTRA_TITLE, " Lamp\n"),
        (EXTRA_SUBJECT, "Gift idea"),
    ]))
    .unwrap();

    assert_eq!(found.link, "https://shop.example/p/42");
    assert_eq!(found.title, "Lamp");
    assert_eq!(found.subject, "Gift idea");
}

#[test]
fn test_link_extraction_falls_back_to_whole_text() {
    let found = extract_link(&extras(&[(EXTRA_TEXT, "just some\nwords")])).unwrap();
    assert_eq!(found.link, "just some words");
    assert_eq!(found.title, "");
}

#[test]
fn test_link_extraction_needs_text_extra() {
    assert!(extract_link(&extras(&[(EXTRA_TITLE, "x")])).is_none());
}

#[test]
fn test_dispatch_send_text_goes_to_shared_text() {
    let dispatcher = ShareDispatcher::default();
    let message = dispatcher
        .dispatch(&intent(
            IntentAction::Send,
            Some("text/plain"),
            &[(EXTRA_TEXT, "https://shop.example/p/1")],
        ))
        .unwrap();

    assert_eq!(message.method, METHOD_SHARED_TEXT);
    let args: Value = serde_json::from_str(&message.arguments).unwrap();
    assert_eq!(
        args,
        json!({"link": "https://shop.example/p/1", "title": "", "subject": ""})
    );
}

#[test]
fn test_dispatch_without_text_forwards_generic_extras() {
    let dispatcher = ShareDispatcher::default();
    let message = dispatcher
        .dispatch(&intent(
            IntentAction::View,
            Some("application/octet-stream"),
            &[("com.vendor.extra.ID", " 17\n")],
        ))
        .unwrap();

    let args: Value = serde_json::from_str(&message.arguments).unwrap();
    assert_eq!(args, json!({"com.vendor.extra.ID": "17"}));
}

#[test]
fn test_dispatch_vcard_goes_to_shared_contact() {
    let dispatcher = ShareDispatcher::default();
    let mut shared = intent(IntentAction::View, Some("text/x-vcard"), &[]);
    shared.clip_text = Some(VCARD.to_string());

    let message = dispatcher.dispatch(&shared).unwrap();
    assert_eq!(message.method, METHOD_SHARED_CONTACT);
    let args: Value = serde_json::from_str(&message.arguments).unwrap();
    assert_eq!(args["name"], json!("Ana Ruiz"));
    assert_eq!(args["emails"], json!(["ana@example.com"]));
}

#[test]
fn test_dispatch_vcard_without_content_fails() {
    let dispatcher = ShareDispatcher::default();
    let result = dispatcher.dispatch(&intent(IntentAction::Send, Some("text/vcard"), &[]));
    assert!(matches!(result, Err(ShareError::MissingContent)));
}

#[test]
fn test_dispatch_ignores_non_share_actions() {
    let dispatcher = ShareDispatcher::default();
    let result = dispatcher.dispatch(&intent(
        IntentAction::Other("android.intent.action.MAIN".into()),
        Some("text/plain"),
        &[(EXTRA_TEXT, "x")],
    ));
    assert!(matches!(result, Err(ShareError::NotShareIntent)));
}

#[test]
fn test_dispatch_requires_mime_type() {
    let dispatcher = ShareDispatcher::default();
    let result = dispatcher.dispatch(&intent(IntentAction::Send, None, &[(EXTRA_TEXT, "x")]));
    assert!(matches!(result, Err(ShareError::NotShareIntent)));
}

#[test]
fn test_empty_dispatcher_reports_unsupported() {
    let dispatcher = ShareDispatcher::empty();
    let result = dispatcher.dispatch(&intent(IntentAction::Send, Some("text/plain"), &[]));
    assert!(matches!(result, Err(ShareError::Unsupported(m)) if m == "text/plain"));
}
