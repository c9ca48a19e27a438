// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! vCard import for shared contact files (RFC 6350 subset).

use serde::{Deserialize, Serialize};

use super::{ChannelMessage, IntentHandler, ShareError, SharedIntent, METHOD_SHARED_CONTACT};

/// Contact fields pulled out of a shared vCard.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SharedContact {
    pub name: String,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    pub urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Parses the first vCard in `vcard`.
pub fn parse_vcard(vcard: &str) -> Result<SharedContact, VCardError> {
    let lines = unfold_lines(vcard);

    let mut lines_iter = lines.iter().skip_while(|l| l.trim().is_empty());
    match lines_iter.next() {
        Some(first) if first.trim().eq_ignore_ascii_case("BEGIN:VCARD") => {}
        _ => return Err(VCardError::InvalidFormat("Missing BEGIN:VCARD".into())),
    }

    let mut contact = SharedContact::default();
    let mut structured_name = None;

    for line in lines_iter {
        let line = line.trim();
        if line.eq_ignore_ascii_case("END:VCARD") {
            break;
        }
        let Some((property, value)) = split_property(line) else {
            continue;
        };
        match property.as_str() {
            "FN" => contact.name = unescape_vcard(value),
            "N" => structured_name = Some(name_from_components(value)),
            "EMAIL" => push_non_empty(&mut contact.emails, unescape_vcard(value)),
            "TEL" => push_non_empty(&mut contact.phones, unescape_vcard(value)),
            "URL" => push_non_empty(&mut contact.urls, unescape_vcard(value)),
            "ORG" => {
                let org = split_components(value)
                    .into_iter()
                    .map(unescape_vcard)
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
                    .join(", ");
                contact.organization = Some(org).filter(|s| !s.is_empty());
            }
            "NOTE" => contact.note = Some(unescape_vcard(value)).filter(|s| !s.is_empty()),
            _ => {}
        }
    }

    if contact.name.trim().is_empty() {
        contact.name = structured_name.unwrap_or_default();
    }
    if contact.name.trim().is_empty() {
        return Err(VCardError::MissingField("FN (display name)".into()));
    }

    Ok(contact)
}

/// Joins folded continuation lines (lines starting with a space or tab).
fn unfold_lines(vcard: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for raw in vcard.lines() {
        let raw = raw.trim_end_matches('\r');
        match (raw.strip_prefix([' ', '\t']), lines.last_mut()) {
            (Some(rest), Some(previous)) => previous.push_str(rest),
            _ => lines.push(raw.to_string()),
        }
    }
    lines
}

/// Splits `NAME;PARAMS:value` into the upper-cased property name (without
/// group prefix or parameters) and the raw value.
fn split_property(line: &str) -> Option<(String, &str)> {
    let colon = line.find(':')?;
    let (head, value) = (&line[..colon], &line[colon + 1..]);
    let name = head.split(';').next()?;
    let name = name.rsplit('.').next().unwrap_or(name);
    Some((name.to_ascii_uppercase(), value))
}

/// `N:Family;Given;Additional;Prefix;Suffix` -> "Prefix Given Additional Family Suffix".
fn name_from_components(value: &str) -> String {
    let parts: Vec<String> = split_components(value)
        .into_iter()
        .map(unescape_vcard)
        .collect();
    let get = |i: usize| parts.get(i).map(String::as_str).unwrap_or("");
    [get(3), get(1), get(2), get(0), get(4)]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

fn push_non_empty(values: &mut Vec<String>, value: String) {
    if !value.is_empty() {
        values.push(value);
    }
}

/// Splits a structured value on `;` separators that are not escaped.
fn split_components(value: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (i, c) in value.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            ';' => {
                parts.push(&value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&value[start..]);
    parts
}

/// Resolves `\n`, `\,`, `\;` and `\\` in one left-to-right pass. Unknown
/// escapes keep the escaped character.
fn unescape_vcard(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out.trim().to_string()
}

/// vCard parsing errors.
#[derive(Debug, thiserror::Error)]
pub enum VCardError {
    #[error("Invalid vCard format: {0}")]
    InvalidFormat(String),
    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Handles shared contact files.
pub struct VCardHandler;

impl IntentHandler for VCardHandler {
    fn accepts(&self, mime_type: &str) -> bool {
        let mime = mime_type.to_ascii_lowercase();
        mime.contains("x-vcard") || mime.contains("text/vcard")
    }

    fn extract(&self, intent: &SharedIntent) -> Result<ChannelMessage, ShareError> {
        let content = intent
            .clip_text
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .ok_or(ShareError::MissingContent)?;
        let contact = parse_vcard(content)?;
        ChannelMessage::json(METHOD_SHARED_CONTACT, &contact)
    }
}
