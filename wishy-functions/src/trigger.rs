// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Trigger Matching
//!
//! Path templates, change kinds and the per-invocation context handed to
//! handlers.

use std::collections::HashMap;

use async_trait::async_trait;

use wishy_core::{DocPath, Document, DocumentStore};

use crate::error::{FunctionError, FunctionResult};

/// One segment of a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A document path template such as `users/{userId}/contacts/{contactId}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    template: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parses a template. Params are written `{name}`.
    pub fn parse(template: &str) -> FunctionResult<Self> {
        let trimmed = template.trim_matches('/');
        let mut segments = Vec::new();
        for part in trimmed.split('/') {
            if part.is_empty() {
                return Err(FunctionError::Configuration(format!(
                    "empty segment in pattern '{}'",
                    template
                )));
            }
            let segment = match part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                Some(name) if !name.is_empty() => Segment::Param(name.to_string()),
                Some(_) => {
                    return Err(FunctionError::Configuration(format!(
                        "unnamed param in pattern '{}'",
                        template
                    )))
                }
                None => Segment::Literal(part.to_string()),
            };
            segments.push(segment);
        }
        if segments.len() % 2 != 0 {
            return Err(FunctionError::Configuration(format!(
                "pattern '{}' does not address documents",
                template
            )));
        }
        Ok(PathPattern {
            template: trimmed.to_string(),
            segments,
        })
    }

    /// The template this pattern was parsed from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Matches a document path, returning the captured params.
    pub fn matches(&self, path: &DocPath) -> Option<Params> {
        let parts: Vec<&str> = path.segments().collect();
        if parts.len() != self.segments.len() {
            return None;
        }
        let mut params = HashMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), part.to_string());
                }
            }
        }
        Some(Params(params))
    }
}

/// Params captured from a matched path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(HashMap<String, String>);

impl Params {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Returns a param the pattern is known to capture.
    pub fn require(&self, name: &str) -> FunctionResult<&str> {
        self.get(name)
            .ok_or_else(|| FunctionError::MissingParam(name.to_string()))
    }
}

/// What kind of write a handler listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    Create,
    Update,
    Delete,
    /// Any of the above.
    Write,
}

/// A single document mutation with its before/after state.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentChange {
    pub path: DocPath,
    pub before: Option<Document>,
    pub after: Option<Document>,
}

impl DocumentChange {
    /// The concrete kind of this change, or `None` for a no-op (deleting a
    /// missing document).
    pub fn kind(&self) -> Option<TriggerKind> {
        match (&self.before, &self.after) {
            (None, Some(_)) => Some(TriggerKind::Create),
            (Some(_), Some(_)) => Some(TriggerKind::Update),
            (Some(_), None) => Some(TriggerKind::Delete),
            (None, None) => None,
        }
    }

    /// Returns true if a handler bound to `trigger` should see this change.
    pub fn fires(&self, trigger: TriggerKind) -> bool {
        match (self.kind(), trigger) {
            (None, _) => false,
            (Some(_), TriggerKind::Write) => true,
            (Some(kind), trigger) => kind == trigger,
        }
    }
}

/// Everything a handler invocation receives.
pub struct TriggerContext<'a> {
    pub store: &'a dyn DocumentStore,
    pub change: &'a DocumentChange,
    pub params: Params,
}

/// A store-triggered function.
#[async_trait]
pub trait TriggerHandler: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Handles one change. Errors cause redelivery.
    async fn handle(&self, ctx: TriggerContext<'_>) -> FunctionResult<()>;
}
