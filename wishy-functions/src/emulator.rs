// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Line-based store emulator.
//!
//! Each input line is one JSON command; each command is applied through the
//! triggered store, triggers are drained, and one JSON response line is
//! produced.
//!
//! ```text
//! {"op":"set","path":"users/a/contactRequests/b","data":{"message":"hi"}}
//! {"op":"update","path":"users/b/notifications/n1","data":{"status":"accepted"}}
//! {"op":"query","collection":"users/b/contacts","filters":[{"field":"status","value":"accepted"}]}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use wishy_core::{CollectionPath, DocPath, Document, DocumentStore, Filter, SetMode};

use crate::runtime::{DrainReport, Runtime};

/// Filter operator in a query command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOp {
    #[default]
    Eq,
    ArrayContains,
}

/// One query filter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FilterSpec {
    pub field: String,
    #[serde(default)]
    pub op: FilterOp,
    pub value: Value,
}

impl From<FilterSpec> for Filter {
    fn from(filter: FilterSpec) -> Self {
        match filter.op {
            FilterOp::Eq => Filter::Equal(filter.field, filter.value),
            FilterOp::ArrayContains => Filter::ArrayContains(filter.field, filter.value),
        }
    }
}

/// A command read from input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Command {
    Set {
        path: String,
        data: Document,
        #[serde(default)]
        merge: bool,
    },
    Update {
        path: String,
        data: Document,
    },
    Delete {
        path: String,
    },
    Get {
        path: String,
    },
    Query {
        collection: String,
        #[serde(default)]
        filters: Vec<FilterSpec>,
    },
}

/// The response written for each command.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Response {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triggers: Option<DrainReport>,
}

impl Response {
    fn failure(error: impl ToString) -> Self {
        Response {
            ok: false,
            error: Some(error.to_string()),
            ..Default::default()
        }
    }
}

/// Parses and executes one input line.
pub async fn execute_line<S: DocumentStore>(runtime: &mut Runtime<S>, line: &str) -> Response {
    match serde_json::from_str::<Command>(line) {
        Ok(command) => execute(runtime, command).await,
        Err(e) => {
            warn!(error = %e, "unparsable command");
            Response::failure(format!("invalid command: {}", e))
        }
    }
}

/// Executes a command and drains the triggers it caused.
pub async fn execute<S: DocumentStore>(runtime: &mut Runtime<S>, command: Command) -> Response {
    let result = apply(runtime, command).await;
    let triggers = runtime.drain().await;
    match result {
        Ok(data) => Response {
            ok: true,
            data,
            error: None,
            triggers: Some(triggers),
        },
        Err(e) => Response {
            triggers: Some(triggers),
            ..Response::failure(e)
        },
    }
}

async fn apply<S: DocumentStore>(
    runtime: &Runtime<S>,
    command: Command,
) -> anyhow::Result<Option<Value>> {
    let store = runtime.store();
    match command {
        Command::Set { path, data, merge } => {
            let mode = if merge { SetMode::Merge } else { SetMode::Overwrite };
            store.set(&DocPath::parse(&path)?, data, mode).await?;
            Ok(None)
        }
        Command::Update { path, data } => {
            store.update(&DocPath::parse(&path)?, data).await?;
            Ok(None)
        }
        Command::Delete { path } => {
            store.delete(&DocPath::parse(&path)?).await?;
            Ok(None)
        }
        Command::Get { path } => {
            let doc = store.get(&DocPath::parse(&path)?).await?;
            Ok(Some(doc.map(Value::Object).unwrap_or(Value::Null)))
        }
        Command::Query {
            collection,
            filters,
        } => {
            let filters: Vec<Filter> = filters.into_iter().map(Filter::from).collect();
            let found = store
                .query(&CollectionPath::parse(&collection)?, &filters)
                .await?;
            let rows = found
                .into_iter()
                .map(|s| {
                    serde_json::json!({
                        "path": s.path.as_str(),
                        "data": Value::Object(s.data),
                    })
                })
                .collect();
            Ok(Some(Value::Array(rows)))
        }
    }
}
