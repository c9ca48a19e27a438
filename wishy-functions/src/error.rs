// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Handler error types.

use thiserror::Error;

use wishy_core::StoreError;

/// Error returned by a trigger handler. Any error makes the runtime
/// redeliver the triggering change.
#[derive(Error, Debug)]
pub enum FunctionError {
    /// Store operation failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Trigger fired without a path param the handler needs.
    #[error("missing path param: {0}")]
    MissingParam(String),

    /// Invalid pattern or configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type for handler operations.
pub type FunctionResult<T> = Result<T, FunctionError>;
