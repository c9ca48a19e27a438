// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Share activity lifecycle.
//!
//! At most one share activity is live at a time. A newly created activity
//! displaces the previous one, which the platform layer must finish.

use parking_lot::Mutex;
use tracing::debug;

/// Holds the id of the live share activity.
#[derive(Debug, Default)]
pub struct ActivitySlot {
    current: Mutex<Option<u64>>,
}

impl ActivitySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `activity_id` as live and returns the activity it displaced.
    ///
    /// Re-creating the live activity displaces nothing.
    pub fn on_create(&self, activity_id: u64) -> Option<u64> {
        let mut current = self.current.lock();
        let previous = current.replace(activity_id).filter(|id| *id != activity_id);
        if let Some(previous) = previous {
            debug!(previous, current = activity_id, "share activity displaced");
        }
        previous
    }

    /// Clears the slot if `activity_id` is the live activity.
    ///
    /// A displaced activity finishing later must not clear its successor.
    pub fn on_destroy(&self, activity_id: u64) {
        let mut current = self.current.lock();
        if *current == Some(activity_id) {
            *current = None;
        }
    }

    /// The live activity, if any.
    pub fn current(&self) -> Option<u64> {
        *self.current.lock()
    }
}
