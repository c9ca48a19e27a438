// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Trigger Runtime
//!
//! Local stand-in for the hosting platform's trigger delivery. Writes made
//! through a [`TriggeredStore`] are recorded as [`DocumentChange`]s; the
//! [`Runtime`] matches them against the registered bindings and invokes each
//! handler once per change, redelivering failures up to a fixed number of
//! attempts. Writes made by handlers are recorded too and delivered in the
//! same drain, one invocation at a time.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, error, warn};

use wishy_core::{
    CollectionPath, DocPath, Document, DocumentStore, Filter, SetMode, Snapshot, StoreResult,
};

use crate::error::FunctionResult;
use crate::handlers::{
    ContactRequestHandler, ContactStatusHandler, ContactsChanged, ItemFlattener,
    WishlistSharingChanged, CONTACT_PATTERN, CONTACT_REQUEST_PATTERN, NOTIFICATION_PATTERN,
    WISHLIST_ITEM_PATTERN, WISHLIST_PATTERN,
};
use crate::trigger::{DocumentChange, PathPattern, TriggerContext, TriggerHandler, TriggerKind};

/// Store wrapper that records every mutation it forwards.
pub struct TriggeredStore<S> {
    inner: S,
    changes: Mutex<Vec<DocumentChange>>,
}

impl<S: DocumentStore> TriggeredStore<S> {
    pub fn new(inner: S) -> Self {
        TriggeredStore {
            inner,
            changes: Mutex::new(Vec::new()),
        }
    }

    /// The wrapped store. Writes made directly on it fire nothing.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Takes the changes recorded since the last call.
    pub fn take_changes(&self) -> Vec<DocumentChange> {
        std::mem::take(&mut *self.changes.lock())
    }

    fn record(&self, path: &DocPath, before: Option<Document>, after: Option<Document>) {
        if before.is_none() && after.is_none() {
            return;
        }
        self.changes.lock().push(DocumentChange {
            path: path.clone(),
            before,
            after,
        });
    }
}

#[async_trait]
impl<S: DocumentStore> DocumentStore for TriggeredStore<S> {
    async fn get(&self, path: &DocPath) -> StoreResult<Option<Document>> {
        self.inner.get(path).await
    }

    async fn set(&self, path: &DocPath, data: Document, mode: SetMode) -> StoreResult<()> {
        let before = self.inner.get(path).await?;
        self.inner.set(path, data, mode).await?;
        let after = self.inner.get(path).await?;
        self.record(path, before, after);
        Ok(())
    }

    async fn delete(&self, path: &DocPath) -> StoreResult<()> {
        let before = self.inner.get(path).await?;
        self.inner.delete(path).await?;
        self.record(path, before, None);
        Ok(())
    }

    async fn query(
        &self,
        collection: &CollectionPath,
        filters: &[Filter],
    ) -> StoreResult<Vec<Snapshot>> {
        self.inner.query(collection, filters).await
    }

    fn server_time(&self) -> u64 {
        self.inner.server_time()
    }
}

/// A handler bound to a path pattern and change kind.
pub struct Binding {
    pub pattern: PathPattern,
    pub kind: TriggerKind,
    pub handler: Arc<dyn TriggerHandler>,
}

/// The set of registered functions.
#[derive(Default)]
pub struct Functions {
    bindings: Vec<Binding>,
}

impl Functions {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Functions {
            bindings: Vec::new(),
        }
    }

    /// Binds `handler` to changes of `kind` on paths matching `template`.
    pub fn register(
        mut self,
        template: &str,
        kind: TriggerKind,
        handler: Arc<dyn TriggerHandler>,
    ) -> FunctionResult<Self> {
        self.bindings.push(Binding {
            pattern: PathPattern::parse(template)?,
            kind,
            handler,
        });
        Ok(self)
    }

    /// The application's functions.
    pub fn standard() -> FunctionResult<Self> {
        Functions::new()
            .register(
                CONTACT_REQUEST_PATTERN,
                TriggerKind::Create,
                Arc::new(ContactRequestHandler),
            )?
            .register(
                NOTIFICATION_PATTERN,
                TriggerKind::Update,
                Arc::new(ContactStatusHandler),
            )?
            .register(
                WISHLIST_ITEM_PATTERN,
                TriggerKind::Write,
                Arc::new(ItemFlattener),
            )?
            .register(CONTACT_PATTERN, TriggerKind::Write, Arc::new(ContactsChanged))?
            .register(
                WISHLIST_PATTERN,
                TriggerKind::Write,
                Arc::new(WishlistSharingChanged),
            )
    }

    /// Returns the number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Delivery limits.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeConfig {
    /// Attempts per (change, handler) before the change is dropped.
    pub max_delivery_attempts: u32,
    /// Deliveries per drain before the runtime stops and leaves the rest queued.
    pub max_cascade: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            max_delivery_attempts: 3,
            max_cascade: 1000,
        }
    }
}

/// Counters for one drain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DrainReport {
    /// Invocations that returned `Ok`.
    pub delivered: usize,
    /// Invocations that returned an error (including ones later retried).
    pub failed: usize,
    /// Deliveries given up after the last attempt.
    pub dropped: usize,
    /// Deliveries still queued because the cascade limit was hit.
    pub pending: usize,
}

struct Delivery {
    change: Arc<DocumentChange>,
    binding: usize,
    attempt: u32,
}

/// Delivers recorded changes to the registered functions.
pub struct Runtime<S> {
    store: TriggeredStore<S>,
    functions: Functions,
    config: RuntimeConfig,
    queue: VecDeque<Delivery>,
}

impl<S: DocumentStore> Runtime<S> {
    pub fn new(store: S, functions: Functions, config: RuntimeConfig) -> Self {
        Runtime {
            store: TriggeredStore::new(store),
            functions,
            config,
            queue: VecDeque::new(),
        }
    }

    /// The store clients write through.
    pub fn store(&self) -> &TriggeredStore<S> {
        &self.store
    }

    /// Number of deliveries waiting.
    pub fn pending(&self) -> usize {
        self.queue.len() + self.store.changes.lock().len()
    }

    /// Moves freshly recorded changes into the delivery queue.
    fn enqueue_recorded(&mut self) {
        for change in self.store.take_changes() {
            let change = Arc::new(change);
            for (index, binding) in self.functions.bindings.iter().enumerate() {
                if change.fires(binding.kind) && binding.pattern.matches(&change.path).is_some() {
                    self.queue.push_back(Delivery {
                        change: change.clone(),
                        binding: index,
                        attempt: 1,
                    });
                }
            }
        }
    }

    /// Delivers queued changes until nothing is left or the cascade limit
    /// is reached.
    pub async fn drain(&mut self) -> DrainReport {
        let mut report = DrainReport::default();
        let mut invocations = 0usize;

        self.enqueue_recorded();
        while let Some(delivery) = self.queue.pop_front() {
            if invocations >= self.config.max_cascade {
                self.queue.push_front(delivery);
                warn!(
                    limit = self.config.max_cascade,
                    remaining = self.queue.len(),
                    "cascade limit reached, leaving deliveries queued"
                );
                break;
            }
            invocations += 1;

            let binding = &self.functions.bindings[delivery.binding];
            let Some(params) = binding.pattern.matches(&delivery.change.path) else {
                continue;
            };
            let name = binding.handler.name();
            debug!(
                function = name,
                path = %delivery.change.path,
                attempt = delivery.attempt,
                "delivering change"
            );

            let ctx = TriggerContext {
                store: &self.store,
                change: &delivery.change,
                params,
            };
            match binding.handler.handle(ctx).await {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    report.failed += 1;
                    if delivery.attempt < self.config.max_delivery_attempts {
                        warn!(
                            function = name,
                            path = %delivery.change.path,
                            attempt = delivery.attempt,
                            error = %e,
                            "function failed, redelivering"
                        );
                        self.queue.push_back(Delivery {
                            attempt: delivery.attempt + 1,
                            ..delivery
                        });
                    } else {
                        error!(
                            function = name,
                            path = %delivery.change.path,
                            attempts = delivery.attempt,
                            error = %e,
                            "function failed, giving up"
                        );
                        report.dropped += 1;
                    }
                }
            }

            self.enqueue_recorded();
        }

        report.pending = self.queue.len();
        report
    }
}
