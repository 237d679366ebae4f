//! Per-feature request state: `{data, loading, error}` plus derived status.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use crate::state::reactive::Reactive;

/// Summary of an [`ApiState`]. Priority: loading > error > success > idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Idle,
    Loading,
    Success,
    Error,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Loading => "loading",
            Status::Success => "success",
            Status::Error => "error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time view of an [`ApiState`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiSnapshot<T> {
    pub data: Option<T>,
    pub loading: bool,
    /// Empty string means "no error".
    pub error: String,
}

impl<T> ApiSnapshot<T> {
    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }

    pub fn status(&self) -> Status {
        if self.loading {
            Status::Loading
        } else if self.has_error() {
            Status::Error
        } else if self.has_data() {
            Status::Success
        } else {
            Status::Idle
        }
    }
}

impl<T> Default for ApiSnapshot<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: String::new(),
        }
    }
}

/// Reactive request state for one feature.
///
/// Handles are cheap to clone and share the same underlying record. Every
/// setter notifies subscribers, including `clear()` when nothing changed.
pub struct ApiState<T> {
    cell: Reactive<ApiSnapshot<T>>,
    generation: Arc<AtomicU64>,
}

impl<T> ApiState<T> {
    pub fn new() -> Self {
        Self {
            cell: Reactive::new(ApiSnapshot::default()),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Reset `loading` and `error`. `data` is kept as-is.
    pub fn clear(&self) {
        self.cell.update(|s| {
            s.loading = false;
            s.error.clear();
        });
    }

    pub fn set_loading(&self, loading: bool) {
        self.cell.update(|s| s.loading = loading);
    }

    pub fn set_data(&self, data: T) {
        self.cell.update(|s| s.data = Some(data));
    }

    pub fn set_error(&self, error: impl Into<String>) {
        let error = error.into();
        self.cell.update(|s| s.error = error);
    }

    pub fn subscribe(&self) -> watch::Receiver<ApiSnapshot<T>> {
        self.cell.subscribe()
    }

    pub fn loading(&self) -> bool {
        self.read(|s| s.loading)
    }

    pub fn has_data(&self) -> bool {
        self.read(ApiSnapshot::has_data)
    }

    pub fn has_error(&self) -> bool {
        self.read(ApiSnapshot::has_error)
    }

    pub fn status(&self) -> Status {
        self.read(ApiSnapshot::status)
    }

    /// Start a new tracked dispatch and return its generation number.
    pub(crate) fn begin_dispatch(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// True if `generation` is the most recent dispatch on this record.
    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn read<R>(&self, f: impl FnOnce(&ApiSnapshot<T>) -> R) -> R {
        self.cell.with(f)
    }
}

impl<T: Clone> ApiState<T> {
    pub fn snapshot(&self) -> ApiSnapshot<T> {
        self.cell.get()
    }

    pub fn data(&self) -> Option<T> {
        self.read(|s| s.data.clone())
    }

    pub fn error(&self) -> String {
        self.read(|s| s.error.clone())
    }
}

impl<T> Clone for ApiState<T> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
            generation: Arc::clone(&self.generation),
        }
    }
}

impl<T> Default for ApiState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug + Clone> fmt::Debug for ApiState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiState")
            .field("snapshot", &self.snapshot())
            .finish()
    }
}
