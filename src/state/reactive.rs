//! Observable single-value cell.

use std::sync::Arc;

use tokio::sync::watch;

/// A value cell that notifies subscribers on every write.
///
/// Writes notify even when the new value equals the old one, so observers
/// can rely on "one write, one notification". Cloning the cell shares the
/// underlying channel.
#[derive(Debug)]
pub struct Reactive<T> {
    tx: Arc<watch::Sender<T>>,
}

impl<T> Reactive<T> {
    pub fn new(value: T) -> Self {
        let (tx, _rx) = watch::channel(value);
        Self { tx: Arc::new(tx) }
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Mutate the value in place and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    /// Subscribe to changes. The receiver starts with the current value
    /// marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone> Reactive<T> {
    /// Current value.
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }
}

impl<T> Reactive<T> {
    /// Run `f` against the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.tx.borrow())
    }
}

impl<T> Clone for Reactive<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T: Default> Default for Reactive<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
