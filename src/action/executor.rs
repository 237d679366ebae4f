//! Runs one backend operation and drives an [`ApiState`] through it.

use std::fmt;
use std::sync::Arc;

use crate::action::result::ActionResult;
use crate::action::{BoxError, NETWORK_ERROR, UNKNOWN_ERROR};
use crate::service::{ApiResponse, BackendService, Operation};
use crate::state::ApiState;

/// How overlapping runs against the same record are reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchPolicy {
    /// Every completion writes to the record; the last one to land wins.
    #[default]
    LastWriteWins,
    /// Only the most recently dispatched run may write. Superseded runs
    /// still return their result but leave the record untouched,
    /// including `loading`.
    LatestOnly,
}

/// Executes operations against a bound [`BackendService`].
pub struct Executor<S> {
    service: Arc<S>,
    policy: DispatchPolicy,
}

impl<S: BackendService> Executor<S> {
    pub fn new(service: S) -> Self {
        Self {
            service: Arc::new(service),
            policy: DispatchPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: DispatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Run `op` and store its raw response data in `state`.
    pub async fn execute<O>(
        &self,
        op: O,
        state: &ApiState<O::Output>,
        payload: O::Payload,
    ) -> ActionResult<O::Output>
    where
        O: Operation<S>,
        O::Output: Clone + Send + Sync,
    {
        self.execute_with(op, state, payload, |data| Ok(data)).await
    }

    /// Run `op`, pass successful data through `transform`, and store the
    /// result in `state`.
    ///
    /// `loading` is reset exactly once on every exit path, after the
    /// outcome has been written. A failing service call or transform is
    /// absorbed into the record and the returned result; nothing panics
    /// out to the caller.
    pub async fn execute_with<O, U, F>(
        &self,
        op: O,
        state: &ApiState<U>,
        payload: O::Payload,
        transform: F,
    ) -> ActionResult<U>
    where
        O: Operation<S>,
        U: Clone + Send + Sync,
        F: FnOnce(O::Output) -> Result<U, BoxError>,
    {
        let operation = op.id();
        let generation = state.begin_dispatch();
        state.clear();
        state.set_loading(true);

        let _loading = scopeguard::guard(state, |state| {
            if self.may_write(state, generation) {
                state.set_loading(false);
            }
        });

        tracing::debug!(%operation, generation, "Dispatching operation");

        let outcome = match op.invoke(&self.service, payload).await {
            Ok(ApiResponse {
                data: Some(data), ..
            }) => transform(data).map_err(error_message),
            Ok(ApiResponse { data: None, error }) => Err(error
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| UNKNOWN_ERROR.to_string())),
            Err(e) => Err(error_message(e)),
        };

        if !self.may_write(state, generation) {
            tracing::debug!(%operation, generation, "Discarding superseded completion");
            return match outcome {
                Ok(data) => ActionResult::succeeded(data),
                Err(error) => ActionResult::failed(error),
            };
        }

        match outcome {
            Ok(data) => {
                state.set_data(data.clone());
                state.set_error("");
                tracing::debug!(%operation, "Operation succeeded");
                ActionResult::succeeded(data)
            }
            Err(error) => {
                tracing::warn!(%operation, %error, "Operation failed");
                state.set_error(error.clone());
                ActionResult::failed(error)
            }
        }
    }

    fn may_write<U>(&self, state: &ApiState<U>, generation: u64) -> bool {
        match self.policy {
            DispatchPolicy::LastWriteWins => true,
            DispatchPolicy::LatestOnly => state.is_current(generation),
        }
    }
}

impl<S> fmt::Debug for Executor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Executor")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Reduce an error to its message, falling back to [`NETWORK_ERROR`] when
/// it has none.
fn error_message(err: impl fmt::Display) -> String {
    let message = err.to_string();
    if message.is_empty() {
        NETWORK_ERROR.to_string()
    } else {
        message
    }
}
