//! Action creation: isolated factories and the shared default dispatcher.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, OnceLock};

use thiserror::Error;

use crate::action::executor::Executor;
use crate::action::result::ActionResult;
use crate::action::BoxError;
use crate::service::{BackendService, Operation, OperationId};
use crate::state::ApiState;

type Transform<T, U> = Arc<dyn Fn(T) -> Result<U, BoxError> + Send + Sync>;

/// Boxed future returned by [`Action::into_callable`].
pub type ActionFuture<U> = Pin<Box<dyn Future<Output = ActionResult<U>> + Send>>;

/// Errors from using the default dispatcher.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Action dispatcher is not initialized; install a backend service before creating actions")]
    NotInitialized,

    #[error("Action dispatcher is already initialized")]
    AlreadyInstalled,
}

/// Produces actions bound to a private [`Executor`].
///
/// Use this directly in tests or when several backends coexist; the
/// application-wide path goes through [`Dispatcher`].
pub struct ActionFactory<S> {
    executor: Arc<Executor<S>>,
}

impl<S: BackendService> ActionFactory<S> {
    pub fn new(service: S) -> Self {
        Self::from_executor(Executor::new(service))
    }

    pub fn from_executor(executor: Executor<S>) -> Self {
        Self {
            executor: Arc::new(executor),
        }
    }

    pub fn executor(&self) -> &Executor<S> {
        &self.executor
    }

    /// Action storing the raw response data in `state`.
    pub fn create_action<O>(&self, op: O, state: &ApiState<O::Output>) -> Action<S, O, O::Output>
    where
        O: Operation<S>,
        O::Output: Clone + Send + Sync,
    {
        self.build(
            op,
            state,
            Arc::new(|data: O::Output| -> Result<O::Output, BoxError> { Ok(data) }),
        )
    }

    /// Action passing response data through `transform` before storing it.
    pub fn create_action_with_transform<O, U, F>(
        &self,
        op: O,
        state: &ApiState<U>,
        transform: F,
    ) -> Action<S, O, U>
    where
        O: Operation<S>,
        U: Clone + Send + Sync + 'static,
        F: Fn(O::Output) -> U + Send + Sync + 'static,
    {
        self.build(
            op,
            state,
            Arc::new(move |data: O::Output| -> Result<U, BoxError> { Ok(transform(data)) }),
        )
    }

    /// Like [`create_action_with_transform`](Self::create_action_with_transform)
    /// for transforms that can fail. A failure is recorded like any other
    /// execution error.
    pub fn create_action_with_try_transform<O, U, E, F>(
        &self,
        op: O,
        state: &ApiState<U>,
        transform: F,
    ) -> Action<S, O, U>
    where
        O: Operation<S>,
        U: Clone + Send + Sync + 'static,
        E: Into<BoxError>,
        F: Fn(O::Output) -> Result<U, E> + Send + Sync + 'static,
    {
        self.build(
            op,
            state,
            Arc::new(move |data: O::Output| -> Result<U, BoxError> {
                transform(data).map_err(Into::into)
            }),
        )
    }

    fn build<O, U>(
        &self,
        op: O,
        state: &ApiState<U>,
        transform: Transform<O::Output, U>,
    ) -> Action<S, O, U>
    where
        O: Operation<S>,
    {
        Action {
            executor: Arc::clone(&self.executor),
            op,
            state: state.clone(),
            payload: O::Payload::default(),
            transform,
        }
    }
}

impl<S> Clone for ActionFactory<S> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
        }
    }
}

impl<S> fmt::Debug for ActionFactory<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionFactory")
            .field("executor", &self.executor)
            .finish()
    }
}

/// A bound operation/record pair, ready to run any number of times.
pub struct Action<S, O: Operation<S>, U>
where
    S: BackendService,
{
    executor: Arc<Executor<S>>,
    op: O,
    state: ApiState<U>,
    payload: O::Payload,
    transform: Transform<O::Output, U>,
}

impl<S, O, U> Action<S, O, U>
where
    S: BackendService,
    O: Operation<S>,
    U: Clone + Send + Sync + 'static,
{
    /// Payload sent on every run. Defaults to `O::Payload::default()`.
    pub fn with_payload(mut self, payload: O::Payload) -> Self {
        self.payload = payload;
        self
    }

    pub fn operation(&self) -> OperationId {
        self.op.id()
    }

    pub fn state(&self) -> &ApiState<U> {
        &self.state
    }

    /// Execute once and return the outcome.
    pub async fn run(&self) -> ActionResult<U> {
        let transform = Arc::clone(&self.transform);
        self.executor
            .execute_with(self.op, &self.state, self.payload.clone(), move |data| {
                transform(data)
            })
            .await
    }

    /// Turn the action into a zero-argument callable.
    pub fn into_callable(self) -> impl Fn() -> ActionFuture<U> + Clone + Send + Sync + 'static {
        let action = Arc::new(self);
        move || -> ActionFuture<U> {
            let action = Arc::clone(&action);
            Box::pin(async move { action.run().await })
        }
    }
}

impl<S, O, U> Clone for Action<S, O, U>
where
    S: BackendService,
    O: Operation<S>,
{
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
            op: self.op,
            state: self.state.clone(),
            payload: self.payload.clone(),
            transform: Arc::clone(&self.transform),
        }
    }
}

/// Shared, install-once action factory.
///
/// Created empty at startup, handed to whatever composes the UI, and
/// installed once a backend service exists. Every clone sees the same slot.
/// Creating actions before installation yields
/// [`DispatchError::NotInitialized`].
pub struct Dispatcher<S> {
    slot: Arc<OnceLock<ActionFactory<S>>>,
}

impl<S: BackendService> Dispatcher<S> {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(OnceLock::new()),
        }
    }

    /// A dispatcher with `service` already installed.
    pub fn with_service(service: S) -> Self {
        let dispatcher = Self::new();
        // A fresh slot is always empty.
        let _ = dispatcher.slot.set(ActionFactory::new(service));
        dispatcher
    }

    pub fn install(&self, service: S) -> Result<(), DispatchError> {
        self.install_factory(ActionFactory::new(service))
    }

    pub fn install_factory(&self, factory: ActionFactory<S>) -> Result<(), DispatchError> {
        self.slot
            .set(factory)
            .map_err(|_| DispatchError::AlreadyInstalled)?;
        tracing::info!("Action dispatcher installed");
        Ok(())
    }

    pub fn is_installed(&self) -> bool {
        self.slot.get().is_some()
    }

    pub fn factory(&self) -> Result<&ActionFactory<S>, DispatchError> {
        self.slot.get().ok_or(DispatchError::NotInitialized)
    }

    pub fn create_action<O>(
        &self,
        op: O,
        state: &ApiState<O::Output>,
    ) -> Result<Action<S, O, O::Output>, DispatchError>
    where
        O: Operation<S>,
        O::Output: Clone + Send + Sync,
    {
        Ok(self.factory()?.create_action(op, state))
    }

    pub fn create_action_with_transform<O, U, F>(
        &self,
        op: O,
        state: &ApiState<U>,
        transform: F,
    ) -> Result<Action<S, O, U>, DispatchError>
    where
        O: Operation<S>,
        U: Clone + Send + Sync + 'static,
        F: Fn(O::Output) -> U + Send + Sync + 'static,
    {
        Ok(self
            .factory()?
            .create_action_with_transform(op, state, transform))
    }

    pub fn create_action_with_try_transform<O, U, E, F>(
        &self,
        op: O,
        state: &ApiState<U>,
        transform: F,
    ) -> Result<Action<S, O, U>, DispatchError>
    where
        O: Operation<S>,
        U: Clone + Send + Sync + 'static,
        E: Into<BoxError>,
        F: Fn(O::Output) -> Result<U, E> + Send + Sync + 'static,
    {
        Ok(self
            .factory()?
            .create_action_with_try_transform(op, state, transform))
    }
}

impl<S: BackendService> Default for Dispatcher<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for Dispatcher<S> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<S> fmt::Debug for Dispatcher<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("installed", &self.slot.get().is_some())
            .finish()
    }
}
