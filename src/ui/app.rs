use std::fmt::Write as _;

use serde::Serialize;
use tokio::task::JoinHandle;

use crate::action::{ActionResult, DispatchError, Dispatcher};
use crate::service::{BackendService, EncodeBase64, EncodeRequest, EncodedText, GetHello, HelloMessage};
use crate::state::{ApiSnapshot, ApiState, Reactive, Status};
use crate::ui::command::{Command, HELP};
use crate::ui::counter::{CounterIntent, CounterReducer, CounterState};
use crate::ui::mvi::Reducer;

/// Encoded text shown in the UI, paired with the input that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedView {
    pub base64: String,
    pub original_text: String,
}

/// Whether the interactive loop should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Front-end model: a counter plus one request record per remote feature.
///
/// The dispatcher is injected so the composition root decides when the
/// backend service is installed. Clones share every piece of state, so a
/// request can run on a spawned task while the caller keeps handling input.
pub struct DemoApp<S: BackendService> {
    counter: Reactive<CounterState>,
    hello: ApiState<HelloMessage>,
    encoded: ApiState<EncodedView>,
    dispatcher: Dispatcher<S>,
}

impl<S: BackendService> DemoApp<S> {
    pub fn new(dispatcher: Dispatcher<S>) -> Self {
        Self {
            counter: Reactive::default(),
            hello: ApiState::new(),
            encoded: ApiState::new(),
            dispatcher,
        }
    }

    pub fn counter(&self) -> CounterState {
        self.counter.get()
    }

    pub fn hello(&self) -> &ApiState<HelloMessage> {
        &self.hello
    }

    pub fn encoded(&self) -> &ApiState<EncodedView> {
        &self.encoded
    }

    pub fn dispatch_counter(&self, intent: CounterIntent) {
        self.counter.set(CounterReducer::reduce(self.counter.get(), intent));
    }

    pub async fn fetch_hello(&self) -> Result<ActionResult<HelloMessage>, DispatchError> {
        let action = self.dispatcher.create_action(GetHello, &self.hello)?;
        Ok(action.run().await)
    }

    /// Encode `text` on the backend, keeping the input next to the result.
    pub async fn encode(&self, text: &str) -> Result<ActionResult<EncodedView>, DispatchError> {
        let original_text = text.to_string();
        let action = self
            .dispatcher
            .create_action_with_transform(EncodeBase64, &self.encoded, move |data: EncodedText| {
                EncodedView {
                    base64: data.base64,
                    original_text: original_text.clone(),
                }
            })?
            .with_payload(EncodeRequest::new(text));
        Ok(action.run().await)
    }

    /// Apply one command. Output meant for the user is returned as text.
    pub async fn handle(&self, command: Command) -> Result<(Flow, Option<String>), DispatchError> {
        match command {
            Command::Increment => self.dispatch_counter(CounterIntent::Increment),
            Command::Decrement => self.dispatch_counter(CounterIntent::Decrement),
            Command::Reset => self.dispatch_counter(CounterIntent::Reset),
            Command::Hello => {
                self.fetch_hello().await?;
            }
            Command::Encode(text) => {
                self.encode(&text).await?;
            }
            Command::Show => {}
            Command::Help => return Ok((Flow::Continue, Some(HELP.to_string()))),
            Command::Quit => return Ok((Flow::Quit, None)),
        }
        Ok((Flow::Continue, Some(self.render())))
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Counter: {}", self.counter.get().count);
        let _ = writeln!(
            out,
            "{}",
            render_line("Hello", &self.hello.snapshot(), |d| d.message.clone())
        );
        let _ = write!(
            out,
            "{}",
            render_line("Base64", &self.encoded.snapshot(), |d| {
                format!("{} ({:?})", d.base64, d.original_text)
            })
        );
        out
    }
}

impl<S: BackendService> Clone for DemoApp<S> {
    fn clone(&self) -> Self {
        Self {
            counter: self.counter.clone(),
            hello: self.hello.clone(),
            encoded: self.encoded.clone(),
            dispatcher: self.dispatcher.clone(),
        }
    }
}

/// Re-render `app` into `sink` whenever either request record changes
/// status. Runs until aborted.
pub fn render_on_change<S, F>(app: &DemoApp<S>, mut sink: F) -> JoinHandle<()>
where
    S: BackendService,
    F: FnMut(String) + Send + 'static,
{
    let app = app.clone();
    let mut hello_rx = app.hello.subscribe();
    let mut encoded_rx = app.encoded.subscribe();

    tokio::spawn(async move {
        let mut last = (app.hello.status(), app.encoded.status());
        loop {
            let changed = tokio::select! {
                r = hello_rx.changed() => r,
                r = encoded_rx.changed() => r,
            };
            if changed.is_err() {
                break;
            }

            let current = (
                hello_rx.borrow_and_update().status(),
                encoded_rx.borrow_and_update().status(),
            );
            if current != last {
                last = current;
                sink(app.render());
            }
        }
    })
}

fn render_line<T>(label: &str, snapshot: &ApiSnapshot<T>, show: impl Fn(&T) -> String) -> String {
    let status = snapshot.status();
    let detail = match status {
        Status::Loading => "...".to_string(),
        Status::Error => snapshot.error.clone(),
        Status::Success | Status::Idle => snapshot.data.as_ref().map(show).unwrap_or_else(|| "-".to_string()),
    };
    format!("{} [{}]: {}", label, status, detail)
}

/// Log every status transition of `state` until all its handles are gone.
pub fn watch_status<T>(label: &'static str, state: &ApiState<T>) -> JoinHandle<()>
where
    T: Send + Sync + 'static,
{
    let mut rx = state.subscribe();
    tokio::spawn(async move {
        let mut last = rx.borrow_and_update().status();
        while rx.changed().await.is_ok() {
            let status = rx.borrow_and_update().status();
            if status != last {
                tracing::debug!(feature = label, from = %last, to = %status, "State transition");
                last = status;
            }
        }
    })
}
