mod common;

use apidemo::action::{DispatchError, Dispatcher};
use apidemo::config::ClientConfig;
use apidemo::service::HttpBackend;
use apidemo::state::Status;
use apidemo::ui::{render_on_change, Command, DemoApp, Flow};
use common::scripted::{hello, ScriptedService};
use common::TestServer;
use std::time::Duration;
use tokio::sync::mpsc;

fn app_against(server: &TestServer) -> DemoApp<HttpBackend> {
    let dispatcher = Dispatcher::new();
    let app = DemoApp::new(dispatcher.clone());
    let backend = HttpBackend::new(&ClientConfig {
        base_url: server.base_url(),
        ..ClientConfig::default()
    })
    .unwrap();
    dispatcher.install(backend).unwrap();
    app
}

#[tokio::test]
async fn fetch_hello_through_real_backend() {
    let server = TestServer::start().await;
    let app = app_against(&server);

    let result = app.fetch_hello().await.unwrap();

    assert!(result.is_success());
    assert_eq!(app.hello().status(), Status::Success);
    assert_eq!(
        app.hello().data().unwrap().message,
        "Hello from Render with Fastify!"
    );
    assert!(app.render().contains("Hello [success]: Hello from Render with Fastify!"));
}

#[tokio::test]
async fn encode_keeps_original_text() {
    let server = TestServer::start().await;
    let app = app_against(&server);

    app.encode("Hello World").await.unwrap();

    let view = app.encoded().data().unwrap();
    assert_eq!(
        serde_json::to_value(&view).unwrap(),
        serde_json::json!({"base64": "SGVsbG8gV29ybGQ=", "originalText": "Hello World"})
    );
    assert_eq!(app.encoded().error(), "");
    assert!(!app.encoded().loading());
}

#[tokio::test]
async fn unreachable_backend_records_error() {
    let server = TestServer::start().await;
    let addr = server.base_url();
    drop(server);
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let dispatcher = Dispatcher::with_service(
        HttpBackend::new(&ClientConfig {
            base_url: addr,
            connect_timeout_seconds: 1,
            timeout_seconds: 2,
        })
        .unwrap(),
    );
    let app = DemoApp::new(dispatcher);

    let result = app.fetch_hello().await.unwrap();

    assert!(!result.is_success());
    assert_eq!(app.hello().status(), Status::Error);
    assert!(!app.hello().error().is_empty());
}

#[tokio::test]
async fn commands_drive_counter_and_requests() {
    let server = TestServer::start().await;
    let app = app_against(&server);

    for command in ["+", "+", "-", "+"] {
        app.handle(Command::parse(command).unwrap()).await.unwrap();
    }
    assert_eq!(app.counter().count, 2);

    let (flow, output) = app
        .handle(Command::parse("encode hi").unwrap())
        .await
        .unwrap();
    assert_eq!(flow, Flow::Continue);
    assert!(output.unwrap().contains("aGk="));

    app.handle(Command::Reset).await.unwrap();
    assert_eq!(app.counter().count, 0);

    let (flow, _) = app.handle(Command::Quit).await.unwrap();
    assert_eq!(flow, Flow::Quit);
}

#[tokio::test]
async fn remote_commands_before_install_fail() {
    let app: DemoApp<HttpBackend> = DemoApp::new(Dispatcher::new());

    let err = app.handle(Command::Hello).await.unwrap_err();

    assert_eq!(err, DispatchError::NotInitialized);
    // Local state still works without a backend.
    app.handle(Command::Increment).await.unwrap();
    assert_eq!(app.counter().count, 1);
}

#[tokio::test]
async fn renderer_shows_loading_while_request_is_in_flight() {
    let service = ScriptedService::new();
    service.respond_hello(hello("rendered"), 50);
    let app = DemoApp::new(Dispatcher::with_service(service));

    let (tx, mut frames) = mpsc::unbounded_channel();
    let renderer = render_on_change(&app, move |frame| {
        let _ = tx.send(frame);
    });

    let background = {
        let app = app.clone();
        tokio::spawn(async move { app.handle(Command::Hello).await })
    };

    let first = tokio::time::timeout(Duration::from_secs(1), frames.recv())
        .await
        .unwrap()
        .unwrap();
    assert!(first.contains("Hello [loading]"), "got {}", first);
    assert!(!background.is_finished());

    let last = tokio::time::timeout(Duration::from_secs(1), frames.recv())
        .await
        .unwrap()
        .unwrap();
    assert!(last.contains("Hello [success]: rendered"), "got {}", last);

    background.await.unwrap().unwrap();
    renderer.abort();
}

#[tokio::test]
async fn clones_share_counter() {
    let app: DemoApp<ScriptedService> = DemoApp::new(Dispatcher::new());
    let other = app.clone();

    other.handle(Command::Increment).await.unwrap();

    assert_eq!(app.counter().count, 1);
}
