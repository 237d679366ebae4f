use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use apidemo::action::Dispatcher;
use apidemo::config::Config;
use apidemo::logging;
use apidemo::server::AppServer;
use apidemo::service::HttpBackend;
use apidemo::action::ActionResult;
use apidemo::ui::{render_on_change, watch_status, Command, DemoApp, Flow, HELP};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Parser)]
#[command(name = "apidemo", version, about = "Demo backend and reactive client")]
struct Cli {
    /// Config file (default: ~/.config/apidemo/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL for client commands
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Run the HTTP backend
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
        /// Interface to listen on
        #[arg(long)]
        host: Option<String>,
    },
    /// Fetch the greeting
    Hello,
    /// Base64-encode TEXT on the backend
    Encode { text: String },
    /// Interactive counter/hello/encode session
    Interactive,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_tracing();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.client.base_url = url;
        config.validate()?;
    }

    match cli.command {
        CliCommand::Serve { port, host } => serve(config, port, host).await,
        CliCommand::Hello => {
            let app = client_app(&config)?;
            let result = app.fetch_hello().await?;
            println!("{}", app.render());
            Ok(exit_code(result))
        }
        CliCommand::Encode { text } => {
            let app = client_app(&config)?;
            let result = app.encode(&text).await?;
            println!("{}", app.render());
            Ok(exit_code(result))
        }
        CliCommand::Interactive => interactive(&config).await,
    }
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    let path = path.map(PathBuf::from).unwrap_or_else(Config::config_path);
    let config = Config::load_from(&path)
        .and_then(Config::with_process_env)
        .with_context(|| format!("loading configuration from {}", path.display()))?;
    Ok(config)
}

async fn serve(mut config: Config, port: Option<u16>, host: Option<String>) -> anyhow::Result<ExitCode> {
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(host) = host {
        config.server.host = host;
    }

    let server = match AppServer::bind_or_exit(&config.server).await {
        Ok(server) => server,
        Err(code) => return Ok(code),
    };

    server.run().await?;
    Ok(ExitCode::SUCCESS)
}

/// Compose the front end: the dispatcher is handed to the app first and
/// the HTTP service installed afterwards.
fn client_app(config: &Config) -> anyhow::Result<DemoApp<HttpBackend>> {
    let dispatcher = Dispatcher::new();
    let app = DemoApp::new(dispatcher.clone());
    dispatcher.install(HttpBackend::new(&config.client)?)?;
    tracing::debug!(base_url = %config.client.base_url, "Client ready");
    Ok(app)
}

async fn interactive(config: &Config) -> anyhow::Result<ExitCode> {
    let app = client_app(config)?;
    let _hello_watch = watch_status("hello", app.hello());
    let _encode_watch = watch_status("base64", app.encoded());
    // Remote commands run on their own task; the renderer prints progress.
    let renderer = render_on_change(&app, |frame| println!("\n{}", frame));

    println!("{}", HELP);
    println!("{}", app.render());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        if command.is_remote() {
            let app = app.clone();
            tokio::spawn(async move {
                if let Err(e) = app.handle(command).await {
                    tracing::error!(error = %e, "Command failed");
                }
            });
            continue;
        }

        let (flow, output) = app.handle(command).await?;
        if let Some(output) = output {
            println!("{}", output);
        }
        if flow == Flow::Quit {
            break;
        }
    }

    renderer.abort();
    Ok(ExitCode::SUCCESS)
}

fn exit_code<T>(result: ActionResult<T>) -> ExitCode {
    match result.into_result() {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::debug!(%error, "Request failed");
            ExitCode::FAILURE
        }
    }
}
