mod cli;
mod repl;
mod storage;
mod terminal;
mod transport;

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Once;

use chatdock_core::dispatch::ReplyKind;
use chatdock_core::{BotPayload, ChatWidget, PAGE_MARKER, Viewport, WidgetConfig};
use clap::Parser;
use cli::{Cli, Command};
use storage::FileStorage;
use terminal::{TerminalLog, TerminalSurface, markup_to_text};
use tokio::io::AsyncReadExt;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use transport::ReqwestTransport;

/// Config file picked up when `--config` is not given
const DEFAULT_CONFIG_PATH: &str = "config/chatdock.toml";
const DEFAULT_STATE_FILE: &str = "config/chatdock-state.json";
const ENDPOINT_ENV: &str = "CHATDOCK_ENDPOINT";

pub(crate) type TerminalWidget = ChatWidget<TerminalSurface, TerminalLog, FileStorage, ()>;

static ENV_LOADER: Once = Once::new();

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    ensure_env_loaded();
    let cli = Cli::parse();
    debug!(command = ?cli.command, config = ?cli.config, "CLI arguments parsed");

    match &cli.command {
        Command::Render { file } => render(file.as_deref()).await,
        Command::Send { message } => {
            let text = load_message(message).await?;
            let transport = ReqwestTransport::new(cli.base_url.clone());
            let mut widget = mount(&cli, false)?;
            let kind = widget.send(&text, &transport).await;
            let reply = widget
                .transcript()
                .log()
                .last_bot_text()
                .unwrap_or_default()
                .to_string();
            println!("{reply}");
            match kind {
                Some(ReplyKind::Rendered { shape }) => {
                    info!(shape, "Reply rendered");
                    Ok(())
                }
                Some(ReplyKind::ServerError { status }) => {
                    Err(format!("chat endpoint answered with status {status}").into())
                }
                Some(ReplyKind::NetworkError) => Err("chat endpoint unreachable".into()),
                None => Err("message is empty".into()),
            }
        }
        Command::Repl => {
            let transport = ReqwestTransport::new(cli.base_url.clone());
            let mut widget = mount(&cli, true)?;
            repl::run(&mut widget, &transport).await
        }
    }
}

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .init();
    });
}

/// Loads environment variables from config/.env once.
fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        let _ = dotenvy::from_filename("config/.env");
    });
}

/// Resolve configuration: file, then `CHATDOCK_ENDPOINT`, then `--endpoint`.
fn load_config(cli: &Cli) -> Result<WidgetConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            info!(path = %path.display(), "Loading widget configuration");
            WidgetConfig::load(path)?
        }
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            WidgetConfig::load(Path::new(DEFAULT_CONFIG_PATH))?
        }
        None => {
            debug!("No configuration file, using defaults");
            WidgetConfig::default()
        }
    };

    if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
        debug!(endpoint = %endpoint, "Endpoint overridden from environment");
        config = config.with_endpoint(endpoint);
    }
    if let Some(endpoint) = &cli.endpoint {
        config = config.with_endpoint(endpoint.clone());
    }
    Ok(config.validate()?)
}

fn mount(cli: &Cli, echo: bool) -> Result<TerminalWidget, Box<dyn Error>> {
    let config = load_config(cli)?;
    let state_file = cli
        .state_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE));
    debug!(path = %state_file.display(), "Using panel state file");

    let surface = TerminalSurface::new(Viewport::new(cli.viewport_width, cli.viewport_height));
    let widget = ChatWidget::init(
        &PAGE_MARKER,
        config,
        surface,
        TerminalLog::new(echo),
        FileStorage::new(state_file),
    )
    .ok_or("chat widget already initialised")?;
    Ok(widget)
}

async fn load_message(words: &[String]) -> Result<String, Box<dyn Error>> {
    if !words.is_empty() {
        return Ok(words.join(" "));
    }
    info!("Reading message from standard input");
    let mut buffer = String::new();
    tokio::io::stdin().read_to_string(&mut buffer).await?;
    Ok(buffer)
}

async fn render(file: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let body = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            tokio::io::stdin().read_to_string(&mut buffer).await?;
            buffer
        }
    };
    let payload = BotPayload::parse(&body);
    if matches!(payload, BotPayload::Fallback { raw: None }) {
        warn!("Payload matched no reply shape, showing the fallback text");
    }
    info!(shape = payload.kind(), "Rendering payload");
    println!("{}", markup_to_text(&payload.to_markup()));
    Ok(())
}
