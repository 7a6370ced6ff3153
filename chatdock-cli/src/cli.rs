use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "chatdock",
    version,
    about = "Terminal harness for the chatdock chat overlay"
)]
pub struct Cli {
    /// Widget configuration file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Chat endpoint; overrides the config file and CHATDOCK_ENDPOINT
    #[arg(long)]
    pub endpoint: Option<String>,
    /// Origin that relative endpoints are resolved against
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    pub base_url: String,
    /// File holding the persisted panel state
    #[arg(long)]
    pub state_file: Option<PathBuf>,
    #[arg(long, default_value_t = 1280.0)]
    pub viewport_width: f64,
    #[arg(long, default_value_t = 800.0)]
    pub viewport_height: f64,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Send one message and print the rendered reply
    Send {
        /// Message text; read from stdin when omitted
        message: Vec<String>,
    },
    /// Interactive session (type /help for commands)
    Repl,
    /// Render a bot reply body offline, from a file or stdin
    Render { file: Option<PathBuf> },
}
