//! Interactive session over stdin

use std::error::Error;

use chatdock_core::{ChatTransport, PointerInput, Viewport};
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::TerminalWidget;

const HELP: &str = "\
Commands:
  /open, /close, /toggle   show or hide the panel
  /move X Y                place the panel's top-left corner
  /drag DX DY              drag the header by a pointer delta
  /resize DW DH            drag the resize handle by a pointer delta
  /viewport W H            simulate a browser window resize
  /state                   print the persisted panel state
  /quit                    leave
Anything else is sent as a chat message.";

#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Help,
    Open,
    Close,
    Toggle,
    Move(f64, f64),
    Drag(f64, f64),
    Resize(f64, f64),
    Viewport(f64, f64),
    State,
    Quit,
    Message(String),
    Empty,
}

/// Interpret one input line.
pub fn parse_line(line: &str) -> Result<ReplCommand, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(ReplCommand::Empty);
    }
    let Some(command) = trimmed.strip_prefix('/') else {
        return Ok(ReplCommand::Message(trimmed.to_string()));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();
    let pair = || -> Result<(f64, f64), String> {
        match args.as_slice() {
            [a, b] => Ok((number(a)?, number(b)?)),
            _ => Err(format!("/{name} takes two numbers")),
        }
    };

    match name {
        "help" => Ok(ReplCommand::Help),
        "open" => Ok(ReplCommand::Open),
        "close" => Ok(ReplCommand::Close),
        "toggle" => Ok(ReplCommand::Toggle),
        "move" => pair().map(|(x, y)| ReplCommand::Move(x, y)),
        "drag" => pair().map(|(x, y)| ReplCommand::Drag(x, y)),
        "resize" => pair().map(|(x, y)| ReplCommand::Resize(x, y)),
        "viewport" => pair().map(|(w, h)| ReplCommand::Viewport(w, h)),
        "state" => Ok(ReplCommand::State),
        "quit" | "exit" => Ok(ReplCommand::Quit),
        other => Err(format!("unknown command /{other}, try /help")),
    }
}

fn number(raw: &str) -> Result<f64, String> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("'{raw}' is not a number"))
}

pub async fn run<T>(widget: &mut TerminalWidget, transport: &T) -> Result<(), Box<dyn Error>>
where
    T: ChatTransport + ?Sized,
{
    info!("Entering interactive mode");
    println!("{}", widget.surface().status_line());
    println!("Type /help for commands.");

    let mut lines = BufReader::new(io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };
        debug!(?command, "REPL command");

        match command {
            ReplCommand::Empty => continue,
            ReplCommand::Quit => break,
            ReplCommand::Help => println!("{HELP}"),
            ReplCommand::Open => widget.open(),
            ReplCommand::Close => widget.close(),
            ReplCommand::Toggle => widget.toggle(),
            ReplCommand::Move(x, y) => {
                widget.set_position(x, y);
            }
            ReplCommand::Drag(dx, dy) => {
                widget.drag_start(&PointerInput::mouse(0.0, 0.0), ());
                widget.drag_move(&PointerInput::mouse(dx, dy));
                widget.drag_end();
            }
            ReplCommand::Resize(dw, dh) => {
                widget.resize_start(&PointerInput::mouse(0.0, 0.0), ());
                if widget.resize_move(&PointerInput::mouse(dw, dh)) {
                    widget.flush_restick();
                }
                widget.resize_end();
            }
            ReplCommand::Viewport(width, height) => {
                widget
                    .surface_mut()
                    .set_viewport(Viewport::new(width, height));
                widget.on_viewport_resize();
            }
            ReplCommand::State => {
                println!("{}", serde_json::to_string_pretty(widget.state())?);
                continue;
            }
            ReplCommand::Message(text) => {
                widget.send(&text, transport).await;
                continue;
            }
        }
        println!("{}", widget.surface().status_line());
    }

    info!("Interactive mode finished");
    Ok(())
}
