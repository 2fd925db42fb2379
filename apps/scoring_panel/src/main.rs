mod config;
mod input;
mod terminal;

use std::{io::BufRead, path::PathBuf, thread, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    finish_transport, resolve_identity, session_queue, station_websocket_url, ScoringSession,
    SessionEvent, WebSocketConfig, WebSocketTransport,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    input::{parse_line, OperatorInput, HELP},
    terminal::TerminalRenderer,
};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

#[derive(Parser, Debug)]
#[command(about = "Alliance station scoring panel")]
struct Args {
    /// Arena base url, e.g. http://10.0.100.5:8080
    #[arg(long)]
    server_url: Option<String>,
    /// Station token (red_near, blue_far, ...) or the full panel url.
    #[arg(long)]
    position: Option<String>,
    /// Config file; defaults to ./scoring_panel.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    reconnect_delay_ms: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = config::load_settings(args.config.as_deref())?;
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if let Some(position) = args.position {
        settings.launch_context = Some(position);
    }
    if let Some(delay) = args.reconnect_delay_ms {
        settings.reconnect_delay_ms = delay;
    }

    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .init();

    let launch_context = settings
        .launch_context
        .as_deref()
        .context("no station given; pass --position red_near (or set SCORING_POSITION)")?;
    let station = resolve_identity(launch_context)
        .with_context(|| format!("cannot start a scoring panel for '{launch_context}'"))?;
    let url = station_websocket_url(&settings.server_url, &station)
        .context("invalid arena server url")?;
    info!(%url, station = %station, "scoring: starting panel");

    let (events_tx, events_rx) = session_queue();
    let ws_config = WebSocketConfig::new(url)
        .with_reconnect_delay(Duration::from_millis(settings.reconnect_delay_ms));
    let (transport, transport_task) = WebSocketTransport::spawn(ws_config, events_tx.clone());

    spawn_operator_input(events_tx.clone());
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = events_tx.send(SessionEvent::Shutdown).await;
        }
    });

    println!("{HELP}");
    let session = ScoringSession::new(station, transport, TerminalRenderer::stdout(station));
    let session = session.run(events_rx).await;

    // dropping the session closes the outbound queue so the task can flush it
    drop(session);
    finish_transport(transport_task, SHUTDOWN_GRACE).await;
    Ok(())
}

/// Reads operator commands on a plain thread so a pending stdin read never
/// holds up runtime shutdown.
fn spawn_operator_input(events: mpsc::Sender<SessionEvent>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    warn!("scoring: stdin read failed: {err}");
                    break;
                }
            };
            let event = match parse_line(&line) {
                Ok(OperatorInput::Action(action)) => SessionEvent::User(action),
                Ok(OperatorInput::Quit) => break,
                Ok(OperatorInput::Help) => {
                    println!("{HELP}");
                    continue;
                }
                Ok(OperatorInput::Ignored(reason)) => {
                    debug!("scoring: ignored input: {reason}");
                    continue;
                }
                Ok(OperatorInput::Empty) => continue,
                Err(err) => {
                    eprintln!("{err}");
                    continue;
                }
            };
            if events.blocking_send(event).is_err() {
                return;
            }
        }
        let _ = events.blocking_send(SessionEvent::Shutdown);
    });
}
