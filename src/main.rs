//! Mini Tetris runner (default binary).
//!
//! Runs one game on the real-time driver and writes a JSON snapshot line to
//! stdout after every state change. Input comes from stdin: protocol lines
//! when stdin is piped, raw keyboard events (via crossterm) when it is a
//! terminal.

mod logger;

use std::io::IsTerminal;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::terminal;
use log::{info, warn};
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use mini_tetris::core::GameSnapshot;
use mini_tetris::driver::{
    encode, spawn_line_reader, Driver, DriverConfig, HostEvent, OutboundMessage,
};
use mini_tetris::input::{handle_key_event, should_quit};

use logger::StderrLogger;

/// Poll timeout for keyboard events, so the reader notices a stopped driver.
const KEY_POLL: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<()> {
    let config = DriverConfig::from_env();
    let interactive = std::io::stdin().is_terminal();
    let line_end = if interactive { "\r\n" } else { "\n" };

    StderrLogger::init(config.log_level, line_end).context("installing logger")?;

    if interactive {
        terminal::enable_raw_mode().context("enabling raw mode")?;
    }
    let result = run(config, interactive, line_end).await;

    // Always try to restore terminal state.
    if interactive {
        let _ = terminal::disable_raw_mode();
    }
    result
}

async fn run(config: DriverConfig, interactive: bool, line_end: &'static str) -> Result<()> {
    info!("starting with seed {}", config.seed);

    let (out_tx, out_rx) = mpsc::unbounded_channel::<OutboundMessage>();
    let writer = tokio::spawn(write_messages(out_rx, line_end));

    let (driver, tx) = Driver::new(config);
    let paused = Arc::new(AtomicBool::new(false));

    let input = if interactive {
        spawn_keyboard_reader(tx, Arc::clone(&paused))
    } else {
        let errors = out_tx.clone();
        spawn_line_reader(BufReader::new(tokio::io::stdin()), tx, move |_, err| {
            let _ = errors.send(OutboundMessage::error(err.to_string()));
        })
    };

    let observer_tx = out_tx.clone();
    let final_state = driver
        .run(move |snapshot: &GameSnapshot| {
            paused.store(snapshot.paused, Ordering::Relaxed);
            let _ = observer_tx.send(OutboundMessage::Snapshot(*snapshot));
        })
        .await;

    input.abort();
    drop(out_tx);
    writer.await.context("joining output writer")??;

    info!(
        "final score {} (lines {}, level {})",
        final_state.score(),
        final_state.lines(),
        final_state.level()
    );
    Ok(())
}

async fn write_messages(
    mut rx: mpsc::UnboundedReceiver<OutboundMessage>,
    line_end: &'static str,
) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    while let Some(message) = rx.recv().await {
        let line = encode(&message).context("encoding outbound message")?;
        stdout.write_all(line.as_bytes()).await?;
        stdout.write_all(line_end.as_bytes()).await?;
        stdout.flush().await?;
    }
    Ok(())
}

/// Read raw key events on a blocking thread and forward mapped actions.
fn spawn_keyboard_reader(tx: mpsc::Sender<HostEvent>, paused: Arc<AtomicBool>) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        if let Err(err) = read_keys(&tx, &paused) {
            warn!("keyboard input failed: {err:#}");
        }
        let _ = tx.blocking_send(HostEvent::Quit);
    })
}

fn read_keys(tx: &mpsc::Sender<HostEvent>, paused: &AtomicBool) -> Result<()> {
    while !tx.is_closed() {
        if !event::poll(KEY_POLL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if should_quit(key) {
            return Ok(());
        }
        if let Some(action) = handle_key_event(key, paused.load(Ordering::Relaxed)) {
            tx.blocking_send(action.into()).context("driver stopped")?;
        }
    }
    Ok(())
}
