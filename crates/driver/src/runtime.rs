//! Driver runtime.
//!
//! One task owns the [`GameState`] and applies actions strictly one at a time.
//! Host events arrive over an mpsc channel; gravity comes from a
//! `tokio::time::interval` at the current level's drop speed. Both feed the
//! same reducer from inside a single `select!` loop, so no locking is needed.

use std::time::Duration;

use log::{debug, info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use mini_tetris_core::{GameSnapshot, GameState};
use mini_tetris_input::{classify, Gesture, GesturePlan};

use crate::clock::GravityClock;
use crate::config::DriverConfig;
use crate::protocol::{parse_bytes, HostEvent, LineError};
use crate::types::GameAction;

/// Running game driver.
pub struct Driver {
    state: GameState,
    config: DriverConfig,
    clock: GravityClock,
    rx: mpsc::Receiver<HostEvent>,
    /// Used for delayed gesture steps; weak so the loop ends once the host
    /// drops its senders.
    tx: mpsc::WeakSender<HostEvent>,
    gestures: Vec<JoinHandle<()>>,
    /// Set when the tick interval must be rebuilt.
    rearm: bool,
}

impl Driver {
    /// Create a driver and the sender the host uses to feed it.
    pub fn new(config: DriverConfig) -> (Self, mpsc::Sender<HostEvent>) {
        let (tx, rx) = mpsc::channel::<HostEvent>(config.max_pending.max(1));
        let state = GameState::new(config.seed);
        let driver = Self {
            clock: GravityClock::new(state.level()),
            state,
            config,
            rx,
            tx: tx.downgrade(),
            gestures: Vec::new(),
            rearm: false,
        };
        (driver, tx)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn clock(&self) -> &GravityClock {
        &self.clock
    }

    /// Apply one action and bring the gravity clock in line with the result.
    pub fn dispatch(&mut self, action: GameAction) -> bool {
        let changed = self.state.apply_action(action);
        if action == GameAction::Restart {
            // The new game waits a full interval for its first tick.
            self.cancel_gestures();
            self.clock.reset();
            self.rearm = true;
        }
        self.sync_clock();
        changed
    }

    /// Handle one host event. Returns true if the game state changed.
    pub fn handle_event(&mut self, event: HostEvent) -> bool {
        match event {
            HostEvent::Action { action } => self.dispatch(action),
            HostEvent::Tap => self.run_plan(Gesture::Tap.plan(self.config.gesture.step_ms)),
            HostEvent::Swipe {
                dx,
                dy,
                duration_ms,
            } => {
                let gesture = classify(dx, dy, duration_ms, &self.config.gesture);
                debug!("swipe ({dx}, {dy}) in {duration_ms}ms -> {gesture:?}");
                self.run_plan(gesture.plan(self.config.gesture.step_ms))
            }
            HostEvent::Quit => false,
        }
    }

    /// Run until the host quits or drops every sender.
    ///
    /// `observer` sees the initial snapshot and one after every change.
    pub async fn run<F>(mut self, mut observer: F) -> GameState
    where
        F: FnMut(&GameSnapshot),
    {
        let mut ticker = self.ticker();
        let mut snapshot = self.state.snapshot();
        observer(&snapshot);

        loop {
            let changed = tokio::select! {
                event = self.rx.recv() => match event {
                    None | Some(HostEvent::Quit) => break,
                    Some(event) => self.handle_event(event),
                },
                _ = ticker.tick(), if self.gravity_active() => {
                    self.dispatch(GameAction::Tick)
                }
            };

            if self.rearm {
                ticker = self.ticker();
                self.rearm = false;
            }
            if changed {
                self.state.snapshot_into(&mut snapshot);
                observer(&snapshot);
                // Lock events are reported once.
                self.state.take_last_event();
            }
        }

        self.cancel_gestures();
        info!("driver stopped (score {})", self.state.score());
        self.state
    }

    fn gravity_active(&self) -> bool {
        !self.config.disable_gravity && self.clock.is_running() && !self.state.game_over()
    }

    /// Fresh interval whose first tick is one full period away.
    fn ticker(&self) -> Interval {
        let period = Duration::from_millis(self.clock.interval_ms() as u64);
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    }

    fn sync_clock(&mut self) {
        if self.state.paused() {
            self.clock.pause();
        } else if self.clock.resume() {
            self.rearm = true;
        }
        if self.clock.set_level(self.state.level()) {
            debug!("gravity interval now {}ms", self.clock.interval_ms());
            self.rearm = true;
        }
    }

    /// Apply the immediate steps of a plan now and schedule the rest.
    fn run_plan(&mut self, plan: GesturePlan) -> bool {
        let mut changed = false;
        let mut delayed = Vec::new();
        for step in plan {
            if step.delay_ms == 0 {
                changed |= self.dispatch(step.action);
            } else {
                delayed.push(step);
            }
        }
        if delayed.is_empty() {
            return changed;
        }

        let Some(tx) = self.tx.upgrade() else {
            return changed;
        };
        self.gestures.retain(|handle| !handle.is_finished());
        let start = Instant::now();
        self.gestures.push(tokio::spawn(async move {
            for step in delayed {
                time::sleep_until(start + Duration::from_millis(step.delay_ms)).await;
                if tx.send(HostEvent::from(step.action)).await.is_err() {
                    break;
                }
            }
        }));
        changed
    }

    fn cancel_gestures(&mut self) {
        for handle in self.gestures.drain(..) {
            handle.abort();
        }
    }
}

/// Spawn a task that reads protocol lines from `reader` and forwards them.
///
/// Lines that are not UTF-8 or fail to parse are reported through `on_error`
/// and skipped. The task ends at end of input, on a read error, or after
/// forwarding `quit`.
pub fn spawn_line_reader<R, E>(
    mut reader: R,
    tx: mpsc::Sender<HostEvent>,
    mut on_error: E,
) -> JoinHandle<()>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    E: FnMut(&str, LineError) + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {}
                Err(err) => {
                    warn!("host input failed: {err}");
                    break;
                }
            }
            if buf.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            match parse_bytes(&buf) {
                Ok(event) => {
                    let quit = event == HostEvent::Quit;
                    if tx.send(event).await.is_err() || quit {
                        break;
                    }
                }
                Err(err) => {
                    let line = String::from_utf8_lossy(&buf);
                    let line = line.trim();
                    warn!("rejected host input {line:?}: {err}");
                    on_error(line, err);
                }
            }
        }
    })
}
