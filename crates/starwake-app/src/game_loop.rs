//! Game loop: a `Session` ticked either on its own thread at the physics
//! rate or synchronously for headless runs.
//!
//! The session is built by the caller so setup errors surface before any
//! thread starts. Commands arrive via `mpsc` channel; the latest snapshot
//! is stored in shared state for polling.

use std::io::Write;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use starwake_core::config::GameConfig;
use starwake_core::state::FrameSnapshot;
use starwake_scene::FrameRecorder;
use starwake_sim::input::{InputState, KeyBindings};
use starwake_sim::{world_setup, Engine};

use crate::error::AppError;
use crate::script::Script;
use crate::state::{LoopCommand, LoopHandle, SharedSnapshot};
use crate::stats::FrameStats;

/// One running sandbox: engine, input state, renderer and frame timing.
pub struct Session {
    engine: Engine,
    bindings: KeyBindings,
    input: InputState,
    recorder: FrameRecorder,
    stats: FrameStats,
}

impl Session {
    /// Build the engine and populate the sandbox.
    pub fn new(config: GameConfig) -> Result<Self, AppError> {
        let mut engine = Engine::new(config)?;
        world_setup::setup_sandbox(&mut engine)?;
        Ok(Self {
            engine,
            bindings: KeyBindings::default(),
            input: InputState::new(),
            recorder: FrameRecorder::new(),
            stats: FrameStats::new(),
        })
    }

    /// Apply a loop command. Returns false when the loop should stop.
    pub fn handle(&mut self, command: LoopCommand) -> bool {
        match command {
            LoopCommand::Key(event) => self.input.handle(&self.bindings, &event),
            LoopCommand::Player(command) => self.engine.queue_command(command),
            LoopCommand::Pause => self.engine.pause(),
            LoopCommand::Resume => self.engine.resume(),
            LoopCommand::Shutdown => return false,
        }
        true
    }

    /// Run one frame: held-key commands, engine update, render.
    pub fn tick(&mut self, elapsed_secs: f64) -> FrameSnapshot {
        self.stats.begin();
        self.engine.queue_commands(self.input.commands());
        let snapshot = self.engine.update(elapsed_secs);
        self.engine.render(&mut self.recorder);
        self.stats.end();
        snapshot
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn recorder(&self) -> &FrameRecorder {
        &self.recorder
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn into_stats(self) -> FrameStats {
        self.stats
    }

    fn fixed_step(&self) -> f64 {
        self.engine.config().physics.fixed_step
    }
}

/// Run `ticks` frames of fixed length, replaying `script`.
///
/// Every `snapshot_every` ticks (if set) the snapshot is written to `out`
/// as one JSON line. Returns the final snapshot.
pub fn run_headless(
    session: &mut Session,
    ticks: u64,
    script: &Script,
    snapshot_every: Option<u64>,
    out: &mut impl Write,
) -> Result<FrameSnapshot, AppError> {
    let step = session.fixed_step();
    let mut snapshot = FrameSnapshot::default();

    for tick in 0..ticks {
        let events: Vec<_> = script.events_at(tick).cloned().collect();
        for event in events {
            session.handle(LoopCommand::Key(event));
        }

        snapshot = session.tick(step);

        if let Some(every) = snapshot_every.filter(|n| *n > 0) {
            if tick % every == 0 {
                serde_json::to_writer(&mut *out, &snapshot).map_err(std::io::Error::from)?;
                writeln!(out)?;
            }
        }
    }

    info!("headless run finished: {}", session.stats().summary());
    Ok(snapshot)
}

/// Spawns the game loop in a new thread.
///
/// Returns the handle used to send commands, poll snapshots and shut down.
pub fn spawn_game_loop(session: Session) -> Result<LoopHandle, AppError> {
    let (command_tx, command_rx) = mpsc::channel::<LoopCommand>();
    let latest_snapshot: SharedSnapshot = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_snapshot);

    let thread = std::thread::Builder::new()
        .name("starwake-game-loop".into())
        .spawn(move || run_game_loop(session, command_rx, &shared))?;

    Ok(LoopHandle {
        command_tx,
        latest_snapshot,
        thread,
    })
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut session: Session,
    command_rx: mpsc::Receiver<LoopCommand>,
    latest_snapshot: &Mutex<Option<FrameSnapshot>>,
) -> FrameStats {
    let tick_duration = Duration::from_secs_f64(session.fixed_step());
    let mut last_tick = Instant::now();
    let mut next_tick_time = last_tick;
    info!("game loop started at {:.1} Hz", 1.0 / session.fixed_step());

    'frames: loop {
        // 1. Drain all pending commands
        loop {
            match command_rx.try_recv() {
                Ok(command) => {
                    if !session.handle(command) {
                        break 'frames;
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    debug!("command channel closed");
                    break 'frames;
                }
            }
        }

        // 2. Advance by the real time since the last frame
        let now = Instant::now();
        let elapsed = now.duration_since(last_tick).as_secs_f64();
        last_tick = now;
        let snapshot = session.tick(elapsed);

        // 3. Store latest snapshot for polling
        match latest_snapshot.lock() {
            Ok(mut lock) => *lock = Some(snapshot),
            Err(_) => warn!("snapshot lock poisoned"),
        }

        // 4. Sleep until the next tick
        next_tick_time += tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick_duration * 2 {
            // Too far behind: reset instead of racing to catch up.
            next_tick_time = now;
        }
    }

    info!("game loop stopped: {}", session.stats().summary());
    session.into_stats()
}
