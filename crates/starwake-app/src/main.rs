use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::{error, info};

use starwake_app::error::AppError;
use starwake_app::game_loop::{self, Session};
use starwake_app::script::Script;
use starwake_app::state::LoopCommand;
use starwake_core::config::GameConfig;

#[derive(Parser)]
#[command(version, about = "STARWAKE: a 2D space-combat physics sandbox")]
struct Cli {
    /// JSON config file. Missing fields keep their defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of frames to run.
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// JSON key-event script keyed by tick.
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Override the config seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Write a JSON snapshot line to stdout every N frames.
    #[arg(long, value_name = "N")]
    snapshot_every: Option<u64>,

    /// Run the threaded loop against the wall clock instead of stepping headless.
    #[arg(long)]
    realtime: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    let script = match &cli.script {
        Some(path) => Script::load(path)?,
        None => Script::default(),
    };
    info!(
        "starting: seed={} ticks={} script events={}",
        config.seed,
        cli.ticks,
        script.len()
    );

    let step = Duration::from_secs_f64(config.physics.fixed_step);
    let mut session = Session::new(config)?;

    if !cli.realtime {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        let last = game_loop::run_headless(&mut session, cli.ticks, &script, cli.snapshot_every, &mut out)?;
        out.flush()?;
        info!(
            "finished at t={:.2}s with {} entities",
            last.time.elapsed_secs,
            last.entities.len()
        );
        return Ok(());
    }

    let handle = game_loop::spawn_game_loop(session)?;
    for tick in 0..cli.ticks {
        for event in script.events_at(tick) {
            handle.send(LoopCommand::Key(event.clone()));
        }
        std::thread::sleep(step);
    }

    if let (Some(every), Some(snapshot)) = (cli.snapshot_every, handle.latest_snapshot()) {
        if every > 0 {
            println!("{}", serde_json::to_string(&snapshot).map_err(io::Error::from)?);
        }
    }
    let stats = handle.shutdown()?;
    info!("realtime run finished: {}", stats.summary());
    Ok(())
}
