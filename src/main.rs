//! Headless simulator (default binary).
//!
//! Runs a session frame by frame and prints observations as JSON lines on
//! stdout. Logs go to stderr (`RUST_LOG=blockshot_core=debug` for placement
//! and clearing events), as does the optional `--render` grid dump.
//!
//! Input comes from a command script (JSON lines, see
//! [`blockshot::adapter::protocol`]) and/or the built-in autopilot.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use blockshot::adapter::{apply_command, parse_command_line, CommandMessage, ErrorMessage};
use blockshot::adapter::ObservationMessage;
use blockshot::core::{GameConfig, GameSession};
use blockshot::types::{GameIntent, PolicyKind};

#[derive(Parser, Debug)]
#[command(name = "blockshot-sim")]
#[command(about = "Run a headless blockshot session and stream JSON observations")]
struct Args {
    /// RNG seed
    #[arg(long, default_value_t = 1)]
    seed: u32,

    /// Frames to simulate (stops early on game over)
    #[arg(long, default_value_t = 3600)]
    frames: u64,

    /// Placement policy (overrides the config file)
    #[arg(long, value_parser = parse_policy)]
    policy: Option<PolicyKind>,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Command script: one JSON command per line. A command's `frame` is the
    /// simulator step it runs before; commands without one run on the step
    /// matching their line number.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Steer under the lowest piece and fire periodically
    #[arg(long)]
    autopilot: bool,

    /// Autopilot fire cadence in frames
    #[arg(long, default_value_t = 10)]
    fire_every: u64,

    /// Emit an observation every N frames (0 = only the final one)
    #[arg(long, default_value_t = 60)]
    every: u64,

    /// Dump the grid as ASCII to stderr with each observation
    #[arg(long)]
    render: bool,
}

fn parse_policy(s: &str) -> Result<PolicyKind, String> {
    PolicyKind::from_str(s).ok_or_else(|| {
        let names: Vec<_> = PolicyKind::ALL.iter().map(|p| p.as_str()).collect();
        format!("unknown policy {s:?} (expected one of {})", names.join(", "))
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(policy) = args.policy {
        config.policy = policy;
    }
    let mut session = GameSession::new(config, args.seed).context("invalid configuration")?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let mut script = match &args.script {
        Some(path) => load_script(path, &mut out)?,
        None => BTreeMap::new(),
    };

    info!(
        seed = args.seed,
        policy = session.config().policy.as_str(),
        frames = args.frames,
        "simulation started"
    );

    let mut seq = 0u64;
    let mut last_emitted = None;
    for step in 0..args.frames {
        advance(&mut session, &mut script, step, &args);

        if args.every > 0 && (step + 1) % args.every == 0 {
            emit(&mut out, &mut seq, &session, args.render)?;
            last_emitted = Some((session.episode_id(), session.frame()));
        }
        if finished(&session, &script, args.frames) {
            break;
        }
    }
    // The final state is always reported, once.
    if last_emitted != Some((session.episode_id(), session.frame())) {
        emit(&mut out, &mut seq, &session, args.render)?;
    }
    out.flush()?;

    info!(
        score = session.score(),
        lines = session.lines(),
        frame = session.frame(),
        game_over = session.game_over(),
        "simulation finished"
    );
    Ok(())
}

/// Scripted commands keyed by the step each batch runs before
type Script = BTreeMap<u64, Vec<CommandMessage>>;

/// Read a command script.
///
/// Malformed lines are reported as protocol error messages and skipped.
fn load_script(path: &Path, out: &mut impl Write) -> Result<Script> {
    let file = File::open(path).with_context(|| format!("opening script {}", path.display()))?;
    let mut script = Script::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("reading script {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_command_line(&line) {
            Ok(command) => {
                let step = command.frame.unwrap_or(index as u64);
                script.entry(step).or_default().push(command);
            }
            Err(err) => {
                warn!(line = index + 1, code = ?err.code(), "skipping script line: {err}");
                let mut message = ErrorMessage::from(&err);
                message.seq = index as u64 + 1;
                serde_json::to_writer(&mut *out, &message)?;
                writeln!(out)?;
            }
        }
    }
    Ok(script)
}

/// Run the commands due before `step`, steer, then advance one frame.
fn advance(session: &mut GameSession, script: &mut Script, step: u64, args: &Args) {
    if let Some(commands) = script.remove(&step) {
        for command in &commands {
            apply_command(session, command);
        }
    }
    if args.autopilot {
        autopilot(session, step, args.fire_every);
    }
    session.tick();
}

/// A game-over run stops early unless a scripted command (a restart) is
/// still due within `frames`.
fn finished(session: &GameSession, script: &Script, frames: u64) -> bool {
    session.game_over() && script.range(..frames).next().is_none()
}

/// Keep the player under the lowest falling piece and fire on a cadence.
fn autopilot(session: &mut GameSession, step: u64, fire_every: u64) {
    let cell = session.config().cell_size;
    let target_x = session
        .pieces()
        .iter()
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|piece| piece.bounds(cell).center().x);

    if let Some(x) = target_x {
        let player = session.player().rect.center().x;
        let speed = session.config().player_speed;
        if x < player - speed / 2.0 {
            session.apply_intent(GameIntent::MoveLeft);
        } else if x > player + speed / 2.0 {
            session.apply_intent(GameIntent::MoveRight);
        }
    }
    if fire_every > 0 && step % fire_every == 0 {
        session.apply_intent(GameIntent::Fire);
    }
}

fn emit(out: &mut impl Write, seq: &mut u64, session: &GameSession, render: bool) -> Result<()> {
    *seq += 1;
    let observation = ObservationMessage::from_snapshot(*seq, &session.snapshot());
    serde_json::to_writer(&mut *out, &observation)?;
    writeln!(out)?;

    if render {
        let stderr = io::stderr();
        let mut err = stderr.lock();
        writeln!(
            err,
            "-- frame {} score {} lines {} --",
            session.frame(),
            session.score(),
            session.lines()
        )?;
        for row in session.grid().to_ascii() {
            writeln!(err, "{row}")?;
        }
    }
    Ok(())
}
