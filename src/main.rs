use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{self, ClearType},
};
use rand::{SeedableRng, rngs::StdRng};
use std::{
    env,
    fs::{self, File, OpenOptions},
    io::{self, Stdout, Write, stdout},
    path::PathBuf,
    sync::Mutex,
    time::{Duration, Instant},
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use vote_race::{
    audio::{Audio, Cue},
    config::{self, Config},
    play_series,
    race::Race,
    scheduler::FixedStep,
    view::View,
};

const FRAME_DUR: Duration = Duration::from_millis(33); // ~30 fps

// ── Logging ─────────────────────────────────────────────────────────────────

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // Nowhere to log that won't scribble over the field.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> (Option<(PathBuf, File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!("Failed to create log dir {}: {e}", parent.display()));
            continue;
        }

        match OpenOptions::new().create(true).append(true).open(&candidate) {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!("Failed to open log file {}: {e}", candidate.display()));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(dir) = config::config_dir() {
        candidates.push(dir.join("logs").join("vote-race.log"));
    }
    candidates.push(PathBuf::from(".vote-race").join("logs").join("vote-race.log"));
    candidates
}

// ── Terminal ────────────────────────────────────────────────────────────────

/// Raw mode and the alternate screen for as long as this lives.
struct TerminalSession {
    out: Stdout,
}

impl TerminalSession {
    fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = stdout();
        if let Err(err) = execute!(
            out,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            terminal::DisableLineWrap,
        ) {
            let _ = terminal::disable_raw_mode();
            return Err(err);
        }
        Ok(Self { out })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        );
        let _ = terminal::disable_raw_mode();
    }
}

// ── Main ────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let headless = env::args().skip(1).any(|arg| arg == "--headless");

    init_tracing();
    let config = Config::load();
    let seed = config.seed().unwrap_or_else(rand::random::<u64>);
    tracing::info!(seed, headless, "race generator seeded");
    let mut rng = StdRng::seed_from_u64(seed);

    if headless {
        return run_headless(&mut rng, seed);
    }

    let audio = Audio::open(config.sound_enabled());
    let mut session = TerminalSession::new()?;
    run(&mut session.out, &mut rng, &audio)
}

fn run(out: &mut Stdout, rng: &mut StdRng, audio: &Audio) -> Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut view = View::new(cols, rows);
    let mut race = Race::new();
    let mut ticks = FixedStep::default();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();

        // Input
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        tracing::info!(rounds = race.rounds(), "quit");
                        return Ok(());
                    }
                    KeyCode::Char(' ') | KeyCode::Enter => {
                        ticks.start(&mut race, frame_start);
                    }
                    _ => {}
                },
                Event::Resize(c, r) => view.resize(c, r),
                _ => {}
            }
        }

        // Update
        if let Some(resolution) = ticks.drive(&mut race, Instant::now(), rng) {
            audio.play(Cue::for_resolution(&resolution));
        }
        frame += 1;

        // Render
        view.draw(out, &race, frame)?;

        // Frame pacing, waking early for the next motion tick
        let now = Instant::now();
        let mut wait = FRAME_DUR.saturating_sub(now - frame_start);
        if let Some(tick_in) = ticks.until_next(now) {
            wait = wait.min(tick_in);
        }
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
    }
}

fn run_headless(rng: &mut StdRng, seed: u64) -> Result<()> {
    let report = play_series(rng);

    let mut out = stdout().lock();
    writeln!(out, "seed {seed}")?;
    for (i, winner) in report.winners.iter().enumerate() {
        writeln!(out, "roll {:>2}: {winner}", i + 1)?;
    }
    writeln!(
        out,
        "final tally: {} - {}",
        report.tally.red(),
        report.tally.blue()
    )?;
    writeln!(out, "prediction: {}", report.result)?;
    Ok(())
}
