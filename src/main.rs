mod display;

use std::fs::OpenOptions;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use rand::Rng;
use tracing_subscriber::filter::EnvFilter;

use display::Viewport;
use flappy_bird::compute::{init_state, tick};
use flappy_bird::config::GameConfig;
use flappy_bird::entities::{GameState, GameStatus};
use flappy_bird::error::FlappyError;
use flappy_bird::highscore::{self, record_outcome, HighScoreFile, HighScoreStore};

/// Last frame stays frozen this long before the game-over panel appears.
const GAME_OVER_PAUSE: Duration = Duration::from_millis(500);

/// How often the idle screens re-check the terminal size.
const IDLE_REDRAW: Duration = Duration::from_millis(250);

// ── Input ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
enum Key {
    Flap,
    Retry,
    Quit,
}

fn classify(event: Event) -> Option<Key> {
    let Event::Key(KeyEvent {
        code,
        kind,
        modifiers,
        ..
    }) = event
    else {
        return None;
    };
    // Windows also reports releases; only presses count.
    if kind != KeyEventKind::Press {
        return None;
    }
    match code {
        KeyCode::Char(' ') | KeyCode::Up => Some(Key::Flap),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Key::Retry),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Key::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Key::Quit),
        _ => None,
    }
}

/// Block until one of `wanted` (or Quit) is pressed, redrawing on a timer
/// so a resized terminal is picked up.
fn wait_for_key(
    rx: &mpsc::Receiver<Event>,
    wanted: &[Key],
    mut redraw: impl FnMut() -> std::io::Result<()>,
) -> Result<Key, FlappyError> {
    loop {
        match rx.recv_timeout(IDLE_REDRAW) {
            Ok(ev) => match classify(ev) {
                Some(Key::Quit) => return Ok(Key::Quit),
                Some(key) if wanted.contains(&key) => return Ok(key),
                _ => {}
            },
            Err(mpsc::RecvTimeoutError::Timeout) => redraw()?,
            // Input thread gone: nothing can ever be pressed again.
            Err(mpsc::RecvTimeoutError::Disconnected) => return Ok(Key::Quit),
        }
    }
}

fn drain(rx: &mpsc::Receiver<Event>) {
    while rx.try_recv().is_ok() {}
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum LoopExit {
    Ended,
    Quit,
}

/// Runs one session until the bird dies or the player quits.  Jump presses
/// are buffered per frame and applied before that frame's physics.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut impl Rng,
) -> Result<LoopExit, FlappyError> {
    let frame = state.config.frame_duration();

    loop {
        let frame_start = Instant::now();

        let mut jump_requested = false;
        while let Ok(ev) = rx.try_recv() {
            match classify(ev) {
                Some(Key::Quit) => return Ok(LoopExit::Quit),
                Some(Key::Flap) => jump_requested = true,
                _ => {}
            }
        }

        *state = tick(state, jump_requested, rng);
        display::render(out, state, Viewport::current()?)?;

        if state.status == GameStatus::GameOver {
            return Ok(LoopExit::Ended);
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Logs go to the file named by `FLAPPY_LOG`; stdout belongs to the game.
fn init_logging() {
    let Ok(path) = std::env::var("FLAPPY_LOG") else {
        return;
    };
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init(),
        Err(e) => eprintln!("could not open log file {path}: {e}"),
    }
}

fn main() -> Result<(), FlappyError> {
    init_logging();

    // Bad configuration is fatal before the terminal is touched.
    let config = GameConfig::from_env();
    config.validate()?;
    tracing::debug!(?config, "configuration loaded");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, config);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: GameConfig,
) -> Result<(), FlappyError> {
    let mut store = HighScoreFile::new(highscore::default_path());
    tracing::debug!(path = %store.path().display(), "using high score file");
    let mut rng = rand::thread_rng();

    loop {
        // ── Start screen ─────────────────────────────────────────────────────
        let best = store.read_high_score();
        display::render_start(out, &config, best, Viewport::current()?)?;
        let key = wait_for_key(rx, &[Key::Flap], || {
            display::render_start(out, &config, best, Viewport::current()?)
        })?;
        if key == Key::Quit {
            break;
        }

        // ── Play ─────────────────────────────────────────────────────────────
        let mut state = init_state(config, &mut rng);
        if let LoopExit::Quit = game_loop(out, &mut state, rx, &mut rng)? {
            break;
        }

        // ── Game over ────────────────────────────────────────────────────────
        thread::sleep(GAME_OVER_PAUSE);
        drain(rx);
        let outcome = record_outcome(state.score, &mut store);
        display::render_game_over(out, &state, &outcome, Viewport::current()?)?;
        let key = wait_for_key(rx, &[Key::Retry, Key::Flap], || {
            display::render_game_over(out, &state, &outcome, Viewport::current()?)
        })?;
        if key == Key::Quit {
            break;
        }
    }
    Ok(())
}
