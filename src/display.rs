/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only scales world
/// coordinates onto terminal cells and translates state into commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use flappy_bird::config::GameConfig;
use flappy_bird::entities::{Bird, GameOutcome, GameState, Pipe};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_SKY: Color = Color::Rgb { r: 112, g: 197, b: 206 };
const C_PIPE: Color = Color::Green;
const C_PIPE_EDGE: Color = Color::DarkGreen;
const C_GROUND: Color = Color::Rgb { r: 222, g: 216, b: 149 };
const C_GRASS: Color = Color::Rgb { r: 84, g: 168, b: 55 };
const C_BIRD: Color = Color::Yellow;
const C_BIRD_DEAD: Color = Color::Red;
const C_HUD_SCORE: Color = Color::White;
const C_TITLE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

/// One sprite per animation phase.
const BIRD_FRAMES: [&str; 3] = ["\\o>", "-o>", "/o>"];
const BIRD_DEAD: &str = "xo>";

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps the fixed world playfield onto however many cells the terminal has.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn current() -> std::io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Viewport { cols, rows })
    }

    fn col(&self, x: f64, config: &GameConfig) -> i32 {
        (x / config.screen_width as f64 * self.cols as f64).floor() as i32
    }

    fn row(&self, y: f64, config: &GameConfig) -> i32 {
        (y / config.screen_height as f64 * self.rows as f64).floor() as i32
    }

    /// World y at the vertical centre of terminal row `row`.
    fn world_y(&self, row: u16, config: &GameConfig) -> f64 {
        (row as f64 + 0.5) / self.rows.max(1) as f64 * config.screen_height as f64
    }

    fn contains(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && col < self.cols as i32 && row < self.rows as i32
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete play frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    let config = &state.config;
    draw_sky(out)?;
    for pipe in &state.pipes {
        draw_pipe(out, pipe, config, view)?;
    }
    draw_ground(out, config, view, state.frame)?;
    draw_bird(out, &state.bird, config, view)?;
    draw_hud(out, state.score)?;
    draw_hint(out, view, "SPACE / ↑ : Flap   Q : Quit")?;
    finish(out, view)
}

/// Title screen shown before each session.
pub fn render_start<W: Write>(
    out: &mut W,
    config: &GameConfig,
    high_score: u32,
    view: Viewport,
) -> std::io::Result<()> {
    draw_sky(out)?;
    draw_ground(out, config, view, 0)?;

    let title = "   F L A P P Y   B I R D   ";
    let bar = "═".repeat(title.chars().count());
    let mut lines: Vec<(String, Color)> = vec![
        (format!("╔{}╗", bar), C_TITLE),
        (format!("║{}║", title), C_TITLE),
        (format!("╚{}╝", bar), C_TITLE),
        (String::new(), C_HINT),
    ];
    if high_score > 0 {
        lines.push((format!("Best Score: {}", high_score), Color::White));
    }
    lines.push(("Press SPACE to flap".to_string(), Color::White));
    lines.push(("Q : Quit".to_string(), C_HINT));

    draw_centered_block(out, view, view.rows / 4, &lines)?;
    finish(out, view)
}

/// Game-over panel drawn over the frozen last frame.
pub fn render_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    outcome: &GameOutcome,
    view: Viewport,
) -> std::io::Result<()> {
    render(out, state, view)?;

    let best_line = if outcome.new_record {
        format!("★ NEW BEST: {:>6} ★", outcome.high_score)
    } else {
        format!("High Score:  {:>6}", outcome.high_score)
    };
    let best_color = if outcome.new_record {
        Color::Yellow
    } else {
        Color::White
    };

    let lines: Vec<(String, Color)> = vec![
        ("╔════════════════════╗".to_string(), Color::Red),
        ("║     GAME  OVER     ║".to_string(), Color::Red),
        ("╚════════════════════╝".to_string(), Color::Red),
        (format!("Score:       {:>6}", outcome.score), Color::Yellow),
        (best_line, best_color),
        ("R - Try Again  Q - Quit".to_string(), Color::White),
    ];

    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);
    draw_centered_block(out, view, start_row, &lines)?;
    finish(out, view)
}

// ── Background ────────────────────────────────────────────────────────────────

fn draw_sky<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(style::SetBackgroundColor(C_SKY))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    Ok(())
}

fn draw_ground<W: Write>(
    out: &mut W,
    config: &GameConfig,
    view: Viewport,
    frame: u64,
) -> std::io::Result<()> {
    let top = view.row(config.ground_y(), config).max(0) as u16;
    // Stripes scroll at pipe speed so the ground moves with the pipes.
    let scroll = (frame as f64 * config.pipe_speed / config.screen_width as f64
        * view.cols as f64) as u64;

    for row in top..view.rows {
        out.queue(cursor::MoveTo(0, row))?;
        if row == top {
            out.queue(style::SetForegroundColor(C_GRASS))?;
            out.queue(Print("▀".repeat(view.cols as usize)))?;
            continue;
        }
        out.queue(style::SetForegroundColor(C_GROUND))?;
        let stripe: String = (0..view.cols as u64)
            .map(|c| if (c + scroll + row as u64) % 4 < 2 { '▓' } else { '▒' })
            .collect();
        out.queue(Print(stripe))?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_pipe<W: Write>(
    out: &mut W,
    pipe: &Pipe,
    config: &GameConfig,
    view: Viewport,
) -> std::io::Result<()> {
    let left = view.col(pipe.x, config).max(0);
    let right = view
        .col(pipe.x + config.pipe_width as f64, config)
        .min(view.cols as i32);
    if left >= right {
        return Ok(());
    }
    let gap_top = pipe.gap_offset as f64;
    let gap_bottom = gap_top + config.pipe_gap as f64;
    let ground_row = view.row(config.ground_y(), config).max(0) as u16;

    for row in 0..ground_row {
        let y = view.world_y(row, config);
        if y >= gap_top && y < gap_bottom {
            continue;
        }
        // Caps sit on the rows bordering the gap.
        let is_cap = (y < gap_top && view.world_y(row + 1, config) >= gap_top)
            || (y >= gap_bottom && row > 0 && view.world_y(row - 1, config) < gap_bottom);
        out.queue(cursor::MoveTo(left as u16, row))?;
        out.queue(style::SetForegroundColor(if is_cap { C_PIPE_EDGE } else { C_PIPE }))?;
        out.queue(Print("█".repeat((right - left) as usize)))?;
    }
    Ok(())
}

fn draw_bird<W: Write>(
    out: &mut W,
    bird: &Bird,
    config: &GameConfig,
    view: Viewport,
) -> std::io::Result<()> {
    let (sprite, color) = if bird.alive {
        (BIRD_FRAMES[bird.phase % BIRD_FRAMES.len()], C_BIRD)
    } else {
        (BIRD_DEAD, C_BIRD_DEAD)
    };
    // Sprite is three cells wide, centred on the bird.
    let col = view.col(bird.x, config) - 1;
    let row = view.row(bird.y, config);
    if !view.contains(col.max(0), row) {
        return Ok(());
    }
    out.queue(cursor::MoveTo(col.max(0) as u16, row as u16))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(sprite))?;
    Ok(())
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, score: u32) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {}", score)))?;
    Ok(())
}

fn draw_hint<W: Write>(out: &mut W, view: Viewport, hint: &str) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

fn draw_centered_block<W: Write>(
    out: &mut W,
    view: Viewport,
    start_row: u16,
    lines: &[(String, Color)],
) -> std::io::Result<()> {
    let cx = view.cols / 2;
    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }
    Ok(())
}

/// Park cursor in a harmless spot and flush.
fn finish<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}
