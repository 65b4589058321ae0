/// Pure game-logic functions.
///
/// Every public function takes immutable references to the current state
/// (and, where needed, an RNG handle) and returns brand-new values.  Side
/// effects are limited to the injected RNG and `tracing` events.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Bird, GameState, GameStatus, Pipe, Rect};

// ── Constructors ─────────────────────────────────────────────────────────────

/// A bird at its starting point: fixed x, vertically centred, at rest.
pub fn new_bird(config: &GameConfig) -> Bird {
    Bird {
        x: config.bird_x,
        y: (config.screen_height / 2) as f64,
        velocity: 0.0,
        frame_count: 0,
        phase: 0,
        alive: true,
    }
}

/// A pipe at `x` with a gap offset drawn uniformly from the configured range.
pub fn spawn_pipe(x: f64, config: &GameConfig, rng: &mut impl Rng) -> Pipe {
    let (lo, hi) = config.gap_offset_range();
    let gap_offset = rng.gen_range(lo..=hi);
    tracing::debug!(x, gap_offset, "spawned pipe");
    Pipe {
        x,
        gap_offset,
        passed: false,
    }
}

/// Build the initial session state: fresh bird, one pipe waiting off-screen.
pub fn init_state(config: GameConfig, rng: &mut impl Rng) -> GameState {
    tracing::debug!("session started");
    GameState {
        bird: new_bird(&config),
        pipes: vec![spawn_pipe(config.spawn_x(), &config, rng)],
        score: 0,
        status: GameStatus::Playing,
        frame: 0,
        config,
    }
}

// ── Bird ─────────────────────────────────────────────────────────────────────

/// Overwrite the bird's velocity with the jump impulse.  Not additive:
/// jumping twice before a tick is the same as jumping once.
pub fn bird_jump(bird: &Bird, config: &GameConfig) -> Bird {
    Bird {
        velocity: config.jump_strength,
        ..bird.clone()
    }
}

/// One tick of gravity plus the wing animation.  Dead birds do not move.
pub fn bird_tick(bird: &Bird, config: &GameConfig) -> Bird {
    if !bird.alive {
        return bird.clone();
    }
    let velocity = bird.velocity + config.gravity;
    let frame_count = bird.frame_count + 1;
    let phase = if frame_count % config.flap_period == 0 {
        (bird.phase + 1) % config.flap_frames
    } else {
        bird.phase
    };
    Bird {
        y: bird.y + velocity,
        velocity,
        frame_count,
        phase,
        ..bird.clone()
    }
}

/// Square hit box centred on the bird, independent of how it is drawn.
pub fn bird_rect(bird: &Bird, config: &GameConfig) -> Rect {
    let r = config.bird_half_extent;
    Rect {
        x: bird.x - r,
        y: bird.y - r,
        w: r * 2.0,
        h: r * 2.0,
    }
}

/// Above the top of the screen, or low enough that the hit box touches the
/// ground strip.
pub fn out_of_bounds(bird: &Bird, config: &GameConfig) -> bool {
    bird.y < 0.0 || bird.y + config.bird_half_extent >= config.ground_y()
}

// ── Pipes ────────────────────────────────────────────────────────────────────

/// Touching edges count as overlapping.
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.x <= b.right() && b.x <= a.right() && a.y <= b.bottom() && b.y <= a.bottom()
}

pub fn pipe_tick(pipe: &Pipe, config: &GameConfig) -> Pipe {
    Pipe {
        x: pipe.x - config.pipe_speed,
        ..pipe.clone()
    }
}

/// `(upper, lower)` collision volumes.
pub fn pipe_rects(pipe: &Pipe, config: &GameConfig) -> (Rect, Rect) {
    let w = config.pipe_width as f64;
    let gap_top = pipe.gap_offset as f64;
    let gap_bottom = gap_top + config.pipe_gap as f64;
    let upper = Rect {
        x: pipe.x,
        y: 0.0,
        w,
        h: gap_top,
    };
    let lower = Rect {
        x: pipe.x,
        y: gap_bottom,
        w,
        h: config.screen_height as f64 - gap_bottom,
    };
    (upper, lower)
}

pub fn pipe_overlaps(pipe: &Pipe, bird: &Bird, config: &GameConfig) -> bool {
    let hit_box = bird_rect(bird, config);
    let (upper, lower) = pipe_rects(pipe, config);
    rects_overlap(&hit_box, &upper) || rects_overlap(&hit_box, &lower)
}

/// Right edge has scrolled past the left edge of the screen.
pub fn pipe_off_screen(pipe: &Pipe, config: &GameConfig) -> bool {
    pipe.x + config.pipe_width as f64 <= 0.0
}

// ── Pipe field ───────────────────────────────────────────────────────────────

pub fn advance_pipes(pipes: &[Pipe], config: &GameConfig) -> Vec<Pipe> {
    pipes.iter().map(|p| pipe_tick(p, config)).collect()
}

/// Mark pipes that slipped behind `bird_x` as passed, spawning one new pipe
/// per pass, then drop pipes that have left the screen.  Returns the
/// surviving pipes and the number of pipes passed this call.
pub fn settle_pipes(
    pipes: Vec<Pipe>,
    bird_x: f64,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> (Vec<Pipe>, u32) {
    let mut passed = 0;
    let mut pipes: Vec<Pipe> = pipes
        .into_iter()
        .map(|p| {
            if !p.passed && p.x < bird_x {
                passed += 1;
                Pipe { passed: true, ..p }
            } else {
                p
            }
        })
        .collect();

    for _ in 0..passed {
        pipes.push(spawn_pipe(config.spawn_x(), config, rng));
    }

    pipes.retain(|p| !pipe_off_screen(p, config));
    (pipes, passed)
}

/// Advance, score, spawn and evict in one step.  `tick` uses the split
/// form (`advance_pipes` then `settle_pipes`) so it can test collisions
/// before anything is evicted.
pub fn tick_pipes(
    pipes: &[Pipe],
    bird_x: f64,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> (Vec<Pipe>, u32) {
    settle_pipes(advance_pipes(pipes, config), bird_x, config, rng)
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Apply a jump as soon as the input event arrives, for drivers that handle
/// input outside the tick.  The terminal driver passes its buffered press
/// to `tick` instead; both paths use `bird_jump`.
pub fn jump(state: &GameState) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    GameState {
        bird: bird_jump(&state.bird, &state.config),
        ..state.clone()
    }
}

// ── Per-frame tick (nearly pure, RNG is injected) ──────────────────────────

/// Advance the session by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// A finished session is returned unchanged.
pub fn tick(state: &GameState, jump_requested: bool, rng: &mut impl Rng) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    let config = &state.config;

    // ── 1. Jump, then physics ────────────────────────────────────────────────
    let bird = if jump_requested {
        bird_jump(&state.bird, config)
    } else {
        state.bird.clone()
    };
    let bird = bird_tick(&bird, config);

    // ── 2. Scroll pipes and test them before anything is evicted ─────────────
    let pipes = advance_pipes(&state.pipes, config);
    let hit_pipe = pipes.iter().any(|p| pipe_overlaps(p, &bird, config));

    // ── 3. Score, spawn, evict ───────────────────────────────────────────────
    let (pipes, passed) = settle_pipes(pipes, bird.x, config, rng);

    // ── 4. Termination ───────────────────────────────────────────────────────
    let dead = hit_pipe || out_of_bounds(&bird, config);
    let score = state.score + passed;
    let (bird, status) = if dead {
        tracing::debug!(score, frame = state.frame + 1, hit_pipe, "session ended");
        (Bird { alive: false, ..bird }, GameStatus::GameOver)
    } else {
        (bird, GameStatus::Playing)
    };

    GameState {
        bird,
        pipes,
        score,
        status,
        frame: state.frame + 1,
        config: *config,
    }
}
