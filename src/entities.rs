/// All game entity types: pure data, no logic.

use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in world units, y growing downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }
}

// ── Bird & pipes ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bird {
    /// Fixed for the whole session.
    pub x: f64,
    /// Centre of the bird.
    pub y: f64,
    pub velocity: f64,
    /// Ticks survived; drives the wing animation.
    pub frame_count: u64,
    /// Index into the flap animation cycle.
    pub phase: usize,
    pub alive: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pipe {
    /// Left edge.
    pub x: f64,
    /// Bottom of the upper pipe / top of the gap.
    pub gap_offset: u32,
    /// Set once the pipe has scrolled behind the bird.
    pub passed: bool,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// One play session.  Cloneable so pure update functions can return a new
/// copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub config: GameConfig,
    pub bird: Bird,
    /// Live pipes in spawn order, which is also left-to-right order.
    pub pipes: Vec<Pipe>,
    pub score: u32,
    pub status: GameStatus,
    pub frame: u64,
}

/// Result of a finished session, after the high score has been settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameOutcome {
    pub score: u32,
    pub high_score: u32,
    pub new_record: bool,
}
