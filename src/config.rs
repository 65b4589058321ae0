/// Simulation parameters.
///
/// Every dimension lives in world units (the original 400×600 playfield);
/// the renderer scales to whatever terminal it gets.  The core never reads
/// globals, so tests can build any `GameConfig` they like.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_SCREEN_WIDTH: u32 = 400;
pub const DEFAULT_SCREEN_HEIGHT: u32 = 600;
/// Height of the scrolling ground strip (the base sprite is 112px tall).
pub const DEFAULT_GROUND_HEIGHT: u32 = 112;
pub const DEFAULT_PIPE_WIDTH: u32 = 70;
pub const DEFAULT_PIPE_GAP: u32 = 150;
/// Minimum distance between a gap and the top/bottom of the screen.
pub const DEFAULT_PIPE_MARGIN: u32 = 100;
pub const DEFAULT_PIPE_SPEED: f64 = 3.0;
/// New pipes appear this far past the right edge.
pub const DEFAULT_SPAWN_MARGIN: f64 = 200.0;
pub const DEFAULT_GRAVITY: f64 = 0.5;
pub const DEFAULT_JUMP_STRENGTH: f64 = -10.0;
pub const DEFAULT_BIRD_X: f64 = 100.0;
pub const DEFAULT_BIRD_HALF_EXTENT: f64 = 20.0;
/// Ticks between animation frames.
pub const DEFAULT_FLAP_PERIOD: u64 = 5;
pub const DEFAULT_FLAP_FRAMES: usize = 3;
pub const DEFAULT_FPS: u32 = 60;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    pub ground_height: u32,
    pub pipe_width: u32,
    pub pipe_gap: u32,
    pub pipe_margin: u32,
    /// Horizontal distance a pipe scrolls per tick.
    pub pipe_speed: f64,
    pub spawn_margin: f64,
    /// Per-tick downward acceleration.
    pub gravity: f64,
    /// Velocity set by a jump; negative is up.
    pub jump_strength: f64,
    pub bird_x: f64,
    pub bird_half_extent: f64,
    pub flap_period: u64,
    pub flap_frames: usize,
    pub fps: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            ground_height: DEFAULT_GROUND_HEIGHT,
            pipe_width: DEFAULT_PIPE_WIDTH,
            pipe_gap: DEFAULT_PIPE_GAP,
            pipe_margin: DEFAULT_PIPE_MARGIN,
            pipe_speed: DEFAULT_PIPE_SPEED,
            spawn_margin: DEFAULT_SPAWN_MARGIN,
            gravity: DEFAULT_GRAVITY,
            jump_strength: DEFAULT_JUMP_STRENGTH,
            bird_x: DEFAULT_BIRD_X,
            bird_half_extent: DEFAULT_BIRD_HALF_EXTENT,
            flap_period: DEFAULT_FLAP_PERIOD,
            flap_frames: DEFAULT_FLAP_FRAMES,
            fps: DEFAULT_FPS,
        }
    }
}

impl GameConfig {
    /// Defaults, overridden by any `FLAPPY_*` variables that parse.
    pub fn from_env() -> Self {
        let d = GameConfig::default();
        GameConfig {
            screen_width: read_env("FLAPPY_SCREEN_WIDTH", d.screen_width),
            screen_height: read_env("FLAPPY_SCREEN_HEIGHT", d.screen_height),
            ground_height: read_env("FLAPPY_GROUND_HEIGHT", d.ground_height),
            pipe_width: read_env("FLAPPY_PIPE_WIDTH", d.pipe_width),
            pipe_gap: read_env("FLAPPY_PIPE_GAP", d.pipe_gap),
            pipe_speed: read_env("FLAPPY_PIPE_SPEED", d.pipe_speed),
            gravity: read_env("FLAPPY_GRAVITY", d.gravity),
            jump_strength: read_env("FLAPPY_JUMP_STRENGTH", d.jump_strength),
            fps: read_env("FLAPPY_FPS", d.fps),
            ..d
        }
    }

    /// Reject configurations that could not run a session.  Called once at
    /// startup; nothing in the tick path re-checks these.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive_ints = [
            ("screen_width", self.screen_width as u64),
            ("screen_height", self.screen_height as u64),
            ("pipe_width", self.pipe_width as u64),
            ("pipe_gap", self.pipe_gap as u64),
            ("flap_period", self.flap_period),
            ("flap_frames", self.flap_frames as u64),
            ("fps", self.fps as u64),
        ];
        for (field, value) in positive_ints {
            if value == 0 {
                return Err(ConfigError::NonPositive { field });
            }
        }
        let positive_floats = [
            ("pipe_speed", self.pipe_speed),
            ("gravity", self.gravity),
            ("bird_half_extent", self.bird_half_extent),
        ];
        for (field, value) in positive_floats {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field });
            }
        }
        let finite_floats = [
            ("jump_strength", self.jump_strength),
            ("spawn_margin", self.spawn_margin),
            ("bird_x", self.bird_x),
        ];
        for (field, value) in finite_floats {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
        }
        if !(self.jump_strength < 0.0) {
            return Err(ConfigError::JumpNotUpward(self.jump_strength));
        }
        if self.ground_height >= self.screen_height {
            return Err(ConfigError::GroundTooTall {
                height: self.screen_height,
                ground: self.ground_height,
            });
        }
        // Gap offsets are drawn from [margin, height - gap - margin].
        let needed = self.pipe_gap as u64 + 2 * self.pipe_margin as u64;
        if (self.screen_height as u64) < needed {
            return Err(ConfigError::EmptyGapRange {
                height: self.screen_height,
                gap: self.pipe_gap,
                margin: self.pipe_margin,
            });
        }
        Ok(())
    }

    /// Inclusive bounds for a pipe's gap offset.  Collapses to a single
    /// value on an unvalidated config rather than underflowing.
    pub fn gap_offset_range(&self) -> (u32, u32) {
        let lo = self.pipe_margin;
        let hi = self
            .screen_height
            .saturating_sub(self.pipe_gap.saturating_add(self.pipe_margin))
            .max(lo);
        (lo, hi)
    }

    /// Y coordinate of the top of the ground strip.
    pub fn ground_y(&self) -> f64 {
        (self.screen_height - self.ground_height) as f64
    }

    pub fn spawn_x(&self) -> f64 {
        self.screen_width as f64 + self.spawn_margin
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }
}

fn read_env<T: FromStr + Copy + std::fmt::Display>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("{name}={raw:?} is not a valid value, using default {default}");
                default
            }
        },
        Err(_) => default,
    }
}
