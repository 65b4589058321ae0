use flappy_bird::config::*;
use flappy_bird::error::ConfigError;

#[test]
fn defaults_match_original_playfield() {
    let c = GameConfig::default();
    assert_eq!((c.screen_width, c.screen_height), (400, 600));
    assert_eq!(c.gravity, 0.5);
    assert_eq!(c.jump_strength, -10.0);
    assert_eq!(c.spawn_x(), 600.0);
    assert_eq!(c.ground_y(), 488.0);
    assert_eq!(c.gap_offset_range(), (100, 350));
    assert!(c.validate().is_ok());
}

#[test]
fn frame_duration_tracks_fps() {
    let micros = GameConfig::default().frame_duration().as_micros();
    assert!((16_600..=16_700).contains(&micros), "{micros}");
}

#[test]
fn gap_too_large_is_rejected() {
    let c = GameConfig { pipe_gap: 401, ..GameConfig::default() };
    assert_eq!(
        c.validate(),
        Err(ConfigError::EmptyGapRange { height: 600, gap: 401, margin: 100 })
    );
}

#[test]
fn gap_filling_range_exactly_is_allowed() {
    let c = GameConfig { pipe_gap: 400, ..GameConfig::default() };
    assert!(c.validate().is_ok());
    assert_eq!(c.gap_offset_range(), (100, 100));
}

#[test]
fn ground_taller_than_screen_is_rejected() {
    let c = GameConfig { ground_height: 600, ..GameConfig::default() };
    assert_eq!(
        c.validate(),
        Err(ConfigError::GroundTooTall { height: 600, ground: 600 })
    );
}

#[test]
fn zero_sizes_are_rejected() {
    let c = GameConfig { fps: 0, ..GameConfig::default() };
    assert_eq!(c.validate(), Err(ConfigError::NonPositive { field: "fps" }));

    let c = GameConfig { gravity: 0.0, ..GameConfig::default() };
    assert_eq!(c.validate(), Err(ConfigError::NonPositive { field: "gravity" }));
}

#[test]
fn downward_jump_is_rejected() {
    let c = GameConfig { jump_strength: 4.0, ..GameConfig::default() };
    assert_eq!(c.validate(), Err(ConfigError::JumpNotUpward(4.0)));
}

#[test]
fn error_messages_name_the_problem() {
    let err = ConfigError::NonPositive { field: "pipe_speed" };
    assert_eq!(err.to_string(), "pipe_speed must be positive");
}

#[test]
fn env_overrides_apply_and_bad_values_fall_back() {
    std::env::set_var("FLAPPY_PIPE_GAP", "120");
    std::env::set_var("FLAPPY_GRAVITY", "heavy");
    let c = GameConfig::from_env();
    std::env::remove_var("FLAPPY_PIPE_GAP");
    std::env::remove_var("FLAPPY_GRAVITY");

    assert_eq!(c.pipe_gap, 120);
    assert_eq!(c.gravity, DEFAULT_GRAVITY);
}

#[test]
fn huge_gap_is_rejected_without_overflow() {
    let c = GameConfig { pipe_gap: u32::MAX, ..GameConfig::default() };
    assert_eq!(
        c.validate(),
        Err(ConfigError::EmptyGapRange { height: 600, gap: u32::MAX, margin: 100 })
    );

    let c = GameConfig { pipe_gap: u32::MAX - 150, ..GameConfig::default() };
    assert!(c.validate().is_err());

    let c = GameConfig { pipe_margin: u32::MAX, ..GameConfig::default() };
    assert!(matches!(c.validate(), Err(ConfigError::EmptyGapRange { .. })));
}

#[test]
fn gap_range_collapses_on_huge_gap() {
    let c = GameConfig { pipe_gap: u32::MAX, ..GameConfig::default() };
    assert_eq!(c.gap_offset_range(), (100, 100));
}

#[test]
fn non_finite_floats_are_rejected() {
    let c = GameConfig { pipe_speed: f64::INFINITY, ..GameConfig::default() };
    assert_eq!(c.validate(), Err(ConfigError::NotFinite { field: "pipe_speed" }));

    let c = GameConfig { gravity: f64::NAN, ..GameConfig::default() };
    assert_eq!(c.validate(), Err(ConfigError::NotFinite { field: "gravity" }));

    let c = GameConfig { jump_strength: f64::NEG_INFINITY, ..GameConfig::default() };
    assert_eq!(c.validate(), Err(ConfigError::NotFinite { field: "jump_strength" }));
}
