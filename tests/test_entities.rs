use flappy_bird::config::GameConfig;
use flappy_bird::entities::*;

fn sample_state() -> GameState {
    GameState {
        config: GameConfig::default(),
        bird: Bird { x: 100.0, y: 300.0, velocity: 0.0, frame_count: 0, phase: 0, alive: true },
        pipes: vec![Pipe { x: 600.0, gap_offset: 200, passed: false }],
        score: 0,
        status: GameStatus::Playing,
        frame: 0,
    }
}

#[test]
fn status_equality() {
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);
}

#[test]
fn rect_edges() {
    let r = Rect { x: 80.0, y: 185.0, w: 40.0, h: 40.0 };
    assert_eq!(r.right(), 120.0);
    assert_eq!(r.bottom(), 225.0);
}

#[test]
fn game_state_clone_is_independent() {
    let original = sample_state();
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.bird.y = 10.0;
    cloned.score = 99;
    cloned.pipes[0].passed = true;
    cloned.pipes.push(Pipe { x: 700.0, gap_offset: 120, passed: false });

    assert_eq!(original.bird.y, 300.0);
    assert_eq!(original.score, 0);
    assert_eq!(original.pipes.len(), 1);
    assert!(!original.pipes[0].passed);
    assert_ne!(original, cloned);
}

#[test]
fn outcome_is_plain_value() {
    let a = GameOutcome { score: 4, high_score: 9, new_record: false };
    let b = a;
    assert_eq!(a, b);
}
