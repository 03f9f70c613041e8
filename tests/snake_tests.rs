//! Snake integration tests: movement rules through the `Engine` surface.

use ai_games::games::snake::{Field, SnakeLayout};
use ai_games::{
    ControlMode, Coord, Direction, Engine, IntentError, ScriptedSource, SnakeConfig, SnakeGame, SnakeIntent,
    SnakeStatus, Transition,
};

fn layout(body: &[(i32, i32)], direction: Direction, food: (i32, i32)) -> SnakeLayout {
    SnakeLayout {
        body: body.iter().map(|&(x, y)| Coord::new(x, y)).collect(),
        direction,
        food: Some(Coord::new(food.0, food.1)),
        power_ups: Vec::new(),
    }
}

fn game(body: &[(i32, i32)], direction: Direction, food: (i32, i32)) -> SnakeGame<ScriptedSource> {
    let config = SnakeConfig::default().with_size(8, 8);
    SnakeGame::with_layout(config, ScriptedSource::new(), layout(body, direction, food))
}

#[test]
fn test_entering_vacated_tail_is_legal() {
    // Head (1,1) moving left; the tail (1,2) sits right below it.
    let mut game = game(&[(1, 1), (2, 1), (2, 2), (1, 2)], Direction::Left, (7, 7));

    assert_eq!(game.apply(SnakeIntent::SetDirection(Direction::Down)), Ok(Transition::Changed));
    assert_eq!(game.apply(SnakeIntent::Tick), Ok(Transition::Changed));
    assert_eq!(game.head(), Coord::new(1, 2));
    assert_eq!(game.body().len(), 4);
    assert_eq!(game.status(), SnakeStatus::Running);
}

#[test]
fn test_body_collision_ends_game() {
    // Turning down runs into the fourth segment, not the tail.
    let mut game = game(&[(2, 2), (3, 2), (3, 3), (2, 3), (1, 3)], Direction::Left, (7, 7));

    game.apply(SnakeIntent::SetDirection(Direction::Down)).unwrap();
    assert_eq!(game.apply(SnakeIntent::Tick), Ok(Transition::Finished));
    assert!(game.is_terminal());
    assert_eq!(game.apply(SnakeIntent::Pause), Err(IntentError::GameFinished));
    assert_eq!(
        game.apply(SnakeIntent::SetControlMode(ControlMode::Autopilot)),
        Err(IntentError::GameFinished)
    );
}

#[test]
fn test_food_grows_and_relocates() {
    let mut game = game(&[(3, 3), (2, 3), (1, 3)], Direction::Right, (4, 3));
    let length = game.body().len();

    game.apply(SnakeIntent::Tick).unwrap();
    assert_eq!(game.body().len(), length + 1);
    assert_eq!(game.score(), game.config().food_reward);

    let food = game.food().unwrap();
    assert!(game.body().iter().all(|&segment| segment != food));
}

#[test]
fn test_grid_full_ends_game() {
    // 3×1 grid: eating the last free cell leaves nowhere for food.
    let config = SnakeConfig::default().with_size(3, 1).with_initial_length(1);
    let setup = SnakeLayout {
        body: vec![Coord::new(1, 0), Coord::new(0, 0)],
        direction: Direction::Right,
        food: Some(Coord::new(2, 0)),
        power_ups: Vec::new(),
    };
    let mut game = SnakeGame::with_layout(config, ScriptedSource::new(), setup);

    assert_eq!(game.tick(), Ok(Transition::Finished));
    assert_eq!(game.body().len(), 3);
    assert_eq!(game.food(), None);
    assert_eq!(game.status(), SnakeStatus::GameOver);
}

#[test]
fn test_autopilot_takes_over_and_hands_back() {
    // Open 20×20 board, food straight ahead: three ticks cannot end the game.
    let config = SnakeConfig::default();
    let setup = layout(&[(5, 10), (4, 10), (3, 10)], Direction::Right, (15, 10));
    let mut game = SnakeGame::with_layout(config, ScriptedSource::new(), setup);

    assert_eq!(game.apply(SnakeIntent::SetControlMode(ControlMode::Autopilot)), Ok(Transition::Changed));
    assert_eq!(game.apply(SnakeIntent::SetDirection(Direction::Up)), Err(IntentError::AutopilotEngaged));
    for _ in 0..3 {
        assert_eq!(game.apply(SnakeIntent::Tick), Ok(Transition::Changed));
    }
    assert_eq!(game.head(), Coord::new(8, 10));
    assert_eq!(game.direction(), Direction::Right);

    assert_eq!(game.apply(SnakeIntent::SetControlMode(ControlMode::Manual)), Ok(Transition::Changed));
    assert_eq!(game.mode(), ControlMode::Manual);
    assert_eq!(game.apply(SnakeIntent::SetDirection(Direction::Right)), Ok(Transition::Unchanged));
    assert_eq!(game.apply(SnakeIntent::SetDirection(Direction::Down)), Ok(Transition::Changed));
    assert_eq!(game.apply(SnakeIntent::Tick), Ok(Transition::Changed));
    assert_eq!(game.head(), Coord::new(8, 11));
}

#[test]
fn test_autopilot_survives_open_field() {
    // On an empty 20×20 board the autopilot should reach food many times.
    let mut game = SnakeGame::seeded(SnakeConfig::default(), 2024);
    game.set_control_mode(ControlMode::Autopilot).unwrap();
    for _ in 0..200 {
        if game.tick().is_err() || game.is_terminal() {
            break;
        }
    }
    assert!(game.score() >= 30, "score {}", game.score());
}

#[test]
fn test_snapshot_is_detached() {
    let mut game = game(&[(3, 3), (2, 3)], Direction::Right, (7, 7));
    let snapshot = game.snapshot();
    game.tick().unwrap();

    assert_eq!(snapshot.body, vec![Coord::new(3, 3), Coord::new(2, 3)]);
    assert_ne!(game.snapshot(), snapshot);
    assert_eq!(snapshot.interval_ms, 150);
}

#[test]
fn test_field_matches_game_view() {
    let game = game(&[(3, 3), (2, 3)], Direction::Right, (4, 3));
    let field = Field {
        bounds: game.bounds(),
        body: game.body(),
        food: game.food(),
        power_ups: game.power_ups(),
    };
    let step = field.advance(Direction::Right).unwrap();
    assert!(step.landing.grows());
}
