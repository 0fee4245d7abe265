use wormhole_snake_core::{
    BlockedPushRule, Cell, Direction, FoodId, FoodKind, FoodPlacement, LevelData, LevelStatus,
    RainbowMode, RejectionReason, Rules, SnakeStart,
};
use wormhole_snake_system_session::Session;

fn food(kind: FoodKind, x: i32, y: i32) -> FoodPlacement {
    FoodPlacement {
        kind,
        cell: Cell::new(x, y),
    }
}

/// All-floor 5x5 board with a banana above the snake and a wall behind it.
fn pantry() -> LevelData {
    LevelData {
        version: 1,
        name: "pantry".to_owned(),
        width: 5,
        height: 5,
        floor: vec!["FFFFF".to_owned(); 5],
        walls: vec![
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            "..W".to_owned(),
        ],
        snake: SnakeStart {
            head: Cell::new(2, 2),
            length: 3,
            heading: Direction::Up,
        },
        food: vec![food(FoodKind::Banana, 2, 3)],
        wormhole: Cell::new(0, 4),
        rules: Rules::default(),
    }
}

/// One-row corridor: a potion pinned against the right wall and a banana
/// that the rainbow push carries toward the left wall.
fn corridor(rainbow: RainbowMode) -> LevelData {
    LevelData {
        version: 1,
        name: "corridor".to_owned(),
        width: 7,
        height: 1,
        floor: vec!["FFFFFFF".to_owned()],
        walls: vec!["W.....W".to_owned()],
        snake: SnakeStart {
            head: Cell::new(4, 0),
            length: 2,
            heading: Direction::Right,
        },
        food: vec![
            food(FoodKind::RainbowPotion, 5, 0),
            food(FoodKind::Banana, 2, 0),
        ],
        wormhole: Cell::new(5, 0),
        rules: Rules {
            rainbow,
            ..Rules::default()
        },
    }
}

#[test]
fn eating_a_pinned_banana_grows_the_snake() {
    let mut session = Session::with_level(pantry()).expect("level is valid");

    let outcome = session.attempt_move(Direction::Up);

    assert!(outcome.moved);
    assert!(outcome.push_blocked, "the banana could not be pushed");
    assert_eq!(outcome.ate, Some(FoodKind::Banana));
    assert!(outcome.grew);
    assert_eq!(outcome.destroyed_food_ids, vec![FoodId::new(0)]);
    assert!(outcome.wormhole_opened);
    assert_eq!(session.snake().len(), 4);
    assert_eq!(session.status(), LevelStatus::Playing);
}

#[test]
fn refusing_blocked_pushes_turns_the_move_into_a_no_op() {
    let mut level = pantry();
    level.rules.blocked_push = BlockedPushRule::Refuse;
    let mut session = Session::with_level(level).expect("level is valid");
    let before = session.snake();

    let outcome = session.attempt_move(Direction::Up);

    assert!(!outcome.moved);
    assert!(outcome.destroyed_food_ids.is_empty());
    assert_eq!(outcome.rejection, Some(RejectionReason::Blocked));
    assert_eq!(session.snake(), before);
    assert_eq!(session.history_len(), 0);
}

#[test]
fn pushing_reports_moved_items() {
    let mut session = Session::with_level(pantry()).expect("level is valid");
    let _ = session.attempt_move(Direction::Right);
    let _ = session.attempt_move(Direction::Up);

    let outcome = session.attempt_move(Direction::Left);

    assert!(outcome.moved);
    assert_eq!(outcome.pushed_food_ids, vec![FoodId::new(0)]);
    assert!(outcome.destroyed_food_ids.is_empty());
    assert_eq!(
        session.food().first().map(|item| item.cell),
        Some(Cell::new(1, 3))
    );
}

#[test]
fn immediate_rainbow_resolves_within_the_move() {
    let mut session =
        Session::with_level(corridor(RainbowMode::Immediate)).expect("level is valid");

    let outcome = session.attempt_move(Direction::Right);

    assert_eq!(outcome.ate, Some(FoodKind::RainbowPotion));
    assert_eq!(outcome.rainbow_steps, 2);
    assert!(!outcome.rainbow_pending);
    assert_eq!(outcome.pushed_food_ids, vec![FoodId::new(1)]);
    assert!(!session.is_animating());
    assert_eq!(
        session.snake().segments,
        vec![Cell::new(3, 0), Cell::new(2, 0)]
    );
}

#[test]
fn stepped_rainbow_waits_for_the_caller() {
    let mut session = Session::with_level(corridor(RainbowMode::Stepped)).expect("level is valid");

    let outcome = session.attempt_move(Direction::Right);
    assert!(outcome.rainbow_pending);
    assert_eq!(outcome.rainbow_steps, 0);

    let blocked = session.attempt_move(Direction::Right);
    assert_eq!(blocked.rejection, Some(RejectionReason::Animating));

    let steps: Vec<_> = session.rainbow_steps().collect();
    assert_eq!(steps.len(), 2);
    assert!(steps.iter().all(|step| step.rainbow_steps == 1));
    assert!(steps[0].rainbow_pending);
    assert_eq!(steps[1].pushed_food_ids, vec![FoodId::new(1)]);
    assert!(!session.is_animating());
    assert_eq!(session.rainbow_steps().next(), None, "sequence is finished");
}

#[test]
fn rainbow_steps_can_be_consumed_one_at_a_time() {
    let mut session = Session::with_level(corridor(RainbowMode::Stepped)).expect("level is valid");
    let _ = session.attempt_move(Direction::Right);

    let first = session.rainbow_steps().next().expect("first step commits");

    assert_eq!(first.rainbow_steps, 1);
    assert!(session.is_animating());
    assert_eq!(
        session.snake().segments,
        vec![Cell::new(4, 0), Cell::new(3, 0)]
    );
}

#[test]
fn undo_during_a_pending_rainbow_cancels_it() {
    let level = corridor(RainbowMode::Stepped);
    let mut session = Session::with_level(level).expect("level is valid");
    let before = session.food();
    let _ = session.attempt_move(Direction::Right);

    assert!(session.undo());

    assert!(!session.is_animating());
    assert_eq!(session.food(), before);
    assert!(!session.undo(), "history is empty again");
}

#[test]
fn restart_restores_the_initial_layout() {
    let mut session = Session::with_level(pantry()).expect("level is valid");
    let initial = session.snake();
    let _ = session.attempt_move(Direction::Up);
    let _ = session.attempt_move(Direction::Left);

    assert!(session.restart());

    assert_eq!(session.snake(), initial);
    assert_eq!(session.food().len(), 1);
    assert_eq!(session.history_len(), 0);
    assert_eq!(session.level_name(), Some("pantry"));
}

#[test]
fn failed_initialisation_keeps_the_current_level() {
    let mut session = Session::with_level(pantry()).expect("level is valid");
    let mut broken = pantry();
    broken.snake.length = 0;

    assert!(session.initialize_level(broken).is_err());

    assert_eq!(session.level_name(), Some("pantry"));
    assert!(session.attempt_move(Direction::Left).moved);
}

#[test]
fn clearing_the_food_and_entering_the_wormhole_wins() {
    let mut session = Session::with_level(pantry()).expect("level is valid");

    assert!(session.attempt_move(Direction::Up).wormhole_opened);
    assert!(session.wormhole_active());
    let _ = session.attempt_move(Direction::Left);
    let _ = session.attempt_move(Direction::Left);
    let outcome = session.attempt_move(Direction::Up);

    assert!(outcome.won);
    assert!(outcome.moved);
    assert_eq!(session.status(), LevelStatus::Won);
    assert_eq!(
        session.attempt_move(Direction::Up).rejection,
        Some(RejectionReason::LevelOver)
    );
}

#[test]
fn falling_off_the_board_loses() {
    let mut level = pantry();
    level.snake = SnakeStart {
        head: Cell::new(0, 1),
        length: 2,
        heading: Direction::Left,
    };
    let mut session = Session::with_level(level).expect("level is valid");

    let first = session.attempt_move(Direction::Left);
    assert!(!first.died, "tail is still on the board");

    let second = session.attempt_move(Direction::Left);
    assert!(second.died);
    assert_eq!(session.status(), LevelStatus::Lost);

    assert!(session.undo());
    assert_eq!(session.status(), LevelStatus::Playing);
}

#[test]
fn length_and_food_only_move_one_way_between_undos() {
    let mut session = Session::with_level(corridor(RainbowMode::Immediate)).expect("level is valid");
    let mut length = session.snake().len();
    let mut food = session.food().len();

    let script = [
        Direction::Right,
        Direction::Right,
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Left,
    ];
    for direction in script {
        let _ = session.attempt_move(direction);
        assert!(session.snake().len() >= length, "snake never shrinks");
        assert!(session.food().len() <= food, "food never reappears");
        length = session.snake().len();
        food = session.food().len();
    }
}
