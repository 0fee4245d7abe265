use wormhole_snake_core::{
    Cell, Command, Direction, Event, FoodKind, FoodPlacement, FoodSnapshot, LevelData,
    LevelStatus, Rules, SnakeSnapshot, SnakeStart,
};
use wormhole_snake_world::{self as world, query, World};

#[derive(Debug, PartialEq)]
struct Observed {
    snake: SnakeSnapshot,
    food: Vec<FoodSnapshot>,
    status: LevelStatus,
    wormhole_active: bool,
}

fn observe(world: &World) -> Observed {
    Observed {
        snake: query::snake(world),
        food: query::food(world),
        status: query::status(world),
        wormhole_active: query::wormhole_active(world),
    }
}

/// Open 6x6 field with a pit column on the left, a banana pinned against a
/// wall, and a second banana that can be pushed into the pit.
fn field() -> LevelData {
    LevelData {
        version: 1,
        name: "field".to_owned(),
        width: 6,
        height: 6,
        floor: vec!["PFFFFF".to_owned(); 6],
        walls: vec![
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            "...W".to_owned(),
        ],
        snake: SnakeStart {
            head: Cell::new(3, 2),
            length: 3,
            heading: Direction::Up,
        },
        food: vec![
            FoodPlacement {
                kind: FoodKind::Banana,
                cell: Cell::new(3, 4),
            },
            FoodPlacement {
                kind: FoodKind::Banana,
                cell: Cell::new(1, 4),
            },
        ],
        wormhole: Cell::new(5, 0),
        rules: Rules::default(),
    }
}

fn loaded(level: LevelData) -> World {
    let mut world = World::new();
    let mut events = Vec::new();
    world::load_level(&mut world, level, &mut events).expect("test level is valid");
    world
}

fn step(world: &mut World, direction: Direction) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Move { direction }, &mut events);
    events
}

fn undo(world: &mut World) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Undo, &mut events);
    events
}

#[test]
fn undo_walks_back_through_every_recorded_move() {
    let mut world = loaded(field());
    let script = [
        Direction::Up,
        Direction::Up,
        Direction::Left,
        Direction::Left,
    ];
    let mut trail = vec![observe(&world)];
    for direction in script {
        let _ = step(&mut world, direction);
        trail.push(observe(&world));
    }
    assert_eq!(query::history_len(&world), script.len());
    assert_eq!(query::snake(&world).len(), 4, "first banana was eaten");
    assert!(query::food_cleared(&world), "second banana fell into the pit");

    let _ = trail.pop();
    while let Some(expected) = trail.pop() {
        let events = undo(&mut world);
        assert_eq!(
            events,
            vec![Event::UndoApplied {
                remaining: trail.len()
            }]
        );
        assert_eq!(observe(&world), expected, "undo must restore the exact state");
    }
    assert_eq!(query::history_len(&world), 0);
}

#[test]
fn undo_with_empty_history_is_a_no_op() {
    let mut world = loaded(field());
    let before = observe(&world);

    let events = undo(&mut world);

    assert_eq!(events, vec![Event::UndoRejected]);
    assert_eq!(observe(&world), before);
}

#[test]
fn ignored_moves_are_not_recorded() {
    let mut world = loaded(field());

    let _ = step(&mut world, Direction::Down);

    assert_eq!(query::history_len(&world), 0);
}

#[test]
fn undo_recovers_from_a_loss() {
    let mut level = field();
    level.snake = SnakeStart {
        head: Cell::new(1, 0),
        length: 2,
        heading: Direction::Left,
    };
    level.floor = vec!["PPFFFF".to_owned(); 6];
    level.food.truncate(1);
    let mut world = loaded(level);
    let before = observe(&world);

    let events = step(&mut world, Direction::Left);
    assert!(events.contains(&Event::LevelLost));

    let _ = undo(&mut world);

    assert_eq!(query::status(&world), LevelStatus::Playing);
    assert_eq!(observe(&world), before);
}

fn won_world(undo_after_win: bool) -> World {
    let mut level = field();
    level.food = vec![FoodPlacement {
        kind: FoodKind::Banana,
        cell: Cell::new(1, 3),
    }];
    level.wormhole = Cell::new(1, 4);
    level.rules.undo_after_win = undo_after_win;
    let mut world = loaded(level);
    for direction in [Direction::Up, Direction::Left, Direction::Left, Direction::Up] {
        let _ = step(&mut world, direction);
    }
    assert_eq!(query::status(&world), LevelStatus::Won);
    world
}

#[test]
fn undo_is_refused_after_a_win_by_default() {
    let mut world = won_world(false);
    let history = query::history_len(&world);

    let events = undo(&mut world);

    assert_eq!(events, vec![Event::UndoRejected]);
    assert_eq!(query::status(&world), LevelStatus::Won);
    assert_eq!(query::history_len(&world), history);
}

#[test]
fn undo_after_a_win_can_be_enabled() {
    let mut world = won_world(true);
    assert_eq!(query::history_len(&world), 4, "the winning step is recorded");

    let events = undo(&mut world);

    assert!(matches!(events.as_slice(), [Event::UndoApplied { remaining: 3 }]));
    assert_eq!(query::status(&world), LevelStatus::Playing);
    assert_eq!(
        query::segments(&world)[0],
        Cell::new(1, 3),
        "one undo reverts only the step into the wormhole",
    );
    assert!(query::food_cleared(&world));
    assert!(query::wormhole_active(&world));
}
