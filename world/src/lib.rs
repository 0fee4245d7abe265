#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Wormhole Snake.
//!
//! The world owns the board, the food occupancy index, the snake, the
//! wormhole, and the undo history. It changes only through [`load_level`] and
//! [`apply`], and reports every change it makes as an [`Event`].

mod board;
mod food;
mod history;
mod level;
mod snake;

pub use board::Board;
pub use history::GameSnapshot;
pub use level::LevelError;

use log::{debug, info, trace, warn};
use wormhole_snake_core::{
    BlockedPushRule, Cell, Command, Direction, Event, FoodId, FoodKind, LevelData, LevelStatus,
    RejectionReason, Rules,
};
use wormhole_snake_system_push::{self as push, Displacement, PushField, RainbowStep};
use wormhole_snake_system_rules::{self as rules, Wormhole};

use crate::{food::FoodIndex, history::History, snake::Snake};

/// Represents the authoritative Wormhole Snake world state.
#[derive(Debug)]
pub struct World {
    level: Option<LevelData>,
    rules: Rules,
    board: Board,
    snake: Snake,
    food: FoodIndex,
    wormhole: Wormhole,
    status: LevelStatus,
    history: History,
    cascade: Option<Cascade>,
}

/// Rainbow push waiting for its next step.
#[derive(Clone, Copy, Debug)]
struct Cascade {
    direction: Direction,
    steps: u32,
}

impl World {
    /// Creates an empty world. Every move is rejected until a level is loaded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            level: None,
            rules: Rules::default(),
            board: Board::from_layers::<String>(0, 0, &[], &[]),
            snake: Snake::from_start(Cell::new(0, 0), 0, Direction::Up),
            food: FoodIndex::new(),
            wormhole: Wormhole::closed(Cell::new(0, 0)),
            status: LevelStatus::Playing,
            history: History::new(),
            cascade: None,
        }
    }

    fn install(&mut self, level: LevelData, seed: level::Seed, out_events: &mut Vec<Event>) {
        info!(
            "loaded level '{}' with {} food item(s)",
            level.name,
            seed.food.len()
        );
        out_events.push(Event::LevelLoaded {
            name: level.name.clone(),
            food_count: seed.food.len(),
        });
        self.rules = level.rules;
        self.board = seed.board;
        self.snake = seed.snake;
        self.food = seed.food;
        self.wormhole = seed.wormhole;
        self.status = LevelStatus::Playing;
        self.history.clear();
        self.cascade = None;
        self.level = Some(level);
    }

    fn field(&self) -> Field<'_> {
        Field {
            board: &self.board,
            food: &self.food,
            snake: &self.snake,
        }
    }

    fn capture(&self) -> GameSnapshot {
        GameSnapshot {
            snake: self.snake.snapshot(),
            food: self.food.snapshots(),
        }
    }

    fn check_move(&self, direction: Direction) -> Result<(Cell, Cell), RejectionReason> {
        if self.level.is_none() {
            return Err(RejectionReason::NoLevel);
        }
        if self.status.is_terminal() {
            return Err(RejectionReason::LevelOver);
        }
        if self.cascade.is_some() {
            return Err(RejectionReason::Animating);
        }
        let head = self.snake.head().ok_or(RejectionReason::NoLevel)?;
        if direction == self.snake.heading().opposite() {
            return Err(RejectionReason::Reversal);
        }
        let target = head.step(direction);
        if self.snake.occupies(target) {
            return Err(RejectionReason::SelfCollision);
        }
        Ok((head, target))
    }

    fn attempt_move(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        let (from, target) = match self.check_move(direction) {
            Ok(cells) => cells,
            Err(reason) => {
                trace!("ignored move {direction:?}: {reason:?}");
                out_events.push(Event::MoveRejected { direction, reason });
                return;
            }
        };

        if self.wormhole.is_active() && target == self.wormhole.cell() {
            if self.rules.undo_after_win {
                let snapshot = self.capture();
                self.history.record(snapshot);
            }
            self.advance_head(from, target, direction, out_events);
            self.status = LevelStatus::Won;
            info!("snake entered the wormhole at {target}");
            out_events.push(Event::LevelWon { cell: target });
            return;
        }

        let snapshot = self.capture();
        self.history.record(snapshot);
        let committed = match self.food.food_at(target) {
            Some(food) => self.push_or_eat(food, from, target, direction, out_events),
            None if self.board.is_wall(target) => Err(RejectionReason::Wall),
            None => {
                self.advance_head(from, target, direction, out_events);
                Ok(false)
            }
        };

        let rainbow = match committed {
            Ok(rainbow) => rainbow,
            Err(reason) => {
                self.history.discard_latest();
                trace!("move {direction:?} changed nothing: {reason:?}");
                out_events.push(Event::MoveRejected { direction, reason });
                return;
            }
        };

        self.settle(out_events);

        if rainbow && !self.status.is_terminal() {
            let push_direction = direction.opposite();
            debug!("rainbow push started toward {push_direction:?}");
            self.cascade = Some(Cascade {
                direction: push_direction,
                steps: 0,
            });
            out_events.push(Event::RainbowStarted {
                direction: push_direction,
            });
        }
    }

    /// Resolves the food in front of the head. Returns whether a rainbow push
    /// should start.
    fn push_or_eat(
        &mut self,
        food: FoodId,
        from: Cell,
        target: Cell,
        direction: Direction,
        out_events: &mut Vec<Event>,
    ) -> Result<bool, RejectionReason> {
        let plan = push::plan_chain(&self.field(), target, direction);
        match plan {
            Ok(displacements) => {
                self.commit_chain(&displacements, out_events);
                self.advance_head(from, target, direction, out_events);
                Ok(false)
            }
            Err(blocked) => {
                debug!("push of {food:?} blocked at {}", blocked.obstacle);
                out_events.push(Event::PushBlocked {
                    food,
                    obstacle: blocked.obstacle,
                });
                match self.rules.blocked_push {
                    BlockedPushRule::Refuse => Err(RejectionReason::Blocked),
                    BlockedPushRule::Eat => Ok(self.eat(from, target, direction, out_events)),
                }
            }
        }
    }

    fn eat(
        &mut self,
        from: Cell,
        target: Cell,
        direction: Direction,
        out_events: &mut Vec<Event>,
    ) -> bool {
        let Some(item) = self.food.remove_food(target) else {
            self.advance_head(from, target, direction, out_events);
            return false;
        };
        debug!("snake ate {:?} {:?} at {target}", item.kind, item.id);
        out_events.push(Event::FoodEaten {
            food: item.id,
            kind: item.kind,
            cell: target,
        });
        self.advance_head(from, target, direction, out_events);

        match item.kind {
            FoodKind::Banana => {
                let tail = self.snake.grow();
                out_events.push(Event::SnakeGrew {
                    tail,
                    length: self.snake.len(),
                });
                false
            }
            FoodKind::RainbowPotion => true,
        }
    }

    fn advance_head(
        &mut self,
        from: Cell,
        target: Cell,
        direction: Direction,
        out_events: &mut Vec<Event>,
    ) {
        self.snake.shift(target, direction);
        debug!("snake advanced {direction:?} from {from} to {target}");
        out_events.push(Event::SnakeAdvanced {
            direction,
            from,
            to: target,
        });
    }

    fn commit_chain(&mut self, displacements: &[Displacement], out_events: &mut Vec<Event>) {
        for displacement in displacements {
            match *displacement {
                Displacement::Slide { food, from, to } => {
                    self.food.move_food(from, to);
                    out_events.push(Event::FoodPushed { food, from, to });
                }
                Displacement::Drop { food, from, pit } => {
                    let _ = self.food.remove_food(from);
                    debug!("{food:?} fell into the pit at {pit}");
                    out_events.push(Event::FoodDroppedInPit { food, pit });
                }
            }
        }
    }

    fn advance_rainbow(&mut self, out_events: &mut Vec<Event>) {
        let Some(mut cascade) = self.cascade else {
            trace!("no rainbow push pending");
            return;
        };

        let plan = push::plan_rainbow_step(&self.field(), self.snake.segments(), cascade.direction);
        let shift = match plan {
            RainbowStep::Shift(shift) => shift,
            RainbowStep::Blocked(blocked) => {
                debug!(
                    "rainbow push settled after {} step(s) against {}",
                    cascade.steps, blocked.obstacle
                );
                self.cascade = None;
                out_events.push(Event::RainbowSettled {
                    steps: cascade.steps,
                });
                return;
            }
        };

        cascade.steps = cascade.steps.saturating_add(1);
        out_events.push(Event::RainbowStepApplied {
            step: cascade.steps,
            direction: shift.direction,
        });
        self.food.commit(&shift.displacements);
        for displacement in &shift.displacements {
            out_events.push(match *displacement {
                Displacement::Slide { food, from, to } => Event::FoodPushed { food, from, to },
                Displacement::Drop { food, pit, .. } => Event::FoodDroppedInPit { food, pit },
            });
        }
        self.snake.slide_to(shift.segments);

        self.settle(out_events);
        if self.status.is_terminal() {
            self.cascade = None;
            out_events.push(Event::RainbowSettled {
                steps: cascade.steps,
            });
        } else {
            self.cascade = Some(cascade);
        }
    }

    /// Opens the wormhole when the food runs out and applies win or loss.
    fn settle(&mut self, out_events: &mut Vec<Event>) {
        if self.wormhole.refresh(self.food.len()) {
            info!("wormhole at {} opened", self.wormhole.cell());
            out_events.push(Event::WormholeOpened {
                cell: self.wormhole.cell(),
            });
        }

        let board = &self.board;
        let next = rules::evaluate(
            self.status,
            self.snake.segments(),
            &self.wormhole,
            |cell| board.is_pit(cell),
        );
        if next == self.status {
            return;
        }
        self.status = next;
        match next {
            LevelStatus::Won => {
                info!("snake reached the wormhole");
                out_events.push(Event::LevelWon {
                    cell: self.wormhole.cell(),
                });
            }
            LevelStatus::Lost => {
                info!("every segment fell into a pit");
                out_events.push(Event::LevelLost);
            }
            LevelStatus::Playing => {}
        }
    }

    fn undo(&mut self, out_events: &mut Vec<Event>) {
        if self.status == LevelStatus::Won && !self.rules.undo_after_win {
            trace!("undo refused after a win");
            out_events.push(Event::UndoRejected);
            return;
        }
        let Some(snapshot) = self.history.pop() else {
            trace!("undo requested with an empty history");
            out_events.push(Event::UndoRejected);
            return;
        };

        self.snake.restore(&snapshot.snake);
        self.food.restore(&snapshot.food);
        self.wormhole.reset(self.food.len());
        self.status = LevelStatus::Playing;
        self.cascade = None;
        debug!("undo restored a snapshot, {} left", self.history.len());
        out_events.push(Event::UndoApplied {
            remaining: self.history.len(),
        });
    }

    fn restart(&mut self, out_events: &mut Vec<Event>) {
        let Some(level) = self.level.take() else {
            trace!("restart requested without a level");
            return;
        };
        match level::seed(&level) {
            Ok(seed) => self.install(level, seed, out_events),
            Err(error) => {
                warn!("could not restart level '{}': {error}", level.name);
                self.level = Some(level);
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Push resolution view over the committed world state.
struct Field<'a> {
    board: &'a Board,
    food: &'a FoodIndex,
    snake: &'a Snake,
}

impl PushField for Field<'_> {
    fn is_wall(&self, cell: Cell) -> bool {
        self.board.is_wall(cell)
    }

    fn is_pit(&self, cell: Cell) -> bool {
        self.board.is_pit(cell)
    }

    fn food_at(&self, cell: Cell) -> Option<FoodId> {
        self.food.food_at(cell)
    }

    fn is_snake(&self, cell: Cell) -> bool {
        self.snake.occupies(cell)
    }
}

/// Validates the level description and seeds the world from it, replacing any
/// level that was loaded before. On error the world is left untouched.
pub fn load_level(
    world: &mut World,
    level: LevelData,
    out_events: &mut Vec<Event>,
) -> Result<(), LevelError> {
    let seed = level::seed(&level)?;
    world.install(level, seed, out_events);
    Ok(())
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Move { direction } => world.attempt_move(direction, out_events),
        Command::AdvanceRainbow => world.advance_rainbow(out_events),
        Command::Undo => world.undo(out_events),
        Command::Restart => world.restart(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use wormhole_snake_core::{
        Cell, Direction, FoodSnapshot, LevelData, LevelStatus, Rules, SnakeSnapshot,
    };

    use super::{Board, GameSnapshot, World};

    /// Current level status.
    #[must_use]
    pub fn status(world: &World) -> LevelStatus {
        world.status
    }

    /// Copy of the snake, head first.
    #[must_use]
    pub fn snake(world: &World) -> SnakeSnapshot {
        world.snake.snapshot()
    }

    /// Snake segment cells, head first.
    #[must_use]
    pub fn segments(world: &World) -> &[Cell] {
        world.snake.segments()
    }

    /// Current heading of the snake.
    #[must_use]
    pub fn heading(world: &World) -> Direction {
        world.snake.heading()
    }

    /// Every food item on the board in identifier order.
    #[must_use]
    pub fn food(world: &World) -> Vec<FoodSnapshot> {
        world.food.snapshots()
    }

    /// Food item resting on the cell, if any.
    #[must_use]
    pub fn food_at(world: &World, cell: Cell) -> Option<FoodSnapshot> {
        world
            .food
            .food_at(cell)
            .and_then(|id| world.food.get(id))
            .copied()
    }

    /// Reports whether every food item has been cleared.
    #[must_use]
    pub fn food_cleared(world: &World) -> bool {
        world.food.is_empty()
    }

    /// Cell hosting the wormhole.
    #[must_use]
    pub fn wormhole(world: &World) -> Cell {
        world.wormhole.cell()
    }

    /// Reports whether the wormhole accepts the snake.
    #[must_use]
    pub fn wormhole_active(world: &World) -> bool {
        world.wormhole.is_active()
    }

    /// Provides read-only access to the board layers.
    #[must_use]
    pub fn board(world: &World) -> &Board {
        &world.board
    }

    /// Rules of the loaded level.
    #[must_use]
    pub fn rules(world: &World) -> Rules {
        world.rules
    }

    /// Description of the loaded level, if any.
    #[must_use]
    pub fn level(world: &World) -> Option<&LevelData> {
        world.level.as_ref()
    }

    /// Reports whether a rainbow push is waiting for its next step.
    #[must_use]
    pub fn is_animating(world: &World) -> bool {
        world.cascade.is_some()
    }

    /// Number of moves that undo can still revert.
    #[must_use]
    pub fn history_len(world: &World) -> usize {
        world.history.len()
    }

    /// State that the next undo would restore.
    #[must_use]
    pub fn latest_snapshot(world: &World) -> Option<&GameSnapshot> {
        world.history.latest()
    }
}
