#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session controller that drives the Wormhole Snake world one input at a
//! time.
//!
//! A [`Session`] owns the authoritative [`World`], forwards player intents as
//! commands, and folds the resulting events into [`MoveOutcome`] values for a
//! presentation layer. Pending rainbow pushes resolve eagerly or one step at a
//! time through [`Session::rainbow_steps`], depending on the level rules.

use log::{debug, info};
use wormhole_snake_core::{
    Cell, Command, Direction, Event, FoodSnapshot, LevelData, LevelStatus, MoveOutcome,
    RainbowMode, SnakeSnapshot,
};
use wormhole_snake_world::{self as world, query, Board, LevelError, World};

/// Owns the world for a single player and translates intents into outcomes.
#[derive(Debug, Default)]
pub struct Session {
    world: World,
    events: Vec<Event>,
}

impl Session {
    /// Creates a session without a level. Moves are rejected until one is
    /// initialised.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session and initialises it with the provided level.
    pub fn with_level(level: LevelData) -> Result<Self, LevelError> {
        let mut session = Self::new();
        session.initialize_level(level)?;
        Ok(session)
    }

    /// Validates the level and replaces whatever was loaded before. On error
    /// the session keeps its previous state.
    pub fn initialize_level(&mut self, level: LevelData) -> Result<(), LevelError> {
        let mut events = Vec::new();
        world::load_level(&mut self.world, level, &mut events)?;
        self.events = events;
        Ok(())
    }

    /// Attempts a single directional move and reports everything it changed.
    ///
    /// Under [`RainbowMode::Immediate`] a rainbow push started by the move is
    /// resolved before returning and its steps are folded into the outcome.
    /// Under [`RainbowMode::Stepped`] the outcome reports `rainbow_pending` and
    /// the caller drains [`Session::rainbow_steps`].
    pub fn attempt_move(&mut self, direction: Direction) -> MoveOutcome {
        self.events.clear();
        world::apply(
            &mut self.world,
            Command::Move { direction },
            &mut self.events,
        );

        if query::rules(&self.world).rainbow == RainbowMode::Immediate {
            while query::is_animating(&self.world) {
                world::apply(&mut self.world, Command::AdvanceRainbow, &mut self.events);
            }
        }

        let outcome = self.outcome();
        debug!("move {direction:?} resolved to {outcome:?}");
        outcome
    }

    /// Reverts the most recent recorded move. Returns `false` when nothing
    /// was reverted.
    pub fn undo(&mut self) -> bool {
        self.submit(Command::Undo);
        self.events
            .iter()
            .any(|event| matches!(event, Event::UndoApplied { .. }))
    }

    /// Re-seeds the current level. Returns `false` when no level is loaded.
    pub fn restart(&mut self) -> bool {
        self.submit(Command::Restart);
        let restarted = self
            .events
            .iter()
            .any(|event| matches!(event, Event::LevelLoaded { .. }));
        if restarted {
            info!("level restarted");
        }
        restarted
    }

    /// Lazily commits the pending rainbow push one atomic step at a time.
    ///
    /// Each item summarises one committed step. The sequence ends when the
    /// push is blocked or the level ends, and it cannot be restarted.
    pub fn rainbow_steps(&mut self) -> RainbowSteps<'_> {
        RainbowSteps { session: self }
    }

    /// Events produced by the most recent call that changed or inspected the
    /// world.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Copy of the snake, head first.
    #[must_use]
    pub fn snake(&self) -> SnakeSnapshot {
        query::snake(&self.world)
    }

    /// Current heading of the snake.
    #[must_use]
    pub fn heading(&self) -> Direction {
        query::heading(&self.world)
    }

    /// Every food item on the board.
    #[must_use]
    pub fn food(&self) -> Vec<FoodSnapshot> {
        query::food(&self.world)
    }

    /// Current level status.
    #[must_use]
    pub fn status(&self) -> LevelStatus {
        query::status(&self.world)
    }

    /// Reports whether the wormhole accepts the snake.
    #[must_use]
    pub fn wormhole_active(&self) -> bool {
        query::wormhole_active(&self.world)
    }

    /// Cell hosting the wormhole.
    #[must_use]
    pub fn wormhole(&self) -> Cell {
        query::wormhole(&self.world)
    }

    /// Name of the loaded level, if any.
    #[must_use]
    pub fn level_name(&self) -> Option<&str> {
        query::level(&self.world).map(|level| level.name.as_str())
    }

    /// Reports whether a rainbow push is waiting for its next step.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        query::is_animating(&self.world)
    }

    /// Number of moves undo can still revert.
    #[must_use]
    pub fn history_len(&self) -> usize {
        query::history_len(&self.world)
    }

    /// Board layers of the loaded level.
    #[must_use]
    pub fn board(&self) -> &Board {
        query::board(&self.world)
    }

    /// Read-only access to the underlying world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    fn submit(&mut self, command: Command) {
        self.events.clear();
        world::apply(&mut self.world, command, &mut self.events);
    }

    fn outcome(&self) -> MoveOutcome {
        let mut outcome = fold_events(&self.events);
        outcome.rainbow_pending = query::is_animating(&self.world);
        outcome
    }
}

/// Lazy sequence of committed rainbow steps. See [`Session::rainbow_steps`].
#[must_use = "iterators are lazy and commit nothing unless consumed"]
#[derive(Debug)]
pub struct RainbowSteps<'a> {
    session: &'a mut Session,
}

impl Iterator for RainbowSteps<'_> {
    type Item = MoveOutcome;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.session.is_animating() {
            return None;
        }
        self.session.submit(Command::AdvanceRainbow);
        let outcome = self.session.outcome();
        if outcome.rainbow_steps == 0 {
            return None;
        }
        Some(outcome)
    }
}

/// Summarises a batch of world events as a single outcome.
///
/// `rainbow_pending` is left unset because it depends on world state rather
/// than on the events themselves.
#[must_use]
pub fn fold_events(events: &[Event]) -> MoveOutcome {
    let mut outcome = MoveOutcome::default();
    for event in events {
        match event {
            Event::SnakeAdvanced { .. } => outcome.moved = true,
            Event::FoodPushed { food, .. } => {
                if !outcome.pushed_food_ids.contains(food) {
                    outcome.pushed_food_ids.push(*food);
                }
            }
            Event::FoodDroppedInPit { food, .. } => {
                outcome.dropped_in_pit = true;
                outcome.destroyed_food_ids.push(*food);
            }
            Event::PushBlocked { .. } => outcome.push_blocked = true,
            Event::FoodEaten { food, kind, .. } => {
                outcome.ate = Some(*kind);
                outcome.destroyed_food_ids.push(*food);
            }
            Event::SnakeGrew { .. } => outcome.grew = true,
            Event::RainbowStepApplied { .. } => {
                outcome.rainbow_steps = outcome.rainbow_steps.saturating_add(1);
            }
            Event::WormholeOpened { .. } => outcome.wormhole_opened = true,
            Event::LevelWon { .. } => outcome.won = true,
            Event::LevelLost => outcome.died = true,
            Event::MoveRejected { reason, .. } => outcome.rejection = Some(*reason),
            Event::LevelLoaded { .. }
            | Event::RainbowStarted { .. }
            | Event::RainbowSettled { .. }
            | Event::UndoApplied { .. }
            | Event::UndoRejected => {}
        }
    }
    outcome
}
