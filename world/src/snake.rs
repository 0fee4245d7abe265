//! Snake body bookkeeping: shifting, growing, and sliding.

use wormhole_snake_core::{Cell, Direction, SnakeSnapshot};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Snake {
    segments: Vec<Cell>,
    heading: Direction,
    last_tail: Cell,
}

impl Snake {
    /// Lays out `length` segments starting at `head` and trailing away from
    /// `heading`.
    pub(crate) fn from_start(head: Cell, length: u32, heading: Direction) -> Self {
        let trailing = heading.opposite();
        let mut segments = Vec::with_capacity(length as usize);
        let mut cursor = head;
        for _ in 0..length {
            segments.push(cursor);
            cursor = cursor.step(trailing);
        }
        let last_tail = segments.last().copied().unwrap_or(head);
        Self {
            segments,
            heading,
            last_tail,
        }
    }

    pub(crate) fn head(&self) -> Option<Cell> {
        self.segments.first().copied()
    }

    pub(crate) fn heading(&self) -> Direction {
        self.heading
    }

    pub(crate) fn segments(&self) -> &[Cell] {
        &self.segments
    }

    pub(crate) fn len(&self) -> usize {
        self.segments.len()
    }

    pub(crate) fn occupies(&self, cell: Cell) -> bool {
        self.segments.contains(&cell)
    }

    /// Moves the head to `target` and drags the body along, remembering the
    /// cell the tail left.
    pub(crate) fn shift(&mut self, target: Cell, heading: Direction) {
        if let Some(tail) = self.segments.pop() {
            self.last_tail = tail;
        }
        self.segments.insert(0, target);
        self.heading = heading;
    }

    /// Re-attaches the remembered tail cell and returns it.
    pub(crate) fn grow(&mut self) -> Cell {
        self.segments.push(self.last_tail);
        self.last_tail
    }

    /// Replaces every segment at once, keeping the heading.
    pub(crate) fn slide_to(&mut self, segments: Vec<Cell>) {
        if let Some(tail) = self.segments.last() {
            self.last_tail = *tail;
        }
        self.segments = segments;
    }

    pub(crate) fn snapshot(&self) -> SnakeSnapshot {
        SnakeSnapshot {
            segments: self.segments.clone(),
            heading: self.heading,
            last_tail: self.last_tail,
        }
    }

    pub(crate) fn restore(&mut self, snapshot: &SnakeSnapshot) {
        self.segments.clone_from(&snapshot.segments);
        self.heading = snapshot.heading;
        self.last_tail = snapshot.last_tail;
    }
}
