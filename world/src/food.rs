//! Occupancy index mapping cells to the food items resting on them.

use std::collections::BTreeMap;

use wormhole_snake_core::{Cell, FoodId, FoodKind, FoodSnapshot};
use wormhole_snake_system_push::Displacement;

/// Arena of food items addressed by identifier plus a cell lookup.
///
/// Every item's recorded cell has exactly one entry in `by_cell`, and that
/// entry names the item. Both maps change together or not at all.
#[derive(Clone, Debug, Default)]
pub(crate) struct FoodIndex {
    items: BTreeMap<FoodId, FoodSnapshot>,
    by_cell: BTreeMap<Cell, FoodId>,
}

impl FoodIndex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Places a new item. Returns `false` and leaves the index untouched when
    /// the cell is already taken or the identifier is in use.
    pub(crate) fn insert(&mut self, id: FoodId, kind: FoodKind, cell: Cell) -> bool {
        if self.by_cell.contains_key(&cell) || self.items.contains_key(&id) {
            return false;
        }
        let _ = self.by_cell.insert(cell, id);
        let _ = self.items.insert(id, FoodSnapshot { id, kind, cell });
        true
    }

    pub(crate) fn food_at(&self, cell: Cell) -> Option<FoodId> {
        self.by_cell.get(&cell).copied()
    }

    pub(crate) fn get(&self, id: FoodId) -> Option<&FoodSnapshot> {
        self.items.get(&id)
    }

    /// Relocates the item resting on `from`. Does nothing when `from` is empty
    /// or `to` is taken.
    pub(crate) fn move_food(&mut self, from: Cell, to: Cell) {
        if self.by_cell.contains_key(&to) {
            return;
        }
        let Some(id) = self.by_cell.remove(&from) else {
            return;
        };
        let _ = self.by_cell.insert(to, id);
        if let Some(item) = self.items.get_mut(&id) {
            item.cell = to;
        }
    }

    /// Removes and returns the item resting on `cell`.
    pub(crate) fn remove_food(&mut self, cell: Cell) -> Option<FoodSnapshot> {
        let id = self.by_cell.remove(&cell)?;
        self.items.remove(&id)
    }

    /// Commits a batch of displacements as one unit.
    ///
    /// All moving items leave their cells before any of them lands, so a batch
    /// planned against the committed state never collides with itself.
    pub(crate) fn commit(&mut self, displacements: &[Displacement]) {
        let mut lifted: Vec<(FoodSnapshot, &Displacement)> = Vec::with_capacity(displacements.len());
        for displacement in displacements {
            if let Some(item) = self.remove_food(displacement.from()) {
                lifted.push((item, displacement));
            }
        }

        for (mut item, displacement) in lifted {
            if let Displacement::Slide { to, .. } = *displacement {
                item.cell = to;
                let _ = self.insert(item.id, item.kind, item.cell);
            }
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    /// Items in identifier order.
    pub(crate) fn snapshots(&self) -> Vec<FoodSnapshot> {
        self.items.values().copied().collect()
    }

    /// Replaces the whole index with previously captured items.
    pub(crate) fn restore(&mut self, items: &[FoodSnapshot]) {
        self.items.clear();
        self.by_cell.clear();
        for item in items {
            let _ = self.insert(item.id, item.kind, item.cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_with(cells: &[(u32, Cell)]) -> FoodIndex {
        let mut index = FoodIndex::new();
        for (id, cell) in cells {
            assert!(index.insert(FoodId::new(*id), FoodKind::Banana, *cell));
        }
        index
    }

    #[test]
    fn occupied_cell_rejects_second_item() {
        let mut index = index_with(&[(0, Cell::new(1, 1))]);
        assert!(!index.insert(FoodId::new(1), FoodKind::RainbowPotion, Cell::new(1, 1)));
        assert_eq!(index.len(), 1);
        assert_eq!(index.food_at(Cell::new(1, 1)), Some(FoodId::new(0)));
    }

    #[test]
    fn moving_from_an_empty_cell_is_a_no_op() {
        let mut index = index_with(&[(0, Cell::new(1, 1))]);
        index.move_food(Cell::new(5, 5), Cell::new(6, 6));
        assert_eq!(index.snapshots()[0].cell, Cell::new(1, 1));
        assert_eq!(index.food_at(Cell::new(6, 6)), None);
    }

    #[test]
    fn move_keeps_both_maps_in_sync() {
        let mut index = index_with(&[(3, Cell::new(0, 0))]);
        index.move_food(Cell::new(0, 0), Cell::new(0, 1));
        assert_eq!(index.food_at(Cell::new(0, 0)), None);
        assert_eq!(index.food_at(Cell::new(0, 1)), Some(FoodId::new(3)));
        assert_eq!(
            index.get(FoodId::new(3)).map(|item| item.cell),
            Some(Cell::new(0, 1))
        );
    }

    #[test]
    fn commit_lifts_before_landing() {
        let mut index = index_with(&[(0, Cell::new(0, 0)), (1, Cell::new(1, 0))]);
        index.commit(&[
            Displacement::Slide {
                food: FoodId::new(0),
                from: Cell::new(0, 0),
                to: Cell::new(1, 0),
            },
            Displacement::Drop {
                food: FoodId::new(1),
                from: Cell::new(1, 0),
                pit: Cell::new(2, 0),
            },
        ]);

        assert_eq!(index.len(), 1);
        assert_eq!(index.food_at(Cell::new(1, 0)), Some(FoodId::new(0)));
    }

    #[test]
    fn restore_replaces_contents() {
        let mut index = index_with(&[(0, Cell::new(0, 0))]);
        let captured = index.snapshots();
        let _ = index.remove_food(Cell::new(0, 0));
        assert!(index.is_empty());

        index.restore(&captured);
        assert_eq!(index.snapshots(), captured);
    }
}
