// Integer-weighted random choice.
//
// Items are laid out as consecutive, non-overlapping intervals on
// [0, total): item i owns [end(i-1), end(i)). A uniform draw in [0, total)
// selects the item whose interval contains it, found by binary search over
// the running interval ends. Zero-weight items own an empty interval and can
// never be selected, so they are dropped on insert.

use rand::Rng;

#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    items: Vec<T>,
    /// Exclusive end of each item's interval (running sum of weights).
    ends: Vec<u32>,
}

impl<T> Default for WeightedTable<T> {
    fn default() -> Self {
        WeightedTable {
            items: Vec::new(),
            ends: Vec::new(),
        }
    }
}

impl<T> WeightedTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item. Zero weights are ignored; the total saturates at
    /// `u32::MAX`, leaving later items with empty intervals.
    pub fn push(&mut self, item: T, weight: u32) {
        if weight == 0 {
            return;
        }
        let end = self.total().saturating_add(weight);
        self.items.push(item);
        self.ends.push(end);
    }

    pub fn total(&self) -> u32 {
        self.ends.last().copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The item whose interval contains `draw`, or None if `draw >= total`.
    pub fn pick(&self, draw: u32) -> Option<&T> {
        let idx = self.ends.partition_point(|&end| end <= draw);
        self.items.get(idx)
    }

    /// Draw uniformly in [0, total) and return the selected item.
    pub fn sample(&self, rng: &mut impl Rng) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        let draw = rng.random_range(0..self.total());
        self.pick(draw)
    }
}

impl<T> FromIterator<(T, u32)> for WeightedTable<T> {
    fn from_iter<I: IntoIterator<Item = (T, u32)>>(iter: I) -> Self {
        let mut table = WeightedTable::new();
        for (item, weight) in iter {
            table.push(item, weight);
        }
        table
    }
}
