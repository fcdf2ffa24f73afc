//! Drag-and-drop reordering.
//!
//! Dropping one item onto another swaps their positions; every other item
//! keeps its place. The functions here are pure positional logic. Mapping
//! pointer events to a dragged and a dropped item is the caller's job.

/// Which way the drop target lies from the drag source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// The drop target follows the drag source.
    Forward,
    /// The drop target precedes the drag source.
    Backward,
}

/// A validated swap of two distinct positions.
///
/// Applying the plan removes the later item first and reinserts the
/// earlier position first, so neither step shifts the other's anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapPlan {
    dragged_index: usize,
    dropped_index: usize,
}

impl SwapPlan {
    /// Plan the swap, or `None` when both indices are the same.
    pub const fn new(dragged_index: usize, dropped_index: usize) -> Option<Self> {
        if dragged_index == dropped_index {
            return None;
        }
        Some(Self {
            dragged_index,
            dropped_index,
        })
    }

    /// Original position of the dragged item.
    pub const fn dragged_index(&self) -> usize {
        self.dragged_index
    }

    /// Original position of the item it was dropped on.
    pub const fn dropped_index(&self) -> usize {
        self.dropped_index
    }

    /// Where the drop target lies relative to the drag source.
    const fn direction(&self) -> Direction {
        if self.dropped_index > self.dragged_index {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    /// The two moves as `(item_original_index, destination_index)`, in the
    /// order they must be performed.
    ///
    /// The item headed for the earlier slot is placed first; placing it
    /// cannot disturb the later slot's anchor.
    const fn insertions(&self) -> [(usize, usize); 2] {
        match self.direction() {
            // The dropped item moves back to where the dragged one was.
            Direction::Forward => [
                (self.dropped_index, self.dragged_index),
                (self.dragged_index, self.dropped_index),
            ],
            // The dragged item moves back to where the dropped one was.
            Direction::Backward => [
                (self.dragged_index, self.dropped_index),
                (self.dropped_index, self.dragged_index),
            ],
        }
    }

    /// Perform the swap on `items`.
    ///
    /// Returns `false` and leaves `items` untouched if either index is out
    /// of bounds.
    pub fn apply<T>(&self, items: &mut Vec<T>) -> bool {
        let (earlier, later) = match self.direction() {
            Direction::Forward => (self.dragged_index, self.dropped_index),
            Direction::Backward => (self.dropped_index, self.dragged_index),
        };
        if later >= items.len() {
            return false;
        }
        let later_item = items.remove(later);
        let earlier_item = items.remove(earlier);
        let mut lifted = [(later, Some(later_item)), (earlier, Some(earlier_item))];
        for (from, to) in self.insertions() {
            let item = lifted
                .iter_mut()
                .find(|(index, _)| *index == from)
                .and_then(|(_, item)| item.take());
            if let Some(item) = item {
                items.insert(to, item);
            }
        }
        true
    }
}

/// Swap `dragged` and `dropped` in a copy of `sequence`.
///
/// Items are located by equality. If either is missing, or both are the
/// same item, the copy is returned unchanged.
pub fn reorder<T: Clone + PartialEq>(sequence: &[T], dragged: &T, dropped: &T) -> Vec<T> {
    reorder_by_key(sequence, dragged, dropped, |item| item.clone())
}

/// Swap the items whose key equals `dragged` and `dropped` in a copy of
/// `sequence`.
pub fn reorder_by_key<T, K, F>(sequence: &[T], dragged: &K, dropped: &K, key: F) -> Vec<T>
where
    T: Clone,
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let mut result = sequence.to_vec();
    let dragged_index = sequence.iter().position(|item| key(item) == *dragged);
    let dropped_index = sequence.iter().position(|item| key(item) == *dropped);
    let plan = dragged_index
        .zip(dropped_index)
        .and_then(|(from, to)| SwapPlan::new(from, to));
    if let Some(plan) = plan {
        plan.apply(&mut result);
    }
    result
}
