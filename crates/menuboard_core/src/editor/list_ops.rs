//! Pure list transforms used by editor updaters.
//!
//! Each helper returns a new vector and leaves the input untouched, so the
//! result can become a fresh history snapshot.

/// Direction for `move_item`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

impl MoveDirection {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "up" | "-1" => Some(Self::Up),
            "down" | "1" | "+1" => Some(Self::Down),
            _ => None,
        }
    }
}

/// Contiguous slice of a list assigned to one display column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnChunk<'a, T> {
    /// Index of `items[0]` in the source list.
    pub start: usize,
    pub items: &'a [T],
}

/// Swaps the item at `index` with its neighbour in `direction`.
///
/// Out-of-range moves return an unchanged copy.
pub fn move_item<T: Clone>(items: &[T], index: usize, direction: MoveDirection) -> Vec<T> {
    let mut next = items.to_vec();
    let target = match direction {
        MoveDirection::Up => index.checked_sub(1),
        MoveDirection::Down => index.checked_add(1),
    };
    if let Some(target) = target {
        if index < next.len() && target < next.len() {
            let item = next.remove(index);
            next.insert(target, item);
        }
    }
    next
}

/// Applies `patch` to the item at `index`; other items are cloned as-is.
pub fn update_item<T: Clone>(items: &[T], index: usize, patch: impl FnOnce(&mut T)) -> Vec<T> {
    let mut next = items.to_vec();
    if let Some(item) = next.get_mut(index) {
        patch(item);
    }
    next
}

/// Drops the item at `index` (no-op when out of range).
pub fn remove_item<T: Clone>(items: &[T], index: usize) -> Vec<T> {
    items
        .iter()
        .enumerate()
        .filter(|(position, _)| *position != index)
        .map(|(_, item)| item.clone())
        .collect()
}

/// Splits `items` into up to `columns` balanced, contiguous chunks.
///
/// Chunk size is `ceil(len / columns)`; trailing empty chunks are dropped.
pub fn chunk_with_start<T>(items: &[T], columns: usize) -> Vec<ColumnChunk<'_, T>> {
    if items.is_empty() {
        return Vec::new();
    }
    let size = items.len().div_ceil(columns.max(1)).max(1);
    items
        .chunks(size)
        .enumerate()
        .take(columns.max(1))
        .map(|(column, chunk)| ColumnChunk {
            start: column * size,
            items: chunk,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{chunk_with_start, move_item, remove_item, update_item, MoveDirection};

    #[test]
    fn move_item_swaps_neighbours_and_ignores_edges() {
        let items = vec!['a', 'b', 'c'];
        assert_eq!(move_item(&items, 1, MoveDirection::Up), vec!['b', 'a', 'c']);
        assert_eq!(move_item(&items, 1, MoveDirection::Down), vec!['a', 'c', 'b']);
        assert_eq!(move_item(&items, 0, MoveDirection::Up), items);
        assert_eq!(move_item(&items, 2, MoveDirection::Down), items);
        assert_eq!(move_item(&items, 9, MoveDirection::Up), items);
    }

    #[test]
    fn update_and_remove_touch_only_target() {
        let items = vec![1, 2, 3];
        assert_eq!(update_item(&items, 1, |n| *n *= 10), vec![1, 20, 3]);
        assert_eq!(update_item(&items, 7, |n| *n *= 10), items);
        assert_eq!(remove_item(&items, 0), vec![2, 3]);
        assert_eq!(remove_item(&items, 7), items);
    }

    #[test]
    fn chunk_with_start_balances_columns() {
        let items: Vec<u32> = (0..7).collect();
        let chunks = chunk_with_start(&items, 3);
        let shape: Vec<_> = chunks.iter().map(|c| (c.start, c.items.len())).collect();
        assert_eq!(shape, vec![(0, 3), (3, 3), (6, 1)]);

        let few = [1, 2];
        let chunks = chunk_with_start(&few, 3);
        let shape: Vec<_> = chunks.iter().map(|c| (c.start, c.items.len())).collect();
        assert_eq!(shape, vec![(0, 1), (1, 1)]);

        assert!(chunk_with_start::<u8>(&[], 3).is_empty());
    }
}
