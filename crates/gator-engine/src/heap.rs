//! Array-backed binary min-heap primitives.
//!
//! Uses 0-indexed storage with parent = (i-1)/2, children = 2i+1, 2i+2.
//! Shared by the seat pool and the waitlist, which both need direct
//! access to the backing vector.

/// Move the element at `index` toward the root until its parent is not larger.
pub(crate) fn sift_up<T: Ord>(items: &mut [T], mut index: usize) {
    while index > 0 {
        let parent = (index - 1) / 2;
        if items[index] < items[parent] {
            items.swap(index, parent);
            index = parent;
        } else {
            break;
        }
    }
}

/// Move the element at `index` toward the leaves until both children are not smaller.
pub(crate) fn sift_down<T: Ord>(items: &mut [T], mut index: usize) {
    let len = items.len();
    loop {
        let left = 2 * index + 1;
        let right = left + 1;
        let mut smallest = index;

        if left < len && items[left] < items[smallest] {
            smallest = left;
        }
        if right < len && items[right] < items[smallest] {
            smallest = right;
        }

        if smallest == index {
            break;
        }

        items.swap(index, smallest);
        index = smallest;
    }
}

/// Restore heap order over an arbitrary slice in O(n).
pub(crate) fn heapify<T: Ord>(items: &mut [T]) {
    for index in (0..items.len() / 2).rev() {
        sift_down(items, index);
    }
}

/// Remove the element at `index`, keeping heap order. Returns `None` when out of range.
///
/// The last element takes the vacated slot; it may belong above or below
/// that position, so both directions are tried.
pub(crate) fn remove_at<T: Ord>(items: &mut Vec<T>, index: usize) -> Option<T> {
    if index >= items.len() {
        return None;
    }
    let removed = items.swap_remove(index);
    if index < items.len() {
        sift_down(items, index);
        sift_up(items, index);
    }
    Some(removed)
}

/// Whether `items` satisfies the min-heap property.
#[cfg(test)]
pub(crate) fn is_heap<T: Ord>(items: &[T]) -> bool {
    (1..items.len()).all(|i| items[(i - 1) / 2] <= items[i])
}
