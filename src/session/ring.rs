//! Fixed-capacity ring buffer used by the event log and the trailing windows.

/// Bounded FIFO with O(1) append. Storage is allocated once up front; when the
/// buffer is full the slot at `head` (the oldest entry) is overwritten.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    slots: Vec<T>,
    capacity: usize,
    // Index of the oldest element once the buffer has wrapped.
    head: usize,
}

impl<T> RingBuffer<T> {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        RingBuffer {
            slots: Vec::with_capacity(capacity),
            capacity,
            head: 0,
        }
    }

    /// Appends `item`, returning the evicted oldest element when full.
    /// A zero-capacity buffer hands the item straight back.
    pub fn push(&mut self, item: T) -> Option<T> {
        if self.capacity == 0 {
            return Some(item);
        }
        if self.slots.len() < self.capacity {
            self.slots.push(item);
            return None;
        }
        let evicted = std::mem::replace(&mut self.slots[self.head], item);
        self.head = (self.head + 1) % self.capacity;
        Some(evicted)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates from oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        let (newer, older) = self.slots.split_at(self.head);
        older.iter().chain(newer.iter())
    }

    pub fn newest(&self) -> Option<&T> {
        self.iter().next_back()
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::RingBuffer;

    #[test]
    fn fills_then_evicts_oldest() {
        let mut ring = RingBuffer::with_capacity(3);
        assert_eq!(ring.push(1), None);
        assert_eq!(ring.push(2), None);
        assert_eq!(ring.push(3), None);
        assert_eq!(ring.push(4), Some(1));
        assert_eq!(ring.push(5), Some(2));
        assert_eq!(ring.to_vec(), vec![3, 4, 5]);
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.newest(), Some(&5));
    }

    #[test]
    fn wraps_many_times() {
        let mut ring = RingBuffer::with_capacity(4);
        for i in 0..103 {
            ring.push(i);
        }
        assert_eq!(ring.to_vec(), vec![99, 100, 101, 102]);
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut ring = RingBuffer::with_capacity(0);
        assert_eq!(ring.push("a"), Some("a"));
        assert!(ring.is_empty());
        assert_eq!(ring.newest(), None);
    }
}
