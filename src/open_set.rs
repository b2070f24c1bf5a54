//! Priority queue of search nodes awaiting expansion.

/// Priority of an entry; smaller pops first.
///
/// Equal `f` prefers the smaller `h`, and after that the earlier push.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Priority {
    f: u32,
    h: u32,
    seq: u64,
}

#[derive(Debug)]
struct Entry<T> {
    priority: Priority,
    item: T,
}

/// Binary min-heap keyed by `(f, h, push order)`.
///
/// Pops are deterministic: items with equal `f` and `h` come out in the order
/// they were pushed.
#[derive(Debug)]
pub struct OpenSet<T> {
    heap: Vec<Entry<T>>,
    next_seq: u64,
}

impl<T> Default for OpenSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OpenSet<T> {
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn push(&mut self, f: u32, h: u32, item: T) {
        let priority = Priority {
            f,
            h,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.heap.push(Entry { priority, item });
        self.sift_up(self.heap.len() - 1);
    }

    /// Removes the entry with the smallest priority.
    pub fn pop(&mut self) -> Option<T> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let entry = self.heap.pop()?;
        self.sift_down(0);
        Some(entry.item)
    }

    /// `(f, h)` of the entry [`OpenSet::pop`] would return.
    #[cfg(test)]
    pub fn peek_priority(&self) -> Option<(u32, u32)> {
        self.heap.first().map(|entry| (entry.priority.f, entry.priority.h))
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.heap[pos].priority >= self.heap[parent].priority {
                break;
            }
            self.heap.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;
            if left < len && self.heap[left].priority < self.heap[smallest].priority {
                smallest = left;
            }
            if right < len && self.heap[right].priority < self.heap[smallest].priority {
                smallest = right;
            }
            if smallest == pos {
                return;
            }
            self.heap.swap(pos, smallest);
            pos = smallest;
        }
    }
}
