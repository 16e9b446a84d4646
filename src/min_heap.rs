//! Min-priority queue keyed on node weight.
//!
//! Equal weights come out in insertion order, so draining the queue is a pure
//! function of the sequence of inserts.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Anything the queue can order.
pub trait Weighted {
    fn weight(&self) -> u64;
}

struct Entry<T> {
    weight: u64,
    seq: u64,
    item: T,
}

impl<T> Eq for Entry<T> {}
impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}
impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed: BinaryHeap is a max-heap
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

pub struct PriorityQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T: Weighted> PriorityQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    pub fn insert(&mut self, item: T) {
        let entry = Entry {
            weight: item.weight(),
            seq: self.next_seq,
            item,
        };
        self.next_seq += 1;
        self.heap.push(entry);
    }

    pub fn peek_min(&self) -> Option<&T> {
        self.heap.peek().map(|e| &e.item)
    }

    pub fn remove_min(&mut self) -> Option<T> {
        self.heap.pop().map(|e| e.item)
    }

    pub fn size(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T: Weighted> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
