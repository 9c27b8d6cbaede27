use crate::collections::indexed_heap::{HeapNode, IndexedMinHeap};
use crate::error::Result;

/// A fixed-capacity min-priority queue of vertices.
///
/// Supports enqueue, dequeue, peek and decrease-key, which is the set of
/// operations Prim's and Dijkstra's traversals need.
#[derive(Debug, Clone)]
pub struct PriorityQueue {
    heap: IndexedMinHeap,
}

impl PriorityQueue {
    pub fn new(capacity: usize) -> Self {
        PriorityQueue {
            heap: IndexedMinHeap::new(capacity),
        }
    }

    /// Adds `vertex` with priority `key`. Fails with `CapacityExceeded` when full.
    pub fn enqueue(&mut self, vertex: usize, key: u64) -> Result<()> {
        self.heap.insert(vertex, key)
    }

    /// Removes the vertex with the lowest key. Fails with `EmptyCollection` when empty.
    pub fn dequeue(&mut self) -> Result<HeapNode> {
        self.heap.extract_min()
    }

    pub fn peek(&self) -> Result<&HeapNode> {
        self.heap.peek()
    }

    pub fn decrease_key(&mut self, vertex: usize, new_key: u64) -> Result<()> {
        self.heap.decrease_key(vertex, new_key)
    }

    pub fn contains(&self, vertex: usize) -> bool {
        self.heap.contains(vertex)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
