//! # Indexed Binary Min-Heap
//!
//! Array-backed binary min-heap over `(vertex, key)` pairs with a side table
//! mapping each vertex to its current slot, so `decrease_key` runs in
//! O(log n) without searching the heap.
//!
//! The heap has a fixed capacity chosen at construction and never grows.
//! Vertex ids must lie in `0..capacity`.

use crate::error::{Error, Result};

/// A `(vertex, key)` entry of the heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapNode {
    vertex: usize,
    key: u64,
}

impl HeapNode {
    pub fn vertex(&self) -> usize {
        self.vertex
    }

    pub fn key(&self) -> u64 {
        self.key
    }
}

#[derive(Debug, Clone)]
pub struct IndexedMinHeap {
    nodes: Vec<HeapNode>,
    /// `positions[v]` is the slot of vertex `v`, `None` if not queued.
    positions: Vec<Option<usize>>,
    capacity: usize,
}

fn parent(i: usize) -> usize {
    (i - 1) / 2
}

fn left(i: usize) -> usize {
    2 * i + 1
}

fn right(i: usize) -> usize {
    2 * i + 2
}

impl IndexedMinHeap {
    /// Creates an empty heap holding at most `capacity` vertices.
    pub fn new(capacity: usize) -> Self {
        IndexedMinHeap {
            nodes: Vec::with_capacity(capacity),
            positions: vec![None; capacity],
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether `vertex` is currently queued.
    pub fn contains(&self, vertex: usize) -> bool {
        matches!(self.positions.get(vertex), Some(Some(_)))
    }

    /// Current key of a queued vertex.
    pub fn key_of(&self, vertex: usize) -> Option<u64> {
        let slot = (*self.positions.get(vertex)?)?;
        Some(self.nodes[slot].key)
    }

    /// Inserts `vertex` with priority `key`.
    ///
    /// # Errors
    /// * `CapacityExceeded` if the heap is full
    /// * `IndexOutOfRange` if `vertex >= capacity`
    /// * `InvalidInput` if `vertex` is already queued
    pub fn insert(&mut self, vertex: usize, key: u64) -> Result<()> {
        if self.nodes.len() == self.capacity {
            return Err(Error::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        Error::check_index(vertex, self.capacity)?;
        if self.positions[vertex].is_some() {
            return Err(Error::invalid_input(format!(
                "vertex {vertex} is already queued"
            )));
        }

        let i = self.nodes.len();
        self.nodes.push(HeapNode { vertex, key });
        self.positions[vertex] = Some(i);
        self.sift_up(i);
        Ok(())
    }

    /// Lowers the key of `vertex` to `new_key`.
    ///
    /// A vertex that is no longer queued is ignored. Raising a key is
    /// rejected and leaves the heap untouched.
    pub fn decrease_key(&mut self, vertex: usize, new_key: u64) -> Result<()> {
        Error::check_index(vertex, self.capacity)?;
        let Some(i) = self.positions[vertex] else {
            return Ok(());
        };

        let current = self.nodes[i].key;
        if new_key > current {
            return Err(Error::InvalidKeyUpdate {
                current,
                requested: new_key,
            });
        }

        self.nodes[i].key = new_key;
        self.sift_up(i);
        Ok(())
    }

    /// The node with the smallest key, without removing it.
    pub fn peek(&self) -> Result<&HeapNode> {
        self.nodes.first().ok_or(Error::EmptyCollection)
    }

    /// Removes and returns the node with the smallest key.
    pub fn extract_min(&mut self) -> Result<HeapNode> {
        if self.nodes.is_empty() {
            return Err(Error::EmptyCollection);
        }

        let last = self.nodes.len() - 1;
        self.swap(0, last);
        let root = self.nodes.pop().ok_or(Error::EmptyCollection)?;
        self.positions[root.vertex] = None;

        if !self.nodes.is_empty() {
            self.sift_down(0);
        }
        Ok(root)
    }

    /// Swaps two slots and keeps the position table in step.
    fn swap(&mut self, a: usize, b: usize) {
        self.nodes.swap(a, b);
        self.positions[self.nodes[a].vertex] = Some(a);
        self.positions[self.nodes[b].vertex] = Some(b);
    }

    fn sift_up(&mut self, mut i: usize) {
        while i != 0 && self.nodes[i].key < self.nodes[parent(i)].key {
            self.swap(i, parent(i));
            i = parent(i);
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.nodes.len();
        loop {
            let (l, r) = (left(i), right(i));
            let mut smallest = i;
            if l < len && self.nodes[l].key < self.nodes[smallest].key {
                smallest = l;
            }
            if r < len && self.nodes[r].key < self.nodes[smallest].key {
                smallest = r;
            }
            if smallest == i {
                break;
            }
            self.swap(i, smallest);
            i = smallest;
        }
    }

    #[cfg(test)]
    fn is_valid(&self) -> bool {
        let heap_order =
            (1..self.nodes.len()).all(|i| self.nodes[parent(i)].key <= self.nodes[i].key);
        let index_consistent = self
            .nodes
            .iter()
            .enumerate()
            .all(|(slot, node)| self.positions[node.vertex] == Some(slot));
        let queued = self.positions.iter().filter(|p| p.is_some()).count();
        heap_order && index_consistent && queued == self.nodes.len()
    }
}
