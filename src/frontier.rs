//! Frontier containers.
//!
//! The frontier only holds handles into the `SearchTree`. Which handle comes
//! out next is what tells the searches apart.

use std::collections::VecDeque;
use std::fmt::Debug;

use num_traits::SaturatingAdd;
use rustc_hash::FxHashMap;

use crate::cost::Cost;
use crate::heap_primitives::index_children;
use crate::heap_primitives::index_parent;
use crate::search::SearchTreeIndex;

/// The ranking tuple for priority frontiers.
///
/// We prefer better f-values, and tie break for lower h. Without a heuristic
/// `f == g` and `h == 0`.
///
/// ```
/// use classic_search::frontier::Rank;
///
/// assert!(Rank::new(2u32, 0) < Rank::new(2u32, 1));
/// // Same f-value, needs tie-breaking on h
/// assert!(Rank::new(3u32, 0) < Rank::new(0u32, 3));
/// assert_eq!(Rank::uniform(3u32).f(), 3);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rank<C: Cost> {
    f: C,
    h: C,
}

impl<C> Rank<C>
where
    C: Cost,
{
    pub fn new(g: C, h: C) -> Self {
        Self {
            f: g.saturating_add(&h),
            h,
        }
    }
    /// Rank for searches without a heuristic.
    pub fn uniform(g: C) -> Self {
        Self::new(g, C::zero())
    }

    #[inline(always)]
    pub fn f(&self) -> C {
        self.f
    }
    #[inline(always)]
    pub fn h(&self) -> C {
        self.h
    }
}

pub trait Frontier<C: Cost>: Debug {
    fn push(&mut self, node: SearchTreeIndex, rank: Rank<C>);
    fn pop(&mut self) -> Option<SearchTreeIndex>;
    /// Puts `new` where `old` was, re-ranked.
    ///
    /// Returns `false` if `old` isn't in the frontier.
    fn replace(&mut self, old: SearchTreeIndex, new: SearchTreeIndex, rank: Rank<C>) -> bool;

    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First-in first-out. Ranks are ignored.
#[derive(Debug, Default)]
pub struct FifoFrontier {
    queue: VecDeque<SearchTreeIndex>,
}

impl FifoFrontier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Cost> Frontier<C> for FifoFrontier {
    #[inline(always)]
    fn push(&mut self, node: SearchTreeIndex, _rank: Rank<C>) {
        self.queue.push_back(node);
    }
    #[inline(always)]
    fn pop(&mut self) -> Option<SearchTreeIndex> {
        self.queue.pop_front()
    }
    /// Linear scan. Breadth-first search never calls this, it admits
    /// states once.
    fn replace(&mut self, old: SearchTreeIndex, new: SearchTreeIndex, _rank: Rank<C>) -> bool {
        match self.queue.iter_mut().find(|n| **n == old) {
            Some(n) => {
                *n = new;
                true
            }
            None => false,
        }
    }
    #[inline(always)]
    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Last-in first-out. Ranks are ignored.
#[derive(Debug, Default)]
pub struct LifoFrontier {
    stack: Vec<SearchTreeIndex>,
}

impl LifoFrontier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Cost> Frontier<C> for LifoFrontier {
    #[inline(always)]
    fn push(&mut self, node: SearchTreeIndex, _rank: Rank<C>) {
        self.stack.push(node);
    }
    #[inline(always)]
    fn pop(&mut self) -> Option<SearchTreeIndex> {
        self.stack.pop()
    }
    /// Linear scan from the top. Depth-first search never calls this, it
    /// admits states once.
    fn replace(&mut self, old: SearchTreeIndex, new: SearchTreeIndex, _rank: Rank<C>) -> bool {
        match self.stack.iter_mut().rev().find(|n| **n == old) {
            Some(n) => {
                *n = new;
                true
            }
            None => false,
        }
    }
    #[inline(always)]
    fn len(&self) -> usize {
        self.stack.len()
    }
}

const HEAP_ARITY: usize = 4usize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct HeapNode<C: Cost> {
    rank: Rank<C>,
    /// Insertion order, so equally ranked nodes pop first-come first-served.
    seq: u64,
    node_index: SearchTreeIndex,
}

/// A min-heap of `Rank`s that can find and re-rank its entries.
///
/// Keeps the heap position of every entry in a side index so
/// `Frontier::replace` doesn't need a linear search.
///
/// ```pseudocode
/// for (i, hn) in self.heap.enumerate():
///   assert_eq(self.positions[hn.node_index], i)
/// ```
#[derive(Debug)]
pub struct PriorityFrontier<C: Cost> {
    heap: Vec<HeapNode<C>>,
    positions: FxHashMap<SearchTreeIndex, usize>,
    pushed: u64,
}

impl<C: Cost> Default for PriorityFrontier<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Cost> PriorityFrontier<C> {
    pub fn new() -> Self {
        Self {
            heap: vec![],
            positions: FxHashMap::default(),
            pushed: 0,
        }
    }

    /// The rank of the best node, if any.
    pub fn peek_rank(&self) -> Option<Rank<C>> {
        self.heap.first().map(|n| n.rank)
    }

    #[inline(always)]
    fn next_seq(&mut self) -> u64 {
        let seq = self.pushed;
        self.pushed += 1;
        seq
    }

    /// Swaps two heap slots, keeping `positions` in sync.
    #[inline(always)]
    fn swap(&mut self, l: usize, r: usize) {
        self.heap.swap(l, r);
        self.positions.insert(self.heap[l].node_index, l);
        self.positions.insert(self.heap[r].node_index, r);
    }

    /// Raises a node. Returns its new index.
    fn sift_up(&mut self, mut index: usize) -> usize {
        while index > 0 {
            let parent = index_parent::<HEAP_ARITY>(index);
            if self.heap[parent] <= self.heap[index] {
                break;
            }
            self.swap(parent, index);
            index = parent;
        }
        index
    }

    /// Lowers a node. Returns its new index.
    fn sift_down(&mut self, mut index: usize) -> usize {
        let len = self.heap.len();
        loop {
            // Find the best child
            let Some(child) = index_children::<HEAP_ARITY>(index, len)
                .min_by(|&l, &r| self.heap[l].cmp(&self.heap[r]))
            else {
                break;
            };
            if self.heap[index] <= self.heap[child] {
                break;
            }
            self.swap(index, child);
            index = child;
        }
        index
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    fn verify_heap(&self) {
        // All good... (hopefully)
    }
    #[inline(always)]
    #[cfg(feature = "verify")]
    fn verify_heap(&self) {
        assert_eq!(self.heap.len(), self.positions.len());
        // Every node,
        for (i, e) in self.heap.iter().enumerate() {
            // - Has the right position indexed.
            assert_eq!(self.positions.get(&e.node_index), Some(&i));

            // - Goes after its parent node, if any.
            if i == 0 {
                continue;
            }
            let p = index_parent::<HEAP_ARITY>(i);
            assert!(
                self.heap[p] <= self.heap[i],
                "Node[{p}]={:?} !<= child [{i}]={:?}. Out of heap of len={}",
                self.heap[p],
                self.heap[i],
                self.heap.len(),
            );
        }
    }
}

impl<C: Cost> Frontier<C> for PriorityFrontier<C> {
    fn push(&mut self, node_index: SearchTreeIndex, rank: Rank<C>) {
        debug_assert!(!self.positions.contains_key(&node_index));
        let seq = self.next_seq();
        let heap_index = self.heap.len();
        self.heap.push(HeapNode {
            rank,
            seq,
            node_index,
        });
        self.positions.insert(node_index, heap_index);
        self.sift_up(heap_index);

        self.verify_heap();
    }

    fn pop(&mut self) -> Option<SearchTreeIndex> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        if last != 0 {
            self.swap(0, last);
        }
        let top = self.heap.pop()?;
        self.positions.remove(&top.node_index);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }

        self.verify_heap();
        Some(top.node_index)
    }

    fn replace(&mut self, old: SearchTreeIndex, new: SearchTreeIndex, rank: Rank<C>) -> bool {
        let Some(heap_index) = self.positions.remove(&old) else {
            return false;
        };
        let seq = self.next_seq();
        let replacement = HeapNode {
            rank,
            seq,
            node_index: new,
        };
        let worse = replacement > self.heap[heap_index];
        self.heap[heap_index] = replacement;
        self.positions.insert(new, heap_index);
        if worse {
            self.sift_down(heap_index);
        } else {
            self.sift_up(heap_index);
        }

        self.verify_heap();
        true
    }

    #[inline(always)]
    fn len(&self) -> usize {
        self.heap.len()
    }
}
