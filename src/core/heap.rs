use crate::error::{Error, Result};
use std::cmp::Ordering;

/// Array-backed binary min-heap with an optional "keep smallest N" bound.
///
/// The element order is supplied at construction as a strict three-way
/// comparator; the heap itself places no trait bounds on `T`. The smallest
/// element (per the comparator) is always at the root.
///
/// When constructed with [`BinaryMinHeap::keep_smallest`], memory is bounded
/// by capping the tree depth: the capacity is the size of the complete binary
/// tree whose leaf level is the shallowest one with at least `n` slots,
/// `2^ceil(log2(n + 1)) - 1`. Once the heap property holds, any element in the
/// last occupied slot of a tree deeper than that is provably not among the `n`
/// smallest, so it can be evicted without ever discarding a true minimum.
pub struct BinaryMinHeap<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    buf: Vec<T>,
    cmp: C,
    max_size: Option<usize>,
}

impl<T, C> BinaryMinHeap<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Create an unbounded heap ordered by `cmp`.
    pub fn new(cmp: C) -> Self {
        Self {
            buf: Vec::new(),
            cmp,
            max_size: None,
        }
    }

    /// Create an unbounded heap with backing storage reserved for `pre_size`
    /// elements up front.
    pub fn with_capacity(cmp: C, pre_size: usize) -> Self {
        Self {
            buf: Vec::with_capacity(pre_size),
            cmp,
            max_size: None,
        }
    }

    /// Create a heap guaranteed to retain the `n` smallest elements ever
    /// pushed, evicting from the deepest occupied slot beyond that.
    ///
    /// Errors with [`Error::InvalidParam`] when `n` is zero.
    pub fn keep_smallest(cmp: C, n: usize) -> Result<Self> {
        if n == 0 {
            return Err(Error::InvalidParam(
                "keep-smallest bound must be at least 1".into(),
            ));
        }
        let max_size = next_power_of_two_above(n) - 1;
        Ok(Self {
            buf: Vec::with_capacity(max_size + 1),
            cmp,
            max_size: Some(max_size),
        })
    }

    /// Number of elements currently held.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True when the heap holds no elements.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The size cap, if this heap was built with a keep-smallest bound.
    pub fn bound(&self) -> Option<usize> {
        self.max_size
    }

    /// Push an element, restoring the heap property by swimming it up.
    ///
    /// If the heap is bounded and the push overflows the cap, the element in
    /// the last occupied slot is removed and returned. That slot holds the
    /// structural maximum reachable at the capped depth, never one of the
    /// guaranteed smallest.
    pub fn push(&mut self, item: T) -> Option<T> {
        self.buf.push(item);
        self.swim(self.buf.len() - 1);
        match self.max_size {
            Some(cap) if self.buf.len() > cap => Some(self.remove_at(self.buf.len() - 1)),
            _ => None,
        }
    }

    /// Remove and return the smallest element.
    pub fn pop_min(&mut self) -> Result<T> {
        if self.buf.is_empty() {
            return Err(Error::EmptyQueue);
        }
        Ok(self.remove_at(0))
    }

    /// Borrow the smallest element without removing it.
    pub fn peek_min(&self) -> Result<&T> {
        self.buf.first().ok_or(Error::EmptyQueue)
    }

    /// Remove the element at `idx` by swapping in the last element and
    /// sinking it. Only called for the root and for the last slot, where a
    /// sink fully restores the heap property.
    fn remove_at(&mut self, idx: usize) -> T {
        let out = self.buf.swap_remove(idx);
        if idx < self.buf.len() {
            self.sink(idx);
        }
        out
    }

    fn swim(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if (self.cmp)(&self.buf[idx], &self.buf[parent]) == Ordering::Less {
                self.buf.swap(idx, parent);
                idx = parent;
            } else {
                return;
            }
        }
    }

    fn sink(&mut self, mut idx: usize) {
        loop {
            let left = 2 * idx + 1;
            if left >= self.buf.len() {
                return;
            }
            let right = left + 1;
            let mut min_child = left;
            if right < self.buf.len()
                && (self.cmp)(&self.buf[right], &self.buf[left]) == Ordering::Less
            {
                min_child = right;
            }
            if (self.cmp)(&self.buf[idx], &self.buf[min_child]) == Ordering::Greater {
                self.buf.swap(idx, min_child);
                idx = min_child;
            } else {
                return;
            }
        }
    }
}

impl<T, C> std::fmt::Debug for BinaryMinHeap<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinaryMinHeap")
            .field("len", &self.len())
            .field("bound", &self.bound())
            .finish()
    }
}

/// Smallest power of two strictly greater than `num`.
fn next_power_of_two_above(num: usize) -> usize {
    let mut next = 1usize;
    while next <= num {
        next *= 2;
    }
    next
}
