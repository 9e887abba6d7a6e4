// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Strongly Typed Indices
//!
//! Phantom-typed wrappers around `usize` that keep the index spaces of a
//! routing problem apart. A `NodeIndex` can never be handed to an API that
//! expects an `EdgeIndex`, yet both compile down to a bare `usize`
//! (`#[repr(transparent)]`).
//!
//! ## Usage
//!
//! ```rust
//! use stigmergy_core::utils::index::{TypedIndex, TypedIndexTag};
//!
//! #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
//! struct NodeTag;
//! impl TypedIndexTag for NodeTag { const NAME: &'static str = "NodeIndex"; }
//!
//! type NodeIndex = TypedIndex<NodeTag>;
//! let n = NodeIndex::new(3);
//! assert_eq!(n.get(), 3);
//! assert_eq!(format!("{}", n), "NodeIndex(3)");
//! ```

/// Names an index space for `Debug` and `Display` output.
pub trait TypedIndexTag: Clone {
    const NAME: &'static str;
}

/// A `usize` index bound to the index space `T`.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T> {
    index: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T> TypedIndex<T> {
    /// Wraps a raw `usize` index.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: std::marker::PhantomData,
        }
    }

    /// Returns the underlying `usize` index.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }

    /// Returns the index following this one.
    ///
    /// Handy when handing out dense indices in insertion order.
    #[inline(always)]
    pub const fn next(&self) -> Self {
        Self::new(self.index + 1)
    }
}

impl<T> std::fmt::Debug for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> std::fmt::Display for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> From<usize> for TypedIndex<T> {
    #[inline(always)]
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl<T> From<TypedIndex<T>> for usize {
    #[inline(always)]
    fn from(typed_index: TypedIndex<T>) -> Self {
        typed_index.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
    struct RouteTag;

    impl TypedIndexTag for RouteTag {
        const NAME: &'static str = "RouteIdx";
    }

    type RouteIdx = TypedIndex<RouteTag>;

    #[test]
    fn test_new_and_get_round_trip() {
        let idx = RouteIdx::new(42);
        assert_eq!(idx.get(), 42);
        assert_eq!(usize::from(idx), 42);
        assert_eq!(RouteIdx::from(7usize).get(), 7);
    }

    #[test]
    fn test_next_increments_by_one() {
        let idx = RouteIdx::new(0);
        assert_eq!(idx.next().get(), 1);
        assert_eq!(idx.next().next().get(), 2);
    }

    #[test]
    fn test_debug_and_display_use_tag_name() {
        let idx = RouteIdx::new(5);
        assert_eq!(format!("{}", idx), "RouteIdx(5)");
        assert_eq!(format!("{:?}", idx), "RouteIdx(5)");
    }

    #[test]
    fn test_ordering_and_hashing_follow_raw_index() {
        let a = RouteIdx::new(1);
        let b = RouteIdx::new(2);
        assert!(a < b);

        let set: HashSet<RouteIdx> = [a, b, RouteIdx::new(1)].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_is_transparent_over_usize() {
        assert_eq!(
            std::mem::size_of::<RouteIdx>(),
            std::mem::size_of::<usize>()
        );
    }
}
