// Index arithmetic for array-backed heaps of arity `A`.
//
// For a binary heap the nodes are laid out level by level,
//
// ```text
//                           0
//              1                         2
//       3            4            5             6
//   7      8      9     10    11     12     13     14
// 15 16  17 18  19 20  21 22 23 24  25
// ```
//
// and the last level is usually incomplete. Wider heaps follow the same
// pattern with `A` children per node.

/// The parent node
///
/// ```
/// use classic_search::heap_primitives::index_parent;
/// assert_eq!(index_parent::<2>(1), 0);
/// assert_eq!(index_parent::<2>(2), 0);
/// assert_eq!(index_parent::<2>(5), 2);
/// assert_eq!(index_parent::<2>(25), 12);
/// assert_eq!(index_parent::<4>(4), 0);
/// assert_eq!(index_parent::<4>(5), 1);
/// ```
#[inline(always)]
#[must_use]
pub fn index_parent<const A: usize>(i: usize) -> usize {
    debug_assert!(i != 0, "The root has no parent");
    (i - 1) / A
}

/// The first child
///
/// ```
/// use classic_search::heap_primitives::index_first_child;
/// assert_eq!(index_first_child::<2>(0), 1);
/// assert_eq!(index_first_child::<2>(3), 7);
/// assert_eq!(index_first_child::<4>(1), 5);
/// ```
#[inline(always)]
#[must_use]
pub fn index_first_child<const A: usize>(i: usize) -> usize {
    (A * i) + 1
}

/// The children of `i` that exist in a heap of `len` elements.
///
/// ```
/// use classic_search::heap_primitives::index_children;
/// assert_eq!(index_children::<2>(0, 10), 1..3);
/// assert_eq!(index_children::<4>(1, 7), 5..7);
/// assert!(index_children::<4>(2, 7).is_empty());
/// ```
#[inline(always)]
#[must_use]
pub fn index_children<const A: usize>(i: usize, len: usize) -> std::ops::Range<usize> {
    let first = index_first_child::<A>(i);
    first.min(len)..(first + A).min(len)
}
