/// Accumulated path cost.
///
/// Costs must be non-negative for the priority-ordered searches to return
/// optimal paths. Nothing checks this at runtime.
pub trait Cost:
    Copy
    + std::fmt::Debug
    + std::fmt::Display
    + PartialEq
    + core::cmp::Eq
    + PartialOrd
    + Ord
    + std::hash::Hash
    + num_traits::SaturatingAdd
    + num_traits::bounds::UpperBounded
    + num_traits::Zero
    + num_traits::One
    + std::ops::Add<Self, Output = Self>
    + std::ops::Sub<Self, Output = Self>
    + std::ops::AddAssign
{
    /// Whether the cost is still finite.
    ///
    /// Searches drop children whose cost saturated, so `max_value()` can
    /// stand for a missing edge.
    ///
    /// ```
    /// use classic_search::cost::Cost;
    /// assert!(7u32.valid());
    /// assert!(!u32::MAX.valid());
    /// ```
    #[inline(always)]
    fn valid(&self) -> bool {
        *self != num_traits::bounds::UpperBounded::max_value()
    }
}

impl Cost for u16 {}
impl Cost for u32 {}
impl Cost for u64 {}
impl Cost for usize {}
