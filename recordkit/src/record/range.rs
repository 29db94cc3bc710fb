//! Slice bound resolution shared by lists and views.

use std::ops::{Bound, Range, RangeBounds};

/// Resolve `bounds` against a sequence of length `len`.
///
/// Out-of-range bounds clamp to `len`; an inverted range becomes the empty
/// range at its start, which is also the insertion point for slice writes.
pub(crate) fn resolve<R: RangeBounds<usize>>(bounds: R, len: usize) -> Range<usize> {
    let start = match bounds.start_bound() {
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => s.saturating_add(1),
        Bound::Unbounded => 0,
    }
    .min(len);
    let end = match bounds.end_bound() {
        Bound::Included(&e) => e.saturating_add(1),
        Bound::Excluded(&e) => e,
        Bound::Unbounded => len,
    }
    .min(len);
    start..end.max(start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        assert_eq!(resolve(.., 3), 0..3);
        assert_eq!(resolve(1.., 3), 1..3);
        assert_eq!(resolve(..2, 3), 0..2);
        assert_eq!(resolve(..=1, 3), 0..2);
        assert_eq!(resolve(1..10, 3), 1..3);
        assert_eq!(resolve(5.., 3), 3..3);
        assert_eq!(resolve(2..1, 3), 2..2);
    }
}
