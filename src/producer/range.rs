use core::ops::ControlFlow;

use num_traits::Zero;

use crate::cursor::Cursor;
use crate::producer::{IntoCursor, Producer};

/// Numbers that [`range`] can count with.
pub trait Step: Copy + PartialOrd + Zero {
    /// Returns `self + step`, or `None` if that overflows (or, for floats, makes no progress).
    fn forward(self, step: Self) -> Option<Self>;
}

macro_rules! step_int {
    ($($t:ty)*) => {$(
        impl Step for $t {
            #[inline]
            fn forward(self, step: Self) -> Option<Self> {
                self.checked_add(step)
            }
        }
    )*};
}

macro_rules! step_float {
    ($($t:ty)*) => {$(
        impl Step for $t {
            #[inline]
            fn forward(self, step: Self) -> Option<Self> {
                let next = self + step;
                if next == self {
                    None
                } else {
                    Some(next)
                }
            }
        }
    )*};
}

step_int!(u8 u16 u32 u64 u128 usize i8 i16 i32 i64 i128 isize);
step_float!(f32 f64);

/// Counts from a start value towards a bound, created with [`range`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range<T> {
    start: T,
    to: T,
    step: T,
}

/// Returns a producer that counts like a `for` loop: `start, start + step, ...` while the value is below
/// `to` (for a positive `step`) or above `to` (for a negative `step`). `to` itself is never yielded.
///
/// Counting stops when the next value would overflow the type. If `step` points away from `to`, the
/// producer is empty.
///
/// ```
/// use lazyseq::prelude::*;
///
/// assert_eq!(range(0, 10, 3).collect_vec(), vec![0, 3, 6, 9]);
/// assert_eq!(range(5, 0, -2).collect_vec(), vec![5, 3, 1]);
/// assert_eq!(range(250u8, 255, 4).collect_vec(), vec![250, 254]);
/// ```
///
/// #### Panics
///
/// Panics if `step` is zero.
pub fn range<T: Step>(start: T, to: T, step: T) -> Range<T> {
    assert!(!step.is_zero(), "range step must not be zero");
    Range { start, to, step }
}

impl<T: Step> Producer for Range<T> {
    type Item = T;

    fn drive<F>(self, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(T) -> ControlFlow<()>,
    {
        let mut cursor = self.into_cursor();
        while let Some(n) = cursor.advance() {
            f(n)?;
        }
        ControlFlow::Continue(())
    }
}

impl<T: Step> IntoCursor for Range<T> {
    type Cursor = RangeCursor<T>;

    fn into_cursor(self) -> Self::Cursor {
        RangeCursor {
            next: Some(self.start),
            to: self.to,
            step: self.step,
        }
    }
}

/// The cursor of a [`Range`] producer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeCursor<T> {
    next: Option<T>,
    to: T,
    step: T,
}

impl<T: Step> RangeCursor<T> {
    fn reached_bound(&self, n: T) -> bool {
        if self.step > T::zero() {
            n >= self.to
        } else {
            n <= self.to
        }
    }
}

impl<T: Step> Cursor for RangeCursor<T> {
    type Item = T;

    fn advance(&mut self) -> Option<T> {
        let n = self.next?;

        if self.reached_bound(n) {
            self.next = None;
            return None;
        }

        self.next = n.forward(self.step);
        Some(n)
    }

    fn release(&mut self) {
        self.next = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::prelude::*;

    #[test]
    fn step_pointing_away_is_empty() {
        assert_eq!(range(10, 0, 1).collect_vec(), Vec::<i32>::new());
        assert_eq!(range(0, 10, -1).collect_vec(), Vec::<i32>::new());
        assert_eq!(range(3, 3, 1).collect_vec(), Vec::<i32>::new());
    }

    #[test]
    fn stops_before_overflowing() {
        assert_eq!(range(i8::MAX - 2, i8::MAX, 1).collect_vec(), vec![125, 126]);
        assert_eq!(range(i8::MIN + 2, i8::MIN, -2).collect_vec(), vec![-126]);
        assert_eq!(range(253u8, u8::MAX, 100).collect_vec(), vec![253]);
        assert_eq!(range(i64::MIN, i64::MAX, i64::MAX).collect_vec(), vec![i64::MIN, -1, i64::MAX - 1]);
    }

    #[test]
    fn counts_floats() {
        assert_eq!(range(0.0, 1.0, 0.25).collect_vec(), vec![0.0, 0.25, 0.5, 0.75]);
        assert_eq!(range(1.0e20f64, 2.0e20, 1.0).take(3).collect_vec(), vec![1.0e20]);
    }

    #[test]
    #[should_panic(expected = "range step must not be zero")]
    fn zero_step_panics() {
        let _ = range(0, 10, 0);
    }
}
