//! Path metric arithmetic
//!
//! A metric must accumulate (path = parent path + edge) and must order
//! totally, including floating-point values that compare equal or NaN.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::ops::{Add, Sub};

/// Numeric type usable as a branch/path metric
///
/// `order` must be a total order. Floats use `total_cmp`, so `-0.0 < 0.0`
/// and NaN sorts after every finite value instead of poisoning comparisons.
pub trait Metric: Copy + Debug + PartialEq + Add<Output = Self> + Sub<Output = Self> {
    /// Additive identity, the root's path metric
    const ZERO: Self;

    /// Total order over metric values
    fn order(&self, other: &Self) -> Ordering;

    /// Whether `self` and `other` differ by at most `tolerance`
    fn within(self, other: Self, tolerance: f64) -> bool;
}

macro_rules! float_metric {
    ($($t:ty),*) => {$(
        impl Metric for $t {
            const ZERO: Self = 0.0;

            #[inline]
            fn order(&self, other: &Self) -> Ordering {
                self.total_cmp(other)
            }

            #[inline]
            fn within(self, other: Self, tolerance: f64) -> bool {
                ((self - other) as f64).abs() <= tolerance
            }
        }
    )*};
}

macro_rules! int_metric {
    ($($t:ty),*) => {$(
        impl Metric for $t {
            const ZERO: Self = 0;

            #[inline]
            fn order(&self, other: &Self) -> Ordering {
                self.cmp(other)
            }

            #[inline]
            fn within(self, other: Self, tolerance: f64) -> bool {
                (self as f64 - other as f64).abs() <= tolerance
            }
        }
    )*};
}

float_metric!(f32, f64);
int_metric!(i32, i64);
