use std::fmt::Debug;

use num_traits::{Bounded, Num, NumCast, ToPrimitive};

/// A trait for types that can be used for indexed coordinates.
///
/// This trait is sealed and cannot be implemented for external types. Each coordinate type
/// carries a wider [`Distance`][IndexableNum::Distance] type in which squared distances are
/// accumulated, so that integral coordinates compare exactly. 8- and 16-bit integers accumulate
/// in 64 bits and 32-bit integers in 128 bits, so a sum of squared differences at the full range
/// of the coordinate type cannot overflow for fewer than 2^31 dimensions.
///
/// 64-bit integers are not supported: a single squared difference does not fit in any primitive
/// integer.
pub trait IndexableNum:
    private::Sealed
    + Num
    + NumCast
    + ToPrimitive
    + PartialOrd
    + Copy
    + Debug
    + Send
    + Sync
    + Bounded
    + 'static
{
    /// The type squared distances between coordinates of this type are expressed in.
    type Distance: Num + PartialOrd + Copy + Debug + Send + Sync + 'static;

    /// The squared difference between two coordinates, computed in [`Self::Distance`].
    fn sq_diff(self, other: Self) -> Self::Distance;

    /// Whether this value may be stored in an index. Always `true` for integers; floats must be
    /// finite.
    fn is_valid(self) -> bool;
}

macro_rules! impl_signed {
    ($($t:ty => $wide:ty),*) => {
        $(
            impl IndexableNum for $t {
                type Distance = $wide;

                #[inline]
                fn sq_diff(self, other: Self) -> $wide {
                    let d = self as $wide - other as $wide;
                    d * d
                }

                #[inline]
                fn is_valid(self) -> bool {
                    true
                }
            }
        )*
    };
}

macro_rules! impl_unsigned {
    ($($t:ty => $wide:ty),*) => {
        $(
            impl IndexableNum for $t {
                type Distance = $wide;

                #[inline]
                fn sq_diff(self, other: Self) -> $wide {
                    let (a, b) = (self as $wide, other as $wide);
                    let d = if a > b { a - b } else { b - a };
                    d * d
                }

                #[inline]
                fn is_valid(self) -> bool {
                    true
                }
            }
        )*
    };
}

macro_rules! impl_float {
    ($($t:ty),*) => {
        $(
            impl IndexableNum for $t {
                type Distance = f64;

                #[inline]
                fn sq_diff(self, other: Self) -> f64 {
                    let d = self as f64 - other as f64;
                    d * d
                }

                #[inline]
                fn is_valid(self) -> bool {
                    self.is_finite()
                }
            }
        )*
    };
}

impl_signed!(i8 => i64, i16 => i64, i32 => i128);
impl_unsigned!(u8 => u64, u16 => u64, u32 => u128);
impl_float!(f32, f64);

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for i8 {}
    impl Sealed for u8 {}
    impl Sealed for i16 {}
    impl Sealed for u16 {}
    impl Sealed for i32 {}
    impl Sealed for u32 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

#[cfg(test)]
mod test {
    use super::IndexableNum;

    #[test]
    fn unsigned_differences_do_not_wrap() {
        assert_eq!(0u8.sq_diff(255), 65025u64);
        assert_eq!(255u8.sq_diff(0), 65025u64);
        assert_eq!(u32::MAX.sq_diff(0), (u32::MAX as u128) * (u32::MAX as u128));
        assert_eq!(0u32.sq_diff(u32::MAX), (u32::MAX as u128) * (u32::MAX as u128));
    }

    #[test]
    fn signed_differences_widen() {
        assert_eq!(i8::MIN.sq_diff(i8::MAX), 255i64 * 255);
        assert_eq!((-3i32).sq_diff(4), 49i128);
        assert_eq!(i32::MIN.sq_diff(i32::MAX), (u32::MAX as i128) * (u32::MAX as i128));
        assert_eq!(i32::MAX.sq_diff(i32::MIN), (u32::MAX as i128) * (u32::MAX as i128));
    }

    #[test]
    fn floats_must_be_finite() {
        assert!(1.5f64.is_valid());
        assert!(!f64::NAN.is_valid());
        assert!(!f32::INFINITY.is_valid());
        assert!(i32::MIN.is_valid());
    }
}
