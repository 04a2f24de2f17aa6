use num::{NumCast, Zero, Float};
use std::{
    fmt::{Debug, Display, LowerExp}, iter::Sum, ops::{Add, AddAssign, Sub, SubAssign}
};
use rand::distributions::uniform::SampleUniform;

/// Floating point type the clustering engine can compute with.
pub trait Primitive: Add + AddAssign + Sum + Sub + SubAssign + Zero + Float + NumCast + SampleUniform
                + PartialOrd + Copy + Default + Display + Debug + Sync + Send + LowerExp + 'static
                + for<'a> AddAssign<&'a Self> {
    /// Convert an `f64` constant into this primitive.
    #[inline(always)]
    fn constant(value: f64) -> Self {
        // f64 -> f32/f64 casts never fail, they saturate or round
        <Self as NumCast>::from(value).unwrap_or_else(Self::zero)
    }

    /// Convert a count into this primitive.
    #[inline(always)]
    fn from_count(count: usize) -> Self {
        <Self as NumCast>::from(count).unwrap_or_else(Self::max_value)
    }
}
impl Primitive for f32 {}
impl Primitive for f64 {}
