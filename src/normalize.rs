use crate::{Dataset, Primitive};
use rayon::prelude::*;

/// Per-dimension z-score statistics of a raw dataset.
///
/// Computed once from the raw input and immutable afterwards. Dimensions whose
/// values are identical across all points get a standard deviation of exactly
/// zero, and normalize to `0` instead of dividing by zero.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizationStats<T: Primitive> {
    /// Arithmetic mean per dimension
    pub mean: Vec<T>,
    /// Sample standard deviation per dimension (Bessel-corrected when more than one value contributed)
    pub std_dev: Vec<T>,
}

impl<T: Primitive> NormalizationStats<T> {
    /// Compute mean and sample standard deviation for every dimension of **data**.
    ///
    /// The dimensionality is the longest coordinate vector in the dataset; a point
    /// that is shorter simply does not contribute to the dimensions it lacks.
    pub fn compute(data: &Dataset<T>) -> Self {
        let dims = data.dims();
        let mut mean = vec![T::zero(); dims];
        let mut count = vec![0usize; dims];
        let mut min = vec![T::infinity(); dims];
        let mut max = vec![T::neg_infinity(); dims];

        // Sequential in id order, so that the sums are bit-for-bit reproducible
        for (_, point) in data.iter() {
            for (d, &v) in point.iter().enumerate() {
                mean[d] += v;
                count[d] += 1;
                min[d] = min[d].min(v);
                max[d] = max[d].max(v);
            }
        }
        mean.iter_mut().zip(count.iter().cloned())
            .filter(|(_, c)| *c != 0)
            .for_each(|(m, c)| *m = *m / T::from_count(c));

        let mut std_dev = vec![T::zero(); dims];
        for (_, point) in data.iter() {
            for (d, &v) in point.iter().enumerate() {
                let diff = v - mean[d];
                std_dev[d] += diff * diff;
            }
        }
        for d in 0..dims {
            if count[d] > 1 {
                std_dev[d] = std_dev[d] / T::from_count(count[d] - 1);
            }
            std_dev[d] = std_dev[d].sqrt();
            if min[d] == max[d] {
                std_dev[d] = T::zero();
            }
        }

        Self { mean, std_dev }
    }

    pub fn dims(&self) -> usize { self.mean.len() }

    /// First dimension whose mean or standard deviation left the floating point range.
    pub fn non_finite_dim(&self) -> Option<usize> {
        self.mean.iter().zip(self.std_dev.iter())
            .position(|(m, sd)| !m.is_finite() || !sd.is_finite())
    }

    /// Dimensions with zero standard deviation.
    pub fn degenerate_dims(&self) -> Vec<usize> {
        self.std_dev.iter().enumerate()
            .filter(|(_, sd)| sd.is_zero())
            .map(|(d, _)| d)
            .collect()
    }

    /// Z-score a single point.
    pub fn normalize_point(&self, point: &[T]) -> Vec<T> {
        point.iter().cloned().zip(self.mean.iter().cloned().zip(self.std_dev.iter().cloned()))
            .map(|(v, (mean, sd))| if sd.is_zero() { T::zero() } else { (v - mean) / sd })
            .collect()
    }

    /// Map a normalized vector back into raw coordinates.
    /// Degenerate dimensions map back onto their (constant) mean.
    pub fn denormalize_point(&self, point: &[T]) -> Vec<T> {
        point.iter().cloned().zip(self.mean.iter().cloned().zip(self.std_dev.iter().cloned()))
            .map(|(v, (mean, sd))| v * sd + mean)
            .collect()
    }

    /// Produce a standardized copy of **data**, sharing its key space. **data** is left untouched.
    pub fn normalize(&self, data: &Dataset<T>) -> Dataset<T> {
        let coords = data.coords().par_iter()
            .map(|point| self.normalize_point(point))
            .collect();
        data.with_coords(coords)
    }
}
