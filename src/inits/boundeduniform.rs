use crate::{primitive::*, ClusterState, Dataset, KMeans, KMeansConfig, Result};
use rand::prelude::*;

/// Per-dimension value range of a dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct Bounds<T: Primitive> {
    pub min: Vec<T>,
    pub max: Vec<T>,
}
impl<T: Primitive> Bounds<T> {
    pub fn compute(data: &Dataset<T>) -> Self {
        let dims = data.dims();
        let mut bounds = Self { min: vec![T::infinity(); dims], max: vec![T::neg_infinity(); dims] };
        for (_, point) in data.iter() {
            for (d, &v) in point.iter().enumerate() {
                bounds.min[d] = bounds.min[d].min(v);
                bounds.max[d] = bounds.max[d].max(v);
            }
        }
        bounds
    }

    /// Draw a value uniformly from `[min, max)` of dimension **dim**; a collapsed range yields its single value.
    pub fn sample<R: Rng + ?Sized>(&self, dim: usize, rnd: &mut R) -> T {
        let (lo, hi) = (self.min[dim], self.max[dim]);
        if lo < hi { rnd.gen_range(lo..hi) } else { lo }
    }
}

#[inline(always)]
pub fn calculate<T: Primitive>(kmean: &KMeans<T>, state: &mut ClusterState<T>, config: &KMeansConfig<'_, T>) -> Result<()> {
    let bounds = Bounds::compute(kmean.normalized());
    let mut rnd = config.rnd.borrow_mut();
    // centroid by centroid, dimension by dimension
    state.centroids.iter_mut().for_each(|centroid| {
        centroid.iter_mut().enumerate()
            .for_each(|(d, c)| *c = bounds.sample(d, &mut *rnd));
    });
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centroids_lie_within_normalized_bounds() {
        let data = Dataset::from_rows(vec![vec![1.0f64, 50.0, 7.0], vec![2.0, -20.0, 7.0], vec![9.0, 5.0, 7.0], vec![4.0, 0.0, 7.0]]);
        let kmean = KMeans::new(data).unwrap();
        let bounds = Bounds::compute(kmean.normalized());
        let conf = KMeansConfig::build().seed(1337).build();
        let mut state = ClusterState::new(kmean.sample_cnt(), kmean.sample_dims(), 64);

        KMeans::init_bounded_uniform(&kmean, &mut state, &conf).unwrap();

        for centroid in state.centroids.iter() {
            assert_eq!(centroid.len(), 3);
            for d in 0..2 {
                assert!(centroid[d] >= bounds.min[d] && centroid[d] < bounds.max[d]);
            }
            // constant dimension collapses to its single (normalized) value
            assert_eq!(centroid[2], 0.0);
        }
        assert_ne!(state.centroids[0], state.centroids[1]);
    }

    #[test]
    fn bounds_cover_all_points() {
        let data = Dataset::from_rows(vec![vec![-1.0f32, 4.0], vec![3.0, -2.0], vec![0.5, 0.5]]);
        let bounds = Bounds::compute(&data);
        assert_eq!(bounds.min, vec![-1.0, -2.0]);
        assert_eq!(bounds.max, vec![3.0, 4.0]);
    }

    #[test]
    fn same_seed_same_centroids() {
        let data = Dataset::from_rows(vec![vec![1.0f64, 2.0], vec![3.0, 5.0], vec![8.0, 13.0]]);
        let kmean = KMeans::new(data).unwrap();
        let draw = |seed: u64| {
            let conf = KMeansConfig::build().seed(seed).build();
            let mut state = ClusterState::new(kmean.sample_cnt(), kmean.sample_dims(), 4);
            KMeans::init_bounded_uniform(&kmean, &mut state, &conf).unwrap();
            state.centroids
        };
        assert_eq!(draw(21), draw(21));
        assert_ne!(draw(21), draw(22));
    }
}
