use crate::{primitive::*, ClusterError, ClusterState, KMeans, KMeansConfig, Result};

#[inline(always)]
pub fn calculate<T: Primitive>(
    kmean: &KMeans<T>, state: &mut ClusterState<T>, _config: &KMeansConfig<'_, T>, computed: Vec<Vec<T>>,
) -> Result<()> {
    if computed.len() != state.k {
        return Err(ClusterError::CentroidCount { expected: state.k, found: computed.len() });
    }
    if let Some(c) = computed.iter().find(|c| c.len() != kmean.sample_dims()) {
        return Err(ClusterError::DimensionMismatch { left: kmean.sample_dims(), right: c.len() });
    }
    computed.into_iter().enumerate().for_each(|(ci, c)| {
        state.set_centroid_from_iter(ci, c.into_iter());
    });
    Ok(())
}
