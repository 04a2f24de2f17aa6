use crate::{ClusterError, Primitive, Result};

/// Squared Euclidean distance between two vectors of equal length.
#[inline(always)]
pub fn squared_distance<T: Primitive>(a: &[T], b: &[T]) -> Result<T> {
    if a.len() != b.len() {
        return Err(ClusterError::DimensionMismatch { left: a.len(), right: b.len() });
    }
    Ok(a.iter().cloned().zip(b.iter().cloned())
        .map(|(av, bv)| av - bv)    // <a> - <b>
        .map(|v| v * v)             // <vec_components> ^2
        .sum())
}

/// Euclidean (L2) distance between two vectors of equal length.
#[inline(always)]
pub fn euclidean_distance<T: Primitive>(a: &[T], b: &[T]) -> Result<T> {
    squared_distance(a, b).map(|d| d.sqrt())
}
