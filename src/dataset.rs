use crate::{ClusterError, Primitive, Result};
use std::collections::BTreeMap;

/// Identifier of a point. Unique and stable for the duration of a run.
pub type PointId = usize;

/// A set of points, keyed by [`PointId`].
///
/// Points are kept sorted by identifier, which fixes the order in which the
/// clustering engine visits them (and therefore the order in which random
/// tie-break decisions are drawn).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset<T> {
    ids: Vec<PointId>,
    coords: Vec<Vec<T>>,
}

impl<T> Dataset<T> {
    /// Create a dataset from plain rows, assigning identifiers `1..=rows.len()`.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Self {
        Self {
            ids: (1..=rows.len()).collect(),
            coords: rows,
        }
    }

    pub fn len(&self) -> usize { self.ids.len() }

    pub fn is_empty(&self) -> bool { self.ids.is_empty() }

    /// Maximum coordinate-vector length across all points.
    pub fn dims(&self) -> usize {
        self.coords.iter().map(|c| c.len()).max().unwrap_or(0)
    }

    pub fn ids(&self) -> &[PointId] { &self.ids }

    pub fn get(&self, id: PointId) -> Option<&[T]> {
        self.ids.binary_search(&id).ok().map(|idx| self.coords[idx].as_slice())
    }

    pub fn contains(&self, id: PointId) -> bool {
        self.ids.binary_search(&id).is_ok()
    }

    /// Iterate over `(id, coordinates)` in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (PointId, &[T])> + '_ {
        self.ids.iter().cloned().zip(self.coords.iter().map(|c| c.as_slice()))
    }

    pub(crate) fn coords(&self) -> &[Vec<T>] { &self.coords }

    /// Build a dataset sharing this one's key space but with new coordinates.
    pub(crate) fn with_coords(&self, coords: Vec<Vec<T>>) -> Self where T: Clone {
        debug_assert_eq!(coords.len(), self.ids.len());
        Self { ids: self.ids.clone(), coords }
    }
}

impl<T: Primitive> Dataset<T> {
    /// Check that the dataset is non-empty, rectangular and finite.
    /// Returns the dimensionality shared by all points.
    pub fn validate(&self) -> Result<usize> {
        let dims = match self.coords.first() {
            Some(first) => first.len(),
            None => return Err(ClusterError::EmptyDataset),
        };
        if dims == 0 {
            return Err(ClusterError::ZeroDimensional);
        }
        for (id, point) in self.iter() {
            if point.len() != dims {
                return Err(ClusterError::RaggedPoint { id, expected: dims, found: point.len() });
            }
            if let Some(dim) = point.iter().position(|v| !v.is_finite()) {
                return Err(ClusterError::NonFiniteCoordinate { id, dim });
            }
        }
        Ok(dims)
    }
}

impl<T> From<BTreeMap<PointId, Vec<T>>> for Dataset<T> {
    fn from(points: BTreeMap<PointId, Vec<T>>) -> Self {
        let (ids, coords) = points.into_iter().unzip();
        Self { ids, coords }
    }
}

/// Later duplicates of an identifier replace earlier ones.
impl<T> FromIterator<(PointId, Vec<T>)> for Dataset<T> {
    fn from_iter<I: IntoIterator<Item = (PointId, Vec<T>)>>(iter: I) -> Self {
        iter.into_iter().collect::<BTreeMap<_, _>>().into()
    }
}
