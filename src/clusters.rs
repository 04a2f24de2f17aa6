use crate::PointId;
use std::collections::BTreeMap;

/// The members of one cluster, keyed by point id, holding their raw (non-normalized) coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cluster<T> {
    members: BTreeMap<PointId, Vec<T>>,
}

impl<T> Cluster<T> {
    pub fn len(&self) -> usize { self.members.len() }

    pub fn is_empty(&self) -> bool { self.members.is_empty() }

    pub fn contains(&self, id: PointId) -> bool { self.members.contains_key(&id) }

    pub fn get(&self, id: PointId) -> Option<&[T]> {
        self.members.get(&id).map(|c| c.as_slice())
    }

    pub fn ids(&self) -> impl Iterator<Item = PointId> + '_ {
        self.members.keys().cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PointId, &[T])> + '_ {
        self.members.iter().map(|(id, c)| (*id, c.as_slice()))
    }

    pub(crate) fn insert(&mut self, id: PointId, coords: Vec<T>) {
        self.members.insert(id, coords);
    }
}

/// A partition of a dataset into K clusters; every point id appears in exactly one of them.
/// Cluster `i` belongs to centroid `i`.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterAssignment<T> {
    clusters: Vec<Cluster<T>>,
}

impl<T> ClusterAssignment<T> {
    pub(crate) fn new(k: usize) -> Self {
        Self {
            clusters: (0..k).map(|_| Cluster { members: BTreeMap::new() }).collect(),
        }
    }

    pub(crate) fn cluster_mut(&mut self, idx: usize) -> &mut Cluster<T> {
        &mut self.clusters[idx]
    }

    /// Number of clusters (K), including empty ones.
    pub fn len(&self) -> usize { self.clusters.len() }

    pub fn is_empty(&self) -> bool { self.clusters.is_empty() }

    pub fn get(&self, idx: usize) -> Option<&Cluster<T>> { self.clusters.get(idx) }

    pub fn iter(&self) -> std::slice::Iter<'_, Cluster<T>> { self.clusters.iter() }

    /// Index of the cluster containing **id**.
    pub fn cluster_of(&self, id: PointId) -> Option<usize> {
        self.clusters.iter().position(|c| c.contains(id))
    }

    /// Total number of assigned points across all clusters.
    pub fn point_count(&self) -> usize {
        self.clusters.iter().map(|c| c.len()).sum()
    }

    /// Longest coordinate vector among all assigned points.
    pub fn max_dims(&self) -> usize {
        self.clusters.iter()
            .flat_map(|c| c.members.values().map(|v| v.len()))
            .max()
            .unwrap_or(0)
    }
}

impl<'a, T> IntoIterator for &'a ClusterAssignment<T> {
    type Item = &'a Cluster<T>;
    type IntoIter = std::slice::Iter<'a, Cluster<T>>;

    fn into_iter(self) -> Self::IntoIter { self.clusters.iter() }
}
