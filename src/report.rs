use crate::{ClusteringResult, Primitive};
use std::fmt;

/// Human readable summary of a run: the final cohesion, then every cluster's
/// normalized centroid and member count.
pub struct Summary<'a, T: Primitive> {
    result: &'a ClusteringResult<T>,
}

impl<T: Primitive> ClusteringResult<T> {
    pub fn summary(&self) -> Summary<'_, T> {
        Summary { result: self }
    }
}

impl<'a, T: Primitive> fmt::Display for Summary<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cohesion: {}", self.result.cohesion)?;
        for (idx, (centroid, cluster)) in self.result.centroids.iter().zip(self.result.clusters.iter()).enumerate() {
            write!(f, "Cluster {} centroid (normalized):", idx + 1)?;
            for v in centroid {
                write!(f, " {}", v)?;
            }
            writeln!(f)?;
            writeln!(f, "Cluster {} assigned points: {}", idx + 1, cluster.len())?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use crate::{Dataset, KMeans, KMeansConfig};

    #[test]
    fn summary_lists_every_cluster() {
        let kmean = KMeans::new(Dataset::from_rows(vec![vec![1.0f64], vec![2.0], vec![3.0]])).unwrap();
        let conf = KMeansConfig::build().seed(4).build();
        let result = kmean.run(1, &conf).unwrap();
        let text = result.summary().to_string();
        assert_eq!(text, "Cohesion: 2\nCluster 1 centroid (normalized): 0\nCluster 1 assigned points: 3\n");
    }
}
