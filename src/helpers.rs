#[cfg(test)]
macro_rules! assert_approx_eq {
	($left: expr, $right: expr, $tol: expr) => ({
		match ($left, $right, $tol) {
			(left_val , right_val, tol_val) => {
				let delta = (left_val - right_val).abs();
				if !(delta < tol_val) {
					panic!(
						"assertion failed: `(left ≈ right)` \
						(left: `{}`, right: `{}`) \
						with ∆={:1.1e} (allowed ∆={:e})",
						left_val , right_val, delta, tol_val
					)
				}
			}
		}
	});
	($left: expr, $right: expr) => (assert_approx_eq!(($left), ($right), 1e-15))
}

#[cfg(test)]
pub(crate) mod testing {
	use std::collections::{BTreeSet, HashMap};

	use crate::{ClusterAssignment, Dataset, PointId, Primitive};

	/// Every point of **data** must be in exactly one cluster, with its raw coordinates.
	pub fn assert_partition<T: Primitive>(data: &Dataset<T>, clusters: &ClusterAssignment<T>) {
		let mut seen: BTreeSet<PointId> = BTreeSet::new();
		for cluster in clusters {
			for (id, coords) in cluster.iter() {
				assert!(seen.insert(id), "point {} is in more than one cluster", id);
				assert_eq!(Some(coords), data.get(id), "point {} lost its raw coordinates", id);
			}
		}
		let all: BTreeSet<PointId> = data.ids().iter().cloned().collect();
		assert_eq!(seen, all, "clusters do not cover the dataset");
	}

	/// Compare two partitions while ignoring the numbering of the clusters.
	pub fn assert_same_grouping<T: Primitive>(should: &[Vec<PointId>], actual: &ClusterAssignment<T>) {
		let mut idmap: HashMap<usize, usize> = HashMap::new();
		for (should_idx, ids) in should.iter().enumerate() {
			for &id in ids {
				let actual_idx = actual.cluster_of(id)
					.unwrap_or_else(|| panic!("point {} is not assigned", id));
				let mapped = *idmap.entry(should_idx).or_insert(actual_idx);
				if mapped != actual_idx {
					panic!(
						"Cluster assignments different for point {}.\nMapping(should -> actual): {:?}\nShould: {:?}",
						id, idmap, should
					);
				}
			}
		}
		let distinct: BTreeSet<usize> = idmap.values().cloned().collect();
		assert_eq!(distinct.len(), idmap.len(), "two expected groups were merged: {:?}", idmap);
	}
}
