use crate::{primitive::*, ClusterError, ClusterState, KMeans, KMeansConfig, Result};
use rayon::prelude::*;
use tracing::{debug, info, warn};

pub(crate) struct Lloyd<T: Primitive> {
    _p: std::marker::PhantomData<T>
}
impl<T: Primitive> Lloyd<T> {
    /// Move every centroid to the mean of the normalized points assigned to it.
    /// A centroid without points is reset to all zeros.
    /// Returns the amount of empty clusters.
    fn update_centroids(data: &KMeans<T>, state: &mut ClusterState<T>) -> usize {
        // Sum all samples in a cluster together into new_centroids
        // Count non-empty clusters
        let mut used_centroids_cnt = 0;
        let mut new_centroids = vec![vec![T::zero(); data.sample_dims]; state.k];

        let (cluster_sizes, assignments) = (&mut state.cluster_sizes, &state.assignments);
        rayon::scope(|s| {
            s.spawn(|_| {
                used_centroids_cnt = data.update_cluster_sizes(assignments, cluster_sizes);
            });
            s.spawn(|_| {
                data.normalized.coords().iter()
                    .zip(assignments.iter().cloned())
                    .for_each(|(sample, centroid_id)| {
                        new_centroids[centroid_id].iter_mut()
                            .zip(sample.iter())
                            .for_each(|(c, v)| *c += v);
                    });
            });
        });

        // Calculate new centroids from the sums
        state.centroids.par_iter_mut()
            .zip(new_centroids.into_par_iter())
            .zip(state.cluster_sizes.par_iter().cloned())
            .for_each(|((c, sum), size)| {
                if size == 0 {
                    c.iter_mut().for_each(|cv| *cv = T::zero());
                } else {
                    let size = T::from_count(size);
                    c.iter_mut().zip(sum).for_each(|(cv, sv)| *cv = sv / size);
                }
            });
        state.k - used_centroids_cnt
    }

    #[inline(always)] pub fn calculate<'a, F>(data: &KMeans<T>, k: usize, max_iter: usize, init: F, config: &KMeansConfig<'a, T>) -> Result<ClusterState<T>>
                where F: FnOnce(&KMeans<T>, &mut ClusterState<T>, &KMeansConfig<'a, T>) -> Result<()> {
        if k < 1 {
            return Err(ClusterError::InvalidClusterCount(k));
        }
        config.abort_strategy.validate()?;
        if k > data.sample_cnt() {
            warn!(k, points = data.sample_cnt(), "more clusters than points, some clusters will stay empty");
        }
        let max_iter = max_iter.max(1);

        let mut state = ClusterState::new(data.sample_cnt(), data.sample_dims, k);

        // Initialize clusters and notify subscriber
        init(data, &mut state, config)?;
        (config.init_done)(&state);
        let mut abort_strategy = config.abort_strategy.create_logic();

        for i in 1..=max_iter {
            data.update_cluster_assignments(&mut state, config)?;
            let new_cohesion = data.calculate_cohesion(&state)?;
            let proceed = abort_strategy.next(new_cohesion);

            // Notify subscriber about finished iteration
            (config.iteration_done)(&state, i, new_cohesion);
            debug!(iteration = i, cohesion = %new_cohesion, futile_turns = abort_strategy.futile_turns(), "assignment step done");
            state.cohesion = new_cohesion;
            state.iterations = i;

            if !proceed {
                state.converged = true;
                break;
            }
            if i == max_iter {
                break;
            }
            let empty = Self::update_centroids(data, &mut state);
            if empty > 0 {
                debug!(iteration = i, empty, "empty clusters reset to the origin");
            }
        }

        // cluster sizes have to reflect the final assignment, not the one the centroids were computed from
        data.update_cluster_sizes(&state.assignments, &mut state.cluster_sizes);
        if state.converged {
            info!(iterations = state.iterations, cohesion = %state.cohesion, best = %abort_strategy.best_cohesion(), "converged");
        } else {
            warn!(iterations = state.iterations, cohesion = %state.cohesion, "iteration limit reached before convergence");
        }
        let empty = state.empty_clusters();
        if empty > 0 {
            warn!(empty, k, "final partition has empty clusters");
        }
        Ok(state)
    }
}
