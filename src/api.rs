use crate::{
    distances, primitive::*, AbortStrategy, ClusterAssignment, ClusterError, Dataset, NormalizationStats, Result,
    TieBreak, tiebreak::DEFAULT_TIE_EPSILON,
};
use std::cell::RefCell;
use rayon::prelude::*;
use rand::prelude::*;
use tracing::{debug, warn};

pub type InitDoneCallbackFn<'a, T> = &'a dyn Fn(&ClusterState<T>);
pub type IterationDoneCallbackFn<'a, T> = &'a dyn Fn(&ClusterState<T>, usize, T);

/// This is a structure holding various configuration options for a clustering run, such as
/// the random number generator to use, the stopping rule, or a couple of callbacks, that can be set
/// to get status information from a running calculation.
///
/// For a more detailed information about all possible options, have a look at [`KMeansConfigBuilder`].
pub struct KMeansConfig<'a, T: Primitive> {
    /// Callback that is called, when the initialization phase finished
    /// ## Arguments
    /// - **state**: Current [`ClusterState`] after the initialization
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Callback that is called after each assignment step
    /// ## Arguments
    /// - **state**: Current [`ClusterState`] after the assignment step
    /// - **iteration_id**: Number of the current iteration
    /// - **cohesion**: New cohesion (**state** contains the cohesion from the previous iteration)
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>,
    /// Random number generator shared by centroid initialization and tie-breaking
    pub(crate) rnd: Box<RefCell<dyn RngCore>>,
    /// The stopping rule to use for the running calculation
    pub(crate) abort_strategy: AbortStrategy<T>,
    pub(crate) tie_break: TieBreak,
    pub(crate) tie_epsilon: T,
}
impl<'a, T: Primitive> Default for KMeansConfig<'a, T> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            iteration_done: &|_,_,_| {},
            rnd: Box::new(RefCell::new(StdRng::from_entropy())),
            abort_strategy: AbortStrategy::default(),
            tie_break: TieBreak::default(),
            tie_epsilon: T::constant(DEFAULT_TIE_EPSILON),
        }
    }
}
impl<'a, T: Primitive> KMeansConfig<'a, T> {
    /// Use the [`KMeansConfigBuilder`] to build a [`KMeansConfig`] instance.
    pub fn build() -> KMeansConfigBuilder<'a, T> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }
}
impl<'a, T: Primitive> std::fmt::Debug for KMeansConfig<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KMeansConfig")
            .field("abort_strategy", &self.abort_strategy)
            .field("tie_break", &self.tie_break)
            .field("tie_epsilon", &self.tie_epsilon)
            .finish_non_exhaustive()
    }
}

pub struct KMeansConfigBuilder<'a, T: Primitive> {
    config: KMeansConfig<'a, T>
}
impl<'a, T: Primitive> KMeansConfigBuilder<'a, T> {
    /// Set the callback that should be called after the centroid initialization, before the iteration starts.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Set the callback that should be called after each assignment step.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, T>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Set the random number generator that should be used in the calculation.
    /// Use a seeded generator for deterministically repeatable results.
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Box::new(RefCell::new(rnd)); self
    }
    /// Shorthand for [`KMeansConfigBuilder::random_generator`] with a [`StdRng`] seeded from **seed**.
    pub fn seed(self, seed: u64) -> Self {
        self.random_generator(StdRng::seed_from_u64(seed))
    }
    /// Set the stopping rule. For more information, see documentation of [`AbortStrategy`].
    /// ## Default
    /// [`AbortStrategy`] `{ limit: 3, threshold: 1e-5 }`
    pub fn abort_strategy(mut self, abort_strategy: AbortStrategy<T>) -> Self {
        self.config.abort_strategy = abort_strategy; self
    }
    /// Set the tie-break policy of the assignment step.
    /// ## Default
    /// [`TieBreak::RunningMinimum`]
    pub fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.config.tie_break = tie_break; self
    }
    /// Set the distance difference below which two centroids are considered tied.
    /// ## Default
    /// `1e-5`
    pub fn tie_epsilon(mut self, tie_epsilon: T) -> Self {
        self.config.tie_epsilon = tie_epsilon; self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> KMeansConfig<'a, T> { self.config }
}


/// This is the internally used data-structure, storing the current state during calculation, as
/// well as the final state, as returned by [`KMeans::kmeans_lloyd`].
/// All mutations are done in this structure, keeping [`KMeans`] immutable.
///
/// ## Generics
/// - **T**: Underlying primitive type that was used for the calculation
///
/// ## Fields
/// - **k**: The amount of clusters that were requested
/// - **cohesion**: Sum of squared (normalized) distances from all points to the centroid of their cluster
/// - **centroids**: Cluster centers in normalized space, one vector per cluster
/// - **cluster_sizes**: Amount of points in each cluster
/// - **assignments**: Cluster index of every point, in ascending point-id order
/// - **iterations**: Number of assignment steps that were executed
/// - **converged**: Whether the stopping rule ended the calculation (instead of the iteration limit)
#[derive(Clone, Debug)]
pub struct ClusterState<T: Primitive> {
    pub k: usize,
    pub cohesion: T,
    pub centroids: Vec<Vec<T>>,
    pub cluster_sizes: Vec<usize>,
    pub assignments: Vec<usize>,
    pub iterations: usize,
    pub converged: bool,
}
impl<T: Primitive> ClusterState<T> {
    pub(crate) fn new(sample_cnt: usize, sample_dims: usize, k: usize) -> Self {
        Self {
            k,
            cohesion: T::infinity(),
            centroids: vec![vec![T::zero(); sample_dims]; k],
            cluster_sizes: vec![0usize; k],
            assignments: vec![0usize; sample_cnt],
            iterations: 0,
            converged: false,
        }
    }
    pub(crate) fn set_centroid_from_iter(&mut self, idx: usize, src: impl Iterator<Item = T>) {
        self.centroids[idx].iter_mut()
            .zip(src)
            .for_each(|(c,s)| *c = s);
    }
    /// Number of clusters without any point.
    pub fn empty_clusters(&self) -> usize {
        self.cluster_sizes.iter().filter(|&&s| s == 0).count()
    }
}


/// Outcome of a complete clustering run.
///
/// ## Fields
/// - **clusters**: The final partition, holding every point's raw coordinates
/// - **centroids**: Final centroids in normalized space; `centroids[i]` belongs to `clusters[i]`
/// - **cohesion**: Cohesion of the final partition against **centroids**
/// - **iterations**: Number of assignment steps that were executed
/// - **converged**: Whether the stopping rule ended the run
#[derive(Clone, Debug)]
pub struct ClusteringResult<T: Primitive> {
    pub clusters: ClusterAssignment<T>,
    pub centroids: Vec<Vec<T>>,
    pub cohesion: T,
    pub iterations: usize,
    pub converged: bool,
}


/// Cluster **data** into **k** groups, using the default configuration.
/// Pass a **seed** for a reproducible run; without one the generator is seeded from system entropy.
///
/// ## Example
/// ```rust
/// use zmeans::*;
///
/// let data = Dataset::from_rows(vec![
///     vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0],
///     vec![10.0, 10.0], vec![10.0, 11.0], vec![11.0, 10.0],
/// ]);
/// let result = run(2, data, Some(42)).unwrap();
/// assert_eq!(result.clusters.point_count(), 6);
/// assert_eq!(result.clusters.cluster_of(1), result.clusters.cluster_of(2));
/// ```
pub fn run<T: Primitive>(k: usize, data: Dataset<T>, seed: Option<u64>) -> Result<ClusteringResult<T>> {
    if k < 1 {
        return Err(ClusterError::InvalidClusterCount(k));
    }
    let config = match seed {
        Some(seed) => KMeansConfig::build().seed(seed).build(),
        None => KMeansConfig::default(),
    };
    KMeans::new(data)?.run(k, &config)
}


/// Entrypoint of this crate's API-Surface.
///
/// Create an instance of this struct, giving the dataset you want to operate on. Construction
/// validates the dataset, computes its normalization statistics and the normalized copy that
/// every calculation operates on. The raw dataset is kept for reporting.
///
/// ## Supported variants
/// - k-Means clustering (Lloyd) [`KMeans::kmeans_lloyd`]
///
/// ## Supported initialization methods
/// - Bounded uniform [`KMeans::init_bounded_uniform`]
/// - Precomputed centroids [`KMeans::init_precomputed`]
#[derive(Clone, Debug)]
pub struct KMeans<T: Primitive> {
    pub(crate) raw: Dataset<T>,
    pub(crate) normalized: Dataset<T>,
    pub(crate) stats: NormalizationStats<T>,
    pub(crate) sample_dims: usize,
}
impl<T: Primitive> KMeans<T> {
    /// Create a new instance of the [`KMeans`] structure.
    ///
    /// ## Errors
    /// Fails when **data** is empty, has no coordinates, is ragged (points of differing
    /// dimensionality) or contains non-finite values.
    pub fn new(data: Dataset<T>) -> Result<Self> {
        let sample_dims = data.validate()?;
        let stats = NormalizationStats::compute(&data);
        let degenerate = stats.degenerate_dims();
        if !degenerate.is_empty() {
            warn!(dims = ?degenerate, "constant dimensions normalize to 0");
        }
        if let Some(dim) = stats.non_finite_dim() {
            return Err(ClusterError::NonFiniteNormalization { dim });
        }
        let normalized = stats.normalize(&data);
        if let Some(dim) = normalized.coords().iter()
                .find_map(|p| p.iter().position(|v| !v.is_finite())) {
            return Err(ClusterError::NonFiniteNormalization { dim });
        }
        debug!(points = data.len(), dims = sample_dims, "dataset normalized");
        Ok(Self { raw: data, normalized, stats, sample_dims })
    }

    pub fn sample_cnt(&self) -> usize { self.raw.len() }

    pub fn sample_dims(&self) -> usize { self.sample_dims }

    pub fn raw(&self) -> &Dataset<T> { &self.raw }

    pub fn normalized(&self) -> &Dataset<T> { &self.normalized }

    pub fn stats(&self) -> &NormalizationStats<T> { &self.stats }


    fn work_packet_size(&self) -> usize {
        // manually calculate work-packet size, because rayon does not do static scheduling (which is more apropriate here)
        (self.sample_cnt() / rayon::current_num_threads()).max(1)
    }

    /// Assign every point to its nearest centroid.
    /// Distances are computed in parallel; ties are then resolved in point-id order, so that the
    /// random stream is consumed identically on every run.
    pub(crate) fn update_cluster_assignments(&self, state: &mut ClusterState<T>, config: &KMeansConfig<'_, T>) -> Result<()> {
        let centroids = &state.centroids;
        let distance_rows: Vec<Vec<T>> = self.normalized.coords().par_iter()
            .with_min_len(self.work_packet_size())
            .map(|s| centroids.iter()
                .map(|c| distances::euclidean_distance(s, c))
                .collect::<Result<Vec<T>>>())
            .collect::<Result<Vec<_>>>()?;

        let mut rnd = config.rnd.borrow_mut();
        state.assignments.iter_mut()
            .zip(distance_rows.iter())
            .for_each(|(assignment, row)| {
                *assignment = config.tie_break.choose(row, config.tie_epsilon, &mut *rnd);
            });
        Ok(())
    }

    /// Sum of squared distances between every point and the centroid of its cluster.
    pub(crate) fn calculate_cohesion(&self, state: &ClusterState<T>) -> Result<T> {
        let centroids = &state.centroids;
        let point_errors: Vec<T> = self.normalized.coords().par_iter()
            .with_min_len(self.work_packet_size())
            .zip(state.assignments.par_iter().cloned())
            .map(|(s, assignment)| distances::squared_distance(s, &centroids[assignment]))
            .collect::<Result<Vec<T>>>()?;
        // summed sequentially, so the result does not depend on the thread count
        Ok(point_errors.into_iter().sum())
    }

    pub(crate) fn update_cluster_sizes(&self, assignments: &[usize], cluster_sizes: &mut [usize]) -> usize {
        cluster_sizes.iter_mut().for_each(|v| *v = 0);
        let mut used_centroids_cnt = 0;
        assignments.iter().cloned()
            .for_each(|centroid_id| {
                if cluster_sizes[centroid_id] == 0 {
                    used_centroids_cnt += 1; // Count the amount of centroids with more than 0 samples
                }
                cluster_sizes[centroid_id] += 1;
            });
        used_centroids_cnt
    }

    /// Materialize the partition stored in **state**, with raw coordinates.
    pub fn cluster_assignment(&self, state: &ClusterState<T>) -> ClusterAssignment<T> {
        let mut clusters = ClusterAssignment::new(state.k);
        self.raw.iter()
            .zip(state.assignments.iter().cloned())
            .for_each(|((id, coords), cluster)| clusters.cluster_mut(cluster).insert(id, coords.to_vec()));
        clusters
    }


    /// Lloyd-style k-means: assign every point to its nearest centroid, measure cohesion, and
    /// (unless the stopping rule tripped) move every centroid to the mean of its points.
    ///
    /// When the stopping rule trips, the centroids are left as they were for the final
    /// assignment step; they are not recomputed from it.
    ///
    /// ## Arguments
    /// - **k**: Amount of clusters to search for
    /// - **max_iter**: Limit the maximum amount of assignment steps (at least one step is always run)
    /// - **init**: Initialization-Method to use for the initialization of the **k** centroids
    /// - **config**: [`KMeansConfig`] instance, containing several configuration options for the calculation.
    ///
    /// ## Returns
    /// Instance of [`ClusterState`], containing the final state.
    ///
    /// ## Example
    /// ```rust
    /// use zmeans::*;
    ///
    /// let data = Dataset::from_rows(vec![vec![1.0, 2.0], vec![1.5, 1.8], vec![8.0, 8.0], vec![9.0, 11.0]]);
    /// let kmean = KMeans::new(data).unwrap();
    /// let conf = KMeansConfig::build().seed(7).build();
    /// let state = kmean.kmeans_lloyd(2, 100, KMeans::init_bounded_uniform, &conf).unwrap();
    /// assert_eq!(state.assignments.len(), 4);
    /// assert!(state.cohesion >= 0.0);
    /// ```
    pub fn kmeans_lloyd<'a, F>(&self, k: usize, max_iter: usize, init: F, config: &KMeansConfig<'a, T>) -> Result<ClusterState<T>>
                where F: FnOnce(&KMeans<T>, &mut ClusterState<T>, &KMeansConfig<'a, T>) -> Result<()> {
        crate::variants::Lloyd::calculate(self, k, max_iter, init, config)
    }

    /// Run [`KMeans::kmeans_lloyd`] with bounded-uniform initialization and no iteration
    /// limit, and materialize the outcome.
    pub fn run(&self, k: usize, config: &KMeansConfig<'_, T>) -> Result<ClusteringResult<T>> {
        let state = self.kmeans_lloyd(k, usize::MAX, KMeans::init_bounded_uniform, config)?;
        Ok(self.finish(state))
    }

    /// Turn the final **state** of a calculation into a [`ClusteringResult`].
    pub fn finish(&self, state: ClusterState<T>) -> ClusteringResult<T> {
        ClusteringResult {
            clusters: self.cluster_assignment(&state),
            centroids: state.centroids,
            cohesion: state.cohesion,
            iterations: state.iterations,
            converged: state.converged,
        }
    }

    /// Bounded uniform initialization method
    ///
    /// ## Description
    /// Determines the range (min, max) of every dimension of the normalized dataset, and draws
    /// every coordinate of every centroid uniformly from that range. A dimension whose range is
    /// a single value places all centroids on that value.
    ///
    /// ## Note
    /// This method is not meant for direct invocation. Pass a reference to it, to an instance-method of [`KMeans`].
    pub fn init_bounded_uniform(kmean: &KMeans<T>, state: &mut ClusterState<T>, config: &KMeansConfig<'_, T>) -> Result<()> {
        crate::inits::boundeduniform::calculate(kmean, state, config)
    }

    /// Precomputed initialization method
    ///
    /// ## Description
    /// Uses the given (normalized) centroids as initial centroids. Exactly **k** centroids
    /// with the dataset's dimensionality have to be given.
    pub fn init_precomputed<'a>(centroids: Vec<Vec<T>>) -> impl FnOnce(&KMeans<T>, &mut ClusterState<T>, &KMeansConfig<'a, T>) -> Result<()> {
        move |kmean, state, config| crate::inits::precomputed::calculate(kmean, state, config, centroids)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn grid_dataset() -> Dataset<f64> {
        Dataset::from_rows(vec![vec![0.0, 0.0], vec![0.0, 4.0], vec![3.0, 0.0], vec![3.0, 4.0], vec![1.0, 2.0]])
    }

    #[test]
    fn construction_validates_input() {
        assert!(matches!(KMeans::<f64>::new(Dataset::default()), Err(ClusterError::EmptyDataset)));
        assert!(matches!(
            KMeans::new(Dataset::from_rows(vec![vec![1.0, 2.0], vec![3.0]])),
            Err(ClusterError::RaggedPoint { .. })
        ));
        let kmean = KMeans::new(grid_dataset()).unwrap();
        assert_eq!(kmean.sample_cnt(), 5);
        assert_eq!(kmean.sample_dims(), 2);
        assert_eq!(kmean.raw(), &grid_dataset());
        assert_eq!(kmean.normalized().ids(), kmean.raw().ids());
    }

    #[test]
    fn overflowing_dimension_is_rejected() {
        // every value is finite, but their sum is not
        let data = Dataset::from_rows(vec![vec![1.0, 1.7e308], vec![2.0, 1.6e308], vec![3.0, 1.0]]);
        assert!(matches!(KMeans::<f64>::new(data), Err(ClusterError::NonFiniteNormalization { dim: 1 })));

        let data = Dataset::from_rows(vec![vec![1.7e308f64], vec![1.6e308], vec![1.0]]);
        assert!(matches!(run(2, data, Some(1)), Err(ClusterError::NonFiniteNormalization { dim: 0 })));
    }

    #[test]
    fn cluster_assignments_match_naive_nearest_centroid() {
        let kmean = KMeans::new(grid_dataset()).unwrap();
        let conf = KMeansConfig::build().seed(3).build();
        let mut state = ClusterState::new(kmean.sample_cnt(), kmean.sample_dims(), 3);
        state.centroids = vec![vec![-1.0, -1.0], vec![1.0, 1.0], vec![1.0, -1.0]];

        kmean.update_cluster_assignments(&mut state, &conf).unwrap();

        let should: Vec<usize> = kmean.normalized().iter()
            .map(|(_, s)| {
                state.centroids.iter()
                    .map(|c| s.iter().zip(c.iter()).map(|(sv, cv)| (sv - cv) * (sv - cv)).sum::<f64>())
                    .enumerate()
                    .min_by(|(_, d0), (_, d1)| d0.partial_cmp(d1).unwrap())
                    .unwrap().0
            })
            .collect();
        assert_eq!(state.assignments, should);
    }

    #[test]
    fn cohesion_is_sum_of_squared_distances() {
        let kmean = KMeans::new(grid_dataset()).unwrap();
        let mut state = ClusterState::new(kmean.sample_cnt(), kmean.sample_dims(), 1);
        // a single centroid at the origin of normalized space -> cohesion = (n - 1) * dims
        state.centroids = vec![vec![0.0, 0.0]];
        assert_approx_eq!(kmean.calculate_cohesion(&state).unwrap(), 8.0, 1e-12);
    }

    #[test]
    fn mismatched_centroid_is_an_error() {
        let kmean = KMeans::new(grid_dataset()).unwrap();
        let conf = KMeansConfig::build().seed(3).build();
        let mut state = ClusterState::new(kmean.sample_cnt(), kmean.sample_dims(), 1);
        state.centroids = vec![vec![0.0, 0.0, 0.0]];
        assert!(matches!(
            kmean.update_cluster_assignments(&mut state, &conf),
            Err(ClusterError::DimensionMismatch { left: 2, right: 3 })
        ));
    }

    #[test]
    fn cluster_sizes_count_used_centroids() {
        let kmean = KMeans::new(grid_dataset()).unwrap();
        let mut sizes = vec![7usize; 4];
        let used = kmean.update_cluster_sizes(&[0, 3, 3, 0, 3], &mut sizes);
        assert_eq!(used, 2);
        assert_eq!(sizes, vec![2, 0, 0, 3]);
    }

    #[test]
    fn assignment_is_materialized_with_raw_coordinates() {
        let kmean = KMeans::new(grid_dataset()).unwrap();
        let mut state = ClusterState::new(kmean.sample_cnt(), kmean.sample_dims(), 2);
        state.assignments = vec![1, 1, 0, 0, 1];
        let clusters = kmean.cluster_assignment(&state);
        assert_eq!(clusters.get(0).unwrap().ids().collect::<Vec<_>>(), vec![3, 4]);
        assert_eq!(clusters.get(1).unwrap().get(5), Some(&[1.0, 2.0][..]));
        assert_eq!(clusters.point_count(), 5);
    }

    #[test]
    fn run_rejects_zero_clusters() {
        assert!(matches!(run(0, grid_dataset(), Some(1)), Err(ClusterError::InvalidClusterCount(0))));
        assert!(matches!(run::<f64>(1, Dataset::default(), Some(1)), Err(ClusterError::EmptyDataset)));
    }
}
