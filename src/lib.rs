//! # zmeans - API documentation
//!
//! Zmeans is a small rust library (and command line tool) that partitions points into k groups
//! using Lloyd-style k-means clustering on z-score normalized coordinates.
//!
//! ## Algorithm
//! 1. Every dimension is standardized using its mean and sample standard deviation
//!    (see [`NormalizationStats`]). Constant dimensions normalize to `0`.
//! 2. k centroids are drawn uniformly from the per-dimension range of the normalized data
//!    ([`KMeans::init_bounded_uniform`]).
//! 3. Every point is assigned to its nearest centroid (Euclidean distance). Centroids whose
//!    distances differ by less than an epsilon are tied and resolved randomly ([`TieBreak`]).
//! 4. The cohesion (sum of squared distances of points to their centroid) is measured, and the
//!    stopping rule ([`AbortStrategy`]) decides whether to continue.
//! 5. Unless stopped, every centroid moves to the mean of its points, and the loop repeats at 3.
//!
//! The result holds the partition in raw (input) coordinates, and the centroids in normalized space.
//!
//! ## Determinism
//! All randomness comes from the generator in [`KMeansConfig`]. Parallel work (rayon) never
//! touches the generator nor changes the order of floating point sums, so two runs with the same
//! seed and the same input produce identical results, independent of the number of threads.
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! ```rust
//! use zmeans::*;
//!
//! fn main() {
//!     let data = Dataset::from_rows(vec![
//!         vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0],
//!         vec![10.0, 10.0], vec![10.0, 11.0], vec![11.0, 10.0],
//!     ]);
//!
//!     let result = run(2, data, Some(1337)).unwrap();
//!
//!     println!("Centroids: {:?}", result.centroids);
//!     println!("Cohesion: {}", result.cohesion);
//!     for (idx, cluster) in result.clusters.iter().enumerate() {
//!         println!("Cluster {}: {:?}", idx + 1, cluster.ids().collect::<Vec<_>>());
//!     }
//! }
//! ```
//!
//! ## Example (using the status event callbacks)
//! ```rust
//! use zmeans::*;
//!
//! fn main() {
//!     let data = Dataset::from_rows((0..200).map(|i| vec![(i % 7) as f64, (i % 13) as f64]).collect());
//!
//!     let conf = KMeansConfig::build()
//!         .seed(42)
//!         .init_done(&|_| println!("Initialization completed."))
//!         .iteration_done(&|s, nr, new_cohesion|
//!             println!("Iteration {} - Cohesion: {:.2} -> {:.2}", nr, s.cohesion, new_cohesion))
//!         .build();
//!
//!     let kmean = KMeans::new(data).unwrap();
//!     let state = kmean.kmeans_lloyd(4, 500, KMeans::init_bounded_uniform, &conf).unwrap();
//!
//!     println!("Cluster sizes: {:?}", state.cluster_sizes);
//! }
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`KMeans`] struct, or the [`run`] shorthand. [`KMeans`] takes
//! over a [`Dataset`], validates it (non-empty, uniform dimensionality, finite values) and
//! normalizes it once. Its instance-methods then run calculations without mutating it; the
//! running state lives in a [`ClusterState`].
//!
//! Reading input files, writing the CSV output and invoking a plotting script live in [`io`].

#[macro_use] mod helpers;
mod primitive;
mod error;
mod dataset;
mod normalize;
mod distances;
mod clusters;
mod tiebreak;
mod api;
mod variants;
mod inits;
mod abort_strategy;
mod report;
pub mod io;

pub use abort_strategy::{AbortStrategy, DEFAULT_CONVERGENCE_THRESHOLD, DEFAULT_FUTILE_TURN_LIMIT};
pub use api::{run, ClusterState, ClusteringResult, KMeans, KMeansConfig, KMeansConfigBuilder};
pub use clusters::{Cluster, ClusterAssignment};
pub use dataset::{Dataset, PointId};
pub use distances::{euclidean_distance, squared_distance};
pub use error::{ClusterError, Result};
pub use inits::Bounds;
pub use normalize::NormalizationStats;
pub use primitive::Primitive;
pub use report::Summary;
pub use tiebreak::{TieBreak, DEFAULT_TIE_EPSILON};
