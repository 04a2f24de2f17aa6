use crate::Primitive;
use rand::Rng;

/// Distance difference below which two centroids count as equally near.
pub const DEFAULT_TIE_EPSILON: f64 = 1e-5;

/// How a point picks its centroid when several centroids are (nearly) equally far away.
///
/// Both policies consume random numbers only while resolving ties, so a dataset
/// without ties is assigned identically under either policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// Scan the centroids in index order, keeping a running minimum. A candidate within
    /// epsilon of the running minimum wins a fair coin flip against the current choice,
    /// without replacing the running minimum distance. With more than two tied centroids
    /// the later ones are favoured.
    #[default]
    RunningMinimum,
    /// Draw uniformly among every centroid whose distance lies within epsilon of the minimum.
    Uniform,
}

impl TieBreak {
    /// Pick the index of the nearest centroid from a row of point-to-centroid distances.
    pub fn choose<T, R>(&self, distances: &[T], epsilon: T, rnd: &mut R) -> usize
            where T: Primitive, R: Rng + ?Sized {
        match self {
            TieBreak::RunningMinimum => {
                let mut min_val = T::infinity();
                let mut min_idx = 0;
                for (idx, d) in distances.iter().cloned().enumerate() {
                    if (min_val - d).abs() < epsilon {
                        if rnd.gen_bool(0.5) {
                            min_idx = idx;
                        }
                    } else if min_val - d > epsilon {
                        min_idx = idx;
                        min_val = d;
                    }
                }
                min_idx
            },
            TieBreak::Uniform => {
                let min_val = distances.iter().cloned().fold(T::infinity(), T::min);
                let tied: Vec<usize> = distances.iter().cloned().enumerate()
                    .filter(|(_, d)| *d - min_val < epsilon)
                    .map(|(idx, _)| idx)
                    .collect();
                match tied.len() {
                    0 => 0,
                    1 => tied[0],
                    n => tied[rnd.gen_range(0..n)],
                }
            }
        }
    }
}

impl std::str::FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running-minimum" => Ok(TieBreak::RunningMinimum),
            "uniform" => Ok(TieBreak::Uniform),
            other => Err(format!("unknown tie-break policy `{}` (expected `running-minimum` or `uniform`)", other)),
        }
    }
}
