mod euclideandistance;

pub use euclideandistance::{euclidean_distance, squared_distance};
