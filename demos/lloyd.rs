use zmeans::*;

fn main() {
    let (sample_cnt, sample_dims, k, max_iter) = (20000, 20, 4, 100);

    // Generate some random data
    let samples: Vec<Vec<f64>> = (0..sample_cnt)
        .map(|_| (0..sample_dims).map(|_| rand::random()).collect())
        .collect();

    let kmean = KMeans::new(Dataset::from_rows(samples)).unwrap();
    let state = kmean.kmeans_lloyd(k, max_iter, KMeans::init_bounded_uniform, &KMeansConfig::default()).unwrap();

    println!("Centroids: {:?}", state.centroids);
    println!("Cluster sizes: {:?}", state.cluster_sizes);
    println!("Cohesion: {}", state.cohesion);
}
