use zmeans::*;

fn main() {
    let (sample_cnt, sample_dims, k) = (20000, 20, 4);

    // Generate some random data
    let samples: Vec<Vec<f64>> = (0..sample_cnt)
        .map(|_| (0..sample_dims).map(|_| rand::random()).collect())
        .collect();

	let conf = KMeansConfig::build()
		.seed(42)
		.tie_break(TieBreak::Uniform)
		.init_done(&|_| println!("Initialization completed."))
		.iteration_done(&|s, nr, new_cohesion|
			println!("Iteration {} - Cohesion: {:.2} -> {:.2} | Improvement: {:.2}",
				nr, s.cohesion, new_cohesion, s.cohesion - new_cohesion))
		.build();

    let kmean = KMeans::new(Dataset::from_rows(samples)).unwrap();
    let result = kmean.run(k, &conf).unwrap();

    print!("{}", result.summary());
}
