mod common;

use common::{create_bounds, rastrigin};
use swarmrank_pso::{PsoConfigBuilder, particle_swarm};

#[test]
fn test_pso_rastrigin_2d() {
	let b2 = create_bounds(2, -5.12, 5.12);
	let results: Vec<f64> = (40..45u64)
		.map(|seed| {
			let cfg = PsoConfigBuilder::new()
				.seed(seed)
				.num_particles(40)
				.max_iter(200)
				.weights(0.7, 1.5, 1.5)
				.velocity_clamp(1.0)
				.build();
			let report = particle_swarm(&rastrigin, &b2, cfg).unwrap();
			assert!(report.x.iter().all(|v| (-5.12..=5.12).contains(v)));
			report.fun
		})
		.collect();
	let best = results.iter().cloned().fold(f64::INFINITY, f64::min);
	assert!(best < 0.5, "best over seeds = {}", best);
}
