mod common;

use common::{create_bounds, sphere};
use swarmrank_pso::{PsoConfigBuilder, particle_swarm, run_recorded_particle_swarm};

#[test]
fn test_pso_sphere_2d() {
	let b2 = create_bounds(2, -5.0, 5.0);
	let c2 = PsoConfigBuilder::new().seed(30).max_iter(200).num_particles(30).build();
	let report = particle_swarm(&sphere, &b2, c2).unwrap();
	assert!(report.fun < 1e-6, "fun = {}", report.fun);
	assert_eq!(report.nit, 200);
	assert!(!report.stopped_early);
}

#[test]
fn test_pso_sphere_5d_recorded() {
	let dir = tempfile::tempdir().unwrap();
	let b5 = create_bounds(5, -5.0, 5.0);
	let c5 = PsoConfigBuilder::new().seed(31).max_iter(400).num_particles(40).build();
	let (report, paths) =
		run_recorded_particle_swarm("sphere_5d", &sphere, &b5, c5, dir.path()).unwrap();
	assert!(report.fun < 1e-4, "fun = {}", report.fun);
	assert!(paths.history.exists());
	assert!(paths.motion.exists());
}

#[test]
fn test_pso_sphere_converges_for_most_seeds() {
	let b2 = create_bounds(2, -5.0, 5.0);
	let converged = (0..10u64)
		.filter(|&seed| {
			let cfg = PsoConfigBuilder::new().seed(seed).num_particles(20).max_iter(50).build();
			particle_swarm(&sphere, &b2, cfg).unwrap().fun < 1e-3
		})
		.count();
	assert!(converged >= 8, "only {} of 10 seeds converged", converged);
}
