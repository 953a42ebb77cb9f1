mod common;

use std::sync::atomic::{AtomicUsize, Ordering};

use common::sphere;
use ndarray::Array1;
use swarmrank_pso::{ErrorKind, Fallible, PsoConfigBuilder, PsoError, optimize, particle_swarm};

#[test]
fn test_invalid_bounds_never_evaluate() {
	let calls = AtomicUsize::new(0);
	let counted = |x: &Array1<f64>| {
		calls.fetch_add(1, Ordering::SeqCst);
		sphere(x)
	};
	let cfg = PsoConfigBuilder::new().seed(1).build();
	let err = particle_swarm(&counted, &[(0.0, 1.0), (2.0, 1.0)], cfg).unwrap_err();
	match err {
		PsoError::InvalidBounds { index, min, max } => {
			assert_eq!(index, 1);
			assert_eq!((min, max), (2.0, 1.0));
		}
		other => panic!("unexpected error: {other}"),
	}
	let cfg = PsoConfigBuilder::new().seed(1).build();
	let err = particle_swarm(&counted, &[(f64::NAN, 1.0)], cfg).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::InvalidBounds);
	assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_objective_failure_propagates() {
	let failing = Fallible(|x: &Array1<f64>| -> Result<f64, String> {
		if x[0] > 0.0 { Err("positive half unsupported".to_string()) } else { Ok(sphere(x)) }
	});
	let cfg = PsoConfigBuilder::new().seed(7).num_particles(30).build();
	let err = particle_swarm(&failing, &[(-1.0, 1.0), (-1.0, 1.0)], cfg).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::ObjectiveEvaluationFailed);
	assert!(err.to_string().contains("positive half unsupported"));
}

#[test]
fn test_objective_failure_during_iteration() {
	// 10 initial evaluations succeed; the 16th call, inside iteration 1, fails
	for parallel in [false, true] {
		let calls = AtomicUsize::new(0);
		let flaky = Fallible(|x: &Array1<f64>| -> Result<f64, String> {
			if calls.fetch_add(1, Ordering::SeqCst) >= 15 {
				Err("solver diverged".to_string())
			} else {
				Ok(sphere(x))
			}
		});
		let cfg = PsoConfigBuilder::new()
			.seed(11)
			.num_particles(10)
			.max_iter(20)
			.enable_parallel(parallel)
			.parallel_threads(2)
			.build();
		let err = particle_swarm(&flaky, &[(-1.0, 1.0), (-1.0, 1.0)], cfg).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::ObjectiveEvaluationFailed, "parallel={}", parallel);
		assert!(err.to_string().contains("solver diverged"));

		let n = calls.load(Ordering::SeqCst);
		if parallel {
			assert!((16..=20).contains(&n), "calls = {}", n);
		} else {
			assert_eq!(n, 16);
		}
	}
}

#[test]
fn test_oversized_velocity_range_rejected() {
	let calls = AtomicUsize::new(0);
	let counted = |x: &Array1<f64>| {
		calls.fetch_add(1, Ordering::SeqCst);
		sphere(x)
	};
	let cfg = PsoConfigBuilder::new().seed(1).velocity_range(f64::MAX).build();
	let err = particle_swarm(&counted, &[(-1.0, 1.0)], cfg).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::InvalidConfig);
	assert_eq!(calls.load(Ordering::SeqCst), 0);

	let cfg = PsoConfigBuilder::new().seed(1).velocity_range(f64::MAX / 4.0).max_iter(3).build();
	assert!(particle_swarm(&counted, &[(-1.0, 1.0)], cfg).is_ok());
}

#[test]
fn test_nan_objective_is_a_failure() {
	let nan = |_: &Array1<f64>| f64::NAN;
	let cfg = PsoConfigBuilder::new().seed(7).num_particles(3).build();
	let err = particle_swarm(&nan, &[(-1.0, 1.0)], cfg).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::ObjectiveEvaluationFailed);
}

#[test]
fn test_max_iter_zero() {
	let cfg = PsoConfigBuilder::new().seed(2).num_particles(5).max_iter(0).build();
	let report = particle_swarm(&sphere, &[(-1.0, 1.0); 3], cfg).unwrap();
	assert_eq!(report.nit, 0);
	assert_eq!(report.nfev, 5);
	assert_eq!(report.fun, sphere(&report.x));
}

#[test]
fn test_maximize_finds_corner() {
	let cfg = PsoConfigBuilder::new().seed(3).num_particles(20).max_iter(100).maximize().build();
	let (x, f) = optimize(2, &[(-1.0, 1.0), (-1.0, 1.0)], &sphere, cfg).unwrap();
	assert!(f > 1.9, "f = {}", f);
	assert!(x.iter().all(|v| v.abs() <= 1.0));
}

#[test]
fn test_dimension_mismatch() {
	let err = optimize(3, &[(-1.0, 1.0)], &sphere, PsoConfigBuilder::new().build()).unwrap_err();
	assert!(matches!(err, PsoError::BoundsDimensionMismatch { expected: 3, found: 1 }));
}

#[test]
fn test_parallel_zero_threads_rejected() {
	let cfg = PsoConfigBuilder::new().enable_parallel(true).parallel_threads(0).build();
	let err = particle_swarm(&sphere, &[(-1.0, 1.0)], cfg).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::InvalidConfig);
}
