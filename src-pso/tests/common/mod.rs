#![allow(dead_code)]

use ndarray::Array1;

/// Sphere: f(x) = sum(x_i^2), minimum 0 at the origin
pub fn sphere(x: &Array1<f64>) -> f64 {
	x.iter().map(|v| v * v).sum()
}

/// Rastrigin with A = 10, minimum 0 at the origin
pub fn rastrigin(x: &Array1<f64>) -> f64 {
	let a = 10.0;
	a * x.len() as f64
		+ x.iter().map(|v| v * v - a * (2.0 * std::f64::consts::PI * v).cos()).sum::<f64>()
}

/// Same (lower, upper) pair repeated `n` times
pub fn create_bounds(n: usize, lower: f64, upper: f64) -> Vec<(f64, f64)> {
	vec![(lower, upper); n]
}
