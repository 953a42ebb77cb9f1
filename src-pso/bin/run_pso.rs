use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use ndarray::Array1;

use swarmrank_env::get_records_dir;
use swarmrank_pso::{
	Direction, PsoConfig, PsoConfigBuilder, PsoReport, particle_swarm, run_recorded_particle_swarm,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Function {
	Sphere,
	Rastrigin,
}

impl Function {
	fn name(self) -> &'static str {
		match self {
			Function::Sphere => "sphere",
			Function::Rastrigin => "rastrigin",
		}
	}

	fn evaluate(self, x: &Array1<f64>) -> f64 {
		match self {
			Function::Sphere => x.iter().map(|v| v * v).sum(),
			Function::Rastrigin => {
				let a = 10.0;
				a * x.len() as f64
					+ x.iter()
						.map(|v| v * v - a * (2.0 * std::f64::consts::PI * v).cos())
						.sum::<f64>()
			}
		}
	}
}

/// CLI arguments for a particle swarm run on a benchmark function
#[derive(Parser, Debug)]
#[command(name = "run_pso")]
#[command(about = "Run particle swarm optimization on a benchmark function")]
struct Args {
	/// Benchmark function
	#[arg(short, long, value_enum, default_value_t = Function::Sphere)]
	function: Function,

	/// Number of dimensions
	#[arg(short, long, default_value_t = 2)]
	dim: usize,

	/// Lower bound applied to every dimension
	#[arg(long, default_value_t = -5.0, allow_hyphen_values = true)]
	lower: f64,

	/// Upper bound applied to every dimension
	#[arg(long, default_value_t = 5.0, allow_hyphen_values = true)]
	upper: f64,

	/// Swarm size
	#[arg(short = 'n', long, default_value_t = 30)]
	particles: usize,

	/// Iteration budget
	#[arg(short, long, default_value_t = 100)]
	iterations: usize,

	/// Inertia weight
	#[arg(long, default_value_t = 0.5)]
	w: f64,

	/// Cognitive weight
	#[arg(long, default_value_t = 1.5)]
	c1: f64,

	/// Social weight
	#[arg(long, default_value_t = 1.5)]
	c2: f64,

	/// Optimization direction (min or max)
	#[arg(long, default_value = "min")]
	direction: Direction,

	/// Random seed
	#[arg(short, long)]
	seed: Option<u64>,

	/// Per-component velocity cap
	#[arg(long)]
	velocity_clamp: Option<f64>,

	/// Update particles in parallel
	#[arg(long)]
	parallel: bool,

	/// Worker threads for parallel updates (default: rayon global pool)
	#[arg(long)]
	threads: Option<usize>,

	/// Write history and swarm motion CSVs
	#[arg(long)]
	record: bool,

	/// Directory for recorded CSVs (default: $SWARMRANK_DIR/data_generated/records)
	#[arg(long)]
	record_dir: Option<PathBuf>,
}

fn build_config(args: &Args) -> PsoConfig {
	let mut builder = PsoConfigBuilder::new()
		.num_particles(args.particles)
		.max_iter(args.iterations)
		.weights(args.w, args.c1, args.c2)
		.direction(args.direction)
		.enable_parallel(args.parallel);
	if let Some(seed) = args.seed {
		builder = builder.seed(seed);
	}
	if let Some(vmax) = args.velocity_clamp {
		builder = builder.velocity_clamp(vmax);
	}
	if let Some(threads) = args.threads {
		builder = builder.parallel_threads(threads);
	}
	builder.build()
}

fn run(args: &Args) -> Result<PsoReport, Box<dyn std::error::Error>> {
	let bounds = vec![(args.lower, args.upper); args.dim];
	let function = args.function;
	let objective = move |x: &Array1<f64>| function.evaluate(x);
	let config = build_config(args);

	if !args.record {
		return Ok(particle_swarm(&objective, &bounds, config)?);
	}

	let dir = match &args.record_dir {
		Some(dir) => dir.clone(),
		None => get_records_dir()?,
	};
	let name = format!("pso_{}_{}d", function.name(), args.dim);
	let (report, paths) = run_recorded_particle_swarm(&name, &objective, &bounds, config, &dir)?;
	println!("history: {}", paths.history.display());
	println!("motion:  {}", paths.motion.display());
	Ok(report)
}

fn main() -> ExitCode {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let args = Args::parse();

	match run(&args) {
		Ok(report) => {
			println!("{}", report.message);
			println!("best value: {:.6e}", report.fun);
			let x: Vec<String> = report.x.iter().map(|v| format!("{:.6}", v)).collect();
			println!("best x:     [{}]", x.join(", "));
			println!("iterations: {}  evaluations: {}", report.nit, report.nfev);
			ExitCode::SUCCESS
		}
		Err(e) => {
			eprintln!("error: {}", e);
			ExitCode::FAILURE
		}
	}
}
