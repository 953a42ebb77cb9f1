//! SwarmRank: find an ideal repository profile with particle swarm
//! optimisation, then rank a dataset of repositories against it.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args as ClapArgs, Parser, Subcommand};
use ndarray::Array1;

use swarmrank_env::get_data_generated_dir;
use swarmrank_pso::{PsoConfig, PsoConfigBuilder};
use swarmrank_score::{
    LinearReward, Optimum, RankedSample, ScoringProfile, extract_samples, find_ideal_profile,
    find_max_reward, load_records, metric_ranges, rank_by_distance, rank_by_score,
    save_optimum_json, save_ranking_csv, save_ranking_json,
};

#[derive(Parser, Debug)]
#[command(name = "swarmrank", author, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Minimize the distance to an ideal profile, then rank repositories by it
    Profile {
        /// JSON profile file (default: built-in repository health profile)
        #[arg(long)]
        profile: Option<PathBuf>,

        #[command(flatten)]
        common: CommonArgs,
    },
    /// Maximize the linear activity reward, then rank repositories by
    /// distance to the optimum
    Reward {
        /// Search over the default metric ranges instead of the dataset's
        #[arg(long)]
        default_ranges: bool,

        #[command(flatten)]
        common: CommonArgs,
    },
}

/// Arguments shared by every subcommand
#[derive(ClapArgs, Debug, Clone)]
struct CommonArgs {
    /// JSON array of repository records to rank
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Output directory (default: $SWARMRANK_DIR/data_generated)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

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

    /// Random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Update particles in parallel
    #[arg(long)]
    parallel: bool,
}

impl CommonArgs {
    fn pso_config(&self) -> PsoConfig {
        let mut builder = PsoConfigBuilder::new()
            .num_particles(self.particles)
            .max_iter(self.iterations)
            .weights(self.w, self.c1, self.c2)
            .enable_parallel(self.parallel);
        if let Some(seed) = self.seed {
            builder = builder.seed(seed);
        }
        builder.build()
    }

    fn output_dir(&self) -> Result<PathBuf, Box<dyn Error>> {
        match &self.output_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(get_data_generated_dir()?),
        }
    }
}

fn print_optimum(optimum: &Optimum) {
    println!("Best value ({}): {:.6e}", optimum.direction, optimum.value);
    for (name, v) in optimum.metrics.iter().zip(optimum.position.iter()) {
        println!("  {:<40} {:.4}", name, v);
    }
}

fn print_ranking(ranking: &[RankedSample], limit: usize) {
    for row in ranking.iter().take(limit) {
        println!("{:>4}  {:<50} {:.6}", row.rank, row.name, row.distance);
    }
}

fn save_all(
    dir: &Path,
    stem: &str,
    optimum: &Optimum,
    ranking: Option<&[RankedSample]>,
) -> Result<(), Box<dyn Error>> {
    let optimum_path = dir.join(format!("{stem}_optimum.json"));
    save_optimum_json(&optimum_path, optimum)?;
    println!("optimum: {}", optimum_path.display());
    if let Some(ranking) = ranking {
        let json = dir.join(format!("{stem}_ranking.json"));
        let csv = dir.join(format!("{stem}_ranking.csv"));
        save_ranking_json(&json, ranking)?;
        save_ranking_csv(&csv, ranking, &optimum.metrics)?;
        println!("ranking: {} and {}", json.display(), csv.display());
    }
    Ok(())
}

fn run_profile(profile_path: Option<&Path>, common: &CommonArgs) -> Result<(), Box<dyn Error>> {
    let profile = match profile_path {
        Some(path) => ScoringProfile::from_json_file(path)?,
        None => ScoringProfile::repo_health(),
    };
    let optimum = find_ideal_profile(&profile, common.pso_config())?;
    print_optimum(&optimum);

    let ranking = match &common.data {
        Some(path) => {
            let records = load_records(path)?;
            let samples = extract_samples(&records, &profile.names());
            let ranking = rank_by_score(&samples, &profile)?;
            print_ranking(&ranking, 20);
            Some(ranking)
        }
        None => None,
    };
    save_all(&common.output_dir()?, "profile", &optimum, ranking.as_deref())
}

fn run_reward(default_ranges: bool, common: &CommonArgs) -> Result<(), Box<dyn Error>> {
    let reward = LinearReward::correlation_with_mean();
    let samples = match &common.data {
        Some(path) => Some(extract_samples(&load_records(path)?, &reward.names())),
        None => None,
    };
    let bounds = match &samples {
        Some(samples) if !default_ranges => metric_ranges(samples)?,
        _ => reward.default_bounds(),
    };
    let optimum = find_max_reward(&reward, &bounds, common.pso_config())?;
    print_optimum(&optimum);

    let ranking = match &samples {
        Some(samples) => {
            let target = Array1::from(optimum.position.clone());
            let ranking = rank_by_distance(samples, &target, &bounds)?;
            print_ranking(&ranking, 20);
            Some(ranking)
        }
        None => None,
    };
    save_all(&common.output_dir()?, "reward", &optimum, ranking.as_deref())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let result = match &cli.command {
        Command::Profile { profile, common } => run_profile(profile.as_deref(), common),
        Command::Reward { default_ranges, common } => run_reward(*default_ranges, common),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
