use clap::{Parser, Subcommand};
use pscp_vns::config::{Algorithm, Config, ConstructiveKind, ShakeKind, ThinningVariant, VndVariant};
use pscp_vns::problem::Instance;
use pscp_vns::utils::{load_solution, save_solution};
use pscp_vns::PscpSolver;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "pscp")]
#[command(about = "Heuristic solver for the Partial Set Covering Problem")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve one or more instances
    Solve(SolveArgs),
    /// Check a solution file against an instance
    Validate {
        instance: PathBuf,
        solution: PathBuf,
    },
}

#[derive(clap::Args)]
struct SolveArgs {
    /// Instance files
    #[arg(required = true)]
    instances: Vec<PathBuf>,

    /// JSON config file; command line options override its values
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(short, long, value_enum)]
    algorithm: Option<Algorithm>,

    /// Constructive for the VNS initial solution
    #[arg(long, value_enum)]
    constructive: Option<ConstructiveKind>,

    #[arg(long, value_enum)]
    shake: Option<ShakeKind>,

    #[arg(long, value_enum)]
    vnd: Option<VndVariant>,

    #[arg(long, value_enum)]
    thinning: Option<ThinningVariant>,

    /// Maximum shake strength of the VNS
    #[arg(long)]
    k_max: Option<usize>,

    #[arg(short, long)]
    seed: Option<u64>,

    /// Time limit per instance, in seconds
    #[arg(short, long, value_name = "SECONDS")]
    time_limit: Option<u64>,

    /// Directory receiving one `<instance>.sol` file per instance
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Print statistics as JSON lines
    #[arg(long)]
    json: bool,
}

impl SolveArgs {
    fn config(&self) -> Result<Config, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
            None => Config::default(),
        };

        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }
        if let Some(constructive) = self.constructive {
            config.constructive = constructive;
        }
        if let Some(shake) = self.shake {
            config.shake = shake;
        }
        if let Some(vnd) = self.vnd {
            config.vnd = vnd;
        }
        if let Some(thinning) = self.thinning {
            config.thinning = thinning;
        }
        if let Some(k_max) = self.k_max {
            config.k_max = k_max;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(seconds) = self.time_limit {
            config.time_limit = Some(Duration::from_secs(seconds));
        }

        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Solve(args) => solve(&args),
        Commands::Validate { instance, solution } => validate(&instance, &solution),
    }
}

fn solve(args: &SolveArgs) -> Result<(), Box<dyn Error>> {
    let config = args.config()?;
    if let Some(dir) = &args.output {
        fs::create_dir_all(dir)?;
    }

    for path in &args.instances {
        let instance = Instance::from_file(path)?;
        let mut solver = PscpSolver::new(instance, config.clone());
        let best = solver.run().clone();

        if let Some(dir) = &args.output {
            let target = dir.join(format!("{}.sol", solver.instance.name));
            save_solution(&best, &target)?;
            log::info!("Saved solution to {}", target.display());
        }

        if let Some(stats) = solver.statistics() {
            if args.json {
                println!("{}", serde_json::to_string(&stats)?);
            } else {
                println!("{}", stats.format());
            }
        }
    }

    Ok(())
}

fn validate(instance_path: &Path, solution_path: &Path) -> Result<(), Box<dyn Error>> {
    let instance = Instance::from_file(instance_path)?;
    let solution = load_solution(&instance, solution_path)?;

    match solution.validate() {
        Ok(()) => println!(
            "Solution is feasible: {} sets cover {} / {} required points",
            solution.score(),
            solution.coverage(),
            solution.min_covered_required()
        ),
        Err(shortfall) => {
            println!("Solution is infeasible: {}", shortfall);
            println!("Gap: {} points", shortfall.gap());
            std::process::exit(1);
        }
    }

    Ok(())
}
