//! Basic example of using the PSCP-VNS library.

use pscp_vns::config::{Algorithm, Config, ThinningVariant};
use pscp_vns::problem::Instance;
use pscp_vns::utils::{format_duration, save_solution};
use std::env;
use std::time::{Duration, Instant};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Get instance path from command line or use default
    let args: Vec<String> = env::args().collect();
    let instance_path = if args.len() > 1 {
        &args[1]
    } else {
        "instances/scp41.txt"
    };

    // Load instance
    println!("Loading instance from: {}", instance_path);
    let instance = Instance::from_file(instance_path)?;
    println!(
        "Loaded instance: {} with {} sets and {} points ({} useless sets)",
        instance.name,
        instance.n_sets(),
        instance.n_points(),
        instance.n_useless_sets()
    );

    // Configure algorithm
    let config = Config::new()
        .with_algorithm(Algorithm::KThinning)
        .with_thinning(ThinningVariant::Full)
        .with_candidate_list_size(50)
        .with_l_max_percent(10)
        .with_seed(1)
        .with_time_limit(Duration::from_secs(60));

    // Create and run algorithm
    let mut solver = pscp_vns::PscpSolver::new(instance.clone(), config);

    println!("Starting search (time limit: 60s)");
    let start_time = Instant::now();
    let best_solution = solver.run().clone();
    let runtime = start_time.elapsed();

    // Print results
    println!("Search completed in {}", format_duration(runtime));
    println!("{:?}", best_solution);

    if let Some(stats) = solver.statistics() {
        println!("{}", stats.format());
    }

    // Save solution
    let output_path = format!("{}.sol", instance.name);
    println!("Saving solution to: {}", output_path);
    save_solution(&best_solution, &output_path)?;

    Ok(())
}
