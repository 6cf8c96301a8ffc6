use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use cvrp_solver::chart::render_chart;
use cvrp_solver::config::Config;
use cvrp_solver::error::SolverError;
use cvrp_solver::problem::Problem;
use cvrp_solver::solution::SolveStatus;
use cvrp_solver::utils::{format_duration, print_solution, save_solution};
use cvrp_solver::CvrpSolver;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Path to input file
    input_file: PathBuf,

    /// Path to output file
    output_file: PathBuf,

    /// Write the solution details in the console
    #[arg(short, long)]
    verbose: bool,

    /// Render an SVG chart of the solution next to the output file
    #[arg(short, long)]
    chart: bool,

    /// Max time in seconds for optimization [default: 60]
    #[arg(short = 't', long = "max_time")]
    max_time: Option<u64>,

    /// Stop local search after this many accepted moves
    #[arg(long)]
    max_iterations: Option<u64>,

    /// JSON file with solver settings; explicit flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(if cli.debug {
        "debug"
    } else {
        "info"
    }))
    .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            if let Some(SolverError::InvalidInput(_) | SolverError::InfeasibleInstance(_)) =
                err.downcast_ref::<SolverError>()
            {
                println!(
                    "Problem impossible to solve! ({})\nVerify the following:\n\
                     \t- Format of input file\n\
                     \t- Sum of vehicles capacities >= sum of demands of customers",
                    SolveStatus::Infeasible
                );
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => Config::from_json_file(path)
            .map_err(|err| format!("invalid config {}: {}", path.display(), err))?,
        None => Config::new(),
    };
    if let Some(seconds) = cli.max_time {
        config = config.with_time_limit(Duration::from_secs(seconds));
    }
    if let Some(iterations) = cli.max_iterations {
        config = config.with_max_iterations(iterations);
    }

    info!("Loading problem from: {}", cli.input_file.display());
    let problem = Problem::from_file(&cli.input_file)?;
    info!(
        "Loaded problem with {} customers and {} vehicles",
        problem.customer_count(),
        problem.vehicle_count()
    );

    let mut solver = CvrpSolver::new(problem, config);
    let solution = solver.run()?;
    info!(
        "Search completed in {} with status {}: distance {:.2}, {} routes used",
        format_duration(solver.run_time),
        solution.status,
        solution.distance,
        solution.get_used_route_count()
    );

    save_solution(&solution, &cli.output_file)?;
    info!("Solution saved to: {}", cli.output_file.display());

    if cli.verbose {
        print_solution(&solution, &solver.problem);
    }

    if cli.chart {
        let chart_path = cli.output_file.with_extension("svg");
        render_chart(&solution, &solver.problem, &chart_path)?;
        info!("Chart saved to: {}", chart_path.display());
    }

    Ok(())
}
