use clap::{Parser, Subcommand};
use sd_app::{AppError, AppResult, InputPaths, config_service, results_service};
use sd_nav::DistributionView;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sd-cli")]
#[command(about = "Scheduling simulation dashboard CLI - run configuration and results browsing", long_about = None)]
struct Cli {
    /// Log debug output, including ignored navigation and synthesis events
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a run configuration from a configuration form snapshot
    Synthesize {
        /// Path to the form snapshot JSON
        snapshot: PathBuf,
        /// Named machine shapes (JSON)
        #[arg(long)]
        clusters: PathBuf,
        /// Scheduler directory (JSON)
        #[arg(long)]
        schedulers: PathBuf,
        /// Workload records (JSON)
        #[arg(long)]
        workloads: PathBuf,
        /// Output file, .yaml or .json (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a stored run configuration
    Validate {
        /// Path to the configuration (.yaml or .json)
        config_path: PathBuf,
    },
    /// List the routes a results menu offers
    Routes {
        /// Path to the results JSON
        results_path: PathBuf,
    },
    /// Render the chart for a route key
    Render {
        /// Path to the results JSON
        results_path: PathBuf,
        /// Route key, e.g. experiment_0~fcfs~jobs_utilization
        key: String,
        /// Output JSON file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render the all-experiments chart with one distribution view applied
    View {
        /// Path to the results JSON
        results_path: PathBuf,
        /// all, speedup, turnaround or waiting
        view: DistributionView,
        /// Output JSON file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Save the workload of a download route
    Download {
        /// Path to the results JSON
        results_path: PathBuf,
        /// Route key ending in ~download-workload
        key: String,
        /// Directory to write into
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
    /// Print pooled statistics per scheduler
    Summary {
        /// Path to the results JSON
        results_path: PathBuf,
    },
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Synthesize {
            snapshot,
            clusters,
            schedulers,
            workloads,
            output,
        } => cmd_synthesize(
            InputPaths {
                snapshot: &snapshot,
                clusters: &clusters,
                schedulers: &schedulers,
                workloads: &workloads,
            },
            output.as_deref(),
        ),
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Routes { results_path } => cmd_routes(&results_path),
        Commands::Render {
            results_path,
            key,
            output,
        } => cmd_render(&results_path, &key, output.as_deref()),
        Commands::View {
            results_path,
            view,
            output,
        } => cmd_view(&results_path, view, output.as_deref()),
        Commands::Download {
            results_path,
            key,
            dir,
        } => cmd_download(&results_path, &key, &dir),
        Commands::Summary { results_path } => cmd_summary(&results_path),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_synthesize(paths: InputPaths<'_>, output: Option<&Path>) -> AppResult<()> {
    let inputs = config_service::load_inputs(paths)?;
    let config = match config_service::synthesize_configuration(&inputs) {
        Ok(config) => config,
        Err(err) => {
            if err.is_no_op() {
                warn!(%err, "form state did not yield a configuration");
                eprintln!("✗ Nothing synthesized: {}", err);
            }
            return Err(err);
        }
    };

    info!(schedulers = config.schedulers.len(), "configuration synthesized");
    if let Some(path) = output {
        config_service::save_configuration(path, &config)?;
        println!("✓ Configuration written to {}", path.display());
    } else {
        print!("{}", config_service::configuration_to_yaml(&config)?);
    }
    Ok(())
}

fn cmd_validate(config_path: &Path) -> AppResult<()> {
    println!("Validating configuration: {}", config_path.display());
    let config = config_service::load_configuration(config_path)?;
    config_service::validate_configuration(&config)?;
    println!("✓ Configuration is valid");
    println!(
        "  {} scheduler(s), {} experiment(s), {} cores",
        config.schedulers.len(),
        config.simulation.experiments,
        config.cluster.total_cores()
    );
    Ok(())
}

fn cmd_routes(results_path: &Path) -> AppResult<()> {
    let store = results_service::load_results(results_path)?;
    for entry in results_service::list_routes(&store) {
        println!("  {:<60} {}", entry.key, entry.label);
    }
    Ok(())
}

fn cmd_render(results_path: &Path, key: &str, output: Option<&Path>) -> AppResult<()> {
    let store = results_service::load_results(results_path)?;
    debug!(key, experiments = store.len(), "rendering route");
    let chart = results_service::render_route(&store, key)?;
    emit_json(&chart, output)
}

fn cmd_view(results_path: &Path, view: DistributionView, output: Option<&Path>) -> AppResult<()> {
    let store = results_service::load_results(results_path)?;
    debug!(%view, experiments = store.len(), "rendering all-experiments view");
    let chart = results_service::render_global_view(&store, view);
    emit_json(&chart, output)
}

fn cmd_download(results_path: &Path, key: &str, dir: &Path) -> AppResult<()> {
    let store = results_service::load_results(results_path)?;
    debug!(key, dir = %dir.display(), "downloading workload");
    let path = results_service::write_download(&store, key, dir)?;
    println!("✓ Workload saved to {}", path.display());
    Ok(())
}

fn cmd_summary(results_path: &Path) -> AppResult<()> {
    let store = results_service::load_results(results_path)?;
    let summaries = results_service::summarize(&store);

    if summaries.is_empty() {
        println!("No schedulers to compare");
        return Ok(());
    }

    println!("{} experiment(s)", store.len());
    for s in summaries {
        println!("\n{}:", s.scheduler);
        println!("  Mean makespan speedup: {:.2} ({} experiment(s))", s.mean_makespan_speedup, s.experiments_reported);
        println!("  Jobs pooled: {}", s.jobs);
        println!("  Mean job speedup: {:.3}", s.mean_speedup);
        println!("  Mean turnaround ratio: {:.3}", s.mean_turnaround);
        println!("  Mean waiting time difference: {:.3}", s.mean_waiting);
    }
    Ok(())
}

fn emit_json<T: Serialize>(value: &T, output: Option<&Path>) -> AppResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Results(format!("Failed to serialize chart: {}", e)))?;

    if let Some(path) = output {
        std::fs::write(path, json).map_err(|e| AppError::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        println!("✓ Chart written to {}", path.display());
    } else {
        println!("{}", json);
    }
    Ok(())
}
