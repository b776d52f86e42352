use std::path::PathBuf;

use clap::{Parser, Subcommand};

use ps_app::{AppResult, Driver, RunProgressEvent};
use ps_engine::ScalarOrMap;
use ps_pdl::Source;

/// Traces each loading stage as a `tracing` event (mirrors `tf-cli`'s
/// progress callback, swapped for a log line since this CLI has no
/// long-running steady/transient solve to render a bar for).
fn trace_progress(event: RunProgressEvent) {
    tracing::info!(stage = ?event.stage, sim_time_us = event.sim_time_us, message = ?event.message, "loading");
}

#[derive(Parser)]
#[command(name = "ps-cli")]
#[command(about = "Plumbing simulator CLI - PDL/ProcLang network simulation tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one or more PDL documents and report validation errors, if any.
    Validate {
        /// PDL document paths; later documents can `import` earlier ones.
        pdl_paths: Vec<PathBuf>,
    },
    /// Parse PDL documents and print the resulting graph's nodes, edges, and components.
    Load {
        pdl_paths: Vec<PathBuf>,
    },
    /// Step the engine described by a PDL document set, optionally driven by a ProcLang suite.
    Step {
        pdl_paths: Vec<PathBuf>,
        /// ProcLang document driving procedure transitions; without it, steps just advance time.
        #[arg(long)]
        procedure: Option<PathBuf>,
        #[arg(long, default_value_t = 1)]
        count: u32,
        #[arg(long)]
        timestep_us: Option<u64>,
    },
    /// Drive the engine to convergence (or a time limit) and print the final pressures.
    Solve {
        pdl_paths: Vec<PathBuf>,
        #[arg(long, default_value_t = 1e-3)]
        min_delta_pa_per_s: f64,
        #[arg(long, default_value_t = 60.0)]
        max_time_s: f64,
    },
    /// Parse a ProcLang document and list its procedures, steps, and transitions.
    Procedures {
        path: PathBuf,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Validate { pdl_paths } => cmd_validate(&pdl_paths),
        Commands::Load { pdl_paths } => cmd_load(&pdl_paths),
        Commands::Step {
            pdl_paths,
            procedure,
            count,
            timestep_us,
        } => cmd_step(&pdl_paths, procedure.as_deref(), count, timestep_us),
        Commands::Solve {
            pdl_paths,
            min_delta_pa_per_s,
            max_time_s,
        } => cmd_solve(&pdl_paths, min_delta_pa_per_s, max_time_s),
        Commands::Procedures { path } => cmd_procedures(&path),
    }
}

fn sources(pdl_paths: &[PathBuf]) -> Vec<Source> {
    pdl_paths.iter().cloned().map(Source::Path).collect()
}

fn cmd_validate(pdl_paths: &[PathBuf]) -> AppResult<()> {
    let engine = ps_app::load_engine_with_progress(sources(pdl_paths), Some(&mut trace_progress))?;
    if engine.is_valid() {
        println!("valid: no validation errors");
    } else {
        let errors = engine.errors();
        println!("invalid: {} validation error(s)", errors.len());
        for error in &errors {
            println!("  - {error}");
        }
    }
    Ok(())
}

fn cmd_load(pdl_paths: &[PathBuf]) -> AppResult<()> {
    let engine = ps_app::load_engine_with_progress(sources(pdl_paths), Some(&mut trace_progress))?;
    println!("nodes:");
    for node in engine.nodes() {
        println!("  {node}");
    }
    println!("edges:");
    for edge in engine.edges() {
        println!("  {edge}");
    }
    println!("components:");
    for component in engine.components() {
        println!("  {component}");
    }
    Ok(())
}

fn cmd_step(
    pdl_paths: &[PathBuf],
    procedure: Option<&std::path::Path>,
    count: u32,
    timestep_us: Option<u64>,
) -> AppResult<()> {
    let engine = ps_app::load_engine_with_progress(sources(pdl_paths), Some(&mut trace_progress))?;

    match procedure {
        Some(path) => {
            let suite = ps_app::load_procedures_from_path_with_progress(path, Some(&mut trace_progress))?;
            let mut driver = Driver::new(engine, suite)?;
            for _ in 0..count {
                let event = driver.tick(timestep_us)?;
                println!(
                    "t={}us stage={:?} procedure={} step={} {}",
                    driver.engine().time(),
                    event.stage,
                    driver.current_procedure(),
                    driver.current_step(),
                    event.message.unwrap_or_default(),
                );
            }
            print_pressures(driver.engine());
        }
        None => {
            let mut engine = engine;
            for _ in 0..count {
                engine.step(timestep_us)?;
            }
            println!("t={}us", engine.time());
            print_pressures(&engine);
        }
    }
    Ok(())
}

fn cmd_solve(pdl_paths: &[PathBuf], min_delta_pa_per_s: f64, max_time_s: f64) -> AppResult<()> {
    let mut engine = ps_app::load_engine(sources(pdl_paths))?;
    let outcome = engine.solve(min_delta_pa_per_s, max_time_s, None)?;
    match outcome {
        ps_engine::SolveOutcome::Last(pressures) => {
            println!("converged at t={}us", engine.time());
            for (node, pressure) in pressures {
                println!("  {node} = {pressure}");
            }
        }
        ps_engine::SolveOutcome::History(_) => {
            unreachable!("solve was not asked for a return resolution")
        }
    }
    Ok(())
}

fn print_pressures(engine: &ps_engine::PlumbingEngine) {
    match engine.current_pressures(&[]) {
        ScalarOrMap::Map(pressures) => {
            for (node, pressure) in pressures {
                println!("  {node} = {pressure}");
            }
        }
        ScalarOrMap::Scalar(pressure) => println!("  {pressure}"),
    }
}

fn cmd_procedures(path: &std::path::Path) -> AppResult<()> {
    let suite = ps_app::load_procedures_from_path_with_progress(path, Some(&mut trace_progress))?;
    for (name, procedure) in &suite.procedures {
        println!("{name}:");
        for step in &procedure.steps {
            println!("  {}: {:?}", step.id, step.action);
            for (_, transition) in &step.out_conditions {
                println!("    -> {}.{}", transition.procedure, transition.step_id);
            }
        }
    }
    Ok(())
}
