//! Fleet deployment entry point: CLI wiring and config-driven engine construction.

use std::error::Error;
use std::process;

use clap::Parser;
use tracing::info;

use fleet_deploy::cli::Args;
use fleet_deploy::config::ScenarioConfig;
use fleet_deploy::io::{export_casks_csv, export_ledger_csv, export_report_json};
use fleet_deploy::logging;
use fleet_deploy::sim::engine::Engine;

fn run(args: &Args, cfg: &ScenarioConfig) -> Result<(), Box<dyn Error>> {
    let fleet = cfg.fleet()?;
    let engine = Engine::new(fleet.clone(), cfg.policy()?, &cfg.demand, cfg.simulation.start_year)?;
    let result = engine.run()?;

    println!("policy: {}", result.policy);
    for step in result.ledger.steps() {
        println!("{step}");
    }
    println!();
    println!("{}", result.report);

    if let Some(path) = &args.ledger_out {
        export_ledger_csv(&result.ledger, &fleet, path)?;
        info!(path = %path.display(), "ledger exported");
    }
    if let Some(path) = &args.report_json {
        export_report_json(&result.report, path)?;
        info!(path = %path.display(), "score report exported");
    }

    if let Some(calculator) = cfg.cask_calculator() {
        let schedule = calculator?.casks()?;
        println!();
        println!("--- Cask Schedule ({}) ---", schedule.level);
        for row in &schedule.rows {
            println!(
                "{}: elements={:.2} casks={} leftover={:.4}",
                row.year, row.elements, row.casks, row.leftover
            );
        }
        println!("total casks: {}", schedule.total_casks());
        println!("unpacked remainder: {:.4}", schedule.unpacked_remainder());

        if let Some(path) = &args.casks_out {
            export_casks_csv(&schedule, path)?;
            info!(path = %path.display(), "cask schedule exported");
        }
    } else {
        args.warn_unused_outputs(cfg);
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    let cfg = match args.load_scenario() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let errors = cfg.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    if let Err(e) = run(&args, &cfg) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
