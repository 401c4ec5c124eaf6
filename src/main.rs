use std::process::ExitCode;

use clap::Parser;

use carechain::{
    config::{Config, Opt},
    diagnostics::MemorySampler,
    logging::Logger,
    orchestration::{Chain, Driver},
    report::reporter_for,
};

fn main() -> ExitCode {
    // Read command-line arguments
    let opt = Opt::parse();

    // Load configuration with optional override
    let config = match Config::load_with_opt_override(&opt) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    if let Err(e) = Logger::new(config.log.clone()).init_env_logger() {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    // Wire the chain before any patient is generated
    log::info!("Wiring chain...");
    let chain = match Chain::from_config(&config.chain) {
        Ok(chain) => chain,
        Err(e) => {
            log::error!("Failed to build chain: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut driver = match Driver::new(chain, config.driver.clone()) {
        Ok(driver) => driver,
        Err(e) => {
            log::error!("Failed to prepare workload: {e}");
            return ExitCode::FAILURE;
        }
    };
    if config.diagnostics.enabled {
        log::info!(
            "Sampling diagnostics every {} patients to {}",
            config.diagnostics.interval,
            config.diagnostics.path.display()
        );
        driver = driver.with_sampler(
            MemorySampler::new(&config.diagnostics.path),
            config.diagnostics.interval,
        );
    }

    let mut reporter = reporter_for(config.report);
    driver.run(reporter.as_mut());

    ExitCode::SUCCESS
}
