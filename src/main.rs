// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging and the HTTP client
// 3. Run the estimation for the requested page
// 4. Print the report (plain lines or JSON)
// 5. Exit with proper code (0 = success, 1 = page problem, 2 = error)
// =============================================================================

mod cli;        // src/cli.rs - command-line parsing
mod estimate;   // src/estimate/ - the estimation run and its report
mod logging;    // src/logging.rs - tracing setup
mod resource;   // src/resource/ - per-resource extraction, resolving, probing

#[cfg(test)]
mod test_support;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use estimate::{EstimateError, Estimator, Report, ResourceEntry};
use resource::{HttpClient, ProbeConfig};
use tracing::debug;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = report printed
//   Ok(1) = missing URL or unreachable page (message printed)
//   Err   = bad arguments or unexpected error
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    // Validate the category before touching the network
    let request = cli.request()?;

    let config = ProbeConfig {
        timeout: cli.timeout(),
        ..ProbeConfig::default()
    };
    let estimator = Estimator::new(HttpClient::new(&config)?).with_concurrency(cli.concurrency);

    // Plain output prints each counted resource as soon as it is known
    let outcome = if cli.json {
        estimator.run(&request).await
    } else {
        estimator
            .run_with(&request, |entry: &ResourceEntry| println!("{}", entry.line()))
            .await
    };

    match outcome {
        Ok(report) => {
            print_report(&report, cli.json)?;
            Ok(0)
        }
        Err(e) => {
            if let EstimateError::Unreachable { url, reason } = &e {
                debug!(%url, %reason, "page fetch failed");
            }
            println!("{}", e);
            Ok(1)
        }
    }
}

// Prints what is left of the report once the run is over.
//
// In plain mode the per-resource lines are already out, so only the summary
// follows.
fn print_report(report: &Report, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        for line in report.summary_lines() {
            println!("{}", line);
        }
    }
    Ok(())
}
