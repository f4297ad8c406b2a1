//! swapi-verify
//!
//! Runs the built-in scenario catalog and any JSON suites against the Star
//! Wars reference dataset and prints a report.
//!
//! Exit status: 0 when every selected scenario passed, 1 when any failed or
//! errored, 2 for configuration or suite errors.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use swapi_verify::suite::load_suites_from_dir;
use swapi_verify::{
    ClientConfig, Outcome, ResourceKind, RunReport, Runner, Scenario, ScenarioFilter, SwapiClient,
    catalog, init_logging,
};
use tracing::{info, warn};

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "swapi-verify", version, about = "Verify the Star Wars reference API")]
struct Cli {
    #[command(flatten)]
    config: ClientConfig,

    /// Directory of JSON suite files to run (searched recursively).
    #[arg(long)]
    suites: Option<PathBuf>,

    /// Skip the built-in scenario catalog.
    #[arg(long)]
    no_builtin: bool,

    /// Only run scenarios for this collection (repeatable).
    #[arg(long = "resource", value_enum)]
    resources: Vec<ResourceKind>,

    /// Only run scenarios carrying this tag (repeatable).
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Only run scenarios whose name contains this text.
    #[arg(long)]
    name: Option<String>,

    /// Run scenarios concurrently.
    #[arg(long)]
    parallel: bool,

    /// Report format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

impl Cli {
    fn filter(&self) -> ScenarioFilter {
        ScenarioFilter {
            resources: self.resources.clone(),
            tags: self.tags.clone(),
            name: self.name.clone(),
        }
    }

    /// Collects the built-in catalog and every suite under `--suites`.
    fn scenarios(&self) -> anyhow::Result<Vec<Scenario>> {
        let mut scenarios = if self.no_builtin {
            Vec::new()
        } else {
            catalog::all()
        };

        if let Some(dir) = &self.suites {
            for suite in load_suites_from_dir(dir)? {
                info!(suite = %suite.name, scenarios = suite.scenarios.len(), "Loaded suite");
                scenarios.extend(suite.into_scenarios());
            }
        }

        Ok(scenarios)
    }
}

fn render_text(report: &RunReport) -> String {
    let mut out = String::new();

    for result in &report.results {
        let (label, message) = match &result.outcome {
            Outcome::Passed => ("PASS ", None),
            Outcome::Failed(message) => ("FAIL ", Some(message)),
            Outcome::Errored(message) => ("ERROR", Some(message)),
        };
        let _ = writeln!(out, "{} {} ({} ms)", label, result.name, result.duration_ms);
        if let Some(message) = message {
            let _ = writeln!(out, "      {} {}", result.path, message);
        }
    }

    let _ = writeln!(
        out,
        "\n{} scenarios: {} passed, {} failed, {} errored in {} ms",
        report.results.len(),
        report.passed_count(),
        report.failed_count(),
        report.errored_count(),
        report.duration_ms
    );
    out
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli.config.log_level);

    if let Err(errors) = cli.config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        return Ok(ExitCode::from(2));
    }

    let scenarios = match cli.scenarios() {
        Ok(scenarios) => scenarios,
        Err(e) => {
            eprintln!("Suite error: {}", e);
            return Ok(ExitCode::from(2));
        }
    };

    info!(
        base_url = %cli.config.base_url,
        timeout_ms = cli.config.timeout_ms,
        scenarios = scenarios.len(),
        "Starting verification run"
    );

    let runner = Runner::new(SwapiClient::new(cli.config.clone())?)
        .with_filter(cli.filter())
        .parallel(cli.parallel);
    let report = runner.run(scenarios).await;

    if report.results.is_empty() {
        warn!("No scenarios matched the filter");
    }

    match cli.format {
        Format::Text => print!("{}", render_text(&report)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
