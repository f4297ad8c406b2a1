//! Scenario runner and report.
//!
//! The runner plays the part of the external harness: it selects scenarios,
//! runs each one to completion, and aggregates per-scenario outcomes. One
//! scenario failing never stops the others.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::client::SwapiClient;
use crate::error::VerifyResult;
use crate::scenario::Scenario;
use crate::schema::ResourceKind;

/// How a scenario ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "message", rename_all = "snake_case")]
pub enum Outcome {
    /// Every expectation held.
    Passed,
    /// The service answered but an expectation did not hold.
    Failed(String),
    /// The service could not be reached or its answer could not be read.
    Errored(String),
}

impl Outcome {
    /// Returns true for [`Outcome::Passed`].
    pub fn is_passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }
}

impl From<VerifyResult<()>> for Outcome {
    fn from(result: VerifyResult<()>) -> Self {
        match result {
            Ok(()) => Outcome::Passed,
            Err(e) if e.is_assertion() => Outcome::Failed(e.to_string()),
            Err(e) => Outcome::Errored(e.to_string()),
        }
    }
}

/// Result of a single scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    /// Scenario name.
    pub name: String,
    /// Collection the scenario targeted.
    pub resource: ResourceKind,
    /// Request path.
    pub path: String,
    /// How it ended.
    #[serde(flatten)]
    pub outcome: Outcome,
    /// Duration in milliseconds.
    pub duration_ms: u64,
}

/// Selects which scenarios run. Empty lists match everything.
#[derive(Debug, Clone, Default)]
pub struct ScenarioFilter {
    /// Collections to include.
    pub resources: Vec<ResourceKind>,
    /// Tags to include; a scenario needs any one of them.
    pub tags: Vec<String>,
    /// Case-insensitive substring of the scenario name.
    pub name: Option<String>,
}

impl ScenarioFilter {
    /// Checks if a scenario should run.
    pub fn should_run(&self, scenario: &Scenario) -> bool {
        if !self.resources.is_empty() && !self.resources.contains(&scenario.resource) {
            return false;
        }

        if !self.tags.is_empty() && !scenario.tags.iter().any(|t| self.tags.contains(t)) {
            return false;
        }

        match &self.name {
            Some(needle) => scenario
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            None => true,
        }
    }
}

/// Aggregated results of a run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
    /// Per-scenario results, in input order.
    pub results: Vec<ScenarioResult>,
}

impl RunReport {
    /// Returns true if all scenarios passed.
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.outcome.is_passed())
    }

    /// Returns the number of passed scenarios.
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_passed()).count()
    }

    /// Returns the number of failed scenarios.
    pub fn failed_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Failed(_)))
            .count()
    }

    /// Returns the number of errored scenarios.
    pub fn errored_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Errored(_)))
            .count()
    }

    /// Returns the results that did not pass.
    pub fn problems(&self) -> impl Iterator<Item = &ScenarioResult> {
        self.results.iter().filter(|r| !r.outcome.is_passed())
    }
}

/// Runs scenarios against one client.
#[derive(Debug, Clone)]
pub struct Runner {
    client: SwapiClient,
    filter: ScenarioFilter,
    parallel: bool,
}

impl Runner {
    /// Creates a sequential runner with no filter.
    pub fn new(client: SwapiClient) -> Self {
        Self {
            client,
            filter: ScenarioFilter::default(),
            parallel: false,
        }
    }

    /// Sets the scenario filter.
    pub fn with_filter(mut self, filter: ScenarioFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Runs scenarios concurrently, one task each.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns the scenarios the filter selects.
    pub fn select(&self, scenarios: Vec<Scenario>) -> Vec<Scenario> {
        scenarios
            .into_iter()
            .filter(|s| self.filter.should_run(s))
            .collect()
    }

    /// Runs the selected scenarios and collects a report.
    pub async fn run(&self, scenarios: Vec<Scenario>) -> RunReport {
        let started_at = Utc::now();
        let started = Instant::now();
        let selected = self.select(scenarios);

        info!(
            scenarios = selected.len(),
            parallel = self.parallel,
            base_url = %self.client.config().base_url,
            "Running scenarios"
        );

        let results = if self.parallel {
            self.run_parallel(selected).await
        } else {
            let mut results = Vec::with_capacity(selected.len());
            for scenario in &selected {
                results.push(run_one(&self.client, scenario).await);
            }
            results
        };

        let report = RunReport {
            started_at,
            duration_ms: started.elapsed().as_millis() as u64,
            results,
        };

        info!(
            passed = report.passed_count(),
            failed = report.failed_count(),
            errored = report.errored_count(),
            duration_ms = report.duration_ms,
            "Run finished"
        );

        report
    }

    async fn run_parallel(&self, scenarios: Vec<Scenario>) -> Vec<ScenarioResult> {
        let mut handles = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            let client = self.client.clone();
            let summary = (scenario.name.clone(), scenario.resource, scenario.path());
            let handle = tokio::spawn(async move { run_one(&client, &scenario).await });
            handles.push((summary, handle));
        }

        let mut results = Vec::with_capacity(handles.len());
        for ((name, resource, path), handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => {
                    warn!(scenario = %name, error = %e, "Scenario task aborted");
                    ScenarioResult {
                        name,
                        resource,
                        path,
                        outcome: Outcome::Errored(format!("scenario task aborted: {}", e)),
                        duration_ms: 0,
                    }
                }
            };
            results.push(result);
        }
        results
    }
}

async fn run_one(client: &SwapiClient, scenario: &Scenario) -> ScenarioResult {
    let started = Instant::now();
    let outcome = Outcome::from(scenario.run(client).await);
    let duration_ms = started.elapsed().as_millis() as u64;

    match &outcome {
        Outcome::Passed => info!(scenario = %scenario.name, duration_ms, "Passed"),
        Outcome::Failed(message) => {
            warn!(scenario = %scenario.name, duration_ms, error = %message, "Failed")
        }
        Outcome::Errored(message) => {
            warn!(scenario = %scenario.name, duration_ms, error = %message, "Errored")
        }
    }

    ScenarioResult {
        name: scenario.name.clone(),
        resource: scenario.resource,
        path: scenario.path(),
        outcome,
        duration_ms,
    }
}
