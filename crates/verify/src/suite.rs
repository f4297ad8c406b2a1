//! JSON scenario suites.
//!
//! Loads declarative suites so scenarios can be added without recompiling.
//!
//! ```json
//! {
//!   "name": "planets",
//!   "description": "Planet collection checks",
//!   "tags": ["extended"],
//!   "scenarios": [
//!     { "name": "list planets", "resource": "planets", "request": "list", "expect": "non_empty" }
//!   ]
//! }
//! ```
//!
//! Suite-level tags are appended to every scenario's own tags.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::scenario::Scenario;

/// A suite file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScenarioSuite {
    /// Name of the suite.
    pub name: String,

    /// Description of the suite.
    #[serde(default)]
    pub description: String,

    /// Tags applied to every scenario of the suite.
    #[serde(default)]
    pub tags: Vec<String>,

    /// The scenarios.
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

impl ScenarioSuite {
    /// Returns the scenarios with suite tags merged in.
    pub fn into_scenarios(self) -> Vec<Scenario> {
        let suite_tags = self.tags;
        self.scenarios
            .into_iter()
            .map(|mut scenario| {
                for tag in &suite_tags {
                    if !scenario.tags.contains(tag) {
                        scenario.tags.push(tag.clone());
                    }
                }
                scenario
            })
            .collect()
    }

    fn validate(&self) -> Result<(), String> {
        self.scenarios.iter().try_for_each(Scenario::validate)
    }
}

/// Error loading a suite file.
#[derive(Debug, Error)]
pub enum SuiteLoadError {
    /// IO error reading the file.
    #[error("IO error reading {path}: {message}")]
    Io { path: PathBuf, message: String },
    /// JSON parsing error.
    #[error("Parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },
    /// A scenario is inconsistent.
    #[error("Invalid scenario in {path}: {message}")]
    Invalid { path: PathBuf, message: String },
}

/// Loads a suite from a file.
pub fn load_suite(path: &Path) -> Result<ScenarioSuite, SuiteLoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| SuiteLoadError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let suite: ScenarioSuite =
        serde_json::from_str(&content).map_err(|e| SuiteLoadError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    suite.validate().map_err(|message| SuiteLoadError::Invalid {
        path: path.to_path_buf(),
        message,
    })?;

    debug!(path = %path.display(), suite = %suite.name, scenarios = suite.scenarios.len(), "Loaded suite");
    Ok(suite)
}

/// Discovers all suite files in a directory, recursively, in path order.
pub fn discover_suites(dir: &Path) -> Vec<PathBuf> {
    let mut suites = Vec::new();

    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() && path.extension().map(|e| e == "json").unwrap_or(false) {
                suites.push(path);
            } else if path.is_dir() {
                suites.extend(discover_suites(&path));
            }
        }
    }

    suites.sort();
    suites
}

/// Loads every suite under a directory.
///
/// The directory itself must be readable; unreadable entries below it are
/// skipped.
pub fn load_suites_from_dir(dir: &Path) -> Result<Vec<ScenarioSuite>, SuiteLoadError> {
    std::fs::read_dir(dir).map_err(|e| SuiteLoadError::Io {
        path: dir.to_path_buf(),
        message: e.to_string(),
    })?;

    discover_suites(dir).iter().map(|p| load_suite(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{Expectation, Request};
    use crate::schema::ResourceKind;

    const PLANETS: &str = r#"{
        "name": "planets",
        "tags": ["extended"],
        "scenarios": [
            {"name": "list planets", "tags": ["list"], "resource": "planets", "request": "list", "expect": "non_empty"},
            {"name": "Tatooine", "resource": "planets", "request": {"search": {"term": "Tatooine"}}, "expect": {"count": 1}}
        ]
    }"#;

    #[test]
    fn test_load_suite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planets.json");
        std::fs::write(&path, PLANETS).unwrap();

        let suite = load_suite(&path).unwrap();
        assert_eq!(suite.name, "planets");
        assert_eq!(suite.scenarios.len(), 2);
        assert_eq!(suite.scenarios[1].request, Request::Search { term: "Tatooine".to_string() });
        assert_eq!(suite.scenarios[1].expect, Expectation::Count(1));
    }

    #[test]
    fn test_suite_tags_are_merged() {
        let suite: ScenarioSuite = serde_json::from_str(PLANETS).unwrap();
        let scenarios = suite.into_scenarios();
        assert_eq!(scenarios[0].tags, vec!["list".to_string(), "extended".to_string()]);
        assert_eq!(scenarios[1].tags, vec!["extended".to_string()]);
        assert_eq!(scenarios[1].resource, ResourceKind::Planets);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_suite(Path::new("/nonexistent/suite.json")).unwrap_err();
        assert!(matches!(err, SuiteLoadError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"name\": ").unwrap();

        let err = load_suite(&path).unwrap_err();
        assert!(matches!(err, SuiteLoadError::Parse { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_load_inconsistent_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(
            &path,
            r#"{"name": "bad", "scenarios": [
                {"name": "luke as film", "resource": "films", "request": {"fetch": {"id": 1}},
                 "expect": {"entity": {"character": {"name": "Luke Skywalker", "hair_color": "blond", "eye_color": "blue"}}}}
            ]}"#,
        )
        .unwrap();

        assert!(matches!(
            load_suite(&path).unwrap_err(),
            SuiteLoadError::Invalid { .. }
        ));
    }

    #[test]
    fn test_discover_suites_recursive() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("a.json"), PLANETS).unwrap();
        std::fs::write(dir.path().join("nested").join("b.json"), PLANETS).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let found = discover_suites(dir.path());
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|p| p.extension().unwrap() == "json"));

        let suites = load_suites_from_dir(dir.path()).unwrap();
        assert_eq!(suites.len(), 2);
    }

    #[test]
    fn test_discover_missing_dir() {
        assert!(discover_suites(Path::new("/nonexistent/suites")).is_empty());
    }

    #[test]
    fn test_load_missing_dir_is_error() {
        let err = load_suites_from_dir(Path::new("/nonexistent/suites")).unwrap_err();
        assert!(matches!(err, SuiteLoadError::Io { ref path, .. } if path == Path::new("/nonexistent/suites")));
    }

    #[test]
    fn test_load_file_as_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planets.json");
        std::fs::write(&path, PLANETS).unwrap();

        assert!(matches!(
            load_suites_from_dir(&path).unwrap_err(),
            SuiteLoadError::Io { .. }
        ));
    }

    #[test]
    fn test_load_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_suites_from_dir(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_bundled_extended_suite() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("suites/extended.json");
        let suite = load_suite(&path).unwrap();
        assert!(!suite.scenarios.is_empty());
    }
}
