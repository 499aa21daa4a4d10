//! Fixture loading from YAML files

use serde::Deserialize;

use std::path::Path;

/// A single test case from a fixture file
#[derive(Debug, Clone, Deserialize)]
pub struct TestCase {
    pub id: String,
    pub desc: String,
    pub input: String,
    #[serde(default)]
    pub sections: Vec<ExpectedSection>,
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Debug name of the fatal diagnostic code, if the input is malformed
    #[serde(default)]
    pub error: Option<String>,
    /// Expected `[line, character]` of the fatal diagnostic
    #[serde(default)]
    pub at: Option<(u32, u32)>,
    /// Rendered output, when it differs from the input
    #[serde(default)]
    pub output: Option<String>,
}

/// Expected section: name plus `[key, value]` pairs
#[derive(Debug, Clone, Deserialize)]
pub struct ExpectedSection {
    pub name: String,
    #[serde(default)]
    pub pairs: Vec<(String, String)>,
}

/// Load all test cases from a YAML fixture file
pub fn load_fixtures(path: &Path) -> Vec<TestCase> {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read fixture file {:?}: {}", path, e));
    serde_yaml::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture file {:?}: {}", path, e))
}

/// Load fixtures from the standard fixtures directory
pub fn load_fixtures_by_name(name: &str) -> Vec<TestCase> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{}.yaml", name));
    load_fixtures(&path)
}
