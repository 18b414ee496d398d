/// Regression table configuration loader - parses tables/*.toml
///
/// Keeps the published coefficients and exponents out of the code, so a
/// revised report can be dropped in as a new table file without touching
/// the region equations. The shipped tables are embedded at compile time;
/// alternate tables can be read from a string or a file.
///
/// Values are kept as raw strings and numbers here. Turning them into a
/// validated `ConstantTable` is the job of `table`.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::equations::EquationSet;
use crate::error::TableError;
use crate::model::RecurrenceInterval;
use crate::table::ConstantTable;

/// New York, USGS SIR 2006-5112.
pub const NY_SIR2006_5112: &str = include_str!("../tables/ny_sir2006_5112.toml");

/// Pennsylvania, USGS SIR 2008-5102.
pub const PA_SIR2008_5102: &str = include_str!("../tables/pa_sir2008_5102.toml");

// ============================================================================
// TOML Configuration Structures
// ============================================================================

/// Root of a regression table file
#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    pub equation_set: String,           // "NY", "PA"
    pub publication: String,            // report identifier, e.g. "USGS SIR 2006-5112"
    pub url: Option<String>,
    pub recurrence: Vec<RecurrenceInterval>,
    pub regions: BTreeMap<String, RegionConfig>,
}

/// Coefficient and exponent columns for one region
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegionConfig {
    /// Interval label -> coefficient
    #[serde(default)]
    pub coefficients: BTreeMap<String, f64>,

    /// Interval label -> (characteristic code -> exponent)
    #[serde(default)]
    pub exponents: BTreeMap<String, BTreeMap<String, f64>>,
}

// ============================================================================
// Loading Functions
// ============================================================================

/// Parses table TOML without validating its shape.
pub fn parse_table(contents: &str) -> Result<TableConfig, TableError> {
    toml::from_str(contents).map_err(|e| TableError::Parse(e.to_string()))
}

/// Loads and validates a table file for the given equation set.
pub fn load_table<P: AsRef<Path>>(path: P, set: EquationSet) -> Result<ConstantTable, TableError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| TableError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    ConstantTable::from_toml_str(set, &contents)
}

/// Embedded TOML for a shipped equation set.
pub fn shipped_toml(set: EquationSet) -> &'static str {
    match set {
        EquationSet::NewYork => NY_SIR2006_5112,
        EquationSet::Pennsylvania => PA_SIR2008_5102,
    }
}

// ============================================================================
// Tests
// ============================================================================
