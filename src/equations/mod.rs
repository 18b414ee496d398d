//! Regional regression equations, one submodule per state publication.
//!
//! Submodules:
//! - `new_york`     — USGS SIR 2006-5112, regions R1..R6, linear coefficients
//! - `pennsylvania` — USGS SIR 2008-5102, regions R1..R4, log10 intercepts
//!
//! Every region has its own evaluator with its own offsets and scalings.
//! The only code shared between them is here: picking the table, checking
//! that each transformed input is a legal base for a fractional power,
//! walking the recurrence intervals, and rounding.

pub mod new_york;
pub mod pennsylvania;

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::config;
use crate::error::{FlowError, TableError};
use crate::model::{BasinCharacteristics, Characteristic, DischargeResult, Region};
use crate::table::{ConstantTable, IntervalTerms};

// ---------------------------------------------------------------------------
// Equation sets
// ---------------------------------------------------------------------------

/// A state's published set of regional regression equations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EquationSet {
    NewYork,
    Pennsylvania,
}

impl EquationSet {
    pub const ALL: [EquationSet; 2] = [EquationSet::NewYork, EquationSet::Pennsylvania];

    /// Looks up an equation set by state, accepting the postal code or the
    /// full name in any case ("NY", "new york", "Pennsylvania").
    pub fn from_state(state: &str) -> Result<Self, FlowError> {
        match state.trim().to_ascii_lowercase().as_str() {
            "ny" | "new york" => Ok(EquationSet::NewYork),
            "pa" | "pennsylvania" => Ok(EquationSet::Pennsylvania),
            _ => Err(FlowError::UnsupportedEquationSet(state.to_string())),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            EquationSet::NewYork => "NY",
            EquationSet::Pennsylvania => "PA",
        }
    }

    pub fn state_name(&self) -> &'static str {
        match self {
            EquationSet::NewYork => "New York",
            EquationSet::Pennsylvania => "Pennsylvania",
        }
    }

    pub fn regions(&self) -> &'static [Region] {
        match self {
            EquationSet::NewYork => new_york::REGIONS,
            EquationSet::Pennsylvania => pennsylvania::REGIONS,
        }
    }

    /// Characteristics a region's equation takes, in the order the report
    /// writes them. Empty for a region the set does not define.
    pub fn required_characteristics(&self, region: Region) -> &'static [Characteristic] {
        match self {
            EquationSet::NewYork => new_york::required_characteristics(region),
            EquationSet::Pennsylvania => pennsylvania::required_characteristics(region),
        }
    }

    /// Resolves a table column code (`A`, `ST`, `DA`, `Sto`, ...).
    pub fn characteristic_from_code(&self, code: &str) -> Option<Characteristic> {
        match self {
            EquationSet::NewYork => new_york::characteristic_from_code(code),
            EquationSet::Pennsylvania => pennsylvania::characteristic_from_code(code),
        }
    }

    pub fn characteristic_code(&self, characteristic: Characteristic) -> Option<&'static str> {
        match self {
            EquationSet::NewYork => new_york::characteristic_code(characteristic),
            EquationSet::Pennsylvania => pennsylvania::characteristic_code(characteristic),
        }
    }

    /// The table shipped with the crate, parsed and validated on first use.
    pub fn shipped_table(&self) -> Result<&'static ConstantTable, TableError> {
        static NEW_YORK: OnceLock<Result<ConstantTable, TableError>> = OnceLock::new();
        static PENNSYLVANIA: OnceLock<Result<ConstantTable, TableError>> = OnceLock::new();

        let cell = match self {
            EquationSet::NewYork => &NEW_YORK,
            EquationSet::Pennsylvania => &PENNSYLVANIA,
        };
        cell.get_or_init(|| ConstantTable::from_toml_str(*self, config::shipped_toml(*self)))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Evaluates a region chosen at runtime.
    ///
    /// The region label is checked against the set and the basin is checked
    /// for every characteristic the region needs before anything is computed.
    pub fn evaluate(
        &self,
        region: &str,
        basin: &BasinCharacteristics,
        table: Option<&ConstantTable>,
    ) -> Result<DischargeResult, FlowError> {
        let region = self.parse_region(region)?;
        match self {
            EquationSet::NewYork => new_york::evaluate(region, basin, table),
            EquationSet::Pennsylvania => pennsylvania::evaluate(region, basin, table),
        }
    }

    /// Parses a region label and checks the set defines it.
    pub fn parse_region(&self, label: &str) -> Result<Region, FlowError> {
        label
            .parse::<Region>()
            .ok()
            .filter(|r| self.regions().contains(r))
            .ok_or_else(|| FlowError::UnsupportedRegion {
                set: *self,
                region: label.to_string(),
            })
    }
}

impl fmt::Display for EquationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for EquationSet {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EquationSet::from_state(s)
    }
}

// ---------------------------------------------------------------------------
// Shared evaluation helpers
// ---------------------------------------------------------------------------

/// Picks the override table if one was given, otherwise the shipped one.
/// An override built for the other state is rejected.
pub(crate) fn resolve_table(
    set: EquationSet,
    table: Option<&ConstantTable>,
) -> Result<&ConstantTable, FlowError> {
    match table {
        Some(t) if t.equation_set() != set => Err(TableError::EquationSetMismatch {
            expected: set,
            found: t.equation_set().to_string(),
        }
        .into()),
        Some(t) => Ok(t),
        None => Ok(set.shipped_table()?),
    }
}

/// Checks a raw characteristic value and the base it becomes after the
/// region's offset/scaling, returning the base.
///
/// `value` must be finite, and within [0, 100] for percentages. `base` is
/// raised to non-integer (often negative) exponents, so it must be strictly
/// positive.
pub(crate) fn checked_base(
    characteristic: Characteristic,
    value: f64,
    base: f64,
) -> Result<f64, FlowError> {
    let reason = if !value.is_finite() {
        Some("value must be finite")
    } else if characteristic.is_percentage() && !(0.0..=100.0).contains(&value) {
        Some("percentage must be between 0 and 100")
    } else if !(base > 0.0 && base.is_finite()) {
        Some("regression base must be positive")
    } else {
        None
    };

    match reason {
        Some(reason) => {
            warn!("Rejected {} = {}: {}", characteristic, value, reason);
            Err(FlowError::InvalidInput {
                characteristic,
                value,
                reason,
            })
        }
        None => Ok(base),
    }
}

/// Pulls a required characteristic out of a runtime basin description.
pub(crate) fn require(
    basin: &BasinCharacteristics,
    set: EquationSet,
    region: Region,
    characteristic: Characteristic,
) -> Result<f64, FlowError> {
    basin
        .get(characteristic)
        .ok_or(FlowError::MissingCharacteristic {
            set,
            region,
            characteristic,
        })
}

/// Runs a region's formula over every recurrence interval of the table,
/// rounding each discharge to whole cfs.
pub(crate) fn evaluate_intervals<F>(
    table: &ConstantTable,
    region: Region,
    formula: F,
) -> Result<DischargeResult, FlowError>
where
    F: Fn(&IntervalTerms<'_>) -> Result<f64, TableError>,
{
    let region_table = table.region(region)?;
    let mut result = DischargeResult::default();
    for &interval in table.recurrence() {
        let terms = region_table.terms(interval)?;
        result.insert(interval, round_discharge(formula(&terms)?));
    }
    debug!(
        "Evaluated {} {} over {} recurrence intervals",
        table.equation_set(),
        region,
        result.len()
    );
    Ok(result)
}

/// Rounds to whole cfs, halves away from zero.
pub fn round_discharge(discharge_cfs: f64) -> f64 {
    discharge_cfs.round()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
