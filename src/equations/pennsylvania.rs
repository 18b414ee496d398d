//! Pennsylvania peak-flow regression equations, USGS SIR 2008-5102.
//!
//! Four regions, six recurrence intervals (Q2 .. Q500). Table coefficients
//! are base-10 intercepts, and percentages enter as `1 + 0.1·x`:
//!
//! ```text
//! R1  Q = 10^C · DA^a · (1+0.1·Sto)^b
//! R2  Q = 10^C · DA^a · (1+0.1·C)^b · (1+0.1·U)^c
//! R3  Q = 10^C · DA^a · El^b · (1+0.1·C)^c · (1+0.1·Sto)^d
//! R4  Q = 10^C · DA^a
//! ```

use super::{checked_base, evaluate_intervals, require, resolve_table, EquationSet};
use crate::error::FlowError;
use crate::model::{BasinCharacteristics, Characteristic, DischargeResult, Region};
use crate::table::ConstantTable;

use Characteristic::{Carbonate, DrainageArea, MeanElevation, Storage, Urban};

const SET: EquationSet = EquationSet::Pennsylvania;

pub const REGIONS: &[Region] = &[Region::R1, Region::R2, Region::R3, Region::R4];

const REGION_1: &[Characteristic] = &[DrainageArea, Storage];
const REGION_2: &[Characteristic] = &[DrainageArea, Carbonate, Urban];
const REGION_3: &[Characteristic] = &[DrainageArea, MeanElevation, Carbonate, Storage];
const REGION_4: &[Characteristic] = &[DrainageArea];

pub fn required_characteristics(region: Region) -> &'static [Characteristic] {
    match region {
        Region::R1 => REGION_1,
        Region::R2 => REGION_2,
        Region::R3 => REGION_3,
        Region::R4 => REGION_4,
        Region::R5 | Region::R6 => &[],
    }
}

pub fn characteristic_from_code(code: &str) -> Option<Characteristic> {
    match code {
        "DA" => Some(DrainageArea),
        "Sto" => Some(Storage),
        "El" => Some(MeanElevation),
        "C" => Some(Carbonate),
        "U" => Some(Urban),
        _ => None,
    }
}

pub fn characteristic_code(characteristic: Characteristic) -> Option<&'static str> {
    match characteristic {
        DrainageArea => Some("DA"),
        Storage => Some("Sto"),
        MeanElevation => Some("El"),
        Carbonate => Some("C"),
        Urban => Some("U"),
        _ => None,
    }
}

/// Percentages enter every PA equation scaled to tenths plus one.
fn percent_base(percent: f64) -> f64 {
    1.0 + 0.1 * percent
}

// ---------------------------------------------------------------------------
// Region inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region1Basin {
    pub drainage_area_sq_mi: f64,
    pub storage_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region2Basin {
    pub drainage_area_sq_mi: f64,
    pub carbonate_pct: f64,
    pub urban_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region3Basin {
    pub drainage_area_sq_mi: f64,
    pub mean_elevation_ft: f64,
    pub carbonate_pct: f64,
    pub storage_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region4Basin {
    pub drainage_area_sq_mi: f64,
}

impl Region1Basin {
    pub fn from_characteristics(basin: &BasinCharacteristics) -> Result<Self, FlowError> {
        let get = |c| require(basin, SET, Region::R1, c);
        Ok(Self {
            drainage_area_sq_mi: get(DrainageArea)?,
            storage_pct: get(Storage)?,
        })
    }
}

impl Region2Basin {
    pub fn from_characteristics(basin: &BasinCharacteristics) -> Result<Self, FlowError> {
        let get = |c| require(basin, SET, Region::R2, c);
        Ok(Self {
            drainage_area_sq_mi: get(DrainageArea)?,
            carbonate_pct: get(Carbonate)?,
            urban_pct: get(Urban)?,
        })
    }
}

impl Region3Basin {
    pub fn from_characteristics(basin: &BasinCharacteristics) -> Result<Self, FlowError> {
        let get = |c| require(basin, SET, Region::R3, c);
        Ok(Self {
            drainage_area_sq_mi: get(DrainageArea)?,
            mean_elevation_ft: get(MeanElevation)?,
            carbonate_pct: get(Carbonate)?,
            storage_pct: get(Storage)?,
        })
    }
}

impl Region4Basin {
    pub fn from_characteristics(basin: &BasinCharacteristics) -> Result<Self, FlowError> {
        Ok(Self {
            drainage_area_sq_mi: require(basin, SET, Region::R4, DrainageArea)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Region equations
// ---------------------------------------------------------------------------

pub(crate) fn evaluate(
    region: Region,
    basin: &BasinCharacteristics,
    table: Option<&ConstantTable>,
) -> Result<DischargeResult, FlowError> {
    match region {
        Region::R1 => region_1(&Region1Basin::from_characteristics(basin)?, table),
        Region::R2 => region_2(&Region2Basin::from_characteristics(basin)?, table),
        Region::R3 => region_3(&Region3Basin::from_characteristics(basin)?, table),
        Region::R4 => region_4(&Region4Basin::from_characteristics(basin)?, table),
        Region::R5 | Region::R6 => Err(FlowError::UnsupportedRegion {
            set: SET,
            region: region.to_string(),
        }),
    }
}

/// Region 1: `10^C · DA^a · (1+0.1·Sto)^b`
pub fn region_1(basin: &Region1Basin, table: Option<&ConstantTable>) -> Result<DischargeResult, FlowError> {
    let da = checked_base(DrainageArea, basin.drainage_area_sq_mi, basin.drainage_area_sq_mi)?;
    let sto = checked_base(Storage, basin.storage_pct, percent_base(basin.storage_pct))?;

    let table = resolve_table(SET, table)?;
    evaluate_intervals(table, Region::R1, |t| {
        Ok(10f64.powf(t.coefficient())
            * da.powf(t.exponent(DrainageArea)?)
            * sto.powf(t.exponent(Storage)?))
    })
}

/// Region 2: `10^C · DA^a · (1+0.1·C)^b · (1+0.1·U)^c`
///
/// Urban area is raised to its own exponent column.
pub fn region_2(basin: &Region2Basin, table: Option<&ConstantTable>) -> Result<DischargeResult, FlowError> {
    let da = checked_base(DrainageArea, basin.drainage_area_sq_mi, basin.drainage_area_sq_mi)?;
    let carbonate = checked_base(Carbonate, basin.carbonate_pct, percent_base(basin.carbonate_pct))?;
    let urban = checked_base(Urban, basin.urban_pct, percent_base(basin.urban_pct))?;

    let table = resolve_table(SET, table)?;
    evaluate_intervals(table, Region::R2, |t| {
        Ok(10f64.powf(t.coefficient())
            * da.powf(t.exponent(DrainageArea)?)
            * carbonate.powf(t.exponent(Carbonate)?)
            * urban.powf(t.exponent(Urban)?))
    })
}

/// Region 3: `10^C · DA^a · El^b · (1+0.1·C)^c · (1+0.1·Sto)^d`
pub fn region_3(basin: &Region3Basin, table: Option<&ConstantTable>) -> Result<DischargeResult, FlowError> {
    let da = checked_base(DrainageArea, basin.drainage_area_sq_mi, basin.drainage_area_sq_mi)?;
    let el = checked_base(MeanElevation, basin.mean_elevation_ft, basin.mean_elevation_ft)?;
    let carbonate = checked_base(Carbonate, basin.carbonate_pct, percent_base(basin.carbonate_pct))?;
    let sto = checked_base(Storage, basin.storage_pct, percent_base(basin.storage_pct))?;

    let table = resolve_table(SET, table)?;
    evaluate_intervals(table, Region::R3, |t| {
        Ok(10f64.powf(t.coefficient())
            * da.powf(t.exponent(DrainageArea)?)
            * el.powf(t.exponent(MeanElevation)?)
            * carbonate.powf(t.exponent(Carbonate)?)
            * sto.powf(t.exponent(Storage)?))
    })
}

/// Region 4: `10^C · DA^a`
pub fn region_4(basin: &Region4Basin, table: Option<&ConstantTable>) -> Result<DischargeResult, FlowError> {
    let da = checked_base(DrainageArea, basin.drainage_area_sq_mi, basin.drainage_area_sq_mi)?;

    let table = resolve_table(SET, table)?;
    evaluate_intervals(table, Region::R4, |t| {
        Ok(10f64.powf(t.coefficient()) * da.powf(t.exponent(DrainageArea)?))
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
