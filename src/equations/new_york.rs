//! New York peak-flow regression equations, USGS SIR 2006-5112.
//!
//! Six hydrologic regions, ten recurrence intervals (Q1_25 .. Q500). The
//! coefficient multiplies the product of powers directly:
//!
//! ```text
//! R1  Q = C · A^a · (ST+1)^b · P^c · (LAG+1)^d · (FOR+80)^e
//! R2  Q = C · A^a · (ST+5)^b · (LAG+1)^c · RUNF^d
//! R3  Q = C · A^a · (LAG+1)^b · RUNF^c · MXSNO^d
//! R4  Q = C · A^a · (ST+0.5)^b · RUNF^c · SR^d
//! R5  Q = C · A^a · SL^b · P^c
//! R6  Q = C · A^a · (ST+0.5)^b · RUNF^c · (EL12+1)^d · SR^e
//! ```
//!
//! The offsets are part of each region's fitted model and differ between
//! regions; keep them inside the region functions.

use super::{checked_base, evaluate_intervals, require, resolve_table, EquationSet};
use crate::error::FlowError;
use crate::model::{BasinCharacteristics, Characteristic, DischargeResult, Region};
use crate::table::ConstantTable;

use Characteristic::{
    AreaAbove1200Ft, ChannelSlope, DrainageArea, Forest, LagFactor, MaxSnowDepth, Precipitation,
    Runoff, SlopeRatio, Storage,
};

const SET: EquationSet = EquationSet::NewYork;

pub const REGIONS: &[Region] = &[
    Region::R1,
    Region::R2,
    Region::R3,
    Region::R4,
    Region::R5,
    Region::R6,
];

// ---------------------------------------------------------------------------
// Characteristic codes
// ---------------------------------------------------------------------------

const REGION_1: &[Characteristic] = &[DrainageArea, Storage, Precipitation, LagFactor, Forest];
const REGION_2: &[Characteristic] = &[DrainageArea, Storage, LagFactor, Runoff];
const REGION_3: &[Characteristic] = &[DrainageArea, LagFactor, Runoff, MaxSnowDepth];
const REGION_4: &[Characteristic] = &[DrainageArea, Storage, Runoff, SlopeRatio];
const REGION_5: &[Characteristic] = &[DrainageArea, ChannelSlope, Precipitation];
const REGION_6: &[Characteristic] = &[DrainageArea, Storage, Runoff, AreaAbove1200Ft, SlopeRatio];

pub fn required_characteristics(region: Region) -> &'static [Characteristic] {
    match region {
        Region::R1 => REGION_1,
        Region::R2 => REGION_2,
        Region::R3 => REGION_3,
        Region::R4 => REGION_4,
        Region::R5 => REGION_5,
        Region::R6 => REGION_6,
    }
}

pub fn characteristic_from_code(code: &str) -> Option<Characteristic> {
    match code {
        "A" => Some(DrainageArea),
        "ST" => Some(Storage),
        "P" => Some(Precipitation),
        "LAG" => Some(LagFactor),
        "FOR" => Some(Forest),
        "RUNF" => Some(Runoff),
        "MXSNO" => Some(MaxSnowDepth),
        "SR" => Some(SlopeRatio),
        "SL" => Some(ChannelSlope),
        "EL12" => Some(AreaAbove1200Ft),
        _ => None,
    }
}

pub fn characteristic_code(characteristic: Characteristic) -> Option<&'static str> {
    match characteristic {
        DrainageArea => Some("A"),
        Storage => Some("ST"),
        Precipitation => Some("P"),
        LagFactor => Some("LAG"),
        Forest => Some("FOR"),
        Runoff => Some("RUNF"),
        MaxSnowDepth => Some("MXSNO"),
        SlopeRatio => Some("SR"),
        ChannelSlope => Some("SL"),
        AreaAbove1200Ft => Some("EL12"),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Region inputs
// ---------------------------------------------------------------------------

/// Region 1 inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region1Basin {
    pub drainage_area_sq_mi: f64,
    pub storage_pct: f64,
    pub precipitation_in: f64,
    pub lag_factor: f64,
    pub forest_pct: f64,
}

/// Region 2 inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region2Basin {
    pub drainage_area_sq_mi: f64,
    pub storage_pct: f64,
    pub lag_factor: f64,
    pub runoff_in: f64,
}

/// Region 3 inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region3Basin {
    pub drainage_area_sq_mi: f64,
    pub lag_factor: f64,
    pub runoff_in: f64,
    pub max_snow_depth_in: f64,
}

/// Region 4 inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region4Basin {
    pub drainage_area_sq_mi: f64,
    pub storage_pct: f64,
    pub runoff_in: f64,
    pub slope_ratio: f64,
}

/// Region 5 inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region5Basin {
    pub drainage_area_sq_mi: f64,
    pub channel_slope_ft_per_mi: f64,
    pub precipitation_in: f64,
}

/// Region 6 inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region6Basin {
    pub drainage_area_sq_mi: f64,
    pub storage_pct: f64,
    pub runoff_in: f64,
    pub above_1200_ft_pct: f64,
    pub slope_ratio: f64,
}

impl Region1Basin {
    pub fn from_characteristics(basin: &BasinCharacteristics) -> Result<Self, FlowError> {
        let get = |c| require(basin, SET, Region::R1, c);
        Ok(Self {
            drainage_area_sq_mi: get(DrainageArea)?,
            storage_pct: get(Storage)?,
            precipitation_in: get(Precipitation)?,
            lag_factor: get(LagFactor)?,
            forest_pct: get(Forest)?,
        })
    }
}

impl Region2Basin {
    pub fn from_characteristics(basin: &BasinCharacteristics) -> Result<Self, FlowError> {
        let get = |c| require(basin, SET, Region::R2, c);
        Ok(Self {
            drainage_area_sq_mi: get(DrainageArea)?,
            storage_pct: get(Storage)?,
            lag_factor: get(LagFactor)?,
            runoff_in: get(Runoff)?,
        })
    }
}

impl Region3Basin {
    pub fn from_characteristics(basin: &BasinCharacteristics) -> Result<Self, FlowError> {
        let get = |c| require(basin, SET, Region::R3, c);
        Ok(Self {
            drainage_area_sq_mi: get(DrainageArea)?,
            lag_factor: get(LagFactor)?,
            runoff_in: get(Runoff)?,
            max_snow_depth_in: get(MaxSnowDepth)?,
        })
    }
}

impl Region4Basin {
    pub fn from_characteristics(basin: &BasinCharacteristics) -> Result<Self, FlowError> {
        let get = |c| require(basin, SET, Region::R4, c);
        Ok(Self {
            drainage_area_sq_mi: get(DrainageArea)?,
            storage_pct: get(Storage)?,
            runoff_in: get(Runoff)?,
            slope_ratio: get(SlopeRatio)?,
        })
    }
}

impl Region5Basin {
    pub fn from_characteristics(basin: &BasinCharacteristics) -> Result<Self, FlowError> {
        let get = |c| require(basin, SET, Region::R5, c);
        Ok(Self {
            drainage_area_sq_mi: get(DrainageArea)?,
            channel_slope_ft_per_mi: get(ChannelSlope)?,
            precipitation_in: get(Precipitation)?,
        })
    }
}

impl Region6Basin {
    pub fn from_characteristics(basin: &BasinCharacteristics) -> Result<Self, FlowError> {
        let get = |c| require(basin, SET, Region::R6, c);
        Ok(Self {
            drainage_area_sq_mi: get(DrainageArea)?,
            storage_pct: get(Storage)?,
            runoff_in: get(Runoff)?,
            above_1200_ft_pct: get(AreaAbove1200Ft)?,
            slope_ratio: get(SlopeRatio)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Region equations
// ---------------------------------------------------------------------------

/// Dispatches a runtime region choice to its equation.
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
        Region::R5 => region_5(&Region5Basin::from_characteristics(basin)?, table),
        Region::R6 => region_6(&Region6Basin::from_characteristics(basin)?, table),
    }
}

/// Region 1: `C · A^a · (ST+1)^b · P^c · (LAG+1)^d · (FOR+80)^e`
pub fn region_1(basin: &Region1Basin, table: Option<&ConstantTable>) -> Result<DischargeResult, FlowError> {
    let a = checked_base(DrainageArea, basin.drainage_area_sq_mi, basin.drainage_area_sq_mi)?;
    let st = checked_base(Storage, basin.storage_pct, basin.storage_pct + 1.0)?;
    let p = checked_base(Precipitation, basin.precipitation_in, basin.precipitation_in)?;
    let lag = checked_base(LagFactor, basin.lag_factor, basin.lag_factor + 1.0)?;
    let forest = checked_base(Forest, basin.forest_pct, basin.forest_pct + 80.0)?;

    let table = resolve_table(SET, table)?;
    evaluate_intervals(table, Region::R1, |t| {
        Ok(t.coefficient()
            * a.powf(t.exponent(DrainageArea)?)
            * st.powf(t.exponent(Storage)?)
            * p.powf(t.exponent(Precipitation)?)
            * lag.powf(t.exponent(LagFactor)?)
            * forest.powf(t.exponent(Forest)?))
    })
}

/// Region 2: `C · A^a · (ST+5)^b · (LAG+1)^c · RUNF^d`
pub fn region_2(basin: &Region2Basin, table: Option<&ConstantTable>) -> Result<DischargeResult, FlowError> {
    let a = checked_base(DrainageArea, basin.drainage_area_sq_mi, basin.drainage_area_sq_mi)?;
    let st = checked_base(Storage, basin.storage_pct, basin.storage_pct + 5.0)?;
    let lag = checked_base(LagFactor, basin.lag_factor, basin.lag_factor + 1.0)?;
    let runoff = checked_base(Runoff, basin.runoff_in, basin.runoff_in)?;

    let table = resolve_table(SET, table)?;
    evaluate_intervals(table, Region::R2, |t| {
        Ok(t.coefficient()
            * a.powf(t.exponent(DrainageArea)?)
            * st.powf(t.exponent(Storage)?)
            * lag.powf(t.exponent(LagFactor)?)
            * runoff.powf(t.exponent(Runoff)?))
    })
}

/// Region 3: `C · A^a · (LAG+1)^b · RUNF^c · MXSNO^d`
pub fn region_3(basin: &Region3Basin, table: Option<&ConstantTable>) -> Result<DischargeResult, FlowError> {
    let a = checked_base(DrainageArea, basin.drainage_area_sq_mi, basin.drainage_area_sq_mi)?;
    let lag = checked_base(LagFactor, basin.lag_factor, basin.lag_factor + 1.0)?;
    let runoff = checked_base(Runoff, basin.runoff_in, basin.runoff_in)?;
    let snow = checked_base(MaxSnowDepth, basin.max_snow_depth_in, basin.max_snow_depth_in)?;

    let table = resolve_table(SET, table)?;
    evaluate_intervals(table, Region::R3, |t| {
        Ok(t.coefficient()
            * a.powf(t.exponent(DrainageArea)?)
            * lag.powf(t.exponent(LagFactor)?)
            * runoff.powf(t.exponent(Runoff)?)
            * snow.powf(t.exponent(MaxSnowDepth)?))
    })
}

/// Region 4: `C · A^a · (ST+0.5)^b · RUNF^c · SR^d`
pub fn region_4(basin: &Region4Basin, table: Option<&ConstantTable>) -> Result<DischargeResult, FlowError> {
    let a = checked_base(DrainageArea, basin.drainage_area_sq_mi, basin.drainage_area_sq_mi)?;
    let st = checked_base(Storage, basin.storage_pct, basin.storage_pct + 0.5)?;
    let runoff = checked_base(Runoff, basin.runoff_in, basin.runoff_in)?;
    let sr = checked_base(SlopeRatio, basin.slope_ratio, basin.slope_ratio)?;

    let table = resolve_table(SET, table)?;
    evaluate_intervals(table, Region::R4, |t| {
        Ok(t.coefficient()
            * a.powf(t.exponent(DrainageArea)?)
            * st.powf(t.exponent(Storage)?)
            * runoff.powf(t.exponent(Runoff)?)
            * sr.powf(t.exponent(SlopeRatio)?))
    })
}

/// Region 5: `C · A^a · SL^b · P^c`
pub fn region_5(basin: &Region5Basin, table: Option<&ConstantTable>) -> Result<DischargeResult, FlowError> {
    let a = checked_base(DrainageArea, basin.drainage_area_sq_mi, basin.drainage_area_sq_mi)?;
    let sl = checked_base(ChannelSlope, basin.channel_slope_ft_per_mi, basin.channel_slope_ft_per_mi)?;
    let p = checked_base(Precipitation, basin.precipitation_in, basin.precipitation_in)?;

    let table = resolve_table(SET, table)?;
    evaluate_intervals(table, Region::R5, |t| {
        Ok(t.coefficient()
            * a.powf(t.exponent(DrainageArea)?)
            * sl.powf(t.exponent(ChannelSlope)?)
            * p.powf(t.exponent(Precipitation)?))
    })
}

/// Region 6: `C · A^a · (ST+0.5)^b · RUNF^c · (EL12+1)^d · SR^e`
pub fn region_6(basin: &Region6Basin, table: Option<&ConstantTable>) -> Result<DischargeResult, FlowError> {
    let a = checked_base(DrainageArea, basin.drainage_area_sq_mi, basin.drainage_area_sq_mi)?;
    let st = checked_base(Storage, basin.storage_pct, basin.storage_pct + 0.5)?;
    let runoff = checked_base(Runoff, basin.runoff_in, basin.runoff_in)?;
    let el12 = checked_base(AreaAbove1200Ft, basin.above_1200_ft_pct, basin.above_1200_ft_pct + 1.0)?;
    let sr = checked_base(SlopeRatio, basin.slope_ratio, basin.slope_ratio)?;

    let table = resolve_table(SET, table)?;
    evaluate_intervals(table, Region::R6, |t| {
        Ok(t.coefficient()
            * a.powf(t.exponent(DrainageArea)?)
            * st.powf(t.exponent(Storage)?)
            * runoff.powf(t.exponent(Runoff)?)
            * el12.powf(t.exponent(AreaAbove1200Ft)?)
            * sr.powf(t.exponent(SlopeRatio)?))
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecurrenceInterval;

    fn values(result: &DischargeResult) -> Vec<f64> {
        result.iter().map(|(_, q)| q).collect()
    }

    fn sample_region_1() -> Region1Basin {
        Region1Basin {
            drainage_area_sq_mi: 10.0,
            storage_pct: 5.0,
            precipitation_in: 40.0,
            lag_factor: 2.0,
            forest_pct: 30.0,
        }
    }

    #[test]
    fn test_region_1_q2_matches_published_formula() {
        let expected = (299.0
            * 10f64.powf(0.972)
            * 6f64.powf(-0.169)
            * 40f64.powf(1.576)
            * 3f64.powf(-0.411)
            * 110f64.powf(-1.518))
        .round();

        let result = region_1(&sample_region_1(), None).unwrap();
        assert_eq!(result.get(RecurrenceInterval::Q2), Some(expected));
        assert_eq!(expected, 352.0);
    }

    #[test]
    fn test_region_1_covers_all_ten_intervals() {
        let result = region_1(&sample_region_1(), None).unwrap();
        assert_eq!(result.intervals(), RecurrenceInterval::ALL.to_vec());
        assert_eq!(
            values(&result),
            vec![254.0, 297.0, 352.0, 500.0, 609.0, 755.0, 867.0, 995.0, 1112.0, 1293.0]
        );
    }

    #[test]
    fn test_region_2_reference_values() {
        let basin = Region2Basin {
            drainage_area_sq_mi: 10.0,
            storage_pct: 2.0,
            lag_factor: 2.0,
            runoff_in: 20.0,
        };
        let result = region_2(&basin, None).unwrap();
        assert_eq!(
            values(&result),
            vec![190.0, 231.0, 289.0, 462.0, 600.0, 798.0, 964.0, 1204.0, 1347.0, 1645.0]
        );
    }

    #[test]
    fn test_region_3_reference_values() {
        let basin = Region3Basin {
            drainage_area_sq_mi: 10.0,
            lag_factor: 2.0,
            runoff_in: 20.0,
            max_snow_depth_in: 10.0,
        };
        let result = region_3(&basin, None).unwrap();
        assert_eq!(
            values(&result),
            vec![130.0, 157.0, 181.0, 265.0, 329.0, 406.0, 464.0, 515.0, 565.0, 626.0]
        );
    }

    #[test]
    fn test_region_4_reference_values() {
        let basin = Region4Basin {
            drainage_area_sq_mi: 10.0,
            storage_pct: 2.0,
            runoff_in: 20.0,
            slope_ratio: 0.5,
        };
        let result = region_4(&basin, None).unwrap();
        assert_eq!(
            values(&result),
            vec![291.0, 357.0, 440.0, 660.0, 813.0, 1011.0, 1166.0, 1326.0, 1487.0, 1707.0]
        );
    }

    #[test]
    fn test_region_5_reference_values() {
        let basin = Region5Basin {
            drainage_area_sq_mi: 10.0,
            channel_slope_ft_per_mi: 20.0,
            precipitation_in: 40.0,
        };
        let result = region_5(&basin, None).unwrap();
        assert_eq!(
            values(&result),
            vec![232.0, 279.0, 343.0, 519.0, 645.0, 811.0, 948.0, 1081.0, 1218.0, 1412.0]
        );
    }

    #[test]
    fn test_region_6_reference_values() {
        let basin = Region6Basin {
            drainage_area_sq_mi: 10.0,
            storage_pct: 2.0,
            runoff_in: 20.0,
            above_1200_ft_pct: 30.0,
            slope_ratio: 0.5,
        };
        let result = region_6(&basin, None).unwrap();
        assert_eq!(
            values(&result),
            vec![314.0, 394.0, 497.0, 779.0, 979.0, 1251.0, 1461.0, 1676.0, 1904.0, 2213.0]
        );
    }

    #[test]
    fn test_zero_storage_is_valid_where_offset_applies() {
        // ST+1, ST+5 and ST+0.5 all keep the base positive at 0%
        let mut r1 = sample_region_1();
        r1.storage_pct = 0.0;
        assert!(region_1(&r1, None).is_ok());

        let r2 = Region2Basin {
            drainage_area_sq_mi: 10.0,
            storage_pct: 0.0,
            lag_factor: 0.0,
            runoff_in: 20.0,
        };
        assert!(region_2(&r2, None).is_ok());

        let r4 = Region4Basin {
            drainage_area_sq_mi: 10.0,
            storage_pct: 0.0,
            runoff_in: 20.0,
            slope_ratio: 0.5,
        };
        assert!(region_4(&r4, None).is_ok());
    }

    #[test]
    fn test_zero_without_offset_is_rejected() {
        let r3 = Region3Basin {
            drainage_area_sq_mi: 10.0,
            lag_factor: 2.0,
            runoff_in: 20.0,
            max_snow_depth_in: 0.0,
        };
        assert!(matches!(
            region_3(&r3, None),
            Err(FlowError::InvalidInput { characteristic: MaxSnowDepth, .. })
        ));

        let r5 = Region5Basin {
            drainage_area_sq_mi: 0.0,
            channel_slope_ft_per_mi: 20.0,
            precipitation_in: 40.0,
        };
        assert!(matches!(
            region_5(&r5, None),
            Err(FlowError::InvalidInput { characteristic: DrainageArea, .. })
        ));
    }

    #[test]
    fn test_negative_inputs_are_rejected() {
        let mut r1 = sample_region_1();
        r1.precipitation_in = -40.0;
        assert!(matches!(
            region_1(&r1, None),
            Err(FlowError::InvalidInput { characteristic: Precipitation, .. })
        ));

        let mut r1 = sample_region_1();
        r1.lag_factor = -1.0;
        assert!(matches!(
            region_1(&r1, None),
            Err(FlowError::InvalidInput { characteristic: LagFactor, .. })
        ));
    }

    #[test]
    fn test_from_characteristics_reports_missing_input() {
        let basin = BasinCharacteristics::new()
            .with(DrainageArea, 10.0)
            .with(Storage, 2.0)
            .with(Runoff, 20.0);
        assert_eq!(
            Region6Basin::from_characteristics(&basin),
            Err(FlowError::MissingCharacteristic {
                set: EquationSet::NewYork,
                region: Region::R6,
                characteristic: AreaAbove1200Ft,
            })
        );
    }

    #[test]
    fn test_runtime_dispatch_matches_direct_call() {
        let basin = BasinCharacteristics::new()
            .with(DrainageArea, 10.0)
            .with(Storage, 5.0)
            .with(Precipitation, 40.0)
            .with(LagFactor, 2.0)
            .with(Forest, 30.0);
        let dispatched = evaluate(Region::R1, &basin, None).unwrap();
        let direct = region_1(&sample_region_1(), None).unwrap();
        assert_eq!(dispatched, direct);
    }

    #[test]
    fn test_shipped_table_characteristics_match_equations() {
        let table = SET.shipped_table().unwrap();
        for region_table in table.regions() {
            let required: std::collections::BTreeSet<_> =
                required_characteristics(region_table.region()).iter().copied().collect();
            for interval in table.recurrence() {
                assert_eq!(
                    region_table.characteristics(*interval),
                    required,
                    "{} {} characteristic set",
                    region_table.region(),
                    interval
                );
            }
        }
    }
}
