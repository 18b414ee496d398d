//! Shared data types for regression peak-flow estimation.
//!
//! Recurrence intervals, region identifiers, basin characteristics and the
//! discharge mapping every region evaluator returns. The regression
//! constants themselves live in `table`; the formulas live in `equations`.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Recurrence intervals
// ---------------------------------------------------------------------------

/// Flood recurrence interval, labelled the way the regression reports label
/// their discharge columns (`Q2` is the 2-year flood, `Q1_25` the 1.25-year).
///
/// Variants are declared from most to least frequent, so the derived `Ord`
/// sorts by return period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum RecurrenceInterval {
    Q1_25,
    Q1_5,
    Q2,
    Q5,
    Q10,
    Q25,
    Q50,
    Q100,
    Q200,
    Q500,
}

impl RecurrenceInterval {
    /// Every interval known to either equation set, in ascending return period.
    pub const ALL: [RecurrenceInterval; 10] = [
        RecurrenceInterval::Q1_25,
        RecurrenceInterval::Q1_5,
        RecurrenceInterval::Q2,
        RecurrenceInterval::Q5,
        RecurrenceInterval::Q10,
        RecurrenceInterval::Q25,
        RecurrenceInterval::Q50,
        RecurrenceInterval::Q100,
        RecurrenceInterval::Q200,
        RecurrenceInterval::Q500,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RecurrenceInterval::Q1_25 => "Q1_25",
            RecurrenceInterval::Q1_5 => "Q1_5",
            RecurrenceInterval::Q2 => "Q2",
            RecurrenceInterval::Q5 => "Q5",
            RecurrenceInterval::Q10 => "Q10",
            RecurrenceInterval::Q25 => "Q25",
            RecurrenceInterval::Q50 => "Q50",
            RecurrenceInterval::Q100 => "Q100",
            RecurrenceInterval::Q200 => "Q200",
            RecurrenceInterval::Q500 => "Q500",
        }
    }

    /// Average number of years between floods of this magnitude or greater.
    pub fn years(&self) -> f64 {
        match self {
            RecurrenceInterval::Q1_25 => 1.25,
            RecurrenceInterval::Q1_5 => 1.5,
            RecurrenceInterval::Q2 => 2.0,
            RecurrenceInterval::Q5 => 5.0,
            RecurrenceInterval::Q10 => 10.0,
            RecurrenceInterval::Q25 => 25.0,
            RecurrenceInterval::Q50 => 50.0,
            RecurrenceInterval::Q100 => 100.0,
            RecurrenceInterval::Q200 => 200.0,
            RecurrenceInterval::Q500 => 500.0,
        }
    }

    /// Chance the flood is equalled or exceeded in any one year
    /// (0.01 for the 100-year flood).
    pub fn annual_exceedance_probability(&self) -> f64 {
        1.0 / self.years()
    }
}

impl fmt::Display for RecurrenceInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RecurrenceInterval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecurrenceInterval::ALL
            .iter()
            .copied()
            .find(|r| r.label() == s.trim())
            .ok_or_else(|| format!("unknown recurrence interval '{}'", s))
    }
}

// ---------------------------------------------------------------------------
// Regions
// ---------------------------------------------------------------------------

/// Hydrologic region identifier. New York uses R1..R6, Pennsylvania R1..R4;
/// which identifiers are valid is decided by the equation set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::R1,
        Region::R2,
        Region::R3,
        Region::R4,
        Region::R5,
        Region::R6,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Region::R1 => "R1",
            Region::R2 => "R2",
            Region::R3 => "R3",
            Region::R4 => "R4",
            Region::R5 => "R5",
            Region::R6 => "R6",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Region {
    type Err = String;

    /// Accepts `R3`, `r3` or a bare `3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('R')
            .or_else(|| trimmed.strip_prefix('r'))
            .unwrap_or(trimmed);
        Region::ALL
            .iter()
            .copied()
            .find(|r| &r.label()[1..] == digits)
            .ok_or_else(|| format!("unknown region '{}'", s))
    }
}

// ---------------------------------------------------------------------------
// Basin characteristics
// ---------------------------------------------------------------------------

/// A measured watershed property used as a regression variable.
///
/// The short codes printed in the reports differ between states (`A` vs `DA`
/// for drainage area, `ST` vs `Sto` for storage); each equation set maps its
/// own codes onto these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Characteristic {
    DrainageArea,
    Storage,
    Precipitation,
    LagFactor,
    Forest,
    Runoff,
    MaxSnowDepth,
    SlopeRatio,
    ChannelSlope,
    AreaAbove1200Ft,
    MeanElevation,
    Carbonate,
    Urban,
}

impl Characteristic {
    pub fn description(&self) -> &'static str {
        match self {
            Characteristic::DrainageArea => "drainage area",
            Characteristic::Storage => "basin storage (lakes, ponds, wetlands)",
            Characteristic::Precipitation => "mean annual precipitation",
            Characteristic::LagFactor => "basin lag factor",
            Characteristic::Forest => "forested area",
            Characteristic::Runoff => "mean annual runoff",
            Characteristic::MaxSnowDepth => "seasonal maximum snow depth, 50th percentile",
            Characteristic::SlopeRatio => "slope ratio",
            Characteristic::ChannelSlope => "main channel slope",
            Characteristic::AreaAbove1200Ft => "basin area above 1,200 feet",
            Characteristic::MeanElevation => "mean basin elevation",
            Characteristic::Carbonate => "basin underlain by carbonate bedrock",
            Characteristic::Urban => "urban area",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Characteristic::DrainageArea => "mi2",
            Characteristic::Precipitation
            | Characteristic::Runoff
            | Characteristic::MaxSnowDepth => "in",
            Characteristic::ChannelSlope => "ft/mi",
            Characteristic::MeanElevation => "ft",
            Characteristic::LagFactor | Characteristic::SlopeRatio => "dimensionless",
            Characteristic::Storage
            | Characteristic::Forest
            | Characteristic::AreaAbove1200Ft
            | Characteristic::Carbonate
            | Characteristic::Urban => "percent",
        }
    }

    /// Percent-of-basin characteristics must lie in [0, 100].
    pub fn is_percentage(&self) -> bool {
        self.unit() == "percent"
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Named measurements for one watershed, used by the equation-set selector
/// when the region is chosen at runtime. Region evaluators called directly
/// take their own typed input structs instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasinCharacteristics {
    values: BTreeMap<Characteristic, f64>,
}

impl BasinCharacteristics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, characteristic: Characteristic, value: f64) -> Self {
        self.values.insert(characteristic, value);
        self
    }

    pub fn set(&mut self, characteristic: Characteristic, value: f64) {
        self.values.insert(characteristic, value);
    }

    pub fn get(&self, characteristic: Characteristic) -> Option<f64> {
        self.values.get(&characteristic).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(Characteristic, f64)> for BasinCharacteristics {
    fn from_iter<I: IntoIterator<Item = (Characteristic, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Estimated peak discharge (cubic feet per second, rounded to whole cfs)
/// for each recurrence interval of an equation set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DischargeResult {
    discharges: BTreeMap<RecurrenceInterval, f64>,
}

impl DischargeResult {
    pub(crate) fn insert(&mut self, interval: RecurrenceInterval, discharge_cfs: f64) {
        self.discharges.insert(interval, discharge_cfs);
    }

    /// Discharge for one interval, `None` if the equation set does not
    /// publish that interval (e.g. Q25 in Pennsylvania).
    pub fn get(&self, interval: RecurrenceInterval) -> Option<f64> {
        self.discharges.get(&interval).copied()
    }

    /// Looks up by report label (`"Q100"`).
    pub fn get_label(&self, label: &str) -> Option<f64> {
        label.parse().ok().and_then(|interval| self.get(interval))
    }

    /// (interval, discharge) pairs in ascending return period.
    pub fn iter(&self) -> impl Iterator<Item = (RecurrenceInterval, f64)> + '_ {
        self.discharges.iter().map(|(r, q)| (*r, *q))
    }

    pub fn intervals(&self) -> Vec<RecurrenceInterval> {
        self.discharges.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.discharges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.discharges.is_empty()
    }
}

/// Serializes as `{"Q2": 352.0, "Q5": 500.0, ...}`.
impl Serialize for DischargeResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.discharges.len()))?;
        for (interval, discharge) in &self.discharges {
            map.serialize_entry(interval.label(), discharge)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_labels_round_trip_through_from_str() {
        for interval in RecurrenceInterval::ALL {
            assert_eq!(interval.label().parse::<RecurrenceInterval>(), Ok(interval));
        }
        assert!("Q3".parse::<RecurrenceInterval>().is_err());
    }

    #[test]
    fn test_interval_order_follows_return_period() {
        for pair in RecurrenceInterval::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].years() < pair[1].years());
        }
    }

    #[test]
    fn test_hundred_year_flood_has_one_percent_exceedance() {
        assert_eq!(RecurrenceInterval::Q100.annual_exceedance_probability(), 0.01);
        assert_eq!(RecurrenceInterval::Q2.annual_exceedance_probability(), 0.5);
    }

    #[test]
    fn test_region_parses_with_and_without_prefix() {
        assert_eq!("R3".parse::<Region>(), Ok(Region::R3));
        assert_eq!("r6".parse::<Region>(), Ok(Region::R6));
        assert_eq!(" 2 ".parse::<Region>(), Ok(Region::R2));
        assert!("R7".parse::<Region>().is_err());
        assert!("".parse::<Region>().is_err());
    }

    #[test]
    fn test_percentage_characteristics() {
        assert!(Characteristic::Storage.is_percentage());
        assert!(Characteristic::Urban.is_percentage());
        assert!(!Characteristic::DrainageArea.is_percentage());
        assert!(!Characteristic::LagFactor.is_percentage());
    }

    #[test]
    fn test_basin_characteristics_builder() {
        let basin = BasinCharacteristics::new()
            .with(Characteristic::DrainageArea, 12.5)
            .with(Characteristic::Storage, 3.0);
        assert_eq!(basin.len(), 2);
        assert_eq!(basin.get(Characteristic::DrainageArea), Some(12.5));
        assert_eq!(basin.get(Characteristic::Runoff), None);
    }

    #[test]
    fn test_discharge_result_serializes_as_label_map() {
        let mut result = DischargeResult::default();
        result.insert(RecurrenceInterval::Q100, 995.0);
        result.insert(RecurrenceInterval::Q1_25, 254.0);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({ "Q1_25": 254.0, "Q100": 995.0 }));
        assert_eq!(result.get_label("Q100"), Some(995.0));
        assert_eq!(result.intervals(), vec![RecurrenceInterval::Q1_25, RecurrenceInterval::Q100]);
    }
}
