/// Validated regression constant tables.
///
/// A `ConstantTable` holds one equation set's published coefficients and
/// exponents, keyed by region and recurrence interval. Every table, shipped
/// or supplied as an override, goes through the same shape checks once at
/// construction; evaluation afterwards only reads it.
///
/// Shape rules:
/// - the table is for the equation set it is loaded as
/// - no recurrence interval is listed twice
/// - exactly the set's regions are present
/// - every coefficient / exponent key is a listed interval
/// - every listed interval has a coefficient and exponents for each region
/// - within a region, every interval uses the same characteristics, and
///   those are exactly the ones the region's equation takes
///
/// Numeric values are trusted as printed.

use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::config::{self, RegionConfig, TableConfig};
use crate::equations::EquationSet;
use crate::error::TableError;
use crate::model::{Characteristic, RecurrenceInterval, Region};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Coefficients and exponents for one equation set.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantTable {
    equation_set: EquationSet,
    publication: String,
    url: Option<String>,
    recurrence: Vec<RecurrenceInterval>,
    regions: BTreeMap<Region, RegionTable>,
}

/// One region's coefficient column and exponent rows.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionTable {
    region: Region,
    coefficients: BTreeMap<RecurrenceInterval, f64>,
    exponents: BTreeMap<RecurrenceInterval, BTreeMap<Characteristic, f64>>,
}

/// The constants a region equation needs for a single recurrence interval.
#[derive(Debug, Clone, Copy)]
pub struct IntervalTerms<'a> {
    region: Region,
    interval: RecurrenceInterval,
    coefficient: f64,
    exponents: &'a BTreeMap<Characteristic, f64>,
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl ConstantTable {
    /// Parses and validates table TOML for `set`.
    pub fn from_toml_str(set: EquationSet, contents: &str) -> Result<Self, TableError> {
        let raw = config::parse_table(contents)?;
        Self::from_config(set, raw)
    }

    /// Validates an already-parsed table for `set`.
    pub fn from_config(set: EquationSet, raw: TableConfig) -> Result<Self, TableError> {
        if raw.equation_set.parse::<EquationSet>().ok() != Some(set) {
            return Err(TableError::EquationSetMismatch {
                expected: set,
                found: raw.equation_set,
            });
        }

        let mut listed = BTreeSet::new();
        for interval in &raw.recurrence {
            if !listed.insert(*interval) {
                return Err(TableError::DuplicateInterval(*interval));
            }
        }

        let mut regions = BTreeMap::new();
        for (label, region_config) in &raw.regions {
            let region = label
                .parse::<Region>()
                .ok()
                .filter(|r| set.regions().contains(r))
                .ok_or_else(|| TableError::UnsupportedRegion {
                    set,
                    region: label.clone(),
                })?;
            let region_table = RegionTable::build(set, region, &raw.recurrence, region_config)?;
            regions.insert(region, region_table);
        }

        for region in set.regions() {
            if !regions.contains_key(region) {
                return Err(TableError::MissingRegion {
                    set,
                    region: *region,
                });
            }
        }

        debug!(
            "Validated {} regression table ({}): {} regions x {} intervals",
            set,
            raw.publication,
            regions.len(),
            raw.recurrence.len()
        );

        Ok(ConstantTable {
            equation_set: set,
            publication: raw.publication,
            url: raw.url,
            recurrence: raw.recurrence,
            regions,
        })
    }
}

impl RegionTable {
    fn build(
        set: EquationSet,
        region: Region,
        recurrence: &[RecurrenceInterval],
        raw: &RegionConfig,
    ) -> Result<Self, TableError> {
        let listed_interval = |label: &str| {
            label
                .parse::<RecurrenceInterval>()
                .ok()
                .filter(|r| recurrence.contains(r))
                .ok_or_else(|| TableError::UnknownInterval {
                    region,
                    label: label.to_string(),
                })
        };

        // Coefficients: only listed intervals, and all of them
        let mut coefficients = BTreeMap::new();
        for (label, value) in &raw.coefficients {
            coefficients.insert(listed_interval(label)?, *value);
        }
        for interval in recurrence {
            if !coefficients.contains_key(interval) {
                return Err(TableError::MissingCoefficient {
                    region,
                    interval: *interval,
                });
            }
        }

        // Exponents keyed by characteristic, codes resolved per equation set
        let mut exponents = BTreeMap::new();
        for (label, row) in &raw.exponents {
            let interval = listed_interval(label)?;
            let mut resolved = BTreeMap::new();
            for (code, value) in row {
                let characteristic = set.characteristic_from_code(code).ok_or_else(|| {
                    TableError::UnknownCharacteristic {
                        set,
                        region,
                        interval,
                        code: code.clone(),
                    }
                })?;
                resolved.insert(characteristic, *value);
            }
            exponents.insert(interval, resolved);
        }

        // Same characteristic set on every interval
        let mut reference: Option<(RecurrenceInterval, BTreeSet<Characteristic>)> = None;
        for interval in recurrence {
            let row = exponents.get(interval).ok_or(TableError::MissingInterval {
                region,
                interval: *interval,
            })?;
            let names: BTreeSet<Characteristic> = row.keys().copied().collect();
            match &reference {
                None => reference = Some((*interval, names)),
                Some((first, expected)) if *expected != names => {
                    return Err(TableError::InconsistentCharacteristics {
                        region,
                        interval: *interval,
                        reference: *first,
                    });
                }
                Some(_) => {}
            }
        }

        // ...and that set is exactly what the region's equation takes
        if let Some((interval, names)) = reference {
            let required = set.required_characteristics(region);
            if let Some(missing) = required.iter().find(|c| !names.contains(*c)) {
                return Err(TableError::MissingExponent {
                    region,
                    interval,
                    characteristic: *missing,
                });
            }
            if let Some(extra) = names.iter().find(|c| !required.contains(*c)) {
                return Err(TableError::UnexpectedCharacteristic {
                    region,
                    interval,
                    characteristic: *extra,
                });
            }
        }

        Ok(RegionTable {
            region,
            coefficients,
            exponents,
        })
    }
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

impl ConstantTable {
    pub fn equation_set(&self) -> EquationSet {
        self.equation_set
    }

    pub fn publication(&self) -> &str {
        &self.publication
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Recurrence intervals in the order the report lists them.
    pub fn recurrence(&self) -> &[RecurrenceInterval] {
        &self.recurrence
    }

    pub fn region(&self, region: Region) -> Result<&RegionTable, TableError> {
        self.regions
            .get(&region)
            .ok_or(TableError::MissingRegion {
                set: self.equation_set,
                region,
            })
    }

    pub fn regions(&self) -> impl Iterator<Item = &RegionTable> {
        self.regions.values()
    }
}

impl RegionTable {
    pub fn region(&self) -> Region {
        self.region
    }

    pub fn coefficient(&self, interval: RecurrenceInterval) -> Option<f64> {
        self.coefficients.get(&interval).copied()
    }

    pub fn exponent(&self, interval: RecurrenceInterval, characteristic: Characteristic) -> Option<f64> {
        self.exponents
            .get(&interval)
            .and_then(|row| row.get(&characteristic))
            .copied()
    }

    /// Characteristic names used at one interval.
    pub fn characteristics(&self, interval: RecurrenceInterval) -> BTreeSet<Characteristic> {
        self.exponents
            .get(&interval)
            .map(|row| row.keys().copied().collect())
            .unwrap_or_default()
    }

    pub(crate) fn terms(&self, interval: RecurrenceInterval) -> Result<IntervalTerms<'_>, TableError> {
        let coefficient = self.coefficient(interval).ok_or(TableError::MissingCoefficient {
            region: self.region,
            interval,
        })?;
        let exponents = self.exponents.get(&interval).ok_or(TableError::MissingInterval {
            region: self.region,
            interval,
        })?;
        Ok(IntervalTerms {
            region: self.region,
            interval,
            coefficient,
            exponents,
        })
    }
}

impl IntervalTerms<'_> {
    pub fn interval(&self) -> RecurrenceInterval {
        self.interval
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    pub fn exponent(&self, characteristic: Characteristic) -> Result<f64, TableError> {
        self.exponents
            .get(&characteristic)
            .copied()
            .ok_or(TableError::MissingExponent {
                region: self.region,
                interval: self.interval,
                characteristic,
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
