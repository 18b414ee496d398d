//! Error types.
//!
//! `TableError` covers defects in a regression table and is raised when the
//! table is built. `FlowError` is what a caller sees from an evaluation:
//! bad inputs, unknown regions or states, or a broken table handed in as an
//! override.

use crate::equations::EquationSet;
use crate::model::{Characteristic, RecurrenceInterval, Region};

/// Construction-time defect in a regression constant table.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableError {
    #[error("failed to parse regression table: {0}")]
    Parse(String),
    #[error("failed to read regression table {path}: {message}")]
    Io { path: String, message: String },
    #[error("table is for equation set '{found}', expected {expected}")]
    EquationSetMismatch {
        expected: EquationSet,
        found: String,
    },
    #[error("recurrence interval {0} is listed more than once")]
    DuplicateInterval(RecurrenceInterval),
    #[error("{set} table has no region {region}")]
    MissingRegion { set: EquationSet, region: Region },
    #[error("{set} has no region '{region}'")]
    UnsupportedRegion { set: EquationSet, region: String },
    #[error("region {region} references recurrence interval '{label}', which is not in the interval list")]
    UnknownInterval { region: Region, label: String },
    #[error("region {region} has no coefficient for {interval}")]
    MissingCoefficient {
        region: Region,
        interval: RecurrenceInterval,
    },
    #[error("region {region} has no exponents for {interval}")]
    MissingInterval {
        region: Region,
        interval: RecurrenceInterval,
    },
    #[error("region {region} has no {interval} exponent for {characteristic}")]
    MissingExponent {
        region: Region,
        interval: RecurrenceInterval,
        characteristic: Characteristic,
    },
    #[error("region {region} {interval}: '{code}' is not a {set} characteristic code")]
    UnknownCharacteristic {
        set: EquationSet,
        region: Region,
        interval: RecurrenceInterval,
        code: String,
    },
    #[error("region {region} {interval}: {characteristic} is not used by the region's equation")]
    UnexpectedCharacteristic {
        region: Region,
        interval: RecurrenceInterval,
        characteristic: Characteristic,
    },
    #[error("region {region}: characteristics for {interval} differ from those for {reference}")]
    InconsistentCharacteristics {
        region: Region,
        interval: RecurrenceInterval,
        reference: RecurrenceInterval,
    },
}

/// Failure of a discharge evaluation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FlowError {
    #[error("invalid {characteristic} = {value}: {reason}")]
    InvalidInput {
        characteristic: Characteristic,
        value: f64,
        reason: &'static str,
    },
    #[error("{set} has no region '{region}'")]
    UnsupportedRegion { set: EquationSet, region: String },
    #[error("no regression equations for state '{0}'")]
    UnsupportedEquationSet(String),
    #[error("{set} region {region} requires {characteristic}")]
    MissingCharacteristic {
        set: EquationSet,
        region: Region,
        characteristic: Characteristic,
    },
    #[error(transparent)]
    Table(#[from] TableError),
}
