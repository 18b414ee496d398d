//! regflow_service: USGS regional-regression peak-flow estimates for
//! ungaged basins in New York and Pennsylvania.
//!
//! # Module structure
//!
//! ```text
//! regflow_service
//! ├── model       — shared data types (RecurrenceInterval, Region, Characteristic,
//! │                 BasinCharacteristics, DischargeResult)
//! ├── error       — TableError (table construction) and FlowError (evaluation)
//! ├── config      — regression table loader (tables/*.toml)
//! ├── table       — validated coefficient/exponent store per equation set
//! └── equations   — EquationSet selection, shared evaluation helpers
//!     ├── new_york     — SIR 2006-5112, regions R1..R6
//!     └── pennsylvania — SIR 2008-5102, regions R1..R4
//! ```
//!
//! ```no_run
//! use regflow_service::{BasinCharacteristics, Characteristic, EquationSet};
//!
//! let basin = BasinCharacteristics::new().with(Characteristic::DrainageArea, 5.0);
//! let flows = EquationSet::Pennsylvania.evaluate("R4", &basin, None)?;
//! println!("{}", flows.get_label("Q100").unwrap_or_default());
//! # Ok::<(), regflow_service::FlowError>(())
//! ```

pub mod config;
pub mod equations;
pub mod error;
pub mod model;
pub mod table;

pub use equations::{round_discharge, EquationSet};
pub use error::{FlowError, TableError};
pub use model::{BasinCharacteristics, Characteristic, DischargeResult, RecurrenceInterval, Region};
pub use table::ConstantTable;
