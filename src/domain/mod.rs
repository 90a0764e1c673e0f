//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - tidy rows and the per-file table set (`NormalizedRow`, `NormalizedTableSet`)
//! - load diagnostics (`LoadReport`)
//! - the indicator catalogue and country metadata (`IndicatorKind`, `Region`)

pub mod indicator;
pub mod types;

pub use indicator::*;
pub use types::*;
