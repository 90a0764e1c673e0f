//! `eu-indicators` library crate.
//!
//! Loads a directory of Eurostat indicator exports into tidy
//! `(country, year, value)` tables and serves dashboard views over them.
//! The binary (`eudash`) is a thin wrapper around this library so the
//! pipeline and views are testable without spawning processes.

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod plot;
pub mod report;
pub mod tui;
pub mod views;
